use crate::listener::{RemovalCause, RemovalListener, RemovalNotification};

use std::fmt;
use std::sync::Arc;

use tracing::trace;

/// Delivers removal notifications to the configured listener.
///
/// Removals are first collected into a `RemovalBatch` while the store is
/// locked, then handed to `dispatch` once every lock has been released.
pub(crate) struct Notifier<K, V> {
  listener: Option<Arc<dyn RemovalListener<K, V>>>,
}

impl<K, V> fmt::Debug for Notifier<K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Notifier")
      .field("has_listener", &self.listener.is_some())
      .finish()
  }
}

impl<K, V> Notifier<K, V> {
  pub(crate) fn new(listener: Option<Arc<dyn RemovalListener<K, V>>>) -> Self {
    Self { listener }
  }

  /// Starts an empty batch. Without a listener the batch drops everything
  /// it is given, so no notification is ever constructed.
  pub(crate) fn batch(&self) -> RemovalBatch<K, V> {
    RemovalBatch {
      enabled: self.listener.is_some(),
      events: Vec::new(),
    }
  }

  /// Invokes the listener once per collected removal, in removal order.
  pub(crate) fn dispatch(&self, batch: RemovalBatch<K, V>) {
    if let Some(listener) = &self.listener {
      for notification in batch.events {
        listener.on_removal(notification);
      }
    }
  }
}

/// Removals produced by one cache operation.
pub(crate) struct RemovalBatch<K, V> {
  enabled: bool,
  events: Vec<RemovalNotification<K, V>>,
}

impl<K, V> RemovalBatch<K, V> {
  pub(crate) fn record(&mut self, key: K, value: Arc<V>, cause: RemovalCause) {
    trace!(%cause, "cache entry removed");
    if self.enabled {
      self.events.push(RemovalNotification::new(key, value, cause));
    }
  }

  /// Like `record`, for removals where the key stays in the map.
  pub(crate) fn record_cloned(&mut self, key: &K, value: Arc<V>, cause: RemovalCause)
  where
    K: Clone,
  {
    trace!(%cause, "cache entry removed");
    if self.enabled {
      self.events.push(RemovalNotification::new(key.clone(), value, cause));
    }
  }

  #[cfg(test)]
  pub(crate) fn collecting() -> Self {
    Self {
      enabled: true,
      events: Vec::new(),
    }
  }

  #[cfg(test)]
  pub(crate) fn len(&self) -> usize {
    self.events.len()
  }

  #[cfg(test)]
  pub(crate) fn causes(&self) -> Vec<RemovalCause> {
    self.events.iter().map(|n| n.cause()).collect()
  }
}
