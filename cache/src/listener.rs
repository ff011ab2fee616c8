use std::fmt;
use std::sync::Arc;

/// Describes the reason an entry was removed from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemovalCause {
  /// The entry was removed by `invalidate`.
  Explicit,
  /// The entry was overwritten by `put` with a different value.
  Replaced,
  /// The entry had expired and was physically removed by a later write.
  Expired,
  /// The entry was the least recently used when the cache exceeded its bound.
  Evicted,
}

impl RemovalCause {
  /// `true` when the removal was decided by the cache rather than the caller.
  pub fn was_evicted(&self) -> bool {
    matches!(self, RemovalCause::Expired | RemovalCause::Evicted)
  }
}

impl fmt::Display for RemovalCause {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RemovalCause::Explicit => write!(f, "explicitly invalidated"),
      RemovalCause::Replaced => write!(f, "replaced by a different value"),
      RemovalCause::Expired => write!(f, "expired (access/write)"),
      RemovalCause::Evicted => write!(f, "evicted due to capacity"),
    }
  }
}

/// A completed removal, handed to the `RemovalListener`.
#[derive(Debug, Clone)]
pub struct RemovalNotification<K, V> {
  key: K,
  value: Arc<V>,
  cause: RemovalCause,
}

impl<K, V> RemovalNotification<K, V> {
  pub fn new(key: K, value: Arc<V>, cause: RemovalCause) -> Self {
    Self { key, value, cause }
  }

  pub fn key(&self) -> &K {
    &self.key
  }

  /// The value that was removed (for `Replaced`, the old value).
  pub fn value(&self) -> &Arc<V> {
    &self.value
  }

  pub fn cause(&self) -> RemovalCause {
    self.cause
  }

  pub fn into_parts(self) -> (K, Arc<V>, RemovalCause) {
    (self.key, self.value, self.cause)
  }
}

// Two notifications are equal when they carry the same mapping; the cause
// does not take part.
impl<K: PartialEq, V: PartialEq> PartialEq for RemovalNotification<K, V> {
  fn eq(&self, other: &Self) -> bool {
    self.key == other.key && self.value == other.value
  }
}

impl<K: Eq, V: Eq> Eq for RemovalNotification<K, V> {}

/// A listener that can be registered with the cache to receive notifications
/// when entries are removed.
///
/// `on_removal` runs synchronously on the thread whose operation caused the
/// removal, after the cache has been updated and with no internal lock held.
/// It is therefore safe to call back into the cache from the listener.
///
/// Any `Fn(RemovalNotification<K, V>) + Send + Sync` closure is a listener.
pub trait RemovalListener<K, V>: Send + Sync {
  fn on_removal(&self, notification: RemovalNotification<K, V>);
}

impl<K, V, F> RemovalListener<K, V> for F
where
  F: Fn(RemovalNotification<K, V>) + Send + Sync,
{
  fn on_removal(&self, notification: RemovalNotification<K, V>) {
    self(notification)
  }
}
