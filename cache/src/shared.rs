use crate::error::LoadError;
use crate::loader::{Flight, LoadFuture, PendingLoads};
use crate::notifier::Notifier;
use crate::store::{Published, Store};

use std::error::Error as StdError;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use tracing::{debug, trace};

/// The internal, thread-safe core shared by every cache handle.
pub(crate) struct CacheShared<K, V, H> {
  pub(crate) store: Store<K, V, H>,
  pub(crate) pending_loads: PendingLoads<K, V, H>,
  pub(crate) notifier: Notifier<K, V>,
}

impl<K, V, H> fmt::Debug for CacheShared<K, V, H>
where
  K: Eq + Hash,
  H: BuildHasher + Clone,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CacheShared")
      .field("store", &self.store)
      .field("pending_load_shards", &self.pending_loads.shard_count())
      .field("notifier", &self.notifier)
      .finish()
  }
}

impl<K, V, H> CacheShared<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher + Clone,
{
  /// Single-flight lookup: returns the live value for `key` or computes it,
  /// with at most one `loader` running per key at any time.
  ///
  /// Protocol:
  /// 1. Optimistic read; a live entry returns immediately.
  /// 2. Under the key's pending-load shard lock, either join the existing
  ///    flight or re-check the store and open a new one. The re-check closes
  ///    the window where a flight published between step 1 and the lock:
  ///    a flight always publishes to the store before it retires.
  /// 3. The leader runs `loader` with no lock held, publishes, retires the
  ///    flight, wakes the waiters and only then notifies the listener.
  pub(crate) fn load<F, E>(&self, key: K, loader: F) -> Result<Arc<V>, LoadError>
  where
    F: FnOnce(&K) -> Result<V, E>,
    E: Into<Box<dyn StdError + Send + Sync>>,
  {
    if let Some(value) = self.store.get(&key) {
      return Ok(value);
    }

    let future = {
      let mut pending = self.pending_loads.shard(&key).lock();
      let existing = pending.get(&key).cloned();
      if let Some(existing) = existing {
        drop(pending);
        return existing.wait();
      }
      if let Some(value) = self.store.get(&key) {
        return Ok(value);
      }
      let future = Arc::new(LoadFuture::new());
      pending.insert(key.clone(), future.clone());
      future
    };

    let flight = Flight::new(&self.pending_loads, key, future);
    match loader(flight.key()) {
      Ok(value) => {
        let mut removals = self.notifier.batch();
        let published = self
          .store
          .publish(flight.key().clone(), value, &mut removals);
        if let Published::Existing(_) = &published {
          trace!("load superseded by a concurrent write");
        }
        let value = published.into_value();
        flight.complete(value.clone());
        self.notifier.dispatch(removals);
        Ok(value)
      }
      Err(error) => {
        let error = LoadError::failed(error);
        debug!(%error, "value loader failed");
        flight.fail(error.clone());
        Err(error)
      }
    }
  }
}
