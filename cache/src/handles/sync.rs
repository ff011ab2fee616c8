use crate::error::LoadError;
use crate::shared::CacheShared;

use std::borrow::Borrow;
use std::convert::Infallible;
use std::error::Error as StdError;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use tracing::debug;

/// A thread-safe, synchronous cache.
///
/// Every method may be called concurrently from any number of threads.
/// Cloning the handle is cheap and yields another handle to the same cache.
pub struct Cache<K, V, H = ahash::RandomState> {
  pub(crate) shared: Arc<CacheShared<K, V, H>>,
}

impl<K, V, H> Clone for Cache<K, V, H> {
  fn clone(&self) -> Self {
    Self {
      shared: self.shared.clone(),
    }
  }
}

impl<K, V, H> fmt::Debug for Cache<K, V, H>
where
  K: Eq + Hash,
  H: BuildHasher + Clone,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Cache")
      .field("shared", &self.shared)
      .finish()
  }
}

impl<K, V, H> Cache<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher + Clone,
{
  /// The number of entries currently held.
  ///
  /// Entries that have expired but were not yet removed by a write to
  /// their key still count.
  pub fn count(&self) -> u64 {
    self.shared.store.len() as u64
  }

  /// Returns the value for `key` if it is present and not expired.
  ///
  /// A hit refreshes the entry's access time and its recency position. An
  /// expired entry is reported absent but stays in place; no notification
  /// is sent until a later write to the key removes it.
  pub fn get_if_present<Q>(&self, key: &Q) -> Option<Arc<V>>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.shared.store.get(key)
  }

  /// Returns the value for `key`, computing it with `loader` on a miss.
  ///
  /// Among all threads asking for the same missing key at the same time,
  /// exactly one runs its `loader`; the others block until it finishes and
  /// receive the same value. The loader runs without any cache lock held,
  /// but it must not ask this cache for the same key.
  ///
  /// # Panics
  ///
  /// If the loader panics, the panic propagates on the thread that ran it
  /// and every thread waiting on that computation panics as well. No entry
  /// is created.
  pub fn get_or_load<F>(&self, key: K, loader: F) -> Arc<V>
  where
    F: FnOnce(&K) -> V,
  {
    match self
      .shared
      .load(key, |key| Ok::<V, Infallible>(loader(key)))
    {
      Ok(value) => value,
      Err(error) => panic!("{error} while this thread was waiting for it"),
    }
  }

  /// Like `get_or_load`, for loaders that can fail.
  ///
  /// An error is returned to the thread that ran the loader and to every
  /// thread that waited on it; they all receive the same `LoadError`. No
  /// entry is created and the next call for the key starts a new load.
  pub fn try_get_or_load<F, E>(&self, key: K, loader: F) -> Result<Arc<V>, LoadError>
  where
    F: FnOnce(&K) -> Result<V, E>,
    E: Into<Box<dyn StdError + Send + Sync>>,
  {
    self.shared.load(key, loader)
  }

  /// Inserts `value` for `key`.
  ///
  /// Overwriting a live entry holding a different value notifies the
  /// listener with `RemovalCause::Replaced` and the old value. Writing a
  /// value equal to the live one only refreshes the entry's timestamps and
  /// recency. Overwriting an expired entry notifies `RemovalCause::Expired`
  /// with the stale value. Inserting a new key into a full cache evicts the
  /// least recently used entry.
  pub fn put(&self, key: K, value: V)
  where
    V: PartialEq,
  {
    let mut removals = self.shared.notifier.batch();
    self.shared.store.put(key, value, &mut removals);
    self.shared.notifier.dispatch(removals);
  }

  /// Removes the entry for `key`, returning `true` if there was one.
  ///
  /// The listener is notified with `RemovalCause::Explicit`, even when the
  /// entry had already expired.
  pub fn invalidate<Q>(&self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let mut removals = self.shared.notifier.batch();
    let removed = self.shared.store.invalidate(key, &mut removals);
    self.shared.notifier.dispatch(removals);
    removed
  }

  /// Removes every entry. This is a bulk reset: the listener is not
  /// notified. Loads in flight are unaffected and publish afterwards.
  pub fn invalidate_all(&self) {
    let dropped = self.shared.store.clear();
    debug!(dropped, "invalidated all cache entries");
  }
}
