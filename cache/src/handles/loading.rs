use crate::error::LoadError;
use crate::handles::Cache;

use std::borrow::Borrow;
use std::error::Error as StdError;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

pub(crate) type KeyedLoader<K, V> = Arc<dyn Fn(&K) -> V + Send + Sync>;

/// A `Cache` bound to a default loader, so lookups never need one.
///
/// All `Cache` operations are available here as well, and `as_cache` hands
/// out the underlying cache.
pub struct LoadingCache<K, V, H = ahash::RandomState> {
  cache: Cache<K, V, H>,
  loader: KeyedLoader<K, V>,
}

impl<K, V, H> Clone for LoadingCache<K, V, H> {
  fn clone(&self) -> Self {
    Self {
      cache: self.cache.clone(),
      loader: self.loader.clone(),
    }
  }
}

impl<K, V, H> fmt::Debug for LoadingCache<K, V, H>
where
  K: Eq + Hash,
  H: BuildHasher + Clone,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LoadingCache")
      .field("cache", &self.cache)
      .finish_non_exhaustive()
  }
}

impl<K, V, H> LoadingCache<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher + Clone,
{
  pub(crate) fn new(cache: Cache<K, V, H>, loader: KeyedLoader<K, V>) -> Self {
    Self { cache, loader }
  }

  /// Returns the value for `key`, computing it with the bound loader on a
  /// miss. See `Cache::get_or_load` for the single-flight guarantees.
  ///
  /// # Panics
  ///
  /// Panics if the bound loader panics, on the loading thread and on every
  /// thread waiting for it.
  pub fn get(&self, key: K) -> Arc<V> {
    self.cache.get_or_load(key, |key| (self.loader)(key))
  }

  /// Returns the value for `key`, computing it with `loader` instead of the
  /// bound loader on a miss.
  pub fn get_or_load<F>(&self, key: K, loader: F) -> Arc<V>
  where
    F: FnOnce(&K) -> V,
  {
    self.cache.get_or_load(key, loader)
  }

  /// Like `get_or_load`, for loaders that can fail.
  pub fn try_get_or_load<F, E>(&self, key: K, loader: F) -> Result<Arc<V>, LoadError>
  where
    F: FnOnce(&K) -> Result<V, E>,
    E: Into<Box<dyn StdError + Send + Sync>>,
  {
    self.cache.try_get_or_load(key, loader)
  }

  pub fn get_if_present<Q>(&self, key: &Q) -> Option<Arc<V>>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.cache.get_if_present(key)
  }

  pub fn put(&self, key: K, value: V)
  where
    V: PartialEq,
  {
    self.cache.put(key, value)
  }

  pub fn invalidate<Q>(&self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.cache.invalidate(key)
  }

  pub fn invalidate_all(&self) {
    self.cache.invalidate_all()
  }

  pub fn count(&self) -> u64 {
    self.cache.count()
  }

  pub fn as_cache(&self) -> &Cache<K, V, H> {
    &self.cache
  }
}
