use crate::error::LoadError;
use crate::handles::{Cache, LoadingCache};

use std::error::Error as StdError;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::Arc;

/// The one key of a single-element cache.
///
/// Single-element caches are ordinary keyed caches whose key is always this
/// sentinel, so expiry, eviction and notification behave exactly as they do
/// for keyed caches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SingleKey;

impl Hash for SingleKey {
  fn hash<S: Hasher>(&self, state: &mut S) {
    state.write_u8(9);
  }
}

impl fmt::Display for SingleKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "SingleKey")
  }
}

/// A cache holding at most one value, with no key to speak of.
pub struct SingleElementCache<V, H = ahash::RandomState> {
  cache: Cache<SingleKey, V, H>,
}

impl<V, H> Clone for SingleElementCache<V, H> {
  fn clone(&self) -> Self {
    Self {
      cache: self.cache.clone(),
    }
  }
}

impl<V, H: BuildHasher + Clone> fmt::Debug for SingleElementCache<V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SingleElementCache")
      .field("cache", &self.cache)
      .finish()
  }
}

impl<V, H: BuildHasher + Clone> SingleElementCache<V, H> {
  pub(crate) fn new(cache: Cache<SingleKey, V, H>) -> Self {
    Self { cache }
  }

  /// Returns the value, computing it with `loader` if it is missing.
  pub fn get_or_load<F>(&self, loader: F) -> Arc<V>
  where
    F: FnOnce() -> V,
  {
    self.cache.get_or_load(SingleKey, |_| loader())
  }

  pub fn try_get_or_load<F, E>(&self, loader: F) -> Result<Arc<V>, LoadError>
  where
    F: FnOnce() -> Result<V, E>,
    E: Into<Box<dyn StdError + Send + Sync>>,
  {
    self.cache.try_get_or_load(SingleKey, |_| loader())
  }

  pub fn get_if_present(&self) -> Option<Arc<V>> {
    self.cache.get_if_present(&SingleKey)
  }

  pub fn put(&self, value: V)
  where
    V: PartialEq,
  {
    self.cache.put(SingleKey, value)
  }

  pub fn invalidate(&self) -> bool {
    self.cache.invalidate(&SingleKey)
  }

  /// Drops the value without notifying the listener.
  pub fn invalidate_all(&self) {
    self.cache.invalidate_all()
  }

  pub fn count(&self) -> u64 {
    self.cache.count()
  }

  pub fn as_cache(&self) -> &Cache<SingleKey, V, H> {
    &self.cache
  }
}

/// A single-element cache bound to a parameterless loader.
pub struct SingleElementLoadingCache<V, H = ahash::RandomState> {
  cache: LoadingCache<SingleKey, V, H>,
}

impl<V, H> Clone for SingleElementLoadingCache<V, H> {
  fn clone(&self) -> Self {
    Self {
      cache: self.cache.clone(),
    }
  }
}

impl<V, H: BuildHasher + Clone> fmt::Debug for SingleElementLoadingCache<V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SingleElementLoadingCache")
      .field("cache", &self.cache)
      .finish()
  }
}

impl<V, H: BuildHasher + Clone> SingleElementLoadingCache<V, H> {
  pub(crate) fn new(cache: LoadingCache<SingleKey, V, H>) -> Self {
    Self { cache }
  }

  /// Returns the value, computing it with the bound loader if it is missing.
  ///
  /// # Panics
  ///
  /// Panics if the bound loader panics.
  pub fn get(&self) -> Arc<V> {
    self.cache.get(SingleKey)
  }

  /// Returns the value, computing it with `loader` instead of the bound
  /// loader if it is missing.
  pub fn get_or_load<F>(&self, loader: F) -> Arc<V>
  where
    F: FnOnce() -> V,
  {
    self.cache.get_or_load(SingleKey, |_| loader())
  }

  pub fn try_get_or_load<F, E>(&self, loader: F) -> Result<Arc<V>, LoadError>
  where
    F: FnOnce() -> Result<V, E>,
    E: Into<Box<dyn StdError + Send + Sync>>,
  {
    self.cache.try_get_or_load(SingleKey, |_| loader())
  }

  pub fn get_if_present(&self) -> Option<Arc<V>> {
    self.cache.get_if_present(&SingleKey)
  }

  pub fn put(&self, value: V)
  where
    V: PartialEq,
  {
    self.cache.put(SingleKey, value)
  }

  pub fn invalidate(&self) -> bool {
    self.cache.invalidate(&SingleKey)
  }

  pub fn invalidate_all(&self) {
    self.cache.invalidate_all()
  }

  pub fn count(&self) -> u64 {
    self.cache.count()
  }

  /// The keyed view, whose `get` ignores its key.
  pub fn as_loading_cache(&self) -> &LoadingCache<SingleKey, V, H> {
    &self.cache
  }
}
