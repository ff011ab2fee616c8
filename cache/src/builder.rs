use crate::error::BuildError;
use crate::expiry::ExpiryPolicy;
use crate::handles::{
  Cache, LoadingCache, SingleElementCache, SingleElementLoadingCache, SingleKey,
};
use crate::listener::RemovalListener;
use crate::loader::PendingLoads;
use crate::notifier::Notifier;
use crate::policy::lru::LruPolicy;
use crate::policy::null::NullPolicy;
use crate::policy::EvictionPolicy;
use crate::shared::CacheShared;
use crate::store::Store;

use core::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

/// A builder for creating `Cache` and `LoadingCache` instances.
///
/// Every setter consumes the builder and hands it back, so options chain.
/// Setters that can reject their input return a `Result` and validate right
/// away; an invalid option never makes it to `build`.
///
/// ```
/// use local_cache::CacheBuilder;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), local_cache::BuildError> {
/// let cache = CacheBuilder::<u32, String>::new()
///   .expire_after_access(Duration::from_secs(30))
///   .max_elements(1_000)?
///   .build();
///
/// cache.put(1, "one".to_string());
/// assert_eq!(cache.get_if_present(&1).as_deref(), Some(&"one".to_string()));
/// # Ok(())
/// # }
/// ```
pub struct CacheBuilder<K, V, H = ahash::RandomState> {
  expire_after_access: Option<Duration>,
  expire_after_write: Option<Duration>,
  max_elements: Option<u64>,
  listener: Option<Arc<dyn RemovalListener<K, V>>>,
  loader_shards: usize,
  hasher: H,
}

// Manual Debug implementation for CacheBuilder.
impl<K, V, H> fmt::Debug for CacheBuilder<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CacheBuilder")
      .field("expire_after_access", &self.expire_after_access)
      .field("expire_after_write", &self.expire_after_write)
      .field("max_elements", &self.max_elements)
      .field("has_listener", &self.listener.is_some())
      .field("loader_shards", &self.loader_shards)
      .finish_non_exhaustive()
  }
}

// --- General Configuration Methods ---
// This impl block has no restrictive bounds on K, V or H.
impl<K, V, H> CacheBuilder<K, V, H> {
  /// Hides entries that have not been read or written for longer than
  /// `duration`.
  pub fn expire_after_access(mut self, duration: Duration) -> Self {
    self.expire_after_access = Some(duration);
    self
  }

  /// Same as `expire_after_access`, in milliseconds. Fails on negative input.
  pub fn expire_after_access_millis(self, millis: i64) -> Result<Self, BuildError> {
    let duration = non_negative_millis("access", millis)?;
    Ok(self.expire_after_access(duration))
  }

  /// Hides entries written longer than `duration` ago, however often they
  /// are read.
  pub fn expire_after_write(mut self, duration: Duration) -> Self {
    self.expire_after_write = Some(duration);
    self
  }

  /// Same as `expire_after_write`, in milliseconds. Fails on negative input.
  pub fn expire_after_write_millis(self, millis: i64) -> Result<Self, BuildError> {
    let duration = non_negative_millis("write", millis)?;
    Ok(self.expire_after_write(duration))
  }

  /// Bounds the cache to `max_elements` entries, evicting the least recently
  /// used entry when a new key would exceed it. Fails on `0`.
  pub fn max_elements(mut self, max_elements: u64) -> Result<Self, BuildError> {
    if max_elements == 0 {
      return Err(BuildError::ZeroCapacity);
    }
    self.max_elements = Some(max_elements);
    Ok(self)
  }

  /// Sets the listener notified of every removal.
  pub fn removal_listener<Listener>(mut self, listener: Listener) -> Self
  where
    Listener: RemovalListener<K, V> + 'static,
  {
    self.listener = Some(Arc::new(listener));
    self
  }

  /// Sets the number of independently locked shards of the in-flight load
  /// table, rounded up to a power of two. Only affects contention between
  /// loads of different keys.
  pub fn loader_shards(mut self, shards: usize) -> Self {
    self.loader_shards = shards.max(1).next_power_of_two();
    self
  }

  /// Sets the hasher for the cache.
  pub fn hasher<H2>(self, hasher: H2) -> CacheBuilder<K, V, H2> {
    CacheBuilder {
      expire_after_access: self.expire_after_access,
      expire_after_write: self.expire_after_write,
      max_elements: self.max_elements,
      listener: self.listener,
      loader_shards: self.loader_shards,
      hasher,
    }
  }

  pub fn expire_after_access_duration(&self) -> Option<Duration> {
    self.expire_after_access
  }

  pub fn expire_after_write_duration(&self) -> Option<Duration> {
    self.expire_after_write
  }

  pub fn max_elements_bound(&self) -> Option<u64> {
    self.max_elements
  }

  pub fn has_removal_listener(&self) -> bool {
    self.listener.is_some()
  }
}

fn non_negative_millis(setting: &'static str, millis: i64) -> Result<Duration, BuildError> {
  u64::try_from(millis)
    .map(Duration::from_millis)
    .map_err(|_| BuildError::NegativeDuration { setting, millis })
}

// --- Default Constructor ---
impl<K, V, H: BuildHasher + Default> CacheBuilder<K, V, H> {
  /// Creates a new `CacheBuilder` with default settings: no expiry, no
  /// bound, no listener.
  pub fn new() -> Self {
    Self {
      expire_after_access: None,
      expire_after_write: None,
      max_elements: None,
      listener: None,
      loader_shards: (num_cpus::get() * 4).max(1).next_power_of_two(),
      hasher: H::default(),
    }
  }
}

impl<K, V> Default for CacheBuilder<K, V, ahash::RandomState> {
  fn default() -> Self {
    Self::new()
  }
}

// --- Build Methods ---
impl<K, V, H> CacheBuilder<K, V, H>
where
  K: Eq + Hash + Clone + Send + Sync + 'static,
  V: Send + Sync + 'static,
  H: BuildHasher + Clone + Send + Sync + 'static,
{
  /// Builds a manual `Cache`.
  pub fn build(self) -> Cache<K, V, H> {
    Cache {
      shared: Arc::new(self.build_shared_core()),
    }
  }

  /// Builds a `LoadingCache` whose `get` computes missing values with
  /// `loader`.
  pub fn build_with_loader<F>(self, loader: F) -> LoadingCache<K, V, H>
  where
    F: Fn(&K) -> V + Send + Sync + 'static,
  {
    LoadingCache::new(self.build(), Arc::new(loader))
  }

  /// Central logic to construct the shared core of the cache.
  fn build_shared_core(self) -> CacheShared<K, V, H> {
    debug!(
      expire_after_access = ?self.expire_after_access,
      expire_after_write = ?self.expire_after_write,
      max_elements = ?self.max_elements,
      has_listener = self.listener.is_some(),
      "building cache"
    );

    // An unbounded cache never evicts, so it does not track recency at all.
    let policy: Box<dyn EvictionPolicy<K>> = match self.max_elements {
      Some(_) => Box::new(LruPolicy::new()),
      None => Box::new(NullPolicy),
    };
    let expiry = ExpiryPolicy::new(self.expire_after_access, self.expire_after_write);

    CacheShared {
      store: Store::new(self.hasher.clone(), policy, expiry, self.max_elements),
      pending_loads: PendingLoads::new(self.loader_shards, self.hasher),
      notifier: Notifier::new(self.listener),
    }
  }
}

// --- Single-element Build Methods ---
impl<V, H> CacheBuilder<SingleKey, V, H>
where
  V: Send + Sync + 'static,
  H: BuildHasher + Clone + Send + Sync + 'static,
{
  /// Builds a manual cache holding at most one value.
  pub fn build_single(self) -> SingleElementCache<V, H> {
    SingleElementCache::new(self.build())
  }

  /// Builds a single-element cache whose `get` computes the value with
  /// `loader` when it is missing.
  pub fn build_single_with_loader<F>(self, loader: F) -> SingleElementLoadingCache<V, H>
  where
    F: Fn() -> V + Send + Sync + 'static,
  {
    SingleElementLoadingCache::new(self.build_with_loader(move |_: &SingleKey| loader()))
  }
}
