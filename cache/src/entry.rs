use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A container for a value in the cache, holding its timestamps.
///
/// Timestamps are nanoseconds since the cache epoch (see `time`). They are
/// atomics so a reader holding only the store's read lock can record an
/// access without upgrading.
#[derive(Debug)]
pub(crate) struct CacheEntry<V> {
  value: Arc<V>,
  written_at: AtomicU64,
  accessed_at: AtomicU64,
}

impl<V> CacheEntry<V> {
  pub(crate) fn new(value: V, now: u64) -> Self {
    Self {
      value: Arc::new(value),
      written_at: AtomicU64::new(now),
      accessed_at: AtomicU64::new(now),
    }
  }

  /// Returns a clone of the `Arc` containing the value.
  #[inline]
  pub(crate) fn value(&self) -> Arc<V> {
    self.value.clone()
  }

  #[inline]
  pub(crate) fn value_ref(&self) -> &V {
    &self.value
  }

  /// Consumes the entry, handing back the stored value.
  #[inline]
  pub(crate) fn into_value(self) -> Arc<V> {
    self.value
  }

  #[inline]
  pub(crate) fn written_at(&self) -> u64 {
    self.written_at.load(Ordering::Relaxed)
  }

  #[inline]
  pub(crate) fn accessed_at(&self) -> u64 {
    self.accessed_at.load(Ordering::Relaxed)
  }

  /// Records a read. `fetch_max` keeps the stamp monotonic when two readers
  /// race with slightly different clocks.
  #[inline]
  pub(crate) fn touch(&self, now: u64) {
    self.accessed_at.fetch_max(now, Ordering::Relaxed);
  }

  /// Records a write of an equal value: both clocks restart.
  #[inline]
  pub(crate) fn rewrite(&self, now: u64) {
    self.written_at.store(now, Ordering::Relaxed);
    self.accessed_at.store(now, Ordering::Relaxed);
  }
}
