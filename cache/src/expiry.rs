use crate::entry::CacheEntry;
use crate::time;

use std::time::Duration;

/// The expire-after-access and expire-after-write thresholds of a cache.
///
/// This holds no per-entry state. An entry is expired when either configured
/// threshold has been strictly exceeded:
///
/// - `now - accessed_at > after_access`, or
/// - `now - written_at > after_write`.
///
/// Expiry only hides an entry. Physical removal happens when a later write
/// to the same key (or a capacity eviction) reaches it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ExpiryPolicy {
  after_access: Option<u64>,
  after_write: Option<u64>,
}

impl ExpiryPolicy {
  pub(crate) fn new(after_access: Option<Duration>, after_write: Option<Duration>) -> Self {
    Self {
      after_access: after_access.map(time::duration_to_nanos),
      after_write: after_write.map(time::duration_to_nanos),
    }
  }

  /// Whether reads must refresh the access timestamp.
  #[inline]
  pub(crate) fn tracks_access(&self) -> bool {
    self.after_access.is_some()
  }

  #[inline]
  pub(crate) fn is_expired(&self, written_at: u64, accessed_at: u64, now: u64) -> bool {
    if let Some(limit) = self.after_access {
      if now.saturating_sub(accessed_at) > limit {
        return true;
      }
    }
    if let Some(limit) = self.after_write {
      if now.saturating_sub(written_at) > limit {
        return true;
      }
    }
    false
  }

  #[inline]
  pub(crate) fn is_entry_expired<V>(&self, entry: &CacheEntry<V>, now: u64) -> bool {
    self.is_expired(entry.written_at(), entry.accessed_at(), now)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  const MS: u64 = 1_000_000;

  #[test]
  fn no_thresholds_never_expires() {
    let policy = ExpiryPolicy::default();
    assert!(!policy.tracks_access());
    assert!(!policy.is_expired(0, 0, u64::MAX));
  }

  #[test]
  fn access_threshold_is_strict() {
    let policy = ExpiryPolicy::new(Some(Duration::from_millis(100)), None);
    assert!(policy.tracks_access());
    assert!(!policy.is_expired(0, 0, 100 * MS), "exactly at the limit is still live");
    assert!(policy.is_expired(0, 0, 100 * MS + 1));
    // A recent access keeps it alive even though the write is old.
    assert!(!policy.is_expired(0, 150 * MS, 200 * MS));
  }

  #[test]
  fn write_threshold_ignores_accesses() {
    let policy = ExpiryPolicy::new(None, Some(Duration::from_millis(100)));
    assert!(!policy.tracks_access());
    assert!(!policy.is_expired(0, 0, 100 * MS));
    assert!(policy.is_expired(0, 199 * MS, 200 * MS));
  }

  #[test]
  fn either_threshold_expires() {
    let policy = ExpiryPolicy::new(
      Some(Duration::from_millis(50)),
      Some(Duration::from_millis(500)),
    );
    // Access expiry trips first.
    assert!(policy.is_expired(0, 0, 51 * MS));
    // Kept warm by reads, but the write threshold still applies.
    assert!(!policy.is_expired(0, 480 * MS, 500 * MS));
    assert!(policy.is_expired(0, 490 * MS, 501 * MS));
  }

  #[test]
  fn clock_skew_between_readers_does_not_expire() {
    let policy = ExpiryPolicy::new(Some(Duration::from_millis(10)), None);
    // An access stamp slightly ahead of `now` saturates to zero elapsed.
    assert!(!policy.is_expired(0, 20 * MS, 15 * MS));
  }
}
