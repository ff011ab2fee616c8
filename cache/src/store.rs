use crate::entry::CacheEntry;
use crate::expiry::ExpiryPolicy;
use crate::listener::RemovalCause;
use crate::notifier::RemovalBatch;
use crate::policy::EvictionPolicy;
use crate::time;

use core::fmt;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use parking_lot::RwLock;

/// The map from key to entry, together with the recency order over it.
///
/// Reads take the shared lock and record their access through atomics and
/// the policy's own mutex. Every mutation takes the exclusive lock, so the
/// decision "is the current entry expired, equal, or absent" and the change
/// that follows from it happen atomically. Removals are reported into a
/// `RemovalBatch` and never delivered while the lock is held.
pub(crate) struct Store<K, V, H> {
  map: RwLock<HashMap<K, CacheEntry<V>, H>>,
  policy: Box<dyn EvictionPolicy<K>>,
  expiry: ExpiryPolicy,
  max_elements: Option<u64>,
}

impl<K, V, H> fmt::Debug for Store<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Store")
      .field("len", &self.map.read().len())
      .field("expiry", &self.expiry)
      .field("max_elements", &self.max_elements)
      .finish_non_exhaustive()
  }
}

/// What `Store::publish` did with a loaded value.
pub(crate) enum Published<V> {
  /// The loaded value is now the entry.
  Inserted(Arc<V>),
  /// A live entry was written while the value was loading; it wins.
  Existing(Arc<V>),
}

impl<V> Published<V> {
  pub(crate) fn into_value(self) -> Arc<V> {
    match self {
      Published::Inserted(value) | Published::Existing(value) => value,
    }
  }
}

impl<K, V, H> Store<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher,
{
  pub(crate) fn new(
    hasher: H,
    policy: Box<dyn EvictionPolicy<K>>,
    expiry: ExpiryPolicy,
    max_elements: Option<u64>,
  ) -> Self {
    Self {
      map: RwLock::new(HashMap::with_hasher(hasher)),
      policy,
      expiry,
      max_elements,
    }
  }

  /// Number of entries held, expired ones included until they are removed.
  pub(crate) fn len(&self) -> usize {
    self.map.read().len()
  }

  /// Returns the value if the key is present and not expired, recording the
  /// access for expire-after-access and for the recency order.
  pub(crate) fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let guard = self.map.read();
    let (stored_key, entry) = guard.get_key_value(key)?;
    let now = time::now_nanos();
    if self.expiry.is_entry_expired(entry, now) {
      return None;
    }
    if self.expiry.tracks_access() {
      entry.touch(now);
    }
    self.policy.on_access(stored_key);
    Some(entry.value())
  }

  /// Inserts or overwrites an entry.
  ///
  /// - A live entry with an equal value is refreshed in place and nothing is
  ///   reported.
  /// - A live entry with a different value is reported `Replaced`.
  /// - An expired entry is reported `Expired`, whatever its value.
  /// - A new key may push the store over its bound; the coldest entries are
  ///   then evicted.
  pub(crate) fn put(&self, key: K, value: V, removals: &mut RemovalBatch<K, V>)
  where
    V: PartialEq,
  {
    let mut guard = self.map.write();
    let now = time::now_nanos();

    if let Some(entry) = guard.get_mut(&key) {
      if self.expiry.is_entry_expired(entry, now) {
        let stale = std::mem::replace(entry, CacheEntry::new(value, now));
        removals.record_cloned(&key, stale.into_value(), RemovalCause::Expired);
      } else if *entry.value_ref() == value {
        entry.rewrite(now);
      } else {
        let old = std::mem::replace(entry, CacheEntry::new(value, now));
        removals.record_cloned(&key, old.into_value(), RemovalCause::Replaced);
      }
      self.policy.on_write(&key);
      return;
    }

    self.policy.on_write(&key);
    guard.insert(key, CacheEntry::new(value, now));
    self.evict_overflow(&mut guard, now, removals);
  }

  /// Stores the result of a load.
  ///
  /// The load began on a miss, but a `put` may have landed while the loader
  /// ran. A live entry found here is newer than the load and is kept; the
  /// flight then resolves to it.
  pub(crate) fn publish(
    &self,
    key: K,
    value: V,
    removals: &mut RemovalBatch<K, V>,
  ) -> Published<V> {
    let mut guard = self.map.write();
    let now = time::now_nanos();

    if let Some(entry) = guard.get_mut(&key) {
      if !self.expiry.is_entry_expired(entry, now) {
        if self.expiry.tracks_access() {
          entry.touch(now);
        }
        self.policy.on_access(&key);
        return Published::Existing(entry.value());
      }
      let fresh = CacheEntry::new(value, now);
      let loaded = fresh.value();
      let stale = std::mem::replace(entry, fresh);
      removals.record_cloned(&key, stale.into_value(), RemovalCause::Expired);
      self.policy.on_write(&key);
      return Published::Inserted(loaded);
    }

    let fresh = CacheEntry::new(value, now);
    let loaded = fresh.value();
    self.policy.on_write(&key);
    guard.insert(key, fresh);
    self.evict_overflow(&mut guard, now, removals);
    Published::Inserted(loaded)
  }

  /// Removes the entry for `key`, reported `Explicit` even if it had
  /// already expired.
  pub(crate) fn invalidate<Q>(&self, key: &Q, removals: &mut RemovalBatch<K, V>) -> bool
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let mut guard = self.map.write();
    let Some((key, entry)) = guard.remove_entry(key) else {
      return false;
    };
    self.policy.on_remove(&key);
    removals.record(key, entry.into_value(), RemovalCause::Explicit);
    true
  }

  /// Drops every entry and the whole recency order. Returns how many entries
  /// were dropped. Nothing is reported.
  pub(crate) fn clear(&self) -> usize {
    let mut guard = self.map.write();
    let dropped = guard.len();
    guard.clear();
    self.policy.clear();
    dropped
  }

  // Evicts from the cold end until the bound holds again. Only ever called
  // right after an insert of a new key, which sits at the hot end.
  fn evict_overflow(
    &self,
    map: &mut HashMap<K, CacheEntry<V>, H>,
    now: u64,
    removals: &mut RemovalBatch<K, V>,
  ) {
    let Some(max_elements) = self.max_elements else {
      return;
    };

    while map.len() as u64 > max_elements {
      let Some(victim) = self.policy.pop_victim() else {
        break;
      };
      if let Some((key, entry)) = map.remove_entry(&victim) {
        let cause = if self.expiry.is_entry_expired(&entry, now) {
          RemovalCause::Expired
        } else {
          RemovalCause::Evicted
        };
        removals.record(key, entry.into_value(), cause);
      }
    }
  }
}
