pub(crate) mod lru;
mod lru_list;
pub(crate) mod null;

/// A recency tracker deciding which key to give up when the cache is full.
///
/// Every method is called while the store's map lock is held (read lock for
/// `on_access`, write lock for everything else), so a policy only needs to
/// guard its own state against concurrent readers.
pub(crate) trait EvictionPolicy<K>: Send + Sync {
  /// A read hit on a live key.
  fn on_access(&self, key: &K);

  /// A key was inserted or written; it becomes the most recently used.
  fn on_write(&self, key: &K);

  /// A key left the store for any reason other than `pop_victim`.
  fn on_remove(&self, key: &K);

  /// Removes and returns the least recently used key, if any is tracked.
  fn pop_victim(&self) -> Option<K>;

  /// Forgets every key.
  fn clear(&self);
}
