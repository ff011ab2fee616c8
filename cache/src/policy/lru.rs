use super::lru_list::LruList;
use super::EvictionPolicy;

use parking_lot::Mutex;
use std::hash::Hash;

/// An eviction policy that evicts the least recently used entry.
///
/// Recency is a strict total order: every access or write moves the key to
/// the head of the list, so there are never ties for the coldest key.
#[derive(Debug)]
pub(crate) struct LruPolicy<K: Eq + Hash + Clone> {
  list: Mutex<LruList<K>>,
}

impl<K: Eq + Hash + Clone> LruPolicy<K> {
  pub(crate) fn new() -> Self {
    Self {
      list: Mutex::new(LruList::new()),
    }
  }

  #[cfg(test)]
  fn keys(&self) -> Vec<K> {
    self.list.lock().keys_as_vec()
  }
}

impl<K> EvictionPolicy<K> for LruPolicy<K>
where
  K: Eq + Hash + Clone + Send + Sync,
{
  fn on_access(&self, key: &K) {
    self.list.lock().move_to_front(key);
  }

  fn on_write(&self, key: &K) {
    self.list.lock().push_front(key);
  }

  fn on_remove(&self, key: &K) {
    self.list.lock().remove(key);
  }

  fn pop_victim(&self) -> Option<K> {
    self.list.lock().pop_back()
  }

  fn clear(&self) {
    self.list.lock().clear();
  }
}
