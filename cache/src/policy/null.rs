use super::EvictionPolicy;

/// The policy of an unbounded cache. It tracks nothing and never evicts.
#[derive(Debug, Default)]
pub(crate) struct NullPolicy;

impl<K> EvictionPolicy<K> for NullPolicy {
  fn on_access(&self, _key: &K) {}

  fn on_write(&self, _key: &K) {}

  fn on_remove(&self, _key: &K) {}

  fn pop_victim(&self) -> Option<K> {
    None
  }

  fn clear(&self) {}
}
