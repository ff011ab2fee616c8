use std::{collections::HashMap, hash::Hash};

use generational_arena::{Arena, Index};

#[derive(Debug)]
pub(super) struct Node<K> {
  pub(crate) key: K,
  pub(crate) next: Option<Index>,
  pub(crate) prev: Option<Index>,
}

// An arena-backed doubly-linked recency list with O(1) touch, remove and pop.
#[derive(Debug)]
pub(super) struct LruList<K: Eq + Hash + Clone> {
  // Arena stores all nodes contiguously.
  pub(crate) nodes: Arena<Node<K>>,
  // HashMap for O(1) lookup of a key to its node index in the arena.
  pub(crate) lookup: HashMap<K, Index>,
  // Head is the most-recently-used item.
  pub(crate) head: Option<Index>,
  // Tail is the least-recently-used item.
  pub(crate) tail: Option<Index>,
}

impl<K: Eq + Hash + Clone> LruList<K> {
  pub fn new() -> Self {
    Self {
      nodes: Arena::new(),
      lookup: HashMap::new(),
      head: None,
      tail: None,
    }
  }

  // Unlinks a node without freeing it from the arena or the lookup map.
  fn unlink(&mut self, index: Index) {
    let (prev_node_idx, next_node_idx) = match self.nodes.get(index) {
      Some(node) => (node.prev, node.next),
      None => return,
    };

    if let Some(prev_idx) = prev_node_idx {
      self.nodes[prev_idx].next = next_node_idx;
    } else {
      self.head = next_node_idx;
    }

    if let Some(next_idx) = next_node_idx {
      self.nodes[next_idx].prev = prev_node_idx;
    } else {
      self.tail = prev_node_idx;
    }
  }

  // Links an arena node in as the new head.
  fn push_front_node(&mut self, index: Index) {
    let old_head_idx = self.head;
    self.nodes[index].next = old_head_idx;
    self.nodes[index].prev = None;
    self.head = Some(index);

    if let Some(old_head) = old_head_idx {
      self.nodes[old_head].prev = Some(index);
    }

    if self.tail.is_none() {
      self.tail = Some(index);
    }
  }

  #[cfg(test)]
  pub fn contains(&self, key: &K) -> bool {
    self.lookup.contains_key(key)
  }

  #[cfg(test)]
  pub fn len(&self) -> usize {
    self.lookup.len()
  }

  /// Makes `key` the most recently used, tracking it if it is new.
  pub fn push_front(&mut self, key: &K) {
    if let Some(&index) = self.lookup.get(key) {
      self.move_index_to_front(index);
    } else {
      let index = self.nodes.insert(Node {
        key: key.clone(),
        next: None,
        prev: None,
      });
      self.lookup.insert(key.clone(), index);
      self.push_front_node(index);
    }
  }

  /// Moves a tracked key to the front; untracked keys are ignored.
  pub fn move_to_front(&mut self, key: &K) {
    if let Some(&index) = self.lookup.get(key) {
      self.move_index_to_front(index);
    }
  }

  fn move_index_to_front(&mut self, index: Index) {
    if self.head != Some(index) {
      self.unlink(index);
      self.push_front_node(index);
    }
  }

  pub fn pop_back(&mut self) -> Option<K> {
    let tail_index = self.tail?;
    self.unlink(tail_index);
    let node = self.nodes.remove(tail_index)?;
    self.lookup.remove(&node.key);
    Some(node.key)
  }

  pub fn remove(&mut self, key: &K) -> bool {
    match self.lookup.remove(key) {
      Some(index) => {
        self.unlink(index);
        self.nodes.remove(index);
        true
      }
      None => false,
    }
  }

  pub fn clear(&mut self) {
    self.nodes.clear();
    self.lookup.clear();
    self.head = None;
    self.tail = None;
  }

  // A helper for tests, to get the order of keys from head to tail.
  #[cfg(test)]
  pub(crate) fn keys_as_vec(&self) -> Vec<K> {
    let mut keys = Vec::new();
    let mut current = self.head;
    while let Some(index) = current {
      keys.push(self.nodes[index].key.clone());
      current = self.nodes[index].next;
    }
    keys
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn new_list_is_empty() {
    let list = LruList::<i32>::new();
    assert!(list.keys_as_vec().is_empty(), "New list keys should be empty");
    assert_eq!(list.len(), 0);
    assert!(!list.contains(&123), "New list should not contain any key");
  }

  #[test]
  fn push_front_new_items() {
    let mut list = LruList::new();
    list.push_front(&10);
    list.push_front(&20);
    assert!(list.contains(&10));
    assert!(list.contains(&20));
    assert_eq!(list.len(), 2);
    assert_eq!(
      list.keys_as_vec(),
      vec![20, 10],
      "Newest item should be at the front"
    );
  }

  #[test]
  fn push_front_existing_item_moves_to_front() {
    let mut list = LruList::new();
    list.push_front(&1);
    list.push_front(&2);
    list.push_front(&3);

    list.push_front(&1);
    assert_eq!(list.len(), 3, "Length should not change");
    assert_eq!(list.keys_as_vec(), vec![1, 3, 2]);
  }

  #[test]
  fn move_to_front_from_the_tail_updates_both_ends() {
    let mut list = LruList::new();
    list.push_front(&1);
    list.push_front(&2);
    list.move_to_front(&1);
    assert_eq!(list.keys_as_vec(), vec![1, 2]);
    assert_eq!(list.pop_back(), Some(2));
    assert_eq!(list.pop_back(), Some(1));
    assert_eq!(list.pop_back(), None);
  }

  #[test]
  fn pop_back_returns_least_recent() {
    let mut list = LruList::new();
    list.push_front(&1);
    list.push_front(&2);
    list.push_front(&3);

    assert_eq!(list.pop_back(), Some(1));
    assert!(!list.contains(&1), "Popped item should be removed");
    assert_eq!(list.keys_as_vec(), vec![3, 2]);
  }

  #[test]
  fn remove_item_from_middle() {
    let mut list = LruList::new();
    list.push_front(&1);
    list.push_front(&2);
    list.push_front(&3);

    assert!(list.remove(&2));
    assert!(!list.remove(&99));
    assert_eq!(list.len(), 2);
    assert_eq!(list.keys_as_vec(), vec![3, 1]);
  }

  #[test]
  fn clear_resets_list() {
    let mut list = LruList::new();
    list.push_front(&1);
    list.push_front(&2);
    list.clear();

    assert!(list.keys_as_vec().is_empty());
    assert_eq!(list.pop_back(), None);
    list.push_front(&3);
    assert_eq!(list.keys_as_vec(), vec![3]);
  }
}
