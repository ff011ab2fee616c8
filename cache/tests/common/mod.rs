#![allow(dead_code)]

use local_cache::{RemovalCause, RemovalListener, RemovalNotification};
use rand::Rng;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// Records every notification it receives, in order. Clones share the log,
// so the test keeps one handle and gives the other to the cache.
pub struct Recorder<K, V> {
  events: Arc<Mutex<Vec<RemovalNotification<K, V>>>>,
}

impl<K, V> Clone for Recorder<K, V> {
  fn clone(&self) -> Self {
    Self {
      events: self.events.clone(),
    }
  }
}

impl<K: Clone, V> Recorder<K, V> {
  pub fn new() -> Self {
    Self {
      events: Arc::new(Mutex::new(Vec::new())),
    }
  }

  pub fn len(&self) -> usize {
    self.events.lock().unwrap().len()
  }

  pub fn causes(&self) -> Vec<RemovalCause> {
    self.events.lock().unwrap().iter().map(|n| n.cause()).collect()
  }

  pub fn keys(&self) -> Vec<K> {
    self.events.lock().unwrap().iter().map(|n| n.key().clone()).collect()
  }

  pub fn events(&self) -> Vec<(K, Arc<V>, RemovalCause)> {
    self
      .events
      .lock()
      .unwrap()
      .iter()
      .map(|n| (n.key().clone(), n.value().clone(), n.cause()))
      .collect()
  }
}

impl<K: Send, V: Send + Sync> RemovalListener<K, V> for Recorder<K, V> {
  fn on_removal(&self, notification: RemovalNotification<K, V>) {
    self.events.lock().unwrap().push(notification);
  }
}

// An expiry between 100ms and 150ms, like the timings the suites were tuned for.
pub fn random_expiry() -> Duration {
  Duration::from_millis(rand::rng().random_range(100..150))
}

pub fn random_key() -> i32 {
  rand::rng().random()
}
