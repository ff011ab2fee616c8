use crate::error::LoadError;

use std::collections::{HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;
use std::thread::{self, Thread};

use crossbeam_utils::CachePadded;
use parking_lot::Mutex;

/// The internal state of a value being loaded.
pub(crate) enum State<V> {
  Computing,
  Complete(Arc<V>),
  Failed(LoadError),
}

/// The internal, mutex-protected core of the LoadFuture.
pub(crate) struct Inner<V> {
  pub(crate) state: State<V>,
  pub(crate) waiters: VecDeque<Thread>,
}

/// The shared result slot of one in-flight load.
///
/// The thread that runs the loader settles it exactly once; every other
/// thread that asked for the same key while it was computing parks on it and
/// receives the same value, or the same error.
pub(crate) struct LoadFuture<V> {
  pub(crate) inner: Mutex<Inner<V>>,
}

impl<V> LoadFuture<V> {
  /// Creates a new `LoadFuture` in the "Computing" state.
  pub(crate) fn new() -> Self {
    Self {
      inner: Mutex::new(Inner {
        state: State::Computing,
        waiters: VecDeque::new(),
      }),
    }
  }

  /// Completes the future with a value, waking all waiters.
  pub(crate) fn complete(&self, value: Arc<V>) {
    self.settle(State::Complete(value));
  }

  /// Fails the future, waking all waiters.
  pub(crate) fn fail(&self, error: LoadError) {
    self.settle(State::Failed(error));
  }

  fn settle(&self, state: State<V>) {
    let mut inner = self.inner.lock();
    if !matches!(inner.state, State::Computing) {
      return;
    }
    inner.state = state;
    for waiter in inner.waiters.drain(..) {
      waiter.unpark();
    }
  }

  /// Blocks the current thread until the future is settled.
  pub(crate) fn wait(&self) -> Result<Arc<V>, LoadError> {
    let mut inner = self.inner.lock();
    loop {
      match &inner.state {
        State::Complete(value) => return Ok(value.clone()),
        State::Failed(error) => return Err(error.clone()),
        State::Computing => {
          inner.waiters.push_back(thread::current());
          drop(inner); // Unlock before parking.
          thread::park();
          // Spurious wake-ups just loop back to the state check.
          inner = self.inner.lock();
        }
      }
    }
  }
}

type PendingShard<K, V, H> = CachePadded<Mutex<HashMap<K, Arc<LoadFuture<V>>, H>>>;

/// The table of in-flight loads, keyed like the cache.
///
/// An entry exists only while its load is running; it is removed before the
/// future is settled so cold keys never leave wait structures behind.
pub(crate) struct PendingLoads<K, V, H> {
  shards: Box<[PendingShard<K, V, H>]>,
  hasher: H,
}

impl<K, V, H> PendingLoads<K, V, H>
where
  K: Eq + Hash,
  H: BuildHasher + Clone,
{
  /// `num_shards` must be a power of two.
  pub(crate) fn new(num_shards: usize, hasher: H) -> Self {
    let shards = (0..num_shards.max(1))
      .map(|_| CachePadded::new(Mutex::new(HashMap::with_hasher(hasher.clone()))))
      .collect::<Vec<_>>()
      .into_boxed_slice();
    Self { shards, hasher }
  }

  #[inline]
  pub(crate) fn shard(&self, key: &K) -> &Mutex<HashMap<K, Arc<LoadFuture<V>>, H>> {
    let hash = self.hasher.hash_one(key);
    &self.shards[hash as usize & (self.shards.len() - 1)]
  }

  #[inline]
  pub(crate) fn shard_count(&self) -> usize {
    self.shards.len()
  }
}

/// Held by the thread running a load. Settling it removes the pending entry
/// and then resolves the future. If the loader unwinds, `Drop` fails the
/// flight so no waiter is left parked forever.
pub(crate) struct Flight<'a, K, V, H>
where
  K: Eq + Hash,
  H: BuildHasher + Clone,
{
  pending: &'a PendingLoads<K, V, H>,
  key: K,
  future: Arc<LoadFuture<V>>,
  settled: bool,
}

impl<'a, K, V, H> Flight<'a, K, V, H>
where
  K: Eq + Hash,
  H: BuildHasher + Clone,
{
  pub(crate) fn new(pending: &'a PendingLoads<K, V, H>, key: K, future: Arc<LoadFuture<V>>) -> Self {
    Self {
      pending,
      key,
      future,
      settled: false,
    }
  }

  pub(crate) fn key(&self) -> &K {
    &self.key
  }

  pub(crate) fn complete(mut self, value: Arc<V>) {
    self.retire();
    self.future.complete(value);
  }

  pub(crate) fn fail(mut self, error: LoadError) {
    self.retire();
    self.future.fail(error);
  }

  fn retire(&mut self) {
    self.settled = true;
    self.pending.shard(&self.key).lock().remove(&self.key);
  }
}

impl<'a, K, V, H> Drop for Flight<'a, K, V, H>
where
  K: Eq + Hash,
  H: BuildHasher + Clone,
{
  fn drop(&mut self) {
    if !self.settled {
      self.retire();
      self.future.fail(LoadError::Panicked);
    }
  }
}
