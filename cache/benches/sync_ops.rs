use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use local_cache::{Cache, CacheBuilder};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::hint::black_box;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

const CAPACITY: u64 = 10_000;
const NUM_ITEMS: u64 = 10_000;

#[derive(Debug, Clone, Copy)]
enum Op {
  GetHit,
  GetMiss,
  Put,
  Load,
}

fn setup(op: Op, concurrency: usize) -> (Cache<u64, u64>, Vec<Vec<u64>>) {
  let cache = CacheBuilder::<u64, u64>::new()
    .max_elements(CAPACITY)
    .expect("capacity is non-zero")
    .expire_after_access(Duration::from_secs(60))
    .build();

  // Pre-populate in a single thread for a consistent start.
  for i in 0..NUM_ITEMS {
    cache.put(i, i);
  }

  let mut keys: Vec<u64> = match op {
    Op::GetHit => (0..NUM_ITEMS).collect(),
    Op::GetMiss | Op::Put | Op::Load => (NUM_ITEMS..2 * NUM_ITEMS).collect(),
  };
  keys.shuffle(&mut StdRng::from_seed([0; 32]));

  let mut keys_by_thread = vec![Vec::new(); concurrency];
  for (i, key) in keys.into_iter().enumerate() {
    keys_by_thread[i % concurrency].push(key);
  }
  (cache, keys_by_thread)
}

fn run(op: Op, cache: &Cache<u64, u64>, keys_by_thread: &[Vec<u64>]) -> Duration {
  let barrier = Arc::new(Barrier::new(keys_by_thread.len()));
  let start = Instant::now();

  thread::scope(|s| {
    for keys in keys_by_thread {
      let barrier = barrier.clone();
      s.spawn(move || {
        barrier.wait();
        for key in keys {
          match op {
            Op::GetHit | Op::GetMiss => {
              black_box(cache.get_if_present(key));
            }
            Op::Put => cache.put(*key, *key),
            Op::Load => {
              black_box(cache.get_or_load(*key, |k| *k));
            }
          }
        }
      });
    }
  });

  start.elapsed()
}

fn sync_benches(c: &mut Criterion) {
  let mut group = c.benchmark_group("SyncOps");
  group.throughput(Throughput::Elements(NUM_ITEMS));

  for op in [Op::GetHit, Op::GetMiss, Op::Put, Op::Load] {
    for concurrency in [1, 4, 8] {
      group.bench_with_input(
        BenchmarkId::new(format!("{op:?}"), concurrency),
        &concurrency,
        |b, &concurrency| {
          b.iter_custom(|iters| {
            let mut total = Duration::ZERO;
            for _ in 0..iters {
              let (cache, keys_by_thread) = setup(op, concurrency);
              total += run(op, &cache, &keys_by_thread);
            }
            total
          })
        },
      );
    }
  }

  group.finish();
}

criterion_group!(benches, sync_benches);
criterion_main!(benches);
