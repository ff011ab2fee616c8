use local_cache::CacheBuilder;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() {
  let loads = Arc::new(AtomicUsize::new(0));
  let counter = loads.clone();

  // Every lookup that misses runs this loader, but only once per key at a time.
  let cache = CacheBuilder::<u64, String>::new()
    .expire_after_write(Duration::from_secs(30))
    .build_with_loader(move |id| {
      counter.fetch_add(1, Ordering::SeqCst);
      println!("Loading user {} from the slow backend...", id);
      thread::sleep(Duration::from_millis(500));
      format!("user-{}", id)
    });

  let handles: Vec<_> = (0..8)
    .map(|_| {
      let cache = cache.clone();
      thread::spawn(move || cache.get(42))
    })
    .collect();

  for handle in handles {
    let user = handle.join().expect("Loader thread panicked");
    println!("Got {}", user);
  }

  println!("\nLoader ran {} time(s) for 8 requests.", loads.load(Ordering::SeqCst));
  assert_eq!(loads.load(Ordering::SeqCst), 1);
}
