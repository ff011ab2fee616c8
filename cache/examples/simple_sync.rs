use local_cache::CacheBuilder;
use std::thread;
use std::time::Duration;

fn main() {
  // A cache of at most 100 entries, each living 2 seconds after its write.
  let cache = CacheBuilder::<String, i32>::new()
    .max_elements(100)
    .expect("Failed to bound cache")
    .expire_after_write(Duration::from_secs(2))
    .build();

  println!("Putting ('key1', 100) into the cache.");
  cache.put("key1".to_string(), 100);

  match cache.get_if_present("key1") {
    Some(value) => println!("Found value for key1: {}", value),
    None => println!("Value for key1 not found."),
  }
  println!("Entries: {}", cache.count());

  println!("\nWaiting for 3 seconds for the entry to expire...");
  thread::sleep(Duration::from_secs(3));

  match cache.get_if_present("key1") {
    Some(value) => println!("Found value for key1: {}", value),
    None => println!("Value for key1 not found (as expected after expiry)."),
  }
  // Expired entries are only removed by the next write to their key.
  println!("Entries still held: {}", cache.count());
}
