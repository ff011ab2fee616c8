use local_cache::CacheBuilder;
use std::thread;
use std::time::Duration;

fn main() {
  // Entries expire once they go 2 seconds without being read.
  let cache = CacheBuilder::<&str, &str>::new()
    .expire_after_access(Duration::from_secs(2))
    .build();

  println!("--- Expire-After-Access Demonstration ---");
  cache.put("my_key", "my_value");
  println!("Put ('my_key', 'my_value'). It expires in 2 seconds if not read.");

  println!("\n--- Part 1: Resetting the Idle Timer ---");
  for i in 1..=4 {
    thread::sleep(Duration::from_secs(1));
    assert!(cache.get_if_present("my_key").is_some());
    println!("[Cycle {}] Read 'my_key'. Its idle timer starts over.", i);
  }

  println!("\n--- Part 2: Letting the Entry Expire ---");
  println!("Waiting for 3 seconds without reading the key...");
  thread::sleep(Duration::from_secs(3));

  assert!(
    cache.get_if_present("my_key").is_none(),
    "Entry should be expired now."
  );
  println!("'my_key' has expired after being idle for more than 2 seconds.");
}
