use local_cache::{CacheBuilder, RemovalListener, RemovalNotification};

// A simple listener that just prints removed entries.
struct PrintListener;

impl RemovalListener<i32, String> for PrintListener {
  fn on_removal(&self, notification: RemovalNotification<i32, String>) {
    println!(
      "[Listener] Entry removed! Key: {}, Value: '{}', Cause: {}",
      notification.key(),
      notification.value(),
      notification.cause()
    );
  }
}

fn main() {
  println!("--- Bounded Cache with a Removal Listener ---");

  let cache = CacheBuilder::<i32, String>::new()
    .max_elements(3)
    .expect("Failed to bound cache")
    .removal_listener(PrintListener)
    .build();

  cache.put(1, "one".to_string());
  cache.put(2, "two".to_string());
  cache.put(3, "three".to_string());
  println!("\nPut keys 1, 2, 3. The cache is full.");

  // Reading key 1 makes key 2 the least recently used.
  println!("\nReading key 1...");
  cache.get_if_present(&1);

  println!("\nPutting key 4. This evicts key 2.");
  cache.put(4, "four".to_string());

  println!("\nOverwriting key 3 with a new value.");
  cache.put(3, "THREE".to_string());

  println!("\nInvalidating key 4.");
  cache.invalidate(&4);

  assert!(cache.get_if_present(&1).is_some());
  assert!(cache.get_if_present(&2).is_none(), "Key 2 should have been evicted");
  assert_eq!(cache.count(), 2);
}
