mod common;

use common::{random_expiry, random_key};
use local_cache::CacheBuilder;
use std::thread;
use std::time::Duration;

#[test]
fn test_sync_expire_after_write_respects_timeout() {
  let write_expiry = random_expiry();
  let cache = CacheBuilder::<i32, String>::new()
    .expire_after_write(write_expiry)
    .build();

  let key = random_key();
  cache.put(key, "value".to_string());
  assert_eq!(
    cache.get_if_present(&key).as_deref().map(String::as_str),
    Some("value")
  );

  thread::sleep(write_expiry * 2);
  assert!(cache.get_if_present(&key).is_none());
}

#[test]
fn test_sync_reads_do_not_extend_write_expiry() {
  let write_expiry = Duration::from_millis(200);
  let cache = CacheBuilder::<i32, String>::new()
    .expire_after_write(write_expiry)
    .build();

  cache.put(1, "value".to_string());
  for _ in 0..3 {
    thread::sleep(write_expiry / 4);
    assert!(cache.get_if_present(&1).is_some());
  }

  thread::sleep(write_expiry * 2);
  assert!(cache.get_if_present(&1).is_none());
  assert_eq!(cache.count(), 1, "physical removal waits for a write");
}

#[test]
fn test_sync_equal_put_restarts_write_clock() {
  let write_expiry = Duration::from_millis(200);
  let cache = CacheBuilder::<i32, String>::new()
    .expire_after_write(write_expiry)
    .build();

  cache.put(1, "value".to_string());
  thread::sleep(write_expiry / 2);
  cache.put(1, "value".to_string());
  thread::sleep(write_expiry * 3 / 4);

  // 350ms after the first write, but only 150ms after the second.
  assert!(cache.get_if_present(&1).is_some());
}
