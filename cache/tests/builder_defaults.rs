mod common;

use common::Recorder;
use local_cache::{BuildError, CacheBuilder};
use std::time::Duration;

#[test]
fn test_unset_options_default_to_none() {
  let builder = CacheBuilder::<i32, String>::new();
  assert!(builder.expire_after_access_duration().is_none());
  assert!(builder.expire_after_write_duration().is_none());
  assert!(builder.max_elements_bound().is_none());
  assert!(!builder.has_removal_listener());
}

#[test]
fn test_negative_expire_after_access_fails_at_set_time() {
  let result = CacheBuilder::<i32, String>::new().expire_after_access_millis(-1_000);
  assert_eq!(
    result.err(),
    Some(BuildError::NegativeDuration {
      setting: "access",
      millis: -1_000
    })
  );
}

#[test]
fn test_negative_expire_after_write_fails_at_set_time() {
  let result = CacheBuilder::<i32, String>::new().expire_after_write_millis(-1);
  assert!(matches!(
    result,
    Err(BuildError::NegativeDuration {
      setting: "write",
      ..
    })
  ));
}

#[test]
fn test_zero_max_elements_fails_at_set_time() {
  let result = CacheBuilder::<i32, String>::new().max_elements(0);
  assert_eq!(result.err(), Some(BuildError::ZeroCapacity));
  assert_eq!(
    BuildError::ZeroCapacity.to_string(),
    "cannot cap the max elements of a cache to 0"
  );
}

#[test]
fn test_options_are_recorded() {
  let seconds = rand::random::<u32>() as u64;
  let builder = CacheBuilder::<i32, String>::new()
    .expire_after_access(Duration::from_secs(seconds))
    .expire_after_write_millis(250)
    .unwrap()
    .max_elements(42)
    .unwrap()
    .removal_listener(Recorder::new());

  assert_eq!(
    builder.expire_after_access_duration(),
    Some(Duration::from_secs(seconds))
  );
  assert_eq!(
    builder.expire_after_write_duration(),
    Some(Duration::from_millis(250))
  );
  assert_eq!(builder.max_elements_bound(), Some(42));
  assert!(builder.has_removal_listener());
}

#[test]
fn test_zero_millis_is_a_valid_expiry() {
  let cache = CacheBuilder::<i32, String>::new()
    .expire_after_write_millis(0)
    .unwrap()
    .build();

  cache.put(1, "one".to_string());
  std::thread::sleep(Duration::from_millis(5));
  assert!(cache.get_if_present(&1).is_none());
}

#[test]
fn test_custom_hasher_builds() {
  let cache = CacheBuilder::<i32, i32>::new()
    .hasher(std::collections::hash_map::RandomState::new())
    .loader_shards(3)
    .build();

  cache.put(1, 10);
  assert_eq!(cache.get_if_present(&1).as_deref(), Some(&10));
  assert!(format!("{:?}", cache).contains("pending_load_shards: 4"));
}
