//! An in-process, concurrent key/value cache.
//!
//! # Features
//! - **Bounded capacity**: an optional maximum element count enforced with
//!   strict least-recently-used eviction.
//! - **Expiry**: expire-after-access and expire-after-write, evaluated on
//!   every read against a monotonic clock.
//! - **Removal notifications**: one listener, called exactly once per removal
//!   with its cause (`Explicit`, `Replaced`, `Expired`, `Evicted`).
//! - **Single-flight loading**: `get_or_load` computes a missing value at most
//!   once per key, however many threads ask for it at the same time.
//! - **Non-Clone Support**: values are stored in an `Arc<V>`, avoiding `V: Clone` bounds.
//!
//! Expired entries are hidden immediately but removed lazily: the `Expired`
//! notification is sent when a later write reaches the key.
//!
//! ```
//! use local_cache::{CacheBuilder, RemovalCause, RemovalNotification};
//! use std::sync::{Arc, Mutex};
//!
//! # fn main() -> Result<(), local_cache::BuildError> {
//! let removed = Arc::new(Mutex::new(Vec::new()));
//! let sink = removed.clone();
//! let cache = CacheBuilder::<&str, u32>::new()
//!   .max_elements(2)?
//!   .removal_listener(move |n: RemovalNotification<&str, u32>| {
//!     sink.lock().unwrap().push((n.key().to_string(), n.cause()));
//!   })
//!   .build();
//!
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get_if_present("a");
//! cache.put("c", 3);
//!
//! assert_eq!(*removed.lock().unwrap(), vec![("b".to_string(), RemovalCause::Evicted)]);
//! assert_eq!(*cache.get_or_load("d", |_| 4), 4);
//! # Ok(())
//! # }
//! ```

// Public modules that form the API
pub mod builder;
pub mod error;
pub mod handles;
pub mod listener;

// Internal, crate-only modules
mod entry;
mod expiry;
mod loader;
mod notifier;
mod policy;
mod shared;
mod store;
mod time;

// Re-export the primary user-facing types for convenience
pub use builder::CacheBuilder;
pub use error::{BuildError, LoadError};
pub use handles::{Cache, LoadingCache, SingleElementCache, SingleElementLoadingCache, SingleKey};
pub use listener::{RemovalCause, RemovalListener, RemovalNotification};
