use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised by `CacheBuilder` setters when an option is invalid.
///
/// Validation happens at the moment the option is set, so an invalid
/// configuration never reaches `build`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
  /// An expiry duration given in milliseconds was negative.
  #[error("cannot expire after {setting} with a duration of {millis}ms")]
  NegativeDuration {
    /// Which setting was rejected, `"access"` or `"write"`.
    setting: &'static str,
    millis: i64,
  },
  /// The cache was bounded to zero elements.
  #[error("cannot cap the max elements of a cache to 0")]
  ZeroCapacity,
}

/// The failure of a single-flight load, shared by every caller of that flight.
///
/// Cloning is cheap: the underlying error is reference counted, so the caller
/// that ran the loader and every caller that waited on it observe the very
/// same error instance.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
  /// The loader returned an error.
  #[error("value loader failed: {0}")]
  Failed(Arc<dyn StdError + Send + Sync>),
  /// The loader panicked before producing a value.
  #[error("value loader panicked")]
  Panicked,
}

impl LoadError {
  pub(crate) fn failed<E>(error: E) -> Self
  where
    E: Into<Box<dyn StdError + Send + Sync>>,
  {
    LoadError::Failed(Arc::from(error.into()))
  }

  /// Returns the loader's own error, if the loader returned one.
  pub fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
    match self {
      LoadError::Failed(error) => Some(error.as_ref()),
      LoadError::Panicked => None,
    }
  }
}
