//! Error types for `tapright-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("latitude out of range [-90, 90]: {0}")]
  InvalidLatitude(f64),

  #[error("longitude out of range [-180, 180]: {0}")]
  InvalidLongitude(f64),

  #[error("unknown category: {0:?}")]
  UnknownCategory(String),

  /// A read or write against the backing store failed. The engine never
  /// retries; the caller decides.
  #[error("store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error from any [`crate::store::RewardStore`].
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::StoreUnavailable(Box::new(e))
  }

  /// `true` for errors caused by malformed caller input.
  pub fn is_validation(&self) -> bool {
    matches!(
      self,
      Self::InvalidLatitude(_)
        | Self::InvalidLongitude(_)
        | Self::UnknownCategory(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
