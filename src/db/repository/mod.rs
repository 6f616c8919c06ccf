//! Repository Module
//!
//! Typed document access over the [`DocumentStore`] port: path assembly,
//! (de)serialization, and push-key backfill into the `id` field.

pub mod rating;
pub mod restaurant;

// Re-exports
pub use rating::RatingRepository;
pub use restaurant::RestaurantRepository;

use thiserror::Error;

use crate::db::store::StoreError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;
