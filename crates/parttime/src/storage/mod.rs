//! Persistence errors shared by every repository, plus the in-memory document store.

pub mod memory;

pub use memory::{InMemoryApplicationRepository, InMemoryDirectory, InMemoryNotificationRepository};

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
