//! Job applications: submission with a match score, withdrawal, and employer review.
//!
//! The lifecycle is storage-agnostic. Repositories, the job/profile directory and
//! the outbound notifier are injected so tests and the API binary can wire their
//! own implementations.

pub mod domain;
pub mod matching;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, EmployerApplicationView, MissingEntity,
    SeekerApplicationView, UnknownStatus,
};
pub use matching::{MatchConfig, MatchInput, MatchOutcome, MatchScorer};
pub use repository::{ApplicationRepository, GuardedDelete};
pub use router::application_router;
pub use service::{ApplicationService, ApplicationServiceError};
