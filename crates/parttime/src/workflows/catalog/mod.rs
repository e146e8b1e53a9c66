//! Jobs and seeker profiles referenced by applications.

pub mod domain;
mod import;

pub use domain::{Directory, JobId, JobPosting, SeekerId, SeekerProfile};
pub use import::{CatalogImportError, CatalogImporter, CatalogSnapshot};
