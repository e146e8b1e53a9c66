use super::domain::{ApplicationId, ApplicationRecord, ApplicationStatus};
use crate::storage::RepositoryError;
use crate::workflows::catalog::{JobId, SeekerId};

/// Storage abstraction so the lifecycle can be exercised in isolation.
///
/// Implementations must enforce uniqueness of the (job, seeker) pair on
/// `insert`, reporting a duplicate as [`RepositoryError::Conflict`]; the
/// lifecycle relies on that index rather than on its own locking.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn find_for_pair(
        &self,
        job: &JobId,
        seeker: &SeekerId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<ApplicationRecord, RepositoryError>;
    /// Removes the record only while it still holds `expected`, checked and
    /// deleted under the same lock.
    fn delete_if_status(
        &self,
        id: &ApplicationId,
        expected: ApplicationStatus,
    ) -> Result<GuardedDelete, RepositoryError>;
    /// Newest first.
    fn for_seeker(&self, seeker: &SeekerId) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    /// Newest first.
    fn for_jobs(&self, jobs: &[JobId]) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn delete_for_job(&self, job: &JobId) -> Result<usize, RepositoryError>;
}

/// Outcome of [`ApplicationRepository::delete_if_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardedDelete {
    Deleted(ApplicationRecord),
    StatusChanged(ApplicationStatus),
}
