use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::UserId;
use crate::storage::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeekerId(pub String);

impl fmt::Display for SeekerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A published job, denormalized with the owning employer's account and company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub employer: UserId,
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub salary_range: Option<String>,
    pub working_hours: Option<String>,
}

/// Job seeker profile attached to a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekerProfile {
    pub id: SeekerId,
    pub user: UserId,
    pub full_name: String,
    pub skills: Option<String>,
    pub education_background: Option<String>,
}

/// Read access to the jobs and profiles that applications reference.
pub trait Directory: Send + Sync {
    fn seeker_for_user(&self, user: &UserId) -> Result<Option<SeekerProfile>, RepositoryError>;
    fn seeker(&self, id: &SeekerId) -> Result<Option<SeekerProfile>, RepositoryError>;
    fn job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError>;
    fn jobs_owned_by(&self, employer: &UserId) -> Result<Vec<JobPosting>, RepositoryError>;
}
