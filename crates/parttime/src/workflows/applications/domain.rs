use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::catalog::{JobId, SeekerId};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review status of an application.
///
/// `Accepted` and `Rejected` are terminal from the employer's point of view, but
/// the lifecycle still permits moving out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Pending,
            Self::Reviewed,
            Self::Accepted,
            Self::Rejected,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Reviewed => "Reviewed",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    pub const fn is_withdrawable(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Human readable list of accepted status values.
    pub fn allowed_values() -> String {
        Self::ordered()
            .iter()
            .map(|status| status.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Status must be one of: {}", ApplicationStatus::allowed_values())]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|status| status.label() == raw)
            .ok_or_else(|| UnknownStatus(raw.to_string()))
    }
}

/// One seeker's candidacy for one job.
///
/// `match_score` is computed once when the application is created and never
/// recomputed afterwards, even if the job or profile text changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub job: JobId,
    pub seeker: SeekerId,
    pub status: ApplicationStatus,
    pub match_score: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Entities the lifecycle may fail to locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingEntity {
    SeekerProfile,
    Job,
    Application,
}

impl MissingEntity {
    pub const fn label(self) -> &'static str {
        match self {
            MissingEntity::SeekerProfile => "Job seeker profile",
            MissingEntity::Job => "Job",
            MissingEntity::Application => "Application",
        }
    }
}

impl fmt::Display for MissingEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Seeker-facing listing entry joined with the job it targets.
#[derive(Debug, Clone, Serialize)]
pub struct SeekerApplicationView {
    pub application_id: ApplicationId,
    pub job_id: JobId,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub status: &'static str,
    pub match_score: u8,
    pub applied_at: DateTime<Utc>,
}

/// Employer-facing listing entry joined with the applicant's name.
#[derive(Debug, Clone, Serialize)]
pub struct EmployerApplicationView {
    pub application_id: ApplicationId,
    pub job_id: JobId,
    pub job_title: String,
    pub seeker_id: SeekerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seeker_name: Option<String>,
    pub status: &'static str,
    pub match_score: u8,
    pub applied_at: DateTime<Utc>,
}
