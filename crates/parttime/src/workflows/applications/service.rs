use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use super::domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, EmployerApplicationView, MissingEntity,
    SeekerApplicationView, UnknownStatus,
};
use super::matching::{MatchConfig, MatchInput, MatchScorer};
use super::repository::{ApplicationRepository, GuardedDelete};
use crate::identity::UserId;
use crate::storage::RepositoryError;
use crate::workflows::catalog::{Directory, JobId, JobPosting, SeekerProfile};
use crate::workflows::notifications::{Notice, NotificationCategory, Notifier};

/// Service composing storage, the catalog directory, match scoring and notifications.
pub struct ApplicationService<R, D, N> {
    repository: Arc<R>,
    directory: Arc<D>,
    notifier: Arc<N>,
    scorer: Arc<MatchScorer>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<R, D, N> ApplicationService<R, D, N>
where
    R: ApplicationRepository + 'static,
    D: Directory + 'static,
    N: Notifier + 'static,
{
    pub fn new(repository: Arc<R>, directory: Arc<D>, notifier: Arc<N>, config: MatchConfig) -> Self {
        Self {
            repository,
            directory,
            notifier,
            scorer: Arc::new(MatchScorer::new(config)),
        }
    }

    /// Apply the seeker behind `user` to a job.
    pub fn apply(
        &self,
        user: &UserId,
        job_id: &JobId,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        if job_id.0.trim().is_empty() {
            return Err(ApplicationServiceError::InvalidInput(
                "jobId is required.".to_string(),
            ));
        }

        let seeker = self.seeker_for(user)?;

        if self
            .repository
            .find_for_pair(job_id, &seeker.id)?
            .is_some()
        {
            return Err(ApplicationServiceError::Conflict);
        }

        let job = self
            .directory
            .job(job_id)?
            .ok_or(ApplicationServiceError::NotFound(MissingEntity::Job))?;

        let match_score = self.scorer.score_input(&MatchInput::new(&job, &seeker));
        let now = Utc::now();
        let record = ApplicationRecord {
            id: next_application_id(),
            job: job.id.clone(),
            seeker: seeker.id.clone(),
            status: ApplicationStatus::Pending,
            match_score,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(record)?;
        info!(
            application_id = %stored.id,
            job_id = %stored.job,
            match_score = stored.match_score,
            "application submitted"
        );

        self.dispatch(Notice::new(
            job.employer.clone(),
            "New Application",
            format!("{} applied for {}.", seeker.full_name, job.title),
            NotificationCategory::Jobs,
        ));

        Ok(stored)
    }

    /// Withdraw a pending application owned by the seeker behind `user`.
    pub fn withdraw(
        &self,
        user: &UserId,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let seeker = self.seeker_for(user)?;

        let record = self
            .repository
            .fetch(application_id)?
            .filter(|record| record.seeker == seeker.id)
            .ok_or(ApplicationServiceError::NotFound(MissingEntity::Application))?;

        if !record.status.is_withdrawable() {
            return Err(ApplicationServiceError::InvalidState {
                status: record.status,
            });
        }

        let job = self.directory.job(&record.job)?;
        let record = match self
            .repository
            .delete_if_status(&record.id, ApplicationStatus::Pending)?
        {
            GuardedDelete::Deleted(removed) => removed,
            GuardedDelete::StatusChanged(status) => {
                return Err(ApplicationServiceError::InvalidState { status })
            }
        };
        info!(application_id = %record.id, job_id = %record.job, "application withdrawn");

        if let Some(job) = job {
            self.dispatch(Notice::new(
                job.employer.clone(),
                "Application Withdrawn",
                format!(
                    "{} has withdrawn their application for {}.",
                    seeker.full_name, job.title
                ),
                NotificationCategory::Jobs,
            ));
        }

        Ok(record)
    }

    /// Set the status of an application for a job owned by `employer`.
    ///
    /// Any status may move to any other status; the write is committed before
    /// the seeker is notified and is never rolled back by a delivery failure.
    pub fn update_status(
        &self,
        employer: &UserId,
        application_id: &ApplicationId,
        status: &str,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let status: ApplicationStatus = status
            .parse()
            .map_err(|err: UnknownStatus| ApplicationServiceError::InvalidInput(err.to_string()))?;

        let current = self
            .repository
            .fetch(application_id)?
            .ok_or(ApplicationServiceError::NotFound(MissingEntity::Application))?;

        let job = self
            .directory
            .job(&current.job)?
            .filter(|job| &job.employer == employer)
            .ok_or(ApplicationServiceError::NotFound(MissingEntity::Application))?;

        if current.status.is_terminal() && current.status != status {
            warn!(
                application_id = %current.id,
                from = %current.status,
                to = %status,
                "reopening an application from a terminal status"
            );
        }

        let updated = self.repository.update_status(&current.id, status)?;
        info!(application_id = %updated.id, status = %updated.status, "application status updated");

        match self.directory.seeker(&updated.seeker) {
            Ok(Some(seeker)) => self.dispatch(Notice::new(
                seeker.user,
                "Application Update",
                format!(
                    "Your application for {} has been marked as {}.",
                    job.title, updated.status
                ),
                NotificationCategory::Status,
            )),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "could not resolve seeker for status notification"),
        }

        Ok(updated)
    }

    /// Applications submitted by the seeker behind `user`, newest first.
    pub fn applications_for_seeker(
        &self,
        user: &UserId,
    ) -> Result<Vec<SeekerApplicationView>, ApplicationServiceError> {
        let seeker = self.seeker_for(user)?;
        let records = self.repository.for_seeker(&seeker.id)?;

        let mut views = Vec::with_capacity(records.len());
        for record in records {
            let job = self.directory.job(&record.job)?;
            views.push(SeekerApplicationView {
                application_id: record.id,
                job_id: record.job,
                job_title: job.as_ref().map(|job| job.title.clone()),
                company_name: job.as_ref().map(|job| job.company_name.clone()),
                category: job.as_ref().map(|job| job.category.clone()),
                location: job.map(|job| job.location),
                status: record.status.label(),
                match_score: record.match_score,
                applied_at: record.created_at,
            });
        }

        Ok(views)
    }

    /// Applications across every job owned by `employer`, newest first.
    pub fn applications_for_employer(
        &self,
        employer: &UserId,
    ) -> Result<Vec<EmployerApplicationView>, ApplicationServiceError> {
        let jobs = self.directory.jobs_owned_by(employer)?;
        if jobs.is_empty() {
            return Ok(Vec::new());
        }

        let job_ids: Vec<JobId> = jobs.iter().map(|job| job.id.clone()).collect();
        let records = self.repository.for_jobs(&job_ids)?;

        let mut views = Vec::with_capacity(records.len());
        for record in records {
            let job_title = title_for(&jobs, &record.job);
            let seeker_name = self
                .directory
                .seeker(&record.seeker)?
                .map(|seeker| seeker.full_name);
            views.push(EmployerApplicationView {
                application_id: record.id,
                job_id: record.job,
                job_title,
                seeker_id: record.seeker,
                seeker_name,
                status: record.status.label(),
                match_score: record.match_score,
                applied_at: record.created_at,
            });
        }

        Ok(views)
    }

    /// Remove every application for a job that is being deleted.
    pub fn purge_job(&self, job_id: &JobId) -> Result<usize, ApplicationServiceError> {
        let removed = self.repository.delete_for_job(job_id)?;
        info!(job_id = %job_id, removed, "applications purged for job");
        Ok(removed)
    }

    fn seeker_for(&self, user: &UserId) -> Result<SeekerProfile, ApplicationServiceError> {
        self.directory
            .seeker_for_user(user)?
            .ok_or(ApplicationServiceError::NotFound(MissingEntity::SeekerProfile))
    }

    fn dispatch(&self, notice: Notice) {
        let recipient = notice.recipient.clone();
        if let Err(err) = self.notifier.notify(notice) {
            warn!(%recipient, error = %err, "notification dropped");
        }
    }
}

fn title_for(jobs: &[JobPosting], job_id: &JobId) -> String {
    jobs.iter()
        .find(|job| &job.id == job_id)
        .map(|job| job.title.clone())
        .unwrap_or_default()
}

/// Error raised by the application lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("{0} not found.")]
    NotFound(MissingEntity),
    #[error("You have already applied for this job.")]
    Conflict,
    #[error("Only pending applications can be withdrawn.")]
    InvalidState { status: ApplicationStatus },
    #[error("{0}")]
    InvalidInput(String),
    #[error("The service is temporarily unavailable. Please try again.")]
    Internal(#[source] RepositoryError),
}

impl ApplicationServiceError {
    /// Only storage faults may succeed on retry without a state change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApplicationServiceError::Internal(_))
    }
}

impl From<RepositoryError> for ApplicationServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict => ApplicationServiceError::Conflict,
            RepositoryError::NotFound => {
                ApplicationServiceError::NotFound(MissingEntity::Application)
            }
            RepositoryError::Unavailable(reason) => {
                error!(%reason, "application storage unavailable");
                ApplicationServiceError::Internal(RepositoryError::Unavailable(reason))
            }
        }
    }
}
