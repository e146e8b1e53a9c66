use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::identity::UserId;
use crate::storage::{
    InMemoryApplicationRepository, InMemoryDirectory, InMemoryNotificationRepository,
    RepositoryError,
};
use crate::workflows::applications::domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus,
};
use crate::workflows::applications::repository::{ApplicationRepository, GuardedDelete};
use crate::workflows::applications::{ApplicationService, MatchConfig};
use crate::workflows::catalog::{JobId, JobPosting, SeekerId, SeekerProfile};
use crate::workflows::notifications::{
    Notice, Notification, NotificationCenter, NotificationId, NotificationRepository, Notifier,
    NotifyError,
};

pub(super) const EMPLOYER: &str = "user-employer";
pub(super) const SEEKER: &str = "user-seeker";
pub(super) const JOB: &str = "job-barista";

pub(super) fn job() -> JobPosting {
    JobPosting {
        id: JobId(JOB.to_string()),
        employer: UserId(EMPLOYER.to_string()),
        company_name: "Bean There".to_string(),
        title: "Barista".to_string(),
        description: "Barista needed for coffee shop".to_string(),
        category: "Hospitality".to_string(),
        location: "Downtown".to_string(),
        salary_range: Some("$15-18/hr".to_string()),
        working_hours: Some("Weekends".to_string()),
    }
}

pub(super) fn seeker() -> SeekerProfile {
    SeekerProfile {
        id: SeekerId("seeker-sam".to_string()),
        user: UserId(SEEKER.to_string()),
        full_name: "Sam Rivera".to_string(),
        skills: Some("barista coffee experience".to_string()),
        education_background: None,
    }
}

pub(super) fn user(id: &str) -> UserId {
    UserId(id.to_string())
}

pub(super) fn directory() -> Arc<InMemoryDirectory> {
    let directory = InMemoryDirectory::default();
    directory.add_job(job()).expect("job stored");
    directory.add_seeker(seeker()).expect("seeker stored");
    Arc::new(directory)
}

pub(super) type Inbox = NotificationCenter<InMemoryNotificationRepository>;
pub(super) type MemoryService =
    ApplicationService<InMemoryApplicationRepository, InMemoryDirectory, Inbox>;

pub(super) struct Harness {
    pub(super) service: MemoryService,
    pub(super) repository: Arc<InMemoryApplicationRepository>,
    pub(super) directory: Arc<InMemoryDirectory>,
    pub(super) inbox: Arc<Inbox>,
}

pub(super) fn build_service() -> Harness {
    let repository = Arc::new(InMemoryApplicationRepository::default());
    let directory = directory();
    let inbox = Arc::new(NotificationCenter::new(Arc::new(
        InMemoryNotificationRepository::default(),
    )));
    let service = ApplicationService::new(
        repository.clone(),
        directory.clone(),
        inbox.clone(),
        MatchConfig::default(),
    );
    Harness {
        service,
        repository,
        directory,
        inbox,
    }
}

pub(super) fn messages_for(inbox: &Inbox, recipient: &str) -> Vec<String> {
    inbox
        .inbox(&user(recipient))
        .expect("inbox loads")
        .into_iter()
        .map(|notification| notification.message)
        .collect()
}

#[derive(Default)]
pub(super) struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub(super) fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) -> Result<(), NotifyError> {
        self.notices
            .lock()
            .expect("notifier mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn notify(&self, _notice: Notice) -> Result<(), NotifyError> {
        Err(NotifyError::Delivery("mail relay offline".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_for_pair(
        &self,
        _job: &JobId,
        _seeker: &SeekerId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_status(
        &self,
        _id: &ApplicationId,
        _status: ApplicationStatus,
    ) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete_if_status(
        &self,
        _id: &ApplicationId,
        _expected: ApplicationStatus,
    ) -> Result<GuardedDelete, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_seeker(&self, _seeker: &SeekerId) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_jobs(&self, _jobs: &[JobId]) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete_for_job(&self, _job: &JobId) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Store where an employer marks the application Reviewed right after every read.
#[derive(Default)]
pub(super) struct ReviewedAfterRead {
    pub(super) inner: InMemoryApplicationRepository,
}

impl ApplicationRepository for ReviewedAfterRead {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn find_for_pair(
        &self,
        job: &JobId,
        seeker: &SeekerId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.inner.find_for_pair(job, seeker)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let fetched = self.inner.fetch(id)?;
        if fetched.is_some() {
            self.inner.update_status(id, ApplicationStatus::Reviewed)?;
        }
        Ok(fetched)
    }

    fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<ApplicationRecord, RepositoryError> {
        self.inner.update_status(id, status)
    }

    fn delete_if_status(
        &self,
        id: &ApplicationId,
        expected: ApplicationStatus,
    ) -> Result<GuardedDelete, RepositoryError> {
        self.inner.delete_if_status(id, expected)
    }

    fn for_seeker(&self, seeker: &SeekerId) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.for_seeker(seeker)
    }

    fn for_jobs(&self, jobs: &[JobId]) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.for_jobs(jobs)
    }

    fn delete_for_job(&self, job: &JobId) -> Result<usize, RepositoryError> {
        self.inner.delete_for_job(job)
    }
}

/// Inbox storage that accepts nothing, so every notification attempt fails.
pub(super) struct ReadOnlyInbox;

impl NotificationRepository for ReadOnlyInbox {
    fn insert(&self, _notification: Notification) -> Result<Notification, RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn for_user(&self, _user: &UserId) -> Result<Vec<Notification>, RepositoryError> {
        Ok(Vec::new())
    }

    fn mark_read(
        &self,
        _user: &UserId,
        _id: &NotificationId,
    ) -> Result<Option<Notification>, RepositoryError> {
        Ok(None)
    }

    fn mark_all_read(&self, _user: &UserId) -> Result<usize, RepositoryError> {
        Ok(0)
    }

    fn dismiss(&self, _user: &UserId, _id: &NotificationId) -> Result<bool, RepositoryError> {
        Ok(false)
    }

    fn unread_count(&self, _user: &UserId) -> Result<usize, RepositoryError> {
        Ok(0)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
