use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use super::RepositoryError;
use crate::identity::UserId;
use crate::workflows::applications::{
    ApplicationId, ApplicationRecord, ApplicationRepository, ApplicationStatus, GuardedDelete,
};
use crate::workflows::catalog::{
    CatalogSnapshot, Directory, JobId, JobPosting, SeekerId, SeekerProfile,
};
use crate::workflows::notifications::{Notification, NotificationId, NotificationRepository};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
}

/// Applications kept in insertion order; listings reverse it for newest first.
#[derive(Default, Clone)]
pub struct InMemoryApplicationRepository {
    records: Arc<Mutex<Vec<ApplicationRecord>>>,
}

impl InMemoryApplicationRepository {
    pub fn len(&self) -> usize {
        self.records.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = lock(&self.records)?;
        let duplicate = guard.iter().any(|existing| {
            existing.id == record.id
                || (existing.job == record.job && existing.seeker == record.seeker)
        });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn find_for_pair(
        &self,
        job: &JobId,
        seeker: &SeekerId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard
            .iter()
            .find(|record| &record.job == job && &record.seeker == seeker)
            .cloned())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = lock(&self.records)?;
        let record = guard
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or(RepositoryError::NotFound)?;
        record.status = status;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    fn delete_if_status(
        &self,
        id: &ApplicationId,
        expected: ApplicationStatus,
    ) -> Result<GuardedDelete, RepositoryError> {
        let mut guard = lock(&self.records)?;
        let position = guard
            .iter()
            .position(|record| &record.id == id)
            .ok_or(RepositoryError::NotFound)?;
        if guard[position].status != expected {
            return Ok(GuardedDelete::StatusChanged(guard[position].status));
        }
        Ok(GuardedDelete::Deleted(guard.remove(position)))
    }

    fn for_seeker(&self, seeker: &SeekerId) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard
            .iter()
            .rev()
            .filter(|record| &record.seeker == seeker)
            .cloned()
            .collect())
    }

    fn for_jobs(&self, jobs: &[JobId]) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard
            .iter()
            .rev()
            .filter(|record| jobs.contains(&record.job))
            .cloned()
            .collect())
    }

    fn delete_for_job(&self, job: &JobId) -> Result<usize, RepositoryError> {
        let mut guard = lock(&self.records)?;
        let before = guard.len();
        guard.retain(|record| &record.job != job);
        Ok(before - guard.len())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryNotificationRepository {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationRepository for InMemoryNotificationRepository {
    fn insert(&self, notification: Notification) -> Result<Notification, RepositoryError> {
        let mut guard = lock(&self.entries)?;
        if guard.iter().any(|existing| existing.id == notification.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(notification.clone());
        Ok(notification)
    }

    fn for_user(&self, user: &UserId) -> Result<Vec<Notification>, RepositoryError> {
        let guard = lock(&self.entries)?;
        Ok(guard
            .iter()
            .rev()
            .filter(|entry| &entry.recipient == user)
            .cloned()
            .collect())
    }

    fn mark_read(
        &self,
        user: &UserId,
        id: &NotificationId,
    ) -> Result<Option<Notification>, RepositoryError> {
        let mut guard = lock(&self.entries)?;
        Ok(guard
            .iter_mut()
            .find(|entry| &entry.id == id && &entry.recipient == user)
            .map(|entry| {
                entry.is_read = true;
                entry.clone()
            }))
    }

    fn mark_all_read(&self, user: &UserId) -> Result<usize, RepositoryError> {
        let mut guard = lock(&self.entries)?;
        let mut updated = 0;
        for entry in guard
            .iter_mut()
            .filter(|entry| &entry.recipient == user && !entry.is_read)
        {
            entry.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }

    fn dismiss(&self, user: &UserId, id: &NotificationId) -> Result<bool, RepositoryError> {
        let mut guard = lock(&self.entries)?;
        let before = guard.len();
        guard.retain(|entry| !(&entry.id == id && &entry.recipient == user));
        Ok(guard.len() != before)
    }

    fn unread_count(&self, user: &UserId) -> Result<usize, RepositoryError> {
        let guard = lock(&self.entries)?;
        Ok(guard
            .iter()
            .filter(|entry| &entry.recipient == user && !entry.is_read)
            .count())
    }
}

/// Jobs and seeker profiles loaded from a catalog snapshot or added directly.
#[derive(Default, Clone)]
pub struct InMemoryDirectory {
    jobs: Arc<Mutex<BTreeMap<JobId, JobPosting>>>,
    seekers: Arc<Mutex<BTreeMap<SeekerId, SeekerProfile>>>,
}

impl InMemoryDirectory {
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        let directory = Self::default();
        if let Ok(mut jobs) = directory.jobs.lock() {
            jobs.extend(snapshot.jobs.into_iter().map(|job| (job.id.clone(), job)));
        }
        if let Ok(mut seekers) = directory.seekers.lock() {
            seekers.extend(
                snapshot
                    .seekers
                    .into_iter()
                    .map(|seeker| (seeker.id.clone(), seeker)),
            );
        }
        directory
    }

    pub fn add_job(&self, job: JobPosting) -> Result<(), RepositoryError> {
        lock(&self.jobs)?.insert(job.id.clone(), job);
        Ok(())
    }

    pub fn add_seeker(&self, seeker: SeekerProfile) -> Result<(), RepositoryError> {
        lock(&self.seekers)?.insert(seeker.id.clone(), seeker);
        Ok(())
    }

    pub fn remove_job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        Ok(lock(&self.jobs)?.remove(id))
    }

    pub fn job_count(&self) -> usize {
        self.jobs.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn seeker_count(&self) -> usize {
        self.seekers.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl Directory for InMemoryDirectory {
    fn seeker_for_user(&self, user: &UserId) -> Result<Option<SeekerProfile>, RepositoryError> {
        let guard = lock(&self.seekers)?;
        Ok(guard.values().find(|seeker| &seeker.user == user).cloned())
    }

    fn seeker(&self, id: &SeekerId) -> Result<Option<SeekerProfile>, RepositoryError> {
        Ok(lock(&self.seekers)?.get(id).cloned())
    }

    fn job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        Ok(lock(&self.jobs)?.get(id).cloned())
    }

    fn jobs_owned_by(&self, employer: &UserId) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = lock(&self.jobs)?;
        Ok(guard
            .values()
            .filter(|job| &job.employer == employer)
            .cloned()
            .collect())
    }
}
