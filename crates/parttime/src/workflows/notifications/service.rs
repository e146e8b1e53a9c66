use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error};

use super::domain::{Notice, Notification, NotificationId, DEFAULT_TITLE};
use super::repository::{NotificationRepository, Notifier, NotifyError};
use crate::identity::UserId;
use crate::storage::RepositoryError;

static NOTIFICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_notification_id() -> NotificationId {
    let id = NOTIFICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    NotificationId(format!("ntf-{id:06}"))
}

/// Inbox service backing both workflow notifications and the user-facing inbox.
pub struct NotificationCenter<R> {
    repository: Arc<R>,
}

impl<R> NotificationCenter<R>
where
    R: NotificationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Store a notice in the recipient's inbox.
    pub fn publish(&self, notice: Notice) -> Result<Notification, NotificationError> {
        let message = notice.message.trim();
        if message.is_empty() {
            return Err(NotificationError::InvalidInput(
                "message is required.".to_string(),
            ));
        }

        let title = match notice.title.trim() {
            "" => DEFAULT_TITLE.to_string(),
            title => title.to_string(),
        };

        let notification = Notification {
            id: next_notification_id(),
            recipient: notice.recipient,
            title,
            message: message.to_string(),
            category: notice.category,
            is_read: false,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(notification)?;
        debug!(notification_id = %stored.id, recipient = %stored.recipient, "notification stored");
        Ok(stored)
    }

    pub fn inbox(&self, user: &UserId) -> Result<Vec<Notification>, NotificationError> {
        Ok(self.repository.for_user(user)?)
    }

    pub fn mark_read(
        &self,
        user: &UserId,
        id: &NotificationId,
    ) -> Result<Notification, NotificationError> {
        self.repository
            .mark_read(user, id)?
            .ok_or(NotificationError::NotFound)
    }

    pub fn mark_all_read(&self, user: &UserId) -> Result<usize, NotificationError> {
        Ok(self.repository.mark_all_read(user)?)
    }

    pub fn dismiss(&self, user: &UserId, id: &NotificationId) -> Result<(), NotificationError> {
        if self.repository.dismiss(user, id)? {
            Ok(())
        } else {
            Err(NotificationError::NotFound)
        }
    }

    pub fn unread_count(&self, user: &UserId) -> Result<usize, NotificationError> {
        Ok(self.repository.unread_count(user)?)
    }
}

impl<R> Notifier for NotificationCenter<R>
where
    R: NotificationRepository + 'static,
{
    fn notify(&self, notice: Notice) -> Result<(), NotifyError> {
        self.publish(notice)
            .map(|_| ())
            .map_err(|err| NotifyError::Delivery(err.to_string()))
    }
}

/// Error raised by inbox operations.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Notification not found.")]
    NotFound,
    #[error("{0}")]
    InvalidInput(String),
    #[error("notification storage unavailable")]
    Internal(#[source] RepositoryError),
}

impl From<RepositoryError> for NotificationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => NotificationError::NotFound,
            other => {
                error!(error = %other, "notification repository failure");
                NotificationError::Internal(other)
            }
        }
    }
}
