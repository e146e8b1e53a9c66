use super::domain::{Notice, Notification, NotificationId};
use crate::identity::UserId;
use crate::storage::RepositoryError;

/// Per-user inbox storage. Every lookup is scoped to the owning user.
pub trait NotificationRepository: Send + Sync {
    fn insert(&self, notification: Notification) -> Result<Notification, RepositoryError>;
    /// Newest first.
    fn for_user(&self, user: &UserId) -> Result<Vec<Notification>, RepositoryError>;
    fn mark_read(
        &self,
        user: &UserId,
        id: &NotificationId,
    ) -> Result<Option<Notification>, RepositoryError>;
    fn mark_all_read(&self, user: &UserId) -> Result<usize, RepositoryError>;
    fn dismiss(&self, user: &UserId, id: &NotificationId) -> Result<bool, RepositoryError>;
    fn unread_count(&self, user: &UserId) -> Result<usize, RepositoryError>;
}

/// Outbound notification hook used by workflows after a state change.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice) -> Result<(), NotifyError>;
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}
