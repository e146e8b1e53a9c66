//! Per-user notification inbox and the outbound notifier used by workflows.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Notice, Notification, NotificationCategory, NotificationId};
pub use repository::{NotificationRepository, Notifier, NotifyError};
pub use router::notification_router;
pub use service::{NotificationCenter, NotificationError};
