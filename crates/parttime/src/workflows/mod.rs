pub mod applications;
pub mod catalog;
pub mod notifications;
