//! Part-time job marketplace core: applications, match scoring, and notifications.

pub mod config;
pub mod error;
pub mod identity;
pub mod storage;
pub mod telemetry;
pub mod workflows;
