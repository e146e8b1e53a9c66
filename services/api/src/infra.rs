use metrics_exporter_prometheus::PrometheusHandle;
use parttime::error::AppError;
use parttime::storage::{
    InMemoryApplicationRepository, InMemoryDirectory, InMemoryNotificationRepository,
};
use parttime::workflows::applications::{ApplicationService, MatchConfig};
use parttime::workflows::catalog::{CatalogImporter, CatalogSnapshot};
use parttime::workflows::notifications::NotificationCenter;
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Catalog used when no seed file is configured.
pub(crate) const DEFAULT_CATALOG: &str = include_str!("../seed/catalog.csv");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type Inbox = NotificationCenter<InMemoryNotificationRepository>;
pub(crate) type MarketplaceService =
    ApplicationService<InMemoryApplicationRepository, InMemoryDirectory, Inbox>;

/// In-process wiring of the lifecycle, the catalog directory and the inbox.
#[derive(Clone)]
pub(crate) struct Marketplace {
    pub(crate) applications: Arc<MarketplaceService>,
    pub(crate) notifications: Arc<Inbox>,
    pub(crate) directory: Arc<InMemoryDirectory>,
}

impl Marketplace {
    pub(crate) fn new(snapshot: CatalogSnapshot, matching: MatchConfig) -> Self {
        let directory = Arc::new(InMemoryDirectory::from_snapshot(snapshot));
        let notifications = Arc::new(NotificationCenter::new(Arc::new(
            InMemoryNotificationRepository::default(),
        )));
        let applications = Arc::new(ApplicationService::new(
            Arc::new(InMemoryApplicationRepository::default()),
            directory.clone(),
            notifications.clone(),
            matching,
        ));

        Self {
            applications,
            notifications,
            directory,
        }
    }
}

pub(crate) fn load_catalog(path: Option<&Path>) -> Result<CatalogSnapshot, AppError> {
    let snapshot = match path {
        Some(path) => CatalogImporter::from_path(path)?,
        None => CatalogImporter::from_reader(Cursor::new(DEFAULT_CATALOG))?,
    };
    Ok(snapshot)
}
