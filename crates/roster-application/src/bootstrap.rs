//! Configuration-driven composition of the directory core.

use std::sync::Arc;

use roster_core::config::{RosterConfig, StorageBacking};
use roster_core::error::Result;
use roster_core::user::UserRepository;
use roster_infrastructure::{
    JsonUserRepository, LogNotifier, RosterPaths, SqliteUserRepository, UploadStore,
};

use crate::directory_service::DirectoryService;
use crate::facade::DirectoryFacade;

/// Builds the facade from configuration: constructs the configured record
/// store backing, the upload store and the log notifier, and wires the
/// orchestrator on top.
///
/// Relative paths in the configuration resolve under the platform data
/// directory.
pub async fn build_directory(config: &RosterConfig) -> Result<DirectoryFacade> {
    let repository: Arc<dyn UserRepository> = match config.backing {
        StorageBacking::Json => {
            let data_file = RosterPaths::resolve(&config.data_file)?;
            tracing::info!(path = %data_file.display(), "using json record store");
            Arc::new(JsonUserRepository::open(data_file).await?)
        }
        StorageBacking::Sqlite => {
            tracing::info!(url = %config.database_url, "using sqlite record store");
            Arc::new(SqliteUserRepository::connect(&config.database_url).await?)
        }
    };

    let upload_dir = RosterPaths::resolve(&config.upload_dir)?;
    let uploads = UploadStore::open(upload_dir).await?;

    let service =
        DirectoryService::new(repository, uploads).with_notifier(Arc::new(LogNotifier));
    DirectoryFacade::new(service)
}
