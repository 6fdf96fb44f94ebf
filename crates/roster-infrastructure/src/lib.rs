//! Infrastructure layer for the roster user directory.
//!
//! Provides the concrete record store backings (flat JSON document and
//! SQLite), the upload receiver, default filesystem paths and the logging
//! notifier.

pub mod json_user_repository;
pub mod log_notifier;
pub mod paths;
pub mod sqlite_user_repository;
pub mod upload;

pub use json_user_repository::JsonUserRepository;
pub use log_notifier::LogNotifier;
pub use paths::RosterPaths;
pub use sqlite_user_repository::SqliteUserRepository;
pub use upload::UploadStore;
