//! Core domain logic for userdesk.
//! This crate owns the user-record and task stores and their invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod source;

pub use config::{SourceConfig, DEFAULT_USERS_ENDPOINT, TASKS_BLOB_KEY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{TaskId, TaskItem};
pub use model::user::{UserId, UserRecord};
pub use model::user_form::{validate_user_input, FieldErrors, UserField, UserInput};
pub use repo::blob_repo::{BlobError, BlobResult, BlobStore, SqliteBlobStore};
pub use repo::memory::MemoryBlobStore;
pub use search::filter::{filter_users, matches_term};
pub use service::task_store::{TaskStore, TaskStoreError};
pub use service::user_store::{
    LoadOutcome, LoadTicket, UserStore, UserStoreError, LOAD_ERROR_MESSAGE,
};
pub use source::http::HttpUserSource;
pub use source::payload::{RemoteAddress, RemoteCompany, RemoteUser};
pub use source::{SourceError, SourceResult, UserSource};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
