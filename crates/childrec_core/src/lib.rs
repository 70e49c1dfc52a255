//! Core record lifecycle and persistence for child records.
//! This crate is the single source of truth for soft-delete and audit
//! timestamp invariants.

pub mod command;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use command::{ChildCommand, ChildOutcome};
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::child::{
    utc_now, AgeInput, Child, ChildChange, ChildId, ChildStatus, ChildValidationError, NewChild,
};
pub use repo::child_repo::{ChildRepository, RepoError, RepoResult, SqliteChildRepository};
pub use service::child_service::{ChildService, ServiceError, ServiceResult};
pub use store::{ChildStore, ScopedChildService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
