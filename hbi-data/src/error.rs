//! Error types for data access and dashboard services.

use std::path::PathBuf;

use hbi_core::{SpcrError, ValidationIssue, WorkflowError};

/// Errors raised while loading dashboard records.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Repository cannot serve requests
    #[error("Repository unavailable: {0}")]
    Unavailable(String),

    /// Reading a fixture file failed
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fixture file is not valid JSON for its record type
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Records broke an invariant and validation is strict
    #[error("{source_name} contains {} invalid record field(s)", .issues.len())]
    Invalid {
        source_name: String,
        issues: Vec<ValidationIssue>,
    },

    /// Configuration file could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Errors raised by [`crate::DashboardService`] and [`crate::StaffingStore`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Data access error
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Workflow transition rejected
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// Change request draft rejected
    #[error("{0}")]
    Spcr(#[from] SpcrError),

    /// No record with this id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation needs a signed-in user
    #[error("No signed-in user")]
    NoUser,
}
