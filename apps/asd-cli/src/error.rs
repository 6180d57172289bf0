//! Error type for the command line front end.

use asd_model::ModelError;
use asd_project::ProjectError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Study error: {0}")]
    Project(#[from] ProjectError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("System not found: {0}")]
    SystemNotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
