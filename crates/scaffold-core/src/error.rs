//! Error taxonomy for the scaffold pipeline
//!
//! Recoverable conditions (`WorkspaceConflict`, `EntryNotFound`) are their
//! own variants so callers dispatch on structure, never on message text.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced while resolving, fetching, or deploying a scaffold.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The workspace directory already exists and is not empty. A previous
    /// run left it behind; the pipeline recovers by removing it and retrying.
    #[error("'{}' exists and is not an empty directory", .0.display())]
    WorkspaceConflict(PathBuf),

    /// The requested path does not exist in the resolved commit tree.
    #[error("'{0}' does not exist in the repository")]
    EntryNotFound(String),

    /// The identifier cannot be split into an org/repo shorthand.
    #[error("'{0}' is not a valid webtask identifier")]
    InvalidIdentifier(String),

    /// A `--param`/`--secret` override string is not a `key=value` pair.
    #[error("'{0}' is not a key=value pair")]
    InvalidAssignment(String),

    /// The workspace was still occupied after the conflict-retry cap.
    #[error("'{}' still occupied after {attempts} attempts", root.display())]
    WorkspaceBusy { root: PathBuf, attempts: usize },

    /// The deploy tool exited with a failure status.
    #[error("wt create exited with {status}: {stderr}")]
    DeployFailed { status: ExitStatus, stderr: String },

    #[error(transparent)]
    Git(#[from] git2::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
