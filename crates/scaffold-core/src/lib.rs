//! Scaffold Core - Shared library for the webtask scaffold CLI
//!
//! This library fetches webtask scaffolds (sample source files) from git
//! repositories and deploys them through the external `wt` tool. It is
//! consumed by the `wt-scaffold` binary, which only adds argument parsing
//! and output rendering on top.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Identifier resolution, repository
//!   cloning, commit-tree navigation, doc-block config extraction
//! - **Layer 2: Lifecycle** - The ephemeral clone workspace and the deploy
//!   subprocess boundary
//! - **Layer 3: Orchestration** - `Pipeline`, which sequences one listing or
//!   fetch run and guarantees workspace cleanup on every exit path
//!
//! # Example Usage
//!
//! ```ignore
//! use scaffold_core::{DeployTool, Pipeline, ScaffoldRequest};
//!
//! let request = ScaffoldRequest {
//!     identifier: Some("hello".to_string()),
//!     ..Default::default()
//! };
//! let pipeline = Pipeline::new(DeployTool::sibling()?);
//! let outcome = pipeline.run(&request).await?;
//! ```

pub mod config;
pub mod deploy;
pub mod error;
pub mod pipeline;
pub mod repo;
pub mod resolver;
pub mod source;
pub mod workspace;

// Re-export main types for convenience
pub use config::TaskConfig;
pub use deploy::DeployTool;
pub use error::{Result, ScaffoldError};
pub use pipeline::{Outcome, Pipeline};
pub use repo::fetcher::CommitSnapshot;
pub use repo::tree::ScaffoldDescriptor;
pub use resolver::{RepoLocation, Resolution, ScaffoldRequest};
pub use source::SampleSource;
pub use workspace::Workspace;
