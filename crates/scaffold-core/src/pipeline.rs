//! Top-level orchestration
//!
//! One run is: resolve the identifier, clone into the workspace, then either
//! list the available scaffolds or materialize one and deploy it. The
//! workspace is released on every exit path, and a leftover workspace from
//! an earlier run triggers one full cleanup-and-retry cycle, capped so a
//! directory that cannot be removed fails loudly instead of looping.

use crate::config;
use crate::deploy::DeployTool;
use crate::error::{Result, ScaffoldError};
use crate::repo::fetcher::{fetch_commit, CommitSnapshot};
use crate::repo::tree::ScaffoldDescriptor;
use crate::resolver::{basename, resolve, RepoLocation, Resolution, ScaffoldRequest, SCAFFOLD_EXT};
use crate::source::SampleSource;
use crate::workspace::{Workspace, WORKSPACE_DIR};
use colored::Colorize;
use std::path::PathBuf;

/// Attempt cap for workspace-conflict retries.
const MAX_ATTEMPTS: usize = 3;

/// What one pipeline run produced.
#[derive(Debug)]
pub enum Outcome {
    /// Available scaffolds, in repository order.
    Listed(Vec<ScaffoldDescriptor>),
    /// A scaffold was written locally and deployed.
    Deployed { filename: String, url: String },
}

/// A configured scaffold pipeline.
///
/// Defaults target the built-in sample repository, the well-known workspace
/// path, and the current directory for output; tests relocate all three.
pub struct Pipeline {
    samples: SampleSource,
    workspace_root: PathBuf,
    output_dir: PathBuf,
    deploy: DeployTool,
}

impl Pipeline {
    pub fn new(deploy: DeployTool) -> Self {
        Self {
            samples: SampleSource::default(),
            workspace_root: PathBuf::from(WORKSPACE_DIR),
            output_dir: PathBuf::from("."),
            deploy,
        }
    }

    /// Use a different sample source.
    pub fn samples(mut self, samples: SampleSource) -> Self {
        self.samples = samples;
        self
    }

    /// Clone into `root` instead of the well-known workspace path.
    pub fn workspace_at(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = root.into();
        self
    }

    /// Write the materialized scaffold into `dir` instead of the current
    /// directory.
    pub fn output_in(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Run the pipeline for one request.
    ///
    /// Every attempt releases the workspace before returning, whether it
    /// succeeded, recovered, or failed.
    pub async fn run(&self, request: &ScaffoldRequest) -> Result<Outcome> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let mut workspace = Workspace::at(&self.workspace_root);
            match self.run_once(request, &workspace).await {
                Err(ScaffoldError::WorkspaceConflict(root)) => {
                    workspace.release()?;
                    if attempts >= MAX_ATTEMPTS {
                        return Err(ScaffoldError::WorkspaceBusy { root, attempts });
                    }
                }
                Ok(outcome) => {
                    workspace.release()?;
                    return Ok(outcome);
                }
                Err(err) => {
                    // The pipeline error is the one worth reporting even if
                    // removal also fails.
                    let _ = workspace.release();
                    return Err(err);
                }
            }
        }
    }

    async fn run_once(&self, request: &ScaffoldRequest, workspace: &Workspace) -> Result<Outcome> {
        match resolve(request, &self.samples)? {
            Resolution::List => {
                let snapshot =
                    fetch_commit(&RepoLocation::main(&self.samples.repo_url), workspace).await?;
                self.list(&snapshot)
            }
            Resolution::Fetch {
                location,
                path,
                from_samples,
            } => {
                let snapshot = fetch_commit(&location, workspace).await?;
                match self.materialize_and_deploy(request, &snapshot, &path).await {
                    Err(ScaffoldError::EntryNotFound(_)) if from_samples => {
                        eprintln!(
                            "{}",
                            format!("Requested webtask {} does not exist.\n", basename(&path))
                                .red()
                        );
                        // Reuse the snapshot already in the workspace; the
                        // listing runs once and further errors propagate.
                        self.list(&snapshot)
                    }
                    other => other,
                }
            }
        }
    }

    fn list(&self, snapshot: &CommitSnapshot) -> Result<Outcome> {
        Ok(Outcome::Listed(
            snapshot.list_scaffolds(&self.samples.sample_dir)?,
        ))
    }

    async fn materialize_and_deploy(
        &self,
        request: &ScaffoldRequest,
        snapshot: &CommitSnapshot,
        path: &str,
    ) -> Result<Outcome> {
        let entry = snapshot.entry(path)?;
        let content = snapshot.read(&entry)?;

        let name = request
            .name
            .clone()
            .unwrap_or_else(|| basename(path).to_string());
        let filename = format!("{name}{SCAFFOLD_EXT}");
        tokio::fs::write(self.output_dir.join(&filename), &content).await?;

        let source = String::from_utf8_lossy(&content);
        let cfg = config::extract(request, &source);
        let url = self
            .deploy
            .create(&filename, &name, &request.profile, &cfg)
            .await?;

        Ok(Outcome::Deployed { filename, url })
    }
}
