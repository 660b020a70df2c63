//! Cloning a repository and resolving its main branch to a commit

use crate::error::{Result, ScaffoldError};
use crate::resolver::RepoLocation;
use crate::workspace::Workspace;
use git2::{BranchType, Oid, Repository};
use std::io;

/// A resolved commit inside a cloned repository.
///
/// Owns the clone for the lifetime of one workspace; all tree and blob reads
/// go through it. See [`crate::repo::tree`] for the navigation surface.
pub struct CommitSnapshot {
    pub(crate) repo: Repository,
    pub(crate) commit_id: Oid,
}

impl CommitSnapshot {
    pub fn commit_id(&self) -> Oid {
        self.commit_id
    }
}

/// Clone `location` into the workspace and resolve the branch tip commit.
///
/// The clone is the one real network operation and runs on a blocking
/// thread; everything after it is local disk access. A leftover non-empty
/// workspace is reported as [`ScaffoldError::WorkspaceConflict`] before any
/// network traffic happens.
pub async fn fetch_commit(
    location: &RepoLocation,
    workspace: &Workspace,
) -> Result<CommitSnapshot> {
    if workspace.is_occupied() {
        return Err(ScaffoldError::WorkspaceConflict(
            workspace.root().to_path_buf(),
        ));
    }

    let url = location.url.clone();
    let branch = location.branch.clone();
    let root = workspace.root().to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<CommitSnapshot> {
        let repo = Repository::clone(&url, &root)?;
        let commit_id = repo
            .find_branch(&branch, BranchType::Local)?
            .get()
            .peel_to_commit()?
            .id();
        Ok(CommitSnapshot { repo, commit_id })
    })
    .await
    .map_err(io::Error::other)?
}
