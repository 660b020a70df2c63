//! Ephemeral clone directory lifecycle
//!
//! One pipeline attempt owns one workspace. The directory itself is created
//! as a byproduct of cloning; this type only detects a leftover one and
//! removes it. At most one workspace may exist under the well-known path at
//! a time; a pre-existing non-empty directory is a conflict from an earlier
//! run, not a second workspace.

use crate::error::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Well-known directory the remote repository is cloned into.
pub const WORKSPACE_DIR: &str = ".tmp";

/// Handle to the ephemeral clone directory for one pipeline attempt.
///
/// The pipeline releases explicitly so removal failures are visible; `Drop`
/// removes the directory as a backstop if an attempt never got there.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    released: bool,
}

impl Workspace {
    /// Workspace rooted at an arbitrary path.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            released: false,
        }
    }

    /// Workspace at the well-known location in the current directory.
    pub fn default_location() -> Self {
        Self::at(WORKSPACE_DIR)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True when a previous run left a non-empty directory behind.
    pub fn is_occupied(&self) -> bool {
        match fs::read_dir(&self.root) {
            Ok(mut entries) => entries.next().is_some(),
            Err(_) => false,
        }
    }

    /// Remove the directory and everything under it, synchronously.
    ///
    /// A missing directory is a no-op; anything else that prevents removal
    /// surfaces as an error.
    pub fn release(&mut self) -> Result<()> {
        self.released = true;
        match fs::remove_dir_all(&self.root) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if !self.released {
            let _ = fs::remove_dir_all(&self.root);
        }
    }
}
