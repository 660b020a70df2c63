//! Repository content retrieval
//!
//! This module provides:
//! - Cloning a remote repository into the workspace and resolving the main
//!   branch tip to a commit snapshot
//! - Navigating the snapshot's tree to locate an entry or enumerate a
//!   directory's scaffolds

pub mod fetcher;
pub mod tree;

pub use fetcher::{fetch_commit, CommitSnapshot};
pub use tree::{EntryKind, ScaffoldDescriptor, TreeEntry, NO_DESCRIPTION};
