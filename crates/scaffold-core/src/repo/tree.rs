//! Tree navigation inside a resolved commit

use super::fetcher::CommitSnapshot;
use crate::config::docblock;
use crate::error::{Result, ScaffoldError};
use crate::resolver::SCAFFOLD_EXT;
use git2::{ErrorCode, ObjectType, Oid};
use std::path::Path;

/// Description used when a scaffold has no documentation block.
pub const NO_DESCRIPTION: &str = "no description.";

/// Whether a tree entry is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One named entry in a commit's tree. Content is read lazily through the
/// entry's object id, only for file entries.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub name: String,
    pub kind: EntryKind,
    id: Oid,
}

impl TreeEntry {
    fn from_git(entry: &git2::TreeEntry<'_>) -> Self {
        let kind = match entry.kind() {
            Some(ObjectType::Tree) => EntryKind::Directory,
            _ => EntryKind::File,
        };
        Self {
            name: String::from_utf8_lossy(entry.name_bytes()).into_owned(),
            kind,
            id: entry.id(),
        }
    }
}

/// A scaffold available in the sample directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldDescriptor {
    /// File basename without the scaffold extension.
    pub name: String,
    /// First doc-block description, or [`NO_DESCRIPTION`].
    pub description: String,
}

impl CommitSnapshot {
    fn tree(&self) -> Result<git2::Tree<'_>> {
        Ok(self.repo.find_commit(self.commit_id)?.tree()?)
    }

    /// Look up the entry at `path` in the commit tree.
    ///
    /// A missing path is [`ScaffoldError::EntryNotFound`]; every other
    /// lookup failure surfaces as a git error.
    pub fn entry(&self, path: &str) -> Result<TreeEntry> {
        let tree = self.tree()?;
        let looked_up = tree
            .get_path(Path::new(path.trim_end_matches('/')))
            .map_err(|err| {
                if err.code() == ErrorCode::NotFound {
                    ScaffoldError::EntryNotFound(path.to_string())
                } else {
                    err.into()
                }
            })?;
        Ok(TreeEntry::from_git(&looked_up))
    }

    /// Raw bytes of a file entry.
    pub fn read(&self, entry: &TreeEntry) -> Result<Vec<u8>> {
        Ok(self.repo.find_blob(entry.id)?.content().to_vec())
    }

    /// Immediate children of a directory entry, in native tree order.
    pub fn children(&self, entry: &TreeEntry) -> Result<Vec<TreeEntry>> {
        let tree = self.repo.find_tree(entry.id)?;
        Ok(tree.iter().map(|child| TreeEntry::from_git(&child)).collect())
    }

    /// List the scaffolds under `dir`.
    ///
    /// Every file child ending in the scaffold extension becomes a
    /// descriptor named after its basename and described by its leading doc
    /// block. Order follows the tree's native child ordering.
    pub fn list_scaffolds(&self, dir: &str) -> Result<Vec<ScaffoldDescriptor>> {
        let dir_entry = self.entry(dir)?;
        let mut scaffolds = Vec::new();

        for child in self.children(&dir_entry)? {
            if child.kind != EntryKind::File {
                continue;
            }
            let Some(name) = child.name.strip_suffix(SCAFFOLD_EXT) else {
                continue;
            };
            let content = self.read(&child)?;
            let source = String::from_utf8_lossy(&content);
            let description = docblock::parse(&source)
                .and_then(|block| block.description)
                .unwrap_or_else(|| NO_DESCRIPTION.to_string());
            scaffolds.push(ScaffoldDescriptor {
                name: name.to_string(),
                description,
            });
        }

        Ok(scaffolds)
    }
}
