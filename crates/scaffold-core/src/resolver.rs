//! Identifier resolution
//!
//! Turns the user-supplied webtask identifier (plus an optional explicit
//! repository) into a concrete repository URL and in-repo path, or signals
//! that a listing was requested.

use crate::error::{Result, ScaffoldError};
use crate::source::{SampleSource, DEFAULT_BRANCH};
use indexmap::IndexMap;

/// File extension every scaffold carries, including the dot.
pub const SCAFFOLD_EXT: &str = ".js";

/// Host template an org/repo shorthand expands into.
const GITHUB_URL: &str = "https://github.com";

/// User input for one pipeline run. Immutable once constructed.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldRequest {
    /// Webtask identifier: a bare sample name, an org/repo/path shorthand,
    /// or a path inside the `repo` override. `None` requests a listing.
    pub identifier: Option<String>,
    /// Explicit name for the materialized webtask.
    pub name: Option<String>,
    /// Repository locator used verbatim instead of the shorthand expansion.
    pub repo: Option<String>,
    /// Webtask profile passed through to the deploy tool.
    pub profile: String,
    /// Nonsecret runtime params, in the order they were given.
    pub params: IndexMap<String, String>,
    /// Secret runtime params, in the order they were given.
    pub secrets: IndexMap<String, String>,
}

/// A repository plus the branch whose tip commit will be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    pub url: String,
    pub branch: String,
}

impl RepoLocation {
    /// Location on the repository's main branch.
    pub fn main(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

/// What an identifier resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No identifier was supplied: list the built-in samples.
    List,
    /// Clone `location` and materialize the entry at `path`.
    Fetch {
        location: RepoLocation,
        path: String,
        /// True when resolved against the built-in sample repository, which
        /// allows falling back to a listing if the path is missing.
        from_samples: bool,
    },
}

/// Resolve a request against the built-in sample source.
pub fn resolve(request: &ScaffoldRequest, samples: &SampleSource) -> Result<Resolution> {
    let identifier = match request.identifier.as_deref() {
        Some(identifier) => normalize(identifier),
        None => return Ok(Resolution::List),
    };

    // No slash and no explicit repo: pull from the built-in samples.
    if !identifier.contains('/') && request.repo.is_none() {
        return Ok(Resolution::Fetch {
            location: RepoLocation::main(&samples.repo_url),
            path: format!("{}{}", samples.sample_dir, identifier),
            from_samples: true,
        });
    }

    // An explicit repo takes the whole identifier as the in-repo path.
    if let Some(repo) = &request.repo {
        return Ok(Resolution::Fetch {
            location: RepoLocation::main(repo),
            path: identifier,
            from_samples: false,
        });
    }

    // org/repo/path/to/webtask shorthand.
    let segments: Vec<&str> = identifier.split('/').collect();
    if segments.len() < 2 {
        return Err(ScaffoldError::InvalidIdentifier(identifier));
    }

    let shorthand = segments[..2].join("/");
    Ok(Resolution::Fetch {
        location: RepoLocation::main(format!("{GITHUB_URL}/{shorthand}")),
        path: segments[2..].join("/"),
        from_samples: false,
    })
}

/// Append the scaffold extension unless the identifier already ends in it.
fn normalize(identifier: &str) -> String {
    if identifier.ends_with(SCAFFOLD_EXT) {
        identifier.to_string()
    } else {
        format!("{identifier}{SCAFFOLD_EXT}")
    }
}

/// Basename of an in-repo path with the scaffold extension stripped.
pub fn basename(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.strip_suffix(SCAFFOLD_EXT).unwrap_or(file)
}
