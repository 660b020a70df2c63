//! Built-in sample repository configuration
//!
//! Mirrors what a product config would carry: where scaffolds come from when
//! the user names a bare sample instead of a full org/repo path.

/// Repository cloned when an identifier has no org/repo prefix.
pub const DEFAULT_REPO_URL: &str = "https://github.com/auth0/wt-cli";

/// Directory inside that repository holding the sample webtasks.
pub const DEFAULT_SAMPLE_DIR: &str = "sample-webtasks/";

/// Branch whose tip commit is read. Always the repository's main branch.
pub const DEFAULT_BRANCH: &str = "master";

/// Source of the built-in samples used for bare identifiers and listings.
#[derive(Debug, Clone)]
pub struct SampleSource {
    pub repo_url: String,
    pub sample_dir: String,
}

impl Default for SampleSource {
    fn default() -> Self {
        Self {
            repo_url: DEFAULT_REPO_URL.to_string(),
            sample_dir: DEFAULT_SAMPLE_DIR.to_string(),
        }
    }
}
