//! Invocation of the external `wt` deploy tool
//!
//! The deploy tool is an opaque subprocess: we hand it a fixed argument
//! sequence and read the deployed URL back from the first line of its
//! stdout. That first-line convention is the tool's contract, so it is kept
//! behind this module's narrow surface.

use crate::config::TaskConfig;
use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Name of the deploy executable, expected next to our own binary.
pub const DEPLOY_TOOL: &str = "wt";

/// Handle to the deploy executable.
#[derive(Debug, Clone)]
pub struct DeployTool {
    program: PathBuf,
}

impl DeployTool {
    /// Deploy tool sitting next to the current executable.
    pub fn sibling() -> Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::at(dir.join(DEPLOY_TOOL)))
    }

    /// Deploy tool at an explicit path.
    pub fn at(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run `wt create` for a materialized scaffold and return the deployed
    /// URL.
    pub async fn create(
        &self,
        filename: &str,
        name: &str,
        profile: &str,
        cfg: &TaskConfig,
    ) -> Result<String> {
        let output = Command::new(&self.program)
            .args(create_args(filename, name, profile, cfg))
            .output()
            .await?;

        if !output.status.success() {
            return Err(ScaffoldError::DeployFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(first_line(&String::from_utf8_lossy(&output.stdout)).to_string())
    }
}

/// Argument sequence for `wt create`: the fixed prefix, then every param,
/// then every secret, both in insertion order.
pub fn create_args(filename: &str, name: &str, profile: &str, cfg: &TaskConfig) -> Vec<String> {
    let mut args = vec![
        "create".to_string(),
        filename.to_string(),
        "-n".to_string(),
        name.to_string(),
        "-p".to_string(),
        profile.to_string(),
    ];
    push_assignments(&mut args, "--param", &cfg.params);
    push_assignments(&mut args, "--secret", &cfg.secrets);
    args
}

fn push_assignments(
    args: &mut Vec<String>,
    flag: &str,
    entries: &indexmap::IndexMap<String, String>,
) {
    for (key, value) in entries {
        args.push(flag.to_string());
        args.push(format!("{key}={value}"));
    }
}

/// The deployed URL is the first stdout line, without its line terminator.
pub fn first_line(output: &str) -> &str {
    output.lines().next().unwrap_or("")
}
