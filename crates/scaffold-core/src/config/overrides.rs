//! `key=value` override strings from the command line

use crate::error::{Result, ScaffoldError};
use indexmap::IndexMap;

/// Split one `key=value` assignment. The value may itself contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(ScaffoldError::InvalidAssignment(raw.to_string())),
    }
}

/// Collect repeated assignments into an ordered map. A repeated key keeps
/// its first position but takes the last value.
pub fn parse_assignments(raw: &[String]) -> Result<IndexMap<String, String>> {
    let mut assignments = IndexMap::new();
    for entry in raw {
        let (key, value) = parse_assignment(entry)?;
        assignments.insert(key, value);
    }
    Ok(assignments)
}
