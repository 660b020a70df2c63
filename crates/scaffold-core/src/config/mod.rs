//! Runtime configuration for a scaffold
//!
//! This module provides:
//! - Doc-block parsing (`docblock`)
//! - `key=value` override-string parsing (`overrides`)
//! - Extraction of the params and secrets handed to the deploy tool,
//!   merging doc-block declarations with command-line overrides

pub mod docblock;
pub mod overrides;

use crate::resolver::ScaffoldRequest;
use indexmap::IndexMap;

pub use docblock::{DocBlock, Tag};
pub use overrides::{parse_assignment, parse_assignments};

/// Params and secrets handed to the deploy tool, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskConfig {
    pub params: IndexMap<String, String>,
    pub secrets: IndexMap<String, String>,
}

/// Build the task configuration for a scaffold.
///
/// `@param`/`@secret` tags in the scaffold's leading doc block declare keys,
/// optionally with a `key=value` default. Request overrides win over
/// declared defaults; declared keys that end up with no value are dropped
/// (the deploy tool has nothing to receive for them). Order is declaration
/// order, with override-only keys appended.
pub fn extract(request: &ScaffoldRequest, source: &str) -> TaskConfig {
    let mut params: Vec<(String, Option<String>)> = Vec::new();
    let mut secrets: Vec<(String, Option<String>)> = Vec::new();

    if let Some(block) = docblock::parse(source) {
        for tag in &block.tags {
            let declared = match tag.name.as_str() {
                "param" => &mut params,
                "secret" => &mut secrets,
                _ => continue,
            };
            if let Some((key, default)) = tag_key(&tag.value) {
                declared.push((key.to_string(), default.map(str::to_string)));
            }
        }
    }

    TaskConfig {
        params: merge(params, &request.params),
        secrets: merge(secrets, &request.secrets),
    }
}

/// Pull the declared key out of a tag value, skipping a leading `{type}`
/// annotation. A `key=value` form carries a default.
fn tag_key(value: &str) -> Option<(&str, Option<&str>)> {
    let token = value
        .split_whitespace()
        .find(|token| !token.starts_with('{'))?;
    match token.split_once('=') {
        Some((key, default)) if !key.is_empty() => Some((key, Some(default))),
        Some(_) => None,
        None => Some((token, None)),
    }
}

fn merge(
    declared: Vec<(String, Option<String>)>,
    given: &IndexMap<String, String>,
) -> IndexMap<String, String> {
    let mut merged: IndexMap<String, Option<String>> = declared.into_iter().collect();
    for (key, value) in given {
        merged.insert(key.clone(), Some(value.clone()));
    }
    merged
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect()
}
