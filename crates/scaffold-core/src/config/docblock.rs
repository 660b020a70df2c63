//! Leading documentation block parsing
//!
//! Scaffolds open with a `/** ... */` block whose free text describes the
//! webtask and whose `@param`/`@secret` tags declare runtime configuration.
//! Only the first block in a file is read.

/// A parsed documentation block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBlock {
    /// Free text before the first tag, joined into one line.
    pub description: Option<String>,
    pub tags: Vec<Tag>,
}

/// One `@name value` tag, continuation lines folded into the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag name without the leading `@`.
    pub name: String,
    pub value: String,
}

/// Parse the first documentation block in `source`, if there is one.
pub fn parse(source: &str) -> Option<DocBlock> {
    let start = source.find("/**")?;
    let body = &source[start + 3..];
    let body = &body[..body.find("*/")?];

    let mut description_lines: Vec<&str> = Vec::new();
    let mut tags: Vec<Tag> = Vec::new();

    for line in body.lines() {
        let line = strip_margin(line);
        if let Some(rest) = line.strip_prefix('@') {
            let (name, value) = match rest.split_once(char::is_whitespace) {
                Some((name, value)) => (name, value.trim()),
                None => (rest, ""),
            };
            if name.is_empty() {
                continue;
            }
            tags.push(Tag {
                name: name.to_string(),
                value: value.to_string(),
            });
        } else if let Some(tag) = tags.last_mut() {
            // Continuation of the previous tag.
            if !line.is_empty() {
                if !tag.value.is_empty() {
                    tag.value.push(' ');
                }
                tag.value.push_str(line);
            }
        } else if !line.is_empty() {
            description_lines.push(line);
        }
    }

    let description = if description_lines.is_empty() {
        None
    } else {
        Some(description_lines.join(" "))
    };

    Some(DocBlock { description, tags })
}

/// Trim a block line down to its content: whitespace and the decorative
/// leading `*` margin.
fn strip_margin(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix('*').map_or(line, str::trim)
}
