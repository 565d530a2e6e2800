//! YAML frontmatter extraction.

use serde_yaml::Value;

const OPEN: &str = "---\n";
const CLOSE: &str = "\n---\n";

/// Parsed frontmatter block of a source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    yaml: String,
}

impl Frontmatter {
    /// Block-style YAML dump, newline terminated.
    #[must_use]
    pub fn to_yaml(&self) -> &str {
        &self.yaml
    }

    fn from_value(value: Value) -> Option<Self> {
        let is_empty = match &value {
            Value::Null => true,
            Value::Mapping(map) => map.is_empty(),
            _ => false,
        };
        if is_empty {
            return None;
        }

        let mut yaml = serde_yaml::to_string(&value).ok()?;
        if !yaml.ends_with('\n') {
            yaml.push('\n');
        }
        Some(Self { yaml })
    }
}

/// Split a leading `---` delimited YAML block off `content`.
///
/// Returns the frontmatter (if any) and the remaining body. The body is only
/// stripped when the block parses; a null or empty block is stripped but
/// yields no frontmatter. Content without a closing delimiter, or with
/// invalid YAML, is returned untouched.
#[must_use]
pub fn extract_frontmatter(content: &str) -> (Option<Frontmatter>, &str) {
    if !content.starts_with(OPEN) {
        return (None, content);
    }

    // Search from the opening newline so `---\n---\n` closes immediately.
    let Some(offset) = content[OPEN.len() - 1..].find(CLOSE) else {
        return (None, content);
    };
    let close = OPEN.len() - 1 + offset;
    let yaml = content.get(OPEN.len()..close).unwrap_or("");
    let body = &content[close + CLOSE.len()..];

    if yaml.trim().is_empty() {
        return (None, body);
    }

    match serde_yaml::from_str::<Value>(yaml) {
        Ok(value) => (Frontmatter::from_value(value), body),
        Err(e) => {
            tracing::debug!(error = %e, "Frontmatter is not valid YAML, keeping content as-is");
            (None, content)
        }
    }
}
