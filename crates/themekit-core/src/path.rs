//! Conversions between dotted references and flattened output keys.
//!
//! A schema location is a list of section names from the root. References
//! in `$mixins` and `$inherits` spell it with dots (`button.primary`); output
//! keys and accumulated evaluations join the same segments with the
//! configured separator (`button__primary`).

use std::fmt;

/// Location of a node within the schema, as ordered segment names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SchemaPath {
    segments: Vec<String>,
}

impl SchemaPath {
    /// The schema root (no segments).
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Build from a dotted reference such as `a.b[0]`.
    #[must_use]
    pub fn from_dotted(dotted: &str) -> Self {
        Self {
            segments: parse_path(dotted),
        }
    }

    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segments joined with `.`; empty at the root.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }

    /// Segments joined with `separator`; empty at the root.
    #[must_use]
    pub fn flatten(&self, separator: &str) -> String {
        self.segments.join(separator)
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

/// Split a string path into segments.
///
/// Accepts dot notation and bracket notation: `a.b`, `a[0]`, `a["b"].c`.
/// Empty segments are dropped.
#[must_use]
pub fn parse_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '.' => push_segment(&mut segments, &mut current),
            '[' => {
                push_segment(&mut segments, &mut current);
                let quote = chars.next_if(|&q| q == '"' || q == '\'');
                for inner in chars.by_ref() {
                    if Some(inner) == quote {
                        continue;
                    }
                    if inner == ']' {
                        break;
                    }
                    current.push(inner);
                }
                push_segment(&mut segments, &mut current);
            }
            _ => current.push(c),
        }
    }
    push_segment(&mut segments, &mut current);
    segments
}

fn push_segment(segments: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        segments.push(std::mem::take(current));
    }
}

/// Convert a dotted reference to its flattened key form.
#[must_use]
pub fn dotted_to_flat(dotted: &str, separator: &str) -> String {
    parse_path(dotted).join(separator)
}

/// Whether `key` equals `prefix` or lies beneath it at a segment boundary.
///
/// `level-10` is not within `level-1`; `level-1__x` is.
#[must_use]
pub fn is_within(key: &str, prefix: &str, separator: &str) -> bool {
    key.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(separator))
}

/// Replace the `from` prefix of `key` with `to`, keeping the remainder.
///
/// Returns `None` if `key` is not within `from`.
#[must_use]
pub fn rebase(key: &str, from: &str, to: &str, separator: &str) -> Option<String> {
    if !is_within(key, from, separator) {
        return None;
    }
    let rest = &key[from.len()..];
    if to.is_empty() {
        return Some(rest.strip_prefix(separator).unwrap_or(rest).to_string());
    }
    Some(format!("{to}{rest}"))
}
