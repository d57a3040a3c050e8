//! Entity property references such as `issue.property[support.level].tier`.

use serde::Serialize;

use crate::{error::AstError, strings};

/// A property key path and the object references that follow it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Property {
    /// Key path segments, the text inside the brackets split on `.`.
    keys: Vec<String>,
    /// Reference segments after the closing bracket.
    references: Vec<String>,
}

impl Property {
    /// Creates a property reference.
    ///
    /// The key path must have at least one segment. No segment may be empty or contain `.`,
    /// and reference segments must be plain words.
    pub fn new(keys: Vec<String>, references: Vec<String>) -> Result<Self, AstError> {
        let bad_segment = |s: &String| s.is_empty() || s.contains('.');
        if keys.is_empty()
            || keys.iter().any(bad_segment)
            || references.iter().any(bad_segment)
            || !references
                .iter()
                .all(|r| r.chars().all(strings::is_word_char))
        {
            return Err(AstError::InvalidPropertySegment);
        }
        Ok(Self { keys, references })
    }

    /// Splits dotted text into a property reference.
    pub fn parse(key_path: &str, reference_path: &str) -> Result<Self, AstError> {
        let references = if reference_path.is_empty() {
            Vec::new()
        } else {
            split(reference_path)
        };
        Self::new(split(key_path), references)
    }

    /// Key path segments.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Reference segments.
    pub fn references(&self) -> &[String] {
        &self.references
    }

    /// Key path joined with `.`.
    pub fn key_path(&self) -> String {
        self.keys.join(".")
    }

    /// Reference path joined with `.`, empty when there are no references.
    pub fn reference_path(&self) -> String {
        self.references.join(".")
    }
}

/// Splits on `.` keeping empty segments.
fn split(path: &str) -> Vec<String> {
    path.split('.').map(str::to_string).collect()
}
