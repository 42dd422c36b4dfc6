use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Project identifier: a URL-safe slug, usually derived from the project name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Create a ProjectId from an already-slugified string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive a slug from a display name: lowercase, whitespace collapsed
    /// to `-`, everything outside `[a-z0-9-]` dropped.
    pub fn from_name(name: &str) -> Self {
        let mut slug = String::with_capacity(name.len());
        let mut last_was_space = false;
        for ch in name.trim().chars() {
            if ch.is_whitespace() {
                if !last_was_space {
                    slug.push('-');
                }
                last_was_space = true;
                continue;
            }
            last_was_space = false;
            for lower in ch.to_lowercase() {
                if lower.is_ascii_lowercase() || lower.is_ascii_digit() || lower == '-' {
                    slug.push(lower);
                }
            }
        }
        Self(slug)
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Record id in the `{prefix}-{uuid}` shape used by every stored entity
/// (`photo-…`, `video-…`, `comment-…`, `notif-…`).
pub fn prefixed_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_from_simple_name() {
        assert_eq!(ProjectId::from_name("Test House").as_str(), "test-house");
    }

    #[test]
    fn slug_drops_punctuation_and_collapses_whitespace() {
        assert_eq!(
            ProjectId::from_name("123  Main St., Unit #4").as_str(),
            "123-main-st-unit-4"
        );
    }

    #[test]
    fn slug_of_symbol_only_name_is_empty() {
        assert!(ProjectId::from_name("!!!").is_empty());
    }

    #[test]
    fn prefixed_ids_are_unique() {
        let a = prefixed_id("photo");
        let b = prefixed_id("photo");
        assert!(a.starts_with("photo-"));
        assert_ne!(a, b);
    }
}
