//! Key Namespacing Module
//!
//! Builds the `prefix:category:key` keys written to the backing store.

use std::fmt;

// == Namespaced Key ==
/// A fully-qualified backing-store key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespacedKey(String);

impl NamespacedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamespacedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NamespacedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Returns true when the input is empty or only whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// == Key Namespacer ==
/// Composes and decomposes namespaced keys under a fixed prefix.
///
/// Invalid input never errors: builders return `None` so callers can treat
/// bad input the same way as "not found".
#[derive(Debug, Clone)]
pub struct KeyNamespacer {
    prefix: String,
}

impl KeyNamespacer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    // == Build ==
    /// Builds `prefix:category:key`.
    ///
    /// Returns `None` when either the category or the key is blank.
    pub fn build(&self, category: &str, key: &str) -> Option<NamespacedKey> {
        if is_blank(category) || is_blank(key) {
            return None;
        }
        Some(NamespacedKey(format!("{}:{}:{}", self.prefix, category, key)))
    }

    /// Pattern matching every key of one category.
    pub fn category_pattern(&self, category: &str) -> Option<String> {
        self.scoped_pattern(category, "*")
    }

    /// Pattern `prefix:category:glob` for eviction within one category.
    pub fn scoped_pattern(&self, category: &str, glob: &str) -> Option<String> {
        if is_blank(category) || is_blank(glob) {
            return None;
        }
        Some(format!("{}:{}:{}", self.prefix, category, glob))
    }

    /// Pattern `prefix:*:glob` spanning every category.
    pub fn global_pattern(&self, glob: &str) -> Option<String> {
        if is_blank(glob) {
            return None;
        }
        Some(format!("{}:*:{}", self.prefix, glob))
    }

    // == Parse ==
    /// Splits a namespaced key back into `(category, key)`.
    ///
    /// The key part may itself contain `:`; only the first two separators
    /// after the prefix are significant.
    pub fn parse<'a>(&self, full_key: &'a str) -> Option<(&'a str, &'a str)> {
        let rest = full_key.strip_prefix(self.prefix.as_str())?.strip_prefix(':')?;
        let (category, key) = rest.split_once(':')?;
        if category.is_empty() || key.is_empty() {
            return None;
        }
        Some((category, key))
    }
}
