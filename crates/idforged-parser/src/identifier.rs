//! The canonical catalog identifier type.

use std::fmt;

/// A normalized catalog identifier derived from a filename (e.g. `ABP-454`).
///
/// Identifiers are never empty. They are produced by the extractor, or built
/// directly with [`Identifier::new`] when the caller already knows the code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Identifier(String);

impl Identifier {
    /// Create an identifier from a string, trimming surrounding whitespace.
    ///
    /// Returns `None` when nothing is left after trimming.
    ///
    /// ```
    /// use idforged_parser::Identifier;
    ///
    /// assert_eq!(Identifier::new(" ABP-454 ").unwrap().as_str(), "ABP-454");
    /// assert!(Identifier::new("   ").is_none());
    /// ```
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Alphanumeric-only, upper-cased form used to compare identifiers
    /// that differ only in delimiters or case.
    ///
    /// ```
    /// use idforged_parser::Identifier;
    ///
    /// let id = Identifier::new("fc2_123456").unwrap();
    /// assert_eq!(id.compact(), "FC2123456");
    /// ```
    pub fn compact(&self) -> String {
        compact(&self.0)
    }

    /// Consume the identifier, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Strip everything but ASCII alphanumerics and upper-case the rest.
pub fn compact(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
