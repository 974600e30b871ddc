//! Item codes and the prefix rule that ties them to stock unit codes.

use serde::{Deserialize, Serialize};

use stockbill_core::{DomainError, DomainResult, ValueObject};

/// Number of leading characters of an item code used for stock matching.
pub const PREFIX_LEN: usize = 3;

/// Short code identifying a catalog item (typically 3 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCode(String);

impl ItemCode {
    /// Parse an item code. Leading/trailing whitespace is trimmed; a blank
    /// code is rejected.
    pub fn new(code: impl Into<String>) -> DomainResult<Self> {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("item code cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The matching prefix for this code.
    pub fn prefix(&self) -> Prefix {
        Prefix::of(&self.0)
    }
}

impl core::fmt::Display for ItemCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ValueObject for ItemCode {}

/// The first [`PREFIX_LEN`] characters of an item code (the whole code when
/// shorter). Matching is case-sensitive, exact-substring-at-start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prefix(String);

impl Prefix {
    /// Derive the prefix of an arbitrary code.
    ///
    /// Counted in `char`s, not bytes, so multi-byte codes cannot split a
    /// character in half.
    pub fn of(code: &str) -> Self {
        Self(code.chars().take(PREFIX_LEN).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `unit_code` satisfies this prefix.
    pub fn matches(&self, unit_code: &str) -> bool {
        unit_code.starts_with(self.0.as_str())
    }
}

impl core::fmt::Display for Prefix {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ValueObject for Prefix {}
