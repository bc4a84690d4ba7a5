//! Shared types exchanged with callers and the CLI.
//!
//! A [`Placement`] is what a persistence layer stores per list member: the
//! record id and its position key. The CLI reads and writes these as JSON.

use serde::{Deserialize, Serialize};

/// Anything that carries a position key.
pub trait Positioned {
    fn position(&self) -> &str;
}

impl Positioned for String {
    fn position(&self) -> &str {
        self
    }
}

impl Positioned for &str {
    fn position(&self) -> &str {
        self
    }
}

/// A list member: record id plus position key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub id: String,
    pub position: String,
}

impl Positioned for Placement {
    fn position(&self) -> &str {
        &self.position
    }
}

/// Which primitive produced a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    First,
    Before,
    After,
    Between,
}

/// A generated key together with the neighbours it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generated {
    pub operation: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<String>,
    pub key: String,
}

impl Generated {
    /// Describe a key produced for the slot `(low, high)`.
    pub fn new(low: Option<&str>, high: Option<&str>, key: String) -> Self {
        let operation = match (low, high) {
            (None, None) => Operation::First,
            (None, Some(_)) => Operation::Before,
            (Some(_), None) => Operation::After,
            (Some(_), Some(_)) => Operation::Between,
        };
        Self {
            operation,
            low: low.map(str::to_string),
            high: high.map(str::to_string),
            key,
        }
    }
}
