//! Finding codes with category prefixes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a finding code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Malformed source text, prefixed with `E`.
    Syntax,
    /// Suspicious coding patterns, prefixed with `W`.
    Warning,
    /// Clocking, reset and constraint issues, prefixed with `T`.
    Timing,
    /// Resource mapping observations, prefixed with `R`.
    Resource,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Syntax => 'E',
            Category::Warning => 'W',
            Category::Timing => 'T',
            Category::Resource => 'R',
        }
    }
}

/// A structured finding code combining a category prefix and a number.
///
/// Displayed as the prefix followed by a zero-padded 3-digit number,
/// e.g. `E101`, `W103`, `T202`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this code.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new finding code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
