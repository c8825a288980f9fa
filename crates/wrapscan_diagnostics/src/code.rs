//! Diagnostic codes with category prefixes for structured identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Error diagnostics, prefixed with `E`.
    Error,
    /// Warning diagnostics, prefixed with `W`.
    Warning,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }
}

/// A structured diagnostic code combining a category prefix and a numeric
/// identifier, displayed as e.g. `W101` or `E203`.
///
/// Code ranges in use: `W1xx` for netlist/model-construction warnings,
/// `W2xx` for simulation warnings.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

/// A malformed port connection was skipped during model construction.
pub const MALFORMED_PORT: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 101,
};

/// A flip-flop or gate is missing a required port binding.
pub const MISSING_BINDING: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 102,
};

/// A gate cell matched a combinational family but no evaluation template.
pub const UNRESOLVED_GATE: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 103,
};

/// Combinational propagation did not reach a fixed point within the cap.
pub const NON_CONVERGENCE: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 201,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_prefixes() {
        assert_eq!(Category::Error.prefix(), 'E');
        assert_eq!(Category::Warning.prefix(), 'W');
    }

    #[test]
    fn display_zero_padded() {
        assert_eq!(DiagnosticCode::new(Category::Warning, 101).to_string(), "W101");
        assert_eq!(DiagnosticCode::new(Category::Error, 7).to_string(), "E007");
    }

    #[test]
    fn well_known_codes() {
        assert_eq!(MALFORMED_PORT.to_string(), "W101");
        assert_eq!(MISSING_BINDING.to_string(), "W102");
        assert_eq!(UNRESOLVED_GATE.to_string(), "W103");
        assert_eq!(NON_CONVERGENCE.to_string(), "W201");
    }
}
