//! Simulation errors.

use thiserror::Error;
use wrapscan_common::VectorParseError;

/// Errors surfaced while simulating scan tests.
///
/// Recoverable model-construction problems (malformed ports, missing
/// bindings) become warnings in the diagnostic sink instead; these
/// variants abort the operation that raised them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A test vector's length did not match the chain it targets. The
    /// chain state is untouched when this is raised.
    #[error("test vector has {actual} bits but the scan chain has {expected} cells")]
    VectorLengthMismatch {
        /// Number of cells in the targeted chain.
        expected: usize,
        /// Number of bits in the supplied vector.
        actual: usize,
    },

    /// Evaluation reached a gate whose cell type matched a gate family
    /// but resolved to no evaluation template.
    #[error("no evaluation template for cell type `{cell_type}` (instance `{instance}`)")]
    UnsupportedGateType {
        /// The unresolvable cell type.
        cell_type: String,
        /// The instance that was reached.
        instance: String,
    },

    /// A test-vector string contained a non-binary character.
    #[error(transparent)]
    InvalidVector(#[from] VectorParseError),
}
