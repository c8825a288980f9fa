//! Error types for scan infrastructure synthesis.

/// Errors that can occur while classifying a design or building chains.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DftError {
    /// No module is defined but never instantiated, so there is no top.
    #[error("no top-level module candidate: every defined module is instantiated")]
    NoTopModule,

    /// More than one module is defined but never instantiated.
    ///
    /// Picking one silently would make chain construction depend on source
    /// order, so this is rejected with the candidate list instead.
    #[error("ambiguous top-level module: candidates are {}", candidates.join(", "))]
    AmbiguousTopModule {
        /// The candidate module names in sorted order.
        candidates: Vec<String>,
    },
}
