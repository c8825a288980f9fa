//! Diagnostic creation, severity management, and accumulation.
//!
//! This crate provides structured [`Diagnostic`] messages with severity
//! levels and error codes, accumulated during model construction and
//! simulation by the thread-safe [`DiagnosticSink`]. Recoverable problems
//! (a skipped malformed port, a propagation pass that failed to converge)
//! become warnings in the sink rather than hard errors, so partial models
//! remain usable for inspection.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use severity::Severity;
pub use sink::DiagnosticSink;
