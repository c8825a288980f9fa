//! Shared foundational types for the Wrapscan DFT toolkit.
//!
//! This crate provides the two-state logic value used throughout the scan
//! simulator, test-vector parsing and formatting helpers, and common result
//! types.

#![warn(missing_docs)]

pub mod bit;
pub mod result;
pub mod vector;

pub use bit::Bit;
pub use result::{InternalError, WrapscanResult};
pub use vector::{format_vector, parse_vector, VectorParseError};
