//! Gate-level scan test simulation for the Wrapscan DFT toolkit.
//!
//! This crate turns a classified design into something that can be
//! tested: [`model`] lowers it into flat gate and flop tables, [`eval`]
//! settles combinational logic with synchronous unit-delay propagation,
//! [`capture`] clocks the flops, and the two protocol drivers run
//! complete tests over it:
//!
//! - [`intest`] shifts a vector serially through the full scan chain,
//!   captures, and shifts the signature back out;
//! - [`extest`] loads the boundary cells in parallel and exercises the
//!   inter-core wiring with one capture per peripheral core.
//!
//! [`sweep`] drives either protocol over directed, exhaustive, or random
//! vector sets and aggregates signature statistics.

#![warn(missing_docs)]

pub mod capture;
pub mod error;
pub mod eval;
pub mod extest;
pub mod intest;
pub mod model;
pub mod sweep;

pub use capture::FlopControls;
pub use error::SimError;
pub use eval::{Evaluator, PropagationReport};
pub use extest::{ExtestCell, ExtestSim};
pub use intest::{ScanCell, ScanChainSim, ScanPhase, TraceEntry};
pub use model::{FlopModel, GateModel, NetDriver, SimModel};
pub use sweep::{
    random_vectors, run_directed, run_exhaustive, SweepResults, SweepRow, VectorOutcome,
};
