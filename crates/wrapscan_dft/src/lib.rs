//! Scan infrastructure synthesis for the Wrapscan DFT toolkit.
//!
//! Given a [`Design`](wrapscan_netlist::Design), this crate partitions its
//! instances into scan flip-flops, plain flip-flops, and combinational
//! gates, synthesizes one wrapper boundary cell per qualifying top-level
//! I/O bit, and assembles the cells into scan chains:
//!
//! - [`classify`] — the classifier producing an immutable [`ClassifiedDesign`]
//! - [`family`] — data-driven positional port-role tables per cell family
//! - [`gate`] — the [`GateKind`] tagged gate classification
//! - [`wbc`] — wrapper boundary cell synthesis
//! - [`chain`] — full (intest) and boundary-only (extest) chain builders
//! - [`core`] — multi-core partitioning for extest mode
//!
//! All builders here are pure functions of the netlist and configuration:
//! they never inspect simulation state, and running them twice on the same
//! design yields identical results.

#![warn(missing_docs)]

pub mod chain;
pub mod classify;
pub mod core;
pub mod error;
pub mod family;
pub mod gate;
pub mod wbc;

pub use chain::{build_boundary_chain, build_full_chain, ChainCellKind, ScanChain, ScanChainElement};
pub use classify::{classify_cell_type, classify_design, CellClass, ClassifiedDesign, FlopCell, GateCell};
pub use self::core::{partition_cores, TestCore, MAIN_CORE};
pub use error::DftError;
pub use family::CellFamily;
pub use gate::GateKind;
pub use wbc::{synthesize_wbcs, WbcDirection, WrapperBoundaryCell};
