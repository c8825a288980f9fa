//! Structured gate-level netlist model for the Wrapscan DFT toolkit.
//!
//! This crate defines the module/instance/port graph the scan core consumes.
//! A netlist-parsing collaborator produces these types from HDL source; the
//! core never sees parse trees, only this materialized representation:
//!
//! - [`Design`] — the set of module definitions plus the instantiation graph
//! - [`Module`] — ports, instances, and continuous assignments
//! - [`PortDecl`] — a scalar or vector port, expandable to one name per bit
//! - [`Instance`] — a placed cell with named and/or positional connections
//! - [`BitIndexTable`] — the signal-name→bit-index mapping derived once from
//!   the vector port declarations

#![warn(missing_docs)]

pub mod bits;
pub mod design;
pub mod ids;
pub mod instance;
pub mod module;
pub mod port;

pub use bits::BitIndexTable;
pub use design::Design;
pub use ids::ModuleId;
pub use instance::{Instance, PortConnection};
pub use module::{ContinuousAssign, Module};
pub use port::{BitRange, PortDecl};
