//! Opaque ID newtypes for netlist entities.

use serde::{Deserialize, Serialize};

/// Opaque, copyable ID for a module definition in a [`Design`](crate::Design).
///
/// IDs are indices into the design's module list and are stable for the
/// lifetime of the design.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ModuleId(u32);

impl ModuleId {
    /// Creates an ID from a raw `u32` index.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw `u32` index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}
