//! Signal-name to bit-index mapping for vector ports.

use crate::port::PortDecl;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maps expanded vector-bit signal names to their declared bit index.
///
/// Built once from a module's port declarations and used everywhere a bit
/// position is needed (boundary-cell ↔ flip-flop mapping in extest capture,
/// test-vector bit ordering). Both spellings of a vector bit net resolve to
/// the same index: the flattened form (`out3`) used by expanded port lists
/// and the bracketed form (`out[3]`) used by instance connections.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BitIndexTable {
    indices: HashMap<String, u32>,
}

impl BitIndexTable {
    /// Builds the table from input and output port declarations.
    ///
    /// Scalar ports carry no bit index and are not registered.
    pub fn from_ports<'a>(ports: impl IntoIterator<Item = &'a PortDecl>) -> Self {
        let mut indices = HashMap::new();
        for decl in ports {
            if let Some(range) = &decl.range {
                for i in range.indices() {
                    indices.insert(format!("{}{}", decl.name, i), i);
                    indices.insert(format!("{}[{}]", decl.name, i), i);
                }
            }
        }
        Self { indices }
    }

    /// Returns the declared bit index of a signal name, if it names a
    /// vector bit.
    pub fn bit_index(&self, signal: &str) -> Option<u32> {
        self.indices.get(signal).copied()
    }

    /// The number of registered name spellings.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if no vector bits are registered.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
