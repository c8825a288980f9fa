//! Module definitions: ports, instances, and continuous assignments.

use crate::bits::BitIndexTable;
use crate::instance::Instance;
use crate::port::PortDecl;
use serde::{Deserialize, Serialize};

/// A continuous assignment `assign lhs = rhs` between two nets.
///
/// Only net-to-net aliases survive into this model; expression right-hand
/// sides are lowered to gate instances by the parsing collaborator.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ContinuousAssign {
    /// The driven net.
    pub lhs: String,
    /// The driving net.
    pub rhs: String,
}

/// A single module definition in the netlist.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Module {
    /// The module name.
    pub name: String,
    /// Declared input ports in declaration order.
    pub inputs: Vec<PortDecl>,
    /// Declared output ports in declaration order.
    pub outputs: Vec<PortDecl>,
    /// Cell instances in declaration order.
    pub instances: Vec<Instance>,
    /// Continuous assignments.
    pub assigns: Vec<ContinuousAssign>,
}

impl Module {
    /// Creates an empty module with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            instances: Vec::new(),
            assigns: Vec::new(),
        }
    }

    /// All input signal names with vector ports expanded to one name per
    /// bit, in declaration order.
    pub fn expanded_input_names(&self) -> Vec<String> {
        self.inputs.iter().flat_map(|p| p.expand()).collect()
    }

    /// All output signal names with vector ports expanded to one name per
    /// bit, in declaration order.
    pub fn expanded_output_names(&self) -> Vec<String> {
        self.outputs.iter().flat_map(|p| p.expand()).collect()
    }

    /// Builds the signal-name→bit-index table over all of this module's
    /// vector ports.
    pub fn bit_index_table(&self) -> BitIndexTable {
        BitIndexTable::from_ports(self.inputs.iter().chain(self.outputs.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_io() -> Module {
        let mut m = Module::new("simple_counter");
        m.inputs = vec![
            PortDecl::scalar("clk"),
            PortDecl::scalar("reset"),
            PortDecl::scalar("en"),
            PortDecl::vector("in", 3, 0),
        ];
        m.outputs = vec![PortDecl::vector("out", 3, 0)];
        m
    }

    #[test]
    fn expanded_names() {
        let m = counter_io();
        assert_eq!(
            m.expanded_input_names(),
            vec!["clk", "reset", "en", "in3", "in2", "in1", "in0"]
        );
        assert_eq!(
            m.expanded_output_names(),
            vec!["out3", "out2", "out1", "out0"]
        );
    }

    #[test]
    fn bit_table_covers_both_directions() {
        let m = counter_io();
        let table = m.bit_index_table();
        assert_eq!(table.bit_index("in2"), Some(2));
        assert_eq!(table.bit_index("out[1]"), Some(1));
        assert_eq!(table.bit_index("clk"), None);
    }

    #[test]
    fn serde_roundtrip() {
        let mut m = counter_io();
        m.instances.push(Instance::new("nand2x1", "g0").connect("A", "in[0]"));
        m.assigns.push(ContinuousAssign {
            lhs: "n0".to_owned(),
            rhs: "in[1]".to_owned(),
        });
        let json = serde_json::to_string(&m).unwrap();
        let back: Module = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
