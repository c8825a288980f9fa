//! Placed cell instances and their port connections.

use serde::{Deserialize, Serialize};

/// A single port connection on an instance.
///
/// The parsing collaborator may deliver connections by name
/// (`.D(n_3)` — `port` is `Some("D")`), by position (`port` is `None`),
/// or malformed (`net` is `None`). Malformed connections are skipped with a
/// warning during model construction; they never abort it.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PortConnection {
    /// The port name on the cell, or `None` for a positional connection.
    pub port: Option<String>,
    /// The net bound to the port, or `None` if the entry was unparseable.
    pub net: Option<String>,
}

impl PortConnection {
    /// Creates a named connection `.port(net)`.
    pub fn named(port: impl Into<String>, net: impl Into<String>) -> Self {
        Self {
            port: Some(port.into()),
            net: Some(net.into()),
        }
    }

    /// Creates a positional connection `(net)`.
    pub fn positional(net: impl Into<String>) -> Self {
        Self {
            port: None,
            net: Some(net.into()),
        }
    }
}

/// A placed cell: a library cell or module instantiated under a name.
///
/// Immutable after classification; only simulation *values* associated with
/// an instance ever change.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Instance {
    /// The cell or module type name as written in the netlist.
    pub cell_type: String,
    /// The instance name.
    pub name: String,
    /// Port connections in declaration order.
    pub connections: Vec<PortConnection>,
}

impl Instance {
    /// Creates an instance with no connections.
    pub fn new(cell_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cell_type: cell_type.into(),
            name: name.into(),
            connections: Vec::new(),
        }
    }

    /// Adds a named connection and returns the instance for chaining.
    pub fn connect(mut self, port: impl Into<String>, net: impl Into<String>) -> Self {
        self.connections.push(PortConnection::named(port, net));
        self
    }

    /// Adds a positional connection and returns the instance for chaining.
    pub fn connect_positional(mut self, net: impl Into<String>) -> Self {
        self.connections.push(PortConnection::positional(net));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chaining() {
        let inst = Instance::new("nand2x1", "u1")
            .connect("A", "n_1")
            .connect("B", "n_2")
            .connect("Y", "n_3");
        assert_eq!(inst.cell_type, "nand2x1");
        assert_eq!(inst.connections.len(), 3);
        assert_eq!(inst.connections[0], PortConnection::named("A", "n_1"));
    }

    #[test]
    fn positional_connection() {
        let inst = Instance::new("dffrx1", "r0")
            .connect_positional("d_net")
            .connect_positional("clk");
        assert_eq!(inst.connections[0].port, None);
        assert_eq!(inst.connections[0].net.as_deref(), Some("d_net"));
    }

    #[test]
    fn malformed_connection_representable() {
        let conn = PortConnection {
            port: Some("D".to_string()),
            net: None,
        };
        assert!(conn.net.is_none());
    }
}
