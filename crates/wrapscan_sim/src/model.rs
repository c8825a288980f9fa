//! Flattened simulation model construction.
//!
//! [`SimModel::build`] lowers a classified design into the flat tables the
//! evaluator works on: one entry per gate with its resolved port→net
//! bindings, one entry per flop with its D and Q nets, and a net→driver
//! map covering every gate output and continuous assignment. Problems in
//! the netlist (malformed connections, missing bindings, unresolvable
//! gate types) are reported as warnings and the affected entry degrades
//! rather than aborting the build.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use wrapscan_dft::{CellFamily, ClassifiedDesign, GateKind};
use wrapscan_diagnostics::{code, Diagnostic, DiagnosticSink};
use wrapscan_netlist::{Design, Instance};

/// Gate output port names. Any other port is treated as an input.
const GATE_OUTPUT_PORTS: &[&str] = &["y", "z", "zn"];

/// A combinational cell lowered for evaluation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GateModel {
    /// Instance name.
    pub instance: String,
    /// Library cell type.
    pub cell_type: String,
    /// Evaluation template; `None` means evaluating this gate fails.
    pub kind: Option<GateKind>,
    /// Lower-cased port name → net name for every well-formed connection.
    pub ports: HashMap<String, String>,
}

/// A sequential cell lowered for capture simulation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlopModel {
    /// Instance name.
    pub instance: String,
    /// Library cell type.
    pub cell_type: String,
    /// `true` for scan-equipped flops.
    pub is_scan: bool,
    /// Net wired to the D pin, if bound.
    pub d: Option<String>,
    /// Net wired to the Q pin, if bound.
    pub q: Option<String>,
}

/// What drives a net.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum NetDriver {
    /// The output of the gate at this index in [`SimModel::gates`].
    Gate(usize),
    /// A continuous assignment aliasing another net.
    Wire(String),
}

/// The flattened model a single core is simulated against.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SimModel {
    /// All gates, in classification order.
    pub gates: Vec<GateModel>,
    /// All flops, scan flops first, in classification order.
    pub flops: Vec<FlopModel>,
    /// Driven net → its unique driver. Ordered so propagation visits
    /// nets deterministically.
    pub drivers: BTreeMap<String, NetDriver>,
    flop_index: HashMap<String, usize>,
}

impl SimModel {
    /// Lowers `classified` against the instances of `design`.
    pub fn build(design: &Design, classified: &ClassifiedDesign, sink: &DiagnosticSink) -> Self {
        let instances: HashMap<&str, &Instance> = design
            .modules
            .iter()
            .flat_map(|m| m.instances.iter())
            .map(|i| (i.name.as_str(), i))
            .collect();

        let mut model = SimModel::default();

        for gate in &classified.gates {
            let Some(instance) = instances.get(gate.instance.as_str()) else {
                continue;
            };
            if gate.kind.is_none() {
                sink.emit(
                    Diagnostic::warning(
                        code::UNRESOLVED_GATE,
                        format!(
                            "cell type `{}` matches a gate family but no evaluation template",
                            gate.cell_type
                        ),
                    )
                    .with_origin(&gate.instance),
                );
            }
            let ports = gate_ports(instance, sink);
            let index = model.gates.len();
            for out in GATE_OUTPUT_PORTS {
                if let Some(net) = ports.get(*out) {
                    model.drivers.insert(net.clone(), NetDriver::Gate(index));
                }
            }
            model.gates.push(GateModel {
                instance: gate.instance.clone(),
                cell_type: gate.cell_type.clone(),
                kind: gate.kind,
                ports,
            });
        }

        let sequential = classified
            .scan_flops
            .iter()
            .map(|f| (f, true))
            .chain(classified.flipflops.iter().map(|f| (f, false)));
        for (flop, is_scan) in sequential {
            let Some(instance) = instances.get(flop.instance.as_str()) else {
                continue;
            };
            let family = if is_scan {
                CellFamily::ScanFlop
            } else {
                CellFamily::Flop
            };
            let roles = flop_roles(instance, family, sink);
            let d = roles.get("d").cloned();
            if d.is_none() {
                sink.emit(
                    Diagnostic::warning(
                        code::MISSING_BINDING,
                        "no net bound to the D pin; it will capture constant 0",
                    )
                    .with_origin(&flop.instance),
                );
            }
            model.flop_index.insert(flop.instance.clone(), model.flops.len());
            model.flops.push(FlopModel {
                instance: flop.instance.clone(),
                cell_type: flop.cell_type.clone(),
                is_scan,
                d,
                q: roles.get("q").cloned(),
            });
        }

        for module in &design.modules {
            for assign in &module.assigns {
                model
                    .drivers
                    .insert(assign.lhs.clone(), NetDriver::Wire(assign.rhs.clone()));
            }
        }

        model
    }

    /// Looks up the lowered flop for an instance name.
    pub fn flop(&self, instance: &str) -> Option<&FlopModel> {
        self.flop_index.get(instance).map(|&i| &self.flops[i])
    }
}

/// Resolves a gate instance's connections to lower-cased port→net pairs.
///
/// Gates have no positional convention, so unnamed connections are
/// malformed here, as are connections without a net.
fn gate_ports(instance: &Instance, sink: &DiagnosticSink) -> HashMap<String, String> {
    let mut ports = HashMap::new();
    for conn in &instance.connections {
        match (&conn.port, &conn.net) {
            (Some(port), Some(net)) => {
                ports.insert(port.to_ascii_lowercase(), net.clone());
            }
            _ => {
                sink.emit(
                    Diagnostic::warning(code::MALFORMED_PORT, "skipping malformed port connection")
                        .with_origin(&instance.name),
                );
            }
        }
    }
    ports
}

/// Resolves a flop instance's connections to role→net pairs, falling back
/// to the family's positional port convention for unnamed connections.
fn flop_roles(
    instance: &Instance,
    family: CellFamily,
    sink: &DiagnosticSink,
) -> HashMap<String, String> {
    let positional = family.port_roles();
    let mut roles = HashMap::new();
    for (position, conn) in instance.connections.iter().enumerate() {
        let Some(net) = &conn.net else {
            sink.emit(
                Diagnostic::warning(code::MALFORMED_PORT, "skipping malformed port connection")
                    .with_origin(&instance.name),
            );
            continue;
        };
        match &conn.port {
            Some(port) => {
                roles.insert(port.to_ascii_lowercase(), net.clone());
            }
            None => match positional.get(position) {
                Some(role) => {
                    roles.insert((*role).to_string(), net.clone());
                }
                None => {
                    sink.emit(
                        Diagnostic::warning(
                            code::MALFORMED_PORT,
                            format!("positional connection {position} exceeds the port convention"),
                        )
                        .with_origin(&instance.name),
                    );
                }
            },
        }
    }
    roles
}
