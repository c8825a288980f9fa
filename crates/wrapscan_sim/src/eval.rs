//! Zero-delay combinational evaluation.
//!
//! The evaluator owns a [`SimModel`] and a net→value table. Propagation
//! is synchronous: each iteration computes every driven net from the
//! values of the previous iteration and commits them all at once, so one
//! iteration models one gate delay. A combinational loop that never
//! settles stops at the iteration cap and reports non-convergence; the
//! values then on the nets are the best-effort result.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wrapscan_common::Bit;
use wrapscan_dft::GateKind;

use crate::error::SimError;
use crate::model::{GateModel, NetDriver, SimModel};

/// The outcome of one propagation run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PropagationReport {
    /// `true` once an iteration changed no net value.
    pub converged: bool,
    /// Iterations executed, including the final stable one.
    pub iterations: u32,
}

/// Evaluates combinational logic over a flattened [`SimModel`].
#[derive(Clone, Debug)]
pub struct Evaluator {
    model: SimModel,
    values: HashMap<String, Bit>,
}

impl Evaluator {
    /// Wraps a lowered model with an empty value table.
    pub fn new(model: SimModel) -> Self {
        Self {
            model,
            values: HashMap::new(),
        }
    }

    /// The lowered model this evaluator simulates.
    pub fn model(&self) -> &SimModel {
        &self.model
    }

    /// The current value of a net. Unassigned nets read as zero.
    pub fn net(&self, net: &str) -> Bit {
        self.values.get(net).copied().unwrap_or(Bit::Zero)
    }

    /// Forces a net to a value.
    pub fn set_net(&mut self, net: impl Into<String>, value: Bit) {
        self.values.insert(net.into(), value);
    }

    /// Forces several nets at once.
    pub fn set_nets(&mut self, nets: impl IntoIterator<Item = (String, Bit)>) {
        self.values.extend(nets);
    }

    /// Resets every net to the unassigned (zero) state.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Computes a gate's output from the current net values. Unbound
    /// input ports read as zero.
    fn evaluate_gate(&self, gate: &GateModel) -> Result<Bit, SimError> {
        let kind = gate.kind.ok_or_else(|| SimError::UnsupportedGateType {
            cell_type: gate.cell_type.clone(),
            instance: gate.instance.clone(),
        })?;
        let pin = |name: &str| {
            gate.ports
                .get(name)
                .map(|net| self.net(net).is_one())
                .unwrap_or(false)
        };

        let out = match kind {
            GateKind::Inv => !pin("a"),
            GateKind::Nand => !(pin("a") && pin("b")),
            GateKind::And => pin("a") && pin("b"),
            GateKind::Nor => !(pin("a") || pin("b")),
            GateKind::Or => pin("a") || pin("b"),
            GateKind::Xnor => pin("a") == pin("b"),
            GateKind::Xor => pin("a") != pin("b"),
            GateKind::Oai2bb2 => {
                !(!(pin("a0n") && pin("a1n")) && (pin("b0") || pin("b1")))
            }
            GateKind::Aoi2bb1 => !(!(pin("a0n") || pin("a1n")) || pin("b0")),
            GateKind::Aoi21 => !(pin("b0") || (pin("a0") && pin("a1"))),
        };
        Ok(Bit::from(out))
    }

    /// Propagates until no net changes or `max_iterations` is reached.
    ///
    /// Iterations are synchronous: every driven net is recomputed from
    /// the pre-iteration values before any is committed.
    pub fn propagate(&mut self, max_iterations: u32) -> Result<PropagationReport, SimError> {
        for iteration in 1..=max_iterations {
            let mut next: Vec<(String, Bit)> = Vec::with_capacity(self.model.drivers.len());
            for (net, driver) in &self.model.drivers {
                let value = match driver {
                    NetDriver::Gate(index) => self.evaluate_gate(&self.model.gates[*index])?,
                    NetDriver::Wire(source) => self.net(source),
                };
                next.push((net.clone(), value));
            }

            let mut changed = false;
            for (net, value) in next {
                if self.net(&net) != value {
                    self.values.insert(net, value);
                    changed = true;
                }
            }
            if !changed {
                return Ok(PropagationReport {
                    converged: true,
                    iterations: iteration,
                });
            }
        }
        Ok(PropagationReport {
            converged: false,
            iterations: max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapscan_dft::classify_design;
    use wrapscan_diagnostics::DiagnosticSink;
    use wrapscan_netlist::{Design, Instance, Module, PortDecl};

    fn evaluator_for(instances: Vec<Instance>) -> Evaluator {
        let mut top = Module::new("top");
        top.inputs = vec![PortDecl::scalar("clk")];
        top.outputs = vec![PortDecl::scalar("q")];
        top.instances = instances;
        let design = Design::from_modules(vec![top]);
        let classified = classify_design(&design).unwrap();
        let sink = DiagnosticSink::new();
        Evaluator::new(SimModel::build(&design, &classified, &sink))
    }

    #[test]
    fn elementary_gates() {
        let mut ev = evaluator_for(vec![
            Instance::new("clkinvx1", "g_inv")
                .connect("A", "a")
                .connect("Y", "y_inv"),
            Instance::new("nand2x1", "g_nand")
                .connect("A", "a")
                .connect("B", "b")
                .connect("Y", "y_nand"),
            Instance::new("and2x1", "g_and")
                .connect("A", "a")
                .connect("B", "b")
                .connect("Y", "y_and"),
        ]);
        ev.set_net("a", Bit::One);
        ev.set_net("b", Bit::One);
        ev.propagate(10).unwrap();
        assert_eq!(ev.net("y_inv"), Bit::Zero);
        assert_eq!(ev.net("y_nand"), Bit::Zero);
        assert_eq!(ev.net("y_and"), Bit::One);
    }

    #[test]
    fn compound_gates() {
        let mut ev = evaluator_for(vec![
            Instance::new("oai2bb2xl", "g0")
                .connect("A0N", "a0n")
                .connect("A1N", "a1n")
                .connect("B0", "b0")
                .connect("B1", "b1")
                .connect("Y", "y0"),
            Instance::new("aoi21xl", "g1")
                .connect("A0", "a0")
                .connect("A1", "a1")
                .connect("B0", "b0")
                .connect("Y", "y1"),
        ]);
        // a0n=1, a1n=0, b0=1, b1=0: !( !(1&0) & (1|0) ) = 0
        ev.set_net("a0n", Bit::One);
        ev.set_net("b0", Bit::One);
        ev.propagate(10).unwrap();
        assert_eq!(ev.net("y0"), Bit::Zero);
        // a0=0, a1=0, b0=1: !(1 | (0&0)) = 0
        assert_eq!(ev.net("y1"), Bit::Zero);
    }

    #[test]
    fn two_input_truth_tables() {
        let mut ev = evaluator_for(vec![
            Instance::new("nand2x1", "g_nand").connect("A", "a").connect("B", "b").connect("Y", "y_nand"),
            Instance::new("and2x1", "g_and").connect("A", "a").connect("B", "b").connect("Y", "y_and"),
            Instance::new("nor2x1", "g_nor").connect("A", "a").connect("B", "b").connect("Y", "y_nor"),
            Instance::new("or2x1", "g_or").connect("A", "a").connect("B", "b").connect("Y", "y_or"),
        ]);
        for a in [false, true] {
            for b in [false, true] {
                ev.clear();
                ev.set_net("a", Bit::from(a));
                ev.set_net("b", Bit::from(b));
                ev.propagate(10).unwrap();
                assert_eq!(ev.net("y_nand"), Bit::from(!(a && b)), "nand {a} {b}");
                assert_eq!(ev.net("y_and"), Bit::from(a && b), "and {a} {b}");
                assert_eq!(ev.net("y_nor"), Bit::from(!(a || b)), "nor {a} {b}");
                assert_eq!(ev.net("y_or"), Bit::from(a || b), "or {a} {b}");
            }
        }
    }

    #[test]
    fn compound_truth_tables() {
        let mut ev = evaluator_for(vec![
            Instance::new("oai2bb2xl", "g_oai")
                .connect("A0N", "a0n")
                .connect("A1N", "a1n")
                .connect("B0", "b0")
                .connect("B1", "b1")
                .connect("Y", "y_oai"),
            Instance::new("aoi2bb1xl", "g_aoi2bb1")
                .connect("A0N", "a0n")
                .connect("A1N", "a1n")
                .connect("B0", "b0")
                .connect("Y", "y_aoi2bb1"),
            Instance::new("aoi21xl", "g_aoi21")
                .connect("A0", "a0n")
                .connect("A1", "a1n")
                .connect("B0", "b0")
                .connect("Y", "y_aoi21"),
        ]);
        for combo in 0u8..16 {
            let a0 = combo & 1 != 0;
            let a1 = combo & 2 != 0;
            let b0 = combo & 4 != 0;
            let b1 = combo & 8 != 0;
            ev.clear();
            ev.set_net("a0n", Bit::from(a0));
            ev.set_net("a1n", Bit::from(a1));
            ev.set_net("b0", Bit::from(b0));
            ev.set_net("b1", Bit::from(b1));
            ev.propagate(10).unwrap();
            assert_eq!(
                ev.net("y_oai"),
                Bit::from(!(!(a0 && a1) && (b0 || b1))),
                "oai2bb2 {combo:04b}"
            );
            assert_eq!(
                ev.net("y_aoi2bb1"),
                Bit::from(!(!(a0 || a1) || b0)),
                "aoi2bb1 {combo:04b}"
            );
            assert_eq!(
                ev.net("y_aoi21"),
                Bit::from(!(b0 || (a0 && a1))),
                "aoi21 {combo:04b}"
            );
        }
    }

    #[test]
    fn unbound_inputs_read_zero() {
        let mut ev = evaluator_for(vec![Instance::new("nand2x1", "g0")
            .connect("A", "a")
            .connect("Y", "y")]);
        ev.set_net("a", Bit::One);
        ev.propagate(10).unwrap();
        // B is unbound and reads 0, so the NAND output is 1.
        assert_eq!(ev.net("y"), Bit::One);
    }

    #[test]
    fn chained_gates_settle_and_stay_settled() {
        // inv -> inv: two gate delays.
        let mut ev = evaluator_for(vec![
            Instance::new("clkinvx1", "g0").connect("A", "a").connect("Y", "n"),
            Instance::new("clkinvx1", "g1").connect("A", "n").connect("Y", "y"),
        ]);
        ev.set_net("a", Bit::One);
        let report = ev.propagate(10).unwrap();
        assert!(report.converged);
        assert_eq!(ev.net("y"), Bit::One);

        // A second run from the settled state converges immediately.
        let report = ev.propagate(10).unwrap();
        assert!(report.converged);
        assert_eq!(report.iterations, 1);
    }

    #[test]
    fn ring_oscillator_never_converges() {
        let mut ev = evaluator_for(vec![Instance::new("clkinvx1", "g0")
            .connect("A", "n")
            .connect("Y", "n")]);
        let report = ev.propagate(10).unwrap();
        assert!(!report.converged);
        assert_eq!(report.iterations, 10);
    }

    #[test]
    fn unresolved_gate_fails_only_when_reached() {
        let mut ev = evaluator_for(vec![Instance::new("aoi22x1", "g0")
            .connect("A1", "a")
            .connect("Y", "y")]);
        let err = ev.propagate(10).unwrap_err();
        assert!(matches!(err, SimError::UnsupportedGateType { .. }));
    }
}
