//! Synchronous flop capture over the evaluator.
//!
//! A capture cycle is one rising clock edge: the current Q values are
//! driven onto their nets, combinational logic settles, and every flop
//! samples its next state. Scan-enable, scan-in, and reset are test
//! harness overrides keyed by instance name, not nets read from the
//! netlist, so capture can force any flop without touching the model.

use std::collections::{BTreeMap, HashMap};

use wrapscan_common::Bit;
use wrapscan_diagnostics::{code, Diagnostic, DiagnosticSink};

use crate::error::SimError;
use crate::eval::Evaluator;

/// Per-instance control overrides applied during flop simulation.
///
/// Absent entries mean: reset inactive, scan-enable low, scan-in zero.
#[derive(Clone, Debug, Default)]
pub struct FlopControls {
    /// Scan-enable override per scan flop.
    pub se: HashMap<String, Bit>,
    /// Scan-in override per scan flop, consulted only while its
    /// scan-enable override is high.
    pub si: HashMap<String, Bit>,
    /// Active-low reset override. Zero forces the flop to zero.
    pub reset: HashMap<String, Bit>,
}

impl Evaluator {
    /// Computes every flop's next Q from the settled net values.
    ///
    /// Only instances present in `current_q` participate; names the model
    /// does not know are dropped from the result. Priority per flop:
    /// reset override, then scan-enable override (scan flops only), then
    /// the D net. An unbound D net samples zero.
    pub fn simulate_flops(
        &self,
        current_q: &BTreeMap<String, Bit>,
        controls: &FlopControls,
    ) -> BTreeMap<String, Bit> {
        let mut next_q = BTreeMap::new();
        for instance in current_q.keys() {
            let Some(flop) = self.model().flop(instance) else {
                continue;
            };
            let value = if controls.reset.get(instance) == Some(&Bit::Zero) {
                Bit::Zero
            } else if flop.is_scan && controls.se.get(instance) == Some(&Bit::One) {
                controls.si.get(instance).copied().unwrap_or(Bit::Zero)
            } else {
                flop.d.as_deref().map(|net| self.net(net)).unwrap_or(Bit::Zero)
            };
            next_q.insert(instance.clone(), value);
        }
        next_q
    }

    /// Runs `cycles` back-to-back capture cycles from `initial_q`.
    ///
    /// Each cycle clears the net values, drives every flop's Q net,
    /// settles the combinational logic, and samples the next Q values.
    /// A propagation pass that hits the iteration cap emits a
    /// non-convergence warning and continues with the values it reached.
    pub fn capture(
        &mut self,
        initial_q: &BTreeMap<String, Bit>,
        cycles: u32,
        controls: &FlopControls,
        max_iterations: u32,
        sink: &DiagnosticSink,
    ) -> Result<BTreeMap<String, Bit>, SimError> {
        let mut current_q = initial_q.clone();
        for cycle in 1..=cycles {
            self.clear();
            let primaries: Vec<(String, Bit)> = current_q
                .iter()
                .filter_map(|(instance, &bit)| {
                    self.model()
                        .flop(instance)
                        .and_then(|f| f.q.clone())
                        .map(|net| (net, bit))
                })
                .collect();
            self.set_nets(primaries);

            let report = self.propagate(max_iterations)?;
            if !report.converged {
                sink.emit(
                    Diagnostic::warning(
                        code::NON_CONVERGENCE,
                        format!(
                            "combinational logic did not settle within {max_iterations} \
                             iterations during capture cycle {cycle}; using best-effort values"
                        ),
                    ),
                );
            }
            current_q = self.simulate_flops(&current_q, controls);
        }
        Ok(current_q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SimModel;
    use wrapscan_dft::classify_design;
    use wrapscan_netlist::{Design, Instance, Module, PortDecl};

    // One scan flop whose D is its inverted Q: a toggle register.
    fn toggle_evaluator() -> Evaluator {
        let mut top = Module::new("top");
        top.inputs = vec![PortDecl::scalar("clk")];
        top.outputs = vec![PortDecl::scalar("q")];
        top.instances = vec![
            Instance::new("SDFFRX1", "t0")
                .connect("D", "n_d")
                .connect("SE", "scan_en")
                .connect("SI", "si")
                .connect("CK", "clk")
                .connect("RN", "rn")
                .connect("Q", "q"),
            Instance::new("clkinvx1", "g0").connect("A", "q").connect("Y", "n_d"),
        ];
        let design = Design::from_modules(vec![top]);
        let classified = classify_design(&design).unwrap();
        let sink = DiagnosticSink::new();
        Evaluator::new(SimModel::build(&design, &classified, &sink))
    }

    fn q(bit: Bit) -> BTreeMap<String, Bit> {
        BTreeMap::from([("t0".to_string(), bit)])
    }

    #[test]
    fn functional_capture_samples_d() {
        let mut ev = toggle_evaluator();
        let sink = DiagnosticSink::new();
        let final_q = ev
            .capture(&q(Bit::Zero), 1, &FlopControls::default(), 10, &sink)
            .unwrap();
        assert_eq!(final_q["t0"], Bit::One);
        assert_eq!(sink.warning_count(), 0);
    }

    #[test]
    fn two_cycles_toggle_back() {
        let mut ev = toggle_evaluator();
        let sink = DiagnosticSink::new();
        let final_q = ev
            .capture(&q(Bit::Zero), 2, &FlopControls::default(), 10, &sink)
            .unwrap();
        assert_eq!(final_q["t0"], Bit::Zero);
    }

    #[test]
    fn reset_override_wins() {
        let mut ev = toggle_evaluator();
        let sink = DiagnosticSink::new();
        let controls = FlopControls {
            reset: HashMap::from([("t0".to_string(), Bit::Zero)]),
            ..FlopControls::default()
        };
        let final_q = ev.capture(&q(Bit::One), 1, &controls, 10, &sink).unwrap();
        assert_eq!(final_q["t0"], Bit::Zero);
    }

    #[test]
    fn scan_enable_override_shifts_si() {
        let mut ev = toggle_evaluator();
        let sink = DiagnosticSink::new();
        let controls = FlopControls {
            se: HashMap::from([("t0".to_string(), Bit::One)]),
            si: HashMap::from([("t0".to_string(), Bit::One)]),
            ..FlopControls::default()
        };
        let final_q = ev.capture(&q(Bit::Zero), 1, &controls, 10, &sink).unwrap();
        assert_eq!(final_q["t0"], Bit::One);
    }

    #[test]
    fn unknown_instances_dropped() {
        let ev = toggle_evaluator();
        let current = BTreeMap::from([
            ("t0".to_string(), Bit::One),
            ("ghost".to_string(), Bit::One),
        ]);
        let next = ev.simulate_flops(&current, &FlopControls::default());
        assert!(next.contains_key("t0"));
        assert!(!next.contains_key("ghost"));
    }
}
