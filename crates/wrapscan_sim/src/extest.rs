//! Boundary-chain (extest) protocol over multiple cores.
//!
//! Extest exercises the interconnect between cores rather than the logic
//! inside one. The wrapper boundary cells are loaded in parallel from the
//! test vector, then each peripheral core runs one functional capture
//! with the boundary values as its initial flop state: input-side cells
//! feed the first peripheral core, output-side cells feed the second, and
//! the two captures are fully independent. The resulting flop states are
//! written back into the boundary cells and concatenated, input side
//! first, into the signature.
//!
//! Boundary values map to core flops through bit position: a cell guarding
//! bit *i* of a vector port exchanges values with the flop whose Q net
//! carries bit *i*.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wrapscan_common::{format_vector, parse_vector, Bit};
use wrapscan_config::ScanOptions;
use wrapscan_diagnostics::DiagnosticSink;
use wrapscan_dft::{ChainCellKind, ScanChain, WbcDirection};
use wrapscan_netlist::BitIndexTable;

use crate::capture::FlopControls;
use crate::error::SimError;
use crate::eval::Evaluator;
use crate::intest::TraceEntry;

/// One boundary cell participating in an extest run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtestCell {
    /// Instance name of the boundary cell.
    pub instance: String,
    /// Which side of the core it guards.
    pub direction: WbcDirection,
    /// The guarded top-level signal.
    pub signal: String,
    /// Current value.
    pub value: Bit,
}

/// Simulates the extest protocol over a boundary-only chain and two
/// peripheral core evaluators.
#[derive(Debug)]
pub struct ExtestSim {
    cells: Vec<ExtestCell>,
    left: Evaluator,
    right: Evaluator,
    bits: BitIndexTable,
    max_iterations: u32,
    left_final: BTreeMap<String, Bit>,
    right_final: BTreeMap<String, Bit>,
    trace: Vec<TraceEntry>,
}

impl ExtestSim {
    /// Binds a boundary chain to the two peripheral core evaluators.
    ///
    /// `bits` is the top module's bit-index table, used to pair boundary
    /// cells with core flops by bit position.
    pub fn new(
        boundary: &ScanChain,
        left: Evaluator,
        right: Evaluator,
        bits: BitIndexTable,
        options: &ScanOptions,
    ) -> Self {
        let cells = boundary
            .elements
            .iter()
            .filter_map(|e| match &e.kind {
                ChainCellKind::Wbc { direction, signal } => Some(ExtestCell {
                    instance: e.instance.clone(),
                    direction: *direction,
                    signal: signal.clone(),
                    value: Bit::Zero,
                }),
                _ => None,
            })
            .collect();
        Self {
            cells,
            left,
            right,
            bits,
            max_iterations: options.max_propagation_iterations,
            left_final: BTreeMap::new(),
            right_final: BTreeMap::new(),
            trace: Vec::new(),
        }
    }

    /// Boundary cell values in chain order.
    pub fn state(&self) -> String {
        format_vector(&self.cells.iter().map(|c| c.value).collect::<Vec<_>>())
    }

    /// Every recorded snapshot of the current test.
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    fn record(&mut self, label: &str) {
        let state = self.state();
        self.trace.push(TraceEntry {
            label: label.to_string(),
            state,
        });
    }

    /// The bit position a boundary cell exchanges values at: the declared
    /// index of its guarded signal, or its position within its direction
    /// group when the signal is scalar.
    fn bit_position(&self, cell_index: usize) -> u32 {
        let cell = &self.cells[cell_index];
        self.bits.bit_index(&cell.signal).unwrap_or_else(|| {
            self.cells[..cell_index]
                .iter()
                .filter(|c| c.direction == cell.direction)
                .count() as u32
        })
    }

    /// Initial Q map for a core: every flop whose Q net carries bit *i*
    /// starts at the value of the `direction`-side cell guarding bit *i*.
    fn initial_q(&self, evaluator: &Evaluator, direction: WbcDirection) -> BTreeMap<String, Bit> {
        let mut q = BTreeMap::new();
        for flop in &evaluator.model().flops {
            let Some(bit) = flop.q.as_deref().and_then(|net| self.bits.bit_index(net)) else {
                continue;
            };
            for (i, cell) in self.cells.iter().enumerate() {
                if cell.direction == direction && self.bit_position(i) == bit {
                    q.insert(flop.instance.clone(), cell.value);
                }
            }
        }
        q
    }

    /// Writes a core's final Q values back into the `direction`-side
    /// boundary cells. Bits no flop drives stay zero.
    fn write_back(&mut self, direction: WbcDirection, final_q: &BTreeMap<String, Bit>) {
        let model_flops: Vec<(u32, Bit)> = match direction {
            WbcDirection::Input => &self.left,
            WbcDirection::Output => &self.right,
        }
        .model()
        .flops
        .iter()
        .filter_map(|flop| {
            let bit = flop.q.as_deref().and_then(|net| self.bits.bit_index(net))?;
            final_q.get(&flop.instance).map(|&v| (bit, v))
        })
        .collect();

        for i in 0..self.cells.len() {
            if self.cells[i].direction != direction {
                continue;
            }
            let position = self.bit_position(i);
            self.cells[i].value = model_flops
                .iter()
                .find(|(bit, _)| *bit == position)
                .map(|&(_, v)| v)
                .unwrap_or(Bit::Zero);
        }
    }

    /// Loads `vector` into the boundary cells in parallel, bit *i* into
    /// chain position *i*. On a length mismatch the cells are untouched.
    pub fn shift_in(&mut self, vector: &str) -> Result<(), SimError> {
        let bits = parse_vector(vector)?;
        if bits.len() != self.cells.len() {
            return Err(SimError::VectorLengthMismatch {
                expected: self.cells.len(),
                actual: bits.len(),
            });
        }
        for (cell, bit) in self.cells.iter_mut().zip(bits) {
            cell.value = bit;
        }
        self.record("ShiftIn Complete");
        Ok(())
    }

    /// Runs `cycles` independent functional capture cycles on each
    /// peripheral core, seeded from the boundary cell values.
    pub fn capture(&mut self, cycles: u32, sink: &DiagnosticSink) -> Result<(), SimError> {
        let controls = FlopControls::default();

        let left_q = self.initial_q(&self.left, WbcDirection::Input);
        self.left_final =
            self.left
                .capture(&left_q, cycles, &controls, self.max_iterations, sink)?;

        let right_q = self.initial_q(&self.right, WbcDirection::Output);
        self.right_final =
            self.right
                .capture(&right_q, cycles, &controls, self.max_iterations, sink)?;

        self.record("Capture Complete");
        Ok(())
    }

    /// Writes the captured core states back into the boundary cells and
    /// returns the signature: input-side values then output-side values.
    pub fn shift_out(&mut self) -> String {
        let left_final = self.left_final.clone();
        let right_final = self.right_final.clone();
        self.write_back(WbcDirection::Input, &left_final);
        self.write_back(WbcDirection::Output, &right_final);
        self.record("ShiftOut Complete");

        let ordered: Vec<Bit> = self
            .cells
            .iter()
            .filter(|c| c.direction == WbcDirection::Input)
            .chain(
                self.cells
                    .iter()
                    .filter(|c| c.direction == WbcDirection::Output),
            )
            .map(|c| c.value)
            .collect();
        format_vector(&ordered)
    }

    /// Runs one complete extest: parallel load, one capture cycle per
    /// core, write-back and signature generation.
    pub fn run_extest(&mut self, vector: &str, sink: &DiagnosticSink) -> Result<String, SimError> {
        self.trace.clear();
        self.shift_in(vector)?;
        self.capture(1, sink)?;
        Ok(self.shift_out())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SimModel;
    use wrapscan_dft::{build_boundary_chain, classify_design, synthesize_wbcs};
    use wrapscan_netlist::{Design, Instance, Module, PortDecl};

    // Two hold registers (D wired to Q) on a 2-bit input and a 2-bit
    // output port. Capture changes nothing, so extest is the identity.
    fn hold_sim() -> ExtestSim {
        let mut top = Module::new("top");
        top.inputs = vec![PortDecl::scalar("clk"), PortDecl::vector("a", 1, 0)];
        top.outputs = vec![PortDecl::vector("y", 1, 0)];
        top.instances = (0..2)
            .map(|i| {
                Instance::new("SDFFRX1", format!("r{i}"))
                    .connect("D", format!("y[{i}]"))
                    .connect("SE", "scan_en")
                    .connect("SI", "si")
                    .connect("CK", "clk")
                    .connect("RN", "rn")
                    .connect("Q", format!("y[{i}]"))
            })
            .collect();
        let design = Design::from_modules(vec![top]);
        let classified = classify_design(&design).unwrap();
        let options = ScanOptions::default();
        let top_module = classified.top_module(&design).unwrap();
        let wbcs = synthesize_wbcs(top_module, &options.excluded_ports);
        let boundary = build_boundary_chain(&wbcs, &options);
        let bits = top_module.bit_index_table();
        let sink = DiagnosticSink::new();
        let model = SimModel::build(&design, &classified, &sink);
        ExtestSim::new(
            &boundary,
            Evaluator::new(model.clone()),
            Evaluator::new(model),
            bits,
            &options,
        )
    }

    #[test]
    fn parallel_load_by_position() {
        let mut sim = hold_sim();
        sim.shift_in("0110").unwrap();
        assert_eq!(sim.state(), "0110");
    }

    #[test]
    fn length_mismatch_leaves_cells_untouched() {
        let mut sim = hold_sim();
        sim.shift_in("1010").unwrap();
        let err = sim.shift_in("10").unwrap_err();
        assert_eq!(
            err,
            SimError::VectorLengthMismatch {
                expected: 4,
                actual: 2
            }
        );
        assert_eq!(sim.state(), "1010");
    }

    #[test]
    fn hold_registers_make_extest_the_identity() {
        let mut sim = hold_sim();
        let sink = DiagnosticSink::new();
        let signature = sim.run_extest("0110", &sink).unwrap();
        assert_eq!(signature, "0110");
        assert_eq!(sink.warning_count(), 0);
    }

    #[test]
    fn trace_labels_each_protocol_phase() {
        let mut sim = hold_sim();
        let sink = DiagnosticSink::new();
        sim.run_extest("1111", &sink).unwrap();
        let labels: Vec<&str> = sim.trace().iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["ShiftIn Complete", "Capture Complete", "ShiftOut Complete"]
        );
    }
}
