//! Full-chain (intest) scan protocol.
//!
//! Drives the shift-in → capture → shift-out protocol over a full scan
//! chain. Shifting is serial: each incoming bit enters at position 0 and
//! pushes the chain one place toward the tail. Capture delegates the
//! functional cycles to the evaluator for every sequential cell; wrapper
//! boundary cells hold their shifted value through capture. Shift-out
//! reads the tail, so the signature lists cell values in reverse chain
//! order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wrapscan_common::{format_vector, parse_vector, Bit};
use wrapscan_config::ScanOptions;
use wrapscan_diagnostics::DiagnosticSink;
use wrapscan_dft::{ChainCellKind, ScanChain};

use crate::capture::FlopControls;
use crate::error::SimError;
use crate::eval::Evaluator;

/// Protocol phase of a scan chain simulation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ScanPhase {
    /// No test in progress.
    Idle,
    /// A vector is being shifted in.
    ShiftIn,
    /// Functional capture cycles are running.
    Capture,
    /// The signature is being shifted out.
    ShiftOut,
    /// A test has completed.
    Done,
}

/// One chain position with its current shift-register value.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScanCell {
    /// Instance occupying this position.
    pub instance: String,
    /// What kind of cell the position holds.
    pub kind: ChainCellKind,
    /// Current value.
    pub value: Bit,
}

impl ScanCell {
    fn is_wbc(&self) -> bool {
        matches!(self.kind, ChainCellKind::Wbc { .. })
    }
}

/// One labelled snapshot of the chain state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TraceEntry {
    /// What produced this snapshot, e.g. `ShiftIn 3`.
    pub label: String,
    /// Chain values at that moment, position 0 first.
    pub state: String,
}

/// Simulates the scan protocol over a full chain.
#[derive(Debug)]
pub struct ScanChainSim {
    cells: Vec<ScanCell>,
    evaluator: Evaluator,
    phase: ScanPhase,
    capture_cycles: u32,
    max_iterations: u32,
    trace: Vec<TraceEntry>,
}

impl ScanChainSim {
    /// Binds a chain to an evaluator, with capture depth and the
    /// propagation cap taken from `options`.
    pub fn new(chain: &ScanChain, evaluator: Evaluator, options: &ScanOptions) -> Self {
        let cells = chain
            .elements
            .iter()
            .map(|e| ScanCell {
                instance: e.instance.clone(),
                kind: e.kind.clone(),
                value: Bit::Zero,
            })
            .collect();
        Self {
            cells,
            evaluator,
            phase: ScanPhase::Idle,
            capture_cycles: options.capture_cycles,
            max_iterations: options.max_propagation_iterations,
            trace: Vec::new(),
        }
    }

    /// The current protocol phase.
    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Chain values, position 0 first.
    pub fn state(&self) -> String {
        format_vector(&self.cells.iter().map(|c| c.value).collect::<Vec<_>>())
    }

    /// Every recorded snapshot of the current test.
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    fn record(&mut self, label: String) {
        let state = self.state();
        self.trace.push(TraceEntry { label, state });
    }

    /// Shifts every cell one place toward the tail and injects `bit` at
    /// position 0.
    fn shift_once(&mut self, bit: Bit) {
        for i in (1..self.cells.len()).rev() {
            self.cells[i].value = self.cells[i - 1].value;
        }
        self.cells[0].value = bit;
    }

    /// Serially shifts `vector` into the chain, one cycle per bit.
    ///
    /// The vector length must equal the chain length; on a mismatch the
    /// chain state is left untouched.
    pub fn shift_in(&mut self, vector: &str) -> Result<(), SimError> {
        let bits = parse_vector(vector)?;
        if bits.len() != self.cells.len() {
            return Err(SimError::VectorLengthMismatch {
                expected: self.cells.len(),
                actual: bits.len(),
            });
        }
        self.phase = ScanPhase::ShiftIn;
        for (i, bit) in bits.into_iter().enumerate() {
            self.shift_once(bit);
            self.record(format!("ShiftIn {}", i + 1));
        }
        Ok(())
    }

    /// Runs the configured number of functional capture cycles.
    ///
    /// Sequential cells load their chain values as initial Q, capture
    /// with scan-enable forced low, and write the resulting Q back into
    /// the chain. Wrapper boundary cells are left untouched.
    pub fn capture(&mut self, sink: &DiagnosticSink) -> Result<(), SimError> {
        self.phase = ScanPhase::Capture;
        let initial_q: BTreeMap<String, Bit> = self
            .cells
            .iter()
            .filter(|c| !c.is_wbc())
            .map(|c| (c.instance.clone(), c.value))
            .collect();

        let mut controls = FlopControls::default();
        for cell in &self.cells {
            if matches!(cell.kind, ChainCellKind::ScanFlop { .. }) {
                controls.se.insert(cell.instance.clone(), Bit::Zero);
            }
        }

        let final_q = self.evaluator.capture(
            &initial_q,
            self.capture_cycles,
            &controls,
            self.max_iterations,
            sink,
        )?;
        for cell in &mut self.cells {
            if let Some(&value) = final_q.get(&cell.instance) {
                cell.value = value;
            }
        }
        self.record("Capture Complete".to_string());
        Ok(())
    }

    /// Shifts the whole chain out, reading the tail each cycle and
    /// injecting zeros at the head. Returns the signature, which lists
    /// the cells in reverse chain order.
    pub fn shift_out(&mut self) -> String {
        self.phase = ScanPhase::ShiftOut;
        let mut output = Vec::with_capacity(self.cells.len());
        for cycle in 0..self.cells.len() {
            output.push(self.cells[self.cells.len() - 1].value);
            self.shift_once(Bit::Zero);
            self.record(format!("ShiftOut {}", cycle + 1));
        }
        self.phase = ScanPhase::Done;
        format_vector(&output)
    }

    /// Runs one complete test: shift-in, capture, shift-out.
    pub fn run(&mut self, vector: &str, sink: &DiagnosticSink) -> Result<String, SimError> {
        self.trace.clear();
        self.phase = ScanPhase::Idle;
        self.shift_in(vector)?;
        self.capture(sink)?;
        let signature = self.shift_out();
        Ok(signature)
    }
}
