//! Wrapper boundary cell synthesis.
//!
//! Every qualifying top-level I/O bit gets one wrapper boundary cell
//! (WBC): a synthetic scan cell that sits between the core and its pins
//! and can observe or control the pin value during wrapper test modes.
//! WBCs exist only in this model; they are never written back into the
//! netlist.

use serde::{Deserialize, Serialize};
use wrapscan_common::Bit;
use wrapscan_netlist::Module;

/// Functional input port names of a synthesized wrapper boundary cell.
pub const WBC_INPUT_PORTS: &[&str] = &["CFI", "WINT", "WEXT", "WRCK", "DFT_sdi"];

/// Functional output port names of a synthesized wrapper boundary cell.
pub const WBC_OUTPUT_PORTS: &[&str] = &["CFO", "DFT_sdo"];

/// Which side of the core a wrapper boundary cell guards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum WbcDirection {
    /// Guards a top-level input bit.
    Input,
    /// Guards a top-level output bit.
    Output,
}

/// A synthesized wrapper boundary cell bound to one top-level I/O bit.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct WrapperBoundaryCell {
    /// Instance name, `WBC_` followed by the guarded signal name.
    pub instance: String,
    /// Which side of the core this cell guards.
    pub direction: WbcDirection,
    /// The guarded signal (an expanded bit name for vector ports).
    pub signal: String,
    /// Functional input port names.
    pub inputs: Vec<String>,
    /// Functional output port names.
    pub outputs: Vec<String>,
    /// The captured or shifted value held by the cell.
    pub value: Bit,
}

impl WrapperBoundaryCell {
    fn new(direction: WbcDirection, signal: &str) -> Self {
        Self {
            instance: format!("WBC_{signal}"),
            direction,
            signal: signal.to_owned(),
            inputs: WBC_INPUT_PORTS.iter().map(|p| (*p).to_owned()).collect(),
            outputs: WBC_OUTPUT_PORTS.iter().map(|p| (*p).to_owned()).collect(),
            value: Bit::Zero,
        }
    }
}

/// Synthesizes wrapper boundary cells for every qualifying I/O bit of
/// `top`.
///
/// Vector ports contribute one cell per bit under their expanded names.
/// Input bits whose name appears in `excluded` (clocks, resets, enables)
/// get no cell; the exclusion list does not apply to outputs. Input cells
/// come first, then output cells, each group sorted by signal name so the
/// result is independent of port declaration order.
pub fn synthesize_wbcs(top: &Module, excluded: &[String]) -> Vec<WrapperBoundaryCell> {
    let mut inputs: Vec<String> = top
        .expanded_input_names()
        .into_iter()
        .filter(|name| !excluded.iter().any(|e| e == name))
        .collect();
    inputs.sort_unstable();

    let mut outputs = top.expanded_output_names();
    outputs.sort_unstable();

    inputs
        .iter()
        .map(|s| WrapperBoundaryCell::new(WbcDirection::Input, s))
        .chain(
            outputs
                .iter()
                .map(|s| WrapperBoundaryCell::new(WbcDirection::Output, s)),
        )
        .collect()
}
