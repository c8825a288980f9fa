//! Design-wide cell classification.
//!
//! Walks every module of a [`Design`] in declaration order and buckets
//! instances into scan flops, plain flip-flops, and combinational gates
//! by case-insensitive substring match on the cell type. Anything that
//! matches no family (buffers, latches, macros) is ignored.

use serde::{Deserialize, Serialize};
use wrapscan_netlist::{Design, Module, ModuleId};

use crate::error::DftError;
use crate::family::CellFamily;
use crate::gate::{is_gate_family, GateKind};

/// The classification of a single cell type.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum CellClass {
    /// A scan-equipped flip-flop (`sdff*`).
    ScanFlipFlop,
    /// A plain flip-flop (`dff*`).
    FlipFlop,
    /// A combinational gate, with its evaluation template if one
    /// resolved.
    Gate(Option<GateKind>),
}

/// Classifies one cell type name, or `None` for types the scan tool
/// ignores (buffers, latches, macros).
pub fn classify_cell_type(cell_type: &str) -> Option<CellClass> {
    let lower = cell_type.to_ascii_lowercase();
    match CellFamily::of(&lower) {
        Some(CellFamily::ScanFlop) => Some(CellClass::ScanFlipFlop),
        Some(CellFamily::Flop) => Some(CellClass::FlipFlop),
        None if is_gate_family(&lower) => {
            Some(CellClass::Gate(GateKind::from_type_name(&lower)))
        }
        None => None,
    }
}

/// A sequential cell picked up during classification.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FlopCell {
    /// Library cell type, as written in the netlist.
    pub cell_type: String,
    /// Instance name.
    pub instance: String,
}

/// A combinational cell picked up during classification.
///
/// `kind` is resolved once here; `None` means the cell type matched a
/// gate family substring but no evaluation template, which only becomes
/// an error if simulation actually reaches the cell.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GateCell {
    /// Library cell type, as written in the netlist.
    pub cell_type: String,
    /// Instance name.
    pub instance: String,
    /// Evaluation template, if one resolved.
    pub kind: Option<GateKind>,
}

/// The result of classifying a whole design.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassifiedDesign {
    /// Name of the top module.
    pub top_name: String,
    /// Id of the top module within the design.
    pub top: ModuleId,
    /// Scan-equipped flip-flops, in declaration order.
    pub scan_flops: Vec<FlopCell>,
    /// Plain flip-flops, in declaration order.
    pub flipflops: Vec<FlopCell>,
    /// Combinational gates, in declaration order.
    pub gates: Vec<GateCell>,
}

impl ClassifiedDesign {
    /// The top module of `design`.
    pub fn top_module<'a>(&self, design: &'a Design) -> Option<&'a Module> {
        design.module(self.top)
    }
}

/// Classifies every instance of `design` and identifies its top module.
///
/// The top module is the unique module that is defined but never
/// instantiated. A design with no such module is rejected with
/// [`DftError::NoTopModule`]; a design with several is rejected with
/// [`DftError::AmbiguousTopModule`] rather than guessing.
pub fn classify_design(design: &Design) -> Result<ClassifiedDesign, DftError> {
    let tops = design.uninstantiated_modules();
    let top_name = match tops.as_slice() {
        [] => return Err(DftError::NoTopModule),
        [single] => (*single).to_owned(),
        many => {
            return Err(DftError::AmbiguousTopModule {
                candidates: many.iter().map(|m| (*m).to_owned()).collect(),
            })
        }
    };
    let top = design
        .module_id(&top_name)
        .ok_or(DftError::NoTopModule)?;

    let mut scan_flops = Vec::new();
    let mut flipflops = Vec::new();
    let mut gates = Vec::new();

    for module in &design.modules {
        for instance in &module.instances {
            match classify_cell_type(&instance.cell_type) {
                Some(CellClass::ScanFlipFlop) => scan_flops.push(FlopCell {
                    cell_type: instance.cell_type.clone(),
                    instance: instance.name.clone(),
                }),
                Some(CellClass::FlipFlop) => flipflops.push(FlopCell {
                    cell_type: instance.cell_type.clone(),
                    instance: instance.name.clone(),
                }),
                Some(CellClass::Gate(kind)) => gates.push(GateCell {
                    cell_type: instance.cell_type.clone(),
                    instance: instance.name.clone(),
                    kind,
                }),
                None => {}
            }
        }
    }

    Ok(ClassifiedDesign {
        top_name,
        top,
        scan_flops,
        flipflops,
        gates,
    })
}
