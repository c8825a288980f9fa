//! Scan chain assembly.
//!
//! Two chain shapes are built from a classified design:
//!
//! - the **full chain** used by intest: input boundary cells, then scan
//!   flops, then plain flip-flops, then output boundary cells;
//! - the **boundary-only chain** used by extest: the wrapper boundary
//!   cells alone, input side first.
//!
//! Chain order is a contract. Every serial link is named after its
//! position, each element's scan-out net is the next element's scan-in
//! net, and shift/readout semantics downstream depend on this exact
//! ordering.

use serde::{Deserialize, Serialize};
use wrapscan_config::ScanOptions;

use crate::classify::ClassifiedDesign;
use crate::wbc::{WbcDirection, WrapperBoundaryCell};

/// What kind of cell occupies a chain position.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ChainCellKind {
    /// A synthesized wrapper boundary cell.
    Wbc {
        /// Which side of the core the cell guards.
        direction: WbcDirection,
        /// The guarded top-level signal.
        signal: String,
    },
    /// A scan-equipped flip-flop from the netlist.
    ScanFlop {
        /// Library cell type.
        cell_type: String,
    },
    /// A plain flip-flop stitched into the chain.
    Flop {
        /// Library cell type.
        cell_type: String,
    },
}

/// One stitched position of a scan chain.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ScanChainElement {
    /// What occupies this position.
    pub kind: ChainCellKind,
    /// Instance name of the occupying cell.
    pub instance: String,
    /// Serial input net feeding this position.
    pub si: String,
    /// Serial output net driven by this position.
    pub so: String,
}

/// An ordered scan chain.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ScanChain {
    /// Chain elements in shift order, position 0 nearest the scan input.
    pub elements: Vec<ScanChainElement>,
}

impl ScanChain {
    /// Number of cells in the chain, which is also the shift depth.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the chain has no cells.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn stitch(
    cells: impl IntoIterator<Item = (ChainCellKind, String)>,
    scan_in: &str,
    out_prefix: &str,
) -> ScanChain {
    let elements = cells
        .into_iter()
        .enumerate()
        .map(|(position, (kind, instance))| ScanChainElement {
            kind,
            instance,
            si: if position == 0 {
                scan_in.to_owned()
            } else {
                format!("{out_prefix}_{}", position - 1)
            },
            so: format!("{out_prefix}_{position}"),
        })
        .collect();
    ScanChain { elements }
}

fn wbc_cell(wbc: &WrapperBoundaryCell) -> (ChainCellKind, String) {
    (
        ChainCellKind::Wbc {
            direction: wbc.direction,
            signal: wbc.signal.clone(),
        },
        wbc.instance.clone(),
    )
}

/// Builds the full (intest) chain: input boundary cells, scan flops,
/// plain flip-flops, output boundary cells, stitched with the functional
/// scan net names from `options`.
pub fn build_full_chain(
    classified: &ClassifiedDesign,
    wbcs: &[WrapperBoundaryCell],
    options: &ScanOptions,
) -> ScanChain {
    let inputs = wbcs
        .iter()
        .filter(|w| w.direction == WbcDirection::Input)
        .map(wbc_cell);
    let outputs = wbcs
        .iter()
        .filter(|w| w.direction == WbcDirection::Output)
        .map(wbc_cell);
    let scan_flops = classified.scan_flops.iter().map(|f| {
        (
            ChainCellKind::ScanFlop {
                cell_type: f.cell_type.clone(),
            },
            f.instance.clone(),
        )
    });
    let flipflops = classified.flipflops.iter().map(|f| {
        (
            ChainCellKind::Flop {
                cell_type: f.cell_type.clone(),
            },
            f.instance.clone(),
        )
    });

    stitch(
        inputs.chain(scan_flops).chain(flipflops).chain(outputs),
        &options.scan_in,
        &options.scan_out_prefix,
    )
}

/// Builds the boundary-only (extest) chain over the wrapper boundary
/// cells, stitched with the extest scan net names from `options`.
pub fn build_boundary_chain(wbcs: &[WrapperBoundaryCell], options: &ScanOptions) -> ScanChain {
    stitch(
        wbcs.iter().map(wbc_cell),
        &options.extest_scan_in,
        &options.extest_scan_out_prefix,
    )
}
