//! Multi-core partitioning for extest mode.
//!
//! Extest exercises the wiring *between* cores, so the classified cells
//! are split into a main core, which owns the wrapper boundary cells,
//! and peripheral cores selected by instance-name prefix. A peripheral
//! prefix `left` claims every instance named `left_*`; whatever no
//! prefix claims belongs to the main core.
//!
//! The partition is the ownership report consulted when staging an
//! extest run: the protocol driver itself takes already-lowered
//! evaluators, and a peripheral core that claims no instances of its
//! own runs the shared core logic.

use serde::{Deserialize, Serialize};
use wrapscan_config::CoreOptions;

use crate::classify::{ClassifiedDesign, FlopCell, GateCell};
use crate::wbc::WrapperBoundaryCell;

/// Name of the core that owns the wrapper boundary cells.
pub const MAIN_CORE: &str = "main";

/// One core's share of the classified design.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TestCore {
    /// Core name: [`MAIN_CORE`] or a peripheral prefix.
    pub name: String,
    /// `true` only for the main core.
    pub has_wbcs: bool,
    /// Scan flops claimed by this core, in declaration order.
    pub scan_flops: Vec<FlopCell>,
    /// Plain flip-flops claimed by this core, in declaration order.
    pub flipflops: Vec<FlopCell>,
    /// Gates claimed by this core, in declaration order.
    pub gates: Vec<GateCell>,
    /// Wrapper boundary cells, empty on peripheral cores.
    pub wbc_cells: Vec<WrapperBoundaryCell>,
}

fn prefix_of<'a>(instance: &str, prefixes: &'a [String]) -> Option<&'a str> {
    prefixes
        .iter()
        .map(String::as_str)
        .find(|p| instance.starts_with(&format!("{p}_")))
}

/// Splits `classified` into the main core plus one core per peripheral
/// prefix in `options`, in configuration order. The main core comes
/// first and carries `wbcs`; prefixes that claim no instances still get
/// an (empty) core so indexing by configuration position stays valid.
pub fn partition_cores(
    classified: &ClassifiedDesign,
    wbcs: &[WrapperBoundaryCell],
    options: &CoreOptions,
) -> Vec<TestCore> {
    let prefixes = &options.peripheral_prefixes;
    let mut cores: Vec<TestCore> = std::iter::once(MAIN_CORE)
        .chain(prefixes.iter().map(String::as_str))
        .map(|name| TestCore {
            name: name.to_owned(),
            ..TestCore::default()
        })
        .collect();
    cores[0].has_wbcs = true;
    cores[0].wbc_cells = wbcs.to_vec();

    let slot = |instance: &str| match prefix_of(instance, prefixes) {
        Some(p) => 1 + prefixes.iter().position(|q| q == p).unwrap_or(0),
        None => 0,
    };

    for f in &classified.scan_flops {
        cores[slot(&f.instance)].scan_flops.push(f.clone());
    }
    for f in &classified.flipflops {
        cores[slot(&f.instance)].flipflops.push(f.clone());
    }
    for g in &classified.gates {
        cores[slot(&g.instance)].gates.push(g.clone());
    }
    cores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_design;
    use wrapscan_netlist::{Design, Instance, Module, PortDecl};

    fn three_core_design() -> Design {
        let mut top = Module::new("top");
        top.inputs = vec![PortDecl::scalar("clk")];
        top.outputs = vec![PortDecl::scalar("q")];
        top.instances = vec![
            Instance::new("SDFFRX1", "sr0"),
            Instance::new("SDFFRX1", "left_sr0"),
            Instance::new("DFFRX1", "right_r0"),
            Instance::new("nand2x1", "left_g0"),
            Instance::new("nand2x1", "g0"),
        ];
        Design::from_modules(vec![top])
    }

    #[test]
    fn prefixes_claim_their_instances() {
        let design = three_core_design();
        let classified = classify_design(&design).unwrap();
        let cores = partition_cores(&classified, &[], &CoreOptions::default());

        assert_eq!(cores.len(), 3);
        assert_eq!(cores[0].name, MAIN_CORE);
        assert_eq!(cores[1].name, "left");
        assert_eq!(cores[2].name, "right");

        assert_eq!(cores[0].scan_flops[0].instance, "sr0");
        assert_eq!(cores[0].gates[0].instance, "g0");
        assert_eq!(cores[1].scan_flops[0].instance, "left_sr0");
        assert_eq!(cores[1].gates[0].instance, "left_g0");
        assert_eq!(cores[2].flipflops[0].instance, "right_r0");
    }

    #[test]
    fn only_main_core_has_wbcs() {
        let design = three_core_design();
        let classified = classify_design(&design).unwrap();
        let cores = partition_cores(&classified, &[], &CoreOptions::default());
        assert!(cores[0].has_wbcs);
        assert!(!cores[1].has_wbcs);
        assert!(!cores[2].has_wbcs);
    }

    #[test]
    fn prefix_requires_separator() {
        // `leftover` is not claimed by the `left` prefix.
        let mut top = Module::new("top");
        top.inputs = vec![PortDecl::scalar("clk")];
        top.outputs = vec![PortDecl::scalar("q")];
        top.instances = vec![Instance::new("DFFRX1", "leftover_r0")];
        let design = Design::from_modules(vec![top]);
        let classified = classify_design(&design).unwrap();
        let cores = partition_cores(&classified, &[], &CoreOptions::default());
        assert_eq!(cores[0].flipflops.len(), 1);
        assert!(cores[1].flipflops.is_empty());
    }
}
