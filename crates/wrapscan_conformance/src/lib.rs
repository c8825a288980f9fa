//! Conformance test helpers for the Wrapscan DFT pipeline.
//!
//! Provides the reference counter netlist and a [`ScanSetup`] that runs
//! the full pipeline (classify → synthesize boundary cells → build
//! chains → lower the simulation model), so integration tests can
//! assert on any stage without repeating the plumbing.

#![warn(missing_docs)]

use wrapscan_config::{load_config_from_str, ScanConfig};
use wrapscan_diagnostics::DiagnosticSink;
use wrapscan_dft::{
    build_boundary_chain, build_full_chain, classify_design, partition_cores, synthesize_wbcs,
    ClassifiedDesign, ScanChain, TestCore, WrapperBoundaryCell,
};
use wrapscan_netlist::{Design, Instance, Module, PortDecl};
use wrapscan_sim::{Evaluator, ExtestSim, ScanChainSim, SimModel};

/// Builds the reference netlist: a 4-bit synchronous counter mapped to
/// scan flops and elementary library gates.
///
/// Each bit's next state is `out[i] ^ carry`, built from OR/NAND/AND
/// triples so only elementary cell types appear; the carries are AND
/// chains off the low bits. `in[3:0]` is declared but unused, giving the
/// boundary four input cells that do not feed the logic.
pub fn counter_design() -> Design {
    let mut top = Module::new("simple_counter");
    top.inputs = vec![
        PortDecl::scalar("clk"),
        PortDecl::scalar("reset"),
        PortDecl::scalar("en"),
        PortDecl::vector("in", 3, 0),
    ];
    top.outputs = vec![PortDecl::vector("out", 3, 0)];

    let mut instances = Vec::new();
    for i in 0..4 {
        instances.push(
            Instance::new("SDFFRX1", format!("count_reg_{i}"))
                .connect("D", format!("n_{i}"))
                .connect("SE", "scan_en")
                .connect("SI", "scan_si")
                .connect("CK", "clk")
                .connect("RN", "rn")
                .connect("Q", format!("out[{i}]")),
        );
    }

    // Bit 0 toggles every cycle.
    instances.push(
        Instance::new("clkinvx1", "inv0")
            .connect("A", "out[0]")
            .connect("Y", "n_0"),
    );

    // out[i] ^ carry as (a | b) & !(a & b).
    let xor_bit = |i: usize, a: &str, b: &str, instances: &mut Vec<Instance>| {
        instances.push(
            Instance::new("or2x1", format!("xo_{i}"))
                .connect("A", a)
                .connect("B", b)
                .connect("Y", format!("o_{i}")),
        );
        instances.push(
            Instance::new("nand2x1", format!("xn_{i}"))
                .connect("A", a)
                .connect("B", b)
                .connect("Y", format!("u_{i}")),
        );
        instances.push(
            Instance::new("and2x1", format!("xa_{i}"))
                .connect("A", format!("o_{i}"))
                .connect("B", format!("u_{i}"))
                .connect("Y", format!("n_{i}")),
        );
    };

    xor_bit(1, "out[1]", "out[0]", &mut instances);
    instances.push(
        Instance::new("and2x1", "ca_01")
            .connect("A", "out[0]")
            .connect("B", "out[1]")
            .connect("Y", "c_01"),
    );
    xor_bit(2, "out[2]", "c_01", &mut instances);
    instances.push(
        Instance::new("and2x1", "ca_012")
            .connect("A", "c_01")
            .connect("B", "out[2]")
            .connect("Y", "c_012"),
    );
    xor_bit(3, "out[3]", "c_012", &mut instances);

    top.instances = instances;
    Design::from_modules(vec![top])
}

/// The fully built pipeline over one design.
pub struct ScanSetup {
    /// The input netlist.
    pub design: Design,
    /// Its classification.
    pub classified: ClassifiedDesign,
    /// Synthesized wrapper boundary cells.
    pub wbcs: Vec<WrapperBoundaryCell>,
    /// The active configuration.
    pub config: ScanConfig,
    /// Diagnostics accumulated while lowering the model.
    pub sink: DiagnosticSink,
}

impl ScanSetup {
    /// Runs the pipeline over `design` with a configuration parsed from
    /// `config_toml` (pass `""` for the defaults).
    pub fn build(design: Design, config_toml: &str) -> Self {
        let config = load_config_from_str(config_toml).expect("conformance config must be valid");
        let classified = classify_design(&design).expect("fixture must have a unique top");
        let wbcs = synthesize_wbcs(
            classified
                .top_module(&design)
                .expect("top module must exist"),
            &config.scan.excluded_ports,
        );
        Self {
            design,
            classified,
            wbcs,
            config,
            sink: DiagnosticSink::new(),
        }
    }

    /// Pipeline over the counter netlist with default configuration.
    pub fn counter() -> Self {
        Self::build(counter_design(), "")
    }

    /// The full (intest) chain.
    pub fn full_chain(&self) -> ScanChain {
        build_full_chain(&self.classified, &self.wbcs, &self.config.scan)
    }

    /// The boundary-only (extest) chain.
    pub fn boundary_chain(&self) -> ScanChain {
        build_boundary_chain(&self.wbcs, &self.config.scan)
    }

    /// A fresh evaluator over the lowered model.
    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new(SimModel::build(&self.design, &self.classified, &self.sink))
    }

    /// A ready-to-run full-chain protocol simulator.
    pub fn intest(&self) -> ScanChainSim {
        ScanChainSim::new(&self.full_chain(), self.evaluator(), &self.config.scan)
    }

    /// The per-core ownership report under the configured peripheral
    /// prefixes: the main core first, then one core per prefix.
    pub fn cores(&self) -> Vec<TestCore> {
        partition_cores(&self.classified, &self.wbcs, &self.config.cores)
    }

    /// A ready-to-run boundary protocol simulator with one evaluator per
    /// peripheral core. Peripheral cores that claim no instances of
    /// their own (as [`cores`](Self::cores) reports for the counter)
    /// run the shared core logic.
    pub fn extest(&self) -> ExtestSim {
        let bits = self
            .classified
            .top_module(&self.design)
            .expect("top module must exist")
            .bit_index_table();
        ExtestSim::new(
            &self.boundary_chain(),
            self.evaluator(),
            self.evaluator(),
            bits,
            &self.config.scan,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_classifies_cleanly() {
        let setup = ScanSetup::counter();
        assert_eq!(setup.classified.top_name, "simple_counter");
        assert_eq!(setup.classified.scan_flops.len(), 4);
        assert_eq!(setup.classified.flipflops.len(), 0);
        assert_eq!(setup.classified.gates.len(), 12);
        assert_eq!(setup.wbcs.len(), 8);
    }

    #[test]
    fn counter_model_lowers_without_warnings() {
        let setup = ScanSetup::counter();
        let _ = setup.evaluator();
        assert_eq!(setup.sink.warning_count(), 0);
        assert!(!setup.sink.has_errors());
    }

    #[test]
    fn counter_cores_put_everything_on_the_main_core() {
        let setup = ScanSetup::counter();
        let cores = setup.cores();
        assert_eq!(cores.len(), 3);
        assert_eq!(cores[0].name, wrapscan_dft::MAIN_CORE);
        assert_eq!(cores[0].scan_flops.len(), 4);
        assert_eq!(cores[0].gates.len(), 12);
        assert_eq!(cores[0].wbc_cells.len(), 8);
        // No prefixed instances, so both extest evaluators run the
        // shared counter logic.
        for core in &cores[1..] {
            assert!(core.scan_flops.is_empty());
            assert!(core.flipflops.is_empty());
            assert!(core.gates.is_empty());
            assert!(core.wbc_cells.is_empty());
        }
    }

    #[test]
    fn custom_config_applies() {
        let setup = ScanSetup::build(counter_design(), "[scan]\ncapture_cycles = 1\n");
        assert_eq!(setup.config.scan.capture_cycles, 1);
    }
}
