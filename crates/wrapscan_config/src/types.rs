//! Configuration types deserialized from `scan.toml`.

use serde::Deserialize;

/// The top-level configuration parsed from `scan.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct ScanConfig {
    /// Scan chain and simulation settings.
    #[serde(default)]
    pub scan: ScanOptions,
    /// Multi-core (extest) partitioning settings.
    #[serde(default)]
    pub cores: CoreOptions,
}

/// Scan chain construction and capture simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanOptions {
    /// Top-level port names that never receive a wrapper boundary cell.
    #[serde(default = "default_excluded_ports")]
    pub excluded_ports: Vec<String>,
    /// Number of functional clock edges applied during a capture phase.
    #[serde(default = "default_capture_cycles")]
    pub capture_cycles: u32,
    /// Iteration cap for combinational fixed-point propagation. One
    /// iteration models one gate delay, so this bounds the longest
    /// combinational path the evaluator will settle.
    #[serde(default = "default_max_propagation_iterations")]
    pub max_propagation_iterations: u32,
    /// Net name of the full chain's primary scan input.
    #[serde(default = "default_scan_in")]
    pub scan_in: String,
    /// Prefix for full-chain serial nets (`<prefix>_<position>`).
    #[serde(default = "default_scan_out_prefix")]
    pub scan_out_prefix: String,
    /// Net name of the boundary-only chain's primary scan input.
    #[serde(default = "default_extest_scan_in")]
    pub extest_scan_in: String,
    /// Prefix for boundary-only serial nets (`<prefix>_<position>`).
    #[serde(default = "default_extest_scan_out_prefix")]
    pub extest_scan_out_prefix: String,
}

/// Multi-core partitioning settings for extest mode.
#[derive(Debug, Clone, Deserialize)]
pub struct CoreOptions {
    /// Instance-name prefixes for the peripheral cores, in order. The main
    /// core carries no prefix and owns the boundary cells.
    #[serde(default = "default_peripheral_prefixes")]
    pub peripheral_prefixes: Vec<String>,
}

fn default_excluded_ports() -> Vec<String> {
    vec!["clk".to_string(), "reset".to_string(), "en".to_string()]
}

fn default_capture_cycles() -> u32 {
    2
}

fn default_max_propagation_iterations() -> u32 {
    10
}

fn default_scan_in() -> String {
    "scan_in".to_string()
}

fn default_scan_out_prefix() -> String {
    "scan_out".to_string()
}

fn default_extest_scan_in() -> String {
    "extest_scan_in".to_string()
}

fn default_extest_scan_out_prefix() -> String {
    "extest_scan_out".to_string()
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            excluded_ports: default_excluded_ports(),
            capture_cycles: default_capture_cycles(),
            max_propagation_iterations: default_max_propagation_iterations(),
            scan_in: default_scan_in(),
            scan_out_prefix: default_scan_out_prefix(),
            extest_scan_in: default_extest_scan_in(),
            extest_scan_out_prefix: default_extest_scan_out_prefix(),
        }
    }
}

impl Default for CoreOptions {
    fn default() -> Self {
        Self {
            peripheral_prefixes: default_peripheral_prefixes(),
        }
    }
}

fn default_peripheral_prefixes() -> Vec<String> {
    vec!["left".to_string(), "right".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.scan.excluded_ports, vec!["clk", "reset", "en"]);
        assert_eq!(config.scan.capture_cycles, 2);
        assert_eq!(config.scan.max_propagation_iterations, 10);
        assert_eq!(config.scan.scan_in, "scan_in");
        assert_eq!(config.cores.peripheral_prefixes, vec!["left", "right"]);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config: ScanConfig = toml::from_str(
            r#"
[scan]
capture_cycles = 1
"#,
        )
        .unwrap();
        assert_eq!(config.scan.capture_cycles, 1);
        assert_eq!(config.scan.max_propagation_iterations, 10);
        assert_eq!(config.scan.excluded_ports, vec!["clk", "reset", "en"]);
    }
}
