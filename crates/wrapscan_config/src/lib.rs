//! `scan.toml` configuration for the Wrapscan DFT toolkit.
//!
//! Loads and validates the tool-level knobs: which top-level ports are
//! excluded from boundary-cell synthesis, how many functional clock edges a
//! capture phase applies, the combinational propagation iteration cap, and
//! the net-naming scheme for scan chain serial connections. Every option has
//! a default, so library use without a configuration file is fully
//! supported via [`ScanConfig::default`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{CoreOptions, ScanConfig, ScanOptions};
