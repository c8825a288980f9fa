//! Cell families and their positional port-role tables.
//!
//! When an instance connection carries no port name, the role is resolved by
//! position against the family's ordered role list. The tables are data,
//! not inline conditionals, so new cell families are additive.

use serde::{Deserialize, Serialize};

/// Positional port roles for scan flip-flop cells.
pub const SCAN_FLOP_ROLES: &[&str] = &["d", "se", "si", "ck", "rn", "q", "qn"];

/// Positional port roles for plain flip-flop cells.
pub const FLOP_ROLES: &[&str] = &["d", "ck", "rn", "q", "qn"];

/// A sequential cell family with a known positional port convention.
///
/// Combinational gates have no positional convention in this model; their
/// connections must be named.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum CellFamily {
    /// Scan flip-flops (`sdff*`).
    ScanFlop,
    /// Plain flip-flops (`dff*`).
    Flop,
}

impl CellFamily {
    /// Determines the family of a cell type by case-insensitive substring
    /// match. `sdff` is tested before `dff` since every scan flop name also
    /// contains `dff`.
    pub fn of(cell_type: &str) -> Option<Self> {
        let lower = cell_type.to_ascii_lowercase();
        if lower.contains("sdff") {
            Some(CellFamily::ScanFlop)
        } else if lower.contains("dff") {
            Some(CellFamily::Flop)
        } else {
            None
        }
    }

    /// The ordered positional port roles for this family.
    pub fn port_roles(self) -> &'static [&'static str] {
        match self {
            CellFamily::ScanFlop => SCAN_FLOP_ROLES,
            CellFamily::Flop => FLOP_ROLES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_flop_takes_precedence() {
        assert_eq!(CellFamily::of("SDFFRX1"), Some(CellFamily::ScanFlop));
        assert_eq!(CellFamily::of("sdffrhqx1"), Some(CellFamily::ScanFlop));
        assert_eq!(CellFamily::of("DFFRX1"), Some(CellFamily::Flop));
    }

    #[test]
    fn combinational_cells_have_no_family() {
        assert_eq!(CellFamily::of("nand2x1"), None);
        assert_eq!(CellFamily::of("clkinvx1"), None);
    }

    #[test]
    fn role_tables() {
        assert_eq!(
            CellFamily::ScanFlop.port_roles(),
            &["d", "se", "si", "ck", "rn", "q", "qn"]
        );
        assert_eq!(CellFamily::Flop.port_roles(), &["d", "ck", "rn", "q", "qn"]);
    }
}
