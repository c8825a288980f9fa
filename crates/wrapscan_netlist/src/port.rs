//! Port declarations with optional bit-vector ranges.

use serde::{Deserialize, Serialize};

/// The declared bit range of a vector port, e.g. `[3:0]` or `[0:3]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BitRange {
    /// The most-significant-bit index as written in the declaration.
    pub msb: u32,
    /// The least-significant-bit index as written in the declaration.
    pub lsb: u32,
}

impl BitRange {
    /// Enumerates the bit indices in declaration order.
    ///
    /// When `msb >= lsb` the range descends (`[3:0]` yields 3, 2, 1, 0);
    /// otherwise it ascends. Direction is inferred from the index
    /// magnitudes, matching how netlist writers emit ranges.
    pub fn indices(&self) -> Vec<u32> {
        if self.msb >= self.lsb {
            (self.lsb..=self.msb).rev().collect()
        } else {
            (self.msb..=self.lsb).collect()
        }
    }

    /// The number of bits in this range.
    pub fn width(&self) -> u32 {
        self.msb.abs_diff(self.lsb) + 1
    }
}

/// A declared input or output port of a module.
///
/// Vector ports expand to one signal name per bit (`out` with range `[3:0]`
/// becomes `out3`, `out2`, `out1`, `out0`); scalar ports expand to their own
/// name.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PortDecl {
    /// The base signal name.
    pub name: String,
    /// The bit range, or `None` for a scalar port.
    pub range: Option<BitRange>,
}

impl PortDecl {
    /// Creates a scalar port declaration.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            range: None,
        }
    }

    /// Creates a vector port declaration with the given `[msb:lsb]` range.
    pub fn vector(name: impl Into<String>, msb: u32, lsb: u32) -> Self {
        Self {
            name: name.into(),
            range: Some(BitRange { msb, lsb }),
        }
    }

    /// Expands this declaration to one signal name per bit, in declaration
    /// order.
    pub fn expand(&self) -> Vec<String> {
        match &self.range {
            None => vec![self.name.clone()],
            Some(range) => range
                .indices()
                .into_iter()
                .map(|i| format!("{}{}", self.name, i))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descending_range() {
        let r = BitRange { msb: 3, lsb: 0 };
        assert_eq!(r.indices(), vec![3, 2, 1, 0]);
        assert_eq!(r.width(), 4);
    }

    #[test]
    fn ascending_range() {
        let r = BitRange { msb: 0, lsb: 3 };
        assert_eq!(r.indices(), vec![0, 1, 2, 3]);
        assert_eq!(r.width(), 4);
    }

    #[test]
    fn single_bit_range() {
        let r = BitRange { msb: 2, lsb: 2 };
        assert_eq!(r.indices(), vec![2]);
        assert_eq!(r.width(), 1);
    }

    #[test]
    fn scalar_expansion() {
        assert_eq!(PortDecl::scalar("clk").expand(), vec!["clk"]);
    }

    #[test]
    fn vector_expansion_msb_first() {
        assert_eq!(
            PortDecl::vector("out", 3, 0).expand(),
            vec!["out3", "out2", "out1", "out0"]
        );
    }

    #[test]
    fn vector_expansion_lsb_first() {
        assert_eq!(
            PortDecl::vector("in", 0, 2).expand(),
            vec!["in0", "in1", "in2"]
        );
    }
}
