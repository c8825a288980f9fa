//! Two-state logic values with Boolean operators.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// A single two-state logic value.
///
/// The scan simulator is a two-state, zero-delay engine: every net carries
/// either `Zero` or `One`. There is no X/Z modeling; undriven nets read as
/// [`Bit::Zero`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Bit {
    /// Logic low (0).
    #[default]
    Zero = 0,
    /// Logic high (1).
    One = 1,
}

impl Bit {
    /// Converts a character to a [`Bit`] value. Accepts `'0'` and `'1'`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }

    /// Returns the character rendering of this bit (`'0'` or `'1'`).
    pub fn to_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    /// Converts a boolean to a bit (`true` is [`Bit::One`]).
    pub fn from_bool(b: bool) -> Self {
        if b {
            Bit::One
        } else {
            Bit::Zero
        }
    }

    /// Returns `true` if this bit is [`Bit::One`].
    pub fn is_one(self) -> bool {
        self == Bit::One
    }

    /// Returns the numeric value of this bit (0 or 1).
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl BitAnd for Bit {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Bit::from_bool(self.is_one() && rhs.is_one())
    }
}

impl BitOr for Bit {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Bit::from_bool(self.is_one() || rhs.is_one())
    }
}

impl BitXor for Bit {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Bit::from_bool(self != rhs)
    }
}

impl Not for Bit {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        Bit::from_bool(b)
    }
}
