//! Node function kinds and truth tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a node's Boolean function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Primary input.
    Input,
    /// Constant node.
    Constant,
    /// Two-input AND.
    And,
    /// Two-input OR.
    Or,
    /// Two-input XOR.
    Xor,
    /// Three-input XOR.
    Xor3,
    /// Three-input majority.
    Maj,
    /// Arbitrary small function given by a truth table.
    Lut,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Input => "input",
            NodeKind::Constant => "constant",
            NodeKind::And => "and",
            NodeKind::Or => "or",
            NodeKind::Xor => "xor",
            NodeKind::Xor3 => "xor3",
            NodeKind::Maj => "maj",
            NodeKind::Lut => "lut",
        };
        write!(f, "{name}")
    }
}

/// A bit-packed truth table over `num_vars` variables.
///
/// Bit `i` of the table is the function value on the assignment whose
/// variable `k` equals bit `k` of `i`. Unused high bits of the last word
/// are kept at zero so equality is plain word equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TruthTable {
    num_vars: u32,
    words: Vec<u64>,
}

impl TruthTable {
    /// The all-zero function over `num_vars` variables.
    pub fn new(num_vars: u32) -> Self {
        let num_words = if num_vars <= 6 {
            1
        } else {
            1 << (num_vars - 6)
        };
        Self {
            num_vars,
            words: vec![0; num_words],
        }
    }

    /// Build a table over at most six variables from its bit pattern.
    pub fn from_value(num_vars: u32, value: u64) -> Self {
        assert!(num_vars <= 6, "from_value supports at most 6 variables");
        let mask = if num_vars == 6 {
            u64::MAX
        } else {
            (1 << (1 << num_vars)) - 1
        };
        Self {
            num_vars,
            words: vec![value & mask],
        }
    }

    /// The parity (XOR of all inputs) function over `num_vars` variables.
    pub fn parity(num_vars: u32) -> Self {
        let mut tt = Self::new(num_vars);
        for i in 0..tt.num_bits() {
            if (i as u64).count_ones() % 2 == 1 {
                tt.set_bit(i);
            }
        }
        tt
    }

    /// Number of variables.
    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    /// Number of rows (bits) in the table.
    pub fn num_bits(&self) -> usize {
        1 << self.num_vars
    }

    /// The function value on row `index`.
    pub fn bit(&self, index: usize) -> bool {
        debug_assert!(index < self.num_bits());
        self.words[index >> 6] & (1 << (index & 63)) != 0
    }

    /// Set the function value on row `index` to true.
    pub fn set_bit(&mut self, index: usize) {
        debug_assert!(index < self.num_bits());
        self.words[index >> 6] |= 1 << (index & 63);
    }

    /// Evaluate the function on an assignment, one bool per variable.
    pub fn eval(&self, assignment: &[bool]) -> bool {
        debug_assert_eq!(assignment.len(), self.num_vars as usize);
        let mut index = 0_usize;
        for (k, &v) in assignment.iter().enumerate() {
            if v {
                index |= 1 << k;
            }
        }
        self.bit(index)
    }

    /// Whether this function is exactly the parity of all its inputs.
    pub fn is_parity(&self) -> bool {
        *self == Self::parity(self.num_vars)
    }
}
