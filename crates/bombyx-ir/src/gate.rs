//! Reversible gate types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::qubit::QubitId;

/// A reversible gate over a set of qubits.
///
/// The gate set is the classical reversible basis: NOT, controlled-NOT and
/// multi-controlled-NOT (Toffoli-class). Every gate is its own inverse, which
/// is what allows uncomputation by re-application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gate {
    /// Pauli-X (NOT) gate.
    X {
        /// The qubit to flip.
        target: QubitId,
    },
    /// Controlled-NOT gate.
    Cx {
        /// The control qubit.
        control: QubitId,
        /// The qubit flipped when the control is set.
        target: QubitId,
    },
    /// Multi-controlled-NOT (Toffoli-class) gate.
    Mcx {
        /// The control qubits; the target flips when all are set.
        controls: Vec<QubitId>,
        /// The target qubit.
        target: QubitId,
    },
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::X { .. } => "x",
            Gate::Cx { .. } => "cx",
            Gate::Mcx { .. } => "mcx",
        }
    }

    /// The target qubit of this gate.
    #[inline]
    pub fn target(&self) -> QubitId {
        match self {
            Gate::X { target } | Gate::Cx { target, .. } | Gate::Mcx { target, .. } => *target,
        }
    }

    /// The control qubits of this gate, in order.
    pub fn controls(&self) -> &[QubitId] {
        match self {
            Gate::X { .. } => &[],
            Gate::Cx { control, .. } => std::slice::from_ref(control),
            Gate::Mcx { controls, .. } => controls,
        }
    }

    /// Total number of qubits this gate acts on.
    pub fn num_qubits(&self) -> usize {
        self.controls().len() + 1
    }

    /// Iterate over all qubits this gate acts on, controls first.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.controls().iter().copied().chain(std::iter::once(self.target()))
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::X { target } => write!(f, "x {target}"),
            Gate::Cx { control, target } => write!(f, "cx {control}, {target}"),
            Gate::Mcx { controls, target } => {
                write!(f, "mcx ")?;
                for c in controls {
                    write!(f, "{c}, ")?;
                }
                write!(f, "{target}")
            }
        }
    }
}
