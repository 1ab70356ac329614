//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index outside the circuit's allocated range.
    #[error("Qubit {qubit} out of range for circuit with {num_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits in the circuit.
        num_qubits: u32,
    },

    /// The same qubit appears twice in one gate's control set.
    #[error("Duplicate control {qubit} in {gate_name} gate")]
    DuplicateControl {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Name of the gate.
        gate_name: &'static str,
    },

    /// A gate's target also appears among its controls.
    #[error("Target {qubit} is also a control in {gate_name} gate")]
    TargetIsControl {
        /// The offending qubit.
        qubit: QubitId,
        /// Name of the gate.
        gate_name: &'static str,
    },

    /// Circuit too large for basis-state simulation.
    #[error("Circuit with {num_qubits} qubits exceeds the {max}-qubit simulation limit")]
    TooManyQubits {
        /// Number of qubits in the circuit.
        num_qubits: u32,
        /// Maximum supported by the simulator.
        max: u32,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
