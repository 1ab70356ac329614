//! Classical basis-state simulation.
//!
//! Every gate in the IR (NOT, CNOT, MCX) permutes computational basis
//! states, so a circuit can be evaluated exactly on a classical bit
//! assignment. This is the ground truth used by equivalence and
//! round-trip tests.

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::gate::Gate;

/// Maximum number of qubits representable in the `u64` state word.
pub const MAX_SIM_QUBITS: u32 = 64;

/// Run a circuit on a computational basis state.
///
/// Bit `i` of `input` is the initial value of qubit `i`; the returned word
/// holds the final value of every qubit in the same layout.
pub fn simulate(circuit: &Circuit, input: u64) -> IrResult<u64> {
    if circuit.num_qubits() > MAX_SIM_QUBITS {
        return Err(IrError::TooManyQubits {
            num_qubits: circuit.num_qubits(),
            max: MAX_SIM_QUBITS,
        });
    }

    let mut state = input;
    for gate in circuit.gates() {
        match gate {
            Gate::X { target } => {
                state ^= 1 << target.0;
            }
            Gate::Cx { control, target } => {
                if state & (1 << control.0) != 0 {
                    state ^= 1 << target.0;
                }
            }
            Gate::Mcx { controls, target } => {
                if controls.iter().all(|c| state & (1 << c.0) != 0) {
                    state ^= 1 << target.0;
                }
            }
        }
    }
    Ok(state)
}

/// Read one qubit out of a simulated state word.
#[inline]
pub fn bit(state: u64, qubit: crate::qubit::QubitId) -> bool {
    state & (1 << qubit.0) != 0
}
