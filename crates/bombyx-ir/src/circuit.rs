//! High-level circuit builder API.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::qubit::QubitId;

/// A reversible circuit: a pool of qubits and an append-only gate list.
///
/// Qubit indices are handed out consecutively starting at zero. Gates are
/// stored in application order; there is no implicit reordering or
/// cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of allocated qubits.
    num_qubits: u32,
    /// Gates in application order.
    gates: Vec<Gate>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            gates: vec![],
        }
    }

    /// Create a circuit with a given number of qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            gates: vec![],
        }
    }

    /// Add a single qubit to the circuit, returning its index.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        id
    }

    /// Apply a NOT gate.
    pub fn x(&mut self, target: QubitId) -> IrResult<&mut Self> {
        self.check_qubit(target)?;
        self.gates.push(Gate::X { target });
        Ok(self)
    }

    /// Apply a controlled-NOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.check_qubit(control)?;
        self.check_qubit(target)?;
        if control == target {
            return Err(IrError::TargetIsControl {
                qubit: target,
                gate_name: "cx",
            });
        }
        self.gates.push(Gate::Cx { control, target });
        Ok(self)
    }

    /// Apply a multi-controlled-NOT gate.
    ///
    /// Degenerate control sets are normalized: zero controls become a plain
    /// NOT and a single control becomes a CNOT.
    pub fn mcx(
        &mut self,
        controls: impl IntoIterator<Item = QubitId>,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        let controls: Vec<QubitId> = controls.into_iter().collect();
        self.check_qubit(target)?;
        for (i, &c) in controls.iter().enumerate() {
            self.check_qubit(c)?;
            if c == target {
                return Err(IrError::TargetIsControl {
                    qubit: target,
                    gate_name: "mcx",
                });
            }
            if controls[..i].contains(&c) {
                return Err(IrError::DuplicateControl {
                    qubit: c,
                    gate_name: "mcx",
                });
            }
        }
        match controls.len() {
            0 => self.gates.push(Gate::X { target }),
            1 => self.gates.push(Gate::Cx {
                control: controls[0],
                target,
            }),
            _ => self.gates.push(Gate::Mcx { controls, target }),
        }
        Ok(self)
    }

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the number of gates.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// Get the gates in application order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    fn check_qubit(&self, qubit: QubitId) -> IrResult<()> {
        if qubit.0 >= self.num_qubits {
            return Err(IrError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_gates(), 0);
    }

    #[test]
    fn test_add_qubits() {
        let mut circuit = Circuit::new("test");
        assert_eq!(circuit.add_qubit(), QubitId(0));
        assert_eq!(circuit.add_qubit(), QubitId(1));
        assert_eq!(circuit.num_qubits(), 2);
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit
            .x(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .mcx([QubitId(0), QubitId(1)], QubitId(2))
            .unwrap();
        assert_eq!(circuit.num_gates(), 3);
    }

    #[test]
    fn test_mcx_normalization() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit.mcx([], QubitId(0)).unwrap();
        circuit.mcx([QubitId(0)], QubitId(1)).unwrap();
        assert!(matches!(circuit.gates()[0], Gate::X { .. }));
        assert!(matches!(circuit.gates()[1], Gate::Cx { .. }));
    }

    #[test]
    fn test_out_of_range() {
        let mut circuit = Circuit::with_size("test", 1);
        let err = circuit.cx(QubitId(0), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::QubitOutOfRange { .. }));
    }

    #[test]
    fn test_target_is_control() {
        let mut circuit = Circuit::with_size("test", 2);
        let err = circuit.mcx([QubitId(0), QubitId(1)], QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::TargetIsControl { .. }));
    }

    #[test]
    fn test_duplicate_control() {
        let mut circuit = Circuit::with_size("test", 3);
        let err = circuit
            .mcx([QubitId(0), QubitId(0)], QubitId(2))
            .unwrap_err();
        assert!(matches!(err, IrError::DuplicateControl { .. }));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut circuit = Circuit::with_size("rt", 3);
        circuit
            .mcx([QubitId(0), QubitId(1)], QubitId(2))
            .unwrap()
            .x(QubitId(2))
            .unwrap();
        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back.gates(), circuit.gates());
        assert_eq!(back.num_qubits(), 3);
    }
}
