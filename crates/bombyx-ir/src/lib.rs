//! Bombyx Reversible Circuit Intermediate Representation
//!
//! This crate provides the target-side data structures for reversible
//! synthesis: qubits, the classical reversible gate set (NOT, CNOT,
//! multi-controlled NOT) and an append-only [`Circuit`] container.
//!
//! The gate set is deliberately closed: every gate is a classical
//! permutation of basis states and its own inverse, which is the property
//! the synthesis engine relies on to uncompute intermediate values by
//! re-applying the same gate sequence.
//!
//! # Example
//!
//! ```rust
//! use bombyx_ir::{Circuit, QubitId, sim};
//!
//! let mut circuit = Circuit::new("toffoli");
//! let a = circuit.add_qubit();
//! let b = circuit.add_qubit();
//! let t = circuit.add_qubit();
//! circuit.mcx([a, b], t).unwrap();
//!
//! // |110⟩ → |111⟩
//! assert_eq!(sim::simulate(&circuit, 0b011).unwrap(), 0b111);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod qubit;
pub mod sim;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use qubit::QubitId;
