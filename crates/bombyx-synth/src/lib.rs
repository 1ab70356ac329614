//! Hierarchical reversible synthesis of logic networks.
//!
//! Turns a combinational logic network ([`bombyx_net::LogicNetwork`]) into
//! a reversible circuit ([`bombyx_ir::Circuit`]) in two stages. A
//! [`MappingStrategy`] first decides *when* each node is computed into a
//! scratch qubit and when it is uncomputed back to |0⟩; the engine then
//! replays that schedule, emitting a fixed self-inverse gate template per
//! node kind and delegating opaque LUT functions to a
//! [`SingleTargetSynthesis`] routine.
//!
//! Three strategies are provided: [`BennettStrategy`] (compute everything,
//! uncompute in reverse), [`BennettInPlaceStrategy`] (additionally reuses
//! dying qubits for parity nodes) and [`PebblingStrategy`] (solves a
//! reversible pebble game under an explicit ancilla bound).
//!
//! ```
//! use bombyx_ir::Circuit;
//! use bombyx_net::Network;
//! use bombyx_synth::{synthesize, BennettStrategy, PprmSynthesis, SynthesisParams};
//!
//! let mut ntk = Network::new();
//! let a = ntk.add_pi();
//! let b = ntk.add_pi();
//! let g = ntk.add_and(a, b);
//! ntk.add_po(g);
//!
//! let mut circuit = Circuit::new("and");
//! let mut strategy = BennettStrategy::new(&ntk);
//! let stats = synthesize(
//!     &mut circuit,
//!     &ntk,
//!     &PprmSynthesis,
//!     &mut strategy,
//!     &SynthesisParams::default(),
//! )?;
//! assert_eq!(stats.required_ancillae, 1);
//! # Ok::<(), bombyx_synth::SynthError>(())
//! ```

pub mod action;
pub mod ancilla;
pub mod decompose;
pub mod engine;
pub mod error;
mod map;
pub mod stg;
pub mod strategy;

pub use action::{MappingAction, Step};
pub use ancilla::AncillaPool;
pub use engine::{synthesize, SynthesisParams, SynthesisStats};
pub use error::{SolveError, SynthError, SynthResult};
pub use stg::{PprmSynthesis, SingleTargetSynthesis};
pub use strategy::{
    BennettInPlaceStrategy, BennettStrategy, IterativePebbleSolver, MappingStrategy,
    PebbleEvent, PebbleGame, PebbleSolver, PebblingStrategy,
};
