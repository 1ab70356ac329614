//! Bombyx Logic Network Contract
//!
//! This crate defines the source side of reversible synthesis: the
//! [`LogicNetwork`] capability contract the synthesis engine consumes, the
//! node/edge vocabulary ([`Node`], [`Signal`], [`NodeKind`],
//! [`TruthTable`]) and one concrete [`Network`] implementation used by the
//! tests, benches and examples.
//!
//! The contract is read-only: synthesis never mutates a network, it only
//! enumerates inputs, gates (in topological order), fanins with edge
//! polarity and primary outputs.
//!
//! # Example
//!
//! ```rust
//! use bombyx_net::Network;
//!
//! let mut ntk = Network::new();
//! let a = ntk.add_pi();
//! let b = ntk.add_pi();
//! let g = ntk.add_and(a, b);
//! ntk.add_po(g);
//!
//! assert_eq!(ntk.simulate(&[true, true]), vec![true]);
//! ```

pub mod function;
pub mod network;
pub mod signal;
pub mod traits;

pub use function::{NodeKind, TruthTable};
pub use network::Network;
pub use signal::{Node, Signal};
pub use traits::LogicNetwork;
