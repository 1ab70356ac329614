//! Error types for the synthesis crate.

use std::time::Duration;

use bombyx_ir::IrError;
use bombyx_net::Node;
use thiserror::Error;

/// Errors reported by pebble-schedule solving.
///
/// Both variants are recoverable from the caller's point of view: the
/// documented policy is to fall back to a heuristic strategy (Bennett or
/// in-place Bennett) rather than abort.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum SolveError {
    /// No schedule exists within the requested pebble limit.
    #[error("no pebbling schedule exists within a limit of {limit} pebbles")]
    Infeasible {
        /// The pebble limit that was requested.
        limit: u32,
    },

    /// The wall-clock budget ran out before a schedule was found.
    #[error("pebble solving exceeded its {budget:?} time budget")]
    Timeout {
        /// The budget that was exhausted.
        budget: Duration,
    },

    /// The game is too large for the bundled reference solver.
    #[error("reference pebble solver supports at most 64 gate nodes, got {num_gates}")]
    TooLarge {
        /// Number of gate nodes in the game.
        num_gates: usize,
    },
}

/// Errors that can occur during synthesis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// Error emitting gates onto the target circuit.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// A step referenced a node that was never assigned a qubit.
    #[error("node {0} has no qubit assignment")]
    UnmappedNode(Node),

    /// A node's fanin list does not match its declared function kind.
    #[error("node {node} expects {expected} fanins, found {found}")]
    FaninArity {
        /// The malformed node.
        node: Node,
        /// Fanins required by the node's kind.
        expected: usize,
        /// Fanins actually reported.
        found: usize,
    },

    /// A LUT node carries no truth table.
    #[error("node {0} is a LUT without a truth table")]
    MissingFunction(Node),

    /// The mapping strategy failed to produce a schedule.
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;
