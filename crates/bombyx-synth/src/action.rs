//! Mapping actions and scheduling steps.

use std::fmt;

use bombyx_net::Node;

/// What the synthesis engine should do with a node at one point in the
/// schedule.
///
/// A node appears at most once with a compute-class action and at most once
/// with the matching uncompute-class action per compute; a node driving a
/// primary output is never uncomputed. Uncomputation re-applies the node's
/// own (self-inverse) gate sequence, so its fanin values must still be live
/// when the uncompute step runs — strategies are responsible for that
/// ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingAction {
    /// Allocate a fresh ancilla and compute the node's function into it.
    Compute,
    /// Re-apply the node's function on its assigned qubit, driving it back
    /// to |0⟩, then release the qubit.
    Uncompute,
    /// Compute the node's function directly over the qubit currently
    /// holding `target`'s (dead) value. Only valid for XOR/XOR3.
    ComputeInPlace {
        /// The node whose qubit is overwritten.
        target: Node,
    },
    /// Restore the overwritten qubit to `target`'s original value.
    UncomputeInPlace {
        /// The node whose value is restored.
        target: Node,
    },
}

impl MappingAction {
    /// Whether this is a compute-class action.
    pub fn is_compute(&self) -> bool {
        matches!(
            self,
            MappingAction::Compute | MappingAction::ComputeInPlace { .. }
        )
    }

    /// Whether this is an uncompute-class action.
    pub fn is_uncompute(&self) -> bool {
        !self.is_compute()
    }
}

/// One entry of a strategy's step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// The node being acted on.
    pub node: Node,
    /// The action to take.
    pub action: MappingAction,
}

impl Step {
    /// Convenience constructor.
    pub fn new(node: Node, action: MappingAction) -> Self {
        Self { node, action }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            MappingAction::Compute => write!(f, "compute {}", self.node),
            MappingAction::Uncompute => write!(f, "uncompute {}", self.node),
            MappingAction::ComputeInPlace { target } => {
                write!(f, "compute {} in place over {target}", self.node)
            }
            MappingAction::UncomputeInPlace { target } => {
                write!(f, "uncompute {} in place over {target}", self.node)
            }
        }
    }
}
