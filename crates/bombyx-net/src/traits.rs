//! The read-only capability contract a logic network must satisfy to be
//! synthesized.
//!
//! The synthesis engine and the mapping strategies are generic over this
//! trait, so AND-inverter graphs, majority-inverter graphs and k-LUT
//! networks all share one algorithm; per-primitive decompositions are
//! selected by [`kind`](LogicNetwork::kind), not by the network's static
//! type.

use crate::function::{NodeKind, TruthTable};
use crate::signal::{Node, Signal};

/// Read-only view of a combinational logic network.
///
/// Nodes are identified by stable dense indices (`Node::index()` is below
/// [`num_nodes`](LogicNetwork::num_nodes)); implementations are free to
/// leave gaps in the index space as long as indices stay stable.
pub trait LogicNetwork {
    /// Upper bound (exclusive) on node indices.
    fn num_nodes(&self) -> usize;

    /// Number of primary inputs.
    fn num_pis(&self) -> usize;

    /// Primary inputs, in stable input order.
    fn pis(&self) -> Vec<Node>;

    /// All non-input, non-constant nodes in a valid topological order.
    fn gates(&self) -> Vec<Node>;

    /// Primary output signals, in output order.
    fn pos(&self) -> &[Signal];

    /// The signal representing a constant value.
    fn constant(&self, value: bool) -> Signal;

    /// The value of a constant node (before any edge complementation).
    fn constant_value(&self, node: Node) -> bool;

    /// Classification of a node's function.
    fn kind(&self, node: Node) -> NodeKind;

    /// Truth table of a [`NodeKind::Lut`] node, `None` otherwise.
    fn node_function(&self, node: Node) -> Option<&TruthTable>;

    /// Ordered fanin list with per-edge complement flags.
    fn fanins(&self, node: Node) -> &[Signal];

    /// Number of use sites of a node, primary-output references included.
    fn fanout_size(&self, node: Node) -> u32;

    /// Whether a node is a primary input.
    fn is_pi(&self, node: Node) -> bool {
        self.kind(node) == NodeKind::Input
    }

    /// Whether a node is a constant.
    fn is_constant(&self, node: Node) -> bool {
        self.kind(node) == NodeKind::Constant
    }
}
