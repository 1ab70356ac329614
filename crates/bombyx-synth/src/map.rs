//! Node-to-qubit assignment tracking.

use bombyx_ir::QubitId;
use bombyx_net::Node;
use rustc_hash::FxHashMap;

/// A growable map from network nodes to the qubit currently holding their
/// value.
///
/// Entries are created lazily as nodes are computed and overwritten on
/// in-place reuse or recomputation. Entries of already-uncomputed nodes are
/// never erased: such a node's value cannot be read again, so a stale entry
/// is harmless.
#[derive(Debug, Default)]
pub struct NodeToQubit {
    map: FxHashMap<Node, QubitId>,
}

impl NodeToQubit {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign (or reassign) the qubit holding `node`'s value.
    pub fn assign(&mut self, node: Node, qubit: QubitId) {
        self.map.insert(node, qubit);
    }

    /// The qubit currently assigned to `node`, if any.
    pub fn get(&self, node: Node) -> Option<QubitId> {
        self.map.get(&node).copied()
    }
}
