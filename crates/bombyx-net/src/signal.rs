//! Nodes and fanin edges.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Not;

/// A node in a logic network, identified by its stable dense index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Node(pub u32);

impl Node {
    /// The dense index of this node.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl From<u32> for Node {
    fn from(id: u32) -> Self {
        Node(id)
    }
}

/// A reference to a node's value at a use site, with edge polarity.
///
/// The complement flag means the value is logically inverted at this use; it
/// never mutates the network, only the gate polarity the synthesis engine
/// picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signal {
    /// The source node.
    pub node: Node,
    /// Whether the value is inverted at this use site.
    pub complement: bool,
}

impl Signal {
    /// A positive (uncomplemented) reference to `node`.
    pub fn new(node: Node) -> Self {
        Self {
            node,
            complement: false,
        }
    }

    /// This signal with the opposite polarity.
    pub fn complemented(self) -> Self {
        Self {
            node: self.node,
            complement: !self.complement,
        }
    }
}

impl From<Node> for Signal {
    fn from(node: Node) -> Self {
        Signal::new(node)
    }
}

impl Not for Signal {
    type Output = Signal;

    fn not(self) -> Signal {
        self.complemented()
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.complement {
            write!(f, "!{}", self.node)
        } else {
            write!(f, "{}", self.node)
        }
    }
}
