//! A concrete arena-based logic network.

use crate::function::{NodeKind, TruthTable};
use crate::signal::{Node, Signal};
use crate::traits::LogicNetwork;

#[derive(Debug, Clone)]
struct NetNode {
    kind: NodeKind,
    fanins: Vec<Signal>,
    fanout: u32,
    function: Option<TruthTable>,
}

/// A heterogeneous logic network over AND, OR, XOR, XOR3, MAJ and LUT
/// primitives.
///
/// Nodes live in an arena; node 0 is the single constant-false node and
/// constant-true is its complemented signal. Gates can only reference
/// already-created nodes, so arena order is a topological order.
#[derive(Debug, Clone)]
pub struct Network {
    nodes: Vec<NetNode>,
    pis: Vec<Node>,
    pos: Vec<Signal>,
}

impl Network {
    /// Create an empty network holding only the constant node.
    pub fn new() -> Self {
        Self {
            nodes: vec![NetNode {
                kind: NodeKind::Constant,
                fanins: vec![],
                fanout: 0,
                function: None,
            }],
            pis: vec![],
            pos: vec![],
        }
    }

    /// Add a primary input.
    pub fn add_pi(&mut self) -> Signal {
        let node = self.push_node(NodeKind::Input, vec![], None);
        self.pis.push(node);
        Signal::new(node)
    }

    /// Add a two-input AND gate.
    pub fn add_and(&mut self, a: Signal, b: Signal) -> Signal {
        Signal::new(self.push_node(NodeKind::And, vec![a, b], None))
    }

    /// Add a two-input OR gate.
    pub fn add_or(&mut self, a: Signal, b: Signal) -> Signal {
        Signal::new(self.push_node(NodeKind::Or, vec![a, b], None))
    }

    /// Add a two-input XOR gate.
    pub fn add_xor(&mut self, a: Signal, b: Signal) -> Signal {
        Signal::new(self.push_node(NodeKind::Xor, vec![a, b], None))
    }

    /// Add a three-input XOR gate.
    ///
    /// A constant fanin, if any, is rotated into slot 0: the decomposition
    /// inspects that slot when degenerating to the two-input case.
    pub fn add_xor3(&mut self, a: Signal, b: Signal, c: Signal) -> Signal {
        let fanins = self.normalize_constant_first(vec![a, b, c]);
        Signal::new(self.push_node(NodeKind::Xor3, fanins, None))
    }

    /// Add a three-input majority gate.
    ///
    /// A constant fanin, if any, is rotated into slot 0: the decomposition
    /// inspects that slot when folding to AND or OR.
    pub fn add_maj(&mut self, a: Signal, b: Signal, c: Signal) -> Signal {
        let fanins = self.normalize_constant_first(vec![a, b, c]);
        Signal::new(self.push_node(NodeKind::Maj, fanins, None))
    }

    /// Add a LUT node computing `function` over `fanins`.
    ///
    /// Complemented fanin edges are honored; networks imported from k-LUT
    /// formats usually fold inversions into the table instead.
    pub fn add_lut(&mut self, fanins: Vec<Signal>, function: TruthTable) -> Signal {
        debug_assert_eq!(function.num_vars() as usize, fanins.len());
        Signal::new(self.push_node(NodeKind::Lut, fanins, Some(function)))
    }

    /// Register a primary output.
    pub fn add_po(&mut self, signal: Signal) {
        self.nodes[signal.node.index()].fanout += 1;
        self.pos.push(signal);
    }

    /// Evaluate every primary output on an input assignment, output-edge
    /// complement applied. One bool per primary input, in input order.
    pub fn simulate(&self, inputs: &[bool]) -> Vec<bool> {
        debug_assert_eq!(inputs.len(), self.pis.len());
        let mut values = vec![false; self.nodes.len()];
        for (pi, &v) in self.pis.iter().zip(inputs) {
            values[pi.index()] = v;
        }
        let value = |values: &[bool], s: &Signal| values[s.node.index()] ^ s.complement;
        for n in self.gates() {
            let f = &self.nodes[n.index()].fanins;
            values[n.index()] = match self.nodes[n.index()].kind {
                NodeKind::And => value(&values, &f[0]) & value(&values, &f[1]),
                NodeKind::Or => value(&values, &f[0]) | value(&values, &f[1]),
                NodeKind::Xor => value(&values, &f[0]) ^ value(&values, &f[1]),
                NodeKind::Xor3 => {
                    value(&values, &f[0]) ^ value(&values, &f[1]) ^ value(&values, &f[2])
                }
                NodeKind::Maj => {
                    let (a, b, c) = (
                        value(&values, &f[0]),
                        value(&values, &f[1]),
                        value(&values, &f[2]),
                    );
                    (a & b) | (a & c) | (b & c)
                }
                NodeKind::Lut => {
                    let assignment: Vec<bool> = f.iter().map(|s| value(&values, s)).collect();
                    self.nodes[n.index()]
                        .function
                        .as_ref()
                        .expect("LUT node without function")
                        .eval(&assignment)
                }
                NodeKind::Input | NodeKind::Constant => unreachable!(),
            };
        }
        self.pos.iter().map(|s| value(&values, s)).collect()
    }

    fn push_node(
        &mut self,
        kind: NodeKind,
        fanins: Vec<Signal>,
        function: Option<TruthTable>,
    ) -> Node {
        for f in &fanins {
            self.nodes[f.node.index()].fanout += 1;
        }
        let node = Node(u32::try_from(self.nodes.len()).expect("node index overflow"));
        self.nodes.push(NetNode {
            kind,
            fanins,
            fanout: 0,
            function,
        });
        node
    }

    fn normalize_constant_first(&self, mut fanins: Vec<Signal>) -> Vec<Signal> {
        if let Some(i) = fanins
            .iter()
            .position(|f| self.nodes[f.node.index()].kind == NodeKind::Constant)
        {
            fanins.swap(0, i);
        }
        fanins
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl LogicNetwork for Network {
    fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn num_pis(&self) -> usize {
        self.pis.len()
    }

    fn pis(&self) -> Vec<Node> {
        self.pis.clone()
    }

    fn gates(&self) -> Vec<Node> {
        (0..self.nodes.len())
            .map(|i| Node(i as u32))
            .filter(|n| {
                !matches!(
                    self.nodes[n.index()].kind,
                    NodeKind::Input | NodeKind::Constant
                )
            })
            .collect()
    }

    fn pos(&self) -> &[Signal] {
        &self.pos
    }

    fn constant(&self, value: bool) -> Signal {
        Signal {
            node: Node(0),
            complement: value,
        }
    }

    fn constant_value(&self, node: Node) -> bool {
        debug_assert!(self.is_constant(node));
        false
    }

    fn kind(&self, node: Node) -> NodeKind {
        self.nodes[node.index()].kind
    }

    fn node_function(&self, node: Node) -> Option<&TruthTable> {
        self.nodes[node.index()].function.as_ref()
    }

    fn fanins(&self, node: Node) -> &[Signal] {
        &self.nodes[node.index()].fanins
    }

    fn fanout_size(&self, node: Node) -> u32 {
        self.nodes[node.index()].fanout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_signals() {
        let ntk = Network::new();
        let f = ntk.constant(false);
        let t = ntk.constant(true);
        assert_eq!(f.node, t.node);
        assert!(t.complement);
        assert!(ntk.is_constant(f.node));
        assert!(!ntk.constant_value(f.node));
    }

    #[test]
    fn test_fanout_counts() {
        let mut ntk = Network::new();
        let a = ntk.add_pi();
        let b = ntk.add_pi();
        let g = ntk.add_and(a, b);
        let h = ntk.add_xor(g, a);
        ntk.add_po(h);
        ntk.add_po(g);
        assert_eq!(ntk.fanout_size(a.node), 2);
        assert_eq!(ntk.fanout_size(b.node), 1);
        assert_eq!(ntk.fanout_size(g.node), 2); // one gate use, one PO
        assert_eq!(ntk.fanout_size(h.node), 1);
    }

    #[test]
    fn test_gates_topological() {
        let mut ntk = Network::new();
        let a = ntk.add_pi();
        let b = ntk.add_pi();
        let g = ntk.add_or(a, b);
        let h = ntk.add_and(g, b);
        ntk.add_po(h);
        assert_eq!(ntk.gates(), vec![g.node, h.node]);
    }

    #[test]
    fn test_constant_normalized_first() {
        let mut ntk = Network::new();
        let a = ntk.add_pi();
        let b = ntk.add_pi();
        let c0 = ntk.constant(false);
        let g = ntk.add_xor3(a, c0, b);
        assert!(ntk.is_constant(ntk.fanins(g.node)[0].node));
    }

    #[test]
    fn test_simulate_full_adder() {
        let mut ntk = Network::new();
        let a = ntk.add_pi();
        let b = ntk.add_pi();
        let cin = ntk.add_pi();
        let sum = ntk.add_xor3(a, b, cin);
        let carry = ntk.add_maj(a, b, cin);
        ntk.add_po(sum);
        ntk.add_po(carry);

        for input in 0..8_u32 {
            let bits = [input & 1 != 0, input & 2 != 0, input & 4 != 0];
            let outs = ntk.simulate(&bits);
            let expected_sum = bits[0] ^ bits[1] ^ bits[2];
            let expected_carry = input.count_ones() >= 2;
            assert_eq!(outs, vec![expected_sum, expected_carry]);
        }
    }

    #[test]
    fn test_simulate_complemented_po() {
        let mut ntk = Network::new();
        let a = ntk.add_pi();
        let b = ntk.add_pi();
        let g = ntk.add_and(a, b);
        ntk.add_po(!g);
        assert_eq!(ntk.simulate(&[true, true]), vec![false]);
        assert_eq!(ntk.simulate(&[true, false]), vec![true]);
    }

    #[test]
    fn test_simulate_lut() {
        let mut ntk = Network::new();
        let a = ntk.add_pi();
        let b = ntk.add_pi();
        let c = ntk.add_pi();
        // f = (a & b) | c
        let f = ntk.add_lut(vec![a, b, c], TruthTable::from_value(3, 0xF8));
        ntk.add_po(f);
        assert_eq!(ntk.simulate(&[true, true, false]), vec![true]);
        assert_eq!(ntk.simulate(&[false, true, false]), vec![false]);
        assert_eq!(ntk.simulate(&[false, false, true]), vec![true]);
    }
}
