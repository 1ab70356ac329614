//! Bennett-style compute/uncompute scheduling.

use rustc_hash::FxHashSet;

use bombyx_net::{LogicNetwork, Node, NodeKind};

use crate::action::{MappingAction, Step};
use crate::error::SolveError;
use crate::strategy::MappingStrategy;

/// The naive, always-correct baseline.
///
/// Every gate node is computed in topological order; every gate that drives
/// no primary output is uncomputed once all its consumers have retired, in
/// reverse topological order. Uncomputation re-applies a node's function and
/// reads its fanin qubits, so a fanin may only be uncomputed after every
/// step that reads it — the reverse ordering is the earliest schedule with
/// that property. Peak ancilla usage equals the number of gates computed
/// but not yet uncomputed, bounded by the live frontier of the traversal.
pub struct BennettStrategy {
    steps: Vec<Step>,
}

impl BennettStrategy {
    /// Build the schedule for a network.
    pub fn new(ntk: &impl LogicNetwork) -> Self {
        let drivers = output_drivers(ntk);

        let mut steps = Vec::new();
        let mut deferred = Vec::new();
        for n in ntk.gates() {
            steps.push(Step::new(n, MappingAction::Compute));
            if !drivers.contains(&n) {
                deferred.push(Step::new(n, MappingAction::Uncompute));
            }
        }
        steps.extend(deferred.into_iter().rev());
        Self { steps }
    }
}

impl MappingStrategy for BennettStrategy {
    fn name(&self) -> &str {
        "bennett"
    }

    fn steps(&mut self) -> Result<&[Step], SolveError> {
        Ok(&self.steps)
    }
}

/// Bennett scheduling with in-place reuse of dying qubits.
///
/// A per-node remaining-consumer counter (initialized to fanout) tracks
/// liveness. When a visit consumes the last reference to some fanin, that
/// fanin's qubit is dead and an XOR/XOR3 node may be computed directly over
/// it — XOR is linear and self-inverse, so re-application restores the
/// overwritten value. In-place steps never touch the ancilla pool, so this
/// strategy never needs more ancillae than plain Bennett.
pub struct BennettInPlaceStrategy {
    steps: Vec<Step>,
}

impl BennettInPlaceStrategy {
    /// Build the schedule for a network.
    pub fn new(ntk: &impl LogicNetwork) -> Self {
        let drivers = output_drivers(ntk);

        let mut remaining: Vec<u32> = (0..ntk.num_nodes())
            .map(|i| ntk.fanout_size(Node(i as u32)))
            .collect();

        let mut steps = Vec::new();
        let mut deferred = Vec::new();
        for n in ntk.gates() {
            // Decrease reference counts; the first eligible fanin dying
            // during this visit is the in-place candidate (tie-break by
            // fanin order). Constants are shared lines and never valid
            // targets. An output driver keeps its value forever and is
            // never restored, so it may only take over a line nothing will
            // ever read again: a primary input this node is the sole
            // reader of. A gate qubit, or an input with earlier readers,
            // is re-read when those readers uncompute.
            let driver = drivers.contains(&n);
            let mut target = None;
            for f in ntk.fanins(n) {
                let count = &mut remaining[f.node.index()];
                *count -= 1;
                if *count == 0
                    && target.is_none()
                    && !ntk.is_constant(f.node)
                    && (!driver || (ntk.is_pi(f.node) && sole_reader(ntk, n, f.node)))
                {
                    target = Some(f.node);
                }
            }

            if is_parity_class(ntk, n) {
                if let Some(target) = target {
                    steps.push(Step::new(n, MappingAction::ComputeInPlace { target }));
                    if !driver {
                        deferred
                            .push(Step::new(n, MappingAction::UncomputeInPlace { target }));
                    }
                    continue;
                }
            }

            steps.push(Step::new(n, MappingAction::Compute));
            if !driver {
                deferred.push(Step::new(n, MappingAction::Uncompute));
            }
        }
        steps.extend(deferred.into_iter().rev());
        Self { steps }
    }
}

impl MappingStrategy for BennettInPlaceStrategy {
    fn name(&self) -> &str {
        "bennett-inplace"
    }

    fn steps(&mut self) -> Result<&[Step], SolveError> {
        Ok(&self.steps)
    }
}

fn output_drivers(ntk: &impl LogicNetwork) -> FxHashSet<Node> {
    ntk.pos().iter().map(|s| s.node).collect()
}

/// Whether `node` accounts for every use site of `target`, so no other
/// compute or uncompute will ever read `target`'s line again.
fn sole_reader(ntk: &impl LogicNetwork, node: Node, target: Node) -> bool {
    let refs = ntk.fanins(node).iter().filter(|f| f.node == target).count();
    refs as u32 == ntk.fanout_size(target)
}

/// XOR, XOR3 and parity LUTs are linear and self-inverse, which is what
/// makes computing them over a dying operand reversible.
fn is_parity_class(ntk: &impl LogicNetwork, node: Node) -> bool {
    match ntk.kind(node) {
        NodeKind::Xor | NodeKind::Xor3 => true,
        NodeKind::Lut => ntk.node_function(node).is_some_and(|f| f.is_parity()),
        _ => false,
    }
}
