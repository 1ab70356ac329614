//! The synthesis engine: replays a strategy's schedule onto a circuit.
//!
//! The engine owns no policy. It prepares one qubit per primary input and
//! per used constant, then executes the step sequence verbatim: compute
//! steps draw an ancilla from the pool and emit the node's decomposition,
//! uncompute steps re-apply the same decomposition and return the ancilla,
//! in-place steps reuse the qubit named by the step without touching the
//! pool. LUT nodes that are not plain parities are handed to the caller's
//! [`SingleTargetSynthesis`] routine.

use std::time::{Duration, Instant};

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, error, info};

use bombyx_ir::{Circuit, QubitId};
use bombyx_net::{LogicNetwork, Node, NodeKind, Signal};

use crate::action::MappingAction;
use crate::ancilla::AncillaPool;
use crate::decompose;
use crate::error::{SynthError, SynthResult};
use crate::map::NodeToQubit;
use crate::stg::SingleTargetSynthesis;
use crate::strategy::MappingStrategy;

/// Tuning knobs for a synthesis run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SynthesisParams {
    /// Upper bound on simultaneously live ancillae, forwarded to the
    /// strategy. Zero means unbounded. Strategies that cannot honor a
    /// bound ignore it; the engine logs when that happens.
    pub pebble_limit: u32,
}

/// What a synthesis run produced, beyond the gates themselves.
#[derive(Debug, Clone)]
pub struct SynthesisStats {
    /// Wall-clock time of the whole run.
    pub time_total: Duration,
    /// High-water mark of the ancilla pool.
    pub required_ancillae: u32,
    /// Qubits holding the primary inputs, in input order.
    pub input_qubits: Vec<QubitId>,
    /// Qubits holding the primary outputs, in output order.
    pub output_qubits: Vec<QubitId>,
}

/// Synthesize a logic network into a reversible circuit.
///
/// Appends to `circuit`; the caller usually passes an empty one. On success
/// the circuit computes every primary output on the qubits reported in the
/// returned stats, with every ancilla restored to |0⟩.
pub fn synthesize<N, S, M>(
    circuit: &mut Circuit,
    ntk: &N,
    stg: &S,
    strategy: &mut M,
    params: &SynthesisParams,
) -> SynthResult<SynthesisStats>
where
    N: LogicNetwork,
    S: SingleTargetSynthesis,
    M: MappingStrategy + ?Sized,
{
    let start = Instant::now();
    if params.pebble_limit > 0 && !strategy.set_pebble_limit(params.pebble_limit) {
        debug!(
            "strategy '{}' does not honor a pebble limit of {}",
            strategy.name(),
            params.pebble_limit
        );
    }

    let mut map = NodeToQubit::new();
    let mut pool = AncillaPool::new();

    let input_qubits = prepare_inputs(circuit, ntk, &mut map);
    prepare_constants(circuit, ntk, &mut map)?;

    for &step in strategy.steps()? {
        debug!("{step}");
        match step.action {
            MappingAction::Compute => {
                let t = pool.request(circuit);
                map.assign(step.node, t);
                compute_node(circuit, ntk, stg, &map, step.node, t)?;
            }
            MappingAction::Uncompute => {
                let t = qubit_of(&map, step.node)?;
                compute_node(circuit, ntk, stg, &map, step.node, t)?;
                pool.release(t);
            }
            MappingAction::ComputeInPlace { target } => {
                let t = qubit_of(&map, target)?;
                map.assign(step.node, t);
                compute_node_inplace(circuit, ntk, &map, step.node, t)?;
            }
            MappingAction::UncomputeInPlace { target: _ } => {
                let t = qubit_of(&map, step.node)?;
                compute_node_inplace(circuit, ntk, &map, step.node, t)?;
            }
        }
    }

    let output_qubits = finalize_outputs(circuit, ntk, &map)?;

    let stats = SynthesisStats {
        time_total: start.elapsed(),
        required_ancillae: pool.required(),
        input_qubits,
        output_qubits,
    };
    info!(
        strategy = strategy.name(),
        qubits = circuit.num_qubits(),
        gates = circuit.num_gates(),
        ancillae = stats.required_ancillae,
        elapsed = ?stats.time_total,
        "synthesis finished"
    );
    Ok(stats)
}

/// One qubit per primary input, in input order.
fn prepare_inputs(
    circuit: &mut Circuit,
    ntk: &impl LogicNetwork,
    map: &mut NodeToQubit,
) -> Vec<QubitId> {
    ntk.pis()
        .into_iter()
        .map(|pi| {
            let q = circuit.add_qubit();
            map.assign(pi, q);
            q
        })
        .collect()
}

/// One qubit per constant node with at least one use site, initialized to
/// the constant's value with an X gate when that value is true.
fn prepare_constants(
    circuit: &mut Circuit,
    ntk: &impl LogicNetwork,
    map: &mut NodeToQubit,
) -> SynthResult<()> {
    let false_node = ntk.constant(false).node;
    let mut nodes = vec![false_node];
    let true_node = ntk.constant(true).node;
    if true_node != false_node {
        nodes.push(true_node);
    }
    for node in nodes {
        if ntk.fanout_size(node) == 0 {
            continue;
        }
        let q = circuit.add_qubit();
        map.assign(node, q);
        if ntk.constant_value(node) {
            circuit.x(q)?;
        }
    }
    Ok(())
}

fn qubit_of(map: &NodeToQubit, node: Node) -> SynthResult<QubitId> {
    map.get(node).ok_or(SynthError::UnmappedNode(node))
}

fn fanin_qubits(map: &NodeToQubit, fanins: &[Signal]) -> SynthResult<Vec<QubitId>> {
    fanins.iter().map(|f| qubit_of(map, f.node)).collect()
}

fn check_arity(node: Node, fanins: &[Signal], expected: usize) -> SynthResult<()> {
    if fanins.len() == expected {
        Ok(())
    } else {
        Err(SynthError::FaninArity {
            node,
            expected,
            found: fanins.len(),
        })
    }
}

/// XOR the node's function into `t`, selecting the decomposition by kind.
///
/// XOR3 and MAJ nodes carry constants only in fanin slot 0 (networks
/// normalize them there); such nodes degenerate to XOR and AND/OR.
fn compute_node<N, S>(
    circuit: &mut Circuit,
    ntk: &N,
    stg: &S,
    map: &NodeToQubit,
    node: Node,
    t: QubitId,
) -> SynthResult<()>
where
    N: LogicNetwork,
    S: SingleTargetSynthesis,
{
    let fanins = ntk.fanins(node);
    match ntk.kind(node) {
        NodeKind::And => {
            check_arity(node, fanins, 2)?;
            let q = fanin_qubits(map, fanins)?;
            decompose::compute_and(
                circuit,
                q[0],
                q[1],
                fanins[0].complement,
                fanins[1].complement,
                t,
            )?;
        }
        NodeKind::Or => {
            check_arity(node, fanins, 2)?;
            let q = fanin_qubits(map, fanins)?;
            decompose::compute_or(
                circuit,
                q[0],
                q[1],
                fanins[0].complement,
                fanins[1].complement,
                t,
            )?;
        }
        NodeKind::Xor => {
            check_arity(node, fanins, 2)?;
            let q = fanin_qubits(map, fanins)?;
            let inv = fanins[0].complement ^ fanins[1].complement;
            decompose::compute_xor(circuit, q[0], q[1], inv, t)?;
        }
        NodeKind::Xor3 => {
            check_arity(node, fanins, 3)?;
            if ntk.is_constant(fanins[0].node) {
                let v = ntk.constant_value(fanins[0].node) ^ fanins[0].complement;
                let q1 = qubit_of(map, fanins[1].node)?;
                let q2 = qubit_of(map, fanins[2].node)?;
                let inv = v ^ fanins[1].complement ^ fanins[2].complement;
                decompose::compute_xor(circuit, q1, q2, inv, t)?;
            } else {
                let q = fanin_qubits(map, fanins)?;
                let inv =
                    fanins[0].complement ^ fanins[1].complement ^ fanins[2].complement;
                decompose::compute_xor3(circuit, q[0], q[1], q[2], inv, t)?;
            }
        }
        NodeKind::Maj => {
            check_arity(node, fanins, 3)?;
            if ntk.is_constant(fanins[0].node) {
                // MAJ(1, b, c) = b + c and MAJ(0, b, c) = b · c.
                let v = ntk.constant_value(fanins[0].node) ^ fanins[0].complement;
                let q1 = qubit_of(map, fanins[1].node)?;
                let q2 = qubit_of(map, fanins[2].node)?;
                let p1 = fanins[1].complement;
                let p2 = fanins[2].complement;
                if v {
                    decompose::compute_or(circuit, q1, q2, p1, p2, t)?;
                } else {
                    decompose::compute_and(circuit, q1, q2, p1, p2, t)?;
                }
            } else {
                let q = fanin_qubits(map, fanins)?;
                decompose::compute_maj(
                    circuit,
                    q[0],
                    q[1],
                    q[2],
                    fanins[0].complement,
                    fanins[1].complement,
                    fanins[2].complement,
                    t,
                )?;
            }
        }
        NodeKind::Lut => {
            let function = ntk
                .node_function(node)
                .ok_or(SynthError::MissingFunction(node))?;
            check_arity(node, fanins, function.num_vars() as usize)?;
            let controls = fanin_qubits(map, fanins)?;
            if function.is_parity() {
                decompose::compute_xor_block(circuit, &controls, t)?;
                if parity_inverted(fanins) {
                    circuit.x(t)?;
                }
            } else {
                // Complemented fanins are bracketed with NOTs; the bracketed
                // block stays self-inverse.
                let mut qubits = controls;
                qubits.push(t);
                flip_complemented(circuit, fanins, &qubits)?;
                stg.synthesize(circuit, function, &qubits)?;
                flip_complemented(circuit, fanins, &qubits)?;
            }
        }
        kind @ (NodeKind::Input | NodeKind::Constant) => {
            error!("schedule step on non-gate node {node} ({kind})");
        }
    }
    Ok(())
}

/// XOR the node's function into `t`, where `t` already holds one fanin.
///
/// Only parity-class nodes can be computed in place; anything else is a
/// strategy bug, reported and skipped so the partial circuit stays
/// inspectable.
fn compute_node_inplace<N>(
    circuit: &mut Circuit,
    ntk: &N,
    map: &NodeToQubit,
    node: Node,
    t: QubitId,
) -> SynthResult<()>
where
    N: LogicNetwork,
{
    let fanins = ntk.fanins(node);
    match ntk.kind(node) {
        NodeKind::Xor => {
            check_arity(node, fanins, 2)?;
            let q = fanin_qubits(map, fanins)?;
            let inv = fanins[0].complement ^ fanins[1].complement;
            decompose::compute_xor_inplace(circuit, q[0], q[1], inv, t)?;
        }
        NodeKind::Xor3 => {
            check_arity(node, fanins, 3)?;
            if ntk.is_constant(fanins[0].node) {
                let v = ntk.constant_value(fanins[0].node) ^ fanins[0].complement;
                let q1 = qubit_of(map, fanins[1].node)?;
                let q2 = qubit_of(map, fanins[2].node)?;
                let inv = v ^ fanins[1].complement ^ fanins[2].complement;
                decompose::compute_xor_inplace(circuit, q1, q2, inv, t)?;
            } else {
                let q = fanin_qubits(map, fanins)?;
                let inv =
                    fanins[0].complement ^ fanins[1].complement ^ fanins[2].complement;
                decompose::compute_xor3_inplace(circuit, q[0], q[1], q[2], inv, t)?;
            }
        }
        NodeKind::Lut => {
            let function = ntk
                .node_function(node)
                .ok_or(SynthError::MissingFunction(node))?;
            if function.is_parity() {
                let controls = fanin_qubits(map, fanins)?;
                decompose::compute_xor_block(circuit, &controls, t)?;
                if parity_inverted(fanins) {
                    circuit.x(t)?;
                }
            } else {
                error!("cannot compute non-parity LUT {node} in place");
            }
        }
        kind => {
            error!("cannot compute {kind} node {node} in place");
        }
    }
    Ok(())
}

/// Odd number of complemented fanin edges inverts a parity node.
fn parity_inverted(fanins: &[Signal]) -> bool {
    fanins.iter().filter(|f| f.complement).count() % 2 == 1
}

fn flip_complemented(
    circuit: &mut Circuit,
    fanins: &[Signal],
    qubits: &[QubitId],
) -> SynthResult<()> {
    for (f, &q) in fanins.iter().zip(qubits) {
        if f.complement {
            circuit.x(q)?;
        }
    }
    Ok(())
}

/// Resolve output qubits, materializing complemented output edges.
///
/// A node read only with one polarity gets at most one NOT on its own
/// line, shared by every reference. A node read with both polarities
/// cannot serve both from one line, so the inverted reading goes to a
/// fresh qubit via a CNOT copy.
fn finalize_outputs(
    circuit: &mut Circuit,
    ntk: &impl LogicNetwork,
    map: &NodeToQubit,
) -> SynthResult<Vec<QubitId>> {
    let pos = ntk.pos();
    let plain: FxHashSet<Node> = pos
        .iter()
        .filter(|po| !po.complement)
        .map(|po| po.node)
        .collect();
    let mut inverted: FxHashMap<Node, QubitId> = FxHashMap::default();

    let mut outputs = Vec::with_capacity(pos.len());
    for po in pos {
        let q = qubit_of(map, po.node)?;
        if !po.complement {
            outputs.push(q);
            continue;
        }
        let iq = match inverted.get(&po.node) {
            Some(&iq) => iq,
            None => {
                let iq = if plain.contains(&po.node) {
                    let copy = circuit.add_qubit();
                    circuit.cx(q, copy)?;
                    copy
                } else {
                    q
                };
                circuit.x(iq)?;
                inverted.insert(po.node, iq);
                iq
            }
        };
        outputs.push(iq);
    }
    Ok(outputs)
}
