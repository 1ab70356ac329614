//! Pebble-game-based scheduling under a bounded ancilla budget.
//!
//! The network's gate nodes form a reversible pebble game: a node may be
//! pebbled (computed) or unpebbled (uncomputed) only while all of its gate
//! fanins are pebbled, and each pebble occupies one ancilla. A schedule is a
//! move sequence starting from the empty board and ending with exactly the
//! output drivers pebbled. Bounding the number of simultaneous pebbles
//! trades recomputation for qubit count.
//!
//! Solving is delegated to a [`PebbleSolver`]; the bundled
//! [`IterativePebbleSolver`] is a reference implementation of that contract
//! (the production path is an external SAT-based solver with the same
//! interface).

use std::time::{Duration, Instant};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use bombyx_net::{LogicNetwork, Node};

use crate::action::{MappingAction, Step};
use crate::error::SolveError;
use crate::strategy::MappingStrategy;

/// One move of a pebbling schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PebbleEvent {
    /// Place a pebble: compute the node.
    Pebble(Node),
    /// Remove a pebble: uncompute the node.
    Unpebble(Node),
}

/// The dependency structure of a network's gate nodes.
///
/// Primary inputs and constants are always available and do not appear in
/// the game; edges run from a gate to the gates consuming it.
pub struct PebbleGame {
    graph: DiGraph<Node, ()>,
    indices: FxHashMap<Node, NodeIndex>,
    order: Vec<Node>,
    outputs: FxHashSet<Node>,
}

impl PebbleGame {
    /// Extract the game from a network.
    pub fn from_network(ntk: &impl LogicNetwork) -> Self {
        let mut graph = DiGraph::new();
        let mut indices = FxHashMap::default();
        let order = ntk.gates();
        for &n in &order {
            indices.insert(n, graph.add_node(n));
        }
        for &n in &order {
            for f in ntk.fanins(n) {
                if let Some(&src) = indices.get(&f.node) {
                    graph.add_edge(src, indices[&n], ());
                }
            }
        }
        let outputs = ntk
            .pos()
            .iter()
            .map(|s| s.node)
            .filter(|n| indices.contains_key(n))
            .collect();
        Self {
            graph,
            indices,
            order,
            outputs,
        }
    }

    /// Number of gate nodes in the game.
    pub fn num_gates(&self) -> usize {
        self.order.len()
    }

    /// Gate nodes in topological order.
    pub fn order(&self) -> &[Node] {
        &self.order
    }

    /// Gate fanins of a gate node.
    pub fn preds(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        self.graph
            .neighbors_directed(self.indices[&node], Direction::Incoming)
            .map(|i| self.graph[i])
    }

    /// Whether a gate node drives a primary output.
    pub fn is_output(&self, node: Node) -> bool {
        self.outputs.contains(&node)
    }
}

/// A solver for bounded reversible pebbling.
pub trait PebbleSolver {
    /// Find a schedule using at most `limit` simultaneous pebbles
    /// (0 means unbounded), minimizing the number of moves.
    ///
    /// `budget` is an optional wall-clock bound; exceeding it yields
    /// [`SolveError::Timeout`] and the caller is expected to fall back to a
    /// heuristic strategy.
    fn solve(
        &self,
        game: &PebbleGame,
        limit: u32,
        budget: Option<Duration>,
    ) -> Result<Vec<PebbleEvent>, SolveError>;
}

/// Reference solver: breadth-first search over pebbling configurations.
///
/// Configurations are bitmasks over the game's gate nodes, so at most 64
/// gates are supported; larger games belong to an external solver. BFS
/// yields a move-minimal schedule and exact infeasibility: if the goal
/// configuration is unreachable within the limit, no schedule exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct IterativePebbleSolver;

impl PebbleSolver for IterativePebbleSolver {
    fn solve(
        &self,
        game: &PebbleGame,
        limit: u32,
        budget: Option<Duration>,
    ) -> Result<Vec<PebbleEvent>, SolveError> {
        // Unbounded games have a canonical move-minimal schedule: pebble in
        // topological order, unpebble the non-outputs in reverse.
        if limit == 0 {
            let mut events: Vec<PebbleEvent> =
                game.order().iter().map(|&n| PebbleEvent::Pebble(n)).collect();
            events.extend(
                game.order()
                    .iter()
                    .rev()
                    .filter(|n| !game.is_output(**n))
                    .map(|&n| PebbleEvent::Unpebble(n)),
            );
            return Ok(events);
        }

        let num_gates = game.num_gates();
        if num_gates > 64 {
            return Err(SolveError::TooLarge { num_gates });
        }

        // Per-gate masks of the gate fanins that must carry a pebble for
        // the gate to be touched.
        let slot: FxHashMap<Node, usize> = game
            .order()
            .iter()
            .enumerate()
            .map(|(i, &n)| (n, i))
            .collect();
        let deps: Vec<u64> = game
            .order()
            .iter()
            .map(|&n| game.preds(n).fold(0_u64, |m, p| m | 1 << slot[&p]))
            .collect();
        let goal: u64 = game
            .order()
            .iter()
            .enumerate()
            .filter(|(_, n)| game.is_output(**n))
            .fold(0, |m, (i, _)| m | 1 << i);
        // No gate feeds a primary output: the empty board is already the
        // goal configuration.
        if goal == 0 {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let mut parent: FxHashMap<u64, (u64, usize)> = FxHashMap::default();
        let mut queue = std::collections::VecDeque::new();
        parent.insert(0, (0, usize::MAX));
        queue.push_back(0_u64);

        while let Some(state) = queue.pop_front() {
            if let Some(budget) = budget {
                if start.elapsed() >= budget {
                    return Err(SolveError::Timeout { budget });
                }
            }
            for i in 0..num_gates {
                if state & deps[i] != deps[i] {
                    continue;
                }
                let placing = state & (1 << i) == 0;
                if placing && state.count_ones() >= limit {
                    continue;
                }
                let next = state ^ (1 << i);
                if parent.contains_key(&next) {
                    continue;
                }
                parent.insert(next, (state, i));
                if next == goal {
                    return Ok(reconstruct(&parent, game, next));
                }
                queue.push_back(next);
            }
        }

        Err(SolveError::Infeasible { limit })
    }
}

fn reconstruct(
    parent: &FxHashMap<u64, (u64, usize)>,
    game: &PebbleGame,
    goal: u64,
) -> Vec<PebbleEvent> {
    let mut events = Vec::new();
    let mut state = goal;
    while state != 0 || parent[&state].1 != usize::MAX {
        let (prev, slot) = parent[&state];
        let node = game.order()[slot];
        if state & (1 << slot) != 0 {
            events.push(PebbleEvent::Pebble(node));
        } else {
            events.push(PebbleEvent::Unpebble(node));
        }
        state = prev;
    }
    events.reverse();
    events
}

/// Mapping strategy backed by a pebbling schedule.
///
/// The schedule is produced lazily on the first call to `steps`, so a
/// pebble limit set between construction and consumption is honored;
/// afterwards the schedule is fixed and limit changes have no effect.
pub struct PebblingStrategy<S = IterativePebbleSolver> {
    game: PebbleGame,
    solver: S,
    limit: u32,
    budget: Option<Duration>,
    steps: Option<Vec<Step>>,
}

impl PebblingStrategy<IterativePebbleSolver> {
    /// Create a strategy over the reference solver, unbounded.
    pub fn new(ntk: &impl LogicNetwork) -> Self {
        Self::with_solver(ntk, IterativePebbleSolver)
    }
}

impl<S: PebbleSolver> PebblingStrategy<S> {
    /// Create a strategy over a caller-supplied solver.
    pub fn with_solver(ntk: &impl LogicNetwork, solver: S) -> Self {
        Self {
            game: PebbleGame::from_network(ntk),
            solver,
            limit: 0,
            budget: None,
            steps: None,
        }
    }

    /// Bound the wall-clock time the solver may spend.
    #[must_use]
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }
}

impl<S: PebbleSolver> MappingStrategy for PebblingStrategy<S> {
    fn name(&self) -> &str {
        "pebbling"
    }

    fn set_pebble_limit(&mut self, limit: u32) -> bool {
        if self.steps.is_some() {
            debug!("pebble limit change ignored: schedule already produced");
        } else {
            self.limit = limit;
        }
        true
    }

    fn steps(&mut self) -> Result<&[Step], SolveError> {
        if self.steps.is_none() {
            let events = self.solver.solve(&self.game, self.limit, self.budget)?;
            info!(
                "pebbling schedule: {} moves over {} gates (limit {})",
                events.len(),
                self.game.num_gates(),
                self.limit
            );
            let steps = events
                .into_iter()
                .map(|event| match event {
                    PebbleEvent::Pebble(n) => Step::new(n, MappingAction::Compute),
                    PebbleEvent::Unpebble(n) => Step::new(n, MappingAction::Uncompute),
                })
                .collect();
            self.steps = Some(steps);
        }
        Ok(self.steps.as_deref().unwrap_or_default())
    }
}
