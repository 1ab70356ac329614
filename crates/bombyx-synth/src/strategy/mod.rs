//! Mapping strategies: when to compute, when to uncompute, and where.
//!
//! A strategy turns a logic network into an ordered [`Step`] sequence that
//! the synthesis engine replays verbatim. Strategies capture whatever they
//! need from the network at construction time; the sequence is produced
//! once and never mutated afterwards.

mod bennett;
mod pebbling;

pub use bennett::{BennettInPlaceStrategy, BennettStrategy};
pub use pebbling::{
    IterativePebbleSolver, PebbleEvent, PebbleGame, PebbleSolver, PebblingStrategy,
};

use crate::action::Step;
use crate::error::SolveError;

/// A scheduling policy for computing and uncomputing network nodes.
pub trait MappingStrategy {
    /// Name of this strategy, for diagnostics.
    fn name(&self) -> &str;

    /// Bound the number of simultaneously live ancillae, if this strategy
    /// supports it.
    ///
    /// Returns whether the limit is honored. The default implementation
    /// ignores the limit and reports so; a limit set after the step
    /// sequence has been produced has no effect.
    fn set_pebble_limit(&mut self, limit: u32) -> bool {
        let _ = limit;
        false
    }

    /// The ordered step sequence.
    ///
    /// Produced on first call (this is where a pebbling strategy runs its
    /// solver) and fixed afterwards.
    fn steps(&mut self) -> Result<&[Step], SolveError>;
}
