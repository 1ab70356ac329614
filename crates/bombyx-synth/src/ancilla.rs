//! Stack allocator for scratch qubits.

use bombyx_ir::{Circuit, QubitId};
use rustc_hash::FxHashSet;

/// A stack allocator for ancilla qubits.
///
/// `request` reuses the most recently released qubit when one is available
/// and otherwise grows the circuit by a fresh qubit, raising the high-water
/// mark that is reported as the required ancilla count. Input and constant
/// qubits share the circuit's index space but never pass through the pool.
#[derive(Debug, Default)]
pub struct AncillaPool {
    free: Vec<QubitId>,
    live: FxHashSet<QubitId>,
    required: u32,
}

impl AncillaPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a free qubit, allocating a fresh one from the circuit when
    /// the free list is empty.
    pub fn request(&mut self, circuit: &mut Circuit) -> QubitId {
        let qubit = match self.free.pop() {
            Some(q) => q,
            None => {
                self.required += 1;
                circuit.add_qubit()
            }
        };
        self.live.insert(qubit);
        qubit
    }

    /// Return a qubit to the free list.
    ///
    /// Releasing a qubit that is not currently allocated is a caller
    /// contract violation; it is fatal in debug builds.
    pub fn release(&mut self, qubit: QubitId) {
        let was_live = self.live.remove(&qubit);
        debug_assert!(was_live, "released {qubit} which is not allocated");
        self.free.push(qubit);
    }

    /// The high-water mark: how many ancillae the circuit needed overall.
    pub fn required(&self) -> u32 {
        self.required
    }

    /// Number of currently allocated ancillae.
    pub fn num_live(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_allocation_grows_high_water() {
        let mut circuit = Circuit::new("t");
        let mut pool = AncillaPool::new();
        let a = pool.request(&mut circuit);
        let b = pool.request(&mut circuit);
        assert_ne!(a, b);
        assert_eq!(pool.required(), 2);
        assert_eq!(circuit.num_qubits(), 2);
    }

    #[test]
    fn test_lifo_reuse() {
        let mut circuit = Circuit::new("t");
        let mut pool = AncillaPool::new();
        let a = pool.request(&mut circuit);
        let b = pool.request(&mut circuit);
        pool.release(a);
        pool.release(b);
        // Most recently released comes back first.
        assert_eq!(pool.request(&mut circuit), b);
        assert_eq!(pool.request(&mut circuit), a);
        // Reuse does not grow the high-water mark.
        assert_eq!(pool.required(), 2);
        assert_eq!(circuit.num_qubits(), 2);
    }

    #[test]
    fn test_live_count() {
        let mut circuit = Circuit::new("t");
        let mut pool = AncillaPool::new();
        let a = pool.request(&mut circuit);
        let _b = pool.request(&mut circuit);
        assert_eq!(pool.num_live(), 2);
        pool.release(a);
        assert_eq!(pool.num_live(), 1);
    }

    #[test]
    #[should_panic(expected = "not allocated")]
    #[cfg(debug_assertions)]
    fn test_double_release_panics_in_debug() {
        let mut circuit = Circuit::new("t");
        let mut pool = AncillaPool::new();
        let a = pool.request(&mut circuit);
        pool.release(a);
        pool.release(a);
    }
}
