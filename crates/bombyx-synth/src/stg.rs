//! Single-target gate synthesis.
//!
//! A single-target gate realizes `t ⊕= f(controls)` for an arbitrary small
//! function `f`. The engine delegates LUT nodes it cannot decompose with a
//! fixed template to an implementation of [`SingleTargetSynthesis`]; the
//! bundled [`PprmSynthesis`] expands the function into its positive-polarity
//! Reed-Muller form and emits one multi-controlled NOT per monomial.

use bombyx_ir::{Circuit, IrResult, QubitId};
use bombyx_net::TruthTable;

/// An external routine emitting a gate sequence for `t ⊕= f(controls)`.
///
/// `qubits` lists the fanin qubits in fanin order followed by the target.
/// The emitted sequence must be self-inverse under identical re-application,
/// since the engine uncomputes by replaying it.
pub trait SingleTargetSynthesis {
    /// Emit the gate sequence onto `circuit`.
    fn synthesize(
        &self,
        circuit: &mut Circuit,
        function: &TruthTable,
        qubits: &[QubitId],
    ) -> IrResult<()>;
}

impl<F> SingleTargetSynthesis for F
where
    F: Fn(&mut Circuit, &TruthTable, &[QubitId]) -> IrResult<()>,
{
    fn synthesize(
        &self,
        circuit: &mut Circuit,
        function: &TruthTable,
        qubits: &[QubitId],
    ) -> IrResult<()> {
        self(circuit, function, qubits)
    }
}

/// Positive-polarity Reed-Muller synthesis.
///
/// Computes the algebraic normal form of the function and emits one
/// Toffoli-class gate per monomial (a plain NOT for the constant monomial).
/// All emitted gates are X-type on the same target, so they commute with
/// each other and the whole block is an involution.
#[derive(Debug, Default, Clone, Copy)]
pub struct PprmSynthesis;

impl SingleTargetSynthesis for PprmSynthesis {
    fn synthesize(
        &self,
        circuit: &mut Circuit,
        function: &TruthTable,
        qubits: &[QubitId],
    ) -> IrResult<()> {
        let num_vars = function.num_vars() as usize;
        debug_assert_eq!(qubits.len(), num_vars + 1);
        let target = qubits[num_vars];

        for monomial in anf(function) {
            let controls = (0..num_vars)
                .filter(|k| monomial & (1 << k) != 0)
                .map(|k| qubits[k]);
            circuit.mcx(controls, target)?;
        }
        Ok(())
    }
}

/// The monomials of the function's algebraic normal form, as variable
/// bitmasks, via the Möbius (butterfly) transform.
fn anf(function: &TruthTable) -> Vec<usize> {
    let n = function.num_vars() as usize;
    let size = 1 << n;
    let mut coeffs: Vec<bool> = (0..size).map(|i| function.bit(i)).collect();
    for k in 0..n {
        for i in 0..size {
            if i & (1 << k) != 0 {
                coeffs[i] ^= coeffs[i ^ (1 << k)];
            }
        }
    }
    (0..size).filter(|&i| coeffs[i]).collect()
}
