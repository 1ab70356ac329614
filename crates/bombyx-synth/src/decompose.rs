//! Per-primitive reversible gate templates.
//!
//! Every template XORs the node's function into the target qubit and leaves
//! the controls unchanged; polarity flags select bracketing NOT gates on the
//! controls. Applying any template twice with identical operands is the
//! identity on the target, which is what makes uncomputation by
//! re-application sound.

use bombyx_ir::{Circuit, IrResult, QubitId};
use tracing::error;

/// `t ⊕= (c1 ⊕ p1) · (c2 ⊕ p2)`: bracketing NOTs on complemented controls
/// around a Toffoli.
pub fn compute_and(
    circuit: &mut Circuit,
    c1: QubitId,
    c2: QubitId,
    p1: bool,
    p2: bool,
    t: QubitId,
) -> IrResult<()> {
    if p1 {
        circuit.x(c1)?;
    }
    if p2 {
        circuit.x(c2)?;
    }
    circuit.mcx([c1, c2], t)?;
    if p2 {
        circuit.x(c2)?;
    }
    if p1 {
        circuit.x(c1)?;
    }
    Ok(())
}

/// `t ⊕= (c1 ⊕ p1) + (c2 ⊕ p2)` by De Morgan: controls are flipped on the
/// *positive* polarity, opposite to the AND convention, and the target is
/// inverted after the Toffoli.
pub fn compute_or(
    circuit: &mut Circuit,
    c1: QubitId,
    c2: QubitId,
    p1: bool,
    p2: bool,
    t: QubitId,
) -> IrResult<()> {
    if !p1 {
        circuit.x(c1)?;
    }
    if !p2 {
        circuit.x(c2)?;
    }
    circuit.mcx([c1, c2], t)?;
    circuit.x(t)?;
    if !p2 {
        circuit.x(c2)?;
    }
    if !p1 {
        circuit.x(c1)?;
    }
    Ok(())
}

/// `t ⊕= c1 ⊕ c2 ⊕ inv`: two CNOTs plus a trailing NOT when the combined
/// edge polarity inverts.
pub fn compute_xor(
    circuit: &mut Circuit,
    c1: QubitId,
    c2: QubitId,
    inv: bool,
    t: QubitId,
) -> IrResult<()> {
    circuit.cx(c1, t)?;
    circuit.cx(c2, t)?;
    if inv {
        circuit.x(t)?;
    }
    Ok(())
}

/// `t ⊕= c1 ⊕ c2 ⊕ c3 ⊕ inv`.
pub fn compute_xor3(
    circuit: &mut Circuit,
    c1: QubitId,
    c2: QubitId,
    c3: QubitId,
    inv: bool,
    t: QubitId,
) -> IrResult<()> {
    circuit.cx(c1, t)?;
    circuit.cx(c2, t)?;
    circuit.cx(c3, t)?;
    if inv {
        circuit.x(t)?;
    }
    Ok(())
}

/// `t ⊕= MAJ(c1 ⊕ p1, c2 ⊕ p2, c3 ⊕ p3)` without auxiliary ancillae.
///
/// Uses the identity `MAJ(a, b, c) = c ⊕ ((a ⊕ c) · (¬b ⊕ a))`: two CNOTs
/// fold the differences onto the controls, a Toffoli and a CNOT write the
/// majority, two reversing CNOTs restore the controls. Control 2's
/// polarity flip is therefore inverted relative to the others.
pub fn compute_maj(
    circuit: &mut Circuit,
    c1: QubitId,
    c2: QubitId,
    c3: QubitId,
    p1: bool,
    p2: bool,
    p3: bool,
    t: QubitId,
) -> IrResult<()> {
    if p1 {
        circuit.x(c1)?;
    }
    if !p2 {
        circuit.x(c2)?;
    }
    if p3 {
        circuit.x(c3)?;
    }
    circuit.cx(c1, c2)?;
    circuit.cx(c3, c1)?;
    circuit.cx(c3, t)?;
    circuit.mcx([c1, c2], t)?;
    circuit.cx(c3, c1)?;
    circuit.cx(c1, c2)?;
    if p3 {
        circuit.x(c3)?;
    }
    if !p2 {
        circuit.x(c2)?;
    }
    if p1 {
        circuit.x(c1)?;
    }
    Ok(())
}

/// Generalized parity block: CNOT every control onto the target, skipping a
/// control that aliases the target itself.
pub fn compute_xor_block(circuit: &mut Circuit, controls: &[QubitId], t: QubitId) -> IrResult<()> {
    for &c in controls {
        if c != t {
            circuit.cx(c, t)?;
        }
    }
    Ok(())
}

/// In-place XOR: the target coincides with one control, so a single CNOT
/// from the other control suffices.
///
/// A target matching neither control is a caller contract violation; it is
/// reported to the diagnostic stream and the (now unreliable) synthesis
/// continues so the partial output stays inspectable.
pub fn compute_xor_inplace(
    circuit: &mut Circuit,
    c1: QubitId,
    c2: QubitId,
    inv: bool,
    t: QubitId,
) -> IrResult<()> {
    if c1 == t {
        circuit.cx(c2, c1)?;
    } else if c2 == t {
        circuit.cx(c1, c2)?;
    } else {
        error!("in-place target {t} does not match any control");
    }
    if inv {
        circuit.x(t)?;
    }
    Ok(())
}

/// In-place three-input XOR; see [`compute_xor_inplace`].
pub fn compute_xor3_inplace(
    circuit: &mut Circuit,
    c1: QubitId,
    c2: QubitId,
    c3: QubitId,
    inv: bool,
    t: QubitId,
) -> IrResult<()> {
    if c1 == t {
        circuit.cx(c2, c1)?;
        circuit.cx(c3, c1)?;
    } else if c2 == t {
        circuit.cx(c1, c2)?;
        circuit.cx(c3, c2)?;
    } else if c3 == t {
        circuit.cx(c1, c3)?;
        circuit.cx(c2, c3)?;
    } else {
        error!("in-place target {t} does not match any control");
    }
    if inv {
        circuit.x(t)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bombyx_ir::sim::{bit, simulate};

    const C1: QubitId = QubitId(0);
    const C2: QubitId = QubitId(1);
    const C3: QubitId = QubitId(2);

    fn maj(a: bool, b: bool, c: bool) -> bool {
        (a & b) | (a & c) | (b & c)
    }

    /// Check a two-control template against its function on every basis
    /// state and polarity, and that re-application restores the target.
    fn check2(
        build: impl Fn(&mut Circuit, bool, bool, QubitId) -> IrResult<()>,
        f: impl Fn(bool, bool) -> bool,
    ) {
        let t = QubitId(2);
        for pol in 0..4_u8 {
            let (p1, p2) = (pol & 1 != 0, pol & 2 != 0);
            let mut once = Circuit::with_size("once", 3);
            build(&mut once, p1, p2, t).unwrap();
            let mut twice = once.clone();
            build(&mut twice, p1, p2, t).unwrap();
            for input in 0..8_u64 {
                let (x1, x2) = (input & 1 != 0, input & 2 != 0);
                let out = simulate(&once, input).unwrap();
                assert_eq!(bit(out, C1), x1, "control 1 disturbed");
                assert_eq!(bit(out, C2), x2, "control 2 disturbed");
                assert_eq!(bit(out, t), bit(input, t) ^ f(x1 ^ p1, x2 ^ p2));
                assert_eq!(simulate(&twice, input).unwrap(), input, "not an involution");
            }
        }
    }

    #[test]
    fn test_and_template() {
        check2(
            |c, p1, p2, t| compute_and(c, C1, C2, p1, p2, t),
            |a, b| a & b,
        );
    }

    #[test]
    fn test_or_template() {
        check2(
            |c, p1, p2, t| compute_or(c, C1, C2, p1, p2, t),
            |a, b| a | b,
        );
    }

    #[test]
    fn test_xor_template() {
        for inv in [false, true] {
            let t = QubitId(2);
            let mut once = Circuit::with_size("once", 3);
            compute_xor(&mut once, C1, C2, inv, t).unwrap();
            let mut twice = once.clone();
            compute_xor(&mut twice, C1, C2, inv, t).unwrap();
            for input in 0..8_u64 {
                let out = simulate(&once, input).unwrap();
                let expected = bit(input, C1) ^ bit(input, C2) ^ inv;
                assert_eq!(bit(out, t), bit(input, t) ^ expected);
                assert_eq!(simulate(&twice, input).unwrap(), input);
            }
        }
    }

    #[test]
    fn test_xor3_template() {
        for inv in [false, true] {
            let t = QubitId(3);
            let mut once = Circuit::with_size("once", 4);
            compute_xor3(&mut once, C1, C2, C3, inv, t).unwrap();
            let mut twice = once.clone();
            compute_xor3(&mut twice, C1, C2, C3, inv, t).unwrap();
            for input in 0..16_u64 {
                let out = simulate(&once, input).unwrap();
                let expected = bit(input, C1) ^ bit(input, C2) ^ bit(input, C3) ^ inv;
                assert_eq!(bit(out, t), bit(input, t) ^ expected);
                assert_eq!(simulate(&twice, input).unwrap(), input);
            }
        }
    }

    #[test]
    fn test_maj_template() {
        let t = QubitId(3);
        for pol in 0..8_u8 {
            let (p1, p2, p3) = (pol & 1 != 0, pol & 2 != 0, pol & 4 != 0);
            let mut once = Circuit::with_size("once", 4);
            compute_maj(&mut once, C1, C2, C3, p1, p2, p3, t).unwrap();
            let mut twice = once.clone();
            compute_maj(&mut twice, C1, C2, C3, p1, p2, p3, t).unwrap();
            for input in 0..16_u64 {
                let (x1, x2, x3) = (bit(input, C1), bit(input, C2), bit(input, C3));
                let out = simulate(&once, input).unwrap();
                assert_eq!(bit(out, C1), x1);
                assert_eq!(bit(out, C2), x2);
                assert_eq!(bit(out, C3), x3);
                assert_eq!(bit(out, t), bit(input, t) ^ maj(x1 ^ p1, x2 ^ p2, x3 ^ p3));
                assert_eq!(simulate(&twice, input).unwrap(), input);
            }
        }
    }

    #[test]
    fn test_xor_block_skips_aliased_target() {
        let t = QubitId(1);
        let mut circuit = Circuit::with_size("blk", 3);
        compute_xor_block(&mut circuit, &[QubitId(0), t, QubitId(2)], t).unwrap();
        // Only two CNOTs; the aliased control contributes nothing.
        assert_eq!(circuit.num_gates(), 2);
        for input in 0..8_u64 {
            let out = simulate(&circuit, input).unwrap();
            let expected = bit(input, QubitId(0)) ^ bit(input, QubitId(2));
            assert_eq!(bit(out, t), bit(input, t) ^ expected);
        }
    }

    #[test]
    fn test_xor_inplace_both_positions() {
        for target_is_c1 in [false, true] {
            let t = if target_is_c1 { C1 } else { C2 };
            let mut circuit = Circuit::with_size("ip", 2);
            compute_xor_inplace(&mut circuit, C1, C2, false, t).unwrap();
            for input in 0..4_u64 {
                let out = simulate(&circuit, input).unwrap();
                assert_eq!(bit(out, t), bit(input, C1) ^ bit(input, C2));
            }
        }
    }

    #[test]
    fn test_xor3_inplace_all_positions() {
        for t in [C1, C2, C3] {
            let mut once = Circuit::with_size("ip3", 3);
            compute_xor3_inplace(&mut once, C1, C2, C3, false, t).unwrap();
            let mut twice = once.clone();
            compute_xor3_inplace(&mut twice, C1, C2, C3, false, t).unwrap();
            for input in 0..8_u64 {
                let out = simulate(&once, input).unwrap();
                let expected = bit(input, C1) ^ bit(input, C2) ^ bit(input, C3);
                assert_eq!(bit(out, t), expected);
                assert_eq!(simulate(&twice, input).unwrap(), input);
            }
        }
    }

    #[test]
    fn test_xor_inplace_mismatched_target_is_nonfatal() {
        let mut circuit = Circuit::with_size("bad", 3);
        // Target matches neither control: diagnostic only, no Err, no gate.
        compute_xor_inplace(&mut circuit, C1, C2, false, QubitId(2)).unwrap();
        assert_eq!(circuit.num_gates(), 0);
    }
}
