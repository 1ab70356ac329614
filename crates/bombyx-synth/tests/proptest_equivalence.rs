//! Property tests: randomly structured networks synthesize to circuits
//! that agree with network simulation under every strategy.

use proptest::prelude::*;

use bombyx_ir::sim::{bit, simulate};
use bombyx_ir::Circuit;
use bombyx_net::{LogicNetwork, Network, Signal};
use bombyx_synth::{
    synthesize, BennettInPlaceStrategy, BennettStrategy, MappingStrategy,
    PebblingStrategy, PprmSynthesis, SynthesisParams,
};

#[derive(Debug, Clone, Copy)]
struct GateSpec {
    kind: u8,
    fanins: [prop::sample::Index; 3],
    complements: [bool; 3],
}

fn arb_gate() -> impl Strategy<Value = GateSpec> {
    (
        0_u8..5,
        prop::array::uniform3(any::<prop::sample::Index>()),
        prop::array::uniform3(any::<bool>()),
    )
        .prop_map(|(kind, fanins, complements)| GateSpec {
            kind,
            fanins,
            complements,
        })
}

fn arb_network() -> impl Strategy<Value = Network> {
    (
        2_usize..=4,
        prop::collection::vec(arb_gate(), 1..10),
        any::<prop::sample::Index>(),
        any::<bool>(),
    )
        .prop_map(|(num_pis, gates, po, po_complement)| {
            build_network(num_pis, &gates, po, po_complement)
        })
}

fn build_network(
    num_pis: usize,
    gates: &[GateSpec],
    po: prop::sample::Index,
    po_complement: bool,
) -> Network {
    let mut ntk = Network::new();
    let mut signals = vec![ntk.constant(false)];
    for _ in 0..num_pis {
        signals.push(ntk.add_pi());
    }
    for spec in gates {
        let picked: Vec<Signal> = spec
            .fanins
            .iter()
            .zip(spec.complements)
            .map(|(idx, c)| {
                let s = signals[idx.index(signals.len())];
                if c {
                    !s
                } else {
                    s
                }
            })
            .collect();
        // Gate templates assume distinct fanin wires.
        if picked[0].node == picked[1].node
            || (spec.kind >= 3
                && (picked[0].node == picked[2].node || picked[1].node == picked[2].node))
        {
            continue;
        }
        let s = match spec.kind {
            0 => ntk.add_and(picked[0], picked[1]),
            1 => ntk.add_or(picked[0], picked[1]),
            2 => ntk.add_xor(picked[0], picked[1]),
            3 => ntk.add_xor3(picked[0], picked[1], picked[2]),
            _ => ntk.add_maj(picked[0], picked[1], picked[2]),
        };
        signals.push(s);
    }
    // Always at least one gate, so schedules are never empty.
    if ntk.gates().is_empty() {
        let g = ntk.add_and(signals[1], signals[2]);
        signals.push(g);
    }
    let out = signals[signals.len() - 1 - po.index(signals.len() - num_pis - 1)];
    ntk.add_po(if po_complement { !out } else { out });
    ntk
}

fn check_strategy<M: MappingStrategy>(ntk: &Network, strategy: &mut M) {
    let mut circuit = Circuit::new("prop");
    let stats = synthesize(
        &mut circuit,
        ntk,
        &PprmSynthesis,
        strategy,
        &SynthesisParams::default(),
    )
    .expect("synthesis failed");

    let num_pis = ntk.num_pis();
    for assignment in 0..(1_u64 << num_pis) {
        let mut state = 0_u64;
        for (i, q) in stats.input_qubits.iter().enumerate() {
            if assignment >> i & 1 == 1 {
                state |= 1 << q.index();
            }
        }
        let end = simulate(&circuit, state).expect("simulation failed");
        let inputs: Vec<bool> = (0..num_pis).map(|i| assignment >> i & 1 == 1).collect();
        let expected = ntk.simulate(&inputs);
        for (o, q) in stats.output_qubits.iter().enumerate() {
            prop_assert_eq_bool(bit(end, *q), expected[o], assignment, strategy.name());
        }
    }
}

fn prop_assert_eq_bool(got: bool, want: bool, assignment: u64, strategy: &str) {
    assert_eq!(
        got, want,
        "{strategy} circuit differs from network on assignment {assignment:#b}"
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_bennett_matches_network(ntk in arb_network()) {
        check_strategy(&ntk, &mut BennettStrategy::new(&ntk));
    }

    #[test]
    fn prop_bennett_inplace_matches_network(ntk in arb_network()) {
        check_strategy(&ntk, &mut BennettInPlaceStrategy::new(&ntk));
    }

    #[test]
    fn prop_pebbling_matches_network(ntk in arb_network()) {
        check_strategy(&ntk, &mut PebblingStrategy::new(&ntk));
    }

    #[test]
    fn prop_inplace_never_worse_than_bennett(ntk in arb_network()) {
        let mut c1 = Circuit::new("plain");
        let s1 = synthesize(
            &mut c1,
            &ntk,
            &PprmSynthesis,
            &mut BennettStrategy::new(&ntk),
            &SynthesisParams::default(),
        ).unwrap();
        let mut c2 = Circuit::new("inplace");
        let s2 = synthesize(
            &mut c2,
            &ntk,
            &PprmSynthesis,
            &mut BennettInPlaceStrategy::new(&ntk),
            &SynthesisParams::default(),
        ).unwrap();
        prop_assert!(s2.required_ancillae <= s1.required_ancillae);
    }
}
