//! Every plan is provisional, for every session and input.

use crate::common::{SAMPLE_INPUTS, builder, empty_pack, khs_pack, law, turn};

#[test]
fn every_plan_is_provisional() {
    let mut b = builder();
    for (i, input) in SAMPLE_INPUTS.iter().enumerate() {
        for session in ["alpha", "beta"] {
            let plan = b.build(turn(input, session));
            assert!(plan.provisional.is_provisional(), "input {i} in {session}");
        }
    }
}

#[test]
fn provisional_is_literal_true_on_the_wire() {
    let mut b = builder();
    let with_laws = turn("躰", "wire").with_evidence(khs_pack(
        "正中に躰あり",
        vec![law("KHS-P0006-T001", "躰", "正中に躰あり")],
    ));
    for input in [turn("x", "wire"), with_laws, turn("y", "wire").with_evidence(empty_pack())] {
        let json = serde_json::to_value(b.build(input)).unwrap();
        assert_eq!(json["provisional"], serde_json::Value::Bool(true));
    }
}
