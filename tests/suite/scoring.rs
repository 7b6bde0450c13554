//! Centerline and confidence bounds, and the fire/water scenarios.

use kanagi_core::{TruthCore, detect_rhetorical_flags};
use kanagi_types::{Lexicon, RhetoricalFlag, TaiYo, UnitScore};

use crate::common::{SAMPLE_INPUTS, builder, empty_pack, khs_pack, law, turn};

fn assert_in_bounds(label: &str, scores: &kanagi_types::CenterlineScores) {
    let c = scores.centerline.value();
    assert!((-1.0..=1.0).contains(&c), "{label}: centerline {c}");
    for (name, score) in [
        ("confidence", scores.confidence),
        ("tai", scores.tai_score),
        ("yo", scores.yo_score),
        ("hi", scores.hi_score),
        ("mi", scores.mi_score),
    ] {
        let v = score.value();
        assert!((0.0..=1.0).contains(&v), "{label}: {name} {v}");
    }
}

#[test]
fn scores_stay_in_bounds_for_all_inputs() {
    let mut b = builder();
    for input in SAMPLE_INPUTS {
        let plain = b.build(turn(input, "bounds"));
        assert_in_bounds(input, &plain.scores);

        let empty = b.build(turn(input, "bounds-empty").with_evidence(empty_pack()));
        assert_in_bounds(input, &empty.scores);

        let rich = b.build(turn(input, "bounds-rich").with_evidence(khs_pack(
            "火水火水 躰用 正中 陽陰 熱冷 昇降",
            vec![
                law("KHS-P0006-T001", "躰", "火の躰は昇る"),
                law("KHS-P0006-T002", "用", "水の用は降る"),
            ],
        )));
        assert_in_bounds(input, &rich.scores);
    }
}

#[test]
fn ten_fire_characters_lean_fire() {
    let plan = builder().build(turn(&"火".repeat(10), "fresh"));
    assert!(plan.scores.hi_score > plan.scores.mi_score);
    assert!(plan.scores.centerline.value() > 0.0);
}

#[test]
fn empty_pack_flags_insufficient_evidence_at_minimum_confidence() {
    let pack = empty_pack();
    let truth = TruthCore::new(&Lexicon::default());
    let scores = truth.compute_centerline(&pack, &TaiYo::default());
    assert_eq!(scores.confidence, UnitScore::ZERO);

    let flags = detect_rhetorical_flags("", &[], &pack);
    assert!(flags.contains(&RhetoricalFlag::InsufficientEvidence));

    let plan = builder().build(turn("anything", "empty").with_evidence(empty_pack()));
    assert!(plan.rhetorical_flags.contains(&RhetoricalFlag::InsufficientEvidence));
    assert!(plan.scores.confidence.value() < 0.1);
}

#[test]
fn more_laws_raise_confidence() {
    let few = builder().build(turn("q", "few").with_evidence(khs_pack(
        "text",
        vec![law("KHS-P0006-T001", "a", "x")],
    )));
    let many = builder().build(turn("q", "many").with_evidence(khs_pack(
        "text",
        (1..=5)
            .map(|i| law(&format!("KHS-P0006-T{i:03}"), "a", "x"))
            .collect(),
    )));
    assert!(many.scores.confidence > few.scores.confidence);
}
