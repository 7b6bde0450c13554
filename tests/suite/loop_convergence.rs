//! Repetition drives a session into center and then integration.

use kanagi_core::LoopObserver;
use kanagi_engine::{CorePlanBuilder, InMemorySessionStore, SessionStore};
use kanagi_types::{
    CoreSettings, KanagiPhase, LoopOutcome, LoopPolicy, LoopSignature, LoopState, SessionId,
    TetraState, ThinkingAxis,
};

use crate::common::{SAMPLE_INPUTS, builder, turn};

#[test]
fn second_identical_turn_counts_two_and_resolves() {
    let mut b = builder();
    let first = b.build(turn("同じ質問", "s"));
    let second = b.build(turn("同じ質問", "s"));

    assert_eq!(first.loop_state.consecutive_count(), 1);
    assert_eq!(second.loop_state.consecutive_count(), 2);
    assert_eq!(first.axis, second.axis);
    assert!(matches!(
        second.loop_outcome,
        LoopOutcome::CenterReorganizing | LoopOutcome::ForcedTransition { .. }
    ));
}

#[test]
fn repetition_converges_for_every_sample() {
    for input in SAMPLE_INPUTS {
        let mut b = builder();
        let converged = (0..6).map(|_| b.build(turn(input, "loop"))).any(|plan| {
            plan.is_in_center() || plan.phase == KanagiPhase::Integration
        });
        assert!(converged, "{input:?} never reached center or integration");
    }
}

#[test]
fn integration_always_carries_tensions() {
    let mut b = builder();
    let mut integrations = 0;
    for _ in 0..9 {
        let plan = b.build(turn("火と水の対立", "tensions"));
        if plan.phase == KanagiPhase::Integration {
            integrations += 1;
            let integration = plan.tetra.integration.as_ref().expect("integration recorded");
            assert!(!integration.unresolved_tensions().is_empty());
            assert!(!integration.unresolved_tensions().as_slice().is_empty());
        }
    }
    assert!(integrations >= 2);
}

#[test]
fn sessions_do_not_share_loop_state() {
    let mut b = builder();
    b.build(turn("same", "a"));
    let other = b.build(turn("same", "b"));
    assert_eq!(other.loop_state.consecutive_count(), 1);
    assert_eq!(other.loop_outcome, LoopOutcome::Normal);
}

#[test]
fn deleted_session_starts_fresh() {
    let mut b = builder();
    b.build(turn("same", "gone"));
    b.store_mut().delete(&SessionId::from("gone"));
    let plan = b.build(turn("same", "gone"));
    assert_eq!(plan.loop_state.consecutive_count(), 1);
    assert_eq!(plan.tetra.interpretation.len(), 3);
}

#[test]
fn configured_threshold_delays_center() {
    let settings = CoreSettings {
        loop_policy: LoopPolicy::new(3).unwrap(),
        ..CoreSettings::default()
    };
    let mut b = CorePlanBuilder::new(InMemorySessionStore::new(), &settings);
    let outcomes: Vec<_> = (0..3).map(|_| b.build(turn("again", "t")).loop_outcome).collect();
    assert_eq!(outcomes[1], LoopOutcome::Normal);
    assert_eq!(outcomes[2], LoopOutcome::CenterReorganizing);
}

#[test]
fn stored_loop_without_readings_is_forced_forward() {
    let mut store = InMemorySessionStore::new();
    let session = SessionId::from("forced");
    let signature = LoopSignature::new(ThinkingAxis::Observational, KanagiPhase::LeftIn);
    store.set_loop_state(&session, LoopState::fresh(signature));

    let observation = LoopObserver::default().observe(
        &session,
        store.loop_state(&session),
        ThinkingAxis::Observational,
        store.tetra_state(&session).unwrap_or_default(),
    );
    assert_eq!(
        observation.outcome,
        LoopOutcome::ForcedTransition {
            from: KanagiPhase::LeftIn,
            to: KanagiPhase::LeftOut,
        }
    );
    assert_eq!(observation.axis, ThinkingAxis::Introspective);
    assert_eq!(observation.loop_state.consecutive_count(), 1);
    assert!(!observation.loop_state.is_in_center());
    assert_eq!(observation.tetra, TetraState::default());
}
