//! The (previous axis, input, turn count) mapping is pure.

use kanagi_core::{next_axis, phase_of};
use kanagi_engine::TurnInput;
use kanagi_types::ThinkingAxis;

use crate::common::{SAMPLE_INPUTS, builder};

fn previous_axes() -> impl Iterator<Item = Option<ThinkingAxis>> {
    std::iter::once(None).chain(ThinkingAxis::ROTATION.into_iter().map(Some))
}

#[test]
fn repeated_calls_agree() {
    for prev in previous_axes() {
        for input in SAMPLE_INPUTS {
            for turn_count in [0, 5, 19, 20, 40] {
                let a = next_axis(prev, input, turn_count);
                let b = next_axis(prev, input, turn_count);
                assert_eq!(a, b);
                assert_eq!(phase_of(a), phase_of(b));
                assert!(phase_of(a).is_quadrant());
            }
        }
    }
}

#[test]
fn cold_builders_produce_identical_plans() {
    for prev in previous_axes() {
        for input in SAMPLE_INPUTS {
            let make = || TurnInput::new(*input, "cold", 7, prev);
            let first = builder().build(make());
            let second = builder().build(make());
            assert_eq!(first.axis, second.axis);
            assert_eq!(first.phase, second.phase);
            assert_eq!(first.provisional, second.provisional);
            assert_eq!(
                serde_json::to_value(&first).unwrap(),
                serde_json::to_value(&second).unwrap()
            );
        }
    }
}

#[test]
fn executive_is_never_reached_from_observational() {
    for input in SAMPLE_INPUTS {
        assert_ne!(
            next_axis(Some(ThinkingAxis::Observational), input, 1),
            ThinkingAxis::Executive
        );
    }
}
