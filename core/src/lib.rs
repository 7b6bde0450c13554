//! Deterministic reasoning core for Kanagi.
//!
//! Everything here is pure or operates on one session's state handed in by
//! the caller: axis transitions, loop detection with center escalation, the
//! tetra-state dialectic, centerline scoring and claim verification. No IO,
//! no clocks, no randomness.

pub mod axis;
pub mod dialectic;
mod fallback;
mod keywords;
pub mod loop_observer;
pub mod truth;
mod verifier;

pub use axis::{initial_axis, next_axis, phase_of};
pub use dialectic::{
    DialecticCore, InterpretationGenerator, Readings, TemplateInterpretations, TooFewReadings,
};
pub use fallback::make_fallback_laws;
pub use keywords::KeywordMatcher;
pub use loop_observer::{LoopObservation, LoopObserver, Resolution, resolution_for};
pub use truth::{TruthCore, calculate_thesis, detect_rhetorical_flags};
pub use verifier::filter_valid_claims;
