//! Loop detection and the center controller.
//!
//! Each turn records the `axis|phase` signature. Once the same signature has
//! been seen `threshold` times in a row the loop is resolved one of two ways:
//!
//! - **Enter center**: compress the tetra state and count one more pass. With
//!   two passes and two readings on hand, synthesize and report integration.
//! - **Force**: rotate to the next axis and restart the count.
//!
//! [`resolution_for`] is the whole policy for choosing between them.

use kanagi_types::{
    KanagiPhase, LoopOutcome, LoopPolicy, LoopSignature, LoopState, SessionId, TetraState,
    ThinkingAxis,
};

use crate::axis::phase_of;
use crate::dialectic;

/// Center passes required before integration is allowed.
pub const INTEGRATION_CENTER_PASSES: u32 = 2;

/// How a crossed threshold is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    EnterCenter,
    Force,
}

/// Center wins once the session has started reconciling, or when the tetra
/// already holds competing readings. Otherwise there is nothing to reconcile
/// and the loop is broken by force.
#[must_use]
pub fn resolution_for(tetra: &TetraState) -> Resolution {
    if tetra.center_accumulation > 0 || tetra.can_synthesize() {
        Resolution::EnterCenter
    } else {
        Resolution::Force
    }
}

/// Result of one observation.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopObservation {
    pub axis: ThinkingAxis,
    pub phase: KanagiPhase,
    pub outcome: LoopOutcome,
    pub loop_state: LoopState,
    pub tetra: TetraState,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoopObserver {
    policy: LoopPolicy,
}

impl LoopObserver {
    #[must_use]
    pub fn new(policy: LoopPolicy) -> Self {
        Self { policy }
    }

    /// Record this turn's axis and resolve the loop if the threshold is crossed.
    ///
    /// `previous` is `None` for a fresh session.
    #[must_use]
    pub fn observe(
        &self,
        session: &SessionId,
        previous: Option<LoopState>,
        axis: ThinkingAxis,
        tetra: TetraState,
    ) -> LoopObservation {
        let phase = phase_of(axis);
        let signature = LoopSignature::new(axis, phase);
        let state = match previous {
            Some(prev) => prev.record(signature),
            None => LoopState::fresh(signature),
        };
        let count = state.consecutive_count();

        if !self.policy.is_looping(count) {
            tracing::debug!(
                session = %session,
                signature = %state.signature(),
                count,
                "loop below threshold"
            );
            return LoopObservation {
                axis,
                phase,
                outcome: LoopOutcome::Normal,
                loop_state: state,
                tetra,
            };
        }

        match resolution_for(&tetra) {
            Resolution::Force => Self::force(session, axis, phase, tetra),
            Resolution::EnterCenter => Self::enter_center(session, axis, phase, state, tetra),
        }
    }

    fn force(
        session: &SessionId,
        axis: ThinkingAxis,
        phase: KanagiPhase,
        tetra: TetraState,
    ) -> LoopObservation {
        let to_axis = axis.rotated();
        let to_phase = phase_of(to_axis);
        let loop_state = LoopState::forced(LoopSignature::new(to_axis, to_phase));
        let outcome = LoopOutcome::ForcedTransition {
            from: phase,
            to: to_phase,
        };

        tracing::info!(
            session = %session,
            signature = %loop_state.signature(),
            outcome = outcome.as_str(),
            "loop forced to next axis"
        );
        LoopObservation {
            axis: to_axis,
            phase: to_phase,
            outcome,
            loop_state,
            tetra,
        }
    }

    fn enter_center(
        session: &SessionId,
        axis: ThinkingAxis,
        phase: KanagiPhase,
        state: LoopState,
        tetra: TetraState,
    ) -> LoopObservation {
        let tetra = dialectic::compress_at_center(tetra, session);
        let state = state.entering_center();

        if tetra.center_accumulation >= INTEGRATION_CENTER_PASSES && tetra.can_synthesize() {
            let tetra = dialectic::synthesize(tetra, session);
            let loop_state = state.integrated();
            tracing::info!(
                session = %session,
                signature = %loop_state.signature(),
                outcome = LoopOutcome::Integrated.as_str(),
                center_accumulation = tetra.center_accumulation,
                "loop integrated"
            );
            return LoopObservation {
                axis,
                phase: KanagiPhase::Integration,
                outcome: LoopOutcome::Integrated,
                loop_state,
                tetra,
            };
        }

        tracing::info!(
            session = %session,
            signature = %state.signature(),
            count = state.consecutive_count(),
            outcome = LoopOutcome::CenterReorganizing.as_str(),
            center_accumulation = tetra.center_accumulation,
            "loop entered center"
        );
        LoopObservation {
            axis,
            phase,
            outcome: LoopOutcome::CenterReorganizing,
            loop_state: state,
            tetra,
        }
    }
}
