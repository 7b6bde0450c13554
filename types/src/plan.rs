//! Per-turn output record and its parts.

use serde::{Deserialize, Serialize};

use crate::{
    Centerline, EvidencePack, KanagiPhase, LawId, LoopState, NonEmptyString, Provisional,
    TetraState, ThinkingAxis, UnitScore, VerifiedClaim,
};

/// A structural (tai) or functional (yo) excerpt with the laws it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Excerpt {
    pub text: String,
    pub law_ids: Vec<LawId>,
}

impl Excerpt {
    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Structure/function split of the evidence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaiYo {
    pub tai: Excerpt,
    pub yo: Excerpt,
}

/// Rhetorical weakness detected in a draft. Declaration order is check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RhetoricalFlag {
    GenericTemplate,
    UnsupportedAssertion,
    CircularExplanation,
    InsufficientEvidence,
}

impl RhetoricalFlag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RhetoricalFlag::GenericTemplate => "generic_template",
            RhetoricalFlag::UnsupportedAssertion => "unsupported_assertion",
            RhetoricalFlag::CircularExplanation => "circular_explanation",
            RhetoricalFlag::InsufficientEvidence => "insufficient_evidence",
        }
    }
}

/// Numeric balance of the evidence for one turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterlineScores {
    pub tai_score: UnitScore,
    pub yo_score: UnitScore,
    pub hi_score: UnitScore,
    pub mi_score: UnitScore,
    pub centerline: Centerline,
    pub confidence: UnitScore,
}

/// How the loop observer resolved this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoopOutcome {
    /// Below threshold: nothing to resolve.
    Normal,
    /// Threshold crossed with nothing to reconcile: jumped to a fallback phase.
    ForcedTransition {
        from: KanagiPhase,
        to: KanagiPhase,
    },
    /// Entered (or stayed in) center without enough material to integrate.
    CenterReorganizing,
    /// Center resolved into integration and synthesis ran.
    Integrated,
}

impl LoopOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LoopOutcome::Normal => "normal",
            LoopOutcome::ForcedTransition { .. } => "forced_transition",
            LoopOutcome::CenterReorganizing => "center_reorganizing",
            LoopOutcome::Integrated => "integrated",
        }
    }
}

/// Structured decision record for one turn.
///
/// Always provisional: later turns or evidence may revise it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorePlan {
    pub question: String,
    pub axis: ThinkingAxis,
    pub phase: KanagiPhase,
    pub loop_outcome: LoopOutcome,
    pub loop_state: LoopState,
    pub tetra: TetraState,
    pub evidence: EvidencePack,
    pub taiyo: TaiYo,
    pub used_law_ids: Vec<LawId>,
    pub thesis: NonEmptyString,
    pub rhetorical_flags: Vec<RhetoricalFlag>,
    pub scores: CenterlineScores,
    pub claims: Vec<VerifiedClaim>,
    pub response_draft: String,
    pub detail_draft: String,
    pub provisional: Provisional,
}

impl CorePlan {
    #[must_use]
    pub fn is_in_center(&self) -> bool {
        self.loop_state.is_in_center()
    }
}
