//! Per-session loop tracking.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::{KanagiPhase, ThinkingAxis};

/// `axis|phase` key compared turn over turn to detect repetition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoopSignature(String);

impl LoopSignature {
    #[must_use]
    pub fn new(axis: ThinkingAxis, phase: KanagiPhase) -> Self {
        Self(format!("{}|{}", axis.as_str(), phase.as_str()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoopSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Loop state for one session.
///
/// # Invariants
///
/// - `consecutive_count >= 1` (a zero count is unrepresentable)
/// - The count resets to 1 whenever the signature changes or a transition
///   is forced, and increments otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopState {
    signature: LoopSignature,
    consecutive_count: NonZeroU32,
    is_in_center: bool,
}

impl LoopState {
    /// State for a session whose first observed signature is `signature`.
    #[must_use]
    pub fn fresh(signature: LoopSignature) -> Self {
        Self {
            signature,
            consecutive_count: NonZeroU32::MIN,
            is_in_center: false,
        }
    }

    /// Record this turn's signature.
    ///
    /// Same signature increments the count. A different signature restarts
    /// the count at 1 and leaves the center, since the repetition is broken.
    #[must_use]
    pub fn record(self, signature: LoopSignature) -> Self {
        if self.signature == signature {
            Self {
                consecutive_count: self.consecutive_count.saturating_add(1),
                ..self
            }
        } else {
            Self::fresh(signature)
        }
    }

    /// Jump to `signature` without counting it as a repetition.
    #[must_use]
    pub fn forced(signature: LoopSignature) -> Self {
        Self::fresh(signature)
    }

    #[must_use]
    pub fn entering_center(self) -> Self {
        Self {
            is_in_center: true,
            ..self
        }
    }

    /// Loop resolved through integration: restart counting on the current signature.
    #[must_use]
    pub fn integrated(self) -> Self {
        Self::fresh(self.signature)
    }

    #[must_use]
    pub fn signature(&self) -> &LoopSignature {
        &self.signature
    }

    #[must_use]
    pub fn consecutive_count(&self) -> u32 {
        self.consecutive_count.get()
    }

    #[must_use]
    pub fn is_in_center(&self) -> bool {
        self.is_in_center
    }
}
