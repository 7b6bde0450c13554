//! Thinking axes and kanagi phases.
//!
//! Both are closed enums. Every function over them is total; there is no
//! "unknown axis" at runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cognitive posture for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThinkingAxis {
    Observational,
    Introspective,
    Constructive,
    Executive,
}

/// Short verb form of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisAlias {
    Observe,
    Reflect,
    Build,
    Act,
}

impl ThinkingAxis {
    /// All axes in rotation order.
    pub const ROTATION: [ThinkingAxis; 4] = [
        ThinkingAxis::Observational,
        ThinkingAxis::Introspective,
        ThinkingAxis::Constructive,
        ThinkingAxis::Executive,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ThinkingAxis::Observational => "observational",
            ThinkingAxis::Introspective => "introspective",
            ThinkingAxis::Constructive => "constructive",
            ThinkingAxis::Executive => "executive",
        }
    }

    #[must_use]
    pub const fn alias(self) -> AxisAlias {
        match self {
            ThinkingAxis::Observational => AxisAlias::Observe,
            ThinkingAxis::Introspective => AxisAlias::Reflect,
            ThinkingAxis::Constructive => AxisAlias::Build,
            ThinkingAxis::Executive => AxisAlias::Act,
        }
    }

    /// Next axis along the rotation. Executive wraps to observational.
    #[must_use]
    pub const fn rotated(self) -> ThinkingAxis {
        match self {
            ThinkingAxis::Observational => ThinkingAxis::Introspective,
            ThinkingAxis::Introspective => ThinkingAxis::Constructive,
            ThinkingAxis::Constructive => ThinkingAxis::Executive,
            ThinkingAxis::Executive => ThinkingAxis::Observational,
        }
    }
}

impl AxisAlias {
    #[must_use]
    pub const fn axis(self) -> ThinkingAxis {
        match self {
            AxisAlias::Observe => ThinkingAxis::Observational,
            AxisAlias::Reflect => ThinkingAxis::Introspective,
            AxisAlias::Build => ThinkingAxis::Constructive,
            AxisAlias::Act => ThinkingAxis::Executive,
        }
    }
}

impl From<AxisAlias> for ThinkingAxis {
    fn from(alias: AxisAlias) -> Self {
        alias.axis()
    }
}

impl fmt::Display for ThinkingAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quadrant label for a turn, plus the terminal integration phase.
///
/// `Integration` is only reached by loop resolution. No axis maps to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KanagiPhase {
    #[serde(rename = "L-IN")]
    LeftIn,
    #[serde(rename = "L-OUT")]
    LeftOut,
    #[serde(rename = "R-IN")]
    RightIn,
    #[serde(rename = "R-OUT")]
    RightOut,
    #[serde(rename = "INTEGRATION")]
    Integration,
}

impl KanagiPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            KanagiPhase::LeftIn => "L-IN",
            KanagiPhase::LeftOut => "L-OUT",
            KanagiPhase::RightIn => "R-IN",
            KanagiPhase::RightOut => "R-OUT",
            KanagiPhase::Integration => "INTEGRATION",
        }
    }

    #[must_use]
    pub const fn is_quadrant(self) -> bool {
        !matches!(self, KanagiPhase::Integration)
    }
}

impl fmt::Display for KanagiPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
