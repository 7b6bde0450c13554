//! Tetra-state: four parallel interpretive layers tracked per session.
//!
//! Layers are append-only. The single exception is center compression,
//! which replaces a middle span with a count marker ([`compression_marker`])
//! so the shrink stays detectable downstream.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the four tetra layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TetraLayer {
    Fact,
    Interpretation,
    Value,
    Action,
}

impl TetraLayer {
    pub const ALL: [TetraLayer; 4] = [
        TetraLayer::Fact,
        TetraLayer::Interpretation,
        TetraLayer::Value,
        TetraLayer::Action,
    ];
}

const MARKER_PREFIX: &str = "[compressed: ";
const MARKER_SUFFIX: &str = " entries]";

/// Marker standing in for `count` compressed entries.
#[must_use]
pub fn compression_marker(count: usize) -> String {
    format!("{MARKER_PREFIX}{count}{MARKER_SUFFIX}")
}

/// Number of entries a compression marker stands for, or `None` for a plain entry.
#[must_use]
pub fn compressed_count(entry: &str) -> Option<usize> {
    entry
        .strip_prefix(MARKER_PREFIX)?
        .strip_suffix(MARKER_SUFFIX)?
        .parse()
        .ok()
}

#[derive(Debug, Clone, Copy, Error)]
#[error("an integration record needs at least one unresolved tension")]
pub struct NoTensionsError;

/// Non-empty list of tensions held open by a synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct UnresolvedTensions(Vec<String>);

impl UnresolvedTensions {
    pub fn new(tensions: Vec<String>) -> Result<Self, NoTensionsError> {
        if tensions.is_empty() {
            Err(NoTensionsError)
        } else {
            Ok(Self(tensions))
        }
    }

    /// A single filler tension, used when too few readings exist to pair.
    #[must_use]
    pub fn filler(text: impl Into<String>) -> Self {
        Self(vec![text.into()])
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl TryFrom<Vec<String>> for UnresolvedTensions {
    type Error = NoTensionsError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnresolvedTensions> for Vec<String> {
    fn from(value: UnresolvedTensions) -> Self {
        value.0
    }
}

/// Observation circle produced by synthesis. Never a conclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    observation_circle: String,
    unresolved_tensions: UnresolvedTensions,
    rotation_depth: u32,
}

impl Integration {
    #[must_use]
    pub fn new(
        observation_circle: String,
        unresolved_tensions: UnresolvedTensions,
        rotation_depth: u32,
    ) -> Self {
        Self {
            observation_circle,
            unresolved_tensions,
            rotation_depth,
        }
    }

    #[must_use]
    pub fn observation_circle(&self) -> &str {
        &self.observation_circle
    }

    #[must_use]
    pub fn unresolved_tensions(&self) -> &UnresolvedTensions {
        &self.unresolved_tensions
    }

    #[must_use]
    pub fn rotation_depth(&self) -> u32 {
        self.rotation_depth
    }

    /// Same record, one rotation deeper.
    #[must_use]
    pub fn rotated(self) -> Self {
        Self {
            rotation_depth: self.rotation_depth.saturating_add(1),
            ..self
        }
    }
}

/// The four layers plus dialectic bookkeeping for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TetraState {
    pub fact: Vec<String>,
    pub interpretation: Vec<String>,
    pub value: Vec<String>,
    pub action: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thesis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antithesis: Option<String>,
    #[serde(default)]
    pub integration: Option<Integration>,
    #[serde(default)]
    pub center_accumulation: u32,
}

impl TetraState {
    #[must_use]
    pub fn layer(&self, layer: TetraLayer) -> &[String] {
        match layer {
            TetraLayer::Fact => &self.fact,
            TetraLayer::Interpretation => &self.interpretation,
            TetraLayer::Value => &self.value,
            TetraLayer::Action => &self.action,
        }
    }

    pub fn layer_mut(&mut self, layer: TetraLayer) -> &mut Vec<String> {
        match layer {
            TetraLayer::Fact => &mut self.fact,
            TetraLayer::Interpretation => &mut self.interpretation,
            TetraLayer::Value => &mut self.value,
            TetraLayer::Action => &mut self.action,
        }
    }

    /// Whether synthesis is permitted: at least two interpretations.
    #[must_use]
    pub fn can_synthesize(&self) -> bool {
        self.interpretation.len() >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_round_trips_count() {
        let marker = compression_marker(7);
        assert_eq!(marker, "[compressed: 7 entries]");
        assert_eq!(compressed_count(&marker), Some(7));
        assert_eq!(compressed_count("plain reading"), None);
        assert_eq!(compressed_count("[compressed: many entries]"), None);
    }

    #[test]
    fn tensions_reject_empty() {
        assert!(UnresolvedTensions::new(Vec::new()).is_err());
        assert!(serde_json::from_str::<UnresolvedTensions>("[]").is_err());
        assert_eq!(UnresolvedTensions::filler("open").len(), 1);
    }

    #[test]
    fn fresh_tetra_cannot_synthesize() {
        let mut tetra = TetraState::default();
        assert!(!tetra.can_synthesize());
        tetra.layer_mut(TetraLayer::Interpretation).push("a".into());
        tetra.layer_mut(TetraLayer::Interpretation).push("b".into());
        assert!(tetra.can_synthesize());
    }

    #[test]
    fn tetra_wire_shape() {
        let tetra = TetraState::default();
        let json = serde_json::to_value(&tetra).unwrap();
        assert_eq!(json["centerAccumulation"], 0);
        assert!(json["integration"].is_null());
        assert!(json.get("thesis").is_none());
    }
}
