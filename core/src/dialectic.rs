//! Tetra-state dialectic: contradiction generation, center-time compression
//! and non-concluding synthesis.
//!
//! Every operation takes a session's [`TetraState`] by value and returns the
//! next one. Persistence is the caller's business.
//!
//! Layers only shrink through [`compress_at_center`], which keeps the first
//! and last entries and replaces the middle with a count marker, so that
//! compression is always visible downstream.

use std::sync::OnceLock;

use kanagi_types::{
    Integration, SessionId, TetraLayer, TetraState, UnresolvedTensions, compressed_count,
    compression_marker, text,
};
use regex::Regex;
use thiserror::Error;

/// Minimum number of readings any generator must produce.
pub const MIN_READINGS: usize = 2;

const TENSION_PREVIEW_CHARS: usize = 30;
const FILLER_TENSION: &str = "The readings are held open and keep rotating.";

const DECLARATIVE_CUES: &[&str] = &["です", "である", " is ", " are "];
const VALUE_CUES: &[&str] = &["良い", "悪い", "正しい", "間違い", "good", "bad", "right", "wrong"];
const ACTION_CUES: &[&str] = &["する", "実行", "行う", "should", "must", "let's", "will "];

#[derive(Debug, Clone, Copy, Error)]
#[error("an interpretation generator must produce at least {MIN_READINGS} readings, got {got}")]
pub struct TooFewReadings {
    pub got: usize,
}

/// Two or more readings of one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readings(Vec<String>);

impl Readings {
    pub fn new(readings: Vec<String>) -> Result<Self, TooFewReadings> {
        if readings.len() < MIN_READINGS {
            return Err(TooFewReadings {
                got: readings.len(),
            });
        }
        Ok(Self(readings))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Source of competing readings for an input.
///
/// The returned [`Readings`] always holds at least two entries, which is what
/// keeps the integration precondition reachable.
pub trait InterpretationGenerator {
    fn interpret(&self, input: &str) -> Readings;
}

/// Affirming, negating and context-dependent template readings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateInterpretations;

impl InterpretationGenerator for TemplateInterpretations {
    fn interpret(&self, input: &str) -> Readings {
        let input = input.trim();
        Readings(vec![
            format!("\"{input}\" may carry an affirming meaning."),
            format!("\"{input}\" may equally carry a negating meaning."),
            format!("\"{input}\" may change meaning with its context."),
        ])
    }
}

/// Tetra-state engine parameterized by its interpretation source.
#[derive(Debug, Clone, Default)]
pub struct DialecticCore<G = TemplateInterpretations> {
    generator: G,
}

impl<G: InterpretationGenerator> DialecticCore<G> {
    #[must_use]
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Append facts, readings, values and actions drawn from `input`.
    ///
    /// A supplied thesis or antithesis replaces the stored one.
    #[must_use]
    pub fn create_contradictions(
        &self,
        mut tetra: TetraState,
        input: &str,
        session: &SessionId,
        thesis: Option<&str>,
        antithesis: Option<&str>,
    ) -> TetraState {
        let facts = extract_facts(input);
        let readings = self.generator.interpret(input).into_vec();
        let values = extract_cued(input, VALUE_CUES, "Value judgement present");
        let actions = extract_cued(input, ACTION_CUES, "Course of action suggested");

        tracing::debug!(
            session = %session,
            facts = facts.len(),
            readings = readings.len(),
            values = values.len(),
            actions = actions.len(),
            "contradictions created"
        );

        tetra.fact.extend(facts);
        tetra.interpretation.extend(readings);
        tetra.value.extend(values);
        tetra.action.extend(actions);

        if let Some(thesis) = thesis.filter(|t| !t.trim().is_empty()) {
            tetra.thesis = Some(thesis.to_string());
        }
        if let Some(antithesis) = antithesis.filter(|t| !t.trim().is_empty()) {
            tetra.antithesis = Some(antithesis.to_string());
        }
        tetra
    }

    #[must_use]
    pub fn compress_at_center(&self, tetra: TetraState, session: &SessionId) -> TetraState {
        compress_at_center(tetra, session)
    }

    #[must_use]
    pub fn synthesize(&self, tetra: TetraState, session: &SessionId) -> TetraState {
        synthesize(tetra, session)
    }
}

/// Summarize every layer longer than two entries, advance the rotation
/// depth of an existing integration, and count one more pass through center.
#[must_use]
pub fn compress_at_center(mut tetra: TetraState, session: &SessionId) -> TetraState {
    for layer in TetraLayer::ALL {
        let entries = tetra.layer_mut(layer);
        compress_layer(entries);
    }
    tetra.integration = tetra.integration.map(Integration::rotated);
    tetra.center_accumulation = tetra.center_accumulation.saturating_add(1);

    tracing::debug!(
        session = %session,
        center_accumulation = tetra.center_accumulation,
        "tetra compressed at center"
    );
    tetra
}

fn compress_layer(entries: &mut Vec<String>) {
    if entries.len() <= 2 {
        return;
    }
    let last = entries.len() - 1;
    let represented: usize = entries[1..last]
        .iter()
        .map(|entry| compressed_count(entry).unwrap_or(1))
        .sum();
    entries.drain(1..last);
    entries.insert(1, compression_marker(represented));
}

/// Build an observation circle from the interpretations.
///
/// No-op with fewer than two interpretations. The narrative presents every
/// reading as a standing vantage point and never concludes.
#[must_use]
pub fn synthesize(mut tetra: TetraState, session: &SessionId) -> TetraState {
    if !tetra.can_synthesize() {
        tracing::debug!(session = %session, "synthesis skipped: fewer than two interpretations");
        return tetra;
    }

    let readings = &tetra.interpretation;
    let mut circle = String::new();
    for (i, reading) in readings.iter().enumerate() {
        let lead = if i == 0 {
            "On one hand, "
        } else {
            "On the other hand, "
        };
        circle.push_str(lead);
        circle.push_str(reading);
        circle.push_str("\n\n");
    }
    circle.push_str(
        "From the current vantage point these readings are woven together and keep rotating; \
         none of them absorbs the others.",
    );

    let tensions = UnresolvedTensions::new(pairwise_tensions(readings))
        .unwrap_or_else(|_| UnresolvedTensions::filler(FILLER_TENSION));
    let depth = tetra
        .integration
        .as_ref()
        .map_or(0, Integration::rotation_depth);

    tracing::debug!(
        session = %session,
        tensions = tensions.len(),
        rotation_depth = depth,
        "observation circle synthesized"
    );
    tetra.integration = Some(Integration::new(circle, tensions, depth));
    tetra
}

fn pairwise_tensions(readings: &[String]) -> Vec<String> {
    let mut tensions = Vec::with_capacity(readings.len() * readings.len().saturating_sub(1) / 2);
    for (i, left) in readings.iter().enumerate() {
        for right in &readings[i + 1..] {
            tensions.push(format!(
                "{}... versus {}... stays unresolved",
                text::take_chars(left, TENSION_PREVIEW_CHARS),
                text::take_chars(right, TENSION_PREVIEW_CHARS),
            ));
        }
    }
    tensions
}

fn extract_facts(input: &str) -> Vec<String> {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    let number = NUMBER.get_or_init(|| Regex::new(r"\d+").expect("valid number regex"));

    let mut facts = Vec::new();
    let trimmed = input.trim();
    if DECLARATIVE_CUES.iter().any(|cue| input.contains(cue)) && !trimmed.is_empty() {
        facts.push(trimmed.to_string());
    }
    if let Some(m) = number.find(input) {
        facts.push(format!("Contains a number: {}", m.as_str()));
    }
    facts
}

fn extract_cued(input: &str, cues: &[&str], label: &str) -> Vec<String> {
    let lowered = input.to_lowercase();
    if cues.iter().any(|cue| lowered.contains(cue)) {
        vec![format!("{label}: {}", input.trim())]
    } else {
        Vec::new()
    }
}
