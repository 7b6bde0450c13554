//! Thesis construction, rhetorical checks and centerline scoring.
//!
//! Scores follow fixed formulas so a plan can be audited by hand:
//!
//! ```text
//! tai, yo    = min(1, 0.7 * hit_ratio(excerpt) + 0.3 * min(1, chars / 200))
//! hi, mi     = hit_ratio(body) over the fire / water lexicon
//! centerline = clamp(-1, 1, (hi - mi) + 0.3 * (tai - yo))
//! confidence = clamp(0, 1, 0.7 * min(1, laws / 5) + 0.3 * |centerline|)
//! ```

use std::sync::OnceLock;

use kanagi_types::{
    Centerline, CenterlineScores, Claim, EvidenceLaw, EvidencePack, Excerpt, Lexicon,
    NonEmptyStaticStr, NonEmptyString, RhetoricalFlag, TaiYo, UnitScore, text,
};
use regex::Regex;

use crate::keywords::KeywordMatcher;

/// Characters of a law quote kept in a tai/yo excerpt.
pub const EXCERPT_CHARS: usize = 160;

const EXCERPT_LENGTH_SATURATION: f64 = 200.0;
const LAW_COUNT_SATURATION: f64 = 5.0;
const PREVIEW_CHARS: usize = 60;

const BOTH_LEAD: NonEmptyStaticStr = NonEmptyStaticStr::new("Centerline thesis: ");
const TAI_ONLY_LEAD: NonEmptyStaticStr =
    NonEmptyStaticStr::new("Partial grounding (structure only): ");
const YO_ONLY_LEAD: NonEmptyStaticStr =
    NonEmptyStaticStr::new("Partial grounding (function only): ");
const NEITHER_LEAD: NonEmptyStaticStr = NonEmptyStaticStr::new("Insufficient grounding: ");

const GENERIC_PHRASES: &[&str] = &[
    "一般的に",
    "人それぞれ",
    "状況による",
    "場合による",
    "in general",
    "generally speaking",
    "it depends",
    "everyone is different",
];

const ASSERTIVE_PHRASES: &[&str] = &[
    "必ず",
    "絶対",
    "間違いなく",
    "断言",
    "definitely",
    "certainly",
    "undoubtedly",
    "always",
    "without doubt",
];

/// Definition markers whose predicate may run straight on from the subject.
const CJK_DEFINITION_MARKERS: &[&str] = &["とは", "というのは"];
/// Definition markers whose restated subject must end on a word boundary.
const LATIN_DEFINITION_MARKERS: &[&str] = &[" is ", " means ", " because "];

/// Build the thesis for a turn.
///
/// Exactly one of three branches applies: both excerpts present, one
/// present, or neither.
#[must_use]
pub fn calculate_thesis(tai: &Excerpt, yo: &Excerpt, question: &str) -> NonEmptyString {
    let question = text::preview(question, PREVIEW_CHARS);
    match (tai.is_present(), yo.is_present()) {
        (true, true) => NonEmptyString::prefixed(
            BOTH_LEAD,
            &format!(
                "the structure \"{}\" and the function \"{}\" describe one subject from two sides; \"{question}\" is read along the line between them.",
                text::preview(&tai.text, PREVIEW_CHARS),
                text::preview(&yo.text, PREVIEW_CHARS),
            ),
        ),
        (true, false) => NonEmptyString::prefixed(
            TAI_ONLY_LEAD,
            &format!(
                "\"{}\" attests the structure behind \"{question}\"; its function is not yet attested.",
                text::preview(&tai.text, PREVIEW_CHARS),
            ),
        ),
        (false, true) => NonEmptyString::prefixed(
            YO_ONLY_LEAD,
            &format!(
                "\"{}\" attests how \"{question}\" operates; its structure is not yet attested.",
                text::preview(&yo.text, PREVIEW_CHARS),
            ),
        ),
        (false, false) => NonEmptyString::prefixed(
            NEITHER_LEAD,
            &format!(
                "no structural or functional excerpt supports an answer to \"{question}\"."
            ),
        ),
    }
}

/// Every rhetorical weakness found, in declaration order of [`RhetoricalFlag`].
#[must_use]
pub fn detect_rhetorical_flags(
    response: &str,
    claims: &[Claim],
    evidence: &EvidencePack,
) -> Vec<RhetoricalFlag> {
    let lowered = response.to_lowercase();
    let mut flags = Vec::new();

    if GENERIC_PHRASES.iter().any(|p| lowered.contains(p)) {
        flags.push(RhetoricalFlag::GenericTemplate);
    }
    if claims.iter().any(|claim| {
        let text = claim.text.to_lowercase();
        !claim.is_grounded() && ASSERTIVE_PHRASES.iter().any(|p| text.contains(p))
    }) {
        flags.push(RhetoricalFlag::UnsupportedAssertion);
    }
    if is_circular(response) {
        flags.push(RhetoricalFlag::CircularExplanation);
    }
    if evidence.laws.is_empty() {
        flags.push(RhetoricalFlag::InsufficientEvidence);
    }
    flags
}

fn is_circular(response: &str) -> bool {
    static TAUTOLOGY: OnceLock<Regex> = OnceLock::new();
    let tautology = TAUTOLOGY.get_or_init(|| {
        Regex::new(r"(?i)\bby definition\b|\bit is what it is\b|そういうものだ")
            .expect("valid tautology regex")
    });
    if tautology.is_match(response) {
        return true;
    }

    response
        .split(['。', '.', '!', '?', '！', '？', '\n'])
        .any(restates_subject)
}

fn restates_subject(sentence: &str) -> bool {
    let sentence = sentence.trim().to_lowercase();
    let restated = |marker: &&str, whole_word: bool| {
        sentence.split_once(*marker).is_some_and(|(left, right)| {
            let left = left.trim();
            if text::char_len(left) < 2 {
                return false;
            }
            right.trim_start().strip_prefix(left).is_some_and(|rest| {
                !whole_word || rest.chars().next().is_none_or(|c| !c.is_alphanumeric())
            })
        })
    };
    CJK_DEFINITION_MARKERS.iter().any(|m| restated(m, false))
        || LATIN_DEFINITION_MARKERS.iter().any(|m| restated(m, true))
}

/// Keyword matchers for the four scoring vocabularies.
#[derive(Debug, Clone)]
pub struct TruthCore {
    tai: KeywordMatcher,
    yo: KeywordMatcher,
    fire: KeywordMatcher,
    water: KeywordMatcher,
}

impl TruthCore {
    #[must_use]
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            tai: KeywordMatcher::new(&lexicon.tai),
            yo: KeywordMatcher::new(&lexicon.yo),
            fire: KeywordMatcher::new(&lexicon.fire),
            water: KeywordMatcher::new(&lexicon.water),
        }
    }

    /// Choose the structural and functional excerpts.
    ///
    /// Tai is the first law touching the tai vocabulary, else the first law.
    /// Yo is the first law touching the yo vocabulary, else the second, else
    /// the first. No laws means two empty excerpts.
    #[must_use]
    pub fn pick_tai_yo(&self, laws: &[EvidenceLaw]) -> TaiYo {
        let touches = |matcher: &KeywordMatcher, law: &EvidenceLaw| {
            matcher.any_match(&law.title) || matcher.any_match(&law.quote)
        };
        let tai = laws
            .iter()
            .find(|law| touches(&self.tai, *law))
            .or_else(|| laws.first());
        let yo = laws
            .iter()
            .find(|law| touches(&self.yo, *law))
            .or_else(|| laws.get(1))
            .or_else(|| laws.first());

        TaiYo {
            tai: tai.map(excerpt_of).unwrap_or_default(),
            yo: yo.map(excerpt_of).unwrap_or_default(),
        }
    }

    /// Score a pack on its own page text.
    #[must_use]
    pub fn compute_centerline(&self, pack: &EvidencePack, taiyo: &TaiYo) -> CenterlineScores {
        self.score(&pack.page_text, taiyo, pack.laws.len())
    }

    /// Score a pack together with the turn's message, which is weighed as
    /// part of the fire/water body.
    #[must_use]
    pub fn compute_centerline_for_turn(
        &self,
        pack: &EvidencePack,
        taiyo: &TaiYo,
        message: &str,
    ) -> CenterlineScores {
        let body = if pack.page_text.is_empty() {
            message.to_string()
        } else {
            format!("{}\n{message}", pack.page_text)
        };
        self.score(&body, taiyo, pack.laws.len())
    }

    fn score(&self, body: &str, taiyo: &TaiYo, law_count: usize) -> CenterlineScores {
        let tai_score = excerpt_score(&self.tai, &taiyo.tai.text);
        let yo_score = excerpt_score(&self.yo, &taiyo.yo.text);
        let hi_score = UnitScore::clamped(self.fire.hit_ratio(body));
        let mi_score = UnitScore::clamped(self.water.hit_ratio(body));

        let centerline = Centerline::clamped(
            (hi_score.value() - mi_score.value())
                + 0.3 * (tai_score.value() - yo_score.value()),
        );
        let volume = (law_count as f64 / LAW_COUNT_SATURATION).min(1.0);
        let confidence = UnitScore::clamped(0.7 * volume + 0.3 * centerline.magnitude().value());

        CenterlineScores {
            tai_score,
            yo_score,
            hi_score,
            mi_score,
            centerline,
            confidence,
        }
    }
}

fn excerpt_of(law: &EvidenceLaw) -> Excerpt {
    Excerpt {
        text: text::take_chars(&law.quote, EXCERPT_CHARS).to_string(),
        law_ids: vec![law.id.clone()],
    }
}

fn excerpt_score(matcher: &KeywordMatcher, excerpt: &str) -> UnitScore {
    let length = (text::char_len(excerpt) as f64 / EXCERPT_LENGTH_SATURATION).min(1.0);
    UnitScore::clamped((0.7 * matcher.hit_ratio(excerpt) + 0.3 * length).min(1.0))
}
