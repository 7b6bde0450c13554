//! Resolved settings shared across crates.
//!
//! These types represent fully-validated configuration. Raw TOML structs
//! (with `Option` fields) stay private in `kanagi-config`, which resolves
//! them into these types at the parse boundary.
//!
//! Existence of a value is the proof of its validity.

use std::num::NonZeroUsize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("loop threshold must be at least {min}, got {got}")]
    LoopThresholdTooLow { got: u32, min: u32 },
    #[error("keyword list `{0}` must contain at least one non-blank keyword")]
    EmptyKeywords(&'static str),
    #[error("fallback law limit must be at least 1")]
    ZeroFallbackLimit,
}

/// Repetition threshold for the loop observer.
///
/// A session loops once `consecutive_count >= threshold`. Values below 2
/// would treat every first turn as a loop and are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopPolicy {
    threshold: u32,
}

impl LoopPolicy {
    pub const MIN_THRESHOLD: u32 = 2;
    pub const DEFAULT_THRESHOLD: u32 = 2;

    pub fn new(threshold: u32) -> Result<Self, SettingsError> {
        if threshold < Self::MIN_THRESHOLD {
            return Err(SettingsError::LoopThresholdTooLow {
                got: threshold,
                min: Self::MIN_THRESHOLD,
            });
        }
        Ok(Self { threshold })
    }

    #[must_use]
    pub const fn threshold(self) -> u32 {
        self.threshold
    }

    #[must_use]
    pub const fn is_looping(self, consecutive_count: u32) -> bool {
        consecutive_count >= self.threshold
    }
}

impl Default for LoopPolicy {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

/// Non-empty, trimmed, deduplicated keyword list. Order is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordList(Vec<String>);

impl KeywordList {
    pub fn new(name: &'static str, keywords: Vec<String>) -> Result<Self, SettingsError> {
        let mut out: Vec<String> = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            let keyword = keyword.trim();
            if !keyword.is_empty() && !out.iter().any(|k| k == keyword) {
                out.push(keyword.to_string());
            }
        }
        if out.is_empty() {
            return Err(SettingsError::EmptyKeywords(name));
        }
        Ok(Self(out))
    }

    fn from_static(words: &[&str]) -> Self {
        Self(words.iter().map(|w| (*w).to_string()).collect())
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

const TAI_KEYWORDS: &[&str] = &["躰", "体", "正中", "生成", "法則", "structure", "essence"];
const YO_KEYWORDS: &[&str] = &["用", "働", "はたらき", "運用", "水", "流", "function", "operation"];
const FIRE_KEYWORDS: &[&str] = &["火", "陽", "熱", "昇", "外発", "fire", "heat", "ascend"];
const WATER_KEYWORDS: &[&str] = &["水", "陰", "冷", "降", "内集", "water", "cold", "descend"];
const DOMAIN_TERMS: &[&str] = &[
    "言灵", "言霊", "ことだま", "真言", "躰", "体", "用", "正中", "水火", "生成", "辞", "テニヲハ",
    "空仮中", "メシア", "天津金木", "布斗麻邇",
];

/// Keyword sets used for scoring and evidence selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    /// Structural (tai) vocabulary.
    pub tai: KeywordList,
    /// Functional (yo) vocabulary.
    pub yo: KeywordList,
    /// Fire (hi) vocabulary.
    pub fire: KeywordList,
    /// Water (mi) vocabulary.
    pub water: KeywordList,
    /// Corpus terms eligible for fallback law extraction.
    pub domain_terms: KeywordList,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            tai: KeywordList::from_static(TAI_KEYWORDS),
            yo: KeywordList::from_static(YO_KEYWORDS),
            fire: KeywordList::from_static(FIRE_KEYWORDS),
            water: KeywordList::from_static(WATER_KEYWORDS),
            domain_terms: KeywordList::from_static(DOMAIN_TERMS),
        }
    }
}

/// Limits for evidence handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvidencePolicy {
    fallback_law_limit: NonZeroUsize,
}

impl EvidencePolicy {
    pub const DEFAULT_FALLBACK_LAW_LIMIT: usize = 6;

    pub fn new(fallback_law_limit: usize) -> Result<Self, SettingsError> {
        NonZeroUsize::new(fallback_law_limit)
            .map(|fallback_law_limit| Self { fallback_law_limit })
            .ok_or(SettingsError::ZeroFallbackLimit)
    }

    #[must_use]
    pub const fn fallback_law_limit(self) -> usize {
        self.fallback_law_limit.get()
    }
}

impl Default for EvidencePolicy {
    fn default() -> Self {
        Self {
            fallback_law_limit: NonZeroUsize::new(Self::DEFAULT_FALLBACK_LAW_LIMIT)
                .unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// Everything the reasoning core is tuned by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreSettings {
    pub loop_policy: LoopPolicy,
    pub lexicon: Lexicon,
    pub evidence: EvidencePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_threshold_below_two_rejected() {
        assert!(LoopPolicy::new(0).is_err());
        assert!(LoopPolicy::new(1).is_err());
        let policy = LoopPolicy::new(3).unwrap();
        assert!(!policy.is_looping(2));
        assert!(policy.is_looping(3));
    }

    #[test]
    fn keyword_list_trims_and_dedups() {
        let list = KeywordList::new(
            "fire",
            vec![" 火 ".into(), "火".into(), String::new(), "陽".into()],
        )
        .unwrap();
        assert_eq!(list.as_slice(), ["火", "陽"]);
        assert_eq!(
            KeywordList::new("water", vec!["  ".into()]),
            Err(SettingsError::EmptyKeywords("water"))
        );
    }

    #[test]
    fn defaults_are_valid() {
        let settings = CoreSettings::default();
        assert_eq!(settings.loop_policy.threshold(), LoopPolicy::DEFAULT_THRESHOLD);
        assert_eq!(settings.evidence.fallback_law_limit(), 6);
        assert!(settings.lexicon.fire.as_slice().iter().any(|k| k == "火"));
        assert!(EvidencePolicy::new(0).is_err());
    }
}
