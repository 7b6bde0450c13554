//! Keyword matching over a [`KeywordList`].
//!
//! An Aho-Corasick automaton finds every keyword in one pass, overlapping
//! matches included, so `水火` counts toward both `水` and `火`. ASCII case is
//! ignored. If the automaton cannot be built the matcher falls back to a
//! sequential scan with the same case rule.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use kanagi_types::KeywordList;

#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<String>,
    automaton: Option<AhoCorasick>,
}

impl KeywordMatcher {
    #[must_use]
    pub fn new(list: &KeywordList) -> Self {
        let keywords = list.as_slice().to_vec();
        let automaton = match AhoCorasickBuilder::new()
            .match_kind(MatchKind::Standard)
            .ascii_case_insensitive(true)
            .build(&keywords)
        {
            Ok(ac) => Some(ac),
            Err(e) => {
                tracing::warn!(
                    keyword_count = keywords.len(),
                    "keyword automaton build failed; using sequential matching ({e})"
                );
                None
            }
        };
        Self {
            keywords,
            automaton,
        }
    }

    /// Distinct keywords present in `text`, as a fraction of the list.
    #[must_use]
    pub fn hit_ratio(&self, text: &str) -> f64 {
        self.distinct_hits(text) as f64 / self.keywords.len() as f64
    }

    #[must_use]
    pub fn any_match(&self, text: &str) -> bool {
        match &self.automaton {
            Some(ac) => ac.is_match(text),
            None => {
                let folded = text.to_ascii_lowercase();
                self.keywords
                    .iter()
                    .any(|k| folded.contains(&k.to_ascii_lowercase()))
            }
        }
    }

    /// Keywords present in `query` that also occur in `text`, in list order,
    /// each with the byte offset of its first occurrence in `text`.
    #[must_use]
    pub fn shared_with<'a>(&'a self, query: &str, text: &str) -> Vec<(&'a str, usize)> {
        let asked = self.first_offsets(query);
        let found = self.first_offsets(text);
        self.keywords
            .iter()
            .zip(asked.into_iter().zip(found))
            .filter_map(|(k, (asked, found))| asked.and(found).map(|at| (k.as_str(), at)))
            .collect()
    }

    fn distinct_hits(&self, text: &str) -> usize {
        self.first_offsets(text).into_iter().flatten().count()
    }

    /// Byte offset of each keyword's first occurrence, indexed like the list.
    fn first_offsets(&self, text: &str) -> Vec<Option<usize>> {
        let mut offsets = vec![None; self.keywords.len()];
        if let Some(ac) = &self.automaton {
            for m in ac.find_overlapping_iter(text) {
                let slot = &mut offsets[m.pattern().as_usize()];
                if slot.is_none_or(|at| m.start() < at) {
                    *slot = Some(m.start());
                }
            }
        } else {
            let folded = text.to_ascii_lowercase();
            for (slot, keyword) in offsets.iter_mut().zip(&self.keywords) {
                *slot = folded.find(&keyword.to_ascii_lowercase());
            }
        }
        offsets
    }
}
