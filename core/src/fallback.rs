//! Fallback law extraction for packs that arrive without laws.
//!
//! Quotes are verbatim windows of the page text, never rewritten. An empty
//! page yields no laws at all.

use kanagi_types::{EvidenceLaw, EvidencePack, LawId, text};

use crate::keywords::KeywordMatcher;

const CHARS_BEFORE: usize = 90;
const CHARS_AFTER: usize = 190;
const HEAD_CHARS: usize = 220;

/// Extract up to `limit` laws from `pack.page_text`.
///
/// For each domain term present in `message` (lexicon order) and also found
/// in the page, quote the window around its first occurrence. If no term
/// matches, quote the head of the page as law `T001`.
#[must_use]
pub fn make_fallback_laws(
    pack: &EvidencePack,
    message: &str,
    domain_terms: &KeywordMatcher,
    limit: usize,
) -> Vec<EvidenceLaw> {
    let page = pack.page_text.as_str();
    if page.trim().is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut laws = Vec::new();
    for (term, byte_idx) in domain_terms.shared_with(message, page) {
        if laws.len() >= limit {
            break;
        }
        let idx = text::char_len(&page[..byte_idx]);
        let quote = text::char_slice(
            page,
            idx.saturating_sub(CHARS_BEFORE),
            idx.saturating_add(CHARS_AFTER),
        )
        .trim();
        if quote.is_empty() {
            continue;
        }
        let Some(law) = fallback_law(pack, laws.len() + 1, format!("fallback: {term}"), quote)
        else {
            break;
        };
        laws.push(law);
    }

    if laws.is_empty() {
        let quote = text::take_chars(page, HEAD_CHARS).trim();
        if let Some(law) = fallback_law(pack, 1, "fallback: head".to_string(), quote) {
            laws.push(law);
        }
    }

    tracing::debug!(
        doc_key = pack.doc_key.prefix(),
        page = pack.pdf_page.get(),
        laws = laws.len(),
        "fallback laws extracted"
    );
    laws
}

fn fallback_law(
    pack: &EvidencePack,
    index: usize,
    title: String,
    quote: &str,
) -> Option<EvidenceLaw> {
    let index = u32::try_from(index).ok()?;
    match LawId::new(pack.doc_key, pack.pdf_page, index) {
        Ok(id) => Some(EvidenceLaw {
            id,
            title,
            quote: quote.to_string(),
        }),
        Err(err) => {
            tracing::warn!("fallback law id out of range: {err}");
            None
        }
    }
}
