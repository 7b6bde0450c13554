//! Evidence pack data model.
//!
//! Packs are supplied by an external retrieval collaborator and are read-only
//! here. Law ids are bit-exact audit keys: `<PREFIX>-P<page:04>-T<index:03>`
//! with `PREFIX` one of `KHS`, `KTK`, `IROHA`, `DOC`. A malformed id is a
//! hard error, never coerced.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Source corpus of a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKey {
    Khs,
    Ktk,
    Iroha,
    #[default]
    Unknown,
}

impl DocKey {
    /// Law-id prefix for this corpus.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            DocKey::Khs => "KHS",
            DocKey::Ktk => "KTK",
            DocKey::Iroha => "IROHA",
            DocKey::Unknown => "DOC",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "KHS" => Some(DocKey::Khs),
            "KTK" => Some(DocKey::Ktk),
            "IROHA" => Some(DocKey::Iroha),
            "DOC" => Some(DocKey::Unknown),
            _ => None,
        }
    }

    /// Infer the corpus from a document name.
    #[must_use]
    pub fn infer(doc: &str) -> Self {
        if doc.contains("言霊秘書") {
            DocKey::Khs
        } else if doc.contains("カタカムナ") {
            DocKey::Ktk
        } else if doc.contains("いろは") {
            DocKey::Iroha
        } else {
            DocKey::Unknown
        }
    }
}

/// 1-based page number inside a corpus PDF.
///
/// Bounded by the 4-digit page field of a law id, so every page can be cited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PdfPage(NonZeroU32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pdf page {0} is outside 1..=9999")]
pub struct PdfPageError(pub u32);

impl PdfPage {
    pub const FIRST: Self = Self(NonZeroU32::MIN);
    /// Largest page a law id can encode.
    pub const MAX: u32 = 9999;

    pub fn new(page: u32) -> Result<Self, PdfPageError> {
        NonZeroU32::new(page)
            .filter(|p| p.get() <= Self::MAX)
            .map(Self)
            .ok_or(PdfPageError(page))
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for PdfPage {
    type Error = PdfPageError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PdfPage> for u32 {
    fn from(value: PdfPage) -> Self {
        value.get()
    }
}

impl fmt::Display for PdfPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedLawId {
    #[error("law id `{0}` does not match <PREFIX>-P<4 digits>-T<3 digits>")]
    Format(String),
    #[error("law id `{0}` has unknown prefix (expected KHS, KTK, IROHA or DOC)")]
    Prefix(String),
    #[error("law id `{0}` has page 0")]
    ZeroPage(String),
    #[error("index {index} does not fit the 3-digit law id field (1..=999)")]
    IndexOutOfRange { index: u32 },
}

/// Validated evidence-law id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LawId {
    doc_key: DocKey,
    page: PdfPage,
    index: u16,
}

impl LawId {
    const MAX_INDEX: u32 = 999;

    /// Compose an id. `index` is 1-based.
    pub fn new(doc_key: DocKey, page: PdfPage, index: u32) -> Result<Self, MalformedLawId> {
        if index == 0 || index > Self::MAX_INDEX {
            return Err(MalformedLawId::IndexOutOfRange { index });
        }
        Ok(Self {
            doc_key,
            page,
            index: index as u16,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, MalformedLawId> {
        let format_err = || MalformedLawId::Format(raw.to_string());

        let (prefix, rest) = raw.split_once("-P").ok_or_else(format_err)?;
        let (page_digits, index_digits) = rest.split_once("-T").ok_or_else(format_err)?;
        if !is_fixed_digits(page_digits, 4) || !is_fixed_digits(index_digits, 3) {
            return Err(format_err());
        }
        let doc_key =
            DocKey::from_prefix(prefix).ok_or_else(|| MalformedLawId::Prefix(raw.to_string()))?;
        let page: u32 = page_digits.parse().map_err(|_| format_err())?;
        let page = PdfPage::new(page).map_err(|_| MalformedLawId::ZeroPage(raw.to_string()))?;
        let index: u32 = index_digits.parse().map_err(|_| format_err())?;
        if index == 0 {
            return Err(format_err());
        }
        Self::new(doc_key, page, index)
    }

    #[must_use]
    pub fn doc_key(&self) -> DocKey {
        self.doc_key
    }

    #[must_use]
    pub fn page(&self) -> PdfPage {
        self.page
    }

    #[must_use]
    pub fn index(&self) -> u16 {
        self.index
    }
}

fn is_fixed_digits(s: &str, width: usize) -> bool {
    s.len() == width && s.bytes().all(|b| b.is_ascii_digit())
}

/// `<PREFIX>-P<page:04>` shared by every law on one page.
#[must_use]
pub fn law_id_page_prefix(doc_key: DocKey, page: PdfPage) -> String {
    format!("{}-P{:04}", doc_key.prefix(), page.get())
}

impl fmt::Display for LawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-T{:03}",
            law_id_page_prefix(self.doc_key, self.page),
            self.index
        )
    }
}

impl TryFrom<String> for LawId {
    type Error = MalformedLawId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LawId> for String {
    fn from(value: LawId) -> Self {
        value.to_string()
    }
}

impl std::str::FromStr for LawId {
    type Err = MalformedLawId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One citable excerpt. `quote` is verbatim corpus text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceLaw {
    pub id: LawId,
    pub title: String,
    pub quote: String,
}

impl EvidenceLaw {
    /// Build a law from a raw id string, failing loudly on a malformed id.
    pub fn new(
        id: &str,
        title: impl Into<String>,
        quote: impl Into<String>,
    ) -> Result<Self, MalformedLawId> {
        Ok(Self {
            id: LawId::parse(id)?,
            title: title.into(),
            quote: quote.into(),
        })
    }
}

/// Corpus text and law excerpts the core may cite for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidencePack {
    pub doc: String,
    pub doc_key: DocKey,
    pub pdf_page: PdfPage,
    pub page_text: String,
    #[serde(default)]
    pub laws: Vec<EvidenceLaw>,
    #[serde(default)]
    pub is_estimated: bool,
}

impl EvidencePack {
    /// Pack standing in for "retrieval found nothing".
    #[must_use]
    pub fn empty() -> Self {
        Self {
            doc: String::new(),
            doc_key: DocKey::Unknown,
            pdf_page: PdfPage::FIRST,
            page_text: String::new(),
            laws: Vec::new(),
            is_estimated: true,
        }
    }

    #[must_use]
    pub fn law(&self, id: &str) -> Option<&EvidenceLaw> {
        self.laws.iter().find(|law| law.id.to_string() == id)
    }
}

/// A claim as proposed, before verification.
///
/// Empty `evidence_ids` marks the claim ungrounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub text: String,
    #[serde(default)]
    pub evidence_ids: Vec<String>,
}

impl Claim {
    #[must_use]
    pub fn new(text: impl Into<String>, evidence_ids: Vec<String>) -> Self {
        Self {
            text: text.into(),
            evidence_ids,
        }
    }

    #[must_use]
    pub fn is_grounded(&self) -> bool {
        !self.evidence_ids.is_empty()
    }
}

/// A claim whose every citation resolved inside the pack it was checked against.
///
/// Only the evidence verifier constructs these. Holding one proves the
/// citation list is non-empty and resolvable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedClaim {
    text: String,
    evidence_ids: Vec<LawId>,
}

impl VerifiedClaim {
    /// Returns `None` when `evidence_ids` is empty.
    #[must_use]
    pub fn from_resolved(text: String, evidence_ids: Vec<LawId>) -> Option<Self> {
        if evidence_ids.is_empty() {
            None
        } else {
            Some(Self { text, evidence_ids })
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn evidence_ids(&self) -> &[LawId] {
        &self.evidence_ids
    }
}
