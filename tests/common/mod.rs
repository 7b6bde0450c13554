//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use kanagi_engine::{CorePlanBuilder, InMemorySessionStore, TurnInput};
use kanagi_types::{CoreSettings, DocKey, EvidenceLaw, EvidencePack, PdfPage};

pub type Builder = CorePlanBuilder<InMemorySessionStore>;

/// Builder with default settings and an empty in-memory store.
pub fn builder() -> Builder {
    CorePlanBuilder::new(InMemorySessionStore::new(), &CoreSettings::default())
}

pub fn turn(message: &str, session: &str) -> TurnInput {
    TurnInput::new(message, session, 1, None)
}

pub fn law(id: &str, title: &str, quote: &str) -> EvidenceLaw {
    EvidenceLaw::new(id, title, quote).expect("fixture law id is well-formed")
}

/// Page 6 of the KHS corpus.
pub fn khs_pack(page_text: &str, laws: Vec<EvidenceLaw>) -> EvidencePack {
    EvidencePack {
        doc: "言霊秘書.pdf".into(),
        doc_key: DocKey::Khs,
        pdf_page: PdfPage::new(6).expect("nonzero page"),
        page_text: page_text.into(),
        laws,
        is_estimated: false,
    }
}

pub fn empty_pack() -> EvidencePack {
    khs_pack("", Vec::new())
}

/// Deterministic sample of inputs covering every trigger table and none.
pub const SAMPLE_INPUTS: &[&str] = &[
    "",
    "hmm",
    "why does this happen?",
    "なぜ水は下へ流れるのか",
    "how is it structured",
    "構造を確認する",
    "go ahead and execute the decision",
    "実行して結果を見てみる",
    "done, let me reflect",
    "火火火火火火火火火火",
    "水と火の正中",
    "言霊とは言霊のことである",
    "In general it depends",
];
