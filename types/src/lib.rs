//! Core domain types for Kanagi.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod axis;
mod evidence;
mod ids;
mod loop_state;
mod plan;
mod proofs;
pub mod settings;
mod tetra;
pub mod text;

pub use axis::{AxisAlias, KanagiPhase, ThinkingAxis};
pub use evidence::{
    Claim, DocKey, EvidenceLaw, EvidencePack, LawId, MalformedLawId, PdfPage, PdfPageError,
    VerifiedClaim, law_id_page_prefix,
};
pub use ids::SessionId;
pub use loop_state::{LoopSignature, LoopState};
pub use plan::{CenterlineScores, CorePlan, Excerpt, LoopOutcome, RhetoricalFlag, TaiYo};
pub use proofs::{
    Centerline, EmptyStringError, NonEmptyStaticStr, NonEmptyString, Provisional, ScoreRangeError,
    UnitScore,
};
pub use settings::{CoreSettings, EvidencePolicy, KeywordList, Lexicon, LoopPolicy, SettingsError};
pub use tetra::{
    Integration, NoTensionsError, TetraLayer, TetraState, UnresolvedTensions, compressed_count,
    compression_marker,
};
