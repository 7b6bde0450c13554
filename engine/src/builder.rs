//! Per-turn orchestration.
//!
//! A turn runs in a fixed order:
//!
//! 1. Pick the axis from the previous axis, the message and the turn count.
//! 2. Observe the loop against the session's stored state, which may compress
//!    and synthesize the tetra state.
//! 3. Append this turn's contradictions to the tetra state.
//! 4. Resolve evidence (fallback laws when the pack has none), pick tai/yo,
//!    build the thesis, check rhetoric, score, and verify claims.
//! 5. Write both halves of the session back, once.

use kanagi_core::{
    DialecticCore, InterpretationGenerator, KeywordMatcher, LoopObserver, TemplateInterpretations,
    TruthCore, calculate_thesis, detect_rhetorical_flags, filter_valid_claims,
    make_fallback_laws, next_axis,
};
use kanagi_types::{
    Claim, CorePlan, CoreSettings, EvidencePack, Excerpt, LawId, Provisional, SessionId, TaiYo,
    ThinkingAxis, text,
};
use serde::Deserialize;

use crate::drafts;
use crate::store::SessionStore;

/// Characters of an excerpt quoted in an initial claim.
const CLAIM_PREVIEW_CHARS: usize = 100;

/// One turn as handed in by the host.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnInput {
    pub message: String,
    pub session_id: SessionId,
    #[serde(default)]
    pub turn_count: u32,
    #[serde(default)]
    pub previous_axis: Option<ThinkingAxis>,
    /// Pack from the retrieval collaborator. Absent means nothing was found.
    #[serde(default)]
    pub evidence: Option<EvidencePack>,
    /// Replaces the session's stored thesis when given.
    #[serde(default)]
    pub thesis: Option<String>,
    /// Replaces the session's stored antithesis when given.
    #[serde(default)]
    pub antithesis: Option<String>,
}

impl TurnInput {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        session_id: impl Into<SessionId>,
        turn_count: u32,
        previous_axis: Option<ThinkingAxis>,
    ) -> Self {
        Self {
            message: message.into(),
            session_id: session_id.into(),
            turn_count,
            previous_axis,
            evidence: None,
            thesis: None,
            antithesis: None,
        }
    }

    #[must_use]
    pub fn with_evidence(mut self, evidence: EvidencePack) -> Self {
        self.evidence = Some(evidence);
        self
    }
}

/// Combines every core component into one [`CorePlan`] per turn.
pub struct CorePlanBuilder<S, G = TemplateInterpretations> {
    store: S,
    loop_observer: LoopObserver,
    dialectic: DialecticCore<G>,
    truth: TruthCore,
    domain_terms: KeywordMatcher,
    fallback_law_limit: usize,
}

impl<S: SessionStore> CorePlanBuilder<S> {
    #[must_use]
    pub fn new(store: S, settings: &CoreSettings) -> Self {
        Self::with_generator(store, settings, TemplateInterpretations)
    }
}

impl<S: SessionStore, G: InterpretationGenerator> CorePlanBuilder<S, G> {
    #[must_use]
    pub fn with_generator(store: S, settings: &CoreSettings, generator: G) -> Self {
        Self {
            store,
            loop_observer: LoopObserver::new(settings.loop_policy),
            dialectic: DialecticCore::new(generator),
            truth: TruthCore::new(&settings.lexicon),
            domain_terms: KeywordMatcher::new(&settings.lexicon.domain_terms),
            fallback_law_limit: settings.evidence.fallback_law_limit(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Run one turn.
    ///
    /// Never fails: missing state, missing evidence and thin readings all
    /// degrade to explicit "insufficient" values in the plan.
    pub fn build(&mut self, input: TurnInput) -> CorePlan {
        let session = &input.session_id;
        let message = input.message.as_str();

        let axis = next_axis(input.previous_axis, message, input.turn_count);
        let previous_loop = self.store.loop_state(session);
        let tetra = self.store.tetra_state(session).unwrap_or_default();
        let observation = self
            .loop_observer
            .observe(session, previous_loop, axis, tetra);

        let tetra = self.dialectic.create_contradictions(
            observation.tetra,
            message,
            session,
            input.thesis.as_deref(),
            input.antithesis.as_deref(),
        );

        let evidence = self.resolve_evidence(input.evidence, message);
        let taiyo = self.truth.pick_tai_yo(&evidence.laws);
        let used_law_ids = used_law_ids(&taiyo);
        let claims = initial_claims(&taiyo);

        let thesis = calculate_thesis(&taiyo.tai, &taiyo.yo, message);
        let rhetorical_flags =
            detect_rhetorical_flags(&drafts::initial_response(&taiyo), &claims, &evidence);
        let scores = self
            .truth
            .compute_centerline_for_turn(&evidence, &taiyo, message);
        let claims = filter_valid_claims(&claims, &evidence);

        let response_draft = drafts::response_draft(&thesis, &taiyo, &rhetorical_flags);
        let detail_draft =
            drafts::detail_draft(&evidence, &thesis, &rhetorical_flags, &used_law_ids);

        self.store
            .set_loop_state(session, observation.loop_state.clone());
        self.store.set_tetra_state(session, tetra.clone());

        tracing::debug!(
            session = %session,
            axis = %observation.axis,
            phase = %observation.phase,
            outcome = observation.outcome.as_str(),
            laws = evidence.laws.len(),
            claims = claims.len(),
            centerline = scores.centerline.value(),
            confidence = scores.confidence.value(),
            "turn planned"
        );

        CorePlan {
            question: input.message,
            axis: observation.axis,
            phase: observation.phase,
            loop_outcome: observation.outcome,
            loop_state: observation.loop_state,
            tetra,
            evidence,
            taiyo,
            used_law_ids,
            thesis,
            rhetorical_flags,
            scores,
            claims,
            response_draft,
            detail_draft,
            provisional: Provisional,
        }
    }

    fn resolve_evidence(&self, evidence: Option<EvidencePack>, message: &str) -> EvidencePack {
        let mut pack = evidence.unwrap_or_else(EvidencePack::empty);
        if pack.laws.is_empty() {
            pack.laws =
                make_fallback_laws(&pack, message, &self.domain_terms, self.fallback_law_limit);
        }
        pack
    }
}

fn used_law_ids(taiyo: &TaiYo) -> Vec<LawId> {
    let mut ids: Vec<LawId> = Vec::new();
    for id in taiyo.tai.law_ids.iter().chain(&taiyo.yo.law_ids) {
        if !ids.contains(id) {
            ids.push(id.clone());
        }
    }
    ids
}

fn initial_claims(taiyo: &TaiYo) -> Vec<Claim> {
    let claim = |label: &str, excerpt: &Excerpt| {
        (!excerpt.law_ids.is_empty()).then(|| {
            Claim::new(
                format!(
                    "{label}: {}",
                    text::take_chars(&excerpt.text, CLAIM_PREVIEW_CHARS)
                ),
                excerpt.law_ids.iter().map(ToString::to_string).collect(),
            )
        })
    };
    [
        claim("Structure (tai)", &taiyo.tai),
        claim("Function (yo)", &taiyo.yo),
    ]
    .into_iter()
    .flatten()
    .collect()
}
