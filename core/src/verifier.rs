//! Evidence verification: the single gate between proposed claims and the
//! claims a plan may surface.

use kanagi_types::{Claim, EvidencePack, LawId, VerifiedClaim};

/// Keep only claims whose every citation resolves inside `pack`.
///
/// A claim with no citations, or with any id that is malformed or absent
/// from the pack, is dropped whole. Nothing is degraded or partially kept.
#[must_use]
pub fn filter_valid_claims(claims: &[Claim], pack: &EvidencePack) -> Vec<VerifiedClaim> {
    let verified: Vec<VerifiedClaim> = claims
        .iter()
        .filter_map(|claim| verify(claim, pack))
        .collect();

    let dropped = claims.len() - verified.len();
    if dropped > 0 {
        tracing::warn!(dropped, kept = verified.len(), "ungrounded claims dropped");
    }
    verified
}

fn verify(claim: &Claim, pack: &EvidencePack) -> Option<VerifiedClaim> {
    let ids = claim
        .evidence_ids
        .iter()
        .map(|raw| {
            let id = LawId::parse(raw).ok()?;
            pack.laws.iter().any(|law| law.id == id).then_some(id)
        })
        .collect::<Option<Vec<LawId>>>()?;
    VerifiedClaim::from_resolved(claim.text.clone(), ids)
}
