//! Claims are only surfaced with resolvable citations, and law ids are
//! bit-exact.

use kanagi_core::filter_valid_claims;
use kanagi_engine::TurnInput;
use kanagi_types::{Claim, DocKey, EvidencePack, LawId, MalformedLawId, PdfPage};

use crate::common::{builder, khs_pack, law, turn};

#[test]
fn verified_claims_resolve_in_the_pack() {
    let pack = khs_pack(
        "",
        vec![
            law("KHS-P0006-T001", "躰", "a"),
            law("KHS-P0006-T002", "用", "b"),
        ],
    );
    let claims = vec![
        Claim::new("ok", vec!["KHS-P0006-T001".into()]),
        Claim::new("mixed", vec!["KHS-P0006-T002".into(), "KHS-P0007-T001".into()]),
        Claim::new("bare", Vec::new()),
        Claim::new("wrong doc", vec!["KTK-P0006-T001".into()]),
        Claim::new("both", vec!["KHS-P0006-T002".into(), "KHS-P0006-T001".into()]),
    ];
    let verified = filter_valid_claims(&claims, &pack);

    let texts: Vec<_> = verified.iter().map(|c| c.text()).collect();
    assert_eq!(texts, ["ok", "both"]);
    for claim in &verified {
        assert!(!claim.evidence_ids().is_empty());
        for id in claim.evidence_ids() {
            assert!(pack.law(&id.to_string()).is_some());
        }
    }
}

#[test]
fn plan_claims_cite_only_pack_laws() {
    let input = turn("正中と用", "claims").with_evidence(khs_pack(
        "正中に躰あり。用は流れる。",
        Vec::new(),
    ));
    let plan = builder().build(input);
    assert!(!plan.claims.is_empty());
    for claim in &plan.claims {
        for id in claim.evidence_ids() {
            assert!(plan.evidence.laws.iter().any(|l| &l.id == id));
        }
    }
}

#[test]
fn law_id_format_is_bit_exact() {
    let id = LawId::new(DocKey::Iroha, PdfPage::new(12).unwrap(), 1).unwrap();
    assert_eq!(id.to_string(), "IROHA-P0012-T001");
    assert_eq!(LawId::parse("DOC-P0001-T999").unwrap().doc_key(), DocKey::Unknown);

    for bad in ["KHS-P6-T1", "KHS-P0006-T0001", "XYZ-P0006-T001", "KHS-P0000-T001", "KHS-P0006-T000", "khs-P0006-T001"] {
        assert!(LawId::parse(bad).is_err(), "{bad} should be rejected");
    }
    assert!(matches!(
        LawId::parse("XYZ-P0006-T001"),
        Err(MalformedLawId::Prefix(_))
    ));
}

#[test]
fn malformed_law_id_fails_deserialization() {
    let json = r#"{
        "doc": "言霊秘書", "docKey": "khs", "pdfPage": 6, "pageText": "",
        "laws": [{"id": "KHS-P06-T001", "title": "t", "quote": "q"}],
        "isEstimated": false
    }"#;
    let err = serde_json::from_str::<EvidencePack>(json).unwrap_err();
    assert!(err.to_string().contains("KHS-P06-T001"));
}

#[test]
fn fallback_quotes_are_verbatim_page_text() {
    let page = "冒頭の文。\n  言霊とは  音の働きである。\n  正中の躰。";
    let plan = builder().build(
        turn("言霊と正中", "verbatim").with_evidence(khs_pack(page, Vec::new())),
    );
    assert!(!plan.evidence.laws.is_empty());
    for law in &plan.evidence.laws {
        assert!(page.contains(&law.quote), "{:?} is not verbatim", law.quote);
    }
}

#[test]
fn page_beyond_law_id_range_rejects_the_turn() {
    let json = r#"{
        "message": "正中とは", "sessionId": "s",
        "evidence": {"doc": "言霊秘書", "docKey": "khs", "pdfPage": 12345, "pageText": "正中に躰あり"}
    }"#;
    let err = serde_json::from_str::<TurnInput>(json).unwrap_err();
    assert!(err.to_string().contains("12345"), "{err}");
}
