//! Response and detail drafts.
//!
//! The response draft is the surface text; the detail draft carries the
//! audit trail (page, id prefix, verbatim quotes). Detail-only lines never
//! leak into the response.

use kanagi_types::{
    EvidencePack, LawId, NonEmptyString, RhetoricalFlag, TaiYo, law_id_page_prefix,
};

const NOT_EXTRACTED: &str = "(not extracted)";
const DETAIL_HEADER: &str = "#detail";
const FORBIDDEN_PREFIXES: &[&str] = &[DETAIL_HEADER, "pdfPage:", "lawId:", "quote:"];
/// Laws listed in a detail draft when none were used.
const DEFAULT_CITED_LAWS: usize = 3;

/// Unify spirit notation on surface text. Quotes are never passed through this.
#[must_use]
pub fn normalize_spirit_notation(text: &str) -> String {
    text.replace("言霊", "言灵").replace('霊', "灵")
}

/// Drop detail-only lines from a response.
#[must_use]
pub fn strip_forbidden_lines(response: &str) -> String {
    response
        .lines()
        .filter(|line| {
            let line = line.trim_start();
            let line = line.strip_prefix("- ").unwrap_or(line);
            !FORBIDDEN_PREFIXES.iter().any(|p| line.starts_with(p))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Draft used for rhetorical checks before the thesis exists.
#[must_use]
pub fn initial_response(taiyo: &TaiYo) -> String {
    normalize_spirit_notation(
        &[
            "(grounded in source material)".to_string(),
            "Separate the structure (tai) from the function (yo) first.".to_string(),
            format!("Structure: {}", or_placeholder(&taiyo.tai.text)),
            format!("Function: {}", or_placeholder(&taiyo.yo.text)),
        ]
        .join("\n"),
    )
}

#[must_use]
pub fn response_draft(thesis: &NonEmptyString, taiyo: &TaiYo, flags: &[RhetoricalFlag]) -> String {
    let mut lines = vec![
        "(grounded in source material)".to_string(),
        format!("Thesis: {thesis}"),
        "Separate the structure (tai) from the function (yo) first.".to_string(),
        format!("Structure: {}", or_placeholder(&taiyo.tai.text)),
        format!("Function: {}", or_placeholder(&taiyo.yo.text)),
    ];
    if !flags.is_empty() {
        lines.push(format!("\nCaution: detected {}.", flag_list(flags)));
    }
    strip_forbidden_lines(&normalize_spirit_notation(&lines.join("\n")))
}

#[must_use]
pub fn detail_draft(
    pack: &EvidencePack,
    thesis: &NonEmptyString,
    flags: &[RhetoricalFlag],
    used_law_ids: &[LawId],
) -> String {
    let mut lines = vec![
        DETAIL_HEADER.to_string(),
        format!("- doc: {}", pack.doc),
        format!("- pdfPage: {}", pack.pdf_page),
        format!("- idPrefix: {}", law_id_page_prefix(pack.doc_key, pack.pdf_page)),
        format!("- isEstimated: {}", pack.is_estimated),
        format!("- thesis: {thesis}"),
    ];
    if !flags.is_empty() {
        lines.push(format!("- flags: {}", flag_list(flags)));
    }
    lines.push("- evidence (excerpts):".to_string());

    let cited: Vec<_> = if used_law_ids.is_empty() {
        pack.laws.iter().take(DEFAULT_CITED_LAWS).collect()
    } else {
        pack.laws
            .iter()
            .filter(|law| used_law_ids.contains(&law.id))
            .collect()
    };
    for law in cited {
        lines.push(format!("  - {} {}", law.id, law.title));
        lines.push(format!("    quote: {}", law.quote));
    }
    lines.join("\n")
}

fn or_placeholder(text: &str) -> &str {
    if text.trim().is_empty() {
        NOT_EXTRACTED
    } else {
        text
    }
}

fn flag_list(flags: &[RhetoricalFlag]) -> String {
    flags
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
