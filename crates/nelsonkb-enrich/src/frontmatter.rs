//! Front-matter gate: contributor lists, prefaces, and publisher
//! boilerplate must not reach clinical categorization.
//!
//! Heuristic, not a guarantee: the goal is dropping obvious non-clinical
//! pages, and occasional misses either way are acceptable.

use once_cell::sync::Lazy;
use regex::Regex;

/// Degree abbreviations, matched case-sensitively on the raw text so prose
/// words ("do", "ms") don't count.
static RE_DEGREES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(MD|M\.D\.|PhD|Ph\.D\.|MBBS|FAAP|FACS|MSCE|FRCP|FRACP|DO|MPH|MSc|MBA)\b")
        .unwrap()
});

const FRONT_MATTER_MARKERS: &[&str] = &["contributors", "preface", "acknowledg", "dedication"];
const PATH_MARKERS: &[&str] = &["contributors", "preface", "front matter"];

const INSTITUTION_TOKENS: &[&str] = &[
    "university",
    "school of medicine",
    "hospital",
    "department of",
    "institute of",
];

const CLINICAL_TERMS: &[&str] = &[
    "diagnosis",
    "treatment",
    "management",
    "syndrome",
    "disease",
    "infection",
    "patient",
    "therapy",
    "prognosis",
    "signs",
    "symptoms",
];

/// Decide whether a chunk is front matter. Rules are ordered; the first
/// match wins:
/// 1. an explicit marker in the text or heading path;
/// 2. a pile-up of credentials or institutions with almost no clinical
///    vocabulary, early in the book;
/// 3. publisher boilerplate in the first pages.
pub fn is_front_matter(chunk_text: &str, heading_path: &str, page_number: i64) -> bool {
    if chunk_text.is_empty() {
        return false;
    }

    let text_lower = chunk_text.to_lowercase();
    let path_lower = heading_path.to_lowercase();

    if FRONT_MATTER_MARKERS.iter().any(|m| text_lower.contains(m))
        || PATH_MARKERS.iter().any(|m| path_lower.contains(m))
    {
        return true;
    }

    let degree_count = RE_DEGREES.find_iter(chunk_text).count();
    let institution_count: usize = INSTITUTION_TOKENS
        .iter()
        .map(|t| text_lower.matches(t).count())
        .sum();
    let clinical_signal: usize = CLINICAL_TERMS
        .iter()
        .map(|t| text_lower.matches(t).count())
        .sum();

    if (degree_count >= 6 || institution_count >= 6) && clinical_signal <= 1 && page_number <= 50 {
        return true;
    }

    if text_lower.contains("elsevier") && page_number <= 10 {
        return true;
    }

    false
}
