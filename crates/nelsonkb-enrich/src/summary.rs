//! Clinically-salient summary extraction.
//!
//! Picks the one or two sentences most likely to carry the clinical point
//! of a chunk, after stripping download/copyright notices and
//! figure/table references.

use once_cell::sync::Lazy;
use regex::Regex;

/// Hard cap on summary length, in words.
pub const MAX_SUMMARY_WORDS: usize = 150;
/// Sentences shorter than this are never summary material.
const MIN_SENTENCE_CHARS: usize = 25;
/// Only the opening of a chunk is scanned; deep sentences rarely summarize.
const SCAN_WINDOW: usize = 12;

static RE_DOWNLOAD_NOTICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)downloaded\s+for.*?reserved").unwrap());
static RE_COPYRIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\(c\)\s*\d{4}(?:.*?rights reserved\.)?").unwrap());
static RE_CITATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\[[0-9,\s]+\]").unwrap());
static RE_FIGURE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\([Ff]ig\.?\s*\d+\)").unwrap());
static RE_TABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\([Tt]able\s*\d+\)").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const CLINICAL_HINTS: &[&str] = &[
    "diagnosis",
    "treatment",
    "presents",
    "caused by",
    "characterized",
    "symptoms",
    "clinical",
    "patient",
    "disease",
    "syndrome",
    "management",
    "therapy",
    "prevention",
    "prognosis",
];

/// Remove publisher boilerplate and inline figure/table/citation
/// references.
fn strip_notices(text: &str) -> String {
    let t = RE_DOWNLOAD_NOTICE.replace_all(text, "");
    let t = RE_COPYRIGHT.replace_all(&t, "");
    let t = RE_CITATION.replace_all(&t, "");
    let t = RE_FIGURE.replace_all(&t, "");
    let t = RE_TABLE.replace_all(&t, "");
    t.into_owned()
}

/// Split text into sentences (no lookbehind — Rust regex doesn't support it).
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if (b == b'.' || b == b'!' || b == b'?')
            && i + 1 < bytes.len()
            && bytes[i + 1].is_ascii_whitespace()
        {
            let s = text[start..=i].trim();
            if !s.is_empty() {
                sentences.push(s);
            }
            start = i + 1;
        }
    }
    let s = text[start..].trim();
    if !s.is_empty() {
        sentences.push(s);
    }
    sentences
}

/// Generate a 0–2 sentence summary, at most [`MAX_SUMMARY_WORDS`] words,
/// ending in sentence punctuation. Empty text yields an empty summary.
pub fn generate_summary(chunk_text: &str) -> String {
    let stripped = strip_notices(chunk_text);
    let text = RE_WHITESPACE.replace_all(stripped.trim(), " ");
    if text.is_empty() {
        return String::new();
    }

    let sentences = split_sentences(&text);

    let mut picked: Vec<&str> = Vec::new();
    for sentence in sentences.iter().take(SCAN_WINDOW) {
        if sentence.len() < MIN_SENTENCE_CHARS {
            continue;
        }
        let lower = sentence.to_lowercase();
        if CLINICAL_HINTS.iter().any(|hint| lower.contains(hint)) {
            picked.push(sentence);
            if picked.len() >= 2 {
                break;
            }
        }
    }

    if picked.is_empty() {
        picked = sentences.iter().take(2).copied().collect();
    }

    let mut summary = picked.join(" ").trim().to_string();

    let words: Vec<&str> = summary.split_whitespace().collect();
    if words.len() > MAX_SUMMARY_WORDS {
        summary = words[..MAX_SUMMARY_WORDS].join(" ");
    }

    if !summary.is_empty() && !summary.ends_with(['.', '!', '?']) {
        summary.push('.');
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_clinical_sentences() {
        let text = "Asthma is diagnosed by spirometry. Treatment includes inhaled corticosteroids.";
        let summary = generate_summary(text);
        assert!(summary.contains("spirometry"));
        assert!(summary.contains("corticosteroids"));
    }

    #[test]
    fn test_word_cap_and_terminal_punctuation() {
        let long_sentence = format!(
            "The treatment of this disease requires {}",
            "careful monitoring and ".repeat(80)
        );
        let summary = generate_summary(&long_sentence);
        assert!(summary.split_whitespace().count() <= MAX_SUMMARY_WORDS);
        assert!(summary.ends_with(['.', '!', '?']));
    }

    #[test]
    fn test_falls_back_to_leading_sentences() {
        let text = "Short intro without hint words at all, long enough to qualify. Second plain sentence follows here.";
        let summary = generate_summary(text);
        assert!(summary.starts_with("Short intro"));
        assert!(summary.ends_with('.'));
    }

    #[test]
    fn test_strips_boilerplate() {
        let text = "Downloaded for personal use only. All rights reserved. \
                    Bronchiolitis presents with wheezing (Fig. 3) in infants.";
        let summary = generate_summary(text);
        assert!(!summary.to_lowercase().contains("downloaded"));
        assert!(!summary.contains("Fig."));
        assert!(summary.contains("wheezing"));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(generate_summary(""), "");
        assert_eq!(generate_summary("   "), "");
    }
}
