//! Keyword cleaning: the raw keyword column mixes clinical terms with
//! author names, institutions, and page furniture. Only medically
//! relevant tokens survive, lowercased, capped at ten.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Ceiling on cleaned keyword lists.
pub const MAX_KEYWORDS: usize = 10;

/// Author/institution noise and book furniture.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "professor",
        "md",
        "medicine",
        "university",
        "hospital",
        "childrens",
        "center",
        "college",
        "director",
        "associate",
        "school",
        "wisconsin",
        "pennsylvania",
        "philadelphia",
        "boston",
        "california",
        "massachusetts",
        "york",
        "elsevier",
        "textbook",
        "his",
        "chair",
        "department",
        "division",
        "editor",
        "edition",
        "authors",
        "chapter",
        "part",
        "page",
        "table",
        "figure",
        "contributor",
        "contributors",
        "preface",
        "acknowledgments",
        "acknowledgements",
    ]
    .into_iter()
    .collect()
});

/// Generic academic-medicine vocabulary that says nothing about content.
static NON_MED_GENERIC: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "medicine",
        "medical",
        "professor",
        "university",
        "hospital",
        "department",
        "division",
        "center",
        "associate",
        "assistant",
        "director",
        "college",
        "school",
        "program",
        "research",
        "study",
        "studies",
        "clinic",
        "health",
        "science",
        "sciences",
        "chair",
        "emeritus",
        "fellow",
        "fellowship",
        "adjunct",
    ]
    .into_iter()
    .collect()
});

/// Three-letter abbreviations exempt from the minimum-length rule.
static SHORT_WHITELIST: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["hiv", "hbv", "hcv", "iga", "igg", "ige"].into_iter().collect());

/// Gross anatomy terms that carry no medical morpheme but are keepers.
static ANATOMY_TERMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "heart",
        "liver",
        "kidney",
        "brain",
        "lung",
        "skin",
        "bone",
        "blood",
        "intestine",
        "stomach",
        "pancreas",
        "thyroid",
        "adrenal",
        "spleen",
    ]
    .into_iter()
    .collect()
});

/// Morphemes marking a token as medical vocabulary.
static MED_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        "(itis|osis|emia|algia|pathy|opathy|oma|virus|bacter|fung|fungal|neuro|cardio|hepato\
         |renal|pulmo|bronch|dermat|ortho|endocr|immun|gastro|hemat|oncol|sepsis|shock|fever\
         |rash|seizure|asthma|pneumon|arthritis|abscess|colitis|nephritis|dermatitis|otitis\
         |meningit|encephal|diabet|thyroid|adrenal|hormone|anemia|transplant|chemotherapy\
         |antibiotic|antiviral|antifungal|vaccine|immunization|hypertension|hypotension)",
    )
    .unwrap()
});

/// Dosage units and named abbreviations allowed to carry digits.
static UNIT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("(mg|mcg|mmhg|%|h1n1|h5n1|g6pd|b12)").unwrap());

static RE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-zA-Z][a-zA-Z\-]{3,}\b").unwrap());
static RE_TERM_JUNK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9 \-/()]+").unwrap());

/// True for author/institution noise terms.
pub fn is_noise_term(term: &str) -> bool {
    STOPWORDS.contains(term) || NON_MED_GENERIC.contains(term)
}

fn keep_token(low: &str) -> bool {
    if is_noise_term(low) {
        return false;
    }
    if SHORT_WHITELIST.contains(low) {
        return true;
    }
    if low.chars().count() < 3 {
        return false;
    }
    if low.chars().any(|c| c.is_ascii_digit()) && !low.contains('-') && !UNIT_PATTERN.is_match(low)
    {
        return false;
    }
    MED_PATTERN.is_match(low) || ANATOMY_TERMS.contains(low)
}

/// Clean a comma-separated keyword list. Survivors come out lowercase,
/// deduplicated in order, at most [`MAX_KEYWORDS`], comma-joined.
pub fn clean_keywords(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for token in raw.split(',') {
        let low = token.trim().to_lowercase();
        if low.is_empty() || !keep_token(&low) {
            continue;
        }
        if seen.insert(low.clone()) {
            result.push(low);
        }
        if result.len() >= MAX_KEYWORDS {
            break;
        }
    }

    result.join(",")
}

/// Rebuild a keyword list when cleaning left nothing: concept-map terms
/// first, then morpheme-bearing words harvested from the heading fields
/// and the chunk text. Same noise/dedupe/cap discipline as
/// [`clean_keywords`].
pub fn rebuild_keywords(
    raw_keywords: &str,
    concepts_raw: &str,
    chunk_text: &str,
    heading_fields: &[&str],
) -> String {
    let mut terms: Vec<String> = Vec::new();

    let base = clean_keywords(raw_keywords);
    if !base.is_empty() {
        terms.extend(base.split(',').map(str::to_string));
    }

    for term in crate::concepts::flatten_concept_terms(concepts_raw) {
        let low = RE_TERM_JUNK.replace_all(&term.to_lowercase(), "").trim().to_string();
        if low.chars().count() > 2 {
            terms.push(low);
        }
    }

    let haystack = format!("{} {}", heading_fields.join(" "), chunk_text);
    for m in RE_WORD.find_iter(&haystack) {
        let low = m.as_str().to_lowercase();
        if !is_noise_term(&low) && MED_PATTERN.is_match(&low) {
            terms.push(low);
        }
    }

    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for term in terms {
        let term = term.trim().to_string();
        if term.is_empty() || is_noise_term(&term) {
            continue;
        }
        if seen.insert(term.clone()) {
            result.push(term);
        }
        if result.len() >= MAX_KEYWORDS {
            break;
        }
    }

    result.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_noise_and_nonmedical() {
        let cleaned = clean_keywords("asthma, bronchodilator, xyz");
        assert_eq!(cleaned, "asthma,bronchodilator");
    }

    #[test]
    fn test_output_is_lowercase_and_capped() {
        let raw = "Asthma, Pneumonia, Bronchiolitis, Meningitis, Hepatitis, Dermatitis, \
                   Arthritis, Colitis, Nephritis, Otitis, Sepsis, Anemia";
        let cleaned = clean_keywords(raw);
        let tokens: Vec<&str> = cleaned.split(',').collect();
        assert_eq!(tokens.len(), MAX_KEYWORDS);
        assert!(tokens.iter().all(|t| t.chars().all(|c| !c.is_uppercase())));
        assert!(tokens.iter().all(|t| !STOPWORDS.contains(t)));
    }

    #[test]
    fn test_short_token_whitelist() {
        assert_eq!(clean_keywords("HIV, flu"), "hiv");
    }

    #[test]
    fn test_digit_rule() {
        // Unit-bearing tokens survive, arbitrary digit tokens don't.
        assert_eq!(clean_keywords("b12 anemia, covid19"), "b12 anemia");
    }

    #[test]
    fn test_dedupe_preserves_order() {
        assert_eq!(clean_keywords("anemia, Asthma, anemia"), "anemia,asthma");
    }

    #[test]
    fn test_anatomy_terms_kept_without_morpheme() {
        assert_eq!(clean_keywords("heart, desk"), "heart");
    }

    #[test]
    fn test_rebuild_from_concepts_and_text() {
        let rebuilt = rebuild_keywords(
            "university, editor",
            r#"{"pathology": ["infection"]}"#,
            "Severe bronchiolitis requires admission.",
            &["Respiratory Disorders"],
        );
        let tokens: Vec<&str> = rebuilt.split(',').collect();
        assert!(tokens.contains(&"infection"));
        assert!(tokens.contains(&"bronchiolitis"));
        assert!(tokens.len() <= MAX_KEYWORDS);
    }
}
