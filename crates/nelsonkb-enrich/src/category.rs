//! Keyword-scored specialty classification.

use crate::concepts::flatten_concept_terms;

/// Specialty → keyword substrings. Declaration order is the tie-break
/// order: on equal scores the earlier entry wins.
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("Cardiology", &["heart", "cardiac", "cardiovascular"]),
    (
        "Infectious Diseases",
        &["infection", "bacterial", "viral", "fever", "sepsis", "antimicrobial"],
    ),
    (
        "Gastroenterology",
        &["liver", "gastro", "digestive", "intestin", "hepatic", "biliary"],
    ),
    ("Neurology", &["neuro", "brain", "seizure", "epilep", "mening", "encephal"]),
    (
        "Pulmonology",
        &["lung", "pulmonary", "respiratory", "asthma", "bronch", "pneumon"],
    ),
    ("Nephrology", &["kidney", "renal", "urin", "neph"]),
    ("Hematology", &["blood", "anemia", "hemato", "thromb", "sickle"]),
    ("Oncology", &["cancer", "tumor", "oncol", "leukem", "lymphom"]),
    (
        "Endocrinology",
        &["endocrin", "diabetes", "hormone", "thyroid", "adrenal"],
    ),
    ("Growth and Development", &["growth", "development", "puberty"]),
    ("Dermatology", &["skin", "dermat", "rash", "eczema"]),
    ("Immunology", &["immune", "antibody", "immunodef", "allerg"]),
    ("Orthopedics", &["bone", "fracture", "orthoped", "skeletal"]),
    ("Pharmacology", &["drug", "medication", "pharmac", "dose"]),
    ("Nutrition", &["nutrition", "feeding", "diet", "vitamin"]),
    ("Emergency Medicine", &["emergency", "trauma", "acute", "resusc"]),
    ("Surgery", &["surgery", "surgical", "operative"]),
    ("Neonatology", &["newborn", "neonat", "premature"]),
];

/// Chapter-substring fallbacks used when no keyword scores at all.
const CHAPTER_FALLBACKS: &[(&str, &str)] = &[
    ("digestive", "Gastroenterology"),
    ("cardio", "Cardiology"),
    ("infect", "Infectious Diseases"),
    ("respir", "Pulmonology"),
    ("lung", "Pulmonology"),
    ("kidney", "Nephrology"),
    ("renal", "Nephrology"),
    ("growth", "Growth and Development"),
    ("develop", "Growth and Development"),
];

/// Default label when nothing classifies.
pub const DEFAULT_CATEGORY: &str = "General Pediatrics";

/// Pick the specialty for a chunk.
///
/// Each category scores `occurrences-in-text + 2 × occurrences-in-concept-terms`
/// over its keyword substrings (non-overlapping, lowercased). Concept terms
/// weigh double because they were already screened as medical vocabulary.
/// With no positive score the chapter name decides: fallback-table match,
/// else the chapter itself, else [`DEFAULT_CATEGORY`].
pub fn map_category(concepts_raw: &str, chunk_text: &str, chapter: &str) -> String {
    let concept_text = flatten_concept_terms(concepts_raw).join(" ").to_lowercase();
    let text_lower = chunk_text.to_lowercase();

    let mut best: Option<(&str, usize)> = None;
    for &(category, keywords) in CATEGORY_KEYWORDS {
        let text_score: usize = keywords.iter().map(|kw| text_lower.matches(kw).count()).sum();
        let concept_score: usize = keywords
            .iter()
            .map(|kw| concept_text.matches(kw).count())
            .sum();
        let score = text_score + 2 * concept_score;
        if score > 0 && best.map_or(true, |(_, s)| score > s) {
            best = Some((category, score));
        }
    }

    if let Some((category, _)) = best {
        return category.to_string();
    }

    let chapter_lower = chapter.to_lowercase();
    for &(needle, category) in CHAPTER_FALLBACKS {
        if chapter_lower.contains(needle) {
            return category.to_string();
        }
    }

    if chapter.trim().is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        chapter.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_keywords_score() {
        let category = map_category(
            "",
            "Asthma is diagnosed by spirometry. Treatment includes inhaled corticosteroids.",
            "Asthma",
        );
        assert_eq!(category, "Pulmonology");
    }

    #[test]
    fn test_concept_terms_weigh_double() {
        // One text hit for Cardiology vs one doubled concept hit for Nephrology.
        let category = map_category(r#"{"anatomy": ["kidney"]}"#, "the heart", "");
        assert_eq!(category, "Nephrology");
    }

    #[test]
    fn test_tie_breaks_to_earlier_category() {
        // "heart" and "infection" each score 1; Cardiology is declared first.
        assert_eq!(map_category("", "heart infection", ""), "Cardiology");
    }

    #[test]
    fn test_chapter_fallback_table() {
        assert_eq!(map_category("", "", "Digestive System Disorders"), "Gastroenterology");
    }

    #[test]
    fn test_chapter_passthrough_then_default() {
        assert_eq!(map_category("", "", "Adolescent Medicine"), "Adolescent Medicine");
        assert_eq!(map_category("", "", ""), DEFAULT_CATEGORY);
    }
}
