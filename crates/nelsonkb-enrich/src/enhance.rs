//! Chunk enhancement: concept tagging, reading difficulty, clinical
//! relevance, age groups, and learning objectives.
//!
//! This pass runs before enrichment proper and produces the
//! `medical_concepts` and `learning_objectives` columns that enrichment
//! consumes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Concept category → term list. Categories are tagged independently;
/// a term is recorded when it occurs as a lowercase substring.
pub const CONCEPT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "anatomy",
        &[
            "heart", "lung", "liver", "kidney", "brain", "stomach", "intestine", "bone",
            "muscle", "nerve", "blood", "vessel", "organ", "tissue",
        ],
    ),
    (
        "pathology",
        &[
            "infection", "inflammation", "tumor", "cancer", "syndrome", "disease", "disorder",
            "malformation", "deficiency", "dysfunction", "failure",
        ],
    ),
    (
        "pharmacology",
        &[
            "antibiotic", "vaccine", "medication", "drug", "therapy", "treatment", "dose",
            "administration", "side effect", "interaction", "contraindication",
        ],
    ),
    (
        "diagnostics",
        &[
            "test", "examination", "imaging", "laboratory", "biopsy", "screening", "diagnosis",
            "differential", "workup", "evaluation", "assessment",
        ],
    ),
    (
        "procedures",
        &[
            "surgery", "operation", "procedure", "intervention", "resection", "repair",
            "transplant", "catheterization", "intubation", "monitoring",
        ],
    ),
    (
        "symptoms",
        &[
            "pain", "fever", "rash", "cough", "vomiting", "diarrhea", "fatigue", "headache",
            "seizure", "difficulty", "swelling", "bleeding",
        ],
    ),
];

/// Weighted indicators for the clinical-relevance score.
const RELEVANCE_WEIGHTS: &[(&str, f64)] = &[
    ("treatment", 0.15),
    ("diagnosis", 0.15),
    ("patient", 0.10),
    ("clinical", 0.10),
    ("therapy", 0.10),
    ("management", 0.10),
    ("intervention", 0.10),
    ("outcome", 0.08),
    ("prognosis", 0.08),
    ("guidelines", 0.08),
    ("evidence", 0.05),
    ("recommendation", 0.05),
];

const PRACTICAL_PHRASES: &[&str] = &[
    "should be",
    "must be",
    "recommended",
    "indicated",
    "contraindicated",
    "first-line",
    "second-line",
    "standard care",
];

static AGE_GROUP_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("neonate", r"\b(?:neonat|newborn|birth)\b"),
        ("infant", r"\b(?:infant|baby|babies)\b"),
        ("toddler", r"\b(?:toddler|1-3 years?|2-3 years?)\b"),
        ("preschool", r"\b(?:preschool|3-5 years?|4-5 years?)\b"),
        ("school_age", r"\b(?:school.?age|6-12 years?|elementary)\b"),
        ("adolescent", r"\b(?:adolescent|teen|teenager|13-18 years?)\b"),
        ("all_ages", r"\b(?:all ages|pediatric|children|child)\b"),
    ]
    .into_iter()
    .map(|(group, pattern)| (group, Regex::new(pattern).unwrap()))
    .collect()
});

static CONCEPT_MATCHERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b([a-z]+ (?:syndrome|disease|disorder|condition))\b",
        r"(?i)\b((?:acute|chronic) [a-z]+)\b",
        r"(?i)\b([a-z]+(?:itis|osis|pathy|emia|uria))\b",
    ]
    .into_iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Verb templates rotated across generated learning objectives.
const OBJECTIVE_TEMPLATES: &[&str] = &[
    "Understand the",
    "Identify key",
    "Describe the",
    "Explain how",
    "Recognize signs of",
    "Differentiate between",
    "Manage patients with",
    "Evaluate children with",
];

/// Extract the concept map for a chunk, JSON-encoded. Categories with no
/// hits are omitted; an all-miss text yields `{}`.
pub fn extract_medical_concepts(text: &str) -> String {
    let text_lower = text.to_lowercase();
    let mut map = Map::new();

    for &(category, terms) in CONCEPT_CATEGORIES {
        let found: Vec<Value> = terms
            .iter()
            .filter(|t| text_lower.contains(*t))
            .map(|t| Value::String((*t).to_string()))
            .collect();
        if !found.is_empty() {
            map.insert(category.to_string(), Value::Array(found));
        }
    }

    Value::Object(map).to_string()
}

/// Estimate reading difficulty from long-word ratio, jargon density, and
/// normalized average word length.
pub fn reading_difficulty(text: &str) -> &'static str {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return "basic";
    }
    let word_count = words.len() as f64;

    let long_words = words.iter().filter(|w| w.chars().count() > 7).count() as f64;
    let jargon = words
        .iter()
        .filter(|w| {
            let lower = w.to_lowercase();
            CONCEPT_CATEGORIES
                .iter()
                .any(|(_, terms)| terms.iter().any(|t| lower.contains(t)))
        })
        .count() as f64;
    let avg_word_len = text.chars().count() as f64 / word_count;

    let complexity =
        (long_words / word_count) * 0.4 + (jargon / word_count) * 0.4 + (avg_word_len / 10.0) * 0.2;

    if complexity < 0.15 {
        "basic"
    } else if complexity < 0.25 {
        "intermediate"
    } else if complexity < 0.35 {
        "advanced"
    } else {
        "expert"
    }
}

/// Score clinical relevance on [0, 1] from weighted indicator terms plus a
/// practical-content boost.
pub fn clinical_relevance(text: &str) -> f64 {
    let text_lower = text.to_lowercase();

    let mut score: f64 = RELEVANCE_WEIGHTS
        .iter()
        .filter(|(term, _)| text_lower.contains(term))
        .map(|(_, weight)| weight)
        .sum();

    if PRACTICAL_PHRASES.iter().any(|p| text_lower.contains(p)) {
        score += 0.1;
    }

    score.min(1.0)
}

/// Extract pediatric age groups mentioned in the text; `all_ages` when
/// nothing matches.
pub fn extract_age_groups(text: &str) -> Vec<&'static str> {
    let text_lower = text.to_lowercase();
    let found: Vec<&'static str> = AGE_GROUP_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(&text_lower))
        .map(|(group, _)| *group)
        .collect();

    if found.is_empty() {
        vec!["all_ages"]
    } else {
        found
    }
}

/// Generate up to three learning objectives by pairing rotating verb
/// templates with condition-like matches from the text; pads with a
/// chapter-level objective when the text yields fewer than three.
pub fn learning_objectives(text: &str, chapter_title: &str) -> Vec<String> {
    let mut concepts: Vec<String> = Vec::new();
    for matcher in CONCEPT_MATCHERS.iter() {
        for caps in matcher.captures_iter(text) {
            let concept = caps[1].to_string();
            if concept.chars().count() > 3 {
                concepts.push(concept);
            }
        }
    }

    let mut objectives = Vec::new();
    let mut used = std::collections::HashSet::new();
    for concept in concepts.into_iter().take(3) {
        let lower = concept.to_lowercase();
        if !used.insert(lower.clone()) {
            continue;
        }
        let template = OBJECTIVE_TEMPLATES[objectives.len() % OBJECTIVE_TEMPLATES.len()];
        objectives.push(format!("{template} {lower}"));
    }

    if !chapter_title.is_empty() && objectives.len() < 3 {
        objectives.push(format!(
            "Apply knowledge of {} in clinical practice",
            chapter_title.to_lowercase()
        ));
    }

    objectives.truncate(3);
    objectives
}

/// All enhancement fields for one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Enhancement {
    /// JSON-encoded category→terms map.
    pub medical_concepts: String,
    pub reading_difficulty: &'static str,
    /// Rendered with three decimals in CSV output.
    pub clinical_relevance_score: f64,
    /// Comma-joined.
    pub age_groups: String,
    /// Pipe-joined.
    pub learning_objectives: String,
}

/// Run the full enhancement pass on one chunk.
pub fn enhance_chunk(text: &str, chapter_title: &str) -> Enhancement {
    Enhancement {
        medical_concepts: extract_medical_concepts(text),
        reading_difficulty: reading_difficulty(text),
        clinical_relevance_score: clinical_relevance(text),
        age_groups: extract_age_groups(text).join(","),
        learning_objectives: learning_objectives(text, chapter_title).join("|"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_medical_concepts() {
        let json = extract_medical_concepts("The infection causes fever and requires antibiotic treatment.");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["pathology"].as_array().unwrap().iter().any(|v| v == "infection"));
        assert!(value["symptoms"].as_array().unwrap().iter().any(|v| v == "fever"));
        assert!(value.get("anatomy").is_none());
    }

    #[test]
    fn test_reading_difficulty_bounds() {
        assert_eq!(reading_difficulty(""), "basic");
        assert_eq!(reading_difficulty("See the dog run. It is fun."), "basic");
        let dense = "Bronchopulmonary dysplasia pathophysiology necessitates corticosteroid administration";
        assert_eq!(reading_difficulty(dense), "expert");
    }

    #[test]
    fn test_clinical_relevance() {
        assert_eq!(clinical_relevance("nothing medical here"), 0.0);
        let scored = clinical_relevance("Treatment after diagnosis is recommended for the patient.");
        // 0.15 + 0.15 + 0.10 + practical boost
        assert!((scored - 0.5).abs() < 1e-9);
        assert!(clinical_relevance(&"treatment diagnosis patient clinical therapy management intervention outcome prognosis guidelines evidence recommendation should be".repeat(1)) <= 1.0);
    }

    #[test]
    fn test_age_groups() {
        assert_eq!(extract_age_groups("Newborn screening"), vec!["neonate"]);
        assert_eq!(extract_age_groups("no ages here"), vec!["all_ages"]);
        let multi = extract_age_groups("The infant and the adolescent differ.");
        assert!(multi.contains(&"infant"));
        assert!(multi.contains(&"adolescent"));
    }

    #[test]
    fn test_learning_objectives() {
        let objectives = learning_objectives(
            "Kawasaki disease and acute nephritis both present early.",
            "Rheumatology",
        );
        assert!(!objectives.is_empty());
        assert!(objectives.len() <= 3);
        assert!(objectives[0].starts_with("Understand the"));
    }

    #[test]
    fn test_enhancement_is_deterministic() {
        let text = "Chronic asthma requires treatment. Infants with fever need evaluation.";
        assert_eq!(enhance_chunk(text, "Asthma"), enhance_chunk(text, "Asthma"));
    }
}
