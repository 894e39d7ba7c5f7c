//! Tolerant parsing of the `medical_concepts` column.
//!
//! Upstream emitters wrote the map with whatever quoting their JSON
//! serializer produced, single-quoted pseudo-JSON included. Parse
//! failures degrade to an empty term list, never an error.

use serde_json::Value;

/// Flatten a JSON-encoded category→terms map into its term list.
///
/// Accepts list and scalar values; retries single-quoted pseudo-JSON with
/// quotes swapped. Anything unparseable yields an empty list.
pub fn flatten_concept_terms(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let value = match serde_json::from_str::<Value>(trimmed) {
        Ok(v) => v,
        Err(_) => {
            let requoted = trimmed.replace('\'', "\"");
            match serde_json::from_str::<Value>(&requoted) {
                Ok(v) => v,
                Err(_) => return Vec::new(),
            }
        }
    };

    let Value::Object(map) = value else {
        return Vec::new();
    };

    let mut terms = Vec::new();
    for (_, entry) in map {
        match entry {
            Value::Array(items) => {
                for item in items {
                    if let Value::String(s) = item {
                        terms.push(s);
                    }
                }
            }
            Value::String(s) => terms.push(s),
            _ => {}
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_map() {
        let raw = r#"{"pathology": ["infection", "syndrome"], "anatomy": ["lung"]}"#;
        let mut terms = flatten_concept_terms(raw);
        terms.sort();
        assert_eq!(terms, vec!["infection", "lung", "syndrome"]);
    }

    #[test]
    fn test_single_quoted_map() {
        let raw = "{'symptoms': ['fever', 'cough']}";
        assert_eq!(flatten_concept_terms(raw), vec!["fever", "cough"]);
    }

    #[test]
    fn test_garbage_degrades_to_empty() {
        assert!(flatten_concept_terms("not json at all").is_empty());
        assert!(flatten_concept_terms("[1, 2, 3]").is_empty());
        assert!(flatten_concept_terms("").is_empty());
    }
}
