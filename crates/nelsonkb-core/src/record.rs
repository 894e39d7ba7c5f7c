//! Input and output row types for the knowledge-base CSVs.

use serde::{Deserialize, Serialize};

/// One raw chunk row as it arrives from the chunked-textbook CSV.
///
/// Every field deserializes with a default so a column missing from the
/// input file (or an empty cell) reads as the empty string rather than
/// failing the row. `page_number` stays a string here; use
/// [`parse_page_number`] for the tolerant numeric read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChunkRecord {
    #[serde(default)]
    pub section_heading_path: String,
    #[serde(default)]
    pub chunk_text: String,
    #[serde(default)]
    pub page_number: String,
    #[serde(default)]
    pub keywords: String,
    /// JSON-encoded map of concept category → list of terms.
    #[serde(default)]
    pub medical_concepts: String,
    #[serde(default)]
    pub learning_objectives: String,
}

/// One enriched output row. Field order here is the output column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub chapter: String,
    pub section: String,
    pub topic: String,
    pub subtopic: String,
    pub content_summary: String,
    pub page_number: i64,
    pub category: String,
    /// Comma-joined cleaned keywords.
    pub keywords: String,
    pub chunk_text: String,
}

/// Parse a page number leniently: plain integers, float-formatted values
/// ("83.0"), surrounding whitespace. Anything else is 0.
pub fn parse_page_number(raw: &str) -> i64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0;
    }
    if let Ok(n) = s.parse::<i64>() {
        return n;
    }
    if let Ok(f) = s.parse::<f64>() {
        if f.is_finite() {
            return f as i64;
        }
    }
    0
}
