//! Per-row assembly: runs the heuristic passes over one chunk record and
//! produces the flat output row.

use tracing::debug;

use nelsonkb_core::{parse_page_number, ChunkRecord, EnrichedRecord};

use crate::category::{map_category, DEFAULT_CATEGORY};
use crate::frontmatter::is_front_matter;
use crate::heading::{infer_subtopic, infer_topic, HeadingPath};
use crate::keywords::{clean_keywords, rebuild_keywords};
use crate::summary::generate_summary;

/// Chapter label for chunks whose breadcrumb yields nothing usable.
pub const FALLBACK_CHAPTER: &str = "General Pediatrics";

const FRONT_MATTER_SUMMARY: &str = "Contributors and affiliations; non-clinical content.";

/// Enrich one chunk record.
///
/// Pure over its input: no cross-row state, no IO. Front-matter chunks
/// short-circuit with placeholder fields instead of running the clinical
/// passes. Heuristic misses degrade to empty strings or fallback labels,
/// never errors.
pub fn enrich_row(record: &ChunkRecord) -> EnrichedRecord {
    let page_number = parse_page_number(&record.page_number);
    let parsed = HeadingPath::parse(&record.section_heading_path);

    let chapter = if parsed.chapter.is_empty() {
        FALLBACK_CHAPTER.to_string()
    } else {
        parsed.chapter
    };

    if is_front_matter(&record.chunk_text, &record.section_heading_path, page_number) {
        debug!(page = page_number, "front-matter chunk, skipping clinical passes");
        let topic = if record.chunk_text.to_lowercase().contains("contributor") {
            "Contributors"
        } else {
            "Front Matter"
        };
        return EnrichedRecord {
            chapter,
            section: "Front Matter".to_string(),
            topic: topic.to_string(),
            subtopic: String::new(),
            content_summary: FRONT_MATTER_SUMMARY.to_string(),
            page_number,
            category: DEFAULT_CATEGORY.to_string(),
            keywords: String::new(),
            chunk_text: record.chunk_text.clone(),
        };
    }

    let section = if parsed.section.is_empty() {
        chapter.clone()
    } else {
        parsed.section
    };

    let mut topic = parsed.topic;
    if topic.is_empty() {
        topic = infer_topic(&record.chunk_text, &record.keywords);
    }
    if topic.is_empty() {
        topic = section.clone();
    }

    let subtopic = if parsed.subtopic.is_empty() {
        infer_subtopic(&record.chunk_text, &chapter)
    } else {
        parsed.subtopic
    };

    let mut content_summary = generate_summary(&record.chunk_text);
    if content_summary.is_empty() && !record.chunk_text.trim().is_empty() {
        let head: String = record.chunk_text.chars().take(150).collect();
        content_summary = format!("{head}.");
    }

    let category = map_category(&record.medical_concepts, &record.chunk_text, &chapter);

    let mut keywords = clean_keywords(&record.keywords);
    if keywords.is_empty() {
        keywords = rebuild_keywords(
            &record.keywords,
            &record.medical_concepts,
            &record.chunk_text,
            &[&chapter, &section, &topic, &subtopic],
        );
    }

    EnrichedRecord {
        chapter,
        section,
        topic,
        subtopic,
        content_summary,
        page_number,
        category,
        keywords,
        chunk_text: record.chunk_text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asthma_record() -> ChunkRecord {
        ChunkRecord {
            section_heading_path: "Chapter 12: Asthma > Page 240".to_string(),
            chunk_text: "Asthma is diagnosed by spirometry. Treatment includes inhaled corticosteroids."
                .to_string(),
            page_number: "240".to_string(),
            keywords: "asthma, bronchodilator, xyz".to_string(),
            medical_concepts: String::new(),
            learning_objectives: String::new(),
        }
    }

    #[test]
    fn test_asthma_row_end_to_end() {
        let row = enrich_row(&asthma_record());
        assert_eq!(row.chapter, "Asthma");
        assert_eq!(row.section, "Asthma");
        assert_eq!(row.page_number, 240);
        assert_eq!(row.category, "Pulmonology");
        assert_eq!(row.keywords, "asthma,bronchodilator");
        assert!(row.content_summary.contains("spirometry"));
        assert!(row.content_summary.contains("corticosteroids"));
    }

    #[test]
    fn test_front_matter_short_circuit() {
        let record = ChunkRecord {
            section_heading_path: "Front Matter > Contributors".to_string(),
            chunk_text: "List of contributors: Jane Doe MD, University of Somewhere.".to_string(),
            page_number: "3".to_string(),
            keywords: "professor, university".to_string(),
            ..Default::default()
        };
        let row = enrich_row(&record);
        assert_eq!(row.section, "Front Matter");
        assert_eq!(row.topic, "Contributors");
        assert_eq!(row.category, DEFAULT_CATEGORY);
        assert_eq!(row.keywords, "");
        assert_eq!(row.content_summary, FRONT_MATTER_SUMMARY);
    }

    #[test]
    fn test_empty_record_gets_defaults() {
        let row = enrich_row(&ChunkRecord::default());
        assert_eq!(row.chapter, FALLBACK_CHAPTER);
        assert_eq!(row.section, FALLBACK_CHAPTER);
        assert_eq!(row.page_number, 0);
        assert_eq!(row.category, FALLBACK_CHAPTER);
        assert_eq!(row.content_summary, "");
    }

    #[test]
    fn test_malformed_concept_map_never_aborts() {
        let record = ChunkRecord {
            chunk_text: "Seizures are managed with anticonvulsant therapy.".to_string(),
            medical_concepts: "{broken json!!".to_string(),
            page_number: "not-a-number".to_string(),
            ..Default::default()
        };
        let row = enrich_row(&record);
        assert_eq!(row.page_number, 0);
        assert_eq!(row.category, "Neurology");
    }

    #[test]
    fn test_determinism() {
        let record = asthma_record();
        assert_eq!(enrich_row(&record), enrich_row(&record));
    }
}
