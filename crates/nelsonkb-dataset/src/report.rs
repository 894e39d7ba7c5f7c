//! Data-quality report over an enriched knowledge CSV.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use nelsonkb_core::{EnrichedRecord, Result};

/// Categories listed in the distribution section.
const TOP_CATEGORIES: usize = 20;

/// Population and distribution statistics for one enriched file.
#[derive(Debug, Clone)]
pub struct QualityReport {
    pub total_rows: usize,
    /// Column name → non-empty row count, in output-column order.
    pub field_population: Vec<(&'static str, usize)>,
    /// Category → row count, count-descending then name-ascending.
    pub categories: Vec<(String, usize)>,
}

impl QualityReport {
    /// Build a report from enriched rows.
    pub fn from_rows(rows: &[EnrichedRecord]) -> Self {
        let non_empty = |f: fn(&EnrichedRecord) -> &str| -> usize {
            rows.iter().filter(|r| !f(r).trim().is_empty()).count()
        };

        let field_population = vec![
            ("chapter", non_empty(|r| &r.chapter)),
            ("section", non_empty(|r| &r.section)),
            ("topic", non_empty(|r| &r.topic)),
            ("subtopic", non_empty(|r| &r.subtopic)),
            ("content_summary", non_empty(|r| &r.content_summary)),
            ("page_number", rows.iter().filter(|r| r.page_number != 0).count()),
            ("category", non_empty(|r| &r.category)),
            ("keywords", non_empty(|r| &r.keywords)),
            ("chunk_text", non_empty(|r| &r.chunk_text)),
        ];

        let mut counts: HashMap<String, usize> = HashMap::new();
        for row in rows {
            let label = if row.category.trim().is_empty() {
                "(empty)".to_string()
            } else {
                row.category.clone()
            };
            *counts.entry(label).or_insert(0) += 1;
        }
        let mut categories: Vec<(String, usize)> = counts.into_iter().collect();
        categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        categories.truncate(TOP_CATEGORIES);

        Self {
            total_rows: rows.len(),
            field_population,
            categories,
        }
    }

    /// Read an enriched CSV and build its report.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let rows: Vec<EnrichedRecord> = reader
            .deserialize()
            .collect::<std::result::Result<_, csv::Error>>()?;
        Ok(Self::from_rows(&rows))
    }
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Knowledge dataset quality report")?;
        writeln!(f, "Total rows: {}", self.total_rows)?;

        writeln!(f, "\nField population:")?;
        for (column, populated) in &self.field_population {
            let pct = if self.total_rows == 0 {
                0.0
            } else {
                *populated as f64 / self.total_rows as f64 * 100.0
            };
            writeln!(f, "  {column}: {pct:.2}% non-empty ({populated})")?;
        }

        writeln!(f, "\nCategory distribution (top {TOP_CATEGORIES}):")?;
        for (category, count) in &self.categories {
            writeln!(f, "  {category}: {count}")?;
        }

        Ok(())
    }
}
