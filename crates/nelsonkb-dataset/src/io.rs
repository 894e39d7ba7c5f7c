//! CSV plumbing: tolerant chunk reads, fixed-schema enriched writes, and
//! the whole-file pipeline drivers.

use std::path::Path;

use tracing::{info, warn};

use nelsonkb_core::{ChunkRecord, EnrichOptions, EnrichedRecord, Error, Result, RowErrorPolicy};
use nelsonkb_enrich::{enhance_chunk, enrich_row};

/// Columns appended by the enhancement pass.
const ENHANCE_COLUMNS: &[&str] = &[
    "medical_concepts",
    "reading_difficulty",
    "clinical_relevance_score",
    "age_groups",
    "learning_objectives",
];

const PROGRESS_EVERY: usize = 1000;

/// Read chunk records from a CSV file.
///
/// Columns absent from the header read as empty strings. A row the reader
/// rejects (field-count mismatch, bad quoting) is handled per the
/// configured [`RowErrorPolicy`]; file-level failures are always fatal.
pub fn read_chunks(path: &Path, options: &EnrichOptions) -> Result<Vec<ChunkRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();

    for (index, result) in reader.deserialize::<ChunkRecord>().enumerate() {
        if let Some(limit) = options.limit {
            if rows.len() >= limit {
                break;
            }
        }
        match result {
            Ok(record) => rows.push(record),
            Err(err) => match options.policy {
                RowErrorPolicy::DefaultFill => {
                    warn!(row = index + 1, error = %err, "bad row, substituting defaults");
                    rows.push(ChunkRecord::default());
                }
                RowErrorPolicy::Skip => {
                    warn!(row = index + 1, error = %err, "bad row, skipping");
                }
                RowErrorPolicy::Strict => {
                    return Err(Error::MalformedRow {
                        line: (index + 2) as u64,
                        message: err.to_string(),
                    });
                }
            },
        }
    }

    Ok(rows)
}

/// Write enriched rows with the fixed nine-column schema.
pub fn write_enriched(path: &Path, rows: &[EnrichedRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Run the enrichment pipeline over one file: read, enrich each row in
/// input order, write. Returns the number of rows written.
pub fn enrich_file(input: &Path, output: &Path, options: &EnrichOptions) -> Result<usize> {
    info!(input = %input.display(), output = %output.display(), "starting enrichment");

    let chunks = read_chunks(input, options)?;
    let mut rows = Vec::with_capacity(chunks.len());

    for (index, chunk) in chunks.iter().enumerate() {
        rows.push(enrich_row(chunk));
        if (index + 1) % PROGRESS_EVERY == 0 {
            info!(rows = index + 1, "enriched");
        }
    }

    write_enriched(output, &rows)?;
    info!(rows = rows.len(), "enrichment complete");
    Ok(rows.len())
}

/// Run the enhancement pass over one file: every input column passes
/// through unchanged, the enhancement columns are appended. Returns the
/// number of rows written.
pub fn enhance_file(input: &Path, output: &Path, options: &EnrichOptions) -> Result<usize> {
    info!(input = %input.display(), output = %output.display(), "starting enhancement");

    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();

    let text_index = position_of(&headers, "chunk_text");
    let chapter_index = position_of(&headers, "chapter_title").or_else(|| position_of(&headers, "chapter"));

    let mut out_headers = headers.clone();
    for column in ENHANCE_COLUMNS {
        out_headers.push_field(column);
    }

    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(&out_headers)?;

    let mut written = 0usize;
    for (index, result) in reader.records().enumerate() {
        if let Some(limit) = options.limit {
            if written >= limit {
                break;
            }
        }
        let record = match result {
            Ok(record) => record,
            Err(err) => match options.policy {
                RowErrorPolicy::DefaultFill => {
                    warn!(row = index + 1, error = %err, "bad row, substituting defaults");
                    let mut blank = csv::StringRecord::new();
                    for _ in 0..headers.len() {
                        blank.push_field("");
                    }
                    blank
                }
                RowErrorPolicy::Skip => {
                    warn!(row = index + 1, error = %err, "bad row, skipping");
                    continue;
                }
                RowErrorPolicy::Strict => {
                    return Err(Error::MalformedRow {
                        line: (index + 2) as u64,
                        message: err.to_string(),
                    });
                }
            },
        };

        let text = text_index.and_then(|i| record.get(i)).unwrap_or("");
        let chapter = chapter_index.and_then(|i| record.get(i)).unwrap_or("");
        let enhancement = enhance_chunk(text, chapter);

        let mut out = record.clone();
        out.push_field(&enhancement.medical_concepts);
        out.push_field(enhancement.reading_difficulty);
        out.push_field(&format!("{:.3}", enhancement.clinical_relevance_score));
        out.push_field(&enhancement.age_groups);
        out.push_field(&enhancement.learning_objectives);
        writer.write_record(&out)?;
        written += 1;

        if written % PROGRESS_EVERY == 0 {
            info!(rows = written, "enhanced");
        }
    }

    writer.flush()?;
    info!(rows = written, "enhancement complete");
    Ok(written)
}

fn position_of(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}
