//! CSV → JSONL export for training pipelines, plus line-wise validation.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value};
use tracing::info;

use nelsonkb_core::{parse_page_number, Error, Result};

/// Columns exported as integers.
const INT_COLUMNS: &[&str] = &["page_number", "word_count", "chunk_token_count"];
/// Columns exported as floats.
const FLOAT_COLUMNS: &[&str] = &["confidence_score", "clinical_relevance_score"];

/// Convert a knowledge CSV to JSONL, one object per row.
///
/// Numeric columns coerce leniently (unparseable → 0 / 0.0), `keywords`
/// becomes a string array, everything else stays a trimmed string. Two
/// computed fields are appended: `text_length` and `word_count_calculated`,
/// both over the `chunk_text` column. Returns the number of records
/// written.
pub fn convert_to_jsonl(input: &Path, output: &Path) -> Result<usize> {
    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();

    let mut out = BufWriter::new(File::create(output)?);
    let mut count = 0usize;

    for result in reader.records() {
        let record = result?;
        let mut object = Map::new();

        for (header, value) in headers.iter().zip(record.iter()) {
            let converted = if INT_COLUMNS.contains(&header) {
                Value::from(parse_page_number(value))
            } else if FLOAT_COLUMNS.contains(&header) {
                Value::from(value.trim().parse::<f64>().unwrap_or(0.0))
            } else if header == "keywords" {
                Value::Array(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(|s| Value::String(s.to_string()))
                        .collect(),
                )
            } else {
                Value::String(value.trim().to_string())
            };
            object.insert(header.to_string(), converted);
        }

        let text = object
            .get("chunk_text")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        object.insert("text_length".to_string(), Value::from(text.chars().count()));
        object.insert(
            "word_count_calculated".to_string(),
            Value::from(text.split_whitespace().count()),
        );

        writeln!(out, "{}", Value::Object(object))?;
        count += 1;
    }

    out.flush()?;
    info!(records = count, output = %output.display(), "jsonl conversion complete");
    Ok(count)
}

/// Re-parse every line of a JSONL file; the first invalid line fails the
/// validation. Returns the record count.
pub fn validate_jsonl(path: &Path) -> Result<usize> {
    let reader = BufReader::new(File::open(path)?);
    let mut count = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        serde_json::from_str::<Value>(&line).map_err(|e| {
            Error::Validation(format!("invalid JSON on line {}: {}", index + 1, e))
        })?;
        count += 1;
    }

    Ok(count)
}
