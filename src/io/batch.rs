//! CSV ingest of attribute records for `salary batch`.
//!
//! The expected headers are the UCI Adult column names (`age`, `workclass`,
//! `fnlwgt`, ..., `native-country`). Behavior:
//! - **Strict schema**: every attribute column must be present (exit code 2)
//! - **Row-level validation**: short rows and rows with unparsable numbers
//!   are skipped and reported; categorical values outside the registry are kept (they encode
//!   as unknown)
//! - extra columns (e.g. an `income` label) are ignored

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::domain::{Attribute, AttributeRecord, CategoricalAttribute, NumericAttribute};
use crate::encoding::CategoryRegistry;
use crate::error::{AppError, EXIT_INPUT};

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: parsed records (with their CSV line) + row errors.
#[derive(Debug, Clone)]
pub struct BatchInput {
    pub records: Vec<(usize, AttributeRecord)>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    /// Categorical cells that will encode as an all-zero block.
    pub unknown_values: usize,
}

pub fn load_batch(path: &Path, registry: &CategoryRegistry) -> Result<BatchInput, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_batch(file, registry)
}

pub fn read_batch<R: Read>(source: R, registry: &CategoryRegistry) -> Result<BatchInput, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);
    ensure_attribute_columns_exist(&header_map)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut unknown_values = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        rows_read += 1;

        let row = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&row, &header_map, headers.len()) {
            Ok(record) => {
                for attr in CategoricalAttribute::ALL {
                    let value = record.categorical(attr);
                    if !registry.contains(attr, value) {
                        debug!(line, attribute = attr.column_name(), value, "unknown category in CSV");
                        unknown_values += 1;
                    }
                }
                records.push((line, record));
            }
            Err(message) => {
                warn!(line, %message, "skipping CSV row");
                row_errors.push(RowError { line, message });
            }
        }
    }

    Ok(BatchInput {
        records,
        row_errors,
        rows_read,
        unknown_values,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Strip a UTF-8 BOM and accept `education_num` for `education-num`.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase().replace('_', "-")
}

fn ensure_attribute_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    let missing: Vec<&str> = Attribute::FORM_ORDER
        .iter()
        .map(|a| a.column_name())
        .filter(|name| !header_map.contains_key(*name))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(AppError::new(
        EXIT_INPUT,
        format!("Missing required column(s): {}", missing.join(", ")),
    ))
}

fn parse_row(
    row: &StringRecord,
    header_map: &HashMap<String, usize>,
    expected_fields: usize,
) -> Result<AttributeRecord, String> {
    // Extra trailing fields are tolerated; missing ones would shift into "unknown".
    if row.len() < expected_fields {
        return Err(format!("expected {expected_fields} fields, found {}", row.len()));
    }

    let mut record = AttributeRecord {
        age: 0.0,
        workclass: String::new(),
        fnlwgt: 0.0,
        education: String::new(),
        education_num: 0.0,
        marital_status: String::new(),
        occupation: String::new(),
        relationship: String::new(),
        race: String::new(),
        sex: String::new(),
        capital_gain: 0.0,
        capital_loss: 0.0,
        hours_per_week: 0.0,
        native_country: String::new(),
    };

    for attr in NumericAttribute::ALL {
        let raw = cell(row, header_map, attr.column_name())?;
        let value: f64 = raw
            .parse()
            .map_err(|_| format!("`{}` is not a number: '{raw}'", attr.column_name()))?;
        if !value.is_finite() {
            return Err(format!("`{}` is not finite: '{raw}'", attr.column_name()));
        }
        record.set_numeric(attr, value);
    }
    for attr in CategoricalAttribute::ALL {
        record.set_categorical(attr, cell(row, header_map, attr.column_name())?);
    }

    Ok(record)
}

fn cell<'r>(row: &'r StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Result<&'r str, String> {
    header_map
        .get(name)
        .and_then(|&i| row.get(i))
        .ok_or_else(|| format!("missing `{name}` field"))
}
