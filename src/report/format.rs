//! Formatted terminal output for the scripting commands.
//!
//! Formatting lives here so the encoder and model code stay free of printing.

use crate::domain::Label;
use crate::error::InferenceError;
use crate::io::batch::{BatchInput, RowError};

/// One batch prediction, keyed by CSV line.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub line: usize,
    pub outcome: Result<Label, InferenceError>,
}

/// Numbered column layout, one column per line.
pub fn format_columns(columns: &[String]) -> String {
    let mut out = String::new();
    for (idx, name) in columns.iter().enumerate() {
        out.push_str(&format!("{idx:>4}  {name}\n"));
    }
    out.push_str(&format!("{} columns\n", columns.len()));
    out
}

/// Batch predictions as CSV (`line,prediction`); failed rows carry the error.
pub fn format_batch_csv(results: &[BatchResult]) -> String {
    let mut out = String::from("line,prediction\n");
    for r in results {
        match &r.outcome {
            Ok(label) => out.push_str(&format!("{},{}\n", r.line, label)),
            Err(err) => out.push_str(&format!("{},\"error: {}\"\n", r.line, err)),
        }
    }
    out
}

/// Summary of a batch run (counts + row errors).
pub fn format_batch_summary(input: &BatchInput, results: &[BatchResult]) -> String {
    let above = results
        .iter()
        .filter(|r| matches!(r.outcome, Ok(Label::AboveThreshold)))
        .count();
    let below = results
        .iter()
        .filter(|r| matches!(r.outcome, Ok(Label::BelowThreshold)))
        .count();
    let failed = results.iter().filter(|r| r.outcome.is_err()).count();

    let mut out = format!(
        "rows: read={} predicted={} skipped={} | >50K={above} <=50K={below} failed={failed} | unknown categories={}\n",
        input.rows_read,
        results.len(),
        input.row_errors.len(),
        input.unknown_values,
    );
    out.push_str(&format_row_errors(&input.row_errors));
    out
}

fn format_row_errors(errors: &[RowError]) -> String {
    const MAX_SHOWN: usize = 10;
    let mut out = String::new();
    for e in errors.iter().take(MAX_SHOWN) {
        out.push_str(&format!("  line {}: {}\n", e.line, e.message));
    }
    if errors.len() > MAX_SHOWN {
        out.push_str(&format!("  ... and {} more\n", errors.len() - MAX_SHOWN));
    }
    out
}
