use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use crate::error::{CiteLinesError, Result};
use crate::schema::{Field, Table};

/// Everything one pipeline run needs to know: which fields to concatenate
/// (order-significant), which classification codes pass the filter, and
/// where the result goes. Field names and code values are kept raw here and
/// resolved at the start of [`extract`] so both the config file and the CLI
/// feed the same normalization.
#[derive(Debug, Clone)]
pub struct ExtractionSpec {
    pub target_fields: Vec<String>,
    pub accepted_codes: Vec<String>,
    pub output_path: PathBuf,
}

/// Filter the table, concatenate the target fields of every surviving row,
/// and write the result as newline-terminated UTF-8 lines. Returns the
/// number of lines written.
///
/// Field and code resolution happen before any row is touched, and the
/// whole output is built in memory and written with a single call, so a
/// failed run never leaves a partial file behind.
pub fn extract(table: &Table, spec: &ExtractionSpec) -> Result<usize> {
    let fields = resolve_fields(&spec.target_fields)?;
    let codes = resolve_codes(&spec.accepted_codes)?;

    let lines = render_lines(table, &fields, &codes);

    let mut output = String::new();
    for line in &lines {
        output.push_str(line);
        output.push('\n');
    }

    fs::write(&spec.output_path, output).map_err(|source| CiteLinesError::OutputWrite {
        path: spec.output_path.display().to_string(),
        source,
    })?;

    log::info!(
        "wrote {} line(s) to {}",
        lines.len(),
        spec.output_path.display()
    );

    Ok(lines.len())
}

fn resolve_fields(names: &[String]) -> Result<Vec<Field>> {
    names
        .iter()
        .map(|name| {
            Field::from_name(name).ok_or_else(|| CiteLinesError::UnknownField {
                field: name.trim().to_string(),
            })
        })
        .collect()
}

fn resolve_codes(values: &[String]) -> Result<BTreeSet<i64>> {
    values
        .iter()
        .map(|value| {
            parse_code(value).ok_or_else(|| CiteLinesError::FilterValue {
                value: value.trim().to_string(),
            })
        })
        .collect()
}

/// Canonical code representation is `i64` on both sides of the filter.
/// Integral floats are accepted because spreadsheets round-trip numeric
/// cells as `3.0`.
fn parse_code(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(code) = text.parse::<i64>() {
        return Some(code);
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => Some(f as i64),
        _ => None,
    }
}

fn render_lines(table: &Table, fields: &[Field], codes: &BTreeSet<i64>) -> Vec<String> {
    table
        .iter()
        .filter(|record| {
            parse_code(record.get(Field::ClassificationCode))
                .map(|code| codes.contains(&code))
                .unwrap_or(false)
        })
        .map(|record| {
            let mut line = String::new();
            for field in fields {
                line.push_str(record.get(*field));
            }
            line
        })
        .collect()
}
