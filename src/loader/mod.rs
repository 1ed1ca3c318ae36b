mod delimited;
mod workbook;

use std::path::{Path, PathBuf};

use crate::error::{CiteLinesError, Result};
use crate::schema::{Field, Record, Table};

/// Load every source file into one table, preserving file order and
/// intra-file row order. Newline stripping runs once over the combined
/// table, not per fragment. Any unreadable file aborts the whole load so a
/// partial table can never reach the extractor.
pub fn load_files(paths: &[PathBuf], progress: Option<&dyn Fn(usize, &Path)>) -> Result<Table> {
    let mut table = Table::new();

    for (index, path) in paths.iter().enumerate() {
        if let Some(callback) = progress {
            callback(index, path);
        }
        let fragment = load_file(path)?;
        log::debug!("loaded {} rows from {}", fragment.len(), path.display());
        table.append(fragment);
    }

    table.strip_newlines();
    log::info!("loaded {} rows from {} file(s)", table.len(), paths.len());

    Ok(table)
}

/// Load a single source file. Dispatch by extension.
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => workbook::load(path),
        "csv" => delimited::load(path),
        other => Err(source_read(
            path,
            format!("unsupported file extension: .{}", other),
        )),
    }
}

pub(crate) fn source_read(path: &Path, message: impl ToString) -> CiteLinesError {
    CiteLinesError::SourceRead {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

/// Map a header row onto schema fields by name. Unknown source columns map
/// to `None` and are ignored; required columns a file lacks simply never
/// appear here, which leaves their values empty in every record.
pub(crate) fn column_map<I, S>(names: I) -> Vec<Option<Field>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| Field::from_name(name.as_ref()))
        .collect()
}

pub(crate) fn build_record<I>(columns: &[Option<Field>], cells: I) -> Record
where
    I: IntoIterator<Item = String>,
{
    let mut record = Record::new();
    for (mapped, value) in columns.iter().zip(cells) {
        if let Some(field) = mapped {
            record.set(*field, value);
        }
    }
    record
}
