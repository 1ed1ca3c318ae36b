use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::{build_record, column_map, source_read};
use crate::error::Result;
use crate::schema::Table;

/// Read the first worksheet of an Excel/ODS workbook. The first row is the
/// header; columns are matched to schema fields by name.
pub(crate) fn load(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|e| source_read(path, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| source_read(path, "workbook has no worksheets"))?
        .map_err(|e| source_read(path, e))?;

    let mut rows = range.rows();
    let header = match rows.next() {
        Some(row) => row,
        // header-only and empty sheets contribute zero rows
        None => return Ok(Table::new()),
    };

    let columns = column_map(header.iter().map(cell_to_text));

    let mut table = Table::new();
    for row in rows {
        table.push(build_record(&columns, row.iter().map(cell_to_text)));
    }

    Ok(table)
}

/// Textual form of a cell. Integral floats render without the trailing
/// `.0` so serial numbers, years, and codes concatenate the way they
/// display in the spreadsheet.
fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
