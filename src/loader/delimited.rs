use std::path::Path;

use super::{build_record, column_map, source_read};
use crate::error::Result;
use crate::schema::Table;

/// Read a CSV export with the same header contract as the workbooks:
/// header row first, columns matched to schema fields by name.
pub(crate) fn load(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| source_read(path, e))?;

    let headers = reader.headers().map_err(|e| source_read(path, e))?.clone();
    let columns = column_map(headers.iter());

    let mut table = Table::new();
    for row in reader.records() {
        let row = row.map_err(|e| source_read(path, e))?;
        table.push(build_record(&columns, row.iter().map(str::to_string)));
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CiteLinesError;
    use crate::schema::Field;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_matches_columns_by_name_not_position() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.csv");
        fs::write(
            &path,
            "classification_code,title,author\n1,On Sorting,Hoare\n",
        )
        .unwrap();

        let table = load(&path).unwrap();

        assert_eq!(table.len(), 1);
        let record = table.iter().next().unwrap();
        assert_eq!(record.get(Field::Author), "Hoare");
        assert_eq!(record.get(Field::Title), "On Sorting");
        assert_eq!(record.get(Field::ClassificationCode), "1");
    }

    #[test]
    fn test_missing_columns_load_as_empty_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.csv");
        fs::write(&path, "author\nDoe\n").unwrap();

        let table = load(&path).unwrap();

        let record = table.iter().next().unwrap();
        assert_eq!(record.get(Field::Author), "Doe");
        assert_eq!(record.get(Field::Title), "");
        assert_eq!(record.get(Field::ClassificationCode), "");
    }

    #[test]
    fn test_header_only_file_yields_empty_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "serial_number,author,title\n").unwrap();

        let table = load(&path).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_file_is_source_read_error() {
        let result = load(Path::new("/nonexistent/catalog.csv"));
        assert!(matches!(result, Err(CiteLinesError::SourceRead { .. })));
    }
}
