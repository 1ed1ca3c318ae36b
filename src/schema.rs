use std::fmt;

pub const FIELD_COUNT: usize = 9;

/// The fixed 9-column schema shared by every catalog spreadsheet.
/// Column order inside a source file is irrelevant; matching is by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SerialNumber,
    Author,
    Title,
    Venue,
    VolumeNumber,
    Page,
    PublicationYear,
    Abstract,
    ClassificationCode,
}

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::SerialNumber,
        Field::Author,
        Field::Title,
        Field::Venue,
        Field::VolumeNumber,
        Field::Page,
        Field::PublicationYear,
        Field::Abstract,
        Field::ClassificationCode,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::SerialNumber => "serial_number",
            Field::Author => "author",
            Field::Title => "title",
            Field::Venue => "venue",
            Field::VolumeNumber => "volume_number",
            Field::Page => "page",
            Field::PublicationYear => "publication_year",
            Field::Abstract => "abstract",
            Field::ClassificationCode => "classification_code",
        }
    }

    /// Resolve a header cell or config entry to a schema field.
    /// Surrounding whitespace is ignored; the match itself is exact.
    pub fn from_name(name: &str) -> Option<Field> {
        let name = name.trim();
        Field::ALL.iter().copied().find(|f| f.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One bibliographic row. Every schema field is always present; columns
/// absent from a source file are carried as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: [String; FIELD_COUNT],
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: Field, value: String) {
        self.values[field.index()] = value;
    }

    /// Convenience constructor used throughout the tests.
    pub fn from_pairs(pairs: &[(Field, &str)]) -> Self {
        let mut record = Self::new();
        for (field, value) in pairs {
            record.set(*field, (*value).to_string());
        }
        record
    }

    fn strip_newlines(&mut self) {
        for value in &mut self.values {
            if value.contains('\n') || value.contains('\r') {
                value.retain(|c| c != '\n' && c != '\r');
            }
        }
    }
}

/// Ordered collection of records sharing the fixed schema. Built once per
/// run by the loader, consumed once by the extractor, never mutated after.
#[derive(Debug, Clone, Default)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Append another fragment, preserving its row order after ours.
    pub fn append(&mut self, mut fragment: Table) {
        self.records.append(&mut fragment.records);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Remove embedded newline characters from every cell. Applied once,
    /// table-wide, after all fragments have been concatenated.
    pub fn strip_newlines(&mut self) {
        for record in &mut self.records {
            record.strip_newlines();
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
