//! Person records and their delimited text encoding.

use std::cmp::Ordering;

use chrono::NaiveDate;
use thiserror::Error;

use crate::field::{Field, SortKey};
use crate::SchemaError;

/// Date format used in corpus files and expected in program output.
pub const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Palette of category labels.
pub const CATEGORIES: [&str; 9] = [
    "red", "green", "blue", "yellow", "orange", "violet", "white", "black", "indigo",
];

/// Errors from parsing a delimited row into a record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid date {value:?}")]
    Date { line: u64, value: String },

    #[error("line {line}: {message}")]
    Malformed { line: u64, message: String },
}

impl ParseError {
    /// Physical line the error was found on (1-based).
    pub fn line(&self) -> u64 {
        match self {
            ParseError::FieldCount { line, .. }
            | ParseError::Date { line, .. }
            | ParseError::Malformed { line, .. } => *line,
        }
    }
}

/// A single person record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub surname: String,
    pub given_name: String,
    pub email: String,
    pub category: String,
    pub birth_date: NaiveDate,
}

impl Record {
    pub fn new(
        surname: &str,
        given_name: &str,
        email: &str,
        category: &str,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            surname: surname.to_string(),
            given_name: given_name.to_string(),
            email: email.to_string(),
            category: category.to_string(),
            birth_date,
        }
    }

    /// Ascending comparison on one field. Dates compare as calendar values.
    pub fn cmp_field(&self, other: &Self, field: Field) -> Ordering {
        match field {
            Field::Surname => self.surname.cmp(&other.surname),
            Field::GivenName => self.given_name.cmp(&other.given_name),
            Field::Email => self.email.cmp(&other.email),
            Field::Category => self.category.cmp(&other.category),
            Field::BirthDate => self.birth_date.cmp(&other.birth_date),
        }
    }

    /// Composite comparison, first key first.
    pub fn cmp_by_keys(&self, other: &Self, keys: &[SortKey]) -> Ordering {
        keys.iter()
            .map(|key| key.direction.apply(self.cmp_field(other, key.field)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    /// Text form of one field as it appears in a corpus file.
    pub fn render(&self, field: Field) -> String {
        match field {
            Field::Surname => self.surname.clone(),
            Field::GivenName => self.given_name.clone(),
            Field::Email => self.email.clone(),
            Field::Category => self.category.clone(),
            Field::BirthDate => self.birth_date.format(DATE_FORMAT).to_string(),
        }
    }

    /// All fields in canonical column order.
    pub fn to_row(&self) -> [String; 5] {
        Field::ALL.map(|field| self.render(field))
    }

    /// Build a record from the fields of one row.
    ///
    /// `line` is only used for error context.
    pub fn from_row<'a, I>(fields: I, line: u64) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().collect();
        if fields.len() != Field::ALL.len() {
            return Err(ParseError::FieldCount {
                line,
                expected: Field::ALL.len(),
                found: fields.len(),
            });
        }

        let dob = fields[Field::BirthDate.column()];
        let birth_date = NaiveDate::parse_from_str(dob, DATE_FORMAT).map_err(|_| ParseError::Date {
            line,
            value: dob.to_string(),
        })?;

        Ok(Self::new(
            fields[Field::Surname.column()],
            fields[Field::GivenName.column()],
            fields[Field::Email.column()],
            fields[Field::Category.column()],
            birth_date,
        ))
    }
}

/// Header row naming the five fields in canonical order.
pub fn header_row() -> [&'static str; 5] {
    Field::ALL.map(Field::wire_name)
}

/// Encode records as delimited text, one line per record.
pub fn write_records<'a, I>(records: I, delimiter: char, with_header: bool) -> Result<String, SchemaError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter as u8)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if with_header {
        writer
            .write_record(header_row())
            .map_err(|e| SchemaError::Encode(e.to_string()))?;
    }

    for record in records {
        writer
            .write_record(record.to_row())
            .map_err(|e| SchemaError::Encode(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SchemaError::Encode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SchemaError::Encode(e.to_string()))
}

/// Decode delimited text into records.
///
/// When `has_header` is set the first line is skipped. Blank lines are
/// ignored. Any row with the wrong field count or an unparseable date fails
/// the whole parse.
pub fn parse_records(content: &str, delimiter: char, has_header: bool) -> Result<Vec<Record>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(has_header)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| ParseError::Malformed {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            message: e.to_string(),
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        records.push(Record::from_row(row.iter(), line)?);
    }

    Ok(records)
}
