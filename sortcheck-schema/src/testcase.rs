//! Randomized test configuration driving one comparison round.

use std::cmp::Ordering;

use serde::Serialize;

use crate::field::{Field, SortKey};
use crate::record::Record;
use crate::SchemaError;

/// Delimiters a test case may use.
pub const DELIMITERS: [char; 3] = [',', '|', ' '];

/// Sort keys, delimiter and header presence for one round.
///
/// The same value determines how corpus files are written and which
/// arguments are passed to the program under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    sort_keys: Vec<SortKey>,
    delimiter: char,
    has_header: bool,
}

impl TestCase {
    /// Create a validated test case.
    ///
    /// Rejects an empty key list, a field appearing twice and delimiters
    /// that cannot be written as a single byte.
    pub fn new(sort_keys: Vec<SortKey>, delimiter: char, has_header: bool) -> Result<Self, SchemaError> {
        if let Some(field) = first_duplicate(&sort_keys) {
            return Err(SchemaError::DuplicateField(field));
        }
        Self::new_unchecked(sort_keys, delimiter, has_header)
    }

    /// Create a test case that may repeat a field.
    ///
    /// Used when duplicate keys are deliberately passed through to the
    /// program under test. Ordering uses the first occurrence of each field.
    pub fn new_unchecked(
        sort_keys: Vec<SortKey>,
        delimiter: char,
        has_header: bool,
    ) -> Result<Self, SchemaError> {
        if sort_keys.is_empty() {
            return Err(SchemaError::EmptySortKeys);
        }
        validate_delimiter(delimiter)?;
        Ok(Self {
            sort_keys,
            delimiter,
            has_header,
        })
    }

    /// Sort keys in priority order, exactly as configured.
    pub fn sort_keys(&self) -> &[SortKey] {
        &self.sort_keys
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// Whether the key list repeats a field.
    pub fn has_duplicate_fields(&self) -> bool {
        first_duplicate(&self.sort_keys).is_some()
    }

    /// Keys with repeated fields removed, keeping the first occurrence.
    pub fn effective_keys(&self) -> Vec<SortKey> {
        let mut seen = Vec::with_capacity(self.sort_keys.len());
        let mut keys = Vec::with_capacity(self.sort_keys.len());
        for key in &self.sort_keys {
            if !seen.contains(&key.field) {
                seen.push(key.field);
                keys.push(*key);
            }
        }
        keys
    }

    /// Whether `field` participates in the ordering.
    pub fn is_sort_field(&self, field: Field) -> bool {
        self.sort_keys.iter().any(|k| k.field == field)
    }

    /// Composite comparison of two records under this case's keys.
    ///
    /// Records equal on every key compare `Equal`; callers needing a total
    /// order must use a stable sort.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        a.cmp_by_keys(b, &self.effective_keys())
    }
}

fn first_duplicate(keys: &[SortKey]) -> Option<Field> {
    keys.iter()
        .enumerate()
        .find(|(i, key)| keys[..*i].iter().any(|k| k.field == key.field))
        .map(|(_, key)| key.field)
}

fn validate_delimiter(delimiter: char) -> Result<(), SchemaError> {
    if !delimiter.is_ascii() || matches!(delimiter, '"' | '\n' | '\r') {
        return Err(SchemaError::InvalidDelimiter(delimiter));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Direction;
    use chrono::NaiveDate;

    fn record(surname: &str, category: &str, dob: (i32, u32, u32)) -> Record {
        Record::new(
            surname,
            "Given",
            "given.surname@example.com",
            category,
            NaiveDate::from_ymd_opt(dob.0, dob.1, dob.2).unwrap(),
        )
    }

    // ===========================================
    // Construction
    // ===========================================

    #[test]
    fn test_new_valid() {
        let case = TestCase::new(vec![SortKey::asc(Field::Category)], ',', true).unwrap();
        assert_eq!(case.sort_keys(), &[SortKey::asc(Field::Category)]);
        assert_eq!(case.delimiter(), ',');
        assert!(case.has_header());
    }

    #[test]
    fn test_new_rejects_empty_keys() {
        assert_eq!(TestCase::new(vec![], ',', false), Err(SchemaError::EmptySortKeys));
    }

    #[test]
    fn test_new_rejects_duplicate_field() {
        let keys = vec![
            SortKey::asc(Field::Email),
            SortKey::asc(Field::Surname),
            SortKey::desc(Field::Email),
        ];
        assert_eq!(
            TestCase::new(keys, '|', false),
            Err(SchemaError::DuplicateField(Field::Email))
        );
    }

    #[test]
    fn test_new_rejects_bad_delimiter() {
        let keys = vec![SortKey::asc(Field::Email)];
        assert_eq!(
            TestCase::new(keys.clone(), '"', false),
            Err(SchemaError::InvalidDelimiter('"'))
        );
        assert_eq!(
            TestCase::new(keys, 'é', false),
            Err(SchemaError::InvalidDelimiter('é'))
        );
    }

    #[test]
    fn test_unchecked_allows_duplicates() {
        let keys = vec![SortKey::asc(Field::Email), SortKey::desc(Field::Email)];
        let case = TestCase::new_unchecked(keys, ' ', false).unwrap();
        assert!(case.has_duplicate_fields());
        assert_eq!(case.effective_keys(), vec![SortKey::asc(Field::Email)]);
    }

    // ===========================================
    // Composite ordering
    // ===========================================

    #[test]
    fn test_compare_primary_then_secondary() {
        let case = TestCase::new(
            vec![SortKey::asc(Field::Category), SortKey::asc(Field::Surname)],
            ',',
            false,
        )
        .unwrap();

        let a = record("Adams", "blue", (1980, 1, 1));
        let b = record("Baker", "blue", (1970, 1, 1));
        let c = record("Aaron", "red", (1990, 1, 1));

        assert_eq!(case.compare(&a, &b), Ordering::Less);
        assert_eq!(case.compare(&b, &c), Ordering::Less);
        assert_eq!(case.compare(&c, &a), Ordering::Greater);
    }

    #[test]
    fn test_compare_descending_date() {
        let case = TestCase::new(vec![SortKey::desc(Field::BirthDate)], ',', false).unwrap();
        let older = record("Adams", "blue", (1950, 12, 31));
        let younger = record("Adams", "blue", (1951, 1, 1));
        assert_eq!(case.compare(&younger, &older), Ordering::Less);
    }

    #[test]
    fn test_compare_dates_not_lexicographic() {
        // "10/1/1990" < "9/1/1990" as strings, but October is later.
        let case = TestCase::new(vec![SortKey::asc(Field::BirthDate)], ',', false).unwrap();
        let october = record("Adams", "blue", (1990, 10, 1));
        let september = record("Adams", "blue", (1990, 9, 1));
        assert_eq!(case.compare(&september, &october), Ordering::Less);
    }

    #[test]
    fn test_compare_ties_are_equal() {
        let case = TestCase::new(
            vec![SortKey::new(Field::Category, Direction::Descending)],
            ',',
            false,
        )
        .unwrap();
        let a = record("Adams", "blue", (1980, 1, 1));
        let b = record("Zed", "blue", (1970, 1, 1));
        assert_eq!(case.compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_is_sort_field() {
        let case = TestCase::new(vec![SortKey::asc(Field::GivenName)], ',', false).unwrap();
        assert!(case.is_sort_field(Field::GivenName));
        assert!(!case.is_sort_field(Field::Surname));
    }

    #[test]
    fn test_serialize() {
        let case = TestCase::new(vec![SortKey::asc(Field::Surname)], '|', true).unwrap();
        let json = serde_json::to_string(&case).unwrap();
        assert_eq!(
            json,
            r#"{"sort_keys":[{"field":"last_name","direction":"asc"}],"delimiter":"|","has_header":true}"#
        );
    }
}
