//! Row-by-row comparison of oracle output against program output.
//!
//! Only sort-key columns are compared. Within a tie group the order of the
//! other columns is not determined by the test case, so a correct program
//! may legitimately disagree with the oracle there.

use sortcheck_schema::{header_row, parse_records, Field, ParseError, Record, TestCase};

use crate::types::{Comparison, FailureSample};

/// Parse the program's stdout with the case delimiter.
///
/// Blank lines are dropped. If the first non-blank line is the header row it
/// is skipped; whether the program echoes headers is not part of the
/// comparison.
pub fn parse_actual(stdout: &str, case: &TestCase) -> Result<Vec<Record>, ParseError> {
    let delimiter = case.delimiter();
    let header = header_row().join(&delimiter.to_string());
    let echoes_header = stdout
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .find(|line| !line.is_empty())
        .map_or(false, |line| line == header);

    parse_records(stdout, delimiter, echoes_header)
}

/// Compare expected and actual rows on the case's sort-key columns.
///
/// A row present on only one side yields one failure per sort-key column
/// with the missing side left empty.
pub fn compare_records(expected: &[Record], actual: &[Record], case: &TestCase) -> Comparison {
    let columns: Vec<Field> = Field::ALL
        .into_iter()
        .filter(|field| case.is_sort_field(*field))
        .collect();

    let mut failures = Vec::new();
    for row in 0..expected.len().max(actual.len()) {
        let ours = expected.get(row);
        let theirs = actual.get(row);

        for &field in &columns {
            let matches = match (ours, theirs) {
                (Some(e), Some(a)) => e.cmp_field(a, field).is_eq(),
                _ => false,
            };
            if !matches {
                failures.push(FailureSample {
                    row,
                    column: field.column(),
                    field,
                    expected: ours.map(|r| r.render(field)),
                    actual: theirs.map(|r| r.render(field)),
                });
            }
        }
    }

    Comparison {
        expected_rows: expected.len(),
        actual_rows: actual.len(),
        failures,
    }
}

/// Parse `stdout` and compare it against the oracle.
pub fn compare(expected: &[Record], stdout: &str, case: &TestCase) -> Result<Comparison, ParseError> {
    let actual = parse_actual(stdout, case)?;
    Ok(compare_records(expected, &actual, case))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{compute_expected, read_corpus};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sortcheck_clock::MockClock;
    use sortcheck_fs::{build_corpus, CorpusConfig, MockFilesystem};
    use sortcheck_gen::{GeneratorConfig, RecordGenerator};
    use sortcheck_schema::{write_records, SortKey};

    fn record(surname: &str, given: &str, category: &str, year: i32) -> Record {
        Record::new(
            surname,
            given,
            &format!("{}.{}@x.com", given, surname),
            category,
            NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
        )
    }

    fn case(keys: Vec<SortKey>) -> TestCase {
        TestCase::new(keys, ',', false).unwrap()
    }

    // ===========================================
    // Output parsing
    // ===========================================

    #[test]
    fn test_parse_actual_drops_blank_lines() {
        let case = case(vec![SortKey::asc(Field::Surname)]);
        let stdout = "A,B,C,red,1/1/2000\r\nD,E,F,blue,2/2/2002\r\n\r\n";
        assert_eq!(parse_actual(stdout, &case).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_actual_skips_echoed_header() {
        let case = case(vec![SortKey::asc(Field::Surname)]);
        let stdout = "last_name,first_name,email,favorite_color,dob\nA,B,C,red,1/1/2000\n";
        assert_eq!(parse_actual(stdout, &case).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_actual_empty() {
        let case = case(vec![SortKey::asc(Field::Surname)]);
        assert!(parse_actual("", &case).unwrap().is_empty());
        assert!(parse_actual("\n\n", &case).unwrap().is_empty());
    }

    #[test]
    fn test_parse_actual_malformed() {
        let case = case(vec![SortKey::asc(Field::Surname)]);
        let result = parse_actual("Segmentation fault\n", &case);
        assert!(matches!(result, Err(ParseError::FieldCount { line: 1, .. })));
    }

    // ===========================================
    // Column filter
    // ===========================================

    #[test]
    fn test_non_key_columns_ignored() {
        let case = case(vec![SortKey::asc(Field::Category)]);
        let expected = vec![record("A", "x", "blue", 1990), record("B", "y", "red", 1991)];
        let actual = vec![record("Q", "p", "blue", 1950), record("R", "q", "red", 1960)];

        let comparison = compare_records(&expected, &actual, &case);
        assert!(comparison.passed());
        assert_eq!(comparison.expected_rows, 2);
        assert_eq!(comparison.actual_rows, 2);
    }

    #[test]
    fn test_key_column_mismatch_reported() {
        let case = case(vec![SortKey::asc(Field::Category), SortKey::asc(Field::Surname)]);
        let expected = vec![record("A", "x", "blue", 1990), record("B", "y", "blue", 1991)];
        let actual = vec![record("B", "y", "blue", 1991), record("A", "x", "blue", 1990)];

        let comparison = compare_records(&expected, &actual, &case);
        assert_eq!(comparison.failure_count(), 2);
        assert_eq!(
            comparison.failures[0],
            FailureSample {
                row: 0,
                column: 0,
                field: Field::Surname,
                expected: Some("A".to_string()),
                actual: Some("B".to_string()),
            }
        );
        assert_eq!(comparison.failures[1].row, 1);
    }

    #[test]
    fn test_dates_compared_as_values() {
        let case = case(vec![SortKey::asc(Field::BirthDate)]);
        let expected = vec![record("A", "x", "blue", 1990)];
        let comparison = compare(&expected, "A,x,e,blue,01/01/1990\n", &case).unwrap();
        assert!(comparison.passed());
    }

    #[test]
    fn test_missing_rows_reported() {
        let case = case(vec![SortKey::asc(Field::Surname), SortKey::asc(Field::Email)]);
        let expected = vec![record("A", "x", "blue", 1990), record("B", "y", "red", 1991)];
        let actual = vec![record("A", "x", "blue", 1990)];

        let comparison = compare_records(&expected, &actual, &case);
        assert_eq!(comparison.failure_count(), 2);
        assert!(comparison.failures.iter().all(|f| f.row == 1 && f.actual.is_none()));
        assert_eq!(comparison.failures[0].column, 0);
        assert_eq!(comparison.failures[1].column, 2);
    }

    #[test]
    fn test_extra_rows_reported() {
        let case = case(vec![SortKey::asc(Field::Surname)]);
        let actual = vec![record("A", "x", "blue", 1990)];
        let comparison = compare_records(&[], &actual, &case);
        assert_eq!(comparison.failure_count(), 1);
        assert_eq!(comparison.failures[0].expected, None);
        assert_eq!(comparison.failures[0].actual, Some("A".to_string()));
    }

    #[test]
    fn test_duplicate_key_field_compared_once() {
        let case = TestCase::new_unchecked(
            vec![SortKey::asc(Field::Surname), SortKey::desc(Field::Surname)],
            ',',
            false,
        )
        .unwrap();
        let comparison = compare_records(
            &[record("A", "x", "blue", 1990)],
            &[record("B", "x", "blue", 1990)],
            &case,
        );
        assert_eq!(comparison.failure_count(), 1);
    }

    // ===========================================
    // Scenarios
    // ===========================================

    fn scenario_corpus(fs: &MockFilesystem, case: &TestCase, rows: usize) -> sortcheck_fs::Corpus {
        let generator = RecordGenerator::new(
            GeneratorConfig::default(),
            &MockClock::from_ymd(2024, 1, 1).unwrap(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        build_corpus(fs, &generator, &mut rng, case, &CorpusConfig::new(10, rows)).unwrap()
    }

    #[test]
    fn test_scenario_correct_program_passes() {
        let fs = MockFilesystem::new();
        let case = case(vec![SortKey::asc(Field::Category), SortKey::asc(Field::Surname)]);
        let corpus = scenario_corpus(&fs, &case, 100);
        let expected = compute_expected(&fs, corpus.paths(), &case).unwrap();

        // A correct program may order ties differently on non-key columns.
        let mut theirs = read_corpus(&fs, corpus.paths(), &case).unwrap();
        theirs.reverse();
        let keys = case.effective_keys();
        theirs.sort_by(|a, b| a.cmp_by_keys(b, &keys));
        let stdout = write_records(&theirs, ',', false).unwrap();

        let comparison = compare(&expected, &stdout, &case).unwrap();
        assert!(comparison.passed(), "{:?}", comparison.failures.first());
        assert_eq!(comparison.actual_rows, 1000);
    }

    #[test]
    fn test_scenario_primary_key_only_program_fails() {
        let fs = MockFilesystem::new();
        let case = case(vec![SortKey::asc(Field::Category), SortKey::asc(Field::Surname)]);
        let corpus = scenario_corpus(&fs, &case, 100);
        let expected = compute_expected(&fs, corpus.paths(), &case).unwrap();

        let mut theirs = read_corpus(&fs, corpus.paths(), &case).unwrap();
        theirs.sort_by(|a, b| a.category.cmp(&b.category));
        let stdout = write_records(&theirs, ',', false).unwrap();

        let comparison = compare(&expected, &stdout, &case).unwrap();
        assert!(!comparison.passed());
        assert!(comparison.failures.iter().all(|f| f.field == Field::Surname));
    }

    #[test]
    fn test_scenario_empty_corpus() {
        let fs = MockFilesystem::new();
        let case = case(vec![SortKey::asc(Field::Category), SortKey::asc(Field::Surname)]);
        let corpus = scenario_corpus(&fs, &case, 0);
        let expected = compute_expected(&fs, corpus.paths(), &case).unwrap();

        let comparison = compare(&expected, "", &case).unwrap();
        assert!(comparison.passed());
        assert_eq!(comparison.expected_rows, 0);
        assert_eq!(comparison.actual_rows, 0);
    }
}
