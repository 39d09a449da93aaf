//! Versioned reference tables loaded from CSV.
//!
//! One row per criterion/sex/bracket:
//! `version,criterion,sex,bracket,i,s_upper,b_upper,mb_upper,e_upper`. Loading validates the
//! whole table set and fails on the first problem, so a store built here never reports a
//! missing record at evaluation time.

use super::brackets::is_declared;
use super::domain::{Criterion, Sex};
use super::thresholds::{ThresholdRecord, ThresholdStore};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Table set shipped with the crate.
pub const DEFAULT_THRESHOLDS_CSV: &str = include_str!("../../data/thresholds.csv");

#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("failed to read reference tables: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid reference CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: unknown criterion '{value}'")]
    UnknownCriterion { line: u64, value: String },
    #[error("line {line}: unknown sex '{value}'")]
    UnknownSex { line: u64, value: String },
    #[error("line {line}: version '{found}' does not match '{expected}'")]
    MixedVersions {
        line: u64,
        expected: String,
        found: String,
    },
    #[error("line {line}: bracket '{bracket}' is not declared for {criterion} ({sex})")]
    UndeclaredBracket {
        line: u64,
        criterion: Criterion,
        sex: Sex,
        bracket: String,
    },
    #[error("line {line}: duplicate record for {criterion} ({sex}) bracket '{bracket}'")]
    DuplicateRecord {
        line: u64,
        criterion: Criterion,
        sex: Sex,
        bracket: String,
    },
    #[error("line {line}: anchors for {criterion} ({sex}) bracket '{bracket}' are not strictly monotonic")]
    NonMonotonic {
        line: u64,
        criterion: Criterion,
        sex: Sex,
        bracket: String,
    },
    #[error("reference tables are empty")]
    Empty,
    #[error("no record for {criterion} ({sex}) bracket '{bracket}'")]
    MissingRecord {
        criterion: Criterion,
        sex: Sex,
        bracket: &'static str,
    },
}

#[derive(Debug, Deserialize)]
struct ThresholdRow {
    version: String,
    criterion: String,
    sex: String,
    bracket: String,
    i: f64,
    s_upper: f64,
    b_upper: f64,
    mb_upper: f64,
    e_upper: f64,
}

impl ThresholdRow {
    fn record(&self) -> ThresholdRecord {
        ThresholdRecord::new(self.i, self.s_upper, self.b_upper, self.mb_upper, self.e_upper)
    }
}

pub struct ReferenceTables;

impl ReferenceTables {
    /// Loads the embedded table set.
    pub fn embedded() -> Result<ThresholdStore, ReferenceDataError> {
        Self::from_reader(DEFAULT_THRESHOLDS_CSV.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ThresholdStore, ReferenceDataError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ThresholdStore, ReferenceDataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut store: Option<ThresholdStore> = None;

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |position| position.line());
            let row: ThresholdRow = record.deserialize(Some(&headers))?;
            let store = store.get_or_insert_with(|| ThresholdStore::new(row.version.clone()));
            apply_row(store, row, line)?;
        }

        let store = store.ok_or(ReferenceDataError::Empty)?;
        if let Some((criterion, sex, bracket)) = store.missing_brackets().into_iter().next() {
            return Err(ReferenceDataError::MissingRecord {
                criterion,
                sex,
                bracket,
            });
        }

        info!(
            version = store.version(),
            records = store.len(),
            "reference tables loaded"
        );
        Ok(store)
    }
}

fn apply_row(
    store: &mut ThresholdStore,
    row: ThresholdRow,
    line: u64,
) -> Result<(), ReferenceDataError> {
    if row.version != store.version() {
        return Err(ReferenceDataError::MixedVersions {
            line,
            expected: store.version().to_string(),
            found: row.version,
        });
    }

    let criterion =
        Criterion::from_code(&row.criterion).ok_or_else(|| ReferenceDataError::UnknownCriterion {
            line,
            value: row.criterion.clone(),
        })?;
    let sex = Sex::parse(&row.sex).ok_or_else(|| ReferenceDataError::UnknownSex {
        line,
        value: row.sex.clone(),
    })?;

    if !is_declared(criterion.axis(), sex, &row.bracket) {
        return Err(ReferenceDataError::UndeclaredBracket {
            line,
            criterion,
            sex,
            bracket: row.bracket,
        });
    }

    let record = row.record();
    if !record.is_strictly_monotonic(criterion.direction()) {
        return Err(ReferenceDataError::NonMonotonic {
            line,
            criterion,
            sex,
            bracket: row.bracket,
        });
    }

    if store.lookup(criterion, sex, &row.bracket).is_some() {
        return Err(ReferenceDataError::DuplicateRecord {
            line,
            criterion,
            sex,
            bracket: row.bracket,
        });
    }

    store.insert(criterion, sex, row.bracket, record);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "version,criterion,sex,bracket,i,s_upper,b_upper,mb_upper,e_upper\n";

    fn with_rows(rows: &str) -> String {
        format!("{HEADER}{rows}")
    }

    /// Embedded tables with the line at `index` replaced; index 0 is the header.
    fn embedded_with_row(index: usize, replacement: &str) -> String {
        let mut lines: Vec<&str> = DEFAULT_THRESHOLDS_CSV.lines().collect();
        lines[index] = replacement;
        lines.join("\n")
    }

    #[test]
    fn embedded_tables_are_complete() {
        let store = ReferenceTables::embedded().expect("embedded tables load");
        assert_eq!(store.version(), "2024.1");
        assert_eq!(store.len(), 60);
        assert!(store.missing_brackets().is_empty());

        let run = store
            .lookup(Criterion::TwelveMinRun, Sex::Male, "21-30")
            .expect("run record");
        assert_eq!(run.anchors(), [2100.0, 2300.0, 2500.0, 2700.0, 2900.0]);
    }

    #[test]
    fn rejects_empty_input() {
        let err = ReferenceTables::from_reader(HEADER.as_bytes()).expect_err("empty fails");
        assert!(matches!(err, ReferenceDataError::Empty));
    }

    #[test]
    fn rejects_incomplete_tables() {
        let csv = with_rows("2024.1,OIC02,male,21-30,17,23,29,35,41\n");
        let err = ReferenceTables::from_reader(csv.as_bytes()).expect_err("incomplete fails");
        assert!(matches!(err, ReferenceDataError::MissingRecord { .. }));
    }

    #[test]
    fn rejects_undeclared_bracket() {
        let csv = with_rows("2024.1,OIC02,male,18-25,17,23,29,35,41\n");
        let err = ReferenceTables::from_reader(csv.as_bytes()).expect_err("bracket fails");
        match err {
            ReferenceDataError::UndeclaredBracket { line, bracket, .. } => {
                assert_eq!(line, 2);
                assert_eq!(bracket, "18-25");
            }
            other => panic!("expected undeclared bracket, got {other:?}"),
        }
    }

    #[test]
    fn rejects_height_label_for_age_keyed_criterion() {
        let csv = with_rows("2024.1,OIC03,female,<=161,24,29,34,39,44\n");
        let err = ReferenceTables::from_reader(csv.as_bytes()).expect_err("axis mismatch");
        assert!(matches!(err, ReferenceDataError::UndeclaredBracket { .. }));
    }

    #[test]
    fn rejects_anchors_in_wrong_direction() {
        let csv = with_rows("2024.1,OIC01,male,<=166,78,82,86,90,94\n");
        let err = ReferenceTables::from_reader(csv.as_bytes()).expect_err("order fails");
        assert!(matches!(err, ReferenceDataError::NonMonotonic { .. }));
    }

    #[test]
    fn rejects_unknown_codes() {
        let csv = with_rows("2024.1,OIC09,male,<=20,1,2,3,4,5\n");
        let err = ReferenceTables::from_reader(csv.as_bytes()).expect_err("criterion fails");
        assert!(matches!(err, ReferenceDataError::UnknownCriterion { .. }));

        let csv = with_rows("2024.1,OIC02,other,<=20,1,2,3,4,5\n");
        let err = ReferenceTables::from_reader(csv.as_bytes()).expect_err("sex fails");
        assert!(matches!(err, ReferenceDataError::UnknownSex { .. }));
    }

    #[test]
    fn rejects_duplicates_and_mixed_versions() {
        let duplicate = embedded_with_row(2, "2024.1,OIC01,male,<=166,94,90,86,82,78");
        let err = ReferenceTables::from_reader(duplicate.as_bytes()).expect_err("duplicate");
        assert!(matches!(err, ReferenceDataError::DuplicateRecord { line: 3, .. }));

        let mixed = embedded_with_row(5, "2023.2,OIC01,male,181-188,102,98,94,90,86");
        let err = ReferenceTables::from_reader(mixed.as_bytes()).expect_err("mixed versions");
        match err {
            ReferenceDataError::MixedVersions {
                expected, found, ..
            } => {
                assert_eq!(expected, "2024.1");
                assert_eq!(found, "2023.2");
            }
            other => panic!("expected mixed versions, got {other:?}"),
        }
    }

    #[test]
    fn loads_tables_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(DEFAULT_THRESHOLDS_CSV.as_bytes())
            .expect("write tables");

        let store = ReferenceTables::from_path(file.path()).expect("tables load from disk");
        assert_eq!(store, ReferenceTables::embedded().expect("embedded"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = ReferenceTables::from_path(dir.path().join("absent.csv")).expect_err("io");
        assert!(matches!(err, ReferenceDataError::Io(_)));
    }
}
