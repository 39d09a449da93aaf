use super::brackets::partition;
use super::domain::{Criterion, Direction, Sex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Five grade anchors for one criterion/sex/bracket, from the elimination floor `i` to the
/// optimal boundary `e_upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRecord {
    pub i: f64,
    pub s_upper: f64,
    pub b_upper: f64,
    pub mb_upper: f64,
    pub e_upper: f64,
}

impl ThresholdRecord {
    pub const fn new(i: f64, s_upper: f64, b_upper: f64, mb_upper: f64, e_upper: f64) -> Self {
        Self {
            i,
            s_upper,
            b_upper,
            mb_upper,
            e_upper,
        }
    }

    /// Anchors in grade order, I first.
    pub const fn anchors(&self) -> [f64; 5] {
        [self.i, self.s_upper, self.b_upper, self.mb_upper, self.e_upper]
    }

    pub fn is_strictly_monotonic(&self, direction: Direction) -> bool {
        let anchors = self.anchors();
        anchors.iter().all(|value| value.is_finite())
            && anchors.windows(2).all(|pair| match direction {
                Direction::HigherIsBetter => pair[0] < pair[1],
                Direction::LowerIsBetter => pair[0] > pair[1],
            })
    }
}

type BracketRecords = BTreeMap<String, ThresholdRecord>;

/// Read-only mapping from criterion/sex/bracket to threshold anchors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdStore {
    version: String,
    records: BTreeMap<(Criterion, Sex), BracketRecords>,
}

impl ThresholdStore {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            records: BTreeMap::new(),
        }
    }

    /// Adds or replaces a record, returning the previous one. No validation is applied; use
    /// [`ThresholdStore::missing_brackets`] or the reference loader for completeness checks.
    pub fn insert(
        &mut self,
        criterion: Criterion,
        sex: Sex,
        bracket: impl Into<String>,
        record: ThresholdRecord,
    ) -> Option<ThresholdRecord> {
        self.records
            .entry((criterion, sex))
            .or_default()
            .insert(bracket.into(), record)
    }

    pub fn lookup(
        &self,
        criterion: Criterion,
        sex: Sex,
        bracket: &str,
    ) -> Option<&ThresholdRecord> {
        self.records
            .get(&(criterion, sex))
            .and_then(|brackets| brackets.get(bracket))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.records.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every record with its key, ordered by criterion, sex and bracket label.
    pub fn iter(&self) -> impl Iterator<Item = (Criterion, Sex, &str, &ThresholdRecord)> + '_ {
        self.records.iter().flat_map(|(&(criterion, sex), brackets)| {
            brackets
                .iter()
                .map(move |(bracket, record)| (criterion, sex, bracket.as_str(), record))
        })
    }

    /// Declared brackets that have no record, per criterion and sex.
    pub fn missing_brackets(&self) -> Vec<(Criterion, Sex, &'static str)> {
        let mut missing = Vec::new();
        for criterion in Criterion::ordered() {
            for sex in [Sex::Male, Sex::Female] {
                for bracket in partition(criterion.axis(), sex) {
                    if self.lookup(criterion, sex, bracket.label).is_none() {
                        missing.push((criterion, sex, bracket.label));
                    }
                }
            }
        }
        missing
    }
}
