//! Fixed demographic partitions used to pick a threshold record.
//!
//! Every partition is ordered by its inclusive upper bound and ends with an open bracket, so
//! any input resolves to exactly one label. Values below the first bound land in the lowest
//! bracket and values beyond the last bound land in the open-ended highest one.

use super::domain::{BracketAxis, Sex};

/// A labelled sub-range of age (years) or height (cm).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub label: &'static str,
    /// Inclusive upper bound; `None` for the open-ended top bracket.
    pub upper: Option<f64>,
}

const fn closed(label: &'static str, upper: f64) -> Bracket {
    Bracket {
        label,
        upper: Some(upper),
    }
}

const fn open(label: &'static str) -> Bracket {
    Bracket { label, upper: None }
}

const MALE_AGE: &[Bracket] = &[
    closed("<=20", 20.0),
    closed("21-30", 30.0),
    closed("31-34", 34.0),
    closed("35-38", 38.0),
    closed("39-41", 41.0),
    closed("42-43", 43.0),
    closed("44-49", 49.0),
    closed("50-52", 52.0),
    open(">=53"),
];

const FEMALE_AGE: &[Bracket] = &[
    closed("<=21", 21.0),
    closed("22-25", 25.0),
    closed("26-29", 29.0),
    closed("30-33", 33.0),
    closed("34-37", 37.0),
    closed("38-41", 41.0),
    closed("42-45", 45.0),
    open(">=46"),
];

const MALE_HEIGHT: &[Bracket] = &[
    closed("<=166", 166.0),
    closed("167-171", 171.0),
    closed("172-175", 175.0),
    closed("176-180", 180.0),
    closed("181-188", 188.0),
    open(">=189"),
];

const FEMALE_HEIGHT: &[Bracket] = &[
    closed("<=161", 161.0),
    closed("162-166", 166.0),
    open(">=167"),
];

/// Declared partition for an axis and sex, lowest bracket first.
pub fn partition(axis: BracketAxis, sex: Sex) -> &'static [Bracket] {
    match (axis, sex) {
        (BracketAxis::Age, Sex::Male) => MALE_AGE,
        (BracketAxis::Age, Sex::Female) => FEMALE_AGE,
        (BracketAxis::Height, Sex::Male) => MALE_HEIGHT,
        (BracketAxis::Height, Sex::Female) => FEMALE_HEIGHT,
    }
}

pub fn is_declared(axis: BracketAxis, sex: Sex, label: &str) -> bool {
    partition(axis, sex)
        .iter()
        .any(|bracket| bracket.label == label)
}

fn resolve(axis: BracketAxis, sex: Sex, value: f64) -> &'static str {
    let brackets = partition(axis, sex);
    brackets
        .iter()
        .find(|bracket| bracket.upper.map_or(true, |upper| value <= upper))
        // Partitions end open, so this only guards the type.
        .unwrap_or(&brackets[brackets.len() - 1])
        .label
}

pub fn resolve_age_bracket(age: u16, sex: Sex) -> &'static str {
    resolve(BracketAxis::Age, sex, f64::from(age))
}

pub fn resolve_height_bracket(height_cm: f64, sex: Sex) -> &'static str {
    resolve(BracketAxis::Height, sex, height_cm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn male_age_boundaries_are_inclusive() {
        assert_eq!(resolve_age_bracket(20, Sex::Male), "<=20");
        assert_eq!(resolve_age_bracket(21, Sex::Male), "21-30");
        assert_eq!(resolve_age_bracket(25, Sex::Male), "21-30");
        assert_eq!(resolve_age_bracket(30, Sex::Male), "21-30");
        assert_eq!(resolve_age_bracket(31, Sex::Male), "31-34");
        assert_eq!(resolve_age_bracket(43, Sex::Male), "42-43");
        assert_eq!(resolve_age_bracket(52, Sex::Male), "50-52");
        assert_eq!(resolve_age_bracket(53, Sex::Male), ">=53");
    }

    #[test]
    fn female_age_boundaries_are_inclusive() {
        assert_eq!(resolve_age_bracket(21, Sex::Female), "<=21");
        assert_eq!(resolve_age_bracket(22, Sex::Female), "22-25");
        assert_eq!(resolve_age_bracket(45, Sex::Female), "42-45");
        assert_eq!(resolve_age_bracket(46, Sex::Female), ">=46");
    }

    #[test]
    fn out_of_range_values_fall_into_open_brackets() {
        assert_eq!(resolve_age_bracket(0, Sex::Male), "<=20");
        assert_eq!(resolve_age_bracket(u16::MAX, Sex::Female), ">=46");
        assert_eq!(resolve_height_bracket(90.0, Sex::Female), "<=161");
        assert_eq!(resolve_height_bracket(250.0, Sex::Male), ">=189");
    }

    #[test]
    fn fractional_heights_resolve_without_gaps() {
        assert_eq!(resolve_height_bracket(166.0, Sex::Male), "<=166");
        assert_eq!(resolve_height_bracket(166.5, Sex::Male), "167-171");
        assert_eq!(resolve_height_bracket(170.0, Sex::Male), "167-171");
        assert_eq!(resolve_height_bracket(188.9, Sex::Male), ">=189");
        assert_eq!(resolve_height_bracket(161.2, Sex::Female), "162-166");
    }

    #[test]
    fn every_age_maps_to_exactly_one_declared_bracket() {
        for sex in [Sex::Male, Sex::Female] {
            for age in 16..=80 {
                let label = resolve_age_bracket(age, sex);
                assert!(is_declared(BracketAxis::Age, sex, label));
                let matching = partition(BracketAxis::Age, sex)
                    .iter()
                    .filter(|bracket| bracket.label == label)
                    .count();
                assert_eq!(matching, 1);
            }
        }
    }

    #[test]
    fn partitions_are_ordered_and_end_open() {
        for axis in [BracketAxis::Age, BracketAxis::Height] {
            for sex in [Sex::Male, Sex::Female] {
                let brackets = partition(axis, sex);
                let (last, rest) = brackets.split_last().expect("non-empty partition");
                assert!(last.upper.is_none());
                let bounds: Vec<f64> = rest
                    .iter()
                    .map(|bracket| bracket.upper.expect("closed bracket"))
                    .collect();
                assert!(bounds.windows(2).all(|pair| pair[0] < pair[1]));
            }
        }
    }
}
