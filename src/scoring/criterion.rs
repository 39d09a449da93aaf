use super::domain::{BracketAxis, Criterion, CriterionResult, Direction, Sex};
use super::interpolate::interpolate;
use super::thresholds::{ThresholdRecord, ThresholdStore};
use tracing::{debug, warn};

/// Elimination check: lower-is-better fails above I, higher-is-better fails at or below I.
pub fn clears_floor(value: f64, record: &ThresholdRecord, direction: Direction) -> bool {
    match direction {
        Direction::LowerIsBetter => value <= record.i,
        Direction::HigherIsBetter => value > record.i,
    }
}

/// Scores one criterion. Missing measurements and missing reference data both yield zero
/// points and an eliminatory failure.
pub fn evaluate(
    store: &ThresholdStore,
    criterion: Criterion,
    sex: Sex,
    raw_value: Option<f64>,
    age_bracket: &str,
    height_bracket: &str,
) -> CriterionResult {
    let bracket = match criterion.axis() {
        BracketAxis::Height => height_bracket,
        BracketAxis::Age => age_bracket,
    };

    let mut result = CriterionResult {
        criterion,
        raw_value,
        bracket: bracket.to_string(),
        points: 0.0,
        weight: criterion.weight(),
        lower_bound: None,
        optimal_bound: None,
        passed: false,
    };

    let Some(value) = raw_value else {
        debug!(%criterion, "criterion not attempted");
        return result;
    };

    let Some(record) = store.lookup(criterion, sex, bracket) else {
        warn!(
            %criterion,
            %sex,
            bracket,
            version = store.version(),
            "no threshold record for bracket; scoring as eliminated"
        );
        return result;
    };

    result.points = interpolate(value, record, criterion);
    result.lower_bound = Some(record.i);
    result.optimal_bound = Some(record.e_upper);
    result.passed = clears_floor(value, record, criterion.direction());

    debug!(
        %criterion,
        bracket,
        value,
        points = result.points,
        passed = result.passed,
        "criterion evaluated"
    );

    result
}
