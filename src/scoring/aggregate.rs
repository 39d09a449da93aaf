use super::domain::{CriterionResult, EvaluationOutcome, GlobalRating, Verdict};
use super::interpolate::round_to_tenth;

/// Minimum final grade for an APTO verdict.
pub const MINIMUM_PASSING_GRADE: f64 = 20.0;

/// Bands in the order they are checked.
const RATING_PRIORITY: [GlobalRating; 5] = [
    GlobalRating::Excellent,
    GlobalRating::VeryGood,
    GlobalRating::Good,
    GlobalRating::Satisfactory,
    GlobalRating::Insufficient,
];

/// Band containing a one-decimal grade. Grades outside `[0, 100]` fall back to I.
pub fn classify(final_grade: f64) -> GlobalRating {
    RATING_PRIORITY
        .into_iter()
        .find(|rating| {
            let (min, max) = rating.bounds();
            min <= final_grade && final_grade <= max
        })
        .unwrap_or(GlobalRating::Insufficient)
}

pub fn decide_verdict(results: &[CriterionResult], final_grade: f64) -> Verdict {
    let all_cleared = results.iter().all(|result| result.passed);
    if all_cleared && final_grade >= MINIMUM_PASSING_GRADE {
        Verdict::Apto
    } else {
        Verdict::NotApto
    }
}

pub fn aggregate(
    results: Vec<CriterionResult>,
    age_bracket: &str,
    height_bracket: &str,
) -> EvaluationOutcome {
    let final_grade = round_to_tenth(results.iter().map(|result| result.points).sum());
    let rating = classify(final_grade);
    let verdict = decide_verdict(&results, final_grade);

    EvaluationOutcome {
        final_grade,
        verdict,
        rating,
        age_bracket: age_bracket.to_string(),
        height_bracket: height_bracket.to_string(),
        criteria: results,
    }
}
