use tacf_score::scoring::{CandidateInput, CriterionResult, EvaluationOutcome, Sex};

fn format_bound(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{value}"))
}

fn format_row(row: &CriterionResult) -> String {
    let raw = row
        .raw_value
        .map_or_else(|| "—".to_string(), |value| format!("{value}"));
    format!(
        "- {:<38} | {:>7} | {:>4.1}/{:<2} | I {:>6} | E {:>6} | {}",
        row.criterion.label(),
        raw,
        row.points,
        row.weight,
        format_bound(row.lower_bound),
        format_bound(row.optimal_bound),
        row.status_label()
    )
}

pub(crate) fn render_outcome(input: &CandidateInput, outcome: &EvaluationOutcome) {
    println!("TACF evaluation");
    println!(
        "Candidate: {}, {} years, {} cm",
        input.sex, input.age, input.height_cm
    );
    println!(
        "Brackets: age {}, height {}",
        outcome.age_bracket, outcome.height_bracket
    );

    println!("\nCriteria");
    for row in &outcome.criteria {
        println!("{}", format_row(row));
    }

    println!("\nFinal grade: {:.1} pts", outcome.final_grade);
    println!("Rating: {} ({})", outcome.rating, outcome.rating.name());
    println!("Result: {}", outcome.summary());

    let eliminated: Vec<&str> = outcome
        .criteria
        .iter()
        .filter(|row| !row.passed)
        .map(|row| row.criterion.label())
        .collect();
    if !eliminated.is_empty() {
        println!("Eliminatory criteria not met: {}", eliminated.join(", "));
    }
}

pub(crate) fn render_brackets(
    sex: Sex,
    age: u16,
    height_cm: f64,
    age_bracket: &str,
    height_bracket: &str,
) {
    println!("Candidate: {sex}, {age} years, {height_cm} cm");
    println!("Age bracket: {age_bracket}");
    println!("Height bracket: {height_bracket}");
}
