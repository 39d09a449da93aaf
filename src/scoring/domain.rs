use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "masculino" => Some(Self::Male),
            "female" | "f" | "feminino" => Some(Self::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which way a raw measurement improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Demographic axis a criterion's thresholds are keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketAxis {
    Age,
    Height,
}

/// The four scored test items (OICs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    WaistCircumference,
    UpperBodyReps,
    TrunkFlexionReps,
    TwelveMinRun,
}

impl Criterion {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::WaistCircumference,
            Self::UpperBodyReps,
            Self::TrunkFlexionReps,
            Self::TwelveMinRun,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::WaistCircumference => "OIC01",
            Self::UpperBodyReps => "OIC02",
            Self::TrunkFlexionReps => "OIC03",
            Self::TwelveMinRun => "OIC04",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|criterion| criterion.code().eq_ignore_ascii_case(code.trim()))
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::WaistCircumference => "Waist circumference (cm)",
            Self::UpperBodyReps => "Upper-body flexion/extension (reps)",
            Self::TrunkFlexionReps => "Trunk flexion (reps)",
            Self::TwelveMinRun => "12-minute run (m)",
        }
    }

    /// Maximum points the criterion contributes to the final grade.
    pub const fn weight(self) -> f64 {
        match self {
            Self::WaistCircumference | Self::UpperBodyReps => 30.0,
            Self::TrunkFlexionReps | Self::TwelveMinRun => 20.0,
        }
    }

    pub const fn direction(self) -> Direction {
        match self {
            Self::WaistCircumference => Direction::LowerIsBetter,
            _ => Direction::HigherIsBetter,
        }
    }

    pub const fn axis(self) -> BracketAxis {
        match self {
            Self::WaistCircumference => BracketAxis::Height,
            _ => BracketAxis::Age,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Raw measurements; `None` means the test was not attempted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    #[serde(default)]
    pub waist_cm: Option<f64>,
    #[serde(default)]
    pub upper_body_reps: Option<f64>,
    #[serde(default)]
    pub trunk_flexion_reps: Option<f64>,
    #[serde(default)]
    pub run_meters: Option<f64>,
}

impl Measurements {
    pub fn get(&self, criterion: Criterion) -> Option<f64> {
        match criterion {
            Criterion::WaistCircumference => self.waist_cm,
            Criterion::UpperBodyReps => self.upper_body_reps,
            Criterion::TrunkFlexionReps => self.trunk_flexion_reps,
            Criterion::TwelveMinRun => self.run_meters,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateInput {
    pub sex: Sex,
    pub age: u16,
    pub height_cm: f64,
    #[serde(default)]
    pub measurements: Measurements,
}

/// Completed years between `birth_date` and `assessed_on`, saturating at zero.
pub fn age_on(birth_date: NaiveDate, assessed_on: NaiveDate) -> u16 {
    let mut years = assessed_on.year() - birth_date.year();
    if (assessed_on.month(), assessed_on.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    u16::try_from(years.max(0)).unwrap_or(u16::MAX)
}

/// Per-criterion evaluation row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub criterion: Criterion,
    pub raw_value: Option<f64>,
    pub bracket: String,
    pub points: f64,
    pub weight: f64,
    pub lower_bound: Option<f64>,
    pub optimal_bound: Option<f64>,
    pub passed: bool,
}

impl CriterionResult {
    pub fn status_label(&self) -> &'static str {
        if self.passed {
            "APTO"
        } else {
            "NOT APTO"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Apto,
    NotApto,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Apto => "APTO",
            Self::NotApto => "NOT APTO",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Categorical band containing the final grade. Serialized with its code, name and bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RatingBand", try_from = "RatingBand")]
pub enum GlobalRating {
    Insufficient,
    Satisfactory,
    Good,
    VeryGood,
    Excellent,
}

impl GlobalRating {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Insufficient,
            Self::Satisfactory,
            Self::Good,
            Self::VeryGood,
            Self::Excellent,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|rating| rating.code().eq_ignore_ascii_case(code.trim()))
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Insufficient => "I",
            Self::Satisfactory => "S",
            Self::Good => "B",
            Self::VeryGood => "MB",
            Self::Excellent => "E",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Insufficient => "Insufficient",
            Self::Satisfactory => "Satisfactory",
            Self::Good => "Good",
            Self::VeryGood => "Very Good",
            Self::Excellent => "Excellent",
        }
    }

    /// Inclusive grade band, in points.
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            Self::Insufficient => (0.0, 19.9),
            Self::Satisfactory => (20.0, 39.9),
            Self::Good => (40.0, 69.9),
            Self::VeryGood => (70.0, 89.9),
            Self::Excellent => (90.0, 100.0),
        }
    }
}

impl fmt::Display for GlobalRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (min, max) = self.bounds();
        write!(f, "{} ({:.1}-{:.1})", self.code(), min, max)
    }
}

/// Wire form of [`GlobalRating`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBand {
    pub code: String,
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl From<GlobalRating> for RatingBand {
    fn from(rating: GlobalRating) -> Self {
        let (min, max) = rating.bounds();
        Self {
            code: rating.code().to_string(),
            name: rating.name().to_string(),
            min,
            max,
        }
    }
}

impl TryFrom<RatingBand> for GlobalRating {
    type Error = String;

    fn try_from(band: RatingBand) -> Result<Self, Self::Error> {
        GlobalRating::from_code(&band.code)
            .ok_or_else(|| format!("unknown rating code '{}'", band.code))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub final_grade: f64,
    pub verdict: Verdict,
    pub rating: GlobalRating,
    pub age_bracket: String,
    pub height_bracket: String,
    pub criteria: Vec<CriterionResult>,
}

impl EvaluationOutcome {
    pub fn summary(&self) -> String {
        format!("{}: {}", self.verdict, self.rating)
    }

    pub fn result_for(&self, criterion: Criterion) -> Option<&CriterionResult> {
        self.criteria
            .iter()
            .find(|result| result.criterion == criterion)
    }
}
