//! TACF scoring: bracket resolution, threshold lookup, interpolation, elimination checks, and
//! final grade classification.

pub mod aggregate;
pub mod brackets;
pub mod criterion;
pub mod domain;
pub mod engine;
pub mod interpolate;
pub mod reference;
pub mod thresholds;

pub use aggregate::{classify, MINIMUM_PASSING_GRADE};
pub use brackets::{resolve_age_bracket, resolve_height_bracket, Bracket};
pub use domain::{
    age_on, BracketAxis, CandidateInput, Criterion, CriterionResult, Direction,
    EvaluationOutcome, GlobalRating, Measurements, RatingBand, Sex, Verdict,
};
pub use engine::EvaluationEngine;
pub use interpolate::interpolate;
pub use reference::{ReferenceDataError, ReferenceTables, DEFAULT_THRESHOLDS_CSV};
pub use thresholds::{ThresholdRecord, ThresholdStore};
