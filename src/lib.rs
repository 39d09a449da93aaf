//! Scoring engine for the TACF physical fitness test.
//!
//! Raw measurements (waist circumference, upper-body repetitions, trunk-flexion repetitions and
//! the 12-minute run distance) are scored against banded reference tables selected by sex, age
//! and height, then summed into a 0-100 final grade with a categorical rating and an
//! APTO / NOT APTO verdict.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
