//! Piecewise-linear scoring across the five grade anchors.
//!
//! The anchors I, S, B, MB, E split the value axis into four intervals worth a quarter of the
//! criterion weight each. A value at or beyond E earns the full weight, a value at or behind I
//! earns nothing, and anything in between is interpolated inside its enclosing interval.

use super::domain::{Criterion, Direction};
use super::thresholds::ThresholdRecord;

/// Score fraction reached at each anchor, I first.
const ANCHOR_FRACTIONS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `true` when `value` is at least as good as `anchor`.
fn reaches(value: f64, anchor: f64, direction: Direction) -> bool {
    match direction {
        Direction::HigherIsBetter => value >= anchor,
        Direction::LowerIsBetter => value <= anchor,
    }
}

/// Fraction of the criterion weight earned by `value`, in `[0, 1]`.
pub fn score_fraction(value: f64, record: &ThresholdRecord, direction: Direction) -> f64 {
    let anchors = record.anchors();

    if reaches(value, record.e_upper, direction) {
        return 1.0;
    }
    if reaches(record.i, value, direction) {
        return 0.0;
    }

    for (index, pair) in anchors.windows(2).enumerate() {
        let (from, to) = (pair[0], pair[1]);
        if reaches(value, from, direction) && reaches(to, value, direction) {
            let (from_frac, to_frac) = (ANCHOR_FRACTIONS[index], ANCHOR_FRACTIONS[index + 1]);
            // A tie with the previous anchor is already matched by the window ending there.
            if to == from {
                return to_frac;
            }
            return from_frac + (to_frac - from_frac) * (value - from) / (to - from);
        }
    }

    // Only reachable with anchors out of order for the direction.
    0.0
}

/// Weighted points for `value`, rounded to one decimal place.
pub fn interpolate(value: f64, record: &ThresholdRecord, criterion: Criterion) -> f64 {
    let fraction = score_fraction(value, record, criterion.direction());
    round_to_tenth(fraction * criterion.weight())
}
