//! Percentage deviation of a user's scores from the population reference means.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mean misinformation exposure score of the reference population.
pub const MISINFO_MEAN: f64 = 0.51;
/// Mean partisanship score of the reference population, on the [-1, 1] scale.
pub const PARTISAN_MEAN_RAW: f64 = -0.352;

/// Deltas in percent, rounded to two decimals. `None` when the input score was absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoreDeltas {
    pub misinfo: Option<f64>,
    pub partisan: Option<f64>,
}

pub fn compute_deltas(misinfo: Option<f64>, partisan: Option<f64>) -> ScoreDeltas {
    // Partisanship is shifted into [0, 2] so the mean is not near zero
    let partisan_mean = PARTISAN_MEAN_RAW + 1.0;

    ScoreDeltas {
        misinfo: misinfo.map(|score| percent_change(score, MISINFO_MEAN)),
        partisan: partisan.map(|score| percent_change(score + 1.0, partisan_mean)),
    }
}

fn percent_change(value: f64, mean: f64) -> f64 {
    round2((value - mean) / mean * 100.0)
}

/// Rounds half away from zero to two decimal places.
///
/// Exact binary ties such as `0.125` round up to `0.13`, not to the even neighbour.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// " lower than average" for a negative delta, " higher than average" otherwise.
///
/// The sign is read from the rounded number, so both `0.0` and `-0.0` count as higher.
pub fn qualifier(delta: Option<f64>) -> Option<&'static str> {
    delta.map(|d| {
        if d < 0.0 {
            " lower than average"
        } else {
            " higher than average"
        }
    })
}

/// Display label such as `"-12.50% lower than average"`; `None` when there is no delta.
pub fn format_delta(delta: Option<f64>) -> Option<String> {
    let value = delta?;
    let suffix = qualifier(delta).unwrap_or_default();
    // Avoid printing "-0.00%"
    let shown = if value == 0.0 { 0.0 } else { value };
    Some(format!("{:.2}%{}", shown, suffix))
}
