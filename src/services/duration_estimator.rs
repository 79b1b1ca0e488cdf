use crate::models::settings::EstimatorTuning;
use crate::models::task::{ContentType, DifficultyLevel};

/// Estimate the effort for a workload description, in minutes.
///
/// Base minutes per unit come from the content-type table, scaled by the
/// difficulty multiplier and the fixed review buffer, then rounded half away
/// from zero. A negative or non-finite amount counts as zero work.
pub fn estimate_minutes(
    amount: f64,
    content_type: ContentType,
    difficulty: DifficultyLevel,
    tuning: &EstimatorTuning,
) -> i64 {
    let amount = if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    };
    let raw = amount
        * tuning.base_minutes(content_type)
        * tuning.difficulty_multiplier(difficulty)
        * tuning.review_buffer_factor;
    raw.round() as i64
}
