use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::settings::ScoringTuning;
use crate::models::task::TaskRecord;
use crate::services::schedule_utils;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A task paired with the score computed for one planning run. Scores are
/// display/ordering snapshots, never written back to the task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTask {
    pub task: TaskRecord,
    pub score: f64,
}

/// Urgency/importance score, higher is more urgent. A missing or
/// unparseable due date scores 0 and sinks the task to the bottom without
/// excluding it from scheduling.
pub fn score_task(task: &TaskRecord, now: DateTime<FixedOffset>, tuning: &ScoringTuning) -> f64 {
    let due = match task
        .due_at
        .as_deref()
        .and_then(|raw| schedule_utils::parse_datetime(raw).ok())
    {
        Some(due) => due,
        None => return 0.0,
    };

    let days_until_due = (due.signed_duration_since(now).num_seconds() as f64 / SECONDS_PER_DAY)
        .max(tuning.min_days_until_due);
    let urgency = tuning.urgency_base / days_until_due.powf(tuning.urgency_exponent);
    let impact = task.grade_impact * tuning.grade_impact_weight;
    let preference = task.personal_importance * tuning.personal_importance_weight;

    urgency + impact + tuning.difficulty_points(task.difficulty) + preference
}

/// Score every task and sort descending. The sort is stable, so equal
/// scores keep their input order.
pub fn rank_tasks(
    tasks: &[TaskRecord],
    now: DateTime<FixedOffset>,
    tuning: &ScoringTuning,
) -> Vec<ScoredTask> {
    let mut scored: Vec<ScoredTask> = tasks
        .iter()
        .map(|task| ScoredTask {
            score: score_task(task, now, tuning),
            task: task.clone(),
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    debug!(target: "app::planning", count = scored.len(), "tasks ranked");
    scored
}
