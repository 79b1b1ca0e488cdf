use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// A concrete scheduled block of work on one task.
///
/// Sessions are regenerated from scratch on every planning run and never
/// mutated in place. Timestamps are RFC3339.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    pub task_id: String,
    pub task_title: String,
    pub subject: String,
    pub start_at: String,
    pub end_at: String,
    pub duration_minutes: i64,
}

/// A task that could not be fully placed before slots or its deadline ran
/// out. `remaining_minutes` is what is still unallocated; callers detect
/// partially satisfied plans through this list rather than through errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnscheduledTask {
    pub task_id: String,
    pub task_title: String,
    pub remaining_minutes: i64,
}

/// Output of one planning run: the session calendar plus what was left over.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub generated_at: String,
    pub horizon_days: i64,
    pub sessions: Vec<StudySession>,
    #[serde(default)]
    pub unscheduled: Vec<UnscheduledTask>,
}

impl StudyPlan {
    /// Group sessions by calendar date for display. Sessions whose start
    /// time fails to parse are skipped.
    pub fn sessions_by_day(&self) -> BTreeMap<NaiveDate, Vec<&StudySession>> {
        let mut days: BTreeMap<NaiveDate, Vec<&StudySession>> = BTreeMap::new();
        for session in &self.sessions {
            if let Ok(start) = DateTime::parse_from_rfc3339(&session.start_at) {
                days.entry(start.date_naive()).or_default().push(session);
            }
        }
        days
    }

    pub fn total_scheduled_minutes(&self) -> i64 {
        self.sessions.iter().map(|s| s.duration_minutes).sum()
    }
}
