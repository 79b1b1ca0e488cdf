use chrono::{DateTime, Duration, FixedOffset};
use tracing::{debug, info};

use crate::models::planning::StudyPlan;
use crate::models::routine::RoutineConfig;
use crate::models::settings::{HorizonTuning, PlannerSettings};
use crate::models::task::{TaskRecord, TaskStatus};
use crate::services::availability_resolver::resolve_free_slots;
use crate::services::priority_scorer::rank_tasks;
use crate::services::schedule_utils::{format_datetime, parse_datetime};
use crate::services::session_allocator::allocate_sessions;

/// Sequences one planning run: score, size the horizon, resolve
/// availability, allocate. Pure over its inputs; `now` is always supplied
/// by the caller.
#[derive(Debug, Clone, Default)]
pub struct PlanningService {
    settings: PlannerSettings,
}

impl PlanningService {
    pub fn new(settings: PlannerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Generate a fresh study plan from the current task and routine
    /// snapshot. Never fails: malformed tasks degrade to score 0 or lose
    /// their deadline bound, and an empty or fully-done task list yields an
    /// empty plan.
    pub fn generate_plan(
        &self,
        tasks: &[TaskRecord],
        routine: &RoutineConfig,
        now: DateTime<FixedOffset>,
    ) -> StudyPlan {
        let active: Vec<TaskRecord> = tasks
            .iter()
            .filter(|task| task.status != TaskStatus::Done)
            .cloned()
            .collect();

        if active.is_empty() {
            debug!(target: "app::planning", "no active tasks, returning empty plan");
            return StudyPlan {
                generated_at: format_datetime(now),
                horizon_days: 0,
                sessions: Vec::new(),
                unscheduled: Vec::new(),
            };
        }

        let ranked = rank_tasks(&active, now, &self.settings.scoring);
        let horizon_days = plan_horizon_days(&active, now, &self.settings.horizon);
        debug!(
            target: "app::planning",
            task_count = ranked.len(),
            horizon_days,
            "planning run started"
        );

        let slots = resolve_free_slots(routine, horizon_days, now, &self.settings.allocator);
        let outcome = allocate_sessions(&ranked, &slots, &self.settings.allocator);

        info!(
            target: "app::planning",
            session_count = outcome.sessions.len(),
            unscheduled_count = outcome.unscheduled.len(),
            horizon_days,
            "plan generated"
        );

        StudyPlan {
            generated_at: format_datetime(now),
            horizon_days,
            sessions: outcome.sessions,
            unscheduled: outcome.unscheduled,
        }
    }
}

/// Number of future days to resolve availability for: full days until the
/// latest valid due date plus the padding, never less than the baseline
/// window, clamped to the configured bounds.
pub fn plan_horizon_days(
    tasks: &[TaskRecord],
    now: DateTime<FixedOffset>,
    tuning: &HorizonTuning,
) -> i64 {
    let mut latest_due = now + Duration::days(tuning.baseline_days);
    for task in tasks {
        if let Some(due) = task
            .due_at
            .as_deref()
            .and_then(|raw| parse_datetime(raw).ok())
        {
            if due > latest_due {
                latest_due = due;
            }
        }
    }

    let days = latest_due.signed_duration_since(now).num_days() + tuning.padding_days;
    days.clamp(tuning.min_days, tuning.max_days)
}
