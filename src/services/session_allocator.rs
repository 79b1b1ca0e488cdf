use chrono::{DateTime, Duration, FixedOffset};
use tracing::debug;
use uuid::Uuid;

use crate::models::planning::{StudySession, UnscheduledTask};
use crate::models::settings::AllocatorTuning;
use crate::models::task::TaskRecord;
use crate::services::availability_resolver::FreeSlot;
use crate::services::priority_scorer::ScoredTask;
use crate::services::schedule_utils::{end_of_day, format_datetime, minutes_between, parse_datetime};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationOutcome {
    pub sessions: Vec<StudySession>,
    pub unscheduled: Vec<UnscheduledTask>,
}

struct PendingTask<'a> {
    task: &'a TaskRecord,
    remaining: i64,
    deadline: Option<DateTime<FixedOffset>>,
}

/// Greedily pack ranked tasks into chronological slots.
///
/// Remaining minutes are tracked on private working copies; the input tasks
/// are never touched. Within a slot the priority order is walked top-down,
/// allocating `min(remaining, capacity)` whenever at least
/// `min_allocation_minutes` of capacity is left, with a context-switch pause
/// between consecutive allocations. A task whose deadline lies behind the
/// cursor is passed over; whatever is still unallocated when slots run out
/// is reported in `unscheduled`.
pub fn allocate_sessions(
    ranked: &[ScoredTask],
    slots: &[FreeSlot],
    tuning: &AllocatorTuning,
) -> AllocationOutcome {
    let mut pending: Vec<PendingTask> = ranked
        .iter()
        .map(|scored| PendingTask {
            task: &scored.task,
            remaining: scored.task.estimated_minutes.max(0),
            deadline: deadline_for(&scored.task, tuning),
        })
        .collect();
    pending.retain(|entry| entry.remaining > 0);

    let mut sessions = Vec::new();

    for slot in slots {
        if pending.is_empty() {
            break;
        }

        let mut capacity = minutes_between(slot.start, slot.end);
        let mut cursor = slot.start;

        for entry in pending.iter_mut() {
            if entry.remaining <= 0 {
                continue;
            }
            if let Some(deadline) = entry.deadline {
                if cursor > deadline {
                    continue;
                }
            }
            if capacity < tuning.min_allocation_minutes {
                continue;
            }

            let allocated = entry.remaining.min(capacity);
            let session_end = cursor + Duration::minutes(allocated);

            sessions.push(StudySession {
                id: Uuid::new_v4().to_string(),
                task_id: entry.task.id.clone(),
                task_title: entry.task.title.clone(),
                subject: entry.task.subject.clone(),
                start_at: format_datetime(cursor),
                end_at: format_datetime(session_end),
                duration_minutes: allocated,
            });

            entry.remaining -= allocated;
            capacity -= allocated;
            cursor = session_end;

            if capacity > tuning.context_switch_minutes {
                capacity -= tuning.context_switch_minutes;
                cursor += Duration::minutes(tuning.context_switch_minutes);
            }
        }

        pending.retain(|entry| entry.remaining > 0);
    }

    let unscheduled: Vec<UnscheduledTask> = pending
        .into_iter()
        .map(|entry| UnscheduledTask {
            task_id: entry.task.id.clone(),
            task_title: entry.task.title.clone(),
            remaining_minutes: entry.remaining,
        })
        .collect();

    debug!(
        target: "app::planning",
        session_count = sessions.len(),
        unscheduled_count = unscheduled.len(),
        "allocation finished"
    );

    AllocationOutcome {
        sessions,
        unscheduled,
    }
}

/// Latest admissible session time for a task: end of day (23:59:59) on the
/// due date plus the configured slack. Tasks without a parseable due date
/// have no deadline and are never filtered.
fn deadline_for(task: &TaskRecord, tuning: &AllocatorTuning) -> Option<DateTime<FixedOffset>> {
    let due = parse_datetime(task.due_at.as_deref()?).ok()?;
    Some(end_of_day(due + Duration::days(tuning.deadline_slack_days)))
}
