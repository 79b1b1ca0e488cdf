use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveTime};
use tracing::{debug, warn};

use crate::models::routine::RoutineConfig;
use crate::models::settings::AllocatorTuning;
use crate::services::schedule_utils::{at_time_on_date, minutes_between, parse_time_of_day};

const DEFAULT_SLEEP_START: &str = "23:00";
const DEFAULT_SLEEP_END: &str = "07:00";

/// A contiguous free interval available for study, at least
/// `min_slot_minutes` long. Slots are produced in chronological order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeSlot {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl FreeSlot {
    pub fn duration_minutes(&self) -> i64 {
        minutes_between(self.start, self.end)
    }
}

/// Expand the weekly routine into concrete free slots over `horizon_days`
/// days starting at `now`.
///
/// Per day the waking window runs from sleep-end to sleep-start; a window
/// whose end lands before its start on the same date crosses midnight and
/// gets its end pushed to the next day. Recurring blocks carve the window
/// down with a single forward-moving pointer, keeping only gaps of at
/// least `min_slot_minutes`.
pub fn resolve_free_slots(
    routine: &RoutineConfig,
    horizon_days: i64,
    now: DateTime<FixedOffset>,
    tuning: &AllocatorTuning,
) -> Vec<FreeSlot> {
    let offset = *now.offset();

    let Some((wake_time, sleep_time)) = sleep_window(routine) else {
        warn!(
            target: "app::schedule",
            sleep_start = %routine.sleep_start,
            sleep_end = %routine.sleep_end,
            "unusable sleep window, no free slots resolved"
        );
        return Vec::new();
    };

    let mut slots = Vec::new();

    for day in 0..horizon_days.max(0) {
        let date = (now + Duration::days(day)).date_naive();
        let mut day_start = at_time_on_date(date, wake_time, offset);
        let mut day_end = at_time_on_date(date, sleep_time, offset);

        if day_end < day_start {
            day_end += Duration::days(1);
        }

        if day == 0 && now > day_start {
            day_start = now + Duration::minutes(tuning.start_buffer_minutes);
        }

        if day_start > day_end {
            continue;
        }

        let weekday = date.weekday().num_days_from_sunday() as u8;
        let mut blocks: Vec<(DateTime<FixedOffset>, DateTime<FixedOffset>)> = routine
            .unavailable_blocks
            .iter()
            .filter(|block| block.day == weekday)
            .filter_map(|block| {
                match (
                    parse_time_of_day(&block.start),
                    parse_time_of_day(&block.end),
                ) {
                    (Some(start), Some(end)) => Some((
                        at_time_on_date(date, start, offset),
                        at_time_on_date(date, end, offset),
                    )),
                    _ => {
                        warn!(
                            target: "app::schedule",
                            day = block.day,
                            start = %block.start,
                            end = %block.end,
                            label = %block.label,
                            "dropping block with malformed times"
                        );
                        None
                    }
                }
            })
            .collect();
        blocks.sort_by_key(|(start, _)| *start);

        let mut pointer = day_start;
        for (block_start, block_end) in blocks {
            if pointer < block_start
                && minutes_between(pointer, block_start) >= tuning.min_slot_minutes
            {
                slots.push(FreeSlot {
                    start: pointer,
                    end: block_start,
                });
            }
            if block_end > pointer {
                pointer = block_end;
            }
        }

        if pointer < day_end && minutes_between(pointer, day_end) >= tuning.min_slot_minutes {
            slots.push(FreeSlot {
                start: pointer,
                end: day_end,
            });
        }
    }

    debug!(
        target: "app::schedule",
        horizon_days,
        slot_count = slots.len(),
        "free slots resolved"
    );
    slots
}

fn sleep_window(routine: &RoutineConfig) -> Option<(NaiveTime, NaiveTime)> {
    let wake = effective_time(&routine.sleep_end, DEFAULT_SLEEP_END)?;
    let sleep = effective_time(&routine.sleep_start, DEFAULT_SLEEP_START)?;
    Some((wake, sleep))
}

fn effective_time(raw: &str, fallback: &str) -> Option<NaiveTime> {
    if raw.trim().is_empty() {
        parse_time_of_day(fallback)
    } else {
        parse_time_of_day(raw)
    }
}
