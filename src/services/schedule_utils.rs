use chrono::{offset::LocalResult, DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use serde_json::json;

use crate::error::{AppError, AppResult};

pub fn parse_datetime(value: &str) -> AppResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).map_err(|err| {
        AppError::validation_with_details(
            "invalid datetime format",
            json!({"value": value, "error": err.to_string()}),
        )
    })
}

pub fn format_datetime(dt: DateTime<FixedOffset>) -> String {
    dt.to_rfc3339()
}

/// Parse a `HH:MM` 24h time-of-day string. Missing colon, non-numeric parts
/// or out-of-range values yield `None`; callers drop the offending block or
/// day rather than failing the run.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let (hours, minutes) = value.split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

pub fn at_time_on_date(
    date: NaiveDate,
    time: NaiveTime,
    offset: FixedOffset,
) -> DateTime<FixedOffset> {
    let naive = date.and_time(time);
    match offset.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(first, _) => first,
        LocalResult::None => offset.from_utc_datetime(&naive),
    }
}

pub fn minutes_between(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> i64 {
    end.signed_duration_since(start).num_minutes()
}

pub fn add_minutes(dt: DateTime<FixedOffset>, minutes: i64) -> DateTime<FixedOffset> {
    dt + Duration::minutes(minutes)
}

/// 23:59:59 on the calendar date of `dt`, in the same offset.
pub fn end_of_day(dt: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    at_time_on_date(dt.date_naive(), last_second, *dt.offset())
}
