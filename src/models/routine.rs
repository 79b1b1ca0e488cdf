use serde::{Deserialize, Serialize};

/// A recurring weekly commitment during which no study can be scheduled.
///
/// `day` uses 0=Sunday..6=Saturday. Blocks are not assumed sorted or
/// non-overlapping; the availability resolver sorts them per day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    pub day: u8,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub label: String,
}

/// Weekly availability template: sleep window plus recurring busy blocks.
///
/// The sleep window may wrap midnight (e.g. 23:00 -> 07:00); the waking
/// window is always the complement of the sleep window, never a numeric
/// comparison of the two times.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoutineConfig {
    pub sleep_start: String,
    pub sleep_end: String,
    #[serde(default)]
    pub unavailable_blocks: Vec<TimeBlock>,
    #[serde(default)]
    pub custom_tags: Vec<String>,
}
