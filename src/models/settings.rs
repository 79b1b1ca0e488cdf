use serde::{Deserialize, Serialize};

use crate::models::task::{ContentType, DifficultyLevel};

/// Product-tuning values for the scheduling engine.
///
/// The defaults reproduce the shipped behavior exactly; they are carried as
/// configuration so callers can adjust them without a code change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerSettings {
    pub estimator: EstimatorTuning,
    pub scoring: ScoringTuning,
    pub allocator: AllocatorTuning,
    pub horizon: HorizonTuning,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EstimatorTuning {
    pub pages_minutes_per_unit: f64,
    pub exercises_minutes_per_unit: f64,
    pub topics_minutes_per_unit: f64,
    pub project_hour_minutes_per_unit: f64,
    pub easy_multiplier: f64,
    pub medium_multiplier: f64,
    pub hard_multiplier: f64,
    pub extreme_multiplier: f64,
    /// Fixed multiplier covering review and overhead time.
    pub review_buffer_factor: f64,
}

impl Default for EstimatorTuning {
    fn default() -> Self {
        Self {
            pages_minutes_per_unit: 6.0,
            exercises_minutes_per_unit: 15.0,
            topics_minutes_per_unit: 45.0,
            project_hour_minutes_per_unit: 60.0,
            easy_multiplier: 0.8,
            medium_multiplier: 1.0,
            hard_multiplier: 1.5,
            extreme_multiplier: 2.5,
            review_buffer_factor: 1.1,
        }
    }
}

impl EstimatorTuning {
    pub fn base_minutes(&self, content_type: ContentType) -> f64 {
        match content_type {
            ContentType::Pages => self.pages_minutes_per_unit,
            ContentType::Exercises => self.exercises_minutes_per_unit,
            ContentType::Topics => self.topics_minutes_per_unit,
            ContentType::ProjectHours => self.project_hour_minutes_per_unit,
        }
    }

    pub fn difficulty_multiplier(&self, difficulty: DifficultyLevel) -> f64 {
        match difficulty {
            DifficultyLevel::Easy => self.easy_multiplier,
            DifficultyLevel::Medium => self.medium_multiplier,
            DifficultyLevel::Hard => self.hard_multiplier,
            DifficultyLevel::Extreme => self.extreme_multiplier,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringTuning {
    pub urgency_base: f64,
    pub urgency_exponent: f64,
    /// Floor on the days-until-due divisor; keeps due-now and overdue tasks
    /// at a very large but finite urgency.
    pub min_days_until_due: f64,
    pub grade_impact_weight: f64,
    pub personal_importance_weight: f64,
    pub easy_points: f64,
    pub medium_points: f64,
    pub hard_points: f64,
    pub extreme_points: f64,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            urgency_base: 100.0,
            urgency_exponent: 1.2,
            min_days_until_due: 0.1,
            grade_impact_weight: 2.0,
            personal_importance_weight: 10.0,
            easy_points: 0.0,
            medium_points: 10.0,
            hard_points: 30.0,
            extreme_points: 50.0,
        }
    }
}

impl ScoringTuning {
    pub fn difficulty_points(&self, difficulty: DifficultyLevel) -> f64 {
        match difficulty {
            DifficultyLevel::Easy => self.easy_points,
            DifficultyLevel::Medium => self.medium_points,
            DifficultyLevel::Hard => self.hard_points,
            DifficultyLevel::Extreme => self.extreme_points,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AllocatorTuning {
    /// Minimum length of a free interval worth keeping as a slot.
    pub min_slot_minutes: i64,
    /// Minimum remaining slot capacity required to start an allocation.
    pub min_allocation_minutes: i64,
    /// Pause consumed between two tasks inside the same slot.
    pub context_switch_minutes: i64,
    /// Gap left between "now" and the first slot of the current day.
    pub start_buffer_minutes: i64,
    /// Scheduling is allowed until end of day this many days past the due
    /// date. Zero reproduces the strict no-slack deadline.
    pub deadline_slack_days: i64,
}

impl Default for AllocatorTuning {
    fn default() -> Self {
        Self {
            min_slot_minutes: 30,
            min_allocation_minutes: 20,
            context_switch_minutes: 5,
            start_buffer_minutes: 15,
            deadline_slack_days: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct HorizonTuning {
    /// Days added past the latest due date.
    pub padding_days: i64,
    /// The horizon always covers at least this many days ahead.
    pub baseline_days: i64,
    pub max_days: i64,
    pub min_days: i64,
}

impl Default for HorizonTuning {
    fn default() -> Self {
        Self {
            padding_days: 5,
            baseline_days: 7,
            max_days: 90,
            min_days: 1,
        }
    }
}
