use chrono::{DateTime, FixedOffset};
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::settings::PlannerSettings;
use crate::models::task::{TaskCreateInput, TaskRecord, TaskStatus, TaskUpdateInput};
use crate::services::duration_estimator::estimate_minutes;
use crate::services::schedule_utils::{format_datetime, parse_datetime};

const DEFAULT_SUBJECT: &str = "General";

const MIN_GRADE_IMPACT: f64 = 0.0;
const MAX_GRADE_IMPACT: f64 = 100.0;
const MIN_PERSONAL_IMPORTANCE: f64 = 1.0;
const MAX_PERSONAL_IMPORTANCE: f64 = 5.0;

/// Builds and updates task records for the surrounding application.
///
/// The effort estimate is derived once at creation and refreshed only when
/// a content field (type, amount, difficulty) changes.
#[derive(Debug, Clone)]
pub struct TaskService {
    settings: PlannerSettings,
}

impl TaskService {
    pub fn new(settings: PlannerSettings) -> Self {
        Self { settings }
    }

    pub fn create_task(
        &self,
        input: TaskCreateInput,
        now: DateTime<FixedOffset>,
    ) -> AppResult<TaskRecord> {
        let record = build_record_from_create(input, now, &self.settings)?;
        info!(
            target: "app::tasks",
            task_id = %record.id,
            estimated_minutes = record.estimated_minutes,
            "task created"
        );
        Ok(record)
    }

    pub fn apply_update(
        &self,
        existing: &TaskRecord,
        update: TaskUpdateInput,
        now: DateTime<FixedOffset>,
    ) -> AppResult<TaskRecord> {
        let mut record = existing.clone();
        let content_changed = apply_update_fields(&mut record, update)?;

        if content_changed {
            record.estimated_minutes = estimate_minutes(
                record.content_amount,
                record.content_type,
                record.difficulty,
                &self.settings.estimator,
            );
        }
        record.updated_at = format_datetime(now);

        info!(
            target: "app::tasks",
            task_id = %record.id,
            re_estimated = content_changed,
            "task updated"
        );
        Ok(record)
    }
}

fn build_record_from_create(
    mut input: TaskCreateInput,
    now: DateTime<FixedOffset>,
    settings: &PlannerSettings,
) -> AppResult<TaskRecord> {
    let title = normalize_title(&input.title)?;
    let subject = normalize_subject(input.subject.take());
    let status = input.status.unwrap_or(TaskStatus::Todo);
    let content_amount = normalize_amount(input.content_amount)?;
    let due_at = normalize_due_at(input.due_at.take())?;
    let grade_impact = clamp_finite(
        input.grade_impact.unwrap_or(MIN_GRADE_IMPACT),
        MIN_GRADE_IMPACT,
        MAX_GRADE_IMPACT,
        "gradeImpact",
    )?;
    let personal_importance = clamp_finite(
        input.personal_importance.unwrap_or(MIN_PERSONAL_IMPORTANCE),
        MIN_PERSONAL_IMPORTANCE,
        MAX_PERSONAL_IMPORTANCE,
        "personalImportance",
    )?;

    let estimated_minutes = estimate_minutes(
        content_amount,
        input.content_type,
        input.difficulty,
        &settings.estimator,
    );

    let timestamp = format_datetime(now);
    Ok(TaskRecord {
        id: Uuid::new_v4().to_string(),
        title,
        subject,
        status,
        content_type: input.content_type,
        content_amount,
        difficulty: input.difficulty,
        due_at,
        grade_impact,
        personal_importance,
        estimated_minutes,
        created_at: timestamp.clone(),
        updated_at: timestamp,
    })
}

/// Returns whether a content field changed, i.e. whether the estimate must
/// be recomputed.
fn apply_update_fields(record: &mut TaskRecord, update: TaskUpdateInput) -> AppResult<bool> {
    let mut content_changed = false;

    if let Some(title) = update.title {
        record.title = normalize_title(&title)?;
    }
    if let Some(subject) = update.subject {
        record.subject = normalize_subject(Some(subject));
    }
    if let Some(status) = update.status {
        record.status = status;
    }
    if let Some(content_type) = update.content_type {
        if content_type != record.content_type {
            content_changed = true;
        }
        record.content_type = content_type;
    }
    if let Some(content_amount) = update.content_amount {
        let content_amount = normalize_amount(content_amount)?;
        if (content_amount - record.content_amount).abs() > f64::EPSILON {
            content_changed = true;
        }
        record.content_amount = content_amount;
    }
    if let Some(difficulty) = update.difficulty {
        if difficulty != record.difficulty {
            content_changed = true;
        }
        record.difficulty = difficulty;
    }
    if let Some(due_at) = update.due_at {
        record.due_at = normalize_due_at(due_at)?;
    }
    if let Some(grade_impact) = update.grade_impact {
        record.grade_impact = clamp_finite(
            grade_impact,
            MIN_GRADE_IMPACT,
            MAX_GRADE_IMPACT,
            "gradeImpact",
        )?;
    }
    if let Some(personal_importance) = update.personal_importance {
        record.personal_importance = clamp_finite(
            personal_importance,
            MIN_PERSONAL_IMPORTANCE,
            MAX_PERSONAL_IMPORTANCE,
            "personalImportance",
        )?;
    }

    Ok(content_changed)
}

fn normalize_title(raw: &str) -> AppResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::validation("title must not be empty"));
    }
    Ok(title.to_string())
}

fn normalize_subject(raw: Option<String>) -> String {
    match raw {
        Some(subject) if !subject.trim().is_empty() => subject.trim().to_string(),
        _ => DEFAULT_SUBJECT.to_string(),
    }
}

fn normalize_amount(raw: f64) -> AppResult<f64> {
    if !raw.is_finite() {
        return Err(AppError::validation("contentAmount must be a finite number"));
    }
    Ok(raw.max(0.0))
}

fn normalize_due_at(raw: Option<String>) -> AppResult<Option<String>> {
    match raw {
        Some(value) if !value.trim().is_empty() => {
            let parsed = parse_datetime(value.trim())?;
            Ok(Some(format_datetime(parsed)))
        }
        _ => Ok(None),
    }
}

fn clamp_finite(value: f64, min: f64, max: f64, field: &str) -> AppResult<f64> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number"
        )));
    }
    Ok(value.clamp(min, max))
}
