use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
    Extreme,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Pages,
    Exercises,
    Topics,
    ProjectHours,
}

/// A study task as supplied by the surrounding application.
///
/// `estimated_minutes` is derived at creation time from the content fields
/// and only recomputed when those fields change. Priority scores are
/// recomputed on every planning run and never stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub status: TaskStatus,
    pub content_type: ContentType,
    pub content_amount: f64,
    pub difficulty: DifficultyLevel,
    #[serde(default)]
    pub due_at: Option<String>,
    pub grade_impact: f64,
    pub personal_importance: f64,
    pub estimated_minutes: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateInput {
    pub title: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    pub content_type: ContentType,
    pub content_amount: f64,
    pub difficulty: DifficultyLevel,
    #[serde(default)]
    pub due_at: Option<String>,
    #[serde(default)]
    pub grade_impact: Option<f64>,
    #[serde(default)]
    pub personal_importance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub content_type: Option<ContentType>,
    #[serde(default)]
    pub content_amount: Option<f64>,
    #[serde(default)]
    pub difficulty: Option<DifficultyLevel>,
    #[serde(default)]
    pub due_at: Option<Option<String>>,
    #[serde(default)]
    pub grade_impact: Option<f64>,
    #[serde(default)]
    pub personal_importance: Option<f64>,
}
