//! Core study task types.
//!
//! # Invariants
//! - `Task::subject` always equals the `SubjectEntry::subject` that produced it
//! - `Priority` has exactly three values; anything else is rejected at parse time

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task.
///
/// Serialized as a bare UUID string so the wire shape stays `{ "id": "..." }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Create a new unique task ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TaskId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Urgency tag on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// All priorities, in descending urgency.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Parse the exact lowercase wire value. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single study task.
///
/// Created by the generation pipeline (AI or template path). After creation the
/// only mutation is toggling `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    pub subject: String,
}

impl Task {
    /// Create an uncompleted task with a fresh ID.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: description.into(),
            priority,
            completed: false,
            subject: subject.into(),
        }
    }

    /// Flip the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// One subject plus its exam scope, as submitted by the user.
///
/// Read-only to the pipeline. `id` is request-scoped and opaque and may be
/// omitted; `subject` and `examScope` are both required, though either may be
/// an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectEntry {
    #[serde(default)]
    pub id: String,
    pub subject: String,
    pub exam_scope: String,
}

impl SubjectEntry {
    pub fn new(subject: impl Into<String>, exam_scope: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            subject: subject.into(),
            exam_scope: exam_scope.into(),
        }
    }
}
