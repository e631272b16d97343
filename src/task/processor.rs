//! Model-backed task generation with template fallback.
//!
//! ```text
//!   SubjectEntry ──► prompt ──► TextGenerator ──► extract [...] ──► validate ──► Vec<Task>
//!                                    │                 │               │
//!                                    └──── any error ──┴───────────────┴──► MockTaskGenerator
//! ```
//!
//! `process` never fails: every error on the model path is logged and replaced
//! by template output for the same entry.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use super::mock::MockTaskGenerator;
use super::prompt::build_prompt;
use super::task::{Priority, SubjectEntry, Task};
use crate::llm::{GenerationOptions, TextGenerator};

/// Why a model reply was rejected.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON array found in model output")]
    NoJsonArray,

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid task structure: {0}")]
    InvalidStructure(String),
}

/// A validated model task, before it gets an ID and subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl DraftTask {
    fn into_task(self, subject: &str) -> Task {
        Task::new(self.title, self.description, self.priority, subject)
    }
}

/// Slice from the first `[` to the last `]`, inclusive.
///
/// Tolerates prose or code fences around the array.
pub fn extract_json_array(text: &str) -> Result<&str, ExtractError> {
    let start = text.find('[').ok_or(ExtractError::NoJsonArray)?;
    let end = text.rfind(']').ok_or(ExtractError::NoJsonArray)?;
    if end < start {
        return Err(ExtractError::NoJsonArray);
    }
    Ok(&text[start..=end])
}

fn non_empty_str<'a>(item: &'a Value, field: &str) -> Option<&'a str> {
    item.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Check that `value` is a non-empty array of well-formed tasks.
///
/// All-or-nothing: one bad element rejects the whole reply. Extra fields
/// (including any `subject`) are ignored.
pub fn validate_tasks(value: &Value) -> Result<Vec<DraftTask>, ExtractError> {
    let items = value
        .as_array()
        .ok_or_else(|| ExtractError::InvalidStructure("expected an array".to_string()))?;
    if items.is_empty() {
        return Err(ExtractError::InvalidStructure("empty array".to_string()));
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let title = non_empty_str(item, "title").ok_or_else(|| {
                ExtractError::InvalidStructure(format!("element {} has no title", i))
            })?;
            let description = non_empty_str(item, "description").ok_or_else(|| {
                ExtractError::InvalidStructure(format!("element {} has no description", i))
            })?;
            let priority = item
                .get("priority")
                .and_then(Value::as_str)
                .and_then(Priority::parse)
                .ok_or_else(|| {
                    ExtractError::InvalidStructure(format!("element {} has invalid priority", i))
                })?;
            Ok(DraftTask {
                title: title.to_string(),
                description: description.to_string(),
                priority,
            })
        })
        .collect()
}

/// Extract, parse and validate a raw model reply.
pub fn parse_model_output(text: &str) -> Result<Vec<DraftTask>, ExtractError> {
    let json = extract_json_array(text)?;
    tracing::debug!("Extracted JSON string: {}", json);
    let value: Value = serde_json::from_str(json)?;
    validate_tasks(&value)
}

/// Generates tasks for one subject entry, preferring the model.
pub struct TaskProcessor {
    generator: Arc<dyn TextGenerator>,
    fallback: Arc<MockTaskGenerator>,
    options: GenerationOptions,
}

impl TaskProcessor {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        fallback: Arc<MockTaskGenerator>,
        options: GenerationOptions,
    ) -> Self {
        Self {
            generator,
            fallback,
            options,
        }
    }

    /// Tasks for `entry`. Never fails; degrades to template output.
    pub async fn process(&self, entry: &SubjectEntry) -> Vec<Task> {
        let subject = entry.subject.as_str();
        let exam_scope = entry.exam_scope.as_str();
        tracing::debug!(subject, exam_scope, "Requesting tasks from model");

        let text = match self
            .generator
            .generate(&build_prompt(subject, exam_scope), &self.options)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(subject, "Generation call failed, using template tasks: {}", e);
                return self.fallback.generate(subject, exam_scope);
            }
        };
        tracing::debug!(subject, "Raw model text: {}", text);

        match parse_model_output(&text) {
            Ok(drafts) => {
                tracing::debug!(subject, count = drafts.len(), "Accepted model tasks");
                drafts.into_iter().map(|d| d.into_task(subject)).collect()
            }
            Err(e) => {
                tracing::warn!(subject, "Unusable model output, using template tasks: {}", e);
                self.fallback.generate(subject, exam_scope)
            }
        }
    }
}
