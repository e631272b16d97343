//! Task generation and task-list endpoints.
//!
//! All handlers run behind [`super::auth::require_auth`] and operate on the
//! calling user's own [`TaskStore`].

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query, State,
    },
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use super::auth::AuthUser;
use super::error::{ApiError, MSG_GENERATION_FAILED, MSG_INVALID_ENTRIES};
use super::routes::AppState;
use super::types::{GenerateTasksRequest, SetTasksRequest, TaskListQuery, TasksResponse};
use crate::task::{BatchError, Progress, Task, TaskId};

/// Decode a generation body.
///
/// A body that is not JSON, or whose entries do not have the entry shape, is an
/// internal failure; a missing, non-array or empty `subjectEntries` is a bad request.
fn parse_generate_request(body: &[u8]) -> Result<GenerateTasksRequest, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::error!("Error generating tasks: unreadable body: {}", e);
        ApiError::Internal(MSG_GENERATION_FAILED.to_string())
    })?;

    let has_entries = value
        .get("subjectEntries")
        .and_then(Value::as_array)
        .map_or(false, |entries| !entries.is_empty());
    if !has_entries {
        return Err(ApiError::BadRequest(MSG_INVALID_ENTRIES.to_string()));
    }

    serde_json::from_value(value).map_err(|e| {
        tracing::error!("Error generating tasks: malformed entries: {}", e);
        ApiError::Internal(MSG_GENERATION_FAILED.to_string())
    })
}

/// `POST /api/generate-tasks`
///
/// Generates tasks for every subject entry and replaces the caller's task list.
pub async fn generate_tasks(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> Result<Json<TasksResponse>, ApiError> {
    let request = parse_generate_request(&body)?;

    let tasks = state
        .batch
        .run(&request.subject_entries)
        .await
        .map_err(|e| match e {
            BatchError::Empty => ApiError::BadRequest(MSG_INVALID_ENTRIES.to_string()),
        })?;

    state
        .stores
        .write()
        .await
        .entry(user.id)
        .or_default()
        .set_tasks(tasks.clone());

    Ok(Json(TasksResponse { tasks }))
}

/// `GET /api/tasks[?subject=...]`
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<TaskListQuery>, QueryRejection>,
) -> Result<Json<TasksResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let subject = query.subject.as_deref().filter(|s| !s.is_empty());

    let stores = state.stores.read().await;
    let tasks = match (stores.get(&user.id), subject) {
        (None, _) => Vec::new(),
        (Some(store), None) => store.tasks().to_vec(),
        (Some(store), Some(subject)) => store.tasks_for_subject(subject).cloned().collect(),
    };
    Ok(Json(TasksResponse { tasks }))
}

/// `PUT /api/tasks`
pub async fn set_tasks(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<SetTasksRequest>, JsonRejection>,
) -> Result<Json<TasksResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    state
        .stores
        .write()
        .await
        .entry(user.id)
        .or_default()
        .set_tasks(request.tasks.clone());

    Ok(Json(TasksResponse {
        tasks: request.tasks,
    }))
}

/// `POST /api/tasks/:id/toggle`
pub async fn toggle_task(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id: TaskId = Uuid::parse_str(&id)
        .map_err(|_| ApiError::BadRequest(format!("Invalid task id: {}", id)))?
        .into();

    let mut stores = state.stores.write().await;
    stores
        .get_mut(&user.id)
        .and_then(|store| store.toggle_task(id))
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Task not found: {}", id)))
}

/// `GET /api/tasks/progress`
pub async fn progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<Progress> {
    let stores = state.stores.read().await;
    let progress = stores
        .get(&user.id)
        .map(|store| store.progress())
        .unwrap_or_else(|| crate::task::TaskStore::new().progress());
    Json(progress)
}
