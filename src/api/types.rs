//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::task::{SubjectEntry, Task};

/// Body of `POST /api/generate-tasks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTasksRequest {
    pub subject_entries: Vec<SubjectEntry>,
}

/// Task list, as returned by generation and listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

/// Query of `GET /api/tasks`. An absent or empty `subject` lists everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListQuery {
    #[serde(default)]
    pub subject: Option<String>,
}

/// Body of `PUT /api/tasks`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetTasksRequest {
    pub tasks: Vec<Task>,
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Whether a model API key is configured (otherwise template tasks only)
    pub ai_enabled: bool,
}

/// Login request.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    pub password: String,
}

/// Login response containing a JWT for API authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Expiration as unix seconds.
    pub exp: i64,
}
