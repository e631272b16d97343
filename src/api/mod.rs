//! HTTP API for the study planner.
//!
//! ## Endpoints
//!
//! - `GET /api/health` - Health check
//! - `POST /api/auth/login` - Exchange the shared password for a session token
//! - `POST /api/generate-tasks` - Generate tasks for a list of subject entries
//! - `GET /api/tasks` - Current task list
//! - `PUT /api/tasks` - Replace the task list
//! - `POST /api/tasks/{id}/toggle` - Flip a task's completion flag
//! - `GET /api/tasks/progress` - Overall and per-subject completion

mod auth;
mod error;
mod routes;
mod tasks;
pub mod types;

pub use auth::AuthUser;
pub use error::ApiError;
pub use routes::{router, serve, AppState};
pub use types::*;
