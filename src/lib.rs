//! # Study Planner
//!
//! Turns subjects and exam scopes into study task lists.
//!
//! ## Task Flow
//! 1. Receive `{ subjectEntries }` via the API
//! 2. Ask the model for a JSON task list per subject, concurrently
//! 3. Fall back to template tasks for any subject whose reply is unusable
//! 4. Store the list for the session user and track completion
//!
//! ## Modules
//! - `task`: Task types, templates, generation pipeline and task store
//! - `llm`: Gemini client
//! - `api`: HTTP surface and session auth

pub mod api;
pub mod config;
pub mod llm;
pub mod task;

pub use config::Config;
