//! Study task generation and tracking.
//!
//! - `catalog`, `keywords`, `mock`: template-based generation
//! - `prompt`, `processor`: model-backed generation with template fallback
//! - `batch`: one request's worth of subject entries
//! - `store`: a user's task list and completion figures

pub mod batch;
pub mod catalog;
pub mod keywords;
pub mod mock;
pub mod processor;
pub mod prompt;
pub mod store;
pub mod task;

pub use batch::{BatchError, TaskBatch};
pub use mock::MockTaskGenerator;
pub use processor::{ExtractError, TaskProcessor};
pub use store::{Progress, SubjectProgress, TaskStore};
pub use task::{Priority, SubjectEntry, Task, TaskId};
