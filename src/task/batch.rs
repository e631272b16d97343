//! Runs the processor over every subject entry of a request.

use std::sync::Arc;

use futures::future::join_all;
use thiserror::Error;

use super::processor::TaskProcessor;
use super::task::{SubjectEntry, Task};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("no subject entries given")]
    Empty,
}

/// Fans a batch of subject entries out to the processor.
#[derive(Clone)]
pub struct TaskBatch {
    processor: Arc<TaskProcessor>,
}

impl TaskBatch {
    pub fn new(processor: Arc<TaskProcessor>) -> Self {
        Self { processor }
    }

    /// Generate tasks for all entries concurrently.
    ///
    /// Output is grouped by entry in input order, regardless of which call
    /// finishes first; within an entry, generation order is kept.
    pub async fn run(&self, entries: &[SubjectEntry]) -> Result<Vec<Task>, BatchError> {
        if entries.is_empty() {
            return Err(BatchError::Empty);
        }

        let per_entry = join_all(entries.iter().map(|entry| self.processor.process(entry))).await;
        let tasks: Vec<Task> = per_entry.into_iter().flatten().collect();

        tracing::info!(
            entries = entries.len(),
            tasks = tasks.len(),
            "Generated study tasks"
        );
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{GenerationOptions, LlmError, TextGenerator};
    use crate::task::mock::MockTaskGenerator;
    use crate::task::processor::tests::ScriptedGenerator;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn batch(generator: Arc<dyn TextGenerator>) -> TaskBatch {
        TaskBatch::new(Arc::new(TaskProcessor::new(
            generator,
            Arc::new(MockTaskGenerator::seeded(3)),
            GenerationOptions::default(),
        )))
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected_without_calls() {
        let generator = Arc::new(ScriptedGenerator::new());
        let result = batch(generator.clone()).run(&[]).await;

        assert_eq!(result, Err(BatchError::Empty));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concatenates_in_entry_order() {
        let generator = Arc::new(ScriptedGenerator::new().reply(
            "数学",
            r#"[{"title": "t", "description": "d", "priority": "medium"}]"#,
        ));
        let entries = vec![
            SubjectEntry::new("英語", "a b c d e f"),
            SubjectEntry::new("数学", "関数"),
            SubjectEntry::new("美術", ""),
        ];

        let tasks = batch(generator.clone()).run(&entries).await.unwrap();

        assert_eq!(generator.calls.load(Ordering::SeqCst), 3);
        assert_eq!(tasks.len(), 6 + 1 + 5);
        assert!(tasks[..6].iter().all(|t| t.subject == "英語"));
        assert_eq!(tasks[6].subject, "数学");
        assert_eq!(tasks[6].title, "t");
        assert!(tasks[7..].iter().all(|t| t.subject == "美術"));

        let ids: HashSet<_> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), tasks.len());
    }

    /// Earlier entries answer later, so completion order is reversed.
    struct SlowFirst;

    #[async_trait]
    impl TextGenerator for SlowFirst {
        async fn generate(
            &self,
            prompt: &str,
            _options: &GenerationOptions,
        ) -> Result<String, LlmError> {
            let delay = if prompt.contains("科目: 英語") { 50 } else { 0 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            let subject = if delay > 0 { "first" } else { "second" };
            Ok(format!(
                r#"[{{"title": "{}", "description": "d", "priority": "high"}}]"#,
                subject
            ))
        }
    }

    #[tokio::test]
    async fn test_order_independent_of_completion() {
        let entries = vec![SubjectEntry::new("英語", ""), SubjectEntry::new("数学", "")];

        let tasks = batch(Arc::new(SlowFirst)).run(&entries).await.unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "first");
        assert_eq!(tasks[0].subject, "英語");
        assert_eq!(tasks[1].title, "second");
        assert_eq!(tasks[1].subject, "数学");
    }
}
