//! Owned task list with completion tracking.
//!
//! Percentages are derived on every read, never cached.

use serde::{Deserialize, Serialize};

use super::task::{Task, TaskId};

/// `round(100 * completed / total)`, or 0 for an empty list.
pub fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

/// Completion figures for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectProgress {
    pub subject: String,
    pub percentage: u8,
    pub completed: usize,
    pub total: usize,
}

/// Completion figures for the whole list plus each subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub overall: u8,
    pub completed: usize,
    pub total: usize,
    pub subjects: Vec<SubjectProgress>,
}

/// A user's current study tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Replace the whole list.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Flip the task's completion flag. `None` if no task has this ID.
    pub fn toggle_task(&mut self, id: TaskId) -> Option<&Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.toggle();
        Some(&*task)
    }

    /// Tasks of `subject`, in list order.
    pub fn tasks_for_subject<'a>(
        &'a self,
        subject: &'a str,
    ) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.subject == subject)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn completion_percentage(&self) -> u8 {
        percentage(self.completed_count(), self.tasks.len())
    }

    /// Completion percentage over tasks of `subject` only.
    pub fn subject_completion_percentage(&self, subject: &str) -> u8 {
        let (completed, total) = self.subject_counts(subject);
        percentage(completed, total)
    }

    /// Distinct subjects, in first-seen order.
    pub fn subjects(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for task in &self.tasks {
            if !seen.contains(&task.subject.as_str()) {
                seen.push(&task.subject);
            }
        }
        seen
    }

    pub fn progress(&self) -> Progress {
        let subjects = self
            .subjects()
            .into_iter()
            .map(|subject| {
                let (completed, total) = self.subject_counts(subject);
                SubjectProgress {
                    subject: subject.to_string(),
                    percentage: self.subject_completion_percentage(subject),
                    completed,
                    total,
                }
            })
            .collect();

        Progress {
            overall: self.completion_percentage(),
            completed: self.completed_count(),
            total: self.tasks.len(),
            subjects,
        }
    }

    fn subject_counts(&self, subject: &str) -> (usize, usize) {
        self.tasks_for_subject(subject)
            .fold((0, 0), |(done, total), t| {
                (done + usize::from(t.completed), total + 1)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::task::Priority;

    fn store() -> TaskStore {
        let mut store = TaskStore::new();
        store.set_tasks(vec![
            Task::new("a", "a", Priority::High, "英語"),
            Task::new("b", "b", Priority::Low, "数学"),
            Task::new("c", "c", Priority::Medium, "英語"),
        ]);
        store
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn test_empty_store_is_zero_percent() {
        let store = TaskStore::new();
        assert_eq!(store.completion_percentage(), 0);
        assert_eq!(store.subject_completion_percentage("英語"), 0);
        assert!(store.subjects().is_empty());
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        let mut store = store();
        let id = store.tasks()[1].id;

        assert!(store.toggle_task(id).unwrap().completed);
        assert_eq!(store.completion_percentage(), 33);
        assert!(!store.toggle_task(id).unwrap().completed);
        assert_eq!(store.completion_percentage(), 0);
    }

    #[test]
    fn test_toggle_unknown_id() {
        let mut store = store();
        assert!(store.toggle_task(TaskId::new()).is_none());
        assert_eq!(store.completed_count(), 0);
    }

    #[test]
    fn test_subject_breakdown() {
        let mut store = store();
        let first = store.tasks()[0].id;
        store.toggle_task(first);

        assert_eq!(store.subjects(), vec!["英語", "数学"]);
        assert_eq!(store.subject_completion_percentage("英語"), 50);
        assert_eq!(store.subject_completion_percentage("数学"), 0);

        let progress = store.progress();
        assert_eq!(progress.overall, 33);
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.total, 3);
        assert_eq!(
            progress.subjects[0],
            SubjectProgress {
                subject: "英語".to_string(),
                percentage: 50,
                completed: 1,
                total: 2,
            }
        );
    }

    #[test]
    fn test_tasks_for_subject_keeps_order() {
        let store = store();
        let titles: Vec<_> = store
            .tasks_for_subject("英語")
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert_eq!(store.tasks_for_subject("理科").count(), 0);
    }

    #[test]
    fn test_set_tasks_replaces() {
        let mut store = store();
        store.set_tasks(vec![Task::new("x", "x", Priority::Low, "理科")]);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.subjects(), vec!["理科"]);
    }
}
