//! Template-based task generation used when the model output is unusable.
//!
//! Output is deterministic except for priorities, which come from an
//! injectable random source so tests can seed it.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::catalog::template_for;
use super::keywords::extract_keywords;
use super::task::{Priority, Task};

/// Fewest tasks produced per subject.
pub const MIN_TASKS: usize = 5;
/// Most tasks produced per subject.
pub const MAX_TASKS: usize = 8;

/// Number of tasks to produce for a scope with `keyword_count` keywords.
pub fn task_count(keyword_count: usize) -> usize {
    keyword_count.clamp(MIN_TASKS, MAX_TASKS)
}

/// Description suffix pointing the task at one scope keyword.
pub fn keyword_annotation(keyword: &str) -> String {
    format!("（特に「{}」に焦点を当てる）", keyword)
}

/// Expand the subject's template into `task_count` tasks.
///
/// The i-th task takes the i-th template entry (wrapping) and, when the scope
/// has an i-th keyword, gets that keyword appended to its description.
pub fn generate_with_rng<R: Rng + ?Sized>(
    subject: &str,
    exam_scope: &str,
    rng: &mut R,
) -> Vec<Task> {
    let template = template_for(subject);
    let keywords = extract_keywords(exam_scope);
    let count = task_count(keywords.len());

    (0..count)
        .map(|i| {
            let mut description = template.description(i).to_string();
            if let Some(keyword) = keywords.get(i) {
                description.push_str(&keyword_annotation(keyword));
            }
            let priority = *Priority::ALL
                .choose(&mut *rng)
                .unwrap_or(&Priority::Medium);
            Task::new(template.title(i), description, priority, subject)
        })
        .collect()
}

/// Fallback task generator owning its random source.
///
/// Shared across concurrent requests, so the RNG sits behind a mutex. The lock
/// is held only for the synchronous expansion.
pub struct MockTaskGenerator<R = StdRng> {
    rng: Mutex<R>,
}

impl MockTaskGenerator<StdRng> {
    /// Generator seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Generator with a fixed seed, for reproducible priorities.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for MockTaskGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> MockTaskGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Generate tasks for one subject and exam scope.
    pub fn generate(&self, subject: &str, exam_scope: &str) -> Vec<Task> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        generate_with_rng(subject, exam_scope, &mut *rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::catalog::{template_for, DEFAULT_TEMPLATE};
    use std::collections::HashSet;

    #[test]
    fn test_task_count_is_clamped() {
        assert_eq!(task_count(0), 5);
        assert_eq!(task_count(3), 5);
        assert_eq!(task_count(5), 5);
        assert_eq!(task_count(7), 7);
        assert_eq!(task_count(8), 8);
        assert_eq!(task_count(30), 8);
    }

    #[test]
    fn test_empty_scope_yields_five_plain_tasks() {
        let generator = MockTaskGenerator::seeded(1);
        let tasks = generator.generate("英語", "");

        assert_eq!(tasks.len(), 5);
        let template = template_for("英語");
        for (i, task) in tasks.iter().enumerate() {
            assert_eq!(task.title, template.title(i));
            assert_eq!(task.description, template.description(i));
            assert!(!task.description.contains("に焦点を当てる"));
        }
    }

    #[test]
    fn test_keywords_annotate_leading_tasks() {
        let generator = MockTaskGenerator::seeded(2);
        let tasks = generator.generate("数学", "一次関数、二次関数");

        assert_eq!(tasks.len(), 5);
        assert_eq!(
            tasks[0].description,
            "教科書の重要公式をノートにまとめ、暗記する（特に「一次関数」に焦点を当てる）"
        );
        assert!(tasks[1].description.ends_with("（特に「二次関数」に焦点を当てる）"));
        assert!(!tasks[2].description.contains("焦点"));
    }

    #[test]
    fn test_many_keywords_cap_at_eight() {
        let generator = MockTaskGenerator::seeded(3);
        let scope = "a b c d e f g h i j k";
        let tasks = generator.generate("理科", scope);

        assert_eq!(tasks.len(), 8);
        assert!(tasks[7].description.contains("「h」"));
    }

    #[test]
    fn test_unknown_subject_uses_default_template() {
        let generator = MockTaskGenerator::seeded(4);
        let tasks = generator.generate("美術", "");

        let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        let expected: Vec<_> = (0..5).map(|i| DEFAULT_TEMPLATE.title(i)).collect();
        assert_eq!(titles, expected);
        assert!(tasks.iter().all(|t| t.subject == "美術"));
    }

    #[test]
    fn test_tasks_are_fresh_and_uncompleted() {
        let generator = MockTaskGenerator::seeded(5);
        let tasks = generator.generate("社会", "鎌倉 室町 江戸 明治 大正 昭和");

        assert_eq!(tasks.len(), 6);
        let ids: HashSet<_> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), tasks.len());
        assert!(tasks.iter().all(|t| !t.completed && t.subject == "社会"));
    }

    #[test]
    fn test_same_seed_same_priorities() {
        let a = MockTaskGenerator::seeded(42).generate("国語", "漢字 古文");
        let b = MockTaskGenerator::seeded(42).generate("国語", "漢字 古文");

        let pa: Vec<_> = a.iter().map(|t| t.priority).collect();
        let pb: Vec<_> = b.iter().map(|t| t.priority).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_all_priorities_eventually_appear() {
        let generator = MockTaskGenerator::seeded(7);
        let seen: HashSet<_> = (0..20)
            .flat_map(|_| generator.generate("英語", ""))
            .map(|t| t.priority)
            .collect();
        assert_eq!(seen.len(), 3);
    }
}
