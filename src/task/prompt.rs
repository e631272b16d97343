//! Prompt sent to the model for one subject.

/// Upper bound on tasks across all subjects, stated to the model.
pub const MAX_TOTAL_TASKS: usize = 20;
/// Upper bound on tasks per subject, stated to the model.
pub const MAX_TASKS_PER_SUBJECT: usize = 7;

/// Build the study-coach prompt for one subject and exam scope.
///
/// The model is asked for a bare JSON array of `{title, description, priority}`.
pub fn build_prompt(subject: &str, exam_scope: &str) -> String {
    format!(
        r#"あなたは勉強をサポートするプロの学習コーチです。以下の学習内容範囲から、中高生が効果的に勉強できるようにタスクに分けてください。

科目: {subject}
試験範囲: {exam_scope}

以下の要件に従って、具体的な学習タスクを作成してください：

1. タスクの基本要件：
   - タスク合計が{total}未満
   - 1つの科目のタスクは{per_subject}以下
   - 参考書が記載されている場合は、その参考書の学習方法を参照

2. タスクの優先度設定：
   - high: 重要な暗記項目、基本的な理解が必要な項目、頻出問題
   - medium: 応用的な理解、演習問題、復習項目
   - low: 補足的な知識、発展的な学習項目

3. 学習タイプの考慮：
   - 暗記が必要な項目
   - 理解が必要な項目
   - 演習が必要な項目
   - これらのバランスを考慮してタスクを設定

4. 出力形式：
以下の形式のJSON配列のみを出力してください。説明文や追加のテキストは一切不要です：
[
  {{
    "title": "具体的なタスクのタイトル",
    "description": "具体的な学習手順や方法",
    "priority": "high"
  }}
]

注意：
- 余分な説明やテキストは一切不要です
- JSON配列のみを出力してください
- 各タスクは必ずtitle、description、priorityを含めてください
- priorityは必ず"high"、"medium"、"low"のいずれかにしてください"#,
        subject = subject,
        exam_scope = exam_scope,
        total = MAX_TOTAL_TASKS + 1,
        per_subject = MAX_TASKS_PER_SUBJECT,
    )
}
