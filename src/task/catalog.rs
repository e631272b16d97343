//! Static task templates keyed by subject.
//!
//! Each template is a list of `(title, description)` pairs, so titles and
//! descriptions cannot drift apart in length.

/// A subject's candidate task titles with their paired descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTemplate {
    entries: &'static [(&'static str, &'static str)],
}

impl TaskTemplate {
    /// Title at `index`, wrapping around the template length.
    pub fn title(&self, index: usize) -> &'static str {
        self.entries[index % self.entries.len()].0
    }

    /// Description at `index`, wrapping around the template length.
    pub fn description(&self, index: usize) -> &'static str {
        self.entries[index % self.entries.len()].1
    }
}

const ENGLISH: &[(&str, &str)] = &[
    ("単語の暗記", "試験範囲の単語を50個暗記する"),
    ("文法ルールの確認", "重要文法ポイントをノートにまとめ、例文を作る"),
    ("リーディング練習", "教科書の本文を音読し、内容理解を深める"),
    ("リスニング練習", "リスニング問題を繰り返し聞いて、聞き取れるようにする"),
    ("長文読解の演習", "長文読解問題を時間を測って解き、解答を確認する"),
    ("英作文の練習", "与えられたテーマについて英作文を書く練習をする"),
    ("熟語の暗記", "重要熟語30個を暗記し、例文を作る"),
    ("過去問演習", "過去の定期テスト問題を解いて傾向を把握する"),
    ("発音練習", "発音が難しい単語を繰り返し練習する"),
    ("模擬テスト実施", "時間を測って模擬テストを解き、本番に備える"),
];

const MATH: &[(&str, &str)] = &[
    ("基本公式の暗記", "教科書の重要公式をノートにまとめ、暗記する"),
    ("計算問題の練習", "問題集から基本的な計算問題を20問解く"),
    ("応用問題の解法理解", "応用問題の解法手順を理解し、類題を3問解く"),
    ("過去問演習", "過去3年分の定期テスト問題を解いて時間配分を確認する"),
    ("間違えた問題の復習", "間違えた問題を再度解き直し、解法を完全に理解する"),
    ("図形問題の解法確認", "図形の性質と定理を確認し、関連問題を解く"),
    ("関数グラフの描画練習", "関数のグラフを描く練習をし、特徴を理解する"),
    ("証明問題の解法確認", "証明問題の基本的なアプローチを学び、実践する"),
    ("用語の定義確認", "教科書の用語定義を確認し、自分の言葉で説明できるようにする"),
    ("模擬テスト実施", "時間を測って模擬テストを解き、本番に備える"),
];

const JAPANESE: &[(&str, &str)] = &[
    ("漢字の練習", "出題範囲の漢字を全て書けるように練習する"),
    ("古典単語の暗記", "古典で使われる重要単語を50語暗記する"),
    ("文学作品の読解", "文学作品の登場人物や背景を理解し、テーマを考察する"),
    ("要約の練習", "長文を読んで要点をまとめる練習をする"),
    ("文法の確認", "文法の基本ルールを確認し、例文を作る"),
    ("敬語の使い方の復習", "敬語の種類と使い方を復習し、例文を作る"),
    ("小論文の練習", "与えられたテーマについて小論文を書く練習をする"),
    ("作者と作品の確認", "試験範囲の作者と作品について年代順に整理する"),
    ("過去問演習", "過去の定期テスト問題を解いて傾向を把握する"),
    ("模擬テスト実施", "時間を測って模擬テストを解き、本番に備える"),
];

const SCIENCE: &[(&str, &str)] = &[
    ("重要用語の暗記", "試験範囲の重要用語を暗記カードにまとめる"),
    ("化学反応式の確認", "化学反応式のバランスを取る練習をする"),
    ("実験内容の復習", "実験の目的、方法、結果をノートにまとめる"),
    ("図解の作成", "複雑な概念を図解して理解を深める"),
    ("計算問題の練習", "物理・化学の計算問題を10問解く"),
    ("生物の分類整理", "生物の分類や特徴を表にまとめる"),
    ("物理法則の確認", "物理法則の公式と適用例を確認する"),
    ("過去問演習", "過去の定期テスト問題を解いて傾向を把握する"),
    ("図表の読み取り練習", "グラフや表から情報を読み取る練習をする"),
    ("模擬テスト実施", "時間を測って模擬テストを解き、本番に備える"),
];

const SOCIAL_STUDIES: &[(&str, &str)] = &[
    ("年表の作成", "重要な出来事を年表にまとめて時系列を理解する"),
    ("地理用語の暗記", "地理用語と定義を暗記カードにまとめる"),
    ("歴史的事件の整理", "歴史的事件の原因と結果をノートに整理する"),
    ("地図の確認", "地図上で重要な場所を確認し、特徴を理解する"),
    ("政治制度の理解", "政治制度の仕組みと役割を図解してまとめる"),
    ("経済の仕組みの整理", "経済の基本概念と仕組みを整理する"),
    ("重要人物の確認", "重要人物の業績と影響をまとめる"),
    ("国際関係の把握", "国際関係や国際機関の役割を整理する"),
    ("過去問演習", "過去の定期テスト問題を解いて傾向を把握する"),
    ("模擬テスト実施", "時間を測って模擬テストを解き、本番に備える"),
];

const GENERAL: &[(&str, &str)] = &[
    ("重要ポイントの整理", "試験範囲の重要ポイントをノートにまとめる"),
    ("用語の暗記", "重要用語とその定義を暗記カードにまとめる"),
    ("問題演習", "問題集から関連問題を20問解く"),
    ("過去問の解き直し", "過去の定期テスト問題を解き直し、解法を確認する"),
    ("ノートの見直し", "授業ノートを見直し、重要ポイントをマーカーでチェックする"),
    ("要約作成", "各単元の内容を自分の言葉で要約する"),
    ("図表の整理", "重要な図表を自分で描き直して理解を深める"),
    ("関連資料の調査", "教科書以外の関連資料を調べて知識を広げる"),
    ("友達との学習会", "友達と一緒に問題を解き、互いに教え合う"),
    ("模擬テスト実施", "時間を測って模擬テストを解き、本番に備える"),
];

/// Template used when the subject has no dedicated entry.
pub const DEFAULT_TEMPLATE: TaskTemplate = TaskTemplate { entries: GENERAL };

/// Look up the template for `subject`, falling back to [`DEFAULT_TEMPLATE`].
///
/// Matching is exact; unknown subjects are never an error.
pub fn template_for(subject: &str) -> TaskTemplate {
    let entries = match subject {
        "英語" => ENGLISH,
        "数学" => MATH,
        "国語" => JAPANESE,
        "理科" => SCIENCE,
        "社会" => SOCIAL_STUDIES,
        _ => return DEFAULT_TEMPLATE,
    };
    TaskTemplate { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_subject_has_a_template() {
        for subject in ["英語", "数学", "国語", "理科", "社会"] {
            let template = template_for(subject);
            assert_ne!(template, DEFAULT_TEMPLATE, "{}", subject);
            assert_eq!(template.title(10), template.title(0));
        }
    }

    #[test]
    fn test_unknown_subject_uses_default() {
        let template = template_for("美術");
        assert_eq!(template, DEFAULT_TEMPLATE);
        assert_eq!(template.title(0), "重要ポイントの整理");

        assert_eq!(template_for(""), DEFAULT_TEMPLATE);
        assert_eq!(template_for("english"), DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_index_wraps_around() {
        let template = template_for("数学");
        assert_eq!(template.title(10), template.title(0));
        assert_eq!(template.description(13), template.description(3));
    }

    #[test]
    fn test_titles_and_descriptions_pair_up() {
        let template = template_for("英語");
        assert_eq!(template.title(1), "文法ルールの確認");
        assert_eq!(
            template.description(1),
            "重要文法ポイントをノートにまとめ、例文を作る"
        );
    }
}
