//! 9問の真正性フレームワーク
//!
//! 3つのグループ × 3問。質問文はすべてのプロンプト版で同一。

use serde::{Deserialize, Serialize};

/// 質問グループ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionGroup {
    BornReal,
    LeftUntouched,
    SharedNaturally,
}

impl QuestionGroup {
    /// 固定の出力順
    pub const ALL: [QuestionGroup; 3] = [
        QuestionGroup::BornReal,
        QuestionGroup::LeftUntouched,
        QuestionGroup::SharedNaturally,
    ];

    /// JSONキー名
    pub fn key(&self) -> &'static str {
        match self {
            QuestionGroup::BornReal => "born_real",
            QuestionGroup::LeftUntouched => "left_untouched",
            QuestionGroup::SharedNaturally => "shared_naturally",
        }
    }

    /// タグ付きテキスト形式のグループ見出し（完全一致で判定される）
    pub fn header(&self) -> &'static str {
        match self {
            QuestionGroup::BornReal => "→ Born Real?",
            QuestionGroup::LeftUntouched => "→ Left Untouched?",
            QuestionGroup::SharedNaturally => "→ Shared Naturally?",
        }
    }

    /// 見出し行からグループを判定
    pub fn from_header(line: &str) -> Option<QuestionGroup> {
        Self::ALL.into_iter().find(|g| g.header() == line)
    }

    /// このグループの3問
    pub fn questions(&self) -> &'static [&'static str; 3] {
        match self {
            QuestionGroup::BornReal => &BORN_REAL_QUESTIONS,
            QuestionGroup::LeftUntouched => &LEFT_UNTOUCHED_QUESTIONS,
            QuestionGroup::SharedNaturally => &SHARED_NATURALLY_QUESTIONS,
        }
    }
}

impl std::fmt::Display for QuestionGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

const BORN_REAL_QUESTIONS: [&str; 3] = [
    "Was this photo taken with a real phone or camera?",
    "Does it still have the original date and time?",
    "Is the lighting and detail natural?",
];

const LEFT_UNTOUCHED_QUESTIONS: [&str; 3] = [
    "No filters or beauty tools added?",
    "No cropping or visual editing?",
    "Has it only been saved once — not re-exported?",
];

const SHARED_NATURALLY_QUESTIONS: [&str; 3] = [
    "Is the original filename still intact?",
    "Was it not reposted or downloaded from the internet?",
    "Was it shared directly (like via AirDrop or text)?",
];

/// 質問番号（1〜9）のキーキャップ絵文字
pub const QUESTION_NUMBERS: [&str; 9] = [
    "1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣",
];

/// 全9問を (グループ, 通し番号0始まり, 質問文) で列挙
pub fn numbered_questions() -> impl Iterator<Item = (QuestionGroup, usize, &'static str)> {
    QuestionGroup::ALL
        .into_iter()
        .enumerate()
        .flat_map(|(gi, group)| {
            group
                .questions()
                .iter()
                .enumerate()
                .map(move |(qi, q)| (group, gi * 3 + qi, *q))
        })
}
