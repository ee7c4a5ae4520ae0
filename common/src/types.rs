//! 判定結果の型定義
//!
//! - MetadataMap: 画像メタデータ（タグ名 → 文字列値）
//! - PromptVersion: プロンプト版（= レスポンス形式）
//! - ParsedResponse: パーサーの出力
//! - Verdict: 正規化済みの判定結果

use crate::error::Error;
use crate::questions::QuestionGroup;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 画像メタデータ
///
/// キー順を固定してプロンプトを決定的にするため BTreeMap を使う。
/// 読み取り失敗時は `{"error": "<message>"}` の1キーのみ。
pub type MetadataMap = BTreeMap<String, String>;

/// 読み取り失敗時のキー
pub const METADATA_ERROR_KEY: &str = "error";

/// プロンプト版（デプロイ単位で固定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptVersion {
    /// 自由記述のみ（最初期版）
    FreeTextNarrative,
    /// 厳密なJSON
    #[default]
    StrictJson,
    /// 絵文字タグ付きの行形式
    FreeTextTagged,
}

impl PromptVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptVersion::FreeTextNarrative => "free_text_narrative",
            PromptVersion::StrictJson => "strict_json",
            PromptVersion::FreeTextTagged => "free_text_tagged",
        }
    }
}

impl std::str::FromStr for PromptVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "narrative" | "free_text_narrative" => Ok(PromptVersion::FreeTextNarrative),
            "json" | "strict_json" => Ok(PromptVersion::StrictJson),
            "tagged" | "free_text_tagged" => Ok(PromptVersion::FreeTextTagged),
            _ => Err(Error::Config(format!(
                "Unknown prompt version: {}. Use narrative, json, or tagged",
                s
            ))),
        }
    }
}

impl std::fmt::Display for PromptVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1問の回答。JSONでは `[question, is_yes]` の配列になる
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer(pub String, pub bool);

impl Answer {
    pub fn new(question: impl Into<String>, is_yes: bool) -> Self {
        Self(question.into(), is_yes)
    }

    pub fn question(&self) -> &str {
        &self.0
    }

    pub fn is_yes(&self) -> bool {
        self.1
    }
}

/// グループごとの回答（モデル出力にあった分だけ。補完はしない）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers {
    pub born_real: Vec<Answer>,
    pub left_untouched: Vec<Answer>,
    pub shared_naturally: Vec<Answer>,
}

impl Answers {
    pub fn get(&self, group: QuestionGroup) -> &[Answer] {
        match group {
            QuestionGroup::BornReal => &self.born_real,
            QuestionGroup::LeftUntouched => &self.left_untouched,
            QuestionGroup::SharedNaturally => &self.shared_naturally,
        }
    }

    pub fn get_mut(&mut self, group: QuestionGroup) -> &mut Vec<Answer> {
        match group {
            QuestionGroup::BornReal => &mut self.born_real,
            QuestionGroup::LeftUntouched => &mut self.left_untouched,
            QuestionGroup::SharedNaturally => &mut self.shared_naturally,
        }
    }

    pub fn push(&mut self, group: QuestionGroup, answer: Answer) {
        self.get_mut(group).push(answer);
    }

    /// 全グループがちょうど3件ずつあるか
    pub fn is_complete(&self) -> bool {
        QuestionGroup::ALL.iter().all(|g| self.get(*g).len() == 3)
    }

    pub fn is_empty(&self) -> bool {
        QuestionGroup::ALL.iter().all(|g| self.get(*g).is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionGroup, &Answer)> {
        QuestionGroup::ALL
            .into_iter()
            .flat_map(move |g| self.get(g).iter().map(move |a| (g, a)))
    }

    /// 構造化された回答のYes件数
    pub fn yes_total(&self) -> u32 {
        self.iter().filter(|(_, a)| a.is_yes()).count() as u32
    }

    /// 構造化された回答のNo件数
    pub fn no_total(&self) -> u32 {
        self.iter().filter(|(_, a)| !a.is_yes()).count() as u32
    }
}

/// パーサーの出力（ファイル名などの付帯情報はまだない）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResponse {
    pub answers: Answers,
    pub yes_count: u32,
    pub no_count: u32,
    #[serde(rename = "response")]
    pub summary: String,
}

/// 正規化済みの判定結果
///
/// `yes_count + no_count` は9とは限らない（自由記述形式は部分文字列で数えるため）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub answers: Answers,
    pub yes_count: u32,
    pub no_count: u32,
    #[serde(rename = "response")]
    pub summary: String,
    pub filename: String,
    /// オブジェクトストアにアップロードされていない場合は null
    #[serde(rename = "url")]
    pub source_url: Option<String>,
}

impl Verdict {
    pub fn from_parsed(parsed: ParsedResponse, filename: &str, source_url: Option<&str>) -> Self {
        Self {
            answers: parsed.answers,
            yes_count: parsed.yes_count,
            no_count: parsed.no_count,
            summary: parsed.summary,
            filename: filename.to_string(),
            source_url: source_url.map(str::to_string),
        }
    }

    /// 構造化回答から数えたYes件数（yes_count と一致するとは限らない）
    pub fn answered_yes(&self) -> u32 {
        self.answers.yes_total()
    }

    /// 構造化回答から数えたNo件数
    pub fn answered_no(&self) -> u32 {
        self.answers.no_total()
    }
}
