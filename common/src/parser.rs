//! モデルレスポンスパーサー
//!
//! プロンプト版ごとに1つの実装を持つ:
//! - StrictJsonParser: JSONオブジェクト。不正なら必ずエラー（テキスト解析にフォールバックしない）
//! - TaggedTextParser: 見出し + `質問 → ✅ Yes` 行。不正な行は無視する
//! - NarrativeParser: 自由記述。回答グループは空、件数のみ

use crate::error::{Error, Result};
use crate::prompts::{ANSWER_SEPARATOR, NO_MARKER, YES_MARKER};
use crate::questions::QuestionGroup;
use crate::types::{Answer, Answers, ParsedResponse, PromptVersion};
use serde::Deserialize;

/// レスポンス形式ごとのパーサー
pub trait ResponseParser {
    fn parse(&self, raw: &str) -> Result<ParsedResponse>;
}

/// プロンプト版に対応するパーサーを取得
pub fn parser_for(version: PromptVersion) -> &'static dyn ResponseParser {
    match version {
        PromptVersion::StrictJson => &StrictJsonParser,
        PromptVersion::FreeTextTagged => &TaggedTextParser,
        PromptVersion::FreeTextNarrative => &NarrativeParser,
    }
}

/// レスポンスをパース
///
/// # Arguments
/// * `raw` - モデルが返したテキスト
/// * `version` - プロンプト生成に使った版
///
/// # Returns
/// * `Ok(ParsedResponse)` - 自由記述形式は常に成功
/// * `Err(Error::MalformedModelOutput)` - StrictJson形式で不正な場合のみ
pub fn parse_response(raw: &str, version: PromptVersion) -> Result<ParsedResponse> {
    parser_for(version).parse(raw)
}

/// マーカー文字列の出現回数（レスポンス全体が対象）
fn count_markers(raw: &str) -> (u32, u32) {
    (
        raw.matches(YES_MARKER).count() as u32,
        raw.matches(NO_MARKER).count() as u32,
    )
}

// =============================================
// StrictJson
// =============================================

/// StrictJson形式のパーサー
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictJsonParser;

/// 件数の上限（質問数）
const MAX_COUNT: u32 = 9;

#[derive(Deserialize)]
struct StrictJsonBody {
    born_real: Vec<Answer>,
    left_untouched: Vec<Answer>,
    shared_naturally: Vec<Answer>,
    yes_count: u32,
    no_count: u32,
    response: String,
}

/// ```json ... ``` で全体が囲まれている場合のみ中身を取り出す
fn strip_json_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if let Some(inner) = trimmed
        .strip_prefix("```json")
        .and_then(|rest| rest.strip_suffix("```"))
    {
        return inner.trim();
    }
    trimmed
}

impl ResponseParser for StrictJsonParser {
    fn parse(&self, raw: &str) -> Result<ParsedResponse> {
        let body: StrictJsonBody = serde_json::from_str(strip_json_fence(raw))
            .map_err(|e| Error::MalformedModelOutput(format!("StrictJson パースエラー: {}", e)))?;

        let answers = Answers {
            born_real: body.born_real,
            left_untouched: body.left_untouched,
            shared_naturally: body.shared_naturally,
        };

        for group in QuestionGroup::ALL {
            let len = answers.get(group).len();
            if len != 3 {
                return Err(Error::MalformedModelOutput(format!(
                    "{} は3件必要ですが{}件でした",
                    group, len
                )));
            }
        }

        for (name, count) in [("yes_count", body.yes_count), ("no_count", body.no_count)] {
            if count > MAX_COUNT {
                return Err(Error::MalformedModelOutput(format!(
                    "{} は0〜{}の範囲ですが{}でした",
                    name, MAX_COUNT, count
                )));
            }
        }

        Ok(ParsedResponse {
            answers,
            yes_count: body.yes_count,
            no_count: body.no_count,
            summary: body.response,
        })
    }
}

// =============================================
// FreeTextTagged
// =============================================

/// 行スキャン中の現在グループ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupState {
    #[default]
    NoGroup,
    InBornReal,
    InLeftUntouched,
    InSharedNaturally,
}

/// 1行を処理した結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Header(QuestionGroup),
    Answer(QuestionGroup, Answer),
    Ignored,
}

impl GroupState {
    pub fn group(&self) -> Option<QuestionGroup> {
        match self {
            GroupState::NoGroup => None,
            GroupState::InBornReal => Some(QuestionGroup::BornReal),
            GroupState::InLeftUntouched => Some(QuestionGroup::LeftUntouched),
            GroupState::InSharedNaturally => Some(QuestionGroup::SharedNaturally),
        }
    }

    fn entering(group: QuestionGroup) -> Self {
        match group {
            QuestionGroup::BornReal => GroupState::InBornReal,
            QuestionGroup::LeftUntouched => GroupState::InLeftUntouched,
            QuestionGroup::SharedNaturally => GroupState::InSharedNaturally,
        }
    }

    /// 状態遷移: 見出しならグループ切替、グループ内の回答行なら回答、それ以外は無視
    pub fn step(self, line: &str) -> (GroupState, LineEvent) {
        let line = line.trim();

        if let Some(group) = QuestionGroup::from_header(line) {
            return (Self::entering(group), LineEvent::Header(group));
        }

        let Some(group) = self.group() else {
            return (self, LineEvent::Ignored);
        };

        match split_answer_line(line) {
            Some(answer) => (self, LineEvent::Answer(group, answer)),
            None => (self, LineEvent::Ignored),
        }
    }
}

/// `質問 → ✅ Yes` を分割。区切りがちょうど1つでない行は None
fn split_answer_line(line: &str) -> Option<Answer> {
    let mut parts = line.split(ANSWER_SEPARATOR);
    let question = parts.next()?.trim();
    let verdict = parts.next()?;
    if parts.next().is_some() || question.is_empty() {
        return None;
    }
    Some(Answer::new(question, verdict.contains(YES_MARKER)))
}

/// FreeTextTagged形式のパーサー
#[derive(Debug, Clone, Copy, Default)]
pub struct TaggedTextParser;

impl TaggedTextParser {
    /// 行スキャンのみ（件数は含まない）
    pub fn scan_answers(raw: &str) -> Answers {
        let mut answers = Answers::default();
        let mut state = GroupState::NoGroup;

        for line in raw.lines() {
            let (next, event) = state.step(line);
            if let LineEvent::Answer(group, answer) = event {
                answers.push(group, answer);
            }
            state = next;
        }

        answers
    }
}

impl ResponseParser for TaggedTextParser {
    fn parse(&self, raw: &str) -> Result<ParsedResponse> {
        let answers = Self::scan_answers(raw);
        // 件数は行解析とは独立にレスポンス全体から数える
        let (yes_count, no_count) = count_markers(raw);

        Ok(ParsedResponse {
            answers,
            yes_count,
            no_count,
            summary: raw.trim().to_string(),
        })
    }
}

// =============================================
// FreeTextNarrative
// =============================================

/// FreeTextNarrative形式のパーサー（最初期版）
#[derive(Debug, Clone, Copy, Default)]
pub struct NarrativeParser;

impl ResponseParser for NarrativeParser {
    fn parse(&self, raw: &str) -> Result<ParsedResponse> {
        let (yes_count, no_count) = count_markers(raw);

        Ok(ParsedResponse {
            answers: Answers::default(),
            yes_count,
            no_count,
            summary: raw.trim().to_string(),
        })
    }
}
