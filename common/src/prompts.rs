//! プロンプト生成モジュール
//!
//! メタデータとプロンプト版から、モデルに渡す指示文を組み立てる:
//! - question_block: 9問を3グループに並べたブロック（全版で同一）
//! - build_prompt: (system, user) の指示文ペア

use crate::questions::{numbered_questions, QuestionGroup, QUESTION_NUMBERS};
use crate::types::{MetadataMap, PromptVersion};
use serde::{Deserialize, Serialize};

/// タグ付き形式の「Yes」マーカー
pub const YES_MARKER: &str = "✅ Yes";

/// タグ付き形式の「No」マーカー
pub const NO_MARKER: &str = "❌ No";

/// 質問と回答の区切り
pub const ANSWER_SEPARATOR: &str = "→";

const BASE_SYSTEM_INSTRUCTION: &str = "You are a metadata interpreter.";

/// モデルへの指示文ペア
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// 9問ブロック
///
/// グループ見出しのあとに番号付きで3問ずつ。どの版でもバイト単位で同一。
pub fn question_block() -> String {
    let mut lines = Vec::new();
    let mut current: Option<QuestionGroup> = None;

    for (group, index, question) in numbered_questions() {
        if current != Some(group) {
            if current.is_some() {
                lines.push(String::new());
            }
            lines.push(group.header().to_string());
            current = Some(group);
        }
        lines.push(format!("{} {}", QUESTION_NUMBERS[index], question));
    }

    lines.join("\n")
}

/// メタデータを整形済みJSONにする
fn metadata_block(metadata: &MetadataMap) -> String {
    // BTreeMap<String, String> のシリアライズは失敗しない
    serde_json::to_string_pretty(metadata).unwrap_or_else(|_| "{}".to_string())
}

/// 指示文ペアを生成
///
/// # Arguments
/// * `metadata` - 画像メタデータ（エラー記録でもそのまま埋め込む）
/// * `version` - プロンプト版
pub fn build_prompt(metadata: &MetadataMap, version: PromptVersion) -> PromptPair {
    let questions = question_block();
    let metadata = metadata_block(metadata);

    match version {
        PromptVersion::FreeTextNarrative => PromptPair {
            system: BASE_SYSTEM_INSTRUCTION.to_string(),
            user: format!(
                r#"You're part of a system that interprets image metadata using a fixed 9-question yes/no framework.
Use this structure:

{questions}

Respond YES or NO to each. Then summarize in 30 words or less — not a judgment — just describe the photo's clarity based on metadata alone.

Metadata:
{metadata}
"#
            ),
        },
        PromptVersion::StrictJson => PromptPair {
            system: format!(
                "{BASE_SYSTEM_INSTRUCTION} Respond with a single valid JSON object only. Do not add prose, markdown, or code fences."
            ),
            user: format!(
                r#"You're part of a system that interprets image metadata using a fixed 9-question yes/no framework.
Answer every question below with true (yes) or false (no):

{questions}

Output format (strictly this JSON object, questions copied verbatim without the number):
{{
  "born_real": [["question", true/false], ["question", true/false], ["question", true/false]],
  "left_untouched": [["question", true/false], ["question", true/false], ["question", true/false]],
  "shared_naturally": [["question", true/false], ["question", true/false], ["question", true/false]],
  "yes_count": number of true answers,
  "no_count": number of false answers,
  "response": "summary in 30 words or less — not a judgment — describe the photo's clarity based on metadata alone"
}}

Metadata:
{metadata}
"#
            ),
        },
        PromptVersion::FreeTextTagged => PromptPair {
            system: format!(
                "{BASE_SYSTEM_INSTRUCTION} Follow the requested line format exactly. Never put more than one {ANSWER_SEPARATOR} on an answer line."
            ),
            user: format!(
                r#"You're part of a system that interprets image metadata using a fixed 9-question yes/no framework.
Use this structure:

{questions}

Output format:
- Write each group header on its own line exactly as shown (for example "{header}").
- Under each header, write one line per question: the question text, then " {ANSWER_SEPARATOR} ", then "{YES_MARKER}" or "{NO_MARKER}".
- After the three groups, summarize in 30 words or less — not a judgment — just describe the photo's clarity based on metadata alone.

Metadata:
{metadata}
"#,
                header = QuestionGroup::BornReal.header(),
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSIONS: [PromptVersion; 3] = [
        PromptVersion::FreeTextNarrative,
        PromptVersion::StrictJson,
        PromptVersion::FreeTextTagged,
    ];

    fn sample_metadata() -> MetadataMap {
        let mut metadata = MetadataMap::new();
        metadata.insert("Make".to_string(), "Apple".to_string());
        metadata.insert("DateTimeOriginal".to_string(), "2024-05-01 10:11:12".to_string());
        metadata
    }

    #[test]
    fn test_question_block_layout() {
        let block = question_block();
        let lines: Vec<&str> = block.lines().collect();

        assert_eq!(lines[0], "→ Born Real?");
        assert_eq!(lines[1], "1️⃣ Was this photo taken with a real phone or camera?");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "→ Left Untouched?");
        assert_eq!(lines[10], "→ Shared Naturally?");
        assert_eq!(lines[13], "9️⃣ Was it shared directly (like via AirDrop or text)?");
        assert_eq!(lines.len(), 14);
    }

    #[test]
    fn test_questions_identical_across_versions() {
        let metadata = sample_metadata();
        let block = question_block();

        for version in VERSIONS {
            let prompt = build_prompt(&metadata, version);
            assert!(prompt.user.contains(&block), "{version} に質問ブロックがない");
            for group in QuestionGroup::ALL {
                for q in group.questions() {
                    assert_eq!(prompt.user.matches(q).count(), 1, "{version}: {q}");
                }
            }
        }
    }

    #[test]
    fn test_group_order_in_prompt() {
        let prompt = build_prompt(&MetadataMap::new(), PromptVersion::FreeTextNarrative);
        let born = prompt.user.find("→ Born Real?").unwrap();
        let untouched = prompt.user.find("→ Left Untouched?").unwrap();
        let shared = prompt.user.find("→ Shared Naturally?").unwrap();
        assert!(born < untouched && untouched < shared);
    }

    #[test]
    fn test_metadata_embedded_pretty() {
        let prompt = build_prompt(&sample_metadata(), PromptVersion::StrictJson);
        assert!(prompt.user.contains("Metadata:\n{\n  \"DateTimeOriginal\": \"2024-05-01 10:11:12\","));
        assert!(prompt.user.contains("\"Make\": \"Apple\""));
    }

    #[test]
    fn test_error_metadata_embedded() {
        let mut metadata = MetadataMap::new();
        metadata.insert("error".to_string(), "unknown image format".to_string());
        let prompt = build_prompt(&metadata, PromptVersion::FreeTextTagged);
        assert!(prompt.user.contains("\"error\": \"unknown image format\""));
    }

    #[test]
    fn test_system_instruction_strictness() {
        let metadata = MetadataMap::new();
        let narrative = build_prompt(&metadata, PromptVersion::FreeTextNarrative);
        let json = build_prompt(&metadata, PromptVersion::StrictJson);
        let tagged = build_prompt(&metadata, PromptVersion::FreeTextTagged);

        assert_eq!(narrative.system, "You are a metadata interpreter.");
        assert!(json.system.contains("JSON object only"));
        assert!(tagged.system.contains("line format exactly"));
    }

    #[test]
    fn test_output_format_by_version() {
        let metadata = MetadataMap::new();
        let json = build_prompt(&metadata, PromptVersion::StrictJson);
        assert!(json.user.contains("\"yes_count\""));
        assert!(json.user.contains("\"shared_naturally\""));

        let tagged = build_prompt(&metadata, PromptVersion::FreeTextTagged);
        assert!(tagged.user.contains(YES_MARKER));
        assert!(tagged.user.contains(NO_MARKER));
        assert!(!tagged.user.contains("\"yes_count\""));

        let narrative = build_prompt(&metadata, PromptVersion::FreeTextNarrative);
        assert!(narrative.user.contains("Respond YES or NO to each."));
    }

    #[test]
    fn test_build_prompt_deterministic() {
        let metadata = sample_metadata();
        for version in VERSIONS {
            assert_eq!(build_prompt(&metadata, version), build_prompt(&metadata, version));
        }
    }
}
