//! 判定結果の組み立て
//!
//! パース結果にファイル名・URL・セッションID・タイムスタンプを付けて
//! 保存用レコードにする。失敗しない。

use chrono::{DateTime, Utc};
use photo_verdict_common::{ParsedResponse, Verdict};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// レコードのタイムスタンプ形式（UTC、秒精度）
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// 保存用レコード（書き込み後は変更しない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub filename: String,
    pub timestamp: String,
    pub session_id: Uuid,
    pub result: Verdict,
}

pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// 現在時刻と新しいセッションIDでレコードを作る
pub fn assemble(parsed: ParsedResponse, filename: &str, source_url: Option<&str>) -> PersistedRecord {
    assemble_at(parsed, filename, source_url, Utc::now(), Uuid::new_v4())
}

/// 時刻とセッションIDを指定してレコードを作る
pub fn assemble_at(
    parsed: ParsedResponse,
    filename: &str,
    source_url: Option<&str>,
    now: DateTime<Utc>,
    session_id: Uuid,
) -> PersistedRecord {
    let record = PersistedRecord {
        filename: filename.to_string(),
        timestamp: format_timestamp(now),
        session_id,
        result: Verdict::from_parsed(parsed, filename, source_url),
    };

    if record.result.yes_count != record.result.answered_yes()
        || record.result.no_count != record.result.answered_no()
    {
        tracing::debug!(
            yes_count = record.result.yes_count,
            no_count = record.result.no_count,
            answered_yes = record.result.answered_yes(),
            answered_no = record.result.answered_no(),
            "件数と構造化回答が一致しません"
        );
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use photo_verdict_common::{Answer, QuestionGroup};

    fn sample_parsed() -> ParsedResponse {
        let mut parsed = ParsedResponse {
            yes_count: 1,
            no_count: 0,
            summary: "ok".to_string(),
            ..Default::default()
        };
        parsed.answers.push(QuestionGroup::BornReal, Answer::new("q1", true));
        parsed
    }

    #[test]
    fn test_format_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(format_timestamp(now), "20240309T070501");
    }

    #[test]
    fn test_assemble_at() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let id = Uuid::nil();
        let record = assemble_at(sample_parsed(), "cat.jpg", Some("https://example.com/cat.jpg"), now, id);

        assert_eq!(record.filename, "cat.jpg");
        assert_eq!(record.timestamp, "20240309T070501");
        assert_eq!(record.session_id, id);
        assert_eq!(record.result.filename, "cat.jpg");
        assert_eq!(record.result.source_url.as_deref(), Some("https://example.com/cat.jpg"));
        assert_eq!(record.result.summary, "ok");
    }

    #[test]
    fn test_assemble_idempotent_except_ids() {
        let a = assemble(sample_parsed(), "dog.png", None);
        let b = assemble(sample_parsed(), "dog.png", None);

        assert_ne!(a.session_id, b.session_id);
        assert_eq!(a.filename, b.filename);
        assert_eq!(a.result, b.result);
        assert_eq!(a.session_id.get_version_num(), 4);
        assert_eq!(a.timestamp.len(), 15);
    }

    #[test]
    fn test_record_wire_shape() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let record = assemble_at(sample_parsed(), "a.jpg", None, now, Uuid::nil());
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["filename"], "a.jpg");
        assert_eq!(value["timestamp"], "20250102T030405");
        assert_eq!(value["session_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(value["result"]["answers"]["born_real"][0][0], "q1");
        assert_eq!(value["result"]["yes_count"], 1);
        assert_eq!(value["result"]["response"], "ok");
        assert!(value["result"]["url"].is_null());
    }
}
