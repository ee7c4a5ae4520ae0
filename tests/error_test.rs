//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use photo_verdict::error::PhotoVerdictError;
use photo_verdict::metadata;
use std::path::Path;
use tempfile::tempdir;

/// 存在しない写真を読み込んだ場合
#[test]
fn test_read_nonexistent_photo() {
    let result = metadata::read_photo(Path::new("/nonexistent/path/12345.jpg"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, PhotoVerdictError::FileNotFound(_)));
}

/// フォルダを指定した場合
#[test]
fn test_read_photo_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = metadata::read_photo(dir.path());
    assert!(matches!(result, Err(PhotoVerdictError::FileNotFound(_))));
}

/// PhotoVerdictErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        PhotoVerdictError::Config("テスト設定エラー".to_string()),
        PhotoVerdictError::FileNotFound("test.jpg".to_string()),
        PhotoVerdictError::UnsupportedImage("notes.txt".to_string()),
        PhotoVerdictError::ApiCall("API呼び出し失敗".to_string()),
        PhotoVerdictError::StoreUnavailable("put logs/a.json: denied".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// MissingApiKeyエラーのメッセージ確認
#[test]
fn test_missing_api_key_message() {
    let err = PhotoVerdictError::MissingApiKey;
    let display = format!("{}", err);

    assert!(display.contains("APIキー"));
    assert!(display.contains("photo-verdict config"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: PhotoVerdictError = io_err.into();

    assert!(matches!(err, PhotoVerdictError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: PhotoVerdictError = json_err.into();

    assert!(matches!(err, PhotoVerdictError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = photo_verdict_common::Error::MalformedModelOutput("missing field".to_string());
    let err: PhotoVerdictError = common_err.into();

    assert!(matches!(err, PhotoVerdictError::Common(_)));
    assert!(err.is_malformed_model_output());
    assert_eq!(format!("{}", err), "Malformed model output: missing field");
}

/// 他のエラーは MalformedModelOutput ではない
#[test]
fn test_is_malformed_model_output_only_for_parse_errors() {
    assert!(!PhotoVerdictError::ApiCall("x".to_string()).is_malformed_model_output());
    let config_err: PhotoVerdictError = photo_verdict_common::Error::Config("x".to_string()).into();
    assert!(!config_err.is_malformed_model_output());
}
