use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoVerdictError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`photo-verdict config --set-api-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していない画像形式です: {0}")]
    UnsupportedImage(String),

    #[error("モデル呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("レコードストアに接続できません: {0}")]
    StoreUnavailable(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] photo_verdict_common::Error),
}

impl PhotoVerdictError {
    /// StrictJson形式のレスポンスが不正だったか
    pub fn is_malformed_model_output(&self) -> bool {
        matches!(
            self,
            PhotoVerdictError::Common(photo_verdict_common::Error::MalformedModelOutput(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, PhotoVerdictError>;
