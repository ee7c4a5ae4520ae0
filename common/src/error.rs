//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// StrictJson形式のレスポンスが不正（フォールバックはしない）
    #[error("Malformed model output: {0}")]
    MalformedModelOutput(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
