//! モデル呼び出し（コアの外側）
//!
//! コアは (system, user) の指示文を渡し、返ってきたテキストを解釈するだけ。
//! タイムアウトやリトライはここで扱う。

mod cli_client;

pub use cli_client::CliModelClient;

use crate::error::Result;
use async_trait::async_trait;
use photo_verdict_common::PromptPair;

#[async_trait]
pub trait ModelClient: Send + Sync {
    /// 指示文を送り、モデルの生テキストを返す
    async fn complete(&self, prompt: &PromptPair) -> Result<String>;
}
