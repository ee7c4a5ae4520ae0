//! AI CLI連携モジュール
//!
//! claude / codex / gemini のCLIをサブプロセスとして起動し、標準出力をレスポンスとする

use super::ModelClient;
use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::{PhotoVerdictError, Result};
use async_trait::async_trait;
use photo_verdict_common::PromptPair;
use std::time::Duration;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct CliModelClient {
    provider: AiProvider,
    model: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl CliModelClient {
    pub fn new(provider: AiProvider, timeout: Duration) -> Self {
        Self {
            provider,
            model: None,
            api_key: None,
            timeout,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// 設定から作る（APIキー未設定ならCLI側のログイン情報に任せる）
    pub fn from_config(config: &Config, provider: AiProvider) -> Self {
        let mut client = Self::new(provider, Duration::from_secs(config.timeout_seconds));
        if !config.model.is_empty() {
            client = client.with_model(config.model.clone());
        }
        if let Ok(key) = config.get_api_key() {
            client = client.with_api_key(key);
        }
        client
    }

    fn command(&self, prompt: &PromptPair) -> Command {
        let args = self
            .provider
            .build_args(&prompt.system, &prompt.user, self.model.as_deref());

        // Windowsではcmd /c経由
        #[cfg(windows)]
        let mut command = {
            let mut c = Command::new("cmd");
            c.arg("/c").arg(self.provider.command_name());
            c
        };
        #[cfg(not(windows))]
        let mut command = Command::new(self.provider.command_name());

        command.args(args).kill_on_drop(true);
        if let Some(key) = &self.api_key {
            command.env(self.provider.api_key_env(), key);
        }
        command
    }
}

#[async_trait]
impl ModelClient for CliModelClient {
    async fn complete(&self, prompt: &PromptPair) -> Result<String> {
        let name = self.provider.command_name();
        tracing::debug!(
            provider = name,
            prompt_chars = prompt.user.chars().count(),
            "モデル呼び出し開始"
        );

        let output = tokio::time::timeout(self.timeout, self.command(prompt).output())
            .await
            .map_err(|_| {
                PhotoVerdictError::ApiCall(format!(
                    "{} CLIが{}秒以内に応答しません",
                    name,
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| PhotoVerdictError::ApiCall(format!("{} CLI実行エラー: {}", name, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PhotoVerdictError::ApiCall(format!(
                "{} CLI failed (code {:?}): {}",
                name,
                output.status.code(),
                stderr
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).to_string();
        let preview: String = response.chars().take(500).collect();
        tracing::debug!(response_chars = response.chars().count(), %preview, "モデル応答");

        Ok(response)
    }
}
