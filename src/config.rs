use crate::ai_provider::AiProvider;
use crate::error::{PhotoVerdictError, Result};
use photo_verdict_common::PromptVersion;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const API_KEY_ENV: &str = "PHOTO_VERDICT_API_KEY";

/// プロセス起動時に1回だけ作り、参照で渡す設定
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub provider: AiProvider,
    pub model: String,
    pub prompt_version: PromptVersion,
    /// ローカルのレコードストアのルート
    pub store_root: PathBuf,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: AiProvider::Claude,
            model: String::new(),
            prompt_version: PromptVersion::StrictJson,
            store_root: default_store_root(),
            timeout_seconds: 120,
        }
    }
}

fn default_store_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("photo-verdict")
        .join("store")
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PhotoVerdictError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("photo-verdict").join("config.json"))
    }

    /// 環境変数を優先してAPIキーを取得（起動時に呼ぶ。コア処理からは呼ばない）
    pub fn get_api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                return Ok(key);
            }
        }

        self.api_key.clone().ok_or(PhotoVerdictError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }
}
