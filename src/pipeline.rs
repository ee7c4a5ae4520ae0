//! 1回の送信処理
//!
//! メタデータ抽出 → プロンプト生成 → モデル呼び出し → パース → 組み立て → 保存

use crate::error::Result;
use crate::metadata;
use crate::model::ModelClient;
use crate::store::{filename_prefix, ObjectStore, RecordStore};
use crate::verdict::{self, PersistedRecord};
use photo_verdict_common::{build_prompt, parse_response, MetadataMap, PromptPair, PromptVersion};

/// 保存済みの送信結果
#[derive(Debug, Clone)]
pub struct Submission {
    pub key: String,
    pub record: PersistedRecord,
}

pub struct Pipeline<S> {
    version: PromptVersion,
    records: RecordStore<S>,
}

impl<S: ObjectStore> Pipeline<S> {
    pub fn new(version: PromptVersion, store: S) -> Self {
        Self {
            version,
            records: RecordStore::new(store),
        }
    }

    pub fn version(&self) -> PromptVersion {
        self.version
    }

    pub fn records(&self) -> &RecordStore<S> {
        &self.records
    }

    /// モデルを呼ばずにプロンプトだけ作る
    pub fn preview_prompt(&self, photo_bytes: &[u8]) -> (MetadataMap, PromptPair) {
        let metadata = metadata::extract(photo_bytes);
        let prompt = build_prompt(&metadata, self.version);
        (metadata, prompt)
    }

    /// 写真1枚を判定して保存
    ///
    /// パースエラー・保存エラーはそのまま返す（その場合は何も保存されない）
    pub async fn submit<M: ModelClient + ?Sized>(
        &self,
        photo_bytes: &[u8],
        filename: &str,
        source_url: Option<&str>,
        model: &M,
    ) -> Result<Submission> {
        let (metadata, prompt) = self.preview_prompt(photo_bytes);
        tracing::debug!(
            filename,
            version = %self.version,
            metadata_keys = metadata.len(),
            "プロンプト生成"
        );

        let raw = model.complete(&prompt).await?;
        let parsed = parse_response(&raw, self.version)?;

        let record = verdict::assemble(parsed, filename, source_url);
        let key = self.records.put(&record, filename_prefix(filename))?;

        Ok(Submission { key, record })
    }
}
