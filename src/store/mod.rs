//! レコードストアアダプタ
//!
//! キー `logs/<ファイル名から拡張子を除いたもの>_<タイムスタンプ>.json` に
//! レコードを書き込む。同じキーは後勝ちで上書き。

mod local;
mod memory;

pub use local::LocalObjectStore;
pub use memory::MemoryObjectStore;

use crate::error::{PhotoVerdictError, Result};
use crate::verdict::PersistedRecord;

/// レコードの名前空間
pub const LOGS_PREFIX: &str = "logs/";

const RECORD_SUFFIX: &str = ".json";
const CONTENT_TYPE_JSON: &str = "application/json";

/// ストアクライアント（put / get / list のみ）
pub trait ObjectStore {
    fn put_object(&self, key: &str, body: &[u8], content_type: &str) -> Result<()>;
    fn get_object(&self, key: &str) -> Result<Vec<u8>>;
    fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;
}

impl<S: ObjectStore + ?Sized> ObjectStore for &S {
    fn put_object(&self, key: &str, body: &[u8], content_type: &str) -> Result<()> {
        (**self).put_object(key, body, content_type)
    }

    fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        (**self).get_object(key)
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        (**self).list_keys(prefix)
    }
}

/// 拡張子を除いたファイル名（最後の `.` 以降のみ除く）
pub fn filename_prefix(filename: &str) -> &str {
    filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(filename)
}

/// 保存キー
pub fn record_key(key_prefix: &str, timestamp: &str) -> String {
    format!("{}{}_{}{}", LOGS_PREFIX, key_prefix, timestamp, RECORD_SUFFIX)
}

/// 判定レコードの保存先
pub struct RecordStore<S> {
    store: S,
}

impl<S: ObjectStore> RecordStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// レコードを書き込み、使ったキーを返す
    pub fn put(&self, record: &PersistedRecord, key_prefix: &str) -> Result<String> {
        let key = record_key(key_prefix, &record.timestamp);
        let body = serde_json::to_vec(record)?;

        self.store.put_object(&key, &body, CONTENT_TYPE_JSON)?;
        tracing::info!(key = %key, bytes = body.len(), "レコードを保存");
        Ok(key)
    }

    /// 保存済みのバイト列をそのまま返す
    pub fn get(&self, key: &str) -> Result<Vec<u8>> {
        self.store.get_object(key)
    }

    /// 保存済みレコードを読み込む
    pub fn load(&self, key: &str) -> Result<PersistedRecord> {
        let body = self.get(key)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// prefix 配下の `.json` キーの数
    pub fn count_by_prefix(&self, prefix: &str) -> Result<usize> {
        let keys = self.store.list_keys(prefix)?;
        Ok(keys.iter().filter(|k| k.ends_with(RECORD_SUFFIX)).count())
    }
}

/// 下位のエラーをストア接続エラーにまとめる
pub(crate) fn unavailable(action: &str, key: &str, e: impl std::fmt::Display) -> PhotoVerdictError {
    PhotoVerdictError::StoreUnavailable(format!("{} {}: {}", action, key, e))
}
