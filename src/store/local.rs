use super::{unavailable, ObjectStore};
use crate::error::Result;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const TEMP_SUFFIX: &str = ".partial";

/// ディレクトリをオブジェクトストアとして使う（キー = ルートからの相対パス）
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// キーをパスに変換（ルート外を指すキーは拒否）
    fn path_for(&self, key: &str) -> Option<PathBuf> {
        let relative = Path::new(key);
        let is_plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if key.is_empty() || !is_plain {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl ObjectStore for LocalObjectStore {
    fn put_object(&self, key: &str, body: &[u8], content_type: &str) -> Result<()> {
        let path = self
            .path_for(key)
            .ok_or_else(|| unavailable("put", key, "不正なキー"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| unavailable("put", key, e))?;
        }

        // 書き込み途中のファイルが読まれないよう一時ファイル経由でrenameする
        let mut temp = path.clone().into_os_string();
        temp.push(TEMP_SUFFIX);
        std::fs::write(&temp, body).map_err(|e| unavailable("put", key, e))?;
        std::fs::rename(&temp, &path).map_err(|e| unavailable("put", key, e))?;

        tracing::debug!(path = %path.display(), content_type, "オブジェクトを書き込み");
        Ok(())
    }

    fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        let path = self
            .path_for(key)
            .ok_or_else(|| unavailable("get", key, "不正なキー"))?;
        std::fs::read(&path).map_err(|e| unavailable("get", key, e))
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|e| unavailable("list", prefix, e))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if key.starts_with(prefix) && !key.ends_with(TEMP_SUFFIX) {
                keys.push(key);
            }
        }

        keys.sort();
        Ok(keys)
    }
}
