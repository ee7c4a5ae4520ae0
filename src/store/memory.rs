use super::{unavailable, ObjectStore};
use crate::error::Result;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// プロセス内のオブジェクトストア（--dry-run とテスト用）
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn len(&self) -> usize {
        self.objects
            .lock()
            .map(|o| o.len())
            .unwrap_or_else(|e| e.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectStore for MemoryObjectStore {
    fn put_object(&self, key: &str, body: &[u8], _content_type: &str) -> Result<()> {
        let mut objects = self.objects.lock().map_err(|e| unavailable("put", key, e))?;
        objects.insert(key.to_string(), body.to_vec());
        Ok(())
    }

    fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        let objects = self.objects.lock().map_err(|e| unavailable("get", key, e))?;
        objects
            .get(key)
            .cloned()
            .ok_or_else(|| unavailable("get", key, "キーが存在しません"))
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let objects = self.objects.lock().map_err(|e| unavailable("list", prefix, e))?;
        Ok(objects
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_len_survives_poisoned_lock() {
        let store = Arc::new(MemoryObjectStore::default());
        store.put_object("logs/a_1.json", b"{}", "application/json").unwrap();

        let poisoner = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.objects.lock().unwrap();
            panic!("ロック保持中にパニック");
        })
        .join();

        assert!(store.objects.is_poisoned());
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }
}
