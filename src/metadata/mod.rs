//! 画像メタデータ抽出
//!
//! 読み取りに失敗しても呼び出し側にエラーは返さず、
//! `{"error": "<message>"}` の1キーのマップに変換する。

mod exif;

pub use self::exif::tag_name;

use crate::error::{PhotoVerdictError, Result};
use photo_verdict_common::{MetadataMap, METADATA_ERROR_KEY};
use std::path::Path;

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "tif", "tiff", "heic", "heif", "webp",
];

/// 1回の送信で扱う写真
#[derive(Debug, Clone)]
pub struct Photo {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// 画像バイト列からメタデータを抽出（失敗時はエラー記録）
pub fn extract(bytes: &[u8]) -> MetadataMap {
    match self::exif::read_exif(bytes) {
        Ok(metadata) => {
            tracing::debug!(tags = metadata.len(), "EXIF読み取り完了");
            metadata
        }
        Err(e) => {
            tracing::warn!(error = %e, "EXIFを読み取れません");
            error_metadata(&e.to_string())
        }
    }
}

/// エラー記録のメタデータ
pub fn error_metadata(message: &str) -> MetadataMap {
    let mut metadata = MetadataMap::new();
    metadata.insert(METADATA_ERROR_KEY.to_string(), message.to_string());
    metadata
}

/// エラー記録かどうか
pub fn is_error_metadata(metadata: &MetadataMap) -> bool {
    metadata.len() == 1 && metadata.contains_key(METADATA_ERROR_KEY)
}

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

/// ファイルから写真を読み込む
pub fn read_photo(path: &Path) -> Result<Photo> {
    if !path.is_file() {
        return Err(PhotoVerdictError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();
    if !is_image_extension(&ext) {
        return Err(PhotoVerdictError::UnsupportedImage(path.display().to_string()));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let bytes = std::fs::read(path)?;
    Ok(Photo { file_name, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(is_image_extension("jpeg"));
        assert!(is_image_extension("HEIC"));
        assert!(is_image_extension("png"));
        assert!(!is_image_extension("txt"));
        assert!(!is_image_extension("pdf"));
        assert!(!is_image_extension(""));
    }

    #[test]
    fn test_extract_non_image() {
        let metadata = extract(b"hello world");
        assert!(is_error_metadata(&metadata));
        assert!(!metadata[METADATA_ERROR_KEY].is_empty());
    }

    #[test]
    fn test_extract_empty_bytes() {
        let metadata = extract(&[]);
        assert!(is_error_metadata(&metadata));
    }

    #[test]
    fn test_read_photo_not_found() {
        let result = read_photo(Path::new("/nonexistent/photo.jpg"));
        assert!(matches!(result, Err(PhotoVerdictError::FileNotFound(_))));
    }

    #[test]
    fn test_read_photo_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "text").unwrap();

        let result = read_photo(&path);
        assert!(matches!(result, Err(PhotoVerdictError::UnsupportedImage(_))));
    }

    #[test]
    fn test_read_photo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("IMG_0001.JPG");
        std::fs::write(&path, b"dummy").unwrap();

        let photo = read_photo(&path).unwrap();
        assert_eq!(photo.file_name, "IMG_0001.JPG");
        assert_eq!(photo.bytes, b"dummy");
    }
}
