use photo_verdict_common::MetadataMap;
use std::io::Cursor;

/// EXIFを読み取り、タグ名 → 表示文字列のマップにする
///
/// 既知のタグは標準名（"DateTimeOriginal" など）、未知のタグは番号の10進文字列。
/// サムネイル側のIFDは読まない。
pub fn read_exif(bytes: &[u8]) -> Result<MetadataMap, exif::Error> {
    let mut cursor = Cursor::new(bytes);
    let exif = exif::Reader::new().read_from_container(&mut cursor)?;

    let mut metadata = MetadataMap::new();
    for field in exif.fields().filter(|f| f.ifd_num == exif::In::PRIMARY) {
        let value = value_string(field);
        metadata.entry(tag_name(field.tag)).or_insert(value);
    }

    Ok(metadata)
}

/// 値を文字列にする（ASCIIは引用符なしの生文字列）
fn value_string(field: &exif::Field) -> String {
    match &field.value {
        exif::Value::Ascii(parts) => parts
            .iter()
            .map(|p| String::from_utf8_lossy(p).trim_end_matches('\0').to_string())
            .collect::<Vec<_>>()
            .join(" "),
        _ => field.display_value().to_string(),
    }
}

/// タグ番号を名前に解決（不明なら番号）
pub fn tag_name(tag: exif::Tag) -> String {
    if tag.description().is_some() {
        tag.to_string()
    } else {
        tag.number().to_string()
    }
}
