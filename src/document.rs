use crate::error::{Result, ScoreError};
use resume_score_common::{DocumentKind, SelectedFile};
use std::path::Path;

/// 履歴書ファイルを読み込む
///
/// 種別判定を先に行い、未対応の形式なら中身は読まない。
pub fn load_document(path: &Path) -> Result<SelectedFile> {
    if !path.is_file() {
        return Err(ScoreError::FileNotFound(path.display().to_string()));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let kind = DocumentKind::detect(&file_name, None)?;
    let bytes = std::fs::read(path)?;

    let file = SelectedFile {
        file_name,
        kind,
        bytes,
    };
    tracing::debug!(file = file.display_name(), kind = ?file.kind, size = file.bytes.len(), "loaded resume");
    Ok(file)
}

/// テキストファイル（求人票・保存済み結果）を読み込む
///
/// 存在しない場合だけ `FileNotFound`、それ以外の読み込み失敗はそのまま返す。
pub fn read_text_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ScoreError::FileNotFound(path.display().to_string()),
        _ => ScoreError::Io(e),
    })
}
