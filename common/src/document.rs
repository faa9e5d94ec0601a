//! 履歴書ファイルの種別判定

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// 受け付ける文書形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Doc,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [DocumentKind::Pdf, DocumentKind::Docx, DocumentKind::Doc];

    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentKind::Doc => "application/msword",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
            DocumentKind::Doc => "doc",
        }
    }

    /// 拡張子から判定（大文字小文字は区別しない）
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        let ext = ext.to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.extension() == ext)
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.split(';').next().unwrap_or_default().trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.mime_type().eq_ignore_ascii_case(mime))
    }

    /// MIMEタイプを優先し、空または不明なら拡張子で判定する
    ///
    /// ブラウザはDOCに空のMIMEを渡すことがあるため拡張子にフォールバックする。
    pub fn detect(file_name: &str, mime: Option<&str>) -> Result<Self, ValidationError> {
        mime.filter(|m| !m.trim().is_empty())
            .and_then(Self::from_mime)
            .or_else(|| Self::from_file_name(file_name))
            .ok_or_else(|| ValidationError::UnsupportedDocument(file_name.to_string()))
    }
}

/// `<input type="file" accept=...>` 用の文字列
pub fn accept_attribute() -> String {
    DocumentKind::ALL
        .iter()
        .flat_map(|kind| [format!(".{}", kind.extension()), kind.mime_type().to_string()])
        .collect::<Vec<_>>()
        .join(",")
}

/// 選択された履歴書ファイル（中身は送信時まで不透明）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub kind: DocumentKind,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ValidationError> {
        let file_name = file_name.into();
        let kind = DocumentKind::detect(&file_name, None)?;
        Ok(Self {
            file_name,
            kind,
            bytes,
        })
    }

    pub fn display_name(&self) -> &str {
        &self.file_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_name() {
        assert_eq!(DocumentKind::from_file_name("cv.pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_file_name("CV.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_file_name("resume.final.docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_file_name("old.doc"), Some(DocumentKind::Doc));
        assert_eq!(DocumentKind::from_file_name("photo.png"), None);
        assert_eq!(DocumentKind::from_file_name("pdf"), None);
    }

    #[test]
    fn test_from_mime_ignores_parameters() {
        assert_eq!(
            DocumentKind::from_mime("application/pdf; charset=binary"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(DocumentKind::from_mime("image/png"), None);
    }

    #[test]
    fn test_detect_prefers_mime() {
        let kind = DocumentKind::detect("resume.pdf", Some("application/msword")).unwrap();
        assert_eq!(kind, DocumentKind::Doc);
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        assert_eq!(DocumentKind::detect("resume.doc", Some("")).unwrap(), DocumentKind::Doc);
        assert_eq!(
            DocumentKind::detect("resume.docx", Some("application/octet-stream")).unwrap(),
            DocumentKind::Docx
        );
    }

    #[test]
    fn test_detect_rejects_unknown() {
        let err = DocumentKind::detect("notes.txt", Some("text/plain")).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedDocument("notes.txt".to_string()));
    }

    #[test]
    fn test_accept_attribute_lists_every_kind() {
        let accept = accept_attribute();
        for kind in DocumentKind::ALL {
            assert!(accept.contains(&format!(".{}", kind.extension())));
            assert!(accept.contains(kind.mime_type()));
        }
    }

    #[test]
    fn test_selected_file_new() {
        let file = SelectedFile::new("cv.pdf", b"%PDF-1.7".to_vec()).unwrap();
        assert_eq!(file.kind, DocumentKind::Pdf);
        assert_eq!(file.display_name(), "cv.pdf");
        assert!(SelectedFile::new("cv.txt", vec![]).is_err());
    }
}
