//! エラー型定義

use thiserror::Error;

/// 入力不足時にユーザーへ表示するメッセージ
pub const MISSING_INPUT_MESSAGE: &str = "Please upload a resume and provide a job title.";

/// 送信前の入力検証エラー（ネットワーク呼び出しは行わない）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{}", MISSING_INPUT_MESSAGE)]
    MissingFile,

    #[error("{}", MISSING_INPUT_MESSAGE)]
    MissingTitle,

    #[error("Unsupported file type: {0}. Please upload a PDF, DOC or DOCX file.")]
    UnsupportedDocument(String),
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Transport(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response from the analysis service: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// 画面に表示する1行メッセージ（空文字にはならない）
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            crate::failure::FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_match_form_hint() {
        assert_eq!(ValidationError::MissingFile.to_string(), MISSING_INPUT_MESSAGE);
        assert_eq!(ValidationError::MissingTitle.to_string(), MISSING_INPUT_MESSAGE);
    }

    #[test]
    fn test_unsupported_document_names_file() {
        let err = ValidationError::UnsupportedDocument("photo.png".to_string());
        assert!(err.to_string().contains("photo.png"));
    }

    #[test]
    fn test_validation_is_transparent() {
        let error: Error = ValidationError::MissingTitle.into();
        assert_eq!(error.to_string(), MISSING_INPUT_MESSAGE);
        assert!(matches!(error, Error::Validation(ValidationError::MissingTitle)));
    }

    #[test]
    fn test_server_error_displays_message_verbatim() {
        let error = Error::Server {
            status: 400,
            message: "Unsupported file type".to_string(),
        };
        assert_eq!(error.to_string(), "Unsupported file type");
    }

    #[test]
    fn test_user_message_never_blank() {
        let error = Error::Transport(String::new());
        assert_eq!(error.user_message(), crate::failure::FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_error_display_config() {
        let error = Error::Config("endpoint must start with http:// or https://".to_string());
        assert_eq!(
            format!("{}", error),
            "Config error: endpoint must start with http:// or https://"
        );
    }
}
