use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error(transparent)]
    Common(#[from] resume_score_common::Error),

    /// 解析APIの失敗（サーバーのメッセージをそのまま表示）
    #[error("{0}")]
    Analysis(String),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("入力の取得に失敗: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<resume_score_common::ValidationError> for ScoreError {
    fn from(err: resume_score_common::ValidationError) -> Self {
        ScoreError::Common(err.into())
    }
}

impl ScoreError {
    /// 入力検証エラーか（ネットワーク呼び出し前に検出されたもの）
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ScoreError::Common(resume_score_common::Error::Validation(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, ScoreError>;
