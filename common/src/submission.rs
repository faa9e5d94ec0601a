//! 送信内容の組み立てと入力検証

use crate::error::ValidationError;

/// multipartのフィールド名
pub const FIELD_FILE: &str = "file";
pub const FIELD_JOB_TITLE: &str = "job_title";
pub const FIELD_JOB_DESCRIPTION: &str = "job_description";

/// 求人情報の入力（キー入力ごとに更新される）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobInput {
    pub title: String,
    pub description: String,
}

impl JobInput {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// 検証済みの送信内容
///
/// `F` はファイルの表現（CLIでは `&SelectedFile`、Webでは `SelectedDocument`）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission<F> {
    pub file: F,
    pub job_title: String,
    /// 空白のみの場合は `None`（フィールド自体を送らない）
    pub job_description: Option<String>,
}

impl<F> Submission<F> {
    /// ファイル未選択・職種名が空ならエラー
    pub fn validate(file: Option<F>, job: &JobInput) -> Result<Self, ValidationError> {
        let file = file.ok_or(ValidationError::MissingFile)?;
        if !job.has_title() {
            return Err(ValidationError::MissingTitle);
        }

        let description = job.description.trim();
        Ok(Self {
            file,
            job_title: job.title.trim().to_string(),
            job_description: (!description.is_empty()).then(|| description.to_string()),
        })
    }

    /// 送信するテキストフィールド（名前, 値）
    pub fn text_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![(FIELD_JOB_TITLE, self.job_title.as_str())];
        if let Some(description) = &self.job_description {
            fields.push((FIELD_JOB_DESCRIPTION, description.as_str()));
        }
        fields
    }
}
