//! 解析APIへのmultipart送信

use reqwest::multipart::{Form, Part};
use resume_score_common::{
    error_message, parse_analysis_response, status_message, AnalysisResult, Endpoint, Error,
    ResponseSchema, Result, SelectedFile, Submission, FIELD_FILE,
};

pub struct AnalysisClient {
    client: reqwest::Client,
    endpoint: Endpoint,
    schema: ResponseSchema,
}

impl AnalysisClient {
    /// タイムアウトは設定しない（reqwestの既定値のまま）
    pub fn new(endpoint: Endpoint, schema: ResponseSchema) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("resume-score/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            schema,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// 1回だけPOSTする（リトライなし）
    pub async fn analyze(&self, submission: &Submission<&SelectedFile>) -> Result<AnalysisResult> {
        let form = build_form(submission)?;

        tracing::info!(
            endpoint = %self.endpoint,
            file = submission.file.display_name(),
            "calling analysis service"
        );

        let response = self
            .client
            .post(self.endpoint.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Transport(error_message(None, Some(&e.to_string()))))?;

        let status = response.status();
        tracing::debug!(%status, "analysis service responded");

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| Error::Transport(error_message(None, Some(&e.to_string()))))?;
            parse_analysis_response(&body, self.schema)
        } else {
            // ボディが読めなくてもステータスのメッセージで報告できる
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "analysis service returned an error");
            Err(Error::Server {
                status: status.as_u16(),
                message: error_message(Some(&body), Some(&status_message(status.as_u16()))),
            })
        }
    }
}

fn build_form(submission: &Submission<&SelectedFile>) -> Result<Form> {
    let file = submission.file;
    let part = Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(file.kind.mime_type())
        .map_err(|e| Error::Transport(e.to_string()))?;

    let mut form = Form::new().part(FIELD_FILE, part);
    for (name, value) in submission.text_fields() {
        form = form.text(name, value.to_string());
    }
    Ok(form)
}
