//! 送信コントローラ
//!
//! 入力検証 → Loading → 1回のPOST → 結果またはエラーの保存

mod http;

pub use http::AnalysisClient;

use crate::report;
use resume_score_common::{JobInput, Lifecycle, RequestState, SelectedFile, Submission};

pub struct Controller {
    client: AnalysisClient,
    lifecycle: Lifecycle,
    show_progress: bool,
}

impl Controller {
    pub fn new(client: AnalysisClient) -> Self {
        Self {
            client,
            lifecycle: Lifecycle::new(),
            show_progress: false,
        }
    }

    /// 解析中にスピナーを表示する
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn state(&self) -> &RequestState {
        self.lifecycle.state()
    }

    /// ファイル未選択・職種名が空なら送信せずにエラー状態にする
    pub async fn submit(&mut self, file: Option<&SelectedFile>, job: &JobInput) -> &RequestState {
        let submission = match Submission::validate(file, job) {
            Ok(submission) => submission,
            Err(e) => {
                tracing::debug!(error = ?e, "submission rejected before sending");
                self.lifecycle.reject(e.to_string());
                return self.lifecycle.state();
            }
        };

        let ticket = self.lifecycle.begin();
        let spinner = self
            .show_progress
            .then(|| report::spinner("Analyzing your resume..."));

        let outcome = self
            .client
            .analyze(&submission)
            .await
            .map_err(|e| e.user_message());

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        self.lifecycle.settle(ticket, outcome);
        self.lifecycle.state()
    }
}
