//! 解析リクエストの状態管理
//!
//! Idle → Loading → Succeeded / Failed の遷移を1つの列挙型で表す。
//! 結果とエラーが同時に存在する状態は表現できない。

use crate::types::AnalysisResult;

/// リクエストの状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Succeeded(AnalysisResult),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            RequestState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// 送信ボタンを押せるか（解析中は無効）
    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Loading => "loading",
            RequestState::Succeeded(_) => "succeeded",
            RequestState::Failed(_) => "failed",
        }
    }
}

/// 送信ごとに発行される番号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// 送信コントローラが保持する状態
///
/// 複数の送信が同時に走った場合は、最後に完了したものが状態を上書きする。
/// `is_current` で古い送信かどうかは判別できるが、`settle` は破棄しない。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lifecycle {
    state: RequestState,
    issued: u64,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// 送信開始：前回の結果とエラーを消してLoadingにする
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.state = RequestState::Loading;
        Ticket(self.issued)
    }

    /// 入力検証エラー（ネットワーク呼び出しなし）
    ///
    /// 解析中は何もしない。Loading を抜けるのは `settle` だけ。
    pub fn reject(&mut self, message: impl Into<String>) {
        if self.state.is_loading() {
            return;
        }
        self.state = RequestState::Failed(message.into());
    }

    /// 送信完了：成功なら結果、失敗ならメッセージを保存する
    pub fn settle(&mut self, ticket: Ticket, outcome: Result<AnalysisResult, String>) {
        debug_assert!(ticket.0 <= self.issued);
        self.state = match outcome {
            Ok(result) => RequestState::Succeeded(result),
            Err(message) if message.trim().is_empty() => {
                RequestState::Failed(crate::failure::FALLBACK_ERROR_MESSAGE.to_string())
            }
            Err(message) => RequestState::Failed(message),
        };
    }

    /// 最新の送信かどうか
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }
}
