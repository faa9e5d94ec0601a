//! 失敗レスポンスからのエラーメッセージ抽出
//!
//! 優先順位:
//! 1. サーバーが返した `detail`
//! 2. 下位エラーのメッセージ
//! 3. 汎用メッセージ

use serde_json::Value;

/// どの情報も得られなかったときのメッセージ
pub const FALLBACK_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// レスポンスボディの `detail` を取り出す
///
/// `detail` は文字列のほか、FastAPIの検証エラー配列
/// (`[{"loc": [...], "msg": "..."}]`) の場合もある。
pub fn detail_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body.trim()).ok()?;
    let detail = value.get("detail")?;

    let message = match detail {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(obj) => obj.get("msg").and_then(Value::as_str).map(str::to_string),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("; "),
        Value::Object(obj) => obj
            .get("msg")
            .or_else(|| obj.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)?,
        _ => return None,
    };

    if message.trim().is_empty() {
        None
    } else {
        Some(message)
    }
}

/// HTTPステータスのみ分かる場合の下位メッセージ
pub fn status_message(status: u16) -> String {
    format!("Request failed with status code {status}")
}

/// 表示用メッセージを決める（空文字にはならない）
pub fn error_message(body: Option<&str>, underlying: Option<&str>) -> String {
    body.and_then(detail_from_body)
        .or_else(|| {
            underlying
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}
