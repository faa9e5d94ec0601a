//! 解析サービス呼び出し
//!
//! multipart/form-data で履歴書と求人情報を送り、結果をデコードする。
//! 失敗時は画面に出す1行のメッセージを返す。

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, RequestMode, Response};
use resume_score_common::{
    error_message, parse_analysis_response, status_message, AnalysisResult, Endpoint,
    ResponseSchema, Submission, FIELD_FILE,
};
use crate::app::SelectedDocument;

/// 解析リクエストを送信する（タイムアウトなし）
pub async fn analyze_resume(
    endpoint: &Endpoint,
    submission: &Submission<SelectedDocument>,
    schema: ResponseSchema,
) -> Result<AnalysisResult, String> {
    let response = send(endpoint, submission)
        .await
        .map_err(|e| transport_message(&e))?;

    if !response.ok() {
        // ボディが読めなくてもステータスのメッセージで報告できる
        let body = read_body(&response).await.unwrap_or_default();
        return Err(error_message(
            Some(&body),
            Some(&status_message(response.status())),
        ));
    }

    let body = read_body(&response)
        .await
        .map_err(|e| transport_message(&e))?;
    parse_analysis_response(&body, schema).map_err(|e| e.user_message())
}

async fn send(
    endpoint: &Endpoint,
    submission: &Submission<SelectedDocument>,
) -> Result<Response, JsValue> {
    let form = build_form_data(submission)?;

    // Content-Type はブラウザが boundary 付きで設定する
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let request = Request::new_with_str_and_init(endpoint.as_str(), &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    resp_value.dyn_into()
}

fn build_form_data(submission: &Submission<SelectedDocument>) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    let document = &submission.file;
    form.append_with_blob_and_filename(FIELD_FILE, &document.file, &document.name)?;
    for (name, value) in submission.text_fields() {
        form.append_with_str(name, value)?;
    }
    Ok(form)
}

async fn read_body(response: &Response) -> Result<String, JsValue> {
    let value = JsFuture::from(response.text()?).await?;
    Ok(value.as_string().unwrap_or_default())
}

fn js_error_message(value: &JsValue) -> Option<String> {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return Some(String::from(error.message()));
    }
    value.as_string()
}

fn transport_message(value: &JsValue) -> String {
    let message = js_error_message(value);
    gloo::console::error!(format!("analysis request failed: {:?}", message));
    error_message(None, message.as_deref())
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use resume_score_common::FALLBACK_ERROR_MESSAGE;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_js_error_message_uses_error_text() {
        let error = js_sys::Error::new("Failed to fetch");
        assert_eq!(
            js_error_message(&error.into()).as_deref(),
            Some("Failed to fetch")
        );
    }

    #[wasm_bindgen_test]
    fn wasm_transport_message_falls_back() {
        assert_eq!(transport_message(&JsValue::NULL), FALLBACK_ERROR_MESSAGE);
    }

    #[wasm_bindgen_test]
    fn wasm_form_data_omits_blank_description() {
        let parts = js_sys::Array::of1(&JsValue::from_str("%PDF-1.4"));
        let file = web_sys::File::new_with_str_sequence(&parts, "cv.pdf").expect("file");
        let document = SelectedDocument {
            name: "cv.pdf".to_string(),
            kind: resume_score_common::DocumentKind::Pdf,
            file,
        };
        let job = resume_score_common::JobInput::new("SRE", "  ");
        let submission = Submission::validate(Some(document), &job).expect("valid");

        let form = build_form_data(&submission).expect("form");
        assert_eq!(form.get("job_title").as_string().as_deref(), Some("SRE"));
        assert!(!form.has("job_description"));
        assert!(form.has(FIELD_FILE));
    }
}
