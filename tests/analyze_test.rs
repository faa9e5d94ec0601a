//! 解析API送信テスト
//!
//! ローカルのモックサーバーに対して送信コントローラの動作を検証

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use resume_score::analyzer::{AnalysisClient, Controller};
use resume_score_common::error::MISSING_INPUT_MESSAGE;
use resume_score_common::{
    Endpoint, JobInput, RequestState, ResponseSchema, ResultView, ScoreThresholds, SelectedFile,
    TagTone,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const SUCCESS_BODY: &str = r#"{
    "score": 82,
    "summary": "Strong Python background.",
    "keywords_match": {"Python": true, "Docker": false},
    "missing_technical_skills": ["Kubernetes"],
    "missing_other_skills": [],
    "improvements": ["Add metrics"]
}"#;

#[derive(Debug, Clone)]
struct ReceivedField {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

#[derive(Clone)]
struct MockState {
    hits: Arc<AtomicUsize>,
    fields: Arc<Mutex<Vec<ReceivedField>>>,
    status: StatusCode,
    body: &'static str,
}

impl MockState {
    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn field(&self, name: &str) -> Option<ReceivedField> {
        self.fields
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.name == name)
            .cloned()
    }
}

async fn handle(State(state): State<MockState>, mut multipart: Multipart) -> (StatusCode, String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        state.fields.lock().unwrap().push(ReceivedField {
            name,
            file_name,
            content_type,
            data,
        });
    }
    (state.status, state.body.to_string())
}

/// モックサーバーを起動してエンドポイントを返す
async fn spawn_server(status: StatusCode, body: &'static str) -> (Endpoint, MockState) {
    let state = MockState {
        hits: Arc::new(AtomicUsize::new(0)),
        fields: Arc::new(Mutex::new(Vec::new())),
        status,
        body,
    };

    let app = Router::new()
        .route("/analyze-resume/", post(handle))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let endpoint = Endpoint::parse(&format!("http://{addr}/analyze-resume/")).unwrap();
    (endpoint, state)
}

fn controller(endpoint: Endpoint, schema: ResponseSchema) -> Controller {
    Controller::new(AnalysisClient::new(endpoint, schema).unwrap())
}

fn resume() -> SelectedFile {
    SelectedFile::new("cv.pdf", b"%PDF-1.7 resume".to_vec()).unwrap()
}

/// 成功レスポンス：送信フィールドと表示内容
#[tokio::test]
async fn test_successful_analysis() {
    let (endpoint, server) = spawn_server(StatusCode::OK, SUCCESS_BODY).await;
    let mut controller = controller(endpoint, ResponseSchema::Auto);
    let file = resume();
    let job = JobInput::new(" Backend Engineer ", "Python, Docker, Kubernetes");

    let state = controller.submit(Some(&file), &job).await.clone();

    assert_eq!(server.hits(), 1);

    let uploaded = server.field("file").expect("file part");
    assert_eq!(uploaded.file_name.as_deref(), Some("cv.pdf"));
    assert_eq!(uploaded.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(uploaded.data, b"%PDF-1.7 resume");
    assert_eq!(server.field("job_title").unwrap().data, b"Backend Engineer");
    assert_eq!(
        server.field("job_description").unwrap().data,
        b"Python, Docker, Kubernetes"
    );

    assert!(matches!(state, RequestState::Succeeded(_)), "unexpected state: {:?}", state);
    let result = state.result().cloned().expect("analysis result");
    let view = ResultView::from_result(&result, &ScoreThresholds::default());
    assert_eq!(view.score, 82);
    let keywords = view.keywords.unwrap();
    assert_eq!(keywords.iter().filter(|t| t.tone == TagTone::Matched).count(), 1);
    assert_eq!(keywords.iter().filter(|t| t.tone == TagTone::Missing).count(), 1);
    assert_eq!(view.missing_technical.unwrap().len(), 1);
    assert!(view.missing_other.is_none());
    assert_eq!(view.improvements.unwrap().len(), 1);
}

/// 求人内容が空欄ならフィールド自体を送らない
#[tokio::test]
async fn test_blank_description_not_sent() {
    let (endpoint, server) = spawn_server(StatusCode::OK, SUCCESS_BODY).await;
    let mut controller = controller(endpoint, ResponseSchema::Auto);
    let file = resume();

    controller.submit(Some(&file), &JobInput::new("SRE", "   ")).await;

    assert_eq!(server.hits(), 1);
    assert!(server.field("job_title").is_some());
    assert!(server.field("job_description").is_none());
}

/// ファイル未選択なら送信しない
#[tokio::test]
async fn test_missing_file_never_calls_service() {
    let (endpoint, server) = spawn_server(StatusCode::OK, SUCCESS_BODY).await;
    let mut controller = controller(endpoint, ResponseSchema::Auto);

    let state = controller
        .submit(None, &JobInput::new("Backend Engineer", ""))
        .await;

    assert_eq!(state.error(), Some(MISSING_INPUT_MESSAGE));
    assert_eq!(server.hits(), 0);
}

/// 職種名が空白のみなら送信しない
#[tokio::test]
async fn test_blank_title_never_calls_service() {
    let (endpoint, server) = spawn_server(StatusCode::OK, SUCCESS_BODY).await;
    let mut controller = controller(endpoint, ResponseSchema::Auto);
    let file = resume();

    for title in ["", "   "] {
        let state = controller.submit(Some(&file), &JobInput::new(title, "desc")).await;
        assert_eq!(state.error(), Some(MISSING_INPUT_MESSAGE));
    }
    assert_eq!(server.hits(), 0);
}

/// サーバーの detail をそのまま表示
#[tokio::test]
async fn test_server_detail_is_shown_verbatim() {
    let (endpoint, server) =
        spawn_server(StatusCode::BAD_REQUEST, r#"{"detail": "Unsupported file type"}"#).await;
    let mut controller = controller(endpoint, ResponseSchema::Auto);
    let file = resume();

    let state = controller.submit(Some(&file), &JobInput::new("QA", "")).await;

    assert_eq!(server.hits(), 1);
    assert_eq!(state.error(), Some("Unsupported file type"));
    assert!(state.result().is_none());
}

/// ボディなしの失敗でも空のメッセージにはならない
#[tokio::test]
async fn test_empty_failure_body_has_message() {
    let (endpoint, _server) = spawn_server(StatusCode::INTERNAL_SERVER_ERROR, "").await;
    let mut controller = controller(endpoint, ResponseSchema::Auto);
    let file = resume();

    let state = controller.submit(Some(&file), &JobInput::new("QA", "")).await;

    let message = state.error().expect("error message");
    assert!(!message.trim().is_empty());
    assert_eq!(message, "Request failed with status code 500");
}

/// 接続できない場合もエラー状態で終わる
#[tokio::test]
async fn test_unreachable_service() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = Endpoint::parse(&format!("http://{addr}/analyze-resume/")).unwrap();
    let mut controller = controller(endpoint, ResponseSchema::Auto);
    let file = resume();

    let state = controller.submit(Some(&file), &JobInput::new("QA", "")).await;

    assert!(!state.is_loading());
    assert!(!state.error().unwrap().trim().is_empty());
}

/// 指定したレスポンス形式と合わない場合はデコードエラー
#[tokio::test]
async fn test_schema_mismatch_is_reported() {
    let (endpoint, _server) = spawn_server(StatusCode::OK, SUCCESS_BODY).await;
    let mut controller = controller(endpoint, ResponseSchema::MatchedField);
    let file = resume();

    let state = controller.submit(Some(&file), &JobInput::new("QA", "")).await;

    let message = state.error().expect("decode error");
    assert!(message.contains("Python"));
}

/// 新しい送信で前回の結果が消え、新しい結果に置き換わる
#[tokio::test]
async fn test_resubmission_replaces_previous_error() {
    let (endpoint, server) = spawn_server(StatusCode::OK, SUCCESS_BODY).await;
    let mut controller = controller(endpoint, ResponseSchema::Auto);
    let file = resume();

    controller.submit(None, &JobInput::new("QA", "")).await;
    assert!(controller.state().error().is_some());

    let state = controller.submit(Some(&file), &JobInput::new("QA", "")).await;
    assert!(state.error().is_none());
    assert_eq!(state.result().unwrap().score.value(), 82);
    assert_eq!(server.hits(), 1);
}

/// ヘッダーより短いボディで接続を切るサーバー
async fn spawn_truncating_server() -> Endpoint {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // リクエストを最後まで読んでから応答する
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        let read_all = async {
            loop {
                let n = socket.read(&mut buf).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.ends_with(b"--\r\n") || request.ends_with(b"0\r\n\r\n") {
                    break;
                }
            }
        };
        let _ = tokio::time::timeout(std::time::Duration::from_secs(5), read_all).await;

        let response = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 4096\r\n\r\n{\"score\": 8";
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    Endpoint::parse(&format!("http://{addr}/analyze-resume/")).unwrap()
}

/// 成功ステータスでもボディの受信に失敗したら通信エラーとして報告する
#[tokio::test]
async fn test_truncated_success_body_is_a_transport_error() {
    let endpoint = spawn_truncating_server().await;
    let mut controller = controller(endpoint, ResponseSchema::Auto);
    let file = resume();

    let state = controller.submit(Some(&file), &JobInput::new("QA", "")).await;

    let message = state.error().expect("transport error");
    assert!(!message.trim().is_empty());
    assert!(!message.contains("no JSON object"), "{message}");
    assert!(!message.contains("Unexpected response"), "{message}");
}
