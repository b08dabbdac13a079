#![allow(dead_code)]

//! In-process stand-in for the question-answering backend.

use axum::{
    extract::{Multipart, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Form, Json, Router,
};
use docqa_client::{BackendContract, ClientConfig, QaPair, Services, StatusView};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Clone, Default)]
pub struct Behavior {
    /// Status returned by both upload endpoints instead of success.
    pub upload_status: Option<StatusCode>,
    /// Body of a successful upload; `None` echoes the contract's usual shape.
    pub upload_body: Option<Value>,
    /// Answer returned by the ask endpoints; `None` omits the field.
    pub answer: Option<String>,
    pub ask_status: Option<StatusCode>,
    /// Status and raw body for `/hackrx/run` failures.
    pub run_error: Option<(StatusCode, String)>,
    /// Answers returned by `/hackrx/run`; `None` answers `A1..An`.
    pub run_answers: Option<Vec<String>>,
}

#[derive(Debug, Default)]
pub struct Recorded {
    pub uploaded_files: Vec<String>,
    pub asks: Vec<Value>,
    pub batch_asks: Vec<(String, Vec<String>)>,
    pub runs: Vec<(Option<String>, Value)>,
}

struct BackendState {
    behavior: Behavior,
    requests: AtomicUsize,
    recorded: Mutex<Recorded>,
}

pub struct FakeBackend {
    pub base_url: String,
    state: Arc<BackendState>,
}

impl FakeBackend {
    pub async fn start(behavior: Behavior) -> Self {
        let state = Arc::new(BackendState {
            behavior,
            requests: AtomicUsize::new(0),
            recorded: Mutex::new(Recorded::default()),
        });

        let app = Router::new()
            .route("/upload_pdf", post(upload_pdf))
            .route("/upload/", post(upload_form))
            .route("/ask_question", post(ask_json))
            .route("/ask/", post(ask_form))
            .route("/batch-ask/", post(batch_ask))
            .route("/hackrx/run", post(hackrx_run))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn config(&self, contract: BackendContract) -> ClientConfig {
        ClientConfig::with_base_url(&self.base_url, contract).unwrap()
    }

    pub fn services(&self, contract: BackendContract) -> Services {
        Services::new(self.config(contract))
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    pub fn recorded<T>(&self, f: impl FnOnce(&Recorded) -> T) -> T {
        f(&self.state.recorded.lock().unwrap())
    }
}

/// A base URL nothing is listening on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn write_fixture(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"%PDF-1.4\n% policy wording\n").unwrap();
    path
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub upload_status: Vec<String>,
    pub qa_visible: bool,
    pub answers: Vec<String>,
    pub batch_status: Vec<String>,
    pub results: Vec<String>,
}

impl RecordingView {
    pub fn is_untouched(&self) -> bool {
        self.upload_status.is_empty()
            && !self.qa_visible
            && self.answers.is_empty()
            && self.batch_status.is_empty()
            && self.results.is_empty()
    }
}

impl StatusView for RecordingView {
    fn set_upload_status(&mut self, text: &str) {
        self.upload_status.push(text.to_string());
    }

    fn show_qa_section(&mut self) {
        self.qa_visible = true;
    }

    fn set_answer(&mut self, text: &str) {
        self.answers.push(text.to_string());
    }

    fn set_batch_status(&mut self, text: &str) {
        self.batch_status.push(text.to_string());
    }

    fn show_batch_results(&mut self, pairs: &[QaPair]) {
        self.results.extend(pairs.iter().map(|p| p.to_string()));
    }
}

async fn read_upload(state: &BackendState, mut multipart: Multipart) -> Option<String> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    let mut filename = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() == Some("file") {
            filename = field.file_name().map(str::to_string);
            let _ = field.bytes().await.unwrap();
        }
    }
    if let Some(name) = &filename {
        state.recorded.lock().unwrap().uploaded_files.push(name.clone());
    }
    filename
}

async fn upload_pdf(State(state): State<Arc<BackendState>>, multipart: Multipart) -> Response {
    let filename = read_upload(&state, multipart).await;
    if let Some(status) = state.behavior.upload_status {
        return (status, Json(json!({"detail": "upload rejected"}))).into_response();
    }
    let body = state
        .behavior
        .upload_body
        .clone()
        .unwrap_or_else(|| json!({ "filename": filename }));
    Json(body).into_response()
}

async fn upload_form(State(state): State<Arc<BackendState>>, multipart: Multipart) -> Response {
    read_upload(&state, multipart).await;
    if let Some(status) = state.behavior.upload_status {
        return status.into_response();
    }
    let body = state.behavior.upload_body.clone().unwrap_or_else(|| {
        json!({ "message": "PDF processed", "file_id": uuid::Uuid::new_v4().to_string() })
    });
    Json(body).into_response()
}

fn answer_body(state: &BackendState, question: &str) -> Response {
    if let Some(status) = state.behavior.ask_status {
        return status.into_response();
    }
    match &state.behavior.answer {
        Some(answer) => Json(json!({ "question": question, "answer": answer })).into_response(),
        None => Json(json!({ "question": question })).into_response(),
    }
}

async fn ask_json(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    let question = body["question"].as_str().unwrap_or_default().to_string();
    state.recorded.lock().unwrap().asks.push(body);
    answer_body(&state, &question)
}

async fn ask_form(
    State(state): State<Arc<BackendState>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    let question = fields.get("question").cloned().unwrap_or_default();
    state.recorded.lock().unwrap().asks.push(json!(fields));
    answer_body(&state, &question)
}

async fn batch_ask(
    State(state): State<Arc<BackendState>>,
    Query(params): Query<HashMap<String, String>>,
    Json(questions): Json<Vec<String>>,
) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    let file_id = params.get("file_id").cloned().unwrap_or_default();
    let answers: Vec<String> = questions.iter().map(|q| format!("answer to {}", q)).collect();
    state.recorded.lock().unwrap().batch_asks.push((file_id, questions));
    Json(json!({ "answers": answers })).into_response()
}

async fn hackrx_run(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let count = body["questions"].as_array().map(|q| q.len()).unwrap_or(0);
    state.recorded.lock().unwrap().runs.push((auth, body));

    if let Some((status, raw)) = &state.behavior.run_error {
        return (*status, raw.clone()).into_response();
    }
    let answers = state
        .behavior
        .run_answers
        .clone()
        .unwrap_or_else(|| (1..=count).map(|i| format!("A{}", i)).collect());
    Json(json!({ "answers": answers })).into_response()
}
