//! Mock Whisper inference server for integration tests
//!
//! Implements the OpenAI-compatible transcription API with canned segments,
//! both as a single `verbose_json` body and as an SSE stream

use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Segments every transcription returns, in order
pub const SEGMENTS: [(f64, f64, &str); 2] = [(0.0, 1.5, " Hello there."), (1.5, 3.25, " General Kenobi.")];

/// Fields of the last request the mock received
#[derive(Debug, Clone, Default)]
pub struct RecordedRequest {
    pub path: String,
    pub model: Option<String>,
    pub language: Option<String>,
    pub prompt: Option<String>,
    pub stream: bool,
    pub granularities: Vec<String>,
    pub sample_rate: u32,
    pub samples: usize,
}

/// Mock Whisper backend that returns predictable transcripts
pub struct MockWhisper {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockWhisperState>,
}

struct MockWhisperState {
    request_count: AtomicU32,
    in_flight: AtomicU32,
    max_in_flight: AtomicU32,
    /// Return 500 for every request
    fail: bool,
    /// Time spent "decoding" each request
    delay: Duration,
    last_request: Mutex<Option<RecordedRequest>>,
}

impl MockWhisper {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(false, Duration::ZERO).await
    }

    /// Start a mock server that fails every request with 500
    pub async fn start_failing() -> anyhow::Result<Self> {
        Self::start_inner(true, Duration::ZERO).await
    }

    /// Start a mock server that takes `delay` to answer
    pub async fn start_slow(delay: Duration) -> anyhow::Result<Self> {
        Self::start_inner(false, delay).await
    }

    async fn start_inner(fail: bool, delay: Duration) -> anyhow::Result<Self> {
        let state = Arc::new(MockWhisperState {
            request_count: AtomicU32::new(0),
            in_flight: AtomicU32::new(0),
            max_in_flight: AtomicU32::new(0),
            fail,
            delay,
            last_request: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1/audio/transcriptions", routing::post(handle_transcriptions))
            .route("/v1/audio/translations", routing::post(handle_translations))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the engine backend
    ///
    /// Includes `/v1` since the backend appends `/audio/transcriptions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Highest number of requests that were being decoded at once
    pub fn max_in_flight(&self) -> u32 {
        self.state.max_in_flight.load(Ordering::Relaxed)
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.last_request.lock().unwrap().clone()
    }
}

impl Drop for MockWhisper {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_transcriptions(State(state): State<Arc<MockWhisperState>>, multipart: Multipart) -> Response {
    handle(&state, "/v1/audio/transcriptions", multipart).await
}

async fn handle_translations(State(state): State<Arc<MockWhisperState>>, multipart: Multipart) -> Response {
    handle(&state, "/v1/audio/translations", multipart).await
}

async fn handle(state: &MockWhisperState, path: &str, multipart: Multipart) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let in_flight = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

    let response = respond(state, path, multipart).await;

    state.in_flight.fetch_sub(1, Ordering::SeqCst);

    response
}

async fn respond(state: &MockWhisperState, path: &str, mut multipart: Multipart) -> Response {
    let mut request = RecordedRequest {
        path: path.to_owned(),
        ..RecordedRequest::default()
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_owned();

        match name.as_str() {
            "file" => {
                let bytes = field.bytes().await.unwrap_or_default();
                let Ok(reader) = hound::WavReader::new(Cursor::new(bytes.to_vec())) else {
                    return (StatusCode::BAD_REQUEST, "file is not a WAV").into_response();
                };
                request.sample_rate = reader.spec().sample_rate;
                request.samples = reader.len() as usize;
            }
            "model" => request.model = field.text().await.ok(),
            "language" => request.language = field.text().await.ok(),
            "prompt" => request.prompt = field.text().await.ok(),
            "stream" => request.stream = field.text().await.is_ok_and(|v| v == "true"),
            "timestamp_granularities[]" => {
                if let Ok(value) = field.text().await {
                    request.granularities.push(value);
                }
            }
            _ => {
                // Skip fields the mock does not model
            }
        }
    }

    let language = request.language.clone();
    let stream = request.stream;
    *state.last_request.lock().unwrap() = Some(request);

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    if state.fail {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": {
                    "message": "mock server intentional failure",
                    "type": "server_error"
                }
            })),
        )
            .into_response();
    }

    // Detected languages are reported by name, like real Whisper servers do
    let language = language.unwrap_or_else(|| "english".to_owned());

    if stream {
        return streaming_response(&language).into_response();
    }

    let segments: Vec<serde_json::Value> = SEGMENTS.iter().enumerate().map(|(id, s)| segment_json(id, *s)).collect();
    let text: String = SEGMENTS.iter().map(|(_, _, text)| *text).collect();

    Json(serde_json::json!({
        "task": "transcribe",
        "language": language,
        "duration": 3.25,
        "text": text,
        "segments": segments,
    }))
    .into_response()
}

fn segment_json(id: usize, (start, end, text): (f64, f64, &str)) -> serde_json::Value {
    serde_json::json!({ "id": id, "start": start, "end": end, "text": text })
}

/// One SSE event per segment; the first also carries the language
fn streaming_response(language: &str) -> impl IntoResponse {
    let mut body = String::new();

    for (id, segment) in SEGMENTS.iter().enumerate() {
        let chunk = if id == 0 {
            serde_json::json!({ "language": language, "segments": [segment_json(id, *segment)] })
        } else {
            serde_json::json!({ "segments": [segment_json(id, *segment)] })
        };
        body.push_str(&format!("data: {chunk}\n\n"));
    }

    // Done marker
    body.push_str("data: [DONE]\n\n");

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/event-stream")],
        body,
    )
}
