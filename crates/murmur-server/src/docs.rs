use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::{Html, Redirect},
};
use murmur_engine::language::LANGUAGES;
use murmur_format::OutputFormat;
use serde_json::{Value, json};
use strum::IntoEnumIterator;

use crate::state::AppState;

const DOCS_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Murmur ASR</title>
</head>
<body>
<h1>Murmur ASR</h1>
<p>Speech recognition over HTTP. The machine-readable description lives at <a href="/openapi.json">/openapi.json</a>.</p>

<h2><code>POST /asr</code></h2>
<p>Upload audio as the multipart field <code>audio_file</code>. The transcript is returned as an attachment.</p>
<table>
<tr><th>Query parameter</th><th>Default</th><th>Description</th></tr>
<tr><td><code>task</code></td><td><code>transcribe</code></td><td><code>transcribe</code> or <code>translate</code> (to English)</td></tr>
<tr><td><code>language</code></td><td>detected</td><td>Spoken language code, e.g. <code>en</code></td></tr>
<tr><td><code>initial_prompt</code></td><td>none</td><td>Text used to bias decoding</td></tr>
<tr><td><code>encode</code></td><td><code>true</code></td><td>Decode the upload through ffmpeg first; <code>false</code> expects mono 16-bit PCM</td></tr>
<tr><td><code>output</code></td><td><code>txt</code></td><td><code>txt</code>, <code>vtt</code>, <code>srt</code>, <code>tsv</code> or <code>json</code></td></tr>
<tr><td><code>word_timestamps</code></td><td><code>false</code></td><td>Request word-level timing from engines that support it</td></tr>
</table>

<h2><code>POST /detect-language</code></h2>
<p>Upload audio as <code>audio_file</code>; returns <code>{"detected_language": ..., "language_code": ...}</code>.
Accepts the <code>encode</code> parameter.</p>
</body>
</html>
"#;

pub(crate) async fn redirect_to_docs(State(state): State<Arc<AppState>>) -> Redirect {
    tracing::debug!(docs = %state.docs_path, "redirecting to docs");

    Redirect::temporary(&state.docs_path)
}

pub(crate) async fn docs_page() -> Html<&'static str> {
    Html(DOCS_PAGE)
}

fn query_parameter(name: &str, schema: Value, description: &str) -> Value {
    json!({
        "name": name,
        "in": "query",
        "required": false,
        "description": description,
        "schema": schema,
    })
}

fn upload_body() -> Value {
    json!({
        "required": true,
        "content": {
            "multipart/form-data": {
                "schema": {
                    "type": "object",
                    "required": ["audio_file"],
                    "properties": {
                        "audio_file": { "type": "string", "format": "binary" }
                    }
                }
            }
        }
    })
}

/// OpenAPI description of the endpoints
///
/// `word_timestamps` is only advertised when the active engine honors it.
pub(crate) async fn openapi(State(state): State<Arc<AppState>>) -> Json<Value> {
    let languages: Vec<&str> = LANGUAGES.iter().map(|(code, _)| *code).collect();
    let formats: Vec<&str> = OutputFormat::iter().map(OutputFormat::extension).collect();
    let encode = query_parameter(
        "encode",
        json!({ "type": "boolean", "default": true }),
        "Encode audio first through ffmpeg",
    );

    let mut asr_parameters = vec![
        query_parameter(
            "task",
            json!({ "type": "string", "enum": ["transcribe", "translate"], "default": "transcribe" }),
            "Transcribe, or translate to English",
        ),
        query_parameter("language", json!({ "type": "string", "enum": languages }), "Spoken language"),
        query_parameter("initial_prompt", json!({ "type": "string" }), "Text used to bias decoding"),
        encode.clone(),
        query_parameter(
            "output",
            json!({ "type": "string", "enum": formats, "default": "txt" }),
            "Output format",
        ),
    ];

    if state.engine.supports_word_timestamps() {
        asr_parameters.push(query_parameter(
            "word_timestamps",
            json!({ "type": "boolean", "default": false }),
            "Word level timestamps",
        ));
    }

    Json(json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Murmur ASR",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": {
            "/asr": {
                "post": {
                    "tags": ["Endpoints"],
                    "parameters": asr_parameters,
                    "requestBody": upload_body(),
                    "responses": {
                        "200": {
                            "description": "Transcript in the requested format",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            },
            "/detect-language": {
                "post": {
                    "tags": ["Endpoints"],
                    "parameters": [encode],
                    "requestBody": upload_body(),
                    "responses": {
                        "200": {
                            "description": "Detected language",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "detected_language": { "type": "string" },
                                            "language_code": { "type": "string" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }))
}
