//! End-to-end handler tests over the full router

use std::sync::{Arc, Mutex};

use ai_core::{GenerationError, TextGeneration};
use ai_speech::{AudioUpload, SpeechError, SpeechToText, TextToSpeech};
use application::{ChatService, SpeechService};
use async_trait::async_trait;
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use bytes::Bytes;
use presentation_http::{AppState, routes};
use serde_json::{Value, json};

/// Text generation stub that records every prompt it receives
#[derive(Default)]
struct RecordingGenerator {
    prompts: Arc<Mutex<Vec<String>>>,
    response: String,
    fail: bool,
}

impl RecordingGenerator {
    fn with_response(response: &str) -> Self {
        Self {
            response: response.to_string(),
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait]
impl TextGeneration for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts
            .lock()
            .map_err(|_| GenerationError::ServerError("lock poisoned".to_string()))?
            .push(prompt.to_string());

        if self.fail {
            return Err(GenerationError::ServerError("model overloaded".to_string()));
        }
        Ok(self.response.clone())
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn model_name(&self) -> &str {
        "gemini-test"
    }
}

struct StubStt {
    result: Result<String, fn() -> SpeechError>,
}

#[async_trait]
impl SpeechToText for StubStt {
    async fn transcribe(&self, _audio: AudioUpload) -> Result<String, SpeechError> {
        match &self.result {
            Ok(text) => Ok(text.clone()),
            Err(make) => Err(make()),
        }
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn model_name(&self) -> &str {
        "stt-test"
    }
}

struct StubTts {
    audio: Vec<u8>,
}

#[async_trait]
impl TextToSpeech for StubTts {
    async fn synthesize(
        &self,
        _text: &str,
        _voice: &str,
        _format: &str,
    ) -> Result<Bytes, SpeechError> {
        Ok(Bytes::from(self.audio.clone()))
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn model_name(&self) -> &str {
        "tts-test"
    }

    fn default_voice(&self) -> &str {
        "alloy"
    }
}

fn server_with(
    generator: RecordingGenerator,
    stt: StubStt,
    tts: StubTts,
) -> TestServer {
    let state = AppState::new(
        Arc::new(ChatService::new(Arc::new(generator))),
        Arc::new(SpeechService::new(Arc::new(stt), Arc::new(tts))),
    );
    TestServer::new(routes::create_router(state)).unwrap()
}

fn default_server() -> TestServer {
    server_with(
        RecordingGenerator::with_response("いいですね!"),
        StubStt {
            result: Ok("今日は散歩に行った".to_string()),
        },
        StubTts {
            audio: vec![1, 2, 3, 4],
        },
    )
}

fn audio_form() -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(vec![0u8, 1, 2, 3])
            .file_name("recording.webm")
            .mime_type("audio/webm"),
    )
}

#[tokio::test]
async fn root_returns_banner() {
    let server = default_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    response.assert_json(&json!({"message": "AudioDiary API is running"}));
}

#[tokio::test]
async fn health_returns_healthy() {
    let server = default_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({"status": "healthy"}));
}

#[tokio::test]
async fn chat_message_happy_path_invokes_provider_once() {
    let generator = RecordingGenerator::with_response("それは良かったですね!");
    let prompts = generator.prompts();
    let server = server_with(
        generator,
        StubStt {
            result: Ok(String::new()),
        },
        StubTts { audio: vec![] },
    );

    let response = server
        .post("/api/v1/chat/message")
        .json(&json!({"content": "今日は楽しかった"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["content"], "それは良かったですね!");

    let recorded = prompts.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].ends_with("user: 今日は楽しかった\nassistant:"));
}

#[tokio::test]
async fn chat_message_with_empty_content_is_rejected() {
    let server = default_server();

    let response = server
        .post("/api/v1/chat/message")
        .json(&json!({"content": "  "}))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert!(body["detail"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn chat_message_provider_failure_maps_to_500() {
    let server = server_with(
        RecordingGenerator::failing(),
        StubStt {
            result: Ok(String::new()),
        },
        StubTts { audio: vec![] },
    );

    let response = server
        .post("/api/v1/chat/message")
        .json(&json!({"content": "こんにちは"}))
        .await;

    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn summarize_returns_diary_prose() {
    let generator = RecordingGenerator::with_response("今日は散歩をした。");
    let prompts = generator.prompts();
    let server = server_with(
        generator,
        StubStt {
            result: Ok(String::new()),
        },
        StubTts { audio: vec![] },
    );

    let response = server
        .post("/api/v1/chat/summarize")
        .json(&json!({"conversation": "user: 散歩した\nassistant: いいですね"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["summary"], "今日は散歩をした。");

    let recorded = prompts.lock().unwrap();
    assert!(recorded[0].ends_with("日記:"));
}

#[tokio::test]
async fn summarize_empty_conversation_is_rejected_without_provider_call() {
    let generator = RecordingGenerator::with_response("unused");
    let prompts = generator.prompts();
    let server = server_with(
        generator,
        StubStt {
            result: Ok(String::new()),
        },
        StubTts { audio: vec![] },
    );

    let response = server
        .post("/api/v1/chat/summarize")
        .json(&json!({"conversation": ""}))
        .await;

    response.assert_status_bad_request();
    assert!(prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn transcribe_returns_text() {
    let server = default_server();

    let response = server
        .post("/api/v1/stt/transcribe")
        .multipart(audio_form())
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({"text": "今日は散歩に行った"}));
}

#[tokio::test]
async fn transcribe_stream_emits_deltas_then_done() {
    let server = server_with(
        RecordingGenerator::default(),
        StubStt {
            result: Ok("hello wonderful world".to_string()),
        },
        StubTts { audio: vec![] },
    );

    let response = server
        .post("/api/v1/stt/transcribe/stream")
        .multipart(audio_form())
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains(r#"{"delta":"hello "}"#));
    assert!(body.contains(r#"{"delta":"world "}"#));
    assert!(body.contains(r#"{"done":true,"text":"hello wonderful world"}"#));
}

#[tokio::test]
async fn transcribe_stream_reports_errors_in_band() {
    let server = server_with(
        RecordingGenerator::default(),
        StubStt {
            result: Err(|| SpeechError::TranscriptionFailed("no speech detected".to_string())),
        },
        StubTts { audio: vec![] },
    );

    let response = server
        .post("/api/v1/stt/transcribe/stream")
        .multipart(audio_form())
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains(r#""error":"#));
    assert!(!body.contains(r#""done":true"#));
}

#[tokio::test]
async fn synthesize_wav_sets_content_type() {
    let server = default_server();

    let response = server
        .post("/api/v1/tts/synthesize")
        .json(&json!({"text": "こんにちは", "format": "wav"}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "audio/wav");
    assert_eq!(response.as_bytes().to_vec(), vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn synthesize_unknown_format_falls_back_to_octet_stream() {
    let server = default_server();

    let response = server
        .post("/api/v1/tts/synthesize")
        .json(&json!({"text": "Hi", "format": "midi"}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "application/octet-stream");
}

#[tokio::test]
async fn synthesize_empty_text_is_rejected() {
    let server = default_server();

    let response = server
        .post("/api/v1/tts/synthesize")
        .json(&json!({"text": ""}))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert!(body["detail"].as_str().unwrap().contains("empty"));
}
