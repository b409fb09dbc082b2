//! AudioDiary HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::sync::Arc;

use ai_core::{GeminiClient, GenerationConfig, TextGeneration};
use ai_speech::{OpenAiSpeechProvider, SpeechConfig, SpeechToText, TextToSpeech};
use application::{ChatService, SpeechService};
use presentation_http::{ServerConfig, routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audiodiary_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("AudioDiary API v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::from_env();

    // Initialize providers
    let generation_config = GenerationConfig {
        api_key: config.gemini_api_key.clone(),
        ..GenerationConfig::default()
    };
    let gemini = GeminiClient::new(generation_config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize Gemini client: {e}"))?;

    let speech_config = SpeechConfig {
        api_key: config.openai_api_key.clone(),
        ..SpeechConfig::default()
    };
    let openai = OpenAiSpeechProvider::new(speech_config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize OpenAI speech provider: {e}"))?;

    let generator: Arc<dyn TextGeneration> = Arc::new(gemini);
    let stt: Arc<dyn SpeechToText> = Arc::new(openai.clone());
    let tts: Arc<dyn TextToSpeech> = Arc::new(openai);

    // Initialize services
    let chat_service = Arc::new(ChatService::new(generator));
    let speech_service = Arc::new(SpeechService::new(stt, tts));

    info!(model = %chat_service.model_name(), "Services initialized");

    let state = AppState::new(chat_service, speech_service);

    // Build router
    let app = routes::create_router(state);

    // Configure CORS layer
    let cors_layer = if config.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };

    let app = app.layer(TraceLayer::new_for_http()).layer(cors_layer);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
