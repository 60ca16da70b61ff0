use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use insider::{api, config, state::AppState, state::SessionEngine, ws};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "insider=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Insider...");

    let config = config::Config::from_env();

    // A missing word list degrades to an empty word rather than stopping the game
    let words = match config::load_word_list(&config.word_list_path) {
        Ok(words) => {
            tracing::info!("Loaded {} words", words.len());
            words
        }
        Err(e) => {
            tracing::warn!("{}. Words must be set manually.", e);
            Vec::new()
        }
    };

    let engine = SessionEngine::new(words, config.settings.clone());
    let state = Arc::new(AppState::new(engine));

    let app = Router::new()
        .route("/ws", get(ws::ws_handler))
        .merge(api::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
