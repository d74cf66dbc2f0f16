//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        end_game, game_state, health_check, join_game, questions, start_game, submit_answer,
        websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Trivia game server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(state);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance over shared application state
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Run the trivia game server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(self.state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Trivia game server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/game/{{game_id}}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Build the route table over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/game/{game_id}/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/game/start", post(start_game))
        .route("/game/join", post(join_game))
        .route("/game/end", post(end_game))
        .route("/game/{game_id}/{session_id}", get(game_state))
        .route("/answer", post(submit_answer))
        .route("/questions", get(questions))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
