//! Trivia game server with realtime score broadcast.
//!
//! Serves the game API over HTTP and pushes game events to connected players
//! over WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hirameki-server
//! cargo run --bin hirameki-server -- --host 0.0.0.0 --port 3000
//! cargo run --bin hirameki-server -- --questions ./questions.json
//! ```

use std::sync::Arc;

use clap::Parser;

use hirameki_server::{
    domain::{GameRegistry, QuestionBank},
    hub::GameHub,
    ui::{Server, state::AppState},
};
use hirameki_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hirameki-server")]
#[command(about = "Trivia game server with realtime score broadcast", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Path to the question bank JSON file
    #[arg(short = 'q', long, default_value = "questions.json")]
    questions: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Load the question bank up front so a broken file fails fast
    let bank = match QuestionBank::load(&args.questions) {
        Ok(bank) => bank,
        Err(e) => {
            tracing::error!("Failed to load questions from '{}': {}", args.questions, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Loaded {} questions from {}", bank.len(), args.questions);

    // Wire up the registry, the hub, and the shared state
    let games = Arc::new(GameRegistry::new());
    let hub = GameHub::spawn(games.clone());
    let state = Arc::new(AppState { games, hub, bank });

    // Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
