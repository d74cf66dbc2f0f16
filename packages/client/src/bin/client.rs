//! Terminal trivia client with realtime score updates.
//!
//! Creates or joins a game over the server's HTTP API, then connects to the
//! game's WebSocket room for roster, countdown, and score events. Answers are
//! submitted by typing the option number; `/start` triggers the multiplayer
//! countdown.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hirameki-client -- --name Alice --multiplayer
//! cargo run --bin hirameki-client -- --name Bob --join <game_id>
//! ```

use clap::Parser;

use hirameki_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hirameki-client")]
#[command(about = "CLI trivia client with realtime score updates", long_about = None)]
struct Args {
    /// Player name shown to the other players
    #[arg(short = 'n', long)]
    name: String,

    /// Server base URL
    #[arg(short = 'u', long, default_value = "http://127.0.0.1:8080")]
    url: String,

    /// Join an existing game by id instead of creating one
    #[arg(short = 'j', long)]
    join: Option<String>,

    /// Create the game as multiplayer so others can join
    #[arg(short = 'm', long)]
    multiplayer: bool,

    /// Number of questions for a new game (0 = server default)
    #[arg(short = 'q', long, default_value = "0")]
    questions: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = hirameki_client::run_client(
        args.url,
        args.name,
        args.join,
        args.multiplayer,
        args.questions,
    )
    .await
    {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
