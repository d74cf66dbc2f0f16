use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::domain::Game;

use super::broker::GameHub;
use super::message::Envelope;

/// Seconds counted down before a multiplayer game starts
pub const COUNTDOWN_SECS: u64 = 10;

/// Run a game's start countdown on its own task.
pub(crate) fn spawn(hub: Arc<GameHub>, game: Arc<Game>) {
    tokio::spawn(run(hub, game));
}

async fn run(hub: Arc<GameHub>, game: Arc<Game>) {
    let mut ticker = time::interval(Duration::from_secs(1));
    // The first tick of a tokio interval completes immediately; consume it
    // so the first visible tick lands one second after the trigger.
    ticker.tick().await;
    for seconds_left in (1..=COUNTDOWN_SECS).rev() {
        ticker.tick().await;
        hub.broadcast(&game.id, &Envelope::countdown(seconds_left));
    }
    if game.mark_started().await {
        hub.broadcast(&game.id, &Envelope::start_game());
        tracing::info!("game {} started", game.id);
    }
}
