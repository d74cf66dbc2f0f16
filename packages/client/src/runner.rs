//! Client execution logic with reconnection support.

use std::time::Duration;

use crate::{
    api::ApiClient,
    domain::{should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    session::run_session,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Create or join a game over the HTTP API, then run the game session with
/// reconnection on lost connections
pub async fn run_client(
    server_url: String,
    name: String,
    join: Option<String>,
    multiplayer: bool,
    questions: usize,
) -> Result<(), ClientError> {
    let api = ApiClient::new(&server_url);

    let created = match &join {
        Some(game_id) => api.join_game(game_id, &name).await?,
        None => api.start_game(&name, multiplayer, questions).await?,
    };
    if join.is_none() && multiplayer {
        println!(
            "Game created. Others can join with: --join {}",
            created.game_id
        );
    }

    let mut reconnect_count = 0;
    loop {
        tracing::info!(
            "Connecting to game {} as '{}' (attempt {}/{})",
            created.game_id,
            name,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_session(&api, &name, &created.game_id, &created.session_id).await {
            Ok(()) => {
                tracing::info!("Session ended normally");
                // If the session ended normally (user exit), don't reconnect
                break;
            }
            Err(e) => {
                if should_exit_immediately(&e) {
                    return Err(e);
                }

                tracing::warn!("Connection lost: {}", e);
                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }
                reconnect_count += 1;

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );
                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}
