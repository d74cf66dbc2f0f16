//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::Game,
    hub::{Client, Envelope},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let game = match state.games.get(&game_id).await {
        Ok(game) => game,
        Err(_) => {
            tracing::warn!("WebSocket connection for unknown game '{}'", game_id);
            return Err(StatusCode::NOT_FOUND);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, game)))
}

/// Spawns a task that drains a client's mailbox and pushes each frame to the
/// WebSocket sender.
///
/// This function handles the outbound flow: frames queued by the hub (via the
/// client's mailbox) are sent to this client's WebSocket connection.
///
/// # Arguments
///
/// * `rx` - Mailbox receiver for frames queued by the hub
/// * `sender` - WebSocket sink to send frames to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            // Send the frame to this client
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, game: Arc<Game>) {
    let (client, rx) = Client::new(&game.id);
    let connection_id = client.connection_id.clone();
    let game_id = client.game_id.clone();

    // Queue the current roster for the new client before the hub can put
    // other frames in front of it
    let scores = game.score_snapshot().await;
    if !client.push(&Envelope::all_players(&scores))
        || !client.push(&Envelope::score_update(&scores))
    {
        tracing::error!("Failed to queue roster for connection '{}'", connection_id);
        return;
    }

    // The room entry keeps the only durable sender from here on, so an
    // eviction closes the mailbox and tears the connection down
    state.hub.register(client);
    tracing::info!("Connection '{}' joined game {}", connection_id, game_id);

    let (sender, mut receiver) = socket.split();

    // Spawn a task to push hub frames to this client
    let mut send_task = pusher_loop(rx, sender);

    // Spawn a task to receive frames from this client
    let hub = state.hub.clone();
    let connection_id_clone = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match serde_json::from_str::<Envelope>(&text) {
                    Ok(envelope) => hub.dispatch(envelope),
                    Err(e) => {
                        tracing::warn!("Dropping unparseable frame: {}", e);
                    }
                },
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.hub.unregister(&game_id, &connection_id);
    tracing::info!("Connection '{}' left game {}", connection_id, game_id);
}
