use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::domain::GameRegistry;

use super::client::Client;
use super::countdown;
use super::message::{Envelope, MessageKind};

type RoomMap = HashMap<String, HashMap<String, Client>>;

/// Fan-out hub for all live games.
///
/// A single loop task owns every room mutation: connections register and
/// unregister through channels, and inbound frames are routed by that same
/// loop, so membership changes never race with fan-out. [`GameHub::broadcast`]
/// delivers from outside the loop using a membership snapshot and schedules
/// the removal of clients it fails to reach.
pub struct GameHub {
    rooms: Mutex<RoomMap>,
    register_tx: mpsc::UnboundedSender<Client>,
    unregister_tx: mpsc::UnboundedSender<(String, String)>,
    dispatch_tx: mpsc::UnboundedSender<Envelope>,
    games: Arc<GameRegistry>,
}

impl GameHub {
    /// Start the hub loop and return a handle to it.
    pub fn spawn(games: Arc<GameRegistry>) -> Arc<Self> {
        let (register_tx, register_rx) = mpsc::unbounded_channel();
        let (unregister_tx, unregister_rx) = mpsc::unbounded_channel();
        let (dispatch_tx, dispatch_rx) = mpsc::unbounded_channel();
        let hub = Arc::new(Self {
            rooms: Mutex::new(HashMap::new()),
            register_tx,
            unregister_tx,
            dispatch_tx,
            games,
        });
        tokio::spawn(Self::run(
            hub.clone(),
            register_rx,
            unregister_rx,
            dispatch_rx,
        ));
        hub
    }

    async fn run(
        self: Arc<Self>,
        mut register_rx: mpsc::UnboundedReceiver<Client>,
        mut unregister_rx: mpsc::UnboundedReceiver<(String, String)>,
        mut dispatch_rx: mpsc::UnboundedReceiver<Envelope>,
    ) {
        // Games whose countdown already ran or is running
        let mut counting: HashSet<String> = HashSet::new();
        loop {
            tokio::select! {
                Some(client) = register_rx.recv() => {
                    self.add_client(client);
                }
                Some((game_id, connection_id)) = unregister_rx.recv() => {
                    self.remove_client(&game_id, &connection_id);
                }
                Some(envelope) = dispatch_rx.recv() => {
                    self.clone().route(envelope, &mut counting).await;
                }
                else => break,
            }
        }
        tracing::debug!("hub loop stopped");
    }

    fn add_client(&self, client: Client) {
        let game_id = client.game_id.clone();
        let mut rooms = self.rooms.lock().unwrap();
        let room = rooms.entry(game_id.clone()).or_default();
        room.insert(client.connection_id.clone(), client);
        tracing::debug!("client joined room {} ({} connected)", game_id, room.len());
    }

    fn remove_client(&self, game_id: &str, connection_id: &str) {
        let mut rooms = self.rooms.lock().unwrap();
        if let Some(room) = rooms.get_mut(game_id) {
            if room.remove(connection_id).is_some() {
                tracing::debug!("client left room {} ({} connected)", game_id, room.len());
            }
        }
    }

    async fn route(self: Arc<Self>, envelope: Envelope, counting: &mut HashSet<String>) {
        match envelope.r#type {
            MessageKind::StartGame => {
                let Some(game_id) = envelope.id else {
                    tracing::warn!("start trigger without a game id; ignoring");
                    return;
                };
                if counting.contains(&game_id) {
                    tracing::debug!("countdown already running for game {}", game_id);
                    return;
                }
                let game = match self.games.get(&game_id).await {
                    Ok(game) => game,
                    Err(_) => {
                        tracing::warn!("start trigger for unknown game {}; ignoring", game_id);
                        return;
                    }
                };
                if game.is_started().await {
                    tracing::debug!("game {} is already started", game_id);
                    return;
                }
                counting.insert(game_id);
                countdown::spawn(self, game);
            }
            MessageKind::Message
            | MessageKind::PlayerJoined
            | MessageKind::ScoreUpdate
            | MessageKind::AllPlayers
            | MessageKind::GameFinished => {
                if let Some(room_id) = &envelope.id {
                    self.fan_out(room_id, &envelope);
                }
            }
            MessageKind::Notification => {
                if let Some(room_id) = &envelope.recipient {
                    self.fan_out(room_id, &envelope);
                }
            }
            MessageKind::StartGameCountdown => {
                tracing::debug!("ignoring inbound countdown frame");
            }
        }
    }

    /// Deliver a frame to everyone in a room, evicting clients whose mailbox
    /// is full or gone. Only the hub loop calls this.
    fn fan_out(&self, room_id: &str, envelope: &Envelope) {
        let frame = envelope.to_json();
        let mut rooms = self.rooms.lock().unwrap();
        let Some(room) = rooms.get_mut(room_id) else {
            tracing::debug!("no clients in room {}", room_id);
            return;
        };
        room.retain(|connection_id, client| {
            let delivered = client.push_raw(&frame);
            if !delivered {
                tracing::warn!(
                    "evicting stalled client {} from room {}",
                    connection_id,
                    room_id
                );
            }
            delivered
        });
    }

    /// Snapshot of a room's clients. Membership can change the moment this
    /// returns; callers must tolerate a stale snapshot.
    pub fn clients_of(&self, game_id: &str) -> Vec<Client> {
        let rooms = self.rooms.lock().unwrap();
        rooms
            .get(game_id)
            .map(|room| room.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Deliver a frame to everyone in a room from outside the hub loop.
    pub fn broadcast(&self, room_id: &str, envelope: &Envelope) {
        let frame = envelope.to_json();
        for client in self.clients_of(room_id) {
            if !client.push_raw(&frame) {
                tracing::warn!(
                    "evicting stalled client {} from room {}",
                    client.connection_id,
                    room_id
                );
                self.unregister(&client.game_id, &client.connection_id);
            }
        }
    }

    /// Hand a connection over to the hub. The room entry keeps the only
    /// durable sender, so dropping it closes the connection's mailbox.
    pub fn register(&self, client: Client) {
        if self.register_tx.send(client).is_err() {
            tracing::warn!("hub loop is gone; dropping registration");
        }
    }

    pub fn unregister(&self, game_id: &str, connection_id: &str) {
        if self
            .unregister_tx
            .send((game_id.to_string(), connection_id.to_string()))
            .is_err()
        {
            tracing::warn!("hub loop is gone; dropping unregistration");
        }
    }

    /// Queue an inbound frame for routing.
    pub fn dispatch(&self, envelope: Envelope) {
        if self.dispatch_tx.send(envelope).is_err() {
            tracing::warn!("hub loop is gone; dropping frame");
        }
    }
}
