//! Realtime message hub.
//!
//! Every WebSocket connection registers a [`Client`] with the [`GameHub`],
//! which groups clients into per-game rooms and fans frames out to them.
//! Inbound frames are routed by [`Envelope`] kind; a `startGame` trigger
//! spawns the shared countdown for its game.

mod broker;
mod client;
mod countdown;
mod message;

pub use broker::GameHub;
pub use client::{Client, MAILBOX_CAPACITY};
pub use countdown::COUNTDOWN_SECS;
pub use message::{
    CountdownPayload, Envelope, MessageKind, PlayerJoinedPayload, ScoreEntry, StartGamePayload,
};
