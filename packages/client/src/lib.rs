//! Terminal client for the Hirameki trivia game.
//!
//! Talks to the game server over its HTTP API for game actions and over
//! WebSocket for realtime events (roster changes, score updates, and the
//! multiplayer start countdown).

pub mod api;
mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
