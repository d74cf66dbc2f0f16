//! Realtime trivia game server library.
//!
//! This library implements the trivia game domain (questions, sessions,
//! scoring), the WebSocket hub that fans events out to the players of each
//! game, and the HTTP API on top of them.

pub mod domain;
pub mod hub;
pub mod ui;
