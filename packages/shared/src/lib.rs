//! Shared utilities for the hirameki trivia application.
//!
//! This crate provides the logging and time helpers used by both the game
//! server and the CLI client.

pub mod logger;
pub mod time;
