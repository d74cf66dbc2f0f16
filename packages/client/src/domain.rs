//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use crate::error::ClientError;

/// A line of player input, decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Trigger the multiplayer start countdown
    Start,
    /// Finish the game and show the final score
    End,
    /// Leave without ending the game
    Quit,
    /// Answer the current question with a 0-based option index
    Answer(usize),
    /// Anything unrecognized
    Invalid,
}

/// Decode one line of player input.
///
/// Option numbers are 1-based on the prompt, so `1` selects option index 0.
///
/// # Arguments
///
/// * `input` - The raw line typed by the player
/// * `option_count` - Number of options on the current question
pub fn parse_command(input: &str, option_count: usize) -> Command {
    match input.trim() {
        "/start" => Command::Start,
        "/end" => Command::End,
        "/quit" | "/exit" => Command::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 && n <= option_count => Command::Answer(n - 1),
            _ => Command::Invalid,
        },
    }
}

/// Check if the client should exit immediately based on the error type.
///
/// Only connection losses are worth retrying; a rejection or a malformed
/// response will not get better on its own.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    !matches!(error, ClientError::Connection(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
///
/// # Returns
///
/// `true` if reconnection should be attempted, `false` otherwise
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}
