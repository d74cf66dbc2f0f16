//! Error types for the game domain.

use thiserror::Error;

/// Errors returned by game lookups and game state operations
#[derive(Debug, Error)]
pub enum GameError {
    /// No game with the requested id exists
    #[error("game not found")]
    GameNotFound,

    /// The session id is not part of the game
    #[error("session not found")]
    SessionNotFound,

    /// The question id is not part of the game
    #[error("question not found")]
    QuestionNotFound,

    /// Joining is only possible for multiplayer games
    #[error("cannot join a single player game")]
    SinglePlayerGame,

    /// The game already finished
    #[error("game has already finished")]
    GameFinished,

    /// The question bank file could not be read
    #[error("failed to read question bank: {0}")]
    BankIo(#[from] std::io::Error),

    /// The question bank file could not be parsed
    #[error("failed to parse question bank: {0}")]
    BankParse(#[from] serde_json::Error),
}
