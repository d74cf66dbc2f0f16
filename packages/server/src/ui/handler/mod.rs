//! HTTP and WebSocket endpoint handlers.

mod http;
mod websocket;

pub use http::{
    DEFAULT_QUESTION_COUNT, EndGameRequest, EndGameResponse, GameCreatedResponse,
    GameStateResponse, JoinGameRequest, StartGameRequest, SubmitAnswerRequest,
    SubmitAnswerResponse, end_game, game_state, health_check, join_game, questions, start_game,
    submit_answer,
};
pub use websocket::websocket_handler;
