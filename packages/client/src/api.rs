//! HTTP API client for the trivia game server.

use serde::Deserialize;

use hirameki_server::ui::handler::{
    EndGameResponse, GameCreatedResponse, GameStateResponse, SubmitAnswerResponse,
};

use crate::error::ClientError;

/// Error body returned by the server on rejected requests
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Typed client for the trivia game HTTP API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for a server base URL like `http://127.0.0.1:8080`
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a game and its first session
    pub async fn start_game(
        &self,
        name: &str,
        multiplayer: bool,
        questions: usize,
    ) -> Result<GameCreatedResponse, ClientError> {
        self.post(
            "/game/start",
            &serde_json::json!({
                "name": name,
                "multiplayer": multiplayer,
                "questions": questions,
            }),
        )
        .await
    }

    /// Join an existing multiplayer game
    pub async fn join_game(
        &self,
        game_id: &str,
        name: &str,
    ) -> Result<GameCreatedResponse, ClientError> {
        self.post(
            "/game/join",
            &serde_json::json!({"gameId": game_id, "name": name}),
        )
        .await
    }

    /// Fetch the game as seen by one session
    pub async fn game_state(
        &self,
        game_id: &str,
        session_id: &str,
    ) -> Result<GameStateResponse, ClientError> {
        self.get(&format!("/game/{}/{}", game_id, session_id)).await
    }

    /// Submit one answer
    pub async fn submit_answer(
        &self,
        game_id: &str,
        session_id: &str,
        question_id: &str,
        answer: usize,
    ) -> Result<SubmitAnswerResponse, ClientError> {
        self.post(
            "/answer",
            &serde_json::json!({
                "gameId": game_id,
                "sessionId": session_id,
                "questionId": question_id,
                "answer": answer,
            }),
        )
        .await
    }

    /// Report this session done and fetch the final score
    pub async fn end_game(
        &self,
        game_id: &str,
        session_id: &str,
    ) -> Result<EndGameResponse, ClientError> {
        self.post(
            "/game/end",
            &serde_json::json!({"gameId": game_id, "sessionId": session_id}),
        )
        .await
    }

    /// WebSocket URL of a game room, derived from the base URL
    pub fn ws_url(&self, game_id: &str) -> String {
        let ws_base = self.base_url.replacen("http", "ws", 1);
        format!("{}/game/{}/ws", ws_base, game_id)
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            // The server reports the reason in an {"error": ...} body
            let reason = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            return Err(ClientError::Rejected(reason));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Protocol(e.to_string()))
    }
}
