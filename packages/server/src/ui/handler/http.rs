//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Game, GameError, PublicQuestion},
    hub::{Envelope, ScoreEntry},
    ui::state::AppState,
};

/// Questions drawn for a game when the request does not say how many
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Request body for `POST /game/start`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameRequest {
    pub name: String,
    #[serde(default)]
    pub multiplayer: bool,
    /// Number of questions to draw; 0 means the default
    #[serde(default)]
    pub questions: usize,
}

/// Response body for `POST /game/start` and `POST /game/join`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCreatedResponse {
    pub game_id: String,
    pub session_id: String,
}

/// Request body for `POST /game/join`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGameRequest {
    pub game_id: String,
    pub name: String,
}

/// Request body for `POST /answer`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    pub game_id: String,
    pub session_id: String,
    pub question_id: String,
    pub answer: usize,
}

/// Response body for `POST /answer`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerResponse {
    pub correct: bool,
    /// The question's score was already claimed, so nothing could be won here
    pub already_credited: bool,
    pub current_score: u32,
    pub next_question_index: usize,
}

/// Request body for `POST /game/end`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndGameRequest {
    pub game_id: String,
    pub session_id: String,
}

/// Response body for `POST /game/end`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndGameResponse {
    pub final_score: u32,
    pub multiplayer: bool,
    /// Every player has finished and the game is over
    pub finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<ScoreEntry>>,
}

/// Response body for `GET /game/{game_id}/{session_id}`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateResponse {
    pub id: String,
    pub started: bool,
    pub finished: bool,
    pub multiplayer: bool,
    pub questions: Vec<PublicQuestion>,
    pub question_index: usize,
    pub current_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<bool>,
}

/// Map a domain error onto an HTTP status and a JSON error body.
fn error_response(err: GameError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match err {
        GameError::GameNotFound | GameError::SessionNotFound | GameError::QuestionNotFound => {
            StatusCode::NOT_FOUND
        }
        GameError::SinglePlayerGame | GameError::GameFinished => StatusCode::BAD_REQUEST,
        GameError::BankIo(_) | GameError::BankParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({"error": err.to_string()})))
}

/// Create a game with a fresh question draw and its first session
pub async fn start_game(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartGameRequest>,
) -> Json<GameCreatedResponse> {
    let count = if req.questions == 0 {
        DEFAULT_QUESTION_COUNT
    } else {
        req.questions
    };
    let questions = state.bank.draw(count);
    let game = Arc::new(Game::new(questions, req.multiplayer));
    let session_id = game.create_session(&req.name).await;
    let game_id = game.id.clone();
    state.games.insert(game).await;

    tracing::info!(
        "Game {} created by '{}' (multiplayer: {})",
        game_id,
        req.name,
        req.multiplayer
    );
    Json(GameCreatedResponse {
        game_id,
        session_id,
    })
}

/// Add a player to a running multiplayer game
pub async fn join_game(
    State(state): State<Arc<AppState>>,
    Json(req): Json<JoinGameRequest>,
) -> Result<Json<GameCreatedResponse>, (StatusCode, Json<serde_json::Value>)> {
    let game = state.games.get(&req.game_id).await.map_err(error_response)?;
    if !game.multiplayer {
        return Err(error_response(GameError::SinglePlayerGame));
    }
    if game.is_finished().await {
        return Err(error_response(GameError::GameFinished));
    }

    let session_id = game.create_session(&req.name).await;

    // 新しい参加者をルーム全体へ通知
    state
        .hub
        .broadcast(&game.id, &Envelope::player_joined(&req.name, &session_id));

    tracing::info!("'{}' joined game {}", req.name, game.id);
    Ok(Json(GameCreatedResponse {
        game_id: game.id.clone(),
        session_id,
    }))
}

/// Get a game snapshot as seen by one session
pub async fn game_state(
    State(state): State<Arc<AppState>>,
    Path((game_id, session_id)): Path<(String, String)>,
) -> Result<Json<GameStateResponse>, (StatusCode, Json<serde_json::Value>)> {
    let game = state.games.get(&game_id).await.map_err(error_response)?;
    let view = game
        .session_view(&session_id)
        .await
        .map_err(error_response)?;

    Ok(Json(GameStateResponse {
        id: game.id.clone(),
        started: view.started,
        finished: view.finished,
        multiplayer: game.multiplayer,
        questions: view.questions,
        question_index: view.question_index,
        current_score: view.score,
        owner: view.owner.then_some(true),
    }))
}

/// Score one answer submission
pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Result<Json<SubmitAnswerResponse>, (StatusCode, Json<serde_json::Value>)> {
    let game = state.games.get(&req.game_id).await.map_err(error_response)?;
    let outcome = game
        .submit_answer(&req.session_id, &req.question_id, req.answer)
        .await
        .map_err(error_response)?;

    // スコアが動いたときだけ他のプレイヤーへ反映
    if outcome.credited && game.multiplayer {
        let scores = game.score_snapshot().await;
        state
            .hub
            .broadcast(&game.id, &Envelope::score_update(&scores));
    }

    Ok(Json(SubmitAnswerResponse {
        correct: outcome.correct,
        already_credited: outcome.already_credited,
        current_score: outcome.score,
        next_question_index: outcome.next_question_index,
    }))
}

/// Report a session's final score and close the game once everyone is done
pub async fn end_game(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EndGameRequest>,
) -> Result<Json<EndGameResponse>, (StatusCode, Json<serde_json::Value>)> {
    let game = state.games.get(&req.game_id).await.map_err(error_response)?;
    let final_score = game
        .final_score(&req.session_id)
        .await
        .map_err(error_response)?;

    let scores = game.score_snapshot().await;
    if game.all_finished().await {
        // try_finish wins at most once, so the gameFinished broadcast cannot
        // repeat when several players call end concurrently
        if game.try_finish().await {
            tracing::info!("Game {} finished", game.id);
            state
                .hub
                .broadcast(&game.id, &Envelope::game_finished(&scores));
        }
    } else {
        state
            .hub
            .broadcast(&game.id, &Envelope::score_update(&scores));
    }

    let players = game
        .multiplayer
        .then(|| scores.iter().map(ScoreEntry::from).collect());

    Ok(Json(EndGameResponse {
        final_score,
        multiplayer: game.multiplayer,
        finished: game.is_finished().await,
        players,
    }))
}

/// Preview a sample of the question pool, with answers stripped
pub async fn questions(State(state): State<Arc<AppState>>) -> Json<Vec<PublicQuestion>> {
    Json(state.bank.public_sample(DEFAULT_QUESTION_COUNT))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status_mapping() {
        // テスト項目: ドメインエラーが適切な HTTP ステータスに写る
        // given (前提条件):
        let cases = [
            (GameError::GameNotFound, StatusCode::NOT_FOUND),
            (GameError::SessionNotFound, StatusCode::NOT_FOUND),
            (GameError::QuestionNotFound, StatusCode::NOT_FOUND),
            (GameError::SinglePlayerGame, StatusCode::BAD_REQUEST),
            (GameError::GameFinished, StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            // when (操作):
            let (status, _) = error_response(err);

            // then (期待する結果):
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_error_response_maps_bank_errors_to_500() {
        // テスト項目: 出題プールのエラーが 500 に写る
        // given (前提条件):
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();

        // when (操作):
        let (status, _) = error_response(GameError::BankParse(parse_err));

        // then (期待する結果):
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_response_body_carries_message() {
        // テスト項目: エラーボディにメッセージが載る
        // given (前提条件):

        // when (操作):
        let (_, Json(body)) = error_response(GameError::GameNotFound);

        // then (期待する結果):
        assert_eq!(body["error"], "game not found");
    }

    #[test]
    fn test_start_request_defaults() {
        // テスト項目: name だけのリクエストでデフォルト値が補われる
        // given (前提条件):
        let json = r#"{"name": "alice"}"#;

        // when (操作):
        let req: StartGameRequest = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(req.name, "alice");
        assert!(!req.multiplayer);
        assert_eq!(req.questions, 0);
    }

    #[test]
    fn test_end_response_omits_players_for_single_player() {
        // テスト項目: シングルプレイヤーの終了レスポンスに players が現れない
        // given (前提条件):
        let response = EndGameResponse {
            final_score: 40,
            multiplayer: false,
            finished: true,
            players: None,
        };

        // when (操作):
        let json = serde_json::to_string(&response).unwrap();

        // then (期待する結果):
        assert!(json.contains("\"finalScore\":40"));
        assert!(!json.contains("players"));
    }

    #[test]
    fn test_game_state_response_uses_camel_case() {
        // テスト項目: ゲーム状態レスポンスのキーが camelCase になる
        // given (前提条件):
        let response = GameStateResponse {
            id: "g1".to_string(),
            started: true,
            finished: false,
            multiplayer: true,
            questions: Vec::new(),
            question_index: 2,
            current_score: 10,
            owner: Some(true),
        };

        // when (操作):
        let json = serde_json::to_string(&response).unwrap();

        // then (期待する結果):
        assert!(json.contains("\"questionIndex\":2"));
        assert!(json.contains("\"currentScore\":10"));
        assert!(json.contains("\"owner\":true"));
    }
}
