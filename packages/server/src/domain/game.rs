//! Game state and the registry of live games.
//!
//! All mutable state of one game lives behind a single lock, so every
//! operation observes and modifies sessions, questions, and lifecycle stamps
//! atomically. The first correct answer to a question wins its score credit;
//! later correct answers see `already_credited`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use hirameki_shared::time::now_millis;

use super::{
    error::GameError,
    question::{PublicQuestion, Question},
    session::{PlayerScore, PlayerSession},
};

/// Points awarded for the first correct answer to a question
pub const SCORE_AWARD: u32 = 10;

fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Mutable state of one game, guarded by a single lock
#[derive(Debug)]
struct GameState {
    questions: Vec<Question>,
    sessions: HashMap<String, PlayerSession>,
    owner: Option<String>,
    started_at: Option<i64>,
    finished_at: Option<i64>,
}

/// One trivia game: its question set, its players, and its lifecycle
#[derive(Debug)]
pub struct Game {
    pub id: String,
    pub multiplayer: bool,
    state: Mutex<GameState>,
}

/// Result of one answer submission
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    /// The submitted option was the correct one
    pub correct: bool,
    /// The score credit was awarded to this session just now
    pub credited: bool,
    /// The question's credit was already claimed, so no score could move
    /// regardless of correctness
    pub already_credited: bool,
    /// The session's score after the submission
    pub score: u32,
    /// The session's next question index after the submission
    pub next_question_index: usize,
}

/// Snapshot of a game as seen by one session
#[derive(Debug, Clone)]
pub struct SessionView {
    pub started: bool,
    pub finished: bool,
    pub owner: bool,
    pub question_index: usize,
    pub score: u32,
    pub questions: Vec<PublicQuestion>,
}

impl Game {
    /// Create a game over the given question set.
    ///
    /// Single player games are started from the moment they exist;
    /// multiplayer games start once their countdown completes.
    pub fn new(questions: Vec<Question>, multiplayer: bool) -> Self {
        let started_at = if multiplayer { None } else { Some(now_millis()) };
        Self {
            id: generate_id(),
            multiplayer,
            state: Mutex::new(GameState {
                questions,
                sessions: HashMap::new(),
                owner: None,
                started_at,
                finished_at: None,
            }),
        }
    }

    /// Register a new player and return the session id. The first session of
    /// a game becomes its owner.
    pub async fn create_session(&self, name: &str) -> String {
        let mut state = self.state.lock().await;
        let session_id = generate_id();
        if state.owner.is_none() {
            state.owner = Some(session_id.clone());
        }
        state
            .sessions
            .insert(session_id.clone(), PlayerSession::new(name));
        session_id
    }

    /// Score one answer submission.
    ///
    /// Each session gets one scored attempt per question: a repeated
    /// submission returns the current state without changing anything. A
    /// fresh submission always advances the session's question index, and
    /// the last question stamps the session finished.
    pub async fn submit_answer(
        &self,
        session_id: &str,
        question_id: &str,
        answer_index: usize,
    ) -> Result<AnswerOutcome, GameError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let question_total = state.questions.len();

        let session = state
            .sessions
            .get_mut(session_id)
            .ok_or(GameError::SessionNotFound)?;
        let question = state
            .questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or(GameError::QuestionNotFound)?;

        let correct = question.correct_index == answer_index;

        if session.submitted.contains(question_id) {
            return Ok(AnswerOutcome {
                correct,
                credited: false,
                already_credited: question.answered_by.is_some(),
                score: session.score,
                next_question_index: session.question_index,
            });
        }
        session.submitted.insert(question_id.to_string());

        let mut credited = false;
        if correct && question.answered_by.is_none() {
            question.answered_by = Some(session_id.to_string());
            session.score += SCORE_AWARD;
            credited = true;
        }

        session.question_index += 1;
        if session.question_index >= question_total && session.finished_at.is_none() {
            session.finished_at = Some(now_millis());
        }

        Ok(AnswerOutcome {
            correct,
            credited,
            already_credited: question.answered_by.is_some() && !credited,
            score: session.score,
            next_question_index: session.question_index,
        })
    }

    /// Snapshot the game from one session's point of view.
    pub async fn session_view(&self, session_id: &str) -> Result<SessionView, GameError> {
        let state = self.state.lock().await;
        let session = state
            .sessions
            .get(session_id)
            .ok_or(GameError::SessionNotFound)?;
        Ok(SessionView {
            started: state.started_at.is_some(),
            finished: state.finished_at.is_some(),
            owner: state.owner.as_deref() == Some(session_id),
            question_index: session.question_index,
            score: session.score,
            questions: state.questions.iter().map(PublicQuestion::from).collect(),
        })
    }

    pub async fn final_score(&self, session_id: &str) -> Result<u32, GameError> {
        let state = self.state.lock().await;
        state
            .sessions
            .get(session_id)
            .map(|session| session.score)
            .ok_or(GameError::SessionNotFound)
    }

    /// True once every session has submitted its last question.
    pub async fn all_finished(&self) -> bool {
        let state = self.state.lock().await;
        state.sessions.values().all(PlayerSession::is_finished)
    }

    /// Stamp the game started. Returns false when it already was.
    pub async fn mark_started(&self) -> bool {
        let mut state = self.state.lock().await;
        if state.started_at.is_some() {
            return false;
        }
        state.started_at = Some(now_millis());
        true
    }

    /// Stamp the game finished. Returns false when it already was.
    pub async fn try_finish(&self) -> bool {
        let mut state = self.state.lock().await;
        if state.finished_at.is_some() {
            return false;
        }
        state.finished_at = Some(now_millis());
        true
    }

    pub async fn is_started(&self) -> bool {
        self.state.lock().await.started_at.is_some()
    }

    pub async fn is_finished(&self) -> bool {
        self.state.lock().await.finished_at.is_some()
    }

    /// Scores of every player, ordered by session id for stable output.
    pub async fn score_snapshot(&self) -> Vec<PlayerScore> {
        let state = self.state.lock().await;
        let mut scores: Vec<PlayerScore> = state
            .sessions
            .iter()
            .map(|(session_id, session)| PlayerScore {
                session_id: session_id.clone(),
                name: session.name.clone(),
                score: session.score,
            })
            .collect();
        scores.sort_by(|a, b| a.session_id.cmp(&b.session_id));
        scores
    }
}

/// All live games, looked up by id.
///
/// Handlers and the hub share one registry instance through an [`Arc`].
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: Mutex<HashMap<String, Arc<Game>>>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, game: Arc<Game>) {
        self.games.lock().await.insert(game.id.clone(), game);
    }

    pub async fn get(&self, game_id: &str) -> Result<Arc<Game>, GameError> {
        self.games
            .lock()
            .await
            .get(game_id)
            .cloned()
            .ok_or(GameError::GameNotFound)
    }
}
