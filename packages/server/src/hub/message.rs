//! Wire format of hub frames.
//!
//! Every frame is an [`Envelope`] whose `content` carries a JSON-encoded
//! payload string, so clients decode in two steps: the envelope first, then
//! the payload for the kinds they care about.

use serde::{Deserialize, Serialize};

use crate::domain::PlayerScore;

/// Frame kinds exchanged over a game's WebSocket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    /// A new player entered the game
    PlayerJoined,
    /// Roster snapshot pushed to a client right after it connects
    AllPlayers,
    /// Scores changed
    ScoreUpdate,
    /// The game is over; the payload carries the final roster
    GameFinished,
    /// One countdown tick before a multiplayer game starts
    StartGameCountdown,
    /// Sent by the owner to trigger the countdown, and broadcast by the
    /// server once the countdown completes
    StartGame,
    /// Free-form chat relayed to the room named by `id`
    Message,
    /// Free-form notice relayed to the room named by `recipient`
    Notification,
}

/// One frame on the wire.
///
/// `content` is itself a JSON document, encoded as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub r#type: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Payload of a [`MessageKind::PlayerJoined`] frame
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerJoinedPayload {
    pub name: String,
    pub session_id: String,
}

/// One roster row in an `allPlayers`, `scoreUpdate`, or `gameFinished`
/// payload. Scores travel as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub name: String,
    pub session_id: String,
    pub score: String,
}

impl From<&PlayerScore> for ScoreEntry {
    fn from(score: &PlayerScore) -> Self {
        Self {
            name: score.name.clone(),
            session_id: score.session_id.clone(),
            score: score.score.to_string(),
        }
    }
}

/// Payload of a [`MessageKind::StartGameCountdown`] frame
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownPayload {
    pub seconds_left: String,
}

/// Payload of a server-sent [`MessageKind::StartGame`] frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGamePayload {
    pub message: String,
}

impl Envelope {
    fn event(kind: MessageKind, content: String) -> Self {
        Self {
            r#type: kind,
            sender: None,
            recipient: None,
            content,
            id: None,
        }
    }

    pub fn player_joined(name: &str, session_id: &str) -> Self {
        let payload = PlayerJoinedPayload {
            name: name.to_string(),
            session_id: session_id.to_string(),
        };
        Self::event(
            MessageKind::PlayerJoined,
            serde_json::to_string(&payload).unwrap(),
        )
    }

    fn roster(kind: MessageKind, scores: &[PlayerScore]) -> Self {
        let entries: Vec<ScoreEntry> = scores.iter().map(ScoreEntry::from).collect();
        Self::event(kind, serde_json::to_string(&entries).unwrap())
    }

    pub fn all_players(scores: &[PlayerScore]) -> Self {
        Self::roster(MessageKind::AllPlayers, scores)
    }

    pub fn score_update(scores: &[PlayerScore]) -> Self {
        Self::roster(MessageKind::ScoreUpdate, scores)
    }

    pub fn game_finished(scores: &[PlayerScore]) -> Self {
        Self::roster(MessageKind::GameFinished, scores)
    }

    pub fn countdown(seconds_left: u64) -> Self {
        let payload = CountdownPayload {
            seconds_left: seconds_left.to_string(),
        };
        Self::event(
            MessageKind::StartGameCountdown,
            serde_json::to_string(&payload).unwrap(),
        )
    }

    pub fn start_game() -> Self {
        let payload = StartGamePayload {
            message: "Game is starting".to_string(),
        };
        Self::event(
            MessageKind::StartGame,
            serde_json::to_string(&payload).unwrap(),
        )
    }

    /// The frame an owner sends to start its game's countdown.
    pub fn start_trigger(game_id: &str) -> Self {
        Self {
            r#type: MessageKind::StartGame,
            sender: None,
            recipient: None,
            content: "{}".to_string(),
            id: Some(game_id.to_string()),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}
