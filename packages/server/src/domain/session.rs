//! Per-player session state within a game.

use std::collections::HashSet;

/// State of one player inside one game.
///
/// `submitted` records every question this session has submitted an answer
/// for, so a resubmission can never advance progress or score twice.
#[derive(Debug, Clone)]
pub struct PlayerSession {
    pub name: String,
    pub score: u32,
    pub question_index: usize,
    pub finished_at: Option<i64>,
    pub submitted: HashSet<String>,
}

impl PlayerSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            question_index: 0,
            finished_at: None,
            submitted: HashSet::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }
}

/// One player's score, as read under the game lock for roster broadcasts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerScore {
    pub session_id: String,
    pub name: String,
    pub score: u32,
}
