//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::{GameRegistry, QuestionBank};
use crate::hub::GameHub;

/// Shared application state
pub struct AppState {
    /// GameRegistry（稼働中ゲームの台帳）
    pub games: Arc<GameRegistry>,
    /// GameHub（WebSocket 配信の中継役）
    pub hub: Arc<GameHub>,
    /// QuestionBank（出題プール）
    pub bank: QuestionBank,
}
