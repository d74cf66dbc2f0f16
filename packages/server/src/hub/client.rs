use tokio::sync::mpsc;
use uuid::Uuid;

use super::message::Envelope;

/// Frames buffered per connection before the hub considers it stalled
pub const MAILBOX_CAPACITY: usize = 32;

/// Handle to one WebSocket connection, held by the hub.
///
/// Frames are pushed into a bounded mailbox and drained by the connection's
/// writer task. A push never waits: a full mailbox or a gone receiver makes
/// it fail, and the hub drops the client in response.
#[derive(Debug, Clone)]
pub struct Client {
    pub connection_id: String,
    pub game_id: String,
    sender: mpsc::Sender<String>,
}

impl Client {
    /// Create a client for a game, returning the mailbox receiver for the
    /// connection's writer task.
    pub fn new(game_id: &str) -> (Self, mpsc::Receiver<String>) {
        let (sender, receiver) = mpsc::channel(MAILBOX_CAPACITY);
        let client = Self {
            connection_id: Uuid::new_v4().simple().to_string(),
            game_id: game_id.to_string(),
            sender,
        };
        (client, receiver)
    }

    pub fn push(&self, envelope: &Envelope) -> bool {
        self.push_raw(&envelope.to_json())
    }

    pub fn push_raw(&self, frame: &str) -> bool {
        self.sender.try_send(frame.to_string()).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_push_delivers_to_mailbox() {
        // テスト項目: push したフレームがメールボックスから取り出せる
        // given (前提条件):
        let (client, mut rx) = Client::new("game-1");

        // when (操作):
        let delivered = client.push(&Envelope::start_game());

        // then (期待する結果):
        assert!(delivered);
        let frame = rx.recv().await.unwrap();
        assert!(frame.contains("startGame"));
    }

    #[tokio::test]
    async fn test_push_fails_when_mailbox_is_full() {
        // テスト項目: メールボックスが満杯のとき push が失敗する
        // given (前提条件):
        let (client, _rx) = Client::new("game-1");
        for _ in 0..MAILBOX_CAPACITY {
            assert!(client.push_raw("frame"));
        }

        // when (操作):
        let delivered = client.push_raw("one more");

        // then (期待する結果):
        assert!(!delivered);
    }

    #[tokio::test]
    async fn test_push_fails_after_receiver_is_dropped() {
        // テスト項目: 受信側が閉じた後の push が失敗する
        // given (前提条件):
        let (client, rx) = Client::new("game-1");
        drop(rx);

        // when (操作):
        let delivered = client.push_raw("frame");

        // then (期待する結果):
        assert!(!delivered);
    }
}
