//! Time utilities shared by the server and the client.

use chrono::Utc;

/// Get current Unix timestamp in milliseconds (UTC)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_returns_positive_value() {
        // テスト項目: now_millis が正の値を返す
        // given (前提条件):

        // when (操作):
        let timestamp = now_millis();

        // then (期待する結果):
        assert!(timestamp > 0);
    }

    #[test]
    fn test_now_millis_returns_increasing_timestamps() {
        // テスト項目: now_millis が呼び出すたびに増加するタイムスタンプを返す
        // given (前提条件):

        // when (操作):
        let timestamp1 = now_millis();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let timestamp2 = now_millis();

        // then (期待する結果):
        assert!(timestamp2 >= timestamp1);
    }
}
