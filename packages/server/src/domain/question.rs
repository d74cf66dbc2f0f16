//! Trivia questions and the bank they are drawn from.

use std::path::Path;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::error::GameError;

/// A single trivia question.
///
/// `answered_by` holds the session that claimed the score credit for this
/// question within one game. It is runtime state and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(skip)]
    pub answered_by: Option<String>,
}

/// A question as exposed to players: no correct answer, no credit marker
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: String,
    pub question_text: String,
    pub options: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            question_text: question.question_text.clone(),
            options: question.options.clone(),
        }
    }
}

/// The pool of questions new games draw from, loaded once at startup
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Load the bank from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let raw = std::fs::read_to_string(path)?;
        let questions: Vec<Question> = serde_json::from_str(&raw)?;
        Ok(Self::new(questions))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Draw up to `count` questions in random order, answers included.
    pub fn draw(&self, count: usize) -> Vec<Question> {
        let mut drawn = self.questions.clone();
        drawn.shuffle(&mut rand::rng());
        drawn.truncate(count);
        drawn
    }

    /// Draw up to `count` questions in random order, stripped for players.
    pub fn public_sample(&self, count: usize) -> Vec<PublicQuestion> {
        self.draw(count).iter().map(PublicQuestion::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bank() -> QuestionBank {
        let questions = (1..=5)
            .map(|n| Question {
                id: format!("q{}", n),
                question_text: format!("Question {}?", n),
                options: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                correct_index: 0,
                answered_by: None,
            })
            .collect();
        QuestionBank::new(questions)
    }

    #[test]
    fn test_draw_returns_requested_count() {
        // テスト項目: draw が指定された数の問題を返す
        // given (前提条件):
        let bank = sample_bank();

        // when (操作):
        let drawn = bank.draw(3);

        // then (期待する結果):
        assert_eq!(drawn.len(), 3);
    }

    #[test]
    fn test_draw_is_capped_at_bank_size() {
        // テスト項目: バンクの問題数を超える要求はバンク全体を返す
        // given (前提条件):
        let bank = sample_bank();

        // when (操作):
        let drawn = bank.draw(100);

        // then (期待する結果):
        assert_eq!(drawn.len(), 5);
    }

    #[test]
    fn test_draw_keeps_correct_index() {
        // テスト項目: draw された問題は正解インデックスを保持する
        // given (前提条件):
        let bank = sample_bank();

        // when (操作):
        let drawn = bank.draw(5);

        // then (期待する結果):
        assert!(drawn.iter().all(|q| q.correct_index == 0));
        assert!(drawn.iter().all(|q| q.answered_by.is_none()));
    }

    #[test]
    fn test_public_sample_strips_answers() {
        // テスト項目: public_sample が正解情報を含まない問題を返す
        // given (前提条件):
        let bank = sample_bank();

        // when (操作):
        let sample = bank.public_sample(5);

        // then (期待する結果):
        assert_eq!(sample.len(), 5);
        let json = serde_json::to_string(&sample).unwrap();
        assert!(!json.contains("correctIndex"));
        assert!(!json.contains("answered"));
    }

    #[test]
    fn test_question_json_uses_camel_case_fields() {
        // テスト項目: 問題ファイルの JSON フィールド名で問題をパースできる
        // given (前提条件):
        let raw = r#"[
            {
                "id": "q1",
                "questionText": "What is 2 + 2?",
                "options": ["3", "4", "5"],
                "correctIndex": 1
            }
        ]"#;

        // when (操作):
        let questions: Vec<Question> = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "q1");
        assert_eq!(questions[0].question_text, "What is 2 + 2?");
        assert_eq!(questions[0].correct_index, 1);
        assert!(questions[0].answered_by.is_none());
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        // テスト項目: 不正な JSON ファイルの読み込みがエラーになる
        // given (前提条件):
        let dir = std::env::temp_dir();
        let path = dir.join("hirameki_invalid_questions.json");
        std::fs::write(&path, "not json").unwrap();

        // when (操作):
        let result = QuestionBank::load(&path);

        // then (期待する結果):
        assert!(matches!(result, Err(GameError::BankParse(_))));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_rejects_missing_file() {
        // テスト項目: 存在しないファイルの読み込みがエラーになる
        // given (前提条件):
        let path = "/nonexistent/questions.json";

        // when (操作):
        let result = QuestionBank::load(path);

        // then (期待する結果):
        assert!(matches!(result, Err(GameError::BankIo(_))));
    }
}
