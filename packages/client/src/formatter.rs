//! Message formatting utilities for client display.

use hirameki_server::domain::PublicQuestion;
use hirameki_server::hub::ScoreEntry;
use hirameki_server::ui::handler::SubmitAnswerResponse;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a score roster under a title line, marking the current session
    /// with "(me)"
    ///
    /// # Arguments
    ///
    /// * `title` - Heading for the roster block
    /// * `entries` - Roster rows as sent by the server
    /// * `my_session_id` - The current player's session id
    pub fn format_roster(title: &str, entries: &[ScoreEntry], my_session_id: &str) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str(&format!("{}:\n", title));

        if entries.is_empty() {
            output.push_str("(No players)\n");
        } else {
            for entry in entries {
                let is_me = entry.session_id == my_session_id;
                let me_suffix = if is_me { " (me)" } else { "" };
                output.push_str(&format!(
                    "{}{} - {} pts\n",
                    entry.name, me_suffix, entry.score
                ));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format a player-joined notification
    pub fn format_player_joined(name: &str) -> String {
        format!("\n+ {} joined the game\n", name)
    }

    /// Format one countdown tick
    pub fn format_countdown(seconds_left: &str) -> String {
        format!("\nGame starts in {}...\n", seconds_left)
    }

    /// Format the game-started banner
    pub fn format_game_started() -> String {
        "\n\n============================================================\n\
         Game started! Answer with the option number.\n\
         ============================================================\n"
            .to_string()
    }

    /// Format one question with its options numbered from 1
    pub fn format_question(index: usize, total: usize, question: &PublicQuestion) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "\n\nQuestion {}/{}: {}\n",
            index + 1,
            total,
            question.question_text
        ));
        for (i, option) in question.options.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, option));
        }
        output
    }

    /// Format the result of one answer submission
    pub fn format_answer_result(response: &SubmitAnswerResponse) -> String {
        if response.correct && !response.already_credited {
            format!(
                "\nCorrect! Your score is now {} pts.\n",
                response.current_score
            )
        } else if response.correct {
            format!(
                "\nCorrect, but another player answered first. Your score stays at {} pts.\n",
                response.current_score
            )
        } else {
            format!("\nWrong. Your score stays at {} pts.\n", response.current_score)
        }
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
