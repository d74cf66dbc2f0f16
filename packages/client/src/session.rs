//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use hirameki_server::hub::{CountdownPayload, Envelope, MessageKind, PlayerJoinedPayload, ScoreEntry};

use crate::{
    api::ApiClient,
    domain::{Command, parse_command},
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

fn roster_entries(content: &str) -> Option<Vec<ScoreEntry>> {
    serde_json::from_str(content).ok()
}

/// Run one game session over the WebSocket room and the HTTP API
pub async fn run_session(
    api: &ApiClient,
    name: &str,
    game_id: &str,
    session_id: &str,
) -> Result<(), ClientError> {
    // Fetch the game before connecting so a bad id fails fast
    let view = api.game_state(game_id, session_id).await?;

    let url = api.ws_url(game_id);
    let (ws_stream, response) = match connect_async(&url).await {
        Ok(result) => result,
        Err(e) => {
            // Check if it's an HTTP error response
            let error_msg = e.to_string();

            // Check for HTTP 404 Not Found
            if error_msg.contains("404") || error_msg.contains("Not Found") {
                return Err(ClientError::Rejected(format!(
                    "game '{}' is not on the server",
                    game_id
                )));
            }

            return Err(ClientError::Connection(error_msg));
        }
    };

    // Check HTTP status code from response
    if response.status().as_u16() == 404 {
        return Err(ClientError::Rejected(format!(
            "game '{}' is not on the server",
            game_id
        )));
    }

    tracing::info!("Connected to game {}", game_id);
    println!(
        "\nYou are '{}'. Answer with the option number. Commands: /start, /end, /quit.\n",
        name
    );
    if !view.started {
        println!("Waiting for the game to start. The owner can type /start.");
    }
    if let Some(question) = view.questions.get(view.question_index) {
        print!(
            "{}",
            MessageFormatter::format_question(view.question_index, view.questions.len(), question)
        );
    }

    let (mut write, mut read) = ws_stream.split();

    // Clone identifiers for the read task
    let name_for_read = name.to_string();
    let session_id_for_read = session_id.to_string();

    // Spawn a task to handle incoming frames
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<Envelope>(&text) {
                        Ok(envelope) => match envelope.r#type {
                            MessageKind::AllPlayers => {
                                roster_entries(&envelope.content).map(|entries| {
                                    MessageFormatter::format_roster(
                                        "Players",
                                        &entries,
                                        &session_id_for_read,
                                    )
                                })
                            }
                            MessageKind::ScoreUpdate => {
                                roster_entries(&envelope.content).map(|entries| {
                                    MessageFormatter::format_roster(
                                        "Scores",
                                        &entries,
                                        &session_id_for_read,
                                    )
                                })
                            }
                            MessageKind::GameFinished => {
                                roster_entries(&envelope.content).map(|entries| {
                                    MessageFormatter::format_roster(
                                        "Final scores",
                                        &entries,
                                        &session_id_for_read,
                                    )
                                })
                            }
                            MessageKind::PlayerJoined => {
                                serde_json::from_str::<PlayerJoinedPayload>(&envelope.content)
                                    .ok()
                                    .map(|p| MessageFormatter::format_player_joined(&p.name))
                            }
                            MessageKind::StartGameCountdown => {
                                serde_json::from_str::<CountdownPayload>(&envelope.content)
                                    .ok()
                                    .map(|p| MessageFormatter::format_countdown(&p.seconds_left))
                            }
                            MessageKind::StartGame => Some(MessageFormatter::format_game_started()),
                            MessageKind::Message | MessageKind::Notification => {
                                Some(MessageFormatter::format_raw_message(&envelope.content))
                            }
                        },
                        Err(_) => None,
                    };

                    // If decoding fails, display the frame as raw text
                    let formatted = formatted
                        .unwrap_or_else(|| MessageFormatter::format_raw_message(&text));
                    print!("{}", formatted);
                    redisplay_prompt(&name_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Clone identifiers for the input loop
    let name_owned = name.to_string();
    let name_for_prompt = name_owned.clone();

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", name_for_prompt);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to handle player input: answers go through the HTTP API,
    // the start trigger goes over the WebSocket
    let api_for_play = api.clone();
    let game_id_owned = game_id.to_string();
    let session_id_owned = session_id.to_string();
    let questions = view.questions;
    let mut question_index = view.question_index;
    let mut play_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let option_count = questions
                .get(question_index)
                .map_or(0, |q| q.options.len());

            match parse_command(&line, option_count) {
                Command::Start => {
                    let trigger = Envelope::start_trigger(&game_id_owned).to_json();
                    if let Err(e) = write.send(Message::Text(trigger.into())).await {
                        tracing::warn!("Failed to send start trigger: {}", e);
                        write_error = true;
                        break;
                    }
                    println!("Start requested.");
                    redisplay_prompt(&name_owned);
                }
                Command::Answer(choice) => {
                    let question = &questions[question_index];
                    match api_for_play
                        .submit_answer(&game_id_owned, &session_id_owned, &question.id, choice)
                        .await
                    {
                        Ok(result) => {
                            print!("{}", MessageFormatter::format_answer_result(&result));
                            question_index = result.next_question_index;
                            if let Some(next) = questions.get(question_index) {
                                print!(
                                    "{}",
                                    MessageFormatter::format_question(
                                        question_index,
                                        questions.len(),
                                        next
                                    )
                                );
                                redisplay_prompt(&name_owned);
                            } else {
                                // Out of questions: close this session out
                                match api_for_play
                                    .end_game(&game_id_owned, &session_id_owned)
                                    .await
                                {
                                    Ok(ended) => {
                                        println!(
                                            "\nAll questions answered! Final score: {} pts.",
                                            ended.final_score
                                        );
                                        if !ended.finished {
                                            println!("Other players are still answering.");
                                        }
                                    }
                                    Err(e) => tracing::error!("Failed to end game: {}", e),
                                }
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::error!("Failed to submit answer: {}", e);
                            redisplay_prompt(&name_owned);
                        }
                    }
                }
                Command::End => {
                    match api_for_play
                        .end_game(&game_id_owned, &session_id_owned)
                        .await
                    {
                        Ok(ended) => {
                            println!("\nFinal score: {} pts.", ended.final_score);
                            if !ended.finished {
                                println!("Other players are still answering.");
                            }
                        }
                        Err(e) => tracing::error!("Failed to end game: {}", e),
                    }
                    break;
                }
                Command::Quit => {
                    break;
                }
                Command::Invalid => {
                    println!("Commands: /start, /end, /quit, or an option number.");
                    redisplay_prompt(&name_owned);
                }
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            play_task.abort();
            let connection_error = read_result.unwrap_or(false);
            if connection_error {
                return Err(ClientError::Connection("Connection lost".to_string()));
            }
        }
        play_result = &mut play_task => {
            read_task.abort();
            let write_error = play_result.unwrap_or(false);
            if write_error {
                return Err(ClientError::Connection("Connection lost".to_string()));
            }
        }
    }

    Ok(())
}
