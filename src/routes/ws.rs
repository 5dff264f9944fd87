//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.
//!
//! The running score lives with the connection: one session per child, reset
//! on reconnect.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::logic::*;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "findairline_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "findairline_backend", "WebSocket connected");
  let mut score: u32 = 0;
  let mut answered: u32 = 0;
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "findairline_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state, &mut score, &mut answered).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "findairline_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "findairline_backend", "WebSocket disconnected");
}

#[instrument(level = "info", skip(state, score, answered))]
async fn handle_client_ws(
  msg: ClientWsMessage,
  state: &AppState,
  score: &mut u32,
  answered: &mut u32,
) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::NewQuestion { category } => match create_round(state, category).await {
      Ok(question) => {
        tracing::info!(target: "quiz", id = %question.id, "WS question served");
        ServerWsMessage::Question { question }
      }
      Err(message) => ServerWsMessage::Error { message },
    },

    ClientWsMessage::SubmitAnswer { question_id, answer } => {
      match score_answer(state, &question_id, &answer).await {
        Ok((correct, correct_name)) => {
          *answered += 1;
          if correct {
            *score += 1;
          }
          tracing::info!(target: "quiz", id = %question_id, %correct, score = *score, "WS submit_answer scored");
          ServerWsMessage::AnswerResult { correct, correct_name, score: *score, answered: *answered }
        }
        Err(message) => ServerWsMessage::Error { message },
      }
    }

    ClientWsMessage::SpeechAnswer { question_id, transcript } => {
      match resolve_speech(state, &question_id, &transcript).await {
        Ok(outcome) => {
          if let Some(correct) = outcome.correct {
            *answered += 1;
            if correct {
              *score += 1;
            }
            tracing::info!(target: "quiz", id = %question_id, %correct, score = *score, "WS speech_answer scored");
          }
          ServerWsMessage::SpeechResult {
            matched: outcome.matched,
            correct: outcome.correct,
            correct_name: outcome.correct_name,
            score: *score,
            answered: *answered,
          }
        }
        Err(message) => ServerWsMessage::Error { message },
      }
    }

    ClientWsMessage::LearnDeck { category } => ServerWsMessage::LearnDeck {
      logos: build_deck(state, category).await,
    },
  }
}
