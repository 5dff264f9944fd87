//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Opening a quiz round (pool fetch -> question -> stored open round)
//!   - Scoring a tapped answer against the stored round
//!   - Resolving a speech transcript, scoring when it names an option
//!   - Building a shuffled learn-mode deck

use tracing::{info, instrument, warn};

use crate::domain::DEFAULT_CATEGORY;
use crate::protocol::{logo_to_out, to_out, LogoOut, QuestionOut};
use crate::quiz::{generate_question, match_transcript, shuffled_deck, QuizError};
use crate::state::AppState;

/// Outcome of a speech answer. `correct`/`correct_name` are set only when the
/// transcript resolved to an option; an unmatched transcript leaves the round
/// open so the player can retry or tap.
pub struct SpeechOutcome {
  pub matched: Option<String>,
  pub correct: Option<bool>,
  pub correct_name: Option<String>,
}

#[instrument(level = "info", skip(state))]
pub async fn create_round(state: &AppState, category: Option<String>) -> Result<QuestionOut, String> {
  let category = category.unwrap_or_else(|| DEFAULT_CATEGORY.into());
  let pool = state.active_pool(&category).await;
  match generate_question(&pool) {
    Ok(q) => {
      let id = state.open_question(q.clone()).await;
      info!(target: "quiz", %id, %category, "Round opened");
      Ok(to_out(&id, &q))
    }
    Err(QuizError::PoolTooSmall(n)) => {
      // Data availability, not an internal failure.
      warn!(target: "quiz", %category, pool = n, "Not enough logos for a round");
      Err(format!("Not enough logos in category '{}' ({} active, need 4).", category, n))
    }
  }
}

/// Score a selected option. Consumes the round, so a question is scored at
/// most once.
#[instrument(level = "info", skip(state, answer), fields(%question_id, answer_len = answer.len()))]
pub async fn score_answer(state: &AppState, question_id: &str, answer: &str) -> Result<(bool, String), String> {
  match state.take_question(question_id).await {
    Some(q) => {
      let correct = answer.trim() == q.correct.name;
      info!(target: "quiz", id = %question_id, %correct, "Answer scored");
      Ok((correct, q.correct.name))
    }
    None => Err(format!("Unknown questionId: {}", question_id)),
  }
}

#[instrument(level = "info", skip(state, transcript), fields(%question_id, transcript_len = transcript.len()))]
pub async fn resolve_speech(state: &AppState, question_id: &str, transcript: &str) -> Result<SpeechOutcome, String> {
  let q = match state.get_question(question_id).await {
    Some(q) => q,
    None => return Err(format!("Unknown questionId: {}", question_id)),
  };
  match match_transcript(transcript, &q.options) {
    Some(opt) => {
      let matched = opt.to_string();
      let (correct, correct_name) = score_answer(state, question_id, &matched).await?;
      Ok(SpeechOutcome {
        matched: Some(matched),
        correct: Some(correct),
        correct_name: Some(correct_name),
      })
    }
    None => {
      info!(target: "quiz", id = %question_id, "Transcript matched no option");
      Ok(SpeechOutcome { matched: None, correct: None, correct_name: None })
    }
  }
}

#[instrument(level = "info", skip(state))]
pub async fn build_deck(state: &AppState, category: Option<String>) -> Vec<LogoOut> {
  let category = category.unwrap_or_else(|| DEFAULT_CATEGORY.into());
  let pool = state.active_pool(&category).await;
  let deck = shuffled_deck(&pool);
  info!(target: "quiz", %category, size = deck.len(), "Learn deck built");
  deck.iter().map(logo_to_out).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{LogoItem, LogoSource};
  use std::{collections::HashMap, sync::Arc};
  use tokio::sync::RwLock;

  fn item(id: &str, name: &str) -> LogoItem {
    LogoItem {
      id: id.into(),
      name: name.into(),
      image_url: format!("https://upload.example.org/{id}.png"),
      category: "airline".into(),
      source: LogoSource::Seed,
      is_active: true,
      updated_at: "2025-06-01T00:00:00Z".into(),
    }
  }

  fn state_with(items: Vec<LogoItem>) -> AppState {
    let mut by_id = HashMap::new();
    for it in items {
      by_id.insert(it.id.clone(), it);
    }
    AppState {
      logos_by_id: Arc::new(RwLock::new(by_id)),
      open_questions: Arc::new(RwLock::new(HashMap::new())),
      fetcher: None,
    }
  }

  fn four_airlines() -> Vec<LogoItem> {
    vec![
      item("a1", "Emirates"),
      item("a2", "Qatar Airways"),
      item("a3", "Delta"),
      item("a4", "KLM"),
    ]
  }

  #[tokio::test]
  async fn round_trip_tap_answer() {
    let state = state_with(four_airlines());
    let out = create_round(&state, None).await.expect("round");
    assert_eq!(out.options.len(), 4);

    let (_, correct_name) = score_answer(&state, &out.id, &out.options[0]).await.expect("scored");
    assert!(out.options.contains(&correct_name));

    // Consumed on scoring.
    let err = score_answer(&state, &out.id, &out.options[0]).await.unwrap_err();
    assert!(err.contains("Unknown questionId"));
  }

  #[tokio::test]
  async fn empty_pool_cannot_open_a_round() {
    let state = state_with(vec![]);
    let err = create_round(&state, None).await.unwrap_err();
    assert!(err.contains("Not enough logos"));
  }

  #[tokio::test]
  async fn unmatched_transcript_keeps_the_round_open() {
    let state = state_with(four_airlines());
    let out = create_round(&state, None).await.expect("round");

    let outcome = resolve_speech(&state, &out.id, "xyzzy mumbling").await.expect("resolved");
    assert!(outcome.matched.is_none());
    assert!(outcome.correct.is_none());

    // Still open: a match on the retry scores and consumes it.
    let outcome = resolve_speech(&state, &out.id, "emirates").await.expect("resolved");
    assert_eq!(outcome.matched.as_deref(), Some("Emirates"));
    assert!(outcome.correct.is_some());
    assert!(resolve_speech(&state, &out.id, "emirates").await.is_err());
  }

  #[tokio::test]
  async fn deck_is_scoped_to_the_category() {
    let mut items = four_airlines();
    let mut other = item("c1", "Shell");
    other.category = "fuel".into();
    items.push(other);

    let state = state_with(items);
    assert_eq!(build_deck(&state, None).await.len(), 4);
    assert_eq!(build_deck(&state, Some("fuel".into())).await.len(), 1);
  }
}
