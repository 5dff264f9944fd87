//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs include parameters and basic result info.

use std::sync::Arc;
use axum::{
  extract::{Query, State},
  http::{header, StatusCode},
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::logic::*;
use crate::protocol::*;
use crate::quiz::match_transcript;
use crate::state::AppState;

// Tablets re-request logo images aggressively; let them cache for a day.
const PROXY_CACHE_CONTROL: &str = "public, max-age=86400, immutable";

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_question(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QuestionQuery>,
) -> impl IntoResponse {
  match create_round(&state, q.category).await {
    Ok(out) => {
      info!(target: "quiz", id = %out.id, "HTTP question served");
      Json(out).into_response()
    }
    Err(error) => (StatusCode::SERVICE_UNAVAILABLE, Json(ErrorOut { error })).into_response(),
  }
}

#[instrument(level = "info", skip(state, body), fields(%body.question_id))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> impl IntoResponse {
  match score_answer(&state, &body.question_id, &body.answer).await {
    Ok((correct, correct_name)) => {
      info!(target: "quiz", id = %body.question_id, %correct, "HTTP answer scored");
      Json(AnswerOut { correct, correct_name }).into_response()
    }
    Err(error) => (StatusCode::NOT_FOUND, Json(ErrorOut { error })).into_response(),
  }
}

/// Pure matcher surface: no stored round involved, the caller supplies both
/// the transcript and the candidate options.
#[instrument(level = "info", skip(body), fields(transcript_len = body.transcript.len(), options = body.options.len()))]
pub async fn http_post_match(Json(body): Json<MatchIn>) -> impl IntoResponse {
  let matched = match_transcript(&body.transcript, &body.options).map(|s| s.to_string());
  info!(target: "quiz", matched = matched.as_deref().unwrap_or("<none>"), "HTTP match evaluated");
  Json(MatchOut { matched })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_learn_deck(
  State(state): State<Arc<AppState>>,
  Query(q): Query<DeckQuery>,
) -> impl IntoResponse {
  Json(DeckOut { logos: build_deck(&state, q.category).await })
}

#[instrument(level = "info", skip(state), fields(%q.url))]
pub async fn http_get_logo_proxy(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ProxyQuery>,
) -> impl IntoResponse {
  // Replaying arbitrary URLs would turn this endpoint into an open relay.
  if !state.knows_image_url(&q.url).await {
    let error = "URL is not a known logo image.".to_string();
    return (StatusCode::FORBIDDEN, Json(ErrorOut { error })).into_response();
  }
  let fetcher = match &state.fetcher {
    Some(f) => f,
    None => {
      let error = "Image fetching is disabled.".to_string();
      return (StatusCode::SERVICE_UNAVAILABLE, Json(ErrorOut { error })).into_response();
    }
  };
  match fetcher.fetch_image(&q.url).await {
    Ok((bytes, content_type)) => (
      StatusCode::OK,
      [
        (header::CONTENT_TYPE, content_type),
        (header::CACHE_CONTROL, PROXY_CACHE_CONTROL.to_string()),
      ],
      bytes,
    )
      .into_response(),
    Err(error) => (StatusCode::BAD_GATEWAY, Json(ErrorOut { error })).into_response(),
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_logo_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let fetcher = match &state.fetcher {
    Some(f) => f,
    None => {
      let error = "Image fetching is disabled.".to_string();
      return (StatusCode::SERVICE_UNAVAILABLE, Json(ErrorOut { error })).into_response();
    }
  };
  let items = state.all_active().await;
  let report = fetcher.health_check(&items).await;
  info!(target: "images", checked = report.checked, failed = report.failed, "Logo health check finished");
  Json(report).into_response()
}
