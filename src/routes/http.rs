//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{State, Query}, http::StatusCode, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, body), fields(strategy = ?body.strategy, mode = ?body.mode))]
pub async fn http_post_score(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ScoreIn>,
) -> impl IntoResponse {
  let out = evaluate_attempt(&state, &body);
  info!(target: "phrasecraft", accuracy = out.accuracy, grade = ?out.grade, "HTTP score evaluated");
  Json(out)
}

#[instrument(level = "info", skip(state, body), fields(language = ?body.language))]
pub async fn http_post_sanitize(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SanitizeIn>,
) -> impl IntoResponse {
  let out = sanitize_lesson(&state, body);
  info!(target: "phrasecraft", count = out.exercises.len(), repaired = out.repaired, "HTTP sanitize served");
  Json(out)
}

#[instrument(level = "info", skip(state), fields(session = %q.session, category = ?q.category))]
pub async fn http_get_phrase(
  State(state): State<Arc<AppState>>,
  Query(q): Query<PhraseQuery>,
) -> impl IntoResponse {
  match next_phrase(&state, &q).await {
    Some(out) => {
      info!(target: "phrasecraft", session = %q.session, key = out.phrase.key, "HTTP phrase served");
      (StatusCode::OK, Json(out)).into_response()
    }
    None => (
      StatusCode::NOT_FOUND,
      Json(ErrorOut { message: format!("No phrases in category {:?}", q.category) }),
    )
      .into_response(),
  }
}

#[instrument(level = "info", skip(state, body), fields(session = %body.session))]
pub async fn http_post_phrase_reset(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ResetIn>,
) -> impl IntoResponse {
  reset_phrases(&state, &body).await;
  Json(ResetOut { session: body.session })
}
