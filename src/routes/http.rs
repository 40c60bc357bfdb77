//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs its parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{State, Query}, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::error::QuizError;
use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, content_api: state.content.is_some() })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_question(State(state): State<Arc<AppState>>) -> Result<Json<QuestionOut>, QuizError> {
  let (q, origin) = new_question(&state).await?;
  info!(target: "quiz", id = %q.id, %origin, "HTTP question served");
  Ok(Json(q))
}

#[instrument(level = "info", skip(state, body), fields(player_id = %body.player_id, question_id = %body.question_id))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerOut>, QuizError> {
  let out = submit_answer(&state, &body.player_id, &body.question_id, &body.answer).await?;
  info!(target: "quiz", id = %body.question_id, correct = out.correct, "HTTP answer evaluated");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state), fields(player_id = %q.player_id))]
pub async fn http_get_stats(
  State(state): State<Arc<AppState>>,
  Query(q): Query<PlayerQuery>,
) -> Result<impl IntoResponse, QuizError> {
  Ok(Json(get_stats(&state, &q.player_id).await?))
}

#[instrument(level = "info", skip(state, body), fields(player_id = %body.player_id))]
pub async fn http_post_reset(
  State(state): State<Arc<AppState>>,
  Json(body): Json<PlayerQuery>,
) -> Result<impl IntoResponse, QuizError> {
  Ok(Json(reset_session(&state, &body.player_id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_leaderboard(
  State(state): State<Arc<AppState>>,
  Query(q): Query<LeaderboardQuery>,
) -> impl IntoResponse {
  let players = get_leaderboard(&state, q.limit).await;
  Json(LeaderboardOut { players })
}

#[instrument(level = "info", skip(body), fields(text_len = body.text.len()))]
pub async fn http_post_normalize(Json(body): Json<NormalizeIn>) -> impl IntoResponse {
  Json(do_normalize(&body.text, body.reference.as_deref()))
}
