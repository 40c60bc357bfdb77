//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Serving a new question (verse + four options)
//!   - Grading a submitted option and updating the player's stats
//!   - Stats, session reset and leaderboard reads
//!   - Exposing the chapter-name normalizer

use tracing::{info, instrument};

use crate::arabic::{matches, normalize};
use crate::domain::PlayerStats;
use crate::error::QuizError;
use crate::protocol::{to_out, AnswerOut, NormalizeOut, QuestionOut};
use crate::state::AppState;

/// Hard ceiling for `limit` on leaderboard reads.
const MAX_LEADERBOARD: usize = 100;

#[instrument(level = "info", skip(state))]
pub async fn new_question(state: &AppState) -> Result<(QuestionOut, &'static str), QuizError> {
  let (q, origin) = state.next_question().await?;
  Ok((to_out(&q), origin))
}

#[instrument(level = "info", skip(state, answer), fields(%player_id, %question_id, answer_len = answer.len()))]
pub async fn submit_answer(state: &AppState, player_id: &str, question_id: &str, answer: &str) -> Result<AnswerOut, QuizError> {
  let player_id = player_id.trim();
  if player_id.is_empty() {
    return Err(QuizError::MissingPlayer);
  }

  let q = state
    .take_question(question_id)
    .await
    .ok_or_else(|| QuizError::UnknownQuestion(question_id.to_string()))?;

  let correct = matches(answer, &q.reference);
  let (stats, outcome) = state.record_answer(player_id, correct).await;
  info!(target: "quiz", %player_id, %question_id, %correct, score = stats.score, streak = stats.streak, "Answer graded");
  for a in &outcome.unlocked {
    info!(target: "quiz", %player_id, achievement = ?a, "Achievement unlocked");
  }

  Ok(AnswerOut {
    correct,
    expected: q.expected,
    selected: answer.to_string(),
    score: stats.score,
    streak: stats.streak,
    high_score: stats.high_score,
    new_high_score: outcome.new_high_score,
    unlocked: outcome.unlocked,
    share_prompt: outcome.share_prompt,
    ayah: q.ayah,
  })
}

#[instrument(level = "info", skip(state))]
pub async fn get_stats(state: &AppState, player_id: &str) -> Result<PlayerStats, QuizError> {
  let player_id = player_id.trim();
  if player_id.is_empty() {
    return Err(QuizError::MissingPlayer);
  }
  Ok(state.player_stats(player_id).await)
}

#[instrument(level = "info", skip(state))]
pub async fn reset_session(state: &AppState, player_id: &str) -> Result<PlayerStats, QuizError> {
  let player_id = player_id.trim();
  if player_id.is_empty() {
    return Err(QuizError::MissingPlayer);
  }
  Ok(state.reset_session(player_id).await)
}

#[instrument(level = "info", skip(state))]
pub async fn get_leaderboard(state: &AppState, limit: Option<usize>) -> Vec<PlayerStats> {
  let limit = limit.unwrap_or(state.config.game.leaderboard_limit).min(MAX_LEADERBOARD);
  state.leaderboard(limit).await
}

/// Normalized form of `text`, plus a verdict when a reference is given.
pub fn do_normalize(text: &str, reference: Option<&str>) -> NormalizeOut {
  NormalizeOut {
    normalized: normalize(text),
    matches: reference.map(|r| matches(text, r)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::QuizConfig;

  fn offline() -> AppState {
    let mut cfg = QuizConfig::default();
    cfg.content.disabled = true;
    AppState::with_config(cfg)
  }

  #[tokio::test]
  async fn correct_option_scores() {
    let state = offline();
    let (q, _) = state.next_question().await.expect("question");
    let out = submit_answer(&state, "p1", &q.id, &q.expected).await.expect("graded");
    assert!(out.correct);
    assert_eq!((out.score, out.streak), (1, 1));
    assert_eq!(out.ayah, q.ayah);
  }

  #[tokio::test]
  async fn wrong_option_resets_streak() {
    let state = offline();
    let (q, _) = state.next_question().await.expect("question");
    submit_answer(&state, "p1", &q.id, &q.expected).await.expect("graded");

    let (q, _) = state.next_question().await.expect("question");
    let wrong = q.options.iter().find(|o| **o != q.expected).expect("distractor").clone();
    let out = submit_answer(&state, "p1", &q.id, &wrong).await.expect("graded");
    assert!(!out.correct);
    assert_eq!(out.expected, q.expected);
    assert_eq!((out.score, out.streak, out.high_score), (1, 0, 1));
  }

  #[tokio::test]
  async fn api_spelling_of_the_answer_is_accepted() {
    let state = offline();
    let (q, _) = state.next_question().await.expect("question");
    let spelled = format!("سُورَةُ {}", q.reference);
    assert!(submit_answer(&state, "p1", &q.id, &spelled).await.expect("graded").correct);
  }

  #[tokio::test]
  async fn unknown_or_repeated_question_is_rejected() {
    let state = offline();
    let err = submit_answer(&state, "p1", "nope", "x").await.unwrap_err();
    assert!(matches!(err, QuizError::UnknownQuestion(_)));

    let (q, _) = state.next_question().await.expect("question");
    submit_answer(&state, "p1", &q.id, &q.expected).await.expect("graded");
    assert!(submit_answer(&state, "p1", &q.id, &q.expected).await.is_err());
  }

  #[tokio::test]
  async fn empty_player_keeps_the_question() {
    let state = offline();
    let (q, _) = state.next_question().await.expect("question");
    let err = submit_answer(&state, "  ", &q.id, &q.expected).await.unwrap_err();
    assert!(matches!(err, QuizError::MissingPlayer));
    assert!(state.get_question(&q.id).await.is_some());
  }

  #[tokio::test]
  async fn leaderboard_limit_is_clamped() {
    let state = offline();
    for i in 0..3 {
      state.record_answer(&format!("p{i}"), true).await;
    }
    assert_eq!(get_leaderboard(&state, Some(2)).await.len(), 2);
    assert_eq!(get_leaderboard(&state, None).await.len(), 3);
    assert_eq!(get_leaderboard(&state, Some(10_000)).await.len(), 3);
  }

  #[test]
  fn normalize_endpoint_logic() {
    assert_eq!(do_normalize("سُورَةُ ٱلنَّاسِ", Some("الناس")), NormalizeOut { normalized: "الناس".into(), matches: Some(true) });
    assert_eq!(do_normalize("الفلق", None).matches, None);
  }
}
