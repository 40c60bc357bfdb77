//! Errors surfaced to clients by the quiz handlers.

use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

use crate::options::OptionsError;

#[derive(Debug, Error)]
pub enum QuizError {
  #[error("unknown or already answered question: {0}")]
  UnknownQuestion(String),
  #[error("playerId must not be empty")]
  MissingPlayer,
  #[error(transparent)]
  Options(#[from] OptionsError),
}

impl QuizError {
  pub fn status(&self) -> StatusCode {
    match self {
      QuizError::UnknownQuestion(_) => StatusCode::NOT_FOUND,
      QuizError::MissingPlayer => StatusCode::UNPROCESSABLE_ENTITY,
      QuizError::Options(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for QuizError {
  fn into_response(self) -> axum::response::Response {
    let body = Json(serde_json::json!({ "error": self.to_string() }));
    (self.status(), body).into_response()
  }
}
