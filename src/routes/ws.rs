//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::logic::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "surah_quiz", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "surah_quiz", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let out = reply_to_text(&txt, &state).await;
        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "surah_quiz", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "surah_quiz", "WebSocket disconnected");
}

/// Parse, dispatch, serialize response.
async fn reply_to_text(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "surah_quiz", "WS received: {:?}", &incoming);
      handle_client_ws(incoming, state).await
    }
    Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
  };

  serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  let result = match msg {
    ClientWsMessage::Ping => Ok(ServerWsMessage::Pong),

    ClientWsMessage::NewQuestion => new_question(state).await.map(|(question, origin)| {
      info!(target: "quiz", id = %question.id, %origin, "WS question served");
      ServerWsMessage::Question { question }
    }),

    ClientWsMessage::SubmitAnswer { player_id, question_id, answer } => {
      submit_answer(state, &player_id, &question_id, &answer).await.map(|result| {
        info!(target: "quiz", id = %question_id, correct = result.correct, "WS answer evaluated");
        ServerWsMessage::AnswerResult { result }
      })
    }

    ClientWsMessage::Stats { player_id } =>
      get_stats(state, &player_id).await.map(|stats| ServerWsMessage::Stats { stats }),

    ClientWsMessage::ResetSession { player_id } =>
      reset_session(state, &player_id).await.map(|stats| ServerWsMessage::Stats { stats }),

    ClientWsMessage::Leaderboard { limit } =>
      Ok(ServerWsMessage::Leaderboard { players: get_leaderboard(state, limit).await }),

    ClientWsMessage::Normalize { text, reference } => {
      let result = do_normalize(&text, reference.as_deref());
      Ok(ServerWsMessage::Normalized { text, result })
    }
  };

  result.unwrap_or_else(|e| ServerWsMessage::Error { message: e.to_string() })
}
