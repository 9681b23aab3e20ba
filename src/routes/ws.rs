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
  info!(target: "phrasecraft", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "phrasecraft", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let out = reply_to_text(&txt, &state).await;
        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "phrasecraft", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "phrasecraft", "WebSocket disconnected");
}

/// Parse, dispatch, serialize. Never fails: bad input becomes an `error` message.
pub async fn reply_to_text(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "phrasecraft", "WS received: {:?}", &incoming);
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
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Score(input) => {
      let out = evaluate_attempt(state, &input);
      info!(target: "phrasecraft", accuracy = out.accuracy, grade = ?out.grade, "WS score evaluated");
      ServerWsMessage::ScoreResult(out)
    }

    ClientWsMessage::Sanitize(input) => {
      let out = sanitize_lesson(state, input);
      info!(target: "phrasecraft", count = out.exercises.len(), repaired = out.repaired, "WS sanitize served");
      ServerWsMessage::Sanitized(out)
    }

    ClientWsMessage::NextPhrase(q) => match next_phrase(state, &q).await {
      Some(out) => ServerWsMessage::Phrase(out),
      None => ServerWsMessage::Error { message: format!("No phrases in category {:?}", q.category) },
    },

    ClientWsMessage::ResetPhrases(r) => {
      reset_phrases(state, &r).await;
      ServerWsMessage::PhrasesReset { session: r.session }
    }
  }
}
