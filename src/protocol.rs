//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Exercise, PhrasePair};
use crate::phrases::PhraseCategory;
use crate::scoring::{Grade, PracticeMode, Strategy};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Score(ScoreIn),
    Sanitize(SanitizeIn),
    NextPhrase(PhraseQuery),
    ResetPhrases(ResetIn),
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    ScoreResult(ScoreOut),
    Sanitized(SanitizeOut),
    Phrase(PhraseOut),
    PhrasesReset { session: String },
    Error { message: String },
}

//
// Request/response DTOs (shared by HTTP and WS)
//

#[derive(Debug, Deserialize)]
pub struct ScoreIn {
    pub target: String,
    pub spoken: String,
    #[serde(default)]
    pub strategy: Option<Strategy>,
    #[serde(default)]
    pub mode: Option<PracticeMode>,
}

#[derive(Debug, Serialize)]
pub struct ScoreOut {
    pub accuracy: u8,
    pub grade: Grade,
    pub strategy: Strategy,
}

#[derive(Debug, Deserialize)]
pub struct SanitizeIn {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub exercises: Option<Vec<Exercise>>,
}

#[derive(Debug, Serialize)]
pub struct SanitizeOut {
    pub language: String,
    pub exercises: Vec<Exercise>,
    pub repaired: usize,
}

#[derive(Debug, Deserialize)]
pub struct PhraseQuery {
    pub session: String,
    #[serde(default)]
    pub language: Option<String>,
    pub category: PhraseCategory,
}

#[derive(Debug, Serialize)]
pub struct PhraseOut {
    pub category: PhraseCategory,
    #[serde(flatten)]
    pub phrase: PhrasePair,
}

#[derive(Debug, Deserialize)]
pub struct ResetIn {
    pub session: String,
    #[serde(default)]
    pub category: Option<PhraseCategory>,
}

#[derive(Debug, Serialize)]
pub struct ResetOut {
    pub session: String,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
