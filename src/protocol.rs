//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Achievement, Ayah, PlayerStats, Question, QuestionSource};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    NewQuestion,
    SubmitAnswer {
        #[serde(rename = "playerId")]
        player_id: String,
        #[serde(rename = "questionId")]
        question_id: String,
        answer: String,
    },
    Stats {
        #[serde(rename = "playerId")]
        player_id: String,
    },
    ResetSession {
        #[serde(rename = "playerId")]
        player_id: String,
    },
    Leaderboard {
        #[serde(default)]
        limit: Option<usize>,
    },
    Normalize {
        text: String,
        #[serde(default)]
        reference: Option<String>,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Question {
        question: QuestionOut,
    },
    AnswerResult {
        result: AnswerOut,
    },
    Stats {
        stats: PlayerStats,
    },
    Leaderboard {
        players: Vec<PlayerStats>,
    },
    Normalized {
        text: String,
        #[serde(flatten)]
        result: NormalizeOut,
    },
    Error {
        message: String,
    },
}

/// DTO used by both WS and HTTP for question delivery. Never carries the answer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOut {
    pub id: String,
    pub text: String,
    pub audio: Option<String>,
    pub options: Vec<String>,
    pub source: QuestionSource,
}

/// Convert a full `Question` (internal) to the public DTO.
pub fn to_out(q: &Question) -> QuestionOut {
    QuestionOut {
        id: q.id.clone(),
        text: q.ayah.text.clone(),
        audio: q.ayah.audio.clone(),
        options: q.options.to_vec(),
        source: q.source,
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerIn {
    pub player_id: String,
    pub question_id: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOut {
    pub correct: bool,
    pub expected: String,
    pub selected: String,
    pub score: u32,
    pub streak: u32,
    pub high_score: u32,
    pub new_high_score: bool,
    pub unlocked: Vec<Achievement>,
    pub share_prompt: bool,
    /// Verse details (chapter, number, juz, page) for the review screen.
    pub ayah: Ayah,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerQuery {
    pub player_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct LeaderboardOut {
    pub players: Vec<PlayerStats>,
}

#[derive(Deserialize)]
pub struct NormalizeIn {
    pub text: String,
    #[serde(default)]
    pub reference: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NormalizeOut {
    pub normalized: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthOut {
    pub ok: bool,
    pub content_api: bool,
}
