//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{LogoItem, LogoSource};
use crate::quiz::Question;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    NewQuestion {
        category: Option<String>,
    },
    SubmitAnswer {
        #[serde(rename = "questionId")]
        question_id: String,
        answer: String,
    },
    SpeechAnswer {
        #[serde(rename = "questionId")]
        question_id: String,
        transcript: String,
    },
    LearnDeck {
        category: Option<String>,
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
        correct: bool,
        #[serde(rename = "correctName")]
        correct_name: String,
        score: u32,
        answered: u32,
    },
    SpeechResult {
        matched: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        correct: Option<bool>,
        #[serde(rename = "correctName", skip_serializing_if = "Option::is_none")]
        correct_name: Option<String>,
        score: u32,
        answered: u32,
    },
    LearnDeck {
        logos: Vec<LogoOut>,
    },
    Error {
        message: String,
    },
}

/// DTO used by both WS and HTTP for quiz round delivery. The correct name
/// stays server-side until the round is scored.
#[derive(Debug, Serialize)]
pub struct QuestionOut {
    pub id: String,
    pub category: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    pub options: Vec<String>,
}

/// Convert an open round (internal) to the public DTO.
pub fn to_out(id: &str, q: &Question) -> QuestionOut {
    QuestionOut {
        id: id.to_string(),
        category: q.correct.category.clone(),
        image_url: q.correct.image_url.clone(),
        updated_at: q.correct.updated_at.clone(),
        options: q.options.clone(),
    }
}

/// DTO for learn-mode decks; `is_active` stays internal (decks only ever
/// contain active items).
#[derive(Debug, Serialize)]
pub struct LogoOut {
    pub id: String,
    pub name: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub category: String,
    pub source: LogoSource,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

pub fn logo_to_out(it: &LogoItem) -> LogoOut {
    LogoOut {
        id: it.id.clone(),
        name: it.name.clone(),
        image_url: it.image_url.clone(),
        category: it.category.clone(),
        source: it.source.clone(),
        updated_at: it.updated_at.clone(),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct QuestionQuery {
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub answer: String,
}
#[derive(Serialize)]
pub struct AnswerOut {
    pub correct: bool,
    #[serde(rename = "correctName")]
    pub correct_name: String,
}

#[derive(Deserialize)]
pub struct MatchIn {
    pub transcript: String,
    pub options: Vec<String>,
}
#[derive(Serialize)]
pub struct MatchOut {
    pub matched: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeckQuery {
    pub category: Option<String>,
}
#[derive(Serialize)]
pub struct DeckOut {
    pub logos: Vec<LogoOut>,
}

#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    pub url: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}
