//! Domain models used by the backend: chapters, verses, questions and player stats.

use serde::{Deserialize, Serialize};

/// One entry of the fixed chapter catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Chapter {
  pub number: u16,
  pub name: &'static str,
  pub verse_count: u16,
}

/// Where did the verse behind a question come from?
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
  Remote,   // fetched from the recitation API
  Fallback, // built-in verse (API unreachable or disabled)
}

impl QuestionSource {
  pub fn as_str(self) -> &'static str {
    match self {
      QuestionSource::Remote => "remote",
      QuestionSource::Fallback => "fallback",
    }
  }
}

/// A verse with the details shown after a wrong answer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ayah {
  pub text: String,
  pub surah_number: u16,
  pub number_in_surah: u16,
  pub global_number: u32,
  #[serde(default)] pub surah_english: String,
  #[serde(default)] pub audio: Option<String>,
  #[serde(default)] pub juz: Option<u16>,
  #[serde(default)] pub page: Option<u16>,
}

/// A served quiz question, kept in memory until answered.
#[derive(Clone, Debug, Serialize)]
pub struct Question {
  pub id: String,
  pub ayah: Ayah,
  /// Normalized chapter name; the single source of truth for grading.
  pub reference: String,
  /// Prefixed display form of the correct chapter, e.g. "سورة الفاتحة".
  pub expected: String,
  pub options: [String; 4],
  pub source: QuestionSource,
}

/// One-shot milestones. Once unlocked they stay unlocked.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
  Streak5,
  Streak10,
  Streak20,
  Score100,
  Score500,
  Score1000,
}

/// Per-player counters. The player id is opaque and supplied by the client.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
  pub player_id: String,
  pub score: u32,
  pub streak: u32,
  pub high_score: u32,
  pub best_streak: u32,
  pub correct_answers: u32,
  pub wrong_answers: u32,
  pub total_questions: u32,
  pub achievements: Vec<Achievement>,
  /// Unix seconds of the last recorded answer.
  pub last_updated: u64,
}
