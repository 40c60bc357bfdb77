//! Loading quiz configuration from TOML, with env overrides.
//!
//! See `QuizConfig` for the expected schema. Every field has a default, so an
//! empty file (or no file at all) is a valid configuration.

use serde::Deserialize;
use tracing::{error, info};

use crate::arabic::CHAPTER_PREFIX;
use crate::scoring::ScoringRules;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct QuizConfig {
  #[serde(default)]
  pub content: ContentCfg,
  #[serde(default)]
  pub game: GameCfg,
  #[serde(default)]
  pub catalog: CatalogCfg,
}

/// Recitation API settings.
#[derive(Clone, Debug, Deserialize)]
pub struct ContentCfg {
  #[serde(default = "default_base_url")]
  pub base_url: String,
  #[serde(default = "default_audio_edition")]
  pub audio_edition: String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
  /// Offline mode: serve built-in verses only.
  #[serde(default)]
  pub disabled: bool,
}

impl Default for ContentCfg {
  fn default() -> Self {
    Self {
      base_url: default_base_url(),
      audio_edition: default_audio_edition(),
      timeout_secs: default_timeout_secs(),
      disabled: false,
    }
  }
}

#[derive(Clone, Debug, Deserialize)]
pub struct GameCfg {
  #[serde(default = "default_prefix")]
  pub prefix: String,
  #[serde(default = "default_leaderboard_limit")]
  pub leaderboard_limit: usize,
  /// Offer a share prompt every N points (0 disables it).
  #[serde(default = "default_share_every")]
  pub share_every: u32,
  /// Unanswered questions kept in memory; the oldest is evicted past it.
  #[serde(default = "default_max_pending_questions")]
  pub max_pending_questions: usize,
}

impl GameCfg {
  pub fn scoring(&self) -> ScoringRules {
    ScoringRules { share_every: self.share_every }
  }
}

impl Default for GameCfg {
  fn default() -> Self {
    Self {
      prefix: default_prefix(),
      leaderboard_limit: default_leaderboard_limit(),
      share_every: default_share_every(),
      max_pending_questions: default_max_pending_questions(),
    }
  }
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct CatalogCfg {
  /// Fetch the API's chapter list at startup and log differences.
  #[serde(default)]
  pub validate_on_startup: bool,
}

fn default_base_url() -> String { "https://api.alquran.cloud/v1".into() }
fn default_audio_edition() -> String { "ar.alafasy".into() }
fn default_timeout_secs() -> u64 { 15 }
fn default_prefix() -> String { CHAPTER_PREFIX.into() }
fn default_leaderboard_limit() -> usize { 10 }
fn default_share_every() -> u32 { 3 }
fn default_max_pending_questions() -> usize { 10_000 }

impl QuizConfig {
  /// File config (if any) with env overrides applied on top.
  pub fn from_env() -> Self {
    let mut cfg = load_quiz_config_from_env().unwrap_or_default();
    cfg.apply_env_overrides(|k| std::env::var(k).ok());
    cfg
  }

  fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
    if let Some(url) = var("QURAN_API_BASE_URL") {
      self.content.base_url = url;
    }
    if let Some(edition) = var("QURAN_AUDIO_EDITION") {
      self.content.audio_edition = edition;
    }
    if let Some(flag) = var("QURAN_API_DISABLED") {
      self.content.disabled = matches!(flag.as_str(), "1" | "true" | "yes");
    }
  }
}

/// Attempt to load `QuizConfig` from QUIZ_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_quiz_config_from_env() -> Option<QuizConfig> {
  let path = std::env::var("QUIZ_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<QuizConfig>(&s) {
      Ok(cfg) => {
        info!(target: "surah_quiz", %path, "Loaded quiz config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "surah_quiz", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "surah_quiz", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_file_gives_defaults() {
    let cfg: QuizConfig = toml::from_str("").expect("parse");
    assert_eq!(cfg.content.base_url, "https://api.alquran.cloud/v1");
    assert_eq!(cfg.content.audio_edition, "ar.alafasy");
    assert_eq!(cfg.game.prefix, "سورة");
    assert_eq!(cfg.game.scoring().share_every, 3);
    assert_eq!(cfg.game.leaderboard_limit, 10);
    assert_eq!(cfg.game.max_pending_questions, 10_000);
    assert!(!cfg.catalog.validate_on_startup);
  }

  #[test]
  fn partial_tables_keep_other_defaults() {
    let cfg: QuizConfig = toml::from_str(
      r#"
      [content]
      timeout_secs = 3

      [game]
      share_every = 5

      [catalog]
      validate_on_startup = true
      "#,
    )
    .expect("parse");
    assert_eq!(cfg.content.timeout_secs, 3);
    assert_eq!(cfg.content.audio_edition, "ar.alafasy");
    assert_eq!(cfg.game.scoring().share_every, 5);
    assert_eq!(cfg.game.prefix, "سورة");
    assert!(cfg.catalog.validate_on_startup);
  }

  #[test]
  fn env_overrides_win() {
    let mut cfg = QuizConfig::default();
    cfg.apply_env_overrides(|k| match k {
      "QURAN_API_BASE_URL" => Some("http://localhost:9000/v1".into()),
      "QURAN_API_DISABLED" => Some("1".into()),
      _ => None,
    });
    assert_eq!(cfg.content.base_url, "http://localhost:9000/v1");
    assert!(cfg.content.disabled);
    assert_eq!(cfg.content.audio_edition, "ar.alafasy");
  }
}
