//! Minimal client for the public recitation API (api.alquran.cloud).
//!
//! We only need two calls: one verse with its audio edition, and the chapter list
//! used to check the built-in catalog. Calls are instrumented and log the verse
//! reference, latency and status (not payloads).

use std::time::{Duration, Instant};

use reqwest::header::USER_AGENT;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::config::ContentCfg;
use crate::domain::Ayah;
use crate::util::{fill_template, trunc_for_log};

const AYAH_URL_TEMPLATE: &str = "{base}/ayah/{surah}:{ayah}/{edition}";
const SURAH_LIST_URL_TEMPLATE: &str = "{base}/surah";

#[derive(Debug, Error)]
pub enum ContentError {
  #[error("content API request failed: {0}")]
  Http(#[from] reqwest::Error),
  #[error("content API HTTP {status}: {body}")]
  Status { status: u16, body: String },
  #[error("content API returned no data")]
  Empty,
}

/// Chapter entry as reported by `GET /surah`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteChapter {
  pub number: u16,
  pub name: String,
  #[serde(default)]
  pub english_name: String,
  pub number_of_ayahs: u16,
}

/// A fetched verse plus the chapter name exactly as the API spells it.
#[derive(Clone, Debug)]
pub struct RemoteAyah {
  pub ayah: Ayah,
  pub surah_name: String,
}

#[derive(Deserialize)]
struct Envelope<T> {
  data: Option<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AyahData {
  number: u32,
  text: String,
  #[serde(default)]
  audio: Option<String>,
  number_in_surah: u16,
  #[serde(default)]
  juz: Option<u16>,
  #[serde(default)]
  page: Option<u16>,
  surah: RemoteChapter,
}

impl From<AyahData> for RemoteAyah {
  fn from(d: AyahData) -> Self {
    RemoteAyah {
      ayah: Ayah {
        text: d.text,
        surah_number: d.surah.number,
        number_in_surah: d.number_in_surah,
        global_number: d.number,
        surah_english: d.surah.english_name,
        audio: d.audio,
        juz: d.juz,
        page: d.page,
      },
      surah_name: d.surah.name,
    }
  }
}

#[derive(Clone)]
pub struct ContentClient {
  pub client: reqwest::Client,
  pub base_url: String,
  pub audio_edition: String,
}

impl ContentClient {
  /// Build the client unless the config disables remote content.
  pub fn from_config(cfg: &ContentCfg) -> Option<Self> {
    if cfg.disabled {
      return None;
    }
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(cfg.timeout_secs))
      .build()
      .map_err(|e| error!(target: "surah_quiz", error = %e, "Failed to build HTTP client"))
      .ok()?;
    Some(Self {
      client,
      base_url: cfg.base_url.trim_end_matches('/').to_string(),
      audio_edition: cfg.audio_edition.clone(),
    })
  }

  pub fn ayah_url(&self, surah: u16, ayah: u16) -> String {
    let (surah, ayah) = (surah.to_string(), ayah.to_string());
    fill_template(AYAH_URL_TEMPLATE, &[
      ("base", self.base_url.as_str()),
      ("surah", surah.as_str()),
      ("ayah", ayah.as_str()),
      ("edition", self.audio_edition.as_str()),
    ])
  }

  pub fn surah_list_url(&self) -> String {
    fill_template(SURAH_LIST_URL_TEMPLATE, &[("base", self.base_url.as_str())])
  }

  #[instrument(level = "info", skip(self), fields(edition = %self.audio_edition))]
  pub async fn fetch_ayah(&self, surah: u16, ayah: u16) -> Result<RemoteAyah, ContentError> {
    let data: AyahData = self.get_data(&self.ayah_url(surah, ayah)).await?;
    Ok(data.into())
  }

  #[instrument(level = "info", skip(self))]
  pub async fn fetch_chapter_list(&self) -> Result<Vec<RemoteChapter>, ContentError> {
    self.get_data(&self.surah_list_url()).await
  }

  async fn get_data<T: DeserializeOwned>(&self, url: &str) -> Result<T, ContentError> {
    let started = Instant::now();
    let resp = self
      .client
      .get(url)
      .header(USER_AGENT, concat!("surah-quiz-backend/", env!("CARGO_PKG_VERSION")))
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      error!(target: "surah_quiz", %url, status = status.as_u16(), body = %trunc_for_log(&body, 200), "Content API error");
      return Err(ContentError::Status { status: status.as_u16(), body: trunc_for_log(&body, 200) });
    }

    let envelope: Envelope<T> = resp.json().await?;
    info!(target: "surah_quiz", %url, elapsed_ms = started.elapsed().as_millis() as u64, "Content API call ok");
    envelope.data.ok_or(ContentError::Empty)
  }
}
