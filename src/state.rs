//! Application state: in-memory stores, config, content client, and question building.
//!
//! This module owns:
//!   - pending questions (by id and by arrival), removed once answered
//!   - player stats (by opaque player id)
//!   - the quiz config (from TOML or defaults)
//!   - the optional content API client
//!
//! Questions come from the content API when it is reachable; otherwise a built-in
//! fallback verse is served so the quiz never stalls.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::arabic::{normalize, with_prefix};
use crate::catalog::{by_number, chapter_names, fallback_ayat, find_by_name, random_verse_ref, validate_against, CatalogMismatch};
use crate::config::QuizConfig;
use crate::content::ContentClient;
use crate::domain::{Ayah, PlayerStats, Question, QuestionSource};
use crate::error::QuizError;
use crate::options::{generate_options, OptionsError, RandomSource};
use crate::scoring::{self, AnswerOutcome};
use crate::util::unix_now;

/// Unanswered questions, indexed by id and by arrival order.
///
/// Arrival is a sequence number, so eviction order is exact even when many
/// questions are served within the same second.
#[derive(Default)]
pub struct PendingQuestions {
    by_id: HashMap<String, (u64, Question)>,
    arrivals: BTreeMap<u64, String>,
    next_seq: u64,
}

impl PendingQuestions {
    /// Store `q`, first evicting the oldest entry when `cap` is reached.
    /// Returns the evicted id, if any.
    pub fn insert(&mut self, q: Question, cap: usize) -> Option<String> {
        let mut evicted = None;
        if self.by_id.len() >= cap.max(1) {
            if let Some((_, id)) = self.arrivals.pop_first() {
                self.by_id.remove(&id);
                evicted = Some(id);
            }
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.arrivals.insert(seq, q.id.clone());
        if let Some((old_seq, _)) = self.by_id.insert(q.id.clone(), (seq, q)) {
            self.arrivals.remove(&old_seq);
        }
        evicted
    }

    pub fn take(&mut self, id: &str) -> Option<Question> {
        let (seq, q) = self.by_id.remove(id)?;
        self.arrivals.remove(&seq);
        Some(q)
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.by_id.get(id).map(|(_, q)| q)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<RwLock<PendingQuestions>>,
    pub players: Arc<RwLock<HashMap<String, PlayerStats>>>,
    pub content: Option<ContentClient>,
    pub config: QuizConfig,
    catalog: Vec<&'static str>,
    fallback: Vec<Ayah>,
}

impl AppState {
    /// Build state from env: load config, init the content client.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        Self::with_config(QuizConfig::from_env())
    }

    pub fn with_config(config: QuizConfig) -> Self {
        let content = ContentClient::from_config(&config.content);
        if let Some(c) = &content {
            info!(target: "surah_quiz", base_url = %c.base_url, edition = %c.audio_edition, "Content API enabled.");
        } else {
            info!(target: "surah_quiz", "Content API disabled. Serving built-in verses only.");
        }

        Self {
            questions: Arc::new(RwLock::new(PendingQuestions::default())),
            players: Arc::new(RwLock::new(HashMap::new())),
            content,
            config,
            catalog: chapter_names(),
            fallback: fallback_ayat(),
        }
    }

    /// Compare the catalog with the API's chapter list and log every difference.
    /// Returns None when there is no client or the fetch failed.
    #[instrument(level = "info", skip(self))]
    pub async fn validate_catalog(&self) -> Option<Vec<CatalogMismatch>> {
        let client = self.content.as_ref()?;
        match client.fetch_chapter_list().await {
            Ok(remote) => {
                let found = validate_against(&remote);
                for m in &found {
                    warn!(target: "surah_quiz", mismatch = ?m, "Catalog differs from content API");
                }
                info!(target: "surah_quiz", remote = remote.len(), mismatches = found.len(), "Catalog validated");
                Some(found)
            }
            Err(e) => {
                error!(target: "surah_quiz", error = %e, "Could not fetch chapter list for validation");
                None
            }
        }
    }

    /// Selection policy:
    /// Fetch a random verse from the content API when available.
    /// Otherwise (or on failure) serve a built-in fallback verse.
    #[instrument(level = "info", skip(self))]
    pub async fn next_question(&self) -> Result<(Question, &'static str), QuizError> {
        let mut rng = StdRng::from_entropy();

        let (ayah, surah_name, source) = match &self.content {
            Some(client) => {
                let (surah, n) = random_verse_ref(&mut rng);
                match client.fetch_ayah(surah, n).await {
                    Ok(remote) => (remote.ayah, remote.surah_name, QuestionSource::Remote),
                    Err(e) => {
                        error!(target: "quiz", surah, ayah = n, error = %e, "Verse fetch failed; using fallback verse");
                        self.pick_fallback(&mut rng)
                    }
                }
            }
            None => self.pick_fallback(&mut rng),
        };

        let question = self.build_question(ayah, &surah_name, source, &mut rng)?;
        self.insert_question(question.clone()).await;
        info!(target: "quiz", id = %question.id, surah = question.ayah.surah_number, ayah = question.ayah.number_in_surah, source = source.as_str(), "Question ready");
        Ok((question, source.as_str()))
    }

    fn pick_fallback<R: RandomSource + ?Sized>(&self, rng: &mut R) -> (Ayah, String, QuestionSource) {
        let ayah = self.fallback[rng.next_index(self.fallback.len())].clone();
        let name = by_number(ayah.surah_number).map(|c| c.name).unwrap_or_default().to_string();
        (ayah, name, QuestionSource::Fallback)
    }

    /// Normalize the API's chapter name and attach four options.
    pub fn build_question<R: RandomSource + ?Sized>(
        &self,
        ayah: Ayah,
        surah_name: &str,
        source: QuestionSource,
        rng: &mut R,
    ) -> Result<Question, OptionsError> {
        let prefix = &self.config.game.prefix;
        let reference = normalize(surah_name);
        if find_by_name(&reference).is_none() {
            warn!(target: "quiz", %surah_name, %reference, "Chapter name not found in catalog");
        }
        let options = generate_options(&reference, &self.catalog, prefix, rng)?;
        Ok(Question {
            id: Uuid::new_v4().to_string(),
            expected: with_prefix(prefix, &reference),
            reference,
            ayah,
            options,
            source,
        })
    }

    #[instrument(level = "debug", skip(self, q), fields(id = %q.id))]
    pub async fn insert_question(&self, q: Question) {
        let cap = self.config.game.max_pending_questions;
        let mut questions = self.questions.write().await;
        if let Some(id) = questions.insert(q, cap) {
            warn!(target: "quiz", evicted = %id, cap, pending = questions.len(), "Pending question store full; evicted oldest");
        }
    }

    /// Read-only access to a pending question by id.
    #[cfg(test)]
    pub async fn get_question(&self, id: &str) -> Option<Question> {
        self.questions.read().await.get(id).cloned()
    }

    /// Remove a question so it can be answered only once.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn take_question(&self, id: &str) -> Option<Question> {
        self.questions.write().await.take(id)
    }

    /// Apply one graded answer to the player's stats.
    #[instrument(level = "debug", skip(self), fields(%player_id, %correct))]
    pub async fn record_answer(&self, player_id: &str, correct: bool) -> (PlayerStats, AnswerOutcome) {
        let rules = self.config.game.scoring();
        let mut players = self.players.write().await;
        let stats = players
            .entry(player_id.to_string())
            .or_insert_with(|| PlayerStats { player_id: player_id.to_string(), ..Default::default() });
        let outcome = scoring::record_answer(stats, correct, &rules, unix_now());
        (stats.clone(), outcome)
    }

    /// Stats for a player; a fresh zeroed record if we have not seen them yet.
    pub async fn player_stats(&self, player_id: &str) -> PlayerStats {
        self.players
            .read()
            .await
            .get(player_id)
            .cloned()
            .unwrap_or_else(|| PlayerStats { player_id: player_id.to_string(), ..Default::default() })
    }

    pub async fn reset_session(&self, player_id: &str) -> PlayerStats {
        let mut players = self.players.write().await;
        match players.get_mut(player_id) {
            Some(stats) => {
                scoring::reset_session(stats);
                stats.clone()
            }
            None => PlayerStats { player_id: player_id.to_string(), ..Default::default() },
        }
    }

    pub async fn leaderboard(&self, limit: usize) -> Vec<PlayerStats> {
        let players = self.players.read().await;
        scoring::leaderboard(players.values(), limit)
    }
}
