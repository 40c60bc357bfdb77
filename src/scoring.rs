//! Score, streak, high score and achievement bookkeeping for one player.
//!
//! Pure functions over `PlayerStats`; the state module owns the map of players.

use crate::domain::{Achievement, PlayerStats};

/// Tunables for scoring, built from the `[game]` config table.
#[derive(Clone, Debug)]
pub struct ScoringRules {
  /// Offer a share prompt every N points.
  pub share_every: u32,
}

impl Default for ScoringRules {
  fn default() -> Self {
    Self { share_every: 3 }
  }
}

const STREAK_MILESTONES: [(u32, Achievement); 3] = [
  (5, Achievement::Streak5),
  (10, Achievement::Streak10),
  (20, Achievement::Streak20),
];

const SCORE_MILESTONES: [(u32, Achievement); 3] = [
  (100, Achievement::Score100),
  (500, Achievement::Score500),
  (1000, Achievement::Score1000),
];

/// What changed after one answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOutcome {
  pub unlocked: Vec<Achievement>,
  pub share_prompt: bool,
  pub new_high_score: bool,
}

/// Apply one graded answer to `stats`.
pub fn record_answer(stats: &mut PlayerStats, correct: bool, rules: &ScoringRules, now: u64) -> AnswerOutcome {
  stats.total_questions += 1;
  stats.last_updated = now;

  if !correct {
    stats.wrong_answers += 1;
    stats.streak = 0;
    return AnswerOutcome { unlocked: vec![], share_prompt: false, new_high_score: false };
  }

  stats.correct_answers += 1;
  stats.score += 1;
  stats.streak += 1;
  stats.best_streak = stats.best_streak.max(stats.streak);

  let new_high_score = stats.score > stats.high_score;
  if new_high_score {
    stats.high_score = stats.score;
  }

  let mut unlocked = vec![];
  for (threshold, a) in STREAK_MILESTONES {
    if stats.streak >= threshold && !stats.achievements.contains(&a) {
      unlocked.push(a);
    }
  }
  for (threshold, a) in SCORE_MILESTONES {
    if stats.score >= threshold && !stats.achievements.contains(&a) {
      unlocked.push(a);
    }
  }
  stats.achievements.extend(unlocked.iter().copied());

  let share_prompt = rules.share_every > 0 && stats.score % rules.share_every == 0;
  AnswerOutcome { unlocked, share_prompt, new_high_score }
}

/// Start a new session: score and streak go back to zero, records stay.
pub fn reset_session(stats: &mut PlayerStats) {
  stats.score = 0;
  stats.streak = 0;
}

/// Top players by high score, ties broken by player id.
pub fn leaderboard<'a, I>(players: I, limit: usize) -> Vec<PlayerStats>
where
  I: IntoIterator<Item = &'a PlayerStats>,
{
  let mut all: Vec<&PlayerStats> = players.into_iter().collect();
  all.sort_by(|a, b| b.high_score.cmp(&a.high_score).then_with(|| a.player_id.cmp(&b.player_id)));
  all.into_iter().take(limit).cloned().collect()
}
