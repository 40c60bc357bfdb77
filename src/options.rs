//! Multiple-choice option generation.
//!
//! Given the correct chapter and the catalog, pick three distractors that do not
//! denote the same chapter, add the correct answer and shuffle so its slot is
//! uniform over the four positions.

use rand::Rng;
use thiserror::Error;

use crate::arabic::{normalize, with_prefix};

pub const OPTION_COUNT: usize = 4;
pub const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
  #[error("catalog has {available} eligible distractors, need {required}")]
  InsufficientCatalog { available: usize, required: usize },
}

/// Source of uniform indices. Any `rand::Rng` qualifies; tests plug in scripted sequences.
pub trait RandomSource {
  /// Uniform index in `0..upper`. `upper` is always at least 1.
  fn next_index(&mut self, upper: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
  fn next_index(&mut self, upper: usize) -> usize {
    self.gen_range(0..upper)
  }
}

/// In-place Fisher–Yates shuffle driven by `rng`.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
  for i in (1..items.len()).rev() {
    let j = rng.next_index(i + 1);
    items.swap(i, j);
  }
}

/// Four prefixed options: three distractors from `catalog` plus `correct`.
///
/// Every option is rendered from its normalized form so the correct answer is
/// spelled the same way as the distractors.
pub fn generate_options<R: RandomSource + ?Sized>(
  correct: &str,
  catalog: &[&str],
  prefix: &str,
  rng: &mut R,
) -> Result<[String; OPTION_COUNT], OptionsError> {
  let correct = normalize(correct);

  let mut pool: Vec<String> = Vec::with_capacity(catalog.len());
  for name in catalog {
    let n = normalize(name);
    if n != correct && !pool.contains(&n) {
      pool.push(n);
    }
  }
  if pool.len() < DISTRACTOR_COUNT {
    return Err(OptionsError::InsufficientCatalog { available: pool.len(), required: DISTRACTOR_COUNT });
  }

  shuffle(&mut pool, rng);
  pool.truncate(DISTRACTOR_COUNT);
  pool.push(correct);
  shuffle(&mut pool, rng);

  let mut it = pool.into_iter().map(|name| with_prefix(prefix, &name));
  Ok(std::array::from_fn(|_| it.next().unwrap_or_default()))
}
