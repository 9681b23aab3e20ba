//! Accuracy scoring between a target phrase and what the learner said or typed.
//!
//! Two strategies coexist because callers pick differently:
//!   - `WordOverlap`: bidirectional substring match per target word. Forgiving;
//!     used for short pronunciation drills where recognizers clip inflections.
//!   - `Weighted`: 40% exact-word recall + 60% character similarity
//!     (Levenshtein over the alphanumerics). Used for dictation-style checks.
//!
//! Both are total: every pair of strings yields a value in `[0, 100]`.
//!
//! Known quirk, kept on purpose: for two empty inputs `WordOverlap` says 100
//! (both normalize to the same empty string) while `Weighted` says 0 (no words,
//! no characters).

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::ScoreResult;
use crate::util::{dense_alnum, normalize_for_match, words};

const WORD_WEIGHT: f64 = 0.4;
const CHAR_WEIGHT: f64 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
  WordOverlap,
  Weighted,
}

impl Default for Strategy {
  fn default() -> Self { Strategy::WordOverlap }
}

/// Where a comparison comes from; decides the strategy via configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeMode {
  Pronunciation,
  SpeechPractice,
  TalkPractice,
  Dictation,
}

/// Strategy per practice mode, overridable from TOML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticeStrategies {
  pub pronunciation: Strategy,
  pub speech_practice: Strategy,
  pub talk_practice: Strategy,
  pub dictation: Strategy,
}

impl Default for PracticeStrategies {
  fn default() -> Self {
    Self {
      pronunciation: Strategy::WordOverlap,
      speech_practice: Strategy::Weighted,
      talk_practice: Strategy::WordOverlap,
      dictation: Strategy::Weighted,
    }
  }
}

impl PracticeStrategies {
  pub fn for_mode(&self, mode: PracticeMode) -> Strategy {
    match mode {
      PracticeMode::Pronunciation => self.pronunciation,
      PracticeMode::SpeechPractice => self.speech_practice,
      PracticeMode::TalkPractice => self.talk_practice,
      PracticeMode::Dictation => self.dictation,
    }
  }
}

/// Caller-side pass/perfect thresholds. Not part of the scorer itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
  pub pass_threshold: u8,
  pub perfect_threshold: u8,
}

impl Default for ScoringPolicy {
  fn default() -> Self {
    Self { pass_threshold: 70, perfect_threshold: 90 }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
  Perfect,
  Pass,
  TryAgain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Verdict {
  pub accuracy: u8,
  pub grade: Grade,
}

impl ScoringPolicy {
  pub fn grade(&self, accuracy: u8) -> Grade {
    if accuracy >= self.perfect_threshold {
      Grade::Perfect
    } else if accuracy >= self.pass_threshold {
      Grade::Pass
    } else {
      Grade::TryAgain
    }
  }

  pub fn verdict(&self, result: ScoreResult) -> Verdict {
    Verdict { accuracy: result.accuracy, grade: self.grade(result.accuracy) }
  }
}

/// Score `spoken` against `target` with the given strategy.
pub fn score(strategy: Strategy, target: &str, spoken: &str) -> ScoreResult {
  let accuracy = match strategy {
    Strategy::WordOverlap => word_overlap_accuracy(target, spoken),
    Strategy::Weighted => weighted_accuracy(target, spoken),
  };
  trace!(target: "scoring", ?strategy, accuracy, "scored");
  ScoreResult { accuracy }
}

/// Fraction of target words found in the spoken words, where "found" means
/// either side contains the other as a substring.
pub fn word_overlap_accuracy(target: &str, spoken: &str) -> u8 {
  let target = normalize_for_match(target);
  let spoken = normalize_for_match(spoken);
  if target == spoken {
    return 100;
  }

  let target_words = words(&target);
  let spoken_words = words(&spoken);
  let matches = target_words
    .iter()
    .filter(|tw| spoken_words.iter().any(|sw| sw.contains(**tw) || tw.contains(*sw)))
    .count();

  to_percent(matches as f64 / target_words.len().max(1) as f64 * 100.0)
}

/// Blend of exact-word recall and character-level edit similarity.
pub fn weighted_accuracy(target: &str, spoken: &str) -> u8 {
  let target_norm = normalize_for_match(target);
  let spoken_norm = normalize_for_match(spoken);
  let target_words = words(&target_norm);
  let spoken_words = words(&spoken_norm);

  let word_accuracy = if target_words.is_empty() {
    0.0
  } else {
    let hits = target_words.iter().filter(|w| spoken_words.contains(*w)).count();
    hits as f64 / target_words.len() as f64 * 100.0
  };

  let dense_target: Vec<char> = dense_alnum(target).chars().collect();
  let dense_spoken: Vec<char> = dense_alnum(spoken).chars().collect();
  let max_len = dense_target.len().max(dense_spoken.len());
  let char_accuracy = if max_len > 0 {
    let distance = levenshtein_chars(&dense_target, &dense_spoken);
    (max_len - distance) as f64 / max_len as f64 * 100.0
  } else {
    0.0
  };

  to_percent(word_accuracy * WORD_WEIGHT + char_accuracy * CHAR_WEIGHT)
}

/// Classic edit distance over Unicode scalar values
/// (insert, delete, substitute all cost 1).
pub fn levenshtein(a: &str, b: &str) -> usize {
  let a: Vec<char> = a.chars().collect();
  let b: Vec<char> = b.chars().collect();
  levenshtein_chars(&a, &b)
}

fn levenshtein_chars(a: &[char], b: &[char]) -> usize {
  // Row i of the DP table; row 0 is 0..=len(b).
  let mut prev: Vec<usize> = (0..=b.len()).collect();
  let mut curr = vec![0usize; b.len() + 1];

  for (i, ca) in a.iter().enumerate() {
    curr[0] = i + 1;
    for (j, cb) in b.iter().enumerate() {
      let substitution = prev[j] + usize::from(ca != cb);
      let deletion = prev[j + 1] + 1;
      let insertion = curr[j] + 1;
      curr[j + 1] = substitution.min(deletion).min(insertion);
    }
    std::mem::swap(&mut prev, &mut curr);
  }
  prev[b.len()]
}

fn to_percent(value: f64) -> u8 {
  value.round().clamp(0.0, 100.0) as u8
}
