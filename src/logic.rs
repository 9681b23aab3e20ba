//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Scoring an attempt (strategy from the request, the practice mode, or the default)
//!   - Sanitizing a lesson's exercises for a language
//!   - Serving the next unused phrase of a category for a session

use std::borrow::Cow;

use rand::thread_rng;
use tracing::{debug, info, instrument, warn};

use crate::config::AppConfig;
use crate::phrases::Language;
use crate::protocol::{PhraseOut, PhraseQuery, ResetIn, SanitizeIn, SanitizeOut, ScoreIn, ScoreOut};
use crate::sanitizer::{repaired_count, sanitize_exercises};
use crate::scoring::{score, PracticeMode, Strategy};
use crate::state::AppState;
use crate::tracker::pick_unused_phrase;
use crate::util::trunc_for_log;

/// An explicit strategy wins; otherwise the mode's configured strategy;
/// otherwise word overlap.
pub fn resolve_strategy(cfg: &AppConfig, strategy: Option<Strategy>, mode: Option<PracticeMode>) -> Strategy {
  strategy
    .or_else(|| mode.map(|m| cfg.practice.for_mode(m)))
    .unwrap_or_default()
}

#[instrument(level = "info", skip(state, input), fields(target_len = input.target.len(), spoken_len = input.spoken.len()))]
pub fn evaluate_attempt(state: &AppState, input: &ScoreIn) -> ScoreOut {
  let strategy = resolve_strategy(&state.config, input.strategy, input.mode);
  let verdict = state.config.scoring.verdict(score(strategy, &input.target, &input.spoken));
  debug!(
    target: "phrasecraft",
    target_text = %trunc_for_log(&input.target, 80),
    spoken = %trunc_for_log(&input.spoken, 80),
    ?strategy, accuracy = verdict.accuracy, grade = ?verdict.grade,
    "Attempt scored"
  );
  ScoreOut { accuracy: verdict.accuracy, grade: verdict.grade, strategy }
}

#[instrument(level = "info", skip(state, input), fields(language = ?input.language))]
pub fn sanitize_lesson(state: &AppState, input: SanitizeIn) -> SanitizeOut {
  let language = input
    .language
    .filter(|l| !l.trim().is_empty())
    .unwrap_or_else(|| state.config.content.default_language.clone());
  if Language::from_code(&language).is_none() {
    warn!(target: "phrasecraft", %language, "Unknown language code; repairs will use English phrases");
  }

  let exercises = input.exercises.unwrap_or_default();
  let total = exercises.len();
  let sanitized = sanitize_exercises(&exercises, &language);
  let repaired = repaired_count(&sanitized);
  let exercises: Vec<_> = sanitized.into_iter().map(Cow::into_owned).collect();
  info!(target: "phrasecraft", %language, total, repaired, "Lesson sanitized");
  SanitizeOut { language, exercises, repaired }
}

#[instrument(level = "info", skip(state), fields(session = %q.session, category = ?q.category))]
pub async fn next_phrase(state: &AppState, q: &PhraseQuery) -> Option<PhraseOut> {
  let language = q
    .language
    .clone()
    .unwrap_or_else(|| state.config.content.default_language.clone());
  let category = q.category;

  let picked = state
    .with_tracker(&q.session, |tracker| {
      pick_unused_phrase(&language, category, tracker, &mut thread_rng())
    })
    .await;

  match picked {
    Some(phrase) => {
      debug!(target: "phrases", session = %q.session, key = phrase.key, %language, "Phrase served");
      Some(PhraseOut { category, phrase })
    }
    None => {
      warn!(target: "phrases", ?category, "No phrases in category");
      None
    }
  }
}

#[instrument(level = "info", skip(state), fields(session = %r.session, category = ?r.category))]
pub async fn reset_phrases(state: &AppState, r: &ResetIn) {
  state.reset_tracker(&r.session, r.category).await;
  info!(target: "phrases", session = %r.session, "Phrase usage reset");
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Exercise, ExerciseContent};
  use crate::phrases::PhraseCategory;
  use crate::scoring::Grade;
  use serde_json::Map;

  #[test]
  fn strategy_resolution_order() {
    let cfg = AppConfig::default();
    assert_eq!(resolve_strategy(&cfg, Some(Strategy::Weighted), Some(PracticeMode::Pronunciation)), Strategy::Weighted);
    assert_eq!(resolve_strategy(&cfg, None, Some(PracticeMode::Dictation)), Strategy::Weighted);
    assert_eq!(resolve_strategy(&cfg, None, None), Strategy::WordOverlap);
  }

  #[test]
  fn evaluate_grades_with_configured_policy() {
    let state = AppState::default();
    let out = evaluate_attempt(&state, &ScoreIn {
      target: "Buenos días".into(),
      spoken: "buenos".into(),
      strategy: None,
      mode: Some(PracticeMode::Pronunciation),
    });
    assert_eq!(out.accuracy, 50);
    assert_eq!(out.grade, Grade::TryAgain);
    assert_eq!(out.strategy, Strategy::WordOverlap);
  }

  #[test]
  fn sanitize_without_exercises_is_empty() {
    let state = AppState::default();
    let out = sanitize_lesson(&state, SanitizeIn { language: None, exercises: None });
    assert!(out.exercises.is_empty());
    assert_eq!(out.repaired, 0);
    assert_eq!(out.language, "en");
  }

  #[test]
  fn sanitize_counts_repairs() {
    let state = AppState::default();
    let ex = Exercise {
      id: "a".into(),
      question: String::new(),
      correct_answer: String::new(),
      hint: None,
      content: ExerciseContent::SpeakAnswer,
      extra: Map::new(),
    };
    let out = sanitize_lesson(&state, SanitizeIn { language: Some("es".into()), exercises: Some(vec![ex]) });
    assert_eq!(out.repaired, 1);
    assert_eq!(out.exercises[0].question, "Speak this phrase");
  }

  #[tokio::test]
  async fn sessions_track_phrases_separately() {
    let state = AppState::default();
    let q = |session: &str| PhraseQuery {
      session: session.into(),
      language: Some("es".into()),
      category: PhraseCategory::Food,
    };
    let a1 = next_phrase(&state, &q("a")).await.expect("phrase");
    let a2 = next_phrase(&state, &q("a")).await.expect("phrase");
    assert_ne!(a1.phrase.key, a2.phrase.key);

    next_phrase(&state, &q("b")).await.expect("phrase");
    let used_b = state.with_tracker("b", |t| t.used_count(PhraseCategory::Food)).await;
    assert_eq!(used_b, 1);

    reset_phrases(&state, &ResetIn { session: "a".into(), category: None }).await;
    let used_a = state.with_tracker("a", |t| t.used_count(PhraseCategory::Food)).await;
    assert_eq!(used_a, 0);
  }
}
