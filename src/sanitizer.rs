//! Exercise sanitizer: the single gate every exercise row passes before it is
//! rendered or scored.
//!
//! An exercise whose question, answer or options still carry generator
//! placeholders (`correct_option`, `word1`, `wrong_a`, ...) or are too thin to
//! render is rebuilt from the phrase pool. Rebuilding is deterministic: the
//! seed is a hash of `"{id}-{index}-{language}"`, so a reload shows the same
//! synthesized content. Exercises that are already valid are handed back as
//! borrowed references, untouched.
//!
//! Options of unknown exercise types are never rewritten. Such a row whose
//! options look like placeholders is only rebuilt when its question or answer
//! changes; otherwise it comes back borrowed and is not counted as repaired.
//!
//! Nothing here fails: unknown languages use the English pool and odd option
//! shapes are simply classified as needing repair.

use std::borrow::Cow;
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::{
  choice_list, pair_list, word_list, Exercise, ExerciseContent, MatchPair, PhrasePair,
};
use crate::phrases::{localized_pool, phrase_pairs};
use crate::rng::{hash_string, seeded_shuffle};

const EXACT_PLACEHOLDERS: [&str; 4] = [
  "correct_option",
  "translated_phrase",
  "correct sentence",
  "the correct sentence",
];

static NUMBERED_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?i)^(?:word|translation|option)\s?\d+$").expect("placeholder pattern is valid")
});

const CHOICE_DISTRACTORS: usize = 3;
const MATCH_PAIR_COUNT: usize = 4;
const HINT_CANDIDATE_CAP: usize = 20;
const HINT_DISTRACTOR_MAX: usize = 4;

const TYPE_WHAT_YOU_HEAR_PROMPT: &str = "Type what you hear";
const SPEAK_PROMPT: &str = "Speak this phrase";
const MATCH_PROMPT: &str = "Match the pairs";

/// True for empty/blank strings and for the markers content generators leave
/// behind when they fail to fill a slot.
pub fn is_placeholder(s: &str) -> bool {
  let t = s.trim();
  if t.is_empty() {
    return true;
  }
  let lower = t.to_lowercase();
  EXACT_PLACEHOLDERS.contains(&lower.as_str())
    || lower.starts_with("wrong_")
    || NUMBERED_PLACEHOLDER.is_match(t)
}

/// Needs at least `min_distinct` different entries, none of them placeholders.
fn list_needs_repair(items: &[String], min_distinct: usize) -> bool {
  if items.iter().any(|s| is_placeholder(s)) {
    return true;
  }
  items.iter().collect::<HashSet<_>>().len() < min_distinct
}

fn pairs_need_repair(pairs: &[MatchPair]) -> bool {
  pairs.is_empty() || pairs.iter().any(|p| is_placeholder(&p.left) || is_placeholder(&p.right))
}

/// Options of an unknown exercise type, judged by whatever shape they have.
fn raw_options_need_repair(options: &Value) -> bool {
  match options {
    Value::Array(_) => list_needs_repair(&choice_list(options), 2),
    Value::Object(obj) if obj.contains_key("words") => list_needs_repair(&word_list(options), 1),
    Value::Object(obj) if obj.contains_key("pairs") => pairs_need_repair(&pair_list(options)),
    _ => false,
  }
}

/// Does this exercise need to be rebuilt?
pub fn needs_repair(ex: &Exercise) -> bool {
  if is_placeholder(&ex.question) {
    return true;
  }
  // match_pairs has no single correct string
  let answer_checked = !matches!(ex.content, ExerciseContent::MatchPairs { .. });
  if answer_checked && is_placeholder(&ex.correct_answer) {
    return true;
  }

  match &ex.content {
    ExerciseContent::MultipleChoice { options }
    | ExerciseContent::SelectSentence { options }
    | ExerciseContent::Translation { options }
    | ExerciseContent::FillBlank { options }
    | ExerciseContent::TypeWhatYouHear { options } => list_needs_repair(options, 2),
    ExerciseContent::WordBank { words } => list_needs_repair(words, 1),
    ExerciseContent::MatchPairs { pairs } => pairs_need_repair(pairs),
    ExerciseContent::SpeakAnswer => false,
    ExerciseContent::Other { options, .. } => raw_options_need_repair(options),
  }
}

/// Per-language material shared by every repair in one call.
struct RepairContext<'c> {
  language: &'c str,
  pairs: Vec<PhrasePair>,
  pool: Vec<&'static str>,
}

impl<'c> RepairContext<'c> {
  fn new(language: &'c str) -> Self {
    Self { language, pairs: phrase_pairs(language), pool: localized_pool(language) }
  }

  fn seed_for(&self, id: &str, index: usize) -> i64 {
    i64::from(hash_string(&format!("{}-{}-{}", id, index, self.language)))
  }

  fn repair(&self, ex: &Exercise, index: usize) -> Exercise {
    let seed = self.seed_for(&ex.id, index);
    let pair = self.pairs[seed as usize % self.pairs.len()];
    let correct = pair.target.to_string();
    let translate_prompt = format!("Translate: \"{}\"", pair.en);

    debug!(
      target: "sanitizer",
      id = %ex.id, index, exercise_type = ex.exercise_type(), seed, phrase = pair.key,
      "Repairing placeholder exercise"
    );

    let (question, correct_answer, content) = match &ex.content {
      ExerciseContent::MultipleChoice { .. } => (
        translate_prompt,
        correct.clone(),
        ExerciseContent::MultipleChoice { options: self.choice_options(pair.target, seed) },
      ),
      ExerciseContent::SelectSentence { .. } => (
        translate_prompt,
        correct.clone(),
        ExerciseContent::SelectSentence { options: self.choice_options(pair.target, seed) },
      ),
      ExerciseContent::Translation { .. } => (
        translate_prompt,
        correct.clone(),
        ExerciseContent::Translation { options: self.word_hint_bank(pair.target, seed) },
      ),
      ExerciseContent::FillBlank { .. } => (
        translate_prompt,
        correct.clone(),
        ExerciseContent::FillBlank { options: self.word_hint_bank(pair.target, seed) },
      ),
      ExerciseContent::WordBank { .. } => (
        format!("Arrange the words: \"{}\"", pair.en),
        correct.clone(),
        ExerciseContent::WordBank { words: self.word_hint_bank(pair.target, seed) },
      ),
      ExerciseContent::TypeWhatYouHear { .. } => (
        TYPE_WHAT_YOU_HEAR_PROMPT.to_string(),
        correct.clone(),
        ExerciseContent::TypeWhatYouHear { options: self.word_hint_bank(pair.target, seed) },
      ),
      ExerciseContent::SpeakAnswer => (SPEAK_PROMPT.to_string(), correct.clone(), ExerciseContent::SpeakAnswer),
      ExerciseContent::MatchPairs { .. } => (
        MATCH_PROMPT.to_string(),
        String::new(),
        ExerciseContent::MatchPairs { pairs: self.match_pairs(seed) },
      ),
      other @ ExerciseContent::Other { .. } => {
        let question = if is_placeholder(&ex.question) { translate_prompt } else { ex.question.clone() };
        let answer = if is_placeholder(&ex.correct_answer) { correct.clone() } else { ex.correct_answer.clone() };
        (question, answer, other.clone())
      }
    };

    Exercise {
      id: ex.id.clone(),
      question,
      correct_answer,
      hint: ex.hint.clone(),
      content,
      extra: ex.extra.clone(),
    }
  }

  /// Correct answer plus three distinct distractors from the pool, shuffled.
  fn choice_options(&self, correct: &'static str, seed: i64) -> Vec<String> {
    let others: Vec<&str> = self.pool.iter().copied().filter(|p| *p != correct).collect();
    let mut options = vec![correct];
    options.extend(seeded_shuffle(&others, seed).into_iter().take(CHOICE_DISTRACTORS));
    seeded_shuffle(&options, seed + 1).into_iter().map(String::from).collect()
  }

  /// Words of the answer mixed with a few words from other phrases.
  fn word_hint_bank(&self, correct: &str, seed: i64) -> Vec<String> {
    let correct_words: Vec<&str> = correct.split_whitespace().collect();

    let mut candidates: Vec<&str> = Vec::new();
    for phrase in &self.pool {
      for word in phrase.split_whitespace() {
        if !correct_words.contains(&word) && !candidates.contains(&word) {
          candidates.push(word);
        }
      }
    }
    candidates.truncate(HINT_CANDIDATE_CAP);

    let wanted = correct_words.len().clamp(1, HINT_DISTRACTOR_MAX);
    let distractors = seeded_shuffle(&candidates, seed).into_iter().take(wanted);

    let mut bank: Vec<&str> = Vec::with_capacity(correct_words.len() + wanted);
    for word in correct_words.iter().copied().chain(distractors) {
      if !bank.contains(&word) {
        bank.push(word);
      }
    }
    seeded_shuffle(&bank, seed + 1).into_iter().map(String::from).collect()
  }

  fn match_pairs(&self, seed: i64) -> Vec<MatchPair> {
    seeded_shuffle(&self.pairs, seed)
      .into_iter()
      .take(MATCH_PAIR_COUNT)
      .map(|p| MatchPair { left: p.en.to_string(), right: p.target.to_string() })
      .collect()
  }
}

/// Sanitize a lesson's exercises for `language`.
///
/// Same length and order as the input. Valid exercises come back borrowed;
/// repaired ones are new values. The service calls this too and counts the
/// `Cow::Owned` entries as repairs.
#[instrument(level = "debug", skip(exercises), fields(count = exercises.len()))]
pub fn sanitize_exercises<'a>(exercises: &'a [Exercise], language: &str) -> Vec<Cow<'a, Exercise>> {
  if exercises.is_empty() {
    return Vec::new();
  }
  let ctx = RepairContext::new(language);
  exercises
    .iter()
    .enumerate()
    .map(|(index, ex)| {
      if !needs_repair(ex) {
        return Cow::Borrowed(ex);
      }
      let rebuilt = ctx.repair(ex, index);
      // unknown types may have nothing we are allowed to rewrite
      if rebuilt == *ex {
        Cow::Borrowed(ex)
      } else {
        Cow::Owned(rebuilt)
      }
    })
    .collect()
}

/// How many entries of a sanitized list were rebuilt.
pub fn repaired_count(sanitized: &[Cow<'_, Exercise>]) -> usize {
  sanitized.iter().filter(|c| matches!(c, Cow::Owned(_))).count()
}
