//! Domain models: exercises (typed content per exercise type), phrase pairs, score results.
//!
//! Exercise rows arrive from the content store with a polymorphic `options`
//! column whose shape depends on `exercise_type`. At the serde boundary the row
//! is folded into `ExerciseContent`, one variant per type, so the rest of the
//! crate never sniffs JSON shapes. Decoding `options` never fails: anything
//! that does not fit decodes to an empty payload, which the sanitizer treats
//! as needing repair.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

pub const MULTIPLE_CHOICE: &str = "multiple_choice";
pub const SELECT_SENTENCE: &str = "select_sentence";
pub const TRANSLATION: &str = "translation";
pub const FILL_BLANK: &str = "fill_blank";
pub const TYPE_WHAT_YOU_HEAR: &str = "type_what_you_hear";
pub const SPEAK_ANSWER: &str = "speak_answer";
pub const WORD_BANK: &str = "word_bank";
pub const MATCH_PAIRS: &str = "match_pairs";

/// One left/right entry of a `match_pairs` exercise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
  #[serde(default, deserialize_with = "lenient_string")]
  pub left: String,
  #[serde(default, deserialize_with = "lenient_string")]
  pub right: String,
}

/// Per-type exercise payload.
#[derive(Clone, Debug, PartialEq)]
pub enum ExerciseContent {
  MultipleChoice { options: Vec<String> },
  SelectSentence { options: Vec<String> },
  Translation { options: Vec<String> },
  FillBlank { options: Vec<String> },
  TypeWhatYouHear { options: Vec<String> },
  WordBank { words: Vec<String> },
  MatchPairs { pairs: Vec<MatchPair> },
  SpeakAnswer,
  /// Unknown type: options are carried through untouched.
  Other { exercise_type: String, options: Value },
}

impl ExerciseContent {
  /// Build the typed payload from a row's `exercise_type` + raw `options`.
  pub fn from_row(exercise_type: &str, options: Value) -> Self {
    match exercise_type {
      MULTIPLE_CHOICE => Self::MultipleChoice { options: choice_list(&options) },
      SELECT_SENTENCE => Self::SelectSentence { options: choice_list(&options) },
      TRANSLATION => Self::Translation { options: choice_list(&options) },
      FILL_BLANK => Self::FillBlank { options: choice_list(&options) },
      TYPE_WHAT_YOU_HEAR => Self::TypeWhatYouHear { options: choice_list(&options) },
      WORD_BANK => Self::WordBank { words: word_list(&options) },
      MATCH_PAIRS => Self::MatchPairs { pairs: pair_list(&options) },
      SPEAK_ANSWER => Self::SpeakAnswer,
      other => Self::Other { exercise_type: other.to_string(), options },
    }
  }

  pub fn exercise_type(&self) -> &str {
    match self {
      Self::MultipleChoice { .. } => MULTIPLE_CHOICE,
      Self::SelectSentence { .. } => SELECT_SENTENCE,
      Self::Translation { .. } => TRANSLATION,
      Self::FillBlank { .. } => FILL_BLANK,
      Self::TypeWhatYouHear { .. } => TYPE_WHAT_YOU_HEAR,
      Self::WordBank { .. } => WORD_BANK,
      Self::MatchPairs { .. } => MATCH_PAIRS,
      Self::SpeakAnswer => SPEAK_ANSWER,
      Self::Other { exercise_type, .. } => exercise_type,
    }
  }

  /// The row form of `options`: array, `{words}`, `{pairs}` or `null`.
  pub fn options_value(&self) -> Value {
    match self {
      Self::MultipleChoice { options }
      | Self::SelectSentence { options }
      | Self::Translation { options }
      | Self::FillBlank { options }
      | Self::TypeWhatYouHear { options } => json!(options),
      Self::WordBank { words } => json!({ "words": words }),
      Self::MatchPairs { pairs } => json!({ "pairs": pairs }),
      Self::SpeakAnswer => Value::Null,
      Self::Other { options, .. } => options.clone(),
    }
  }

  /// Choice-style list, if this type carries one.
  pub fn choices(&self) -> Option<&[String]> {
    match self {
      Self::MultipleChoice { options }
      | Self::SelectSentence { options }
      | Self::Translation { options }
      | Self::FillBlank { options }
      | Self::TypeWhatYouHear { options } => Some(options),
      _ => None,
    }
  }
}

/// An exercise after it crossed the serde boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "ExerciseRow", into = "ExerciseRow")]
pub struct Exercise {
  pub id: String,
  pub question: String,
  pub correct_answer: String,
  pub hint: Option<String>,
  pub content: ExerciseContent,
  /// Columns this crate does not interpret (lesson id, order, ...).
  pub extra: Map<String, Value>,
}

impl Exercise {
  pub fn exercise_type(&self) -> &str {
    self.content.exercise_type()
  }
}

/// Wire shape of an exercise row.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExerciseRow {
  #[serde(default, deserialize_with = "lenient_string")]
  pub id: String,
  #[serde(default, deserialize_with = "lenient_string")]
  pub exercise_type: String,
  #[serde(default, deserialize_with = "lenient_string")]
  pub question: String,
  #[serde(default, deserialize_with = "lenient_string")]
  pub correct_answer: String,
  #[serde(default)]
  pub options: Value,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub hint: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl From<ExerciseRow> for Exercise {
  fn from(row: ExerciseRow) -> Self {
    Exercise {
      content: ExerciseContent::from_row(&row.exercise_type, row.options),
      id: row.id,
      question: row.question,
      correct_answer: row.correct_answer,
      hint: row.hint,
      extra: row.extra,
    }
  }
}

impl From<Exercise> for ExerciseRow {
  fn from(ex: Exercise) -> Self {
    ExerciseRow {
      exercise_type: ex.content.exercise_type().to_string(),
      options: ex.content.options_value(),
      id: ex.id,
      question: ex.question,
      correct_answer: ex.correct_answer,
      hint: ex.hint,
      extra: ex.extra,
    }
  }
}

/// A canonical phrase in English next to its localized form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PhrasePair {
  pub key: &'static str,
  pub en: &'static str,
  pub target: &'static str,
}

/// Outcome of one comparison. Integer in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
  pub accuracy: u8,
}

// -------- lenient decoding helpers --------

/// Accept strings, numbers, booleans and null for a string column.
fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
  let v = Value::deserialize(de)?;
  Ok(match v {
    Value::String(s) => s,
    Value::Null => String::new(),
    Value::Number(n) => n.to_string(),
    Value::Bool(b) => b.to_string(),
    other => other.to_string(),
  })
}

/// Text of one option entry: a bare string or an object carrying
/// `text`/`label`/`value`. Anything else is an empty (placeholder) entry.
fn option_text(v: &Value) -> String {
  match v {
    Value::String(s) => s.clone(),
    Value::Number(n) => n.to_string(),
    Value::Object(obj) => ["text", "label", "value"]
      .iter()
      .find_map(|k| obj.get(*k).and_then(Value::as_str))
      .unwrap_or_default()
      .to_string(),
    _ => String::new(),
  }
}

pub(crate) fn choice_list(options: &Value) -> Vec<String> {
  match options {
    Value::Array(items) => items.iter().map(option_text).collect(),
    _ => Vec::new(),
  }
}

pub(crate) fn word_list(options: &Value) -> Vec<String> {
  match options {
    Value::Object(obj) => obj.get("words").map(choice_list).unwrap_or_default(),
    Value::Array(_) => choice_list(options),
    _ => Vec::new(),
  }
}

pub(crate) fn pair_list(options: &Value) -> Vec<MatchPair> {
  let items = match options {
    Value::Object(obj) => obj.get("pairs").and_then(Value::as_array),
    Value::Array(items) => Some(items),
    _ => None,
  };
  items
    .map(|items| {
      items
        .iter()
        .map(|p| serde_json::from_value::<MatchPair>(p.clone()).unwrap_or(MatchPair {
          left: String::new(),
          right: String::new(),
        }))
        .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn decode(v: Value) -> Exercise {
    serde_json::from_value(v).expect("row decodes")
  }

  #[test]
  fn decodes_each_options_shape() {
    let mc = decode(json!({
      "id": "e1", "exercise_type": "multiple_choice",
      "question": "Q", "correct_answer": "A",
      "options": ["A", {"text": "B"}, {"label": "C"}]
    }));
    assert_eq!(mc.content, ExerciseContent::MultipleChoice { options: vec!["A".into(), "B".into(), "C".into()] });

    let wb = decode(json!({ "id": "e2", "exercise_type": "word_bank", "options": {"words": ["un", "dos"]} }));
    assert_eq!(wb.content, ExerciseContent::WordBank { words: vec!["un".into(), "dos".into()] });

    let mp = decode(json!({
      "id": "e3", "exercise_type": "match_pairs",
      "options": {"pairs": [{"left": "Hello", "right": "Hola"}]}
    }));
    assert_eq!(
      mp.content,
      ExerciseContent::MatchPairs { pairs: vec![MatchPair { left: "Hello".into(), right: "Hola".into() }] }
    );

    let sa = decode(json!({ "id": "e4", "exercise_type": "speak_answer", "options": null }));
    assert_eq!(sa.content, ExerciseContent::SpeakAnswer);
  }

  #[test]
  fn malformed_options_decode_to_empty_payloads() {
    let mc = decode(json!({ "id": 7, "exercise_type": "multiple_choice", "options": {"oops": true} }));
    assert_eq!(mc.id, "7");
    assert_eq!(mc.content, ExerciseContent::MultipleChoice { options: vec![] });

    let mc = decode(json!({ "id": "x", "exercise_type": "select_sentence", "options": [1, null, {"id": 3}] }));
    assert_eq!(mc.content.choices(), Some(&["1".to_string(), String::new(), String::new()][..]));

    let wb = decode(json!({ "id": "x", "exercise_type": "word_bank", "options": "nope" }));
    assert_eq!(wb.content, ExerciseContent::WordBank { words: vec![] });

    let mp = decode(json!({ "id": "x", "exercise_type": "match_pairs", "options": {"pairs": [42]} }));
    assert_eq!(mp.content, ExerciseContent::MatchPairs { pairs: vec![MatchPair { left: String::new(), right: String::new() }] });
  }

  #[test]
  fn missing_and_null_fields_become_empty() {
    let ex = decode(json!({ "exercise_type": "translation", "question": null }));
    assert_eq!(ex.id, "");
    assert_eq!(ex.question, "");
    assert_eq!(ex.correct_answer, "");
    assert_eq!(ex.hint, None);
  }

  #[test]
  fn unknown_type_keeps_options_and_extra_columns() {
    let row = json!({
      "id": "u1", "exercise_type": "listen_and_tap",
      "question": "Q", "correct_answer": "A",
      "options": {"grid": [[1, 2], [3, 4]]},
      "lesson_id": "L9", "order_index": 3
    });
    let ex = decode(row.clone());
    assert_eq!(ex.exercise_type(), "listen_and_tap");
    assert_eq!(ex.extra.get("lesson_id"), Some(&json!("L9")));

    let back = serde_json::to_value(&ex).expect("encodes");
    assert_eq!(back, row);
  }

  #[test]
  fn encodes_polymorphic_options() {
    let ex = Exercise {
      id: "m".into(),
      question: "Match the pairs".into(),
      correct_answer: String::new(),
      hint: Some("h".into()),
      content: ExerciseContent::MatchPairs { pairs: vec![MatchPair { left: "Yes".into(), right: "Sí".into() }] },
      extra: Map::new(),
    };
    let v = serde_json::to_value(&ex).expect("encodes");
    assert_eq!(v["exercise_type"], "match_pairs");
    assert_eq!(v["options"], json!({ "pairs": [{"left": "Yes", "right": "Sí"}] }));
    assert_eq!(v["hint"], "h");

    let speak = Exercise { content: ExerciseContent::SpeakAnswer, hint: None, ..ex };
    let v = serde_json::to_value(&speak).expect("encodes");
    assert_eq!(v["options"], Value::Null);
    assert!(v.get("hint").is_none());
  }
}
