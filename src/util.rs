//! Small text helpers shared by the scorer, the sanitizer and the service layer.

/// Word character in the regex sense: letters, digits (any script) and `_`.
pub fn is_word_char(ch: char) -> bool {
  ch.is_alphanumeric() || ch == '_'
}

/// Lowercase, drop everything that is neither a word character nor
/// whitespace, then trim.
pub fn normalize_for_match(s: &str) -> String {
  s.to_lowercase()
    .chars()
    .filter(|c| is_word_char(*c) || c.is_whitespace())
    .collect::<String>()
    .trim()
    .to_string()
}

/// Whitespace-separated tokens of an already normalized string.
/// Empty tokens never appear.
pub fn words(normalized: &str) -> Vec<&str> {
  normalized.split_whitespace().collect()
}

/// Lowercased alphanumerics only, spacing removed. Used for character-level
/// comparison where word boundaries should not matter.
pub fn dense_alnum(s: &str) -> String {
  s.to_lowercase().chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Log-safe truncation for large strings.
/// Cuts on a char boundary so multi-byte text never panics.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) {
    cut -= 1;
  }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_strips_punctuation_and_case() {
    assert_eq!(normalize_for_match("  ¡Hola, Mundo!  "), "hola mundo");
    assert_eq!(normalize_for_match("What's up?"), "whats up");
    assert_eq!(normalize_for_match("snake_case"), "snake_case");
  }

  #[test]
  fn normalize_keeps_non_latin_letters() {
    assert_eq!(normalize_for_match("Buenos días."), "buenos días");
    assert_eq!(normalize_for_match("こんにちは！"), "こんにちは");
  }

  #[test]
  fn normalize_of_symbols_only_is_empty() {
    assert_eq!(normalize_for_match("?!…\u{0007}"), "");
  }

  #[test]
  fn dense_drops_spaces_and_underscores() {
    assert_eq!(dense_alnum("Où sont les_toilettes ?"), "oùsontlestoilettes");
  }

  #[test]
  fn words_never_yields_empty_tokens() {
    assert!(words("").is_empty());
    assert_eq!(words(" a  b "), vec!["a", "b"]);
  }

  #[test]
  fn trunc_respects_char_boundaries() {
    let s = "日本語のテキスト";
    let out = trunc_for_log(s, 4);
    assert!(out.starts_with("日"));
    assert!(out.contains("bytes total"));
    assert_eq!(trunc_for_log("short", 10), "short");
  }
}
