//! Loading service configuration (scoring thresholds, strategy per practice
//! mode, default content language) from TOML.
//!
//! See `AppConfig` for the expected schema. Every field has a default, so an
//! empty file (or no file at all) is a valid configuration.

use serde::Deserialize;
use tracing::{error, info};

use crate::phrases::Language;
use crate::scoring::{PracticeStrategies, ScoringPolicy};

pub const CONFIG_PATH_ENV: &str = "PHRASECRAFT_CONFIG_PATH";

#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct AppConfig {
  #[serde(default)]
  pub scoring: ScoringPolicy,
  #[serde(default)]
  pub practice: PracticeStrategies,
  #[serde(default)]
  pub content: ContentConfig,
  #[serde(default)]
  pub sessions: SessionConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SessionConfig {
  /// Phrase trackers kept in memory; the least recently used one is dropped
  /// when a new session would exceed this.
  #[serde(default = "default_max_sessions")]
  pub max_sessions: usize,
}

fn default_max_sessions() -> usize {
  10_000
}

impl Default for SessionConfig {
  fn default() -> Self {
    Self { max_sessions: default_max_sessions() }
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ContentConfig {
  /// Language used when a sanitize request does not name one.
  #[serde(default = "default_language")]
  pub default_language: String,
}

fn default_language() -> String {
  Language::En.code().to_string()
}

impl Default for ContentConfig {
  fn default() -> Self {
    Self { default_language: default_language() }
  }
}

impl AppConfig {
  pub fn from_toml_str(s: &str) -> Result<Self, String> {
    let cfg: AppConfig = toml::from_str(s).map_err(|e| e.to_string())?;
    if cfg.scoring.perfect_threshold < cfg.scoring.pass_threshold {
      return Err(format!(
        "perfect_threshold ({}) is below pass_threshold ({})",
        cfg.scoring.perfect_threshold, cfg.scoring.pass_threshold
      ));
    }
    if cfg.scoring.perfect_threshold > 100 {
      return Err(format!("perfect_threshold ({}) exceeds 100", cfg.scoring.perfect_threshold));
    }
    if cfg.sessions.max_sessions == 0 {
      return Err("max_sessions must be at least 1".to_string());
    }
    Ok(cfg)
  }
}

/// Attempt to load `AppConfig` from PHRASECRAFT_CONFIG_PATH. On any IO/parse
/// error, logs and returns None so the caller falls back to defaults.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var(CONFIG_PATH_ENV).ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match AppConfig::from_toml_str(&s) {
      Ok(cfg) => {
        info!(target: "phrasecraft", %path, "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "phrasecraft", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "phrasecraft", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::scoring::Strategy;

  #[test]
  fn empty_file_is_all_defaults() {
    let cfg = AppConfig::from_toml_str("").expect("parses");
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.scoring.pass_threshold, 70);
    assert_eq!(cfg.content.default_language, "en");
    assert_eq!(cfg.sessions.max_sessions, 10_000);
  }

  #[test]
  fn partial_sections_keep_other_defaults() {
    let cfg = AppConfig::from_toml_str(
      r#"
        [scoring]
        pass_threshold = 60

        [practice]
        pronunciation = "weighted"

        [content]
        default_language = "es"
      "#,
    )
    .expect("parses");
    assert_eq!(cfg.scoring.pass_threshold, 60);
    assert_eq!(cfg.scoring.perfect_threshold, 90);
    assert_eq!(cfg.practice.pronunciation, Strategy::Weighted);
    assert_eq!(cfg.practice.dictation, Strategy::Weighted);
    assert_eq!(cfg.practice.talk_practice, Strategy::WordOverlap);
    assert_eq!(cfg.content.default_language, "es");
  }

  #[test]
  fn rejects_inverted_thresholds_and_bad_strategy() {
    assert!(AppConfig::from_toml_str("[scoring]\npass_threshold = 95\nperfect_threshold = 80\n").is_err());
    assert!(AppConfig::from_toml_str("[scoring]\nperfect_threshold = 120\n").is_err());
    assert!(AppConfig::from_toml_str("[practice]\ndictation = \"fuzzy\"\n").is_err());
    assert!(AppConfig::from_toml_str("[sessions]\nmax_sessions = 0\n").is_err());
  }

  #[test]
  fn session_cap_is_configurable() {
    let cfg = AppConfig::from_toml_str("[sessions]\nmax_sessions = 3\n").expect("parses");
    assert_eq!(cfg.sessions.max_sessions, 3);
  }
}
