//! Phrasecraft · exercise content and pronunciation scoring core
//!
//! - `scoring`   : 0–100 accuracy between a target phrase and a transcript
//! - `rng`       : seeded FNV-1a hash, Park–Miller generator, Fisher–Yates shuffle
//! - `sanitizer` : placeholder detection and deterministic exercise repair
//! - `phrases`   : static phrase pool for 40 languages
//! - `tracker`   : per-session no-repeat phrase picking
//!
//! The remaining modules wrap the core in an Axum HTTP + WebSocket service.

pub mod config;
pub mod domain;
pub mod logic;
pub mod phrases;
pub mod protocol;
pub mod rng;
pub mod routes;
pub mod sanitizer;
pub mod scoring;
pub mod state;
pub mod telemetry;
pub mod tracker;
pub mod util;

pub use domain::{Exercise, ExerciseContent, MatchPair, PhrasePair, ScoreResult};
pub use rng::{hash_string, make_seeded_rng, seeded_shuffle, SeededRng};
pub use sanitizer::{is_placeholder, needs_repair, repaired_count, sanitize_exercises};
pub use scoring::{score, weighted_accuracy, word_overlap_accuracy, Strategy};
