//! No-repeat phrase picking with an explicit usage tracker.
//!
//! The tracker is a plain value owned by the caller (the server keeps one per
//! session). Picks use a caller-supplied `rand::Rng`: this is UI-level
//! variety, not the seeded randomness of `crate::rng`.

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::domain::PhrasePair;
use crate::phrases::{phrases_in_category, PhraseCategory};

/// Phrase keys already shown, per category.
#[derive(Clone, Debug, Default)]
pub struct UsageTracker {
  used: HashMap<PhraseCategory, HashSet<&'static str>>,
}

impl UsageTracker {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn mark_used(&mut self, category: PhraseCategory, key: &'static str) {
    self.used.entry(category).or_default().insert(key);
  }

  pub fn is_used(&self, category: PhraseCategory, key: &str) -> bool {
    self.used.get(&category).is_some_and(|keys| keys.contains(key))
  }

  pub fn used_count(&self, category: PhraseCategory) -> usize {
    self.used.get(&category).map_or(0, HashSet::len)
  }

  pub fn reset_category(&mut self, category: PhraseCategory) {
    self.used.remove(&category);
  }

  pub fn reset_all(&mut self) {
    self.used.clear();
  }
}

/// Pick a phrase of `category` that this tracker has not seen yet and mark it.
///
/// Once every phrase of the category has been used the category starts over.
/// `None` only when the category has no phrases at all.
pub fn pick_unused_phrase<R: Rng + ?Sized>(
  code: &str,
  category: PhraseCategory,
  tracker: &mut UsageTracker,
  rng: &mut R,
) -> Option<PhrasePair> {
  let pool = phrases_in_category(code, category);
  if pool.is_empty() {
    return None;
  }

  let mut fresh: Vec<&PhrasePair> = pool.iter().filter(|p| !tracker.is_used(category, p.key)).collect();
  if fresh.is_empty() {
    debug!(target: "phrases", ?category, "All phrases used; starting a new cycle");
    tracker.reset_category(category);
    fresh = pool.iter().collect();
  }

  let chosen = **fresh.choose(rng)?;
  tracker.mark_used(category, chosen.key);
  Some(chosen)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn never_repeats_within_a_cycle() {
    let mut tracker = UsageTracker::new();
    let mut rng = StdRng::seed_from_u64(7);
    let size = phrases_in_category("es", PhraseCategory::Greetings).len();

    let mut seen = HashSet::new();
    for _ in 0..size {
      let p = pick_unused_phrase("es", PhraseCategory::Greetings, &mut tracker, &mut rng).expect("phrase");
      assert!(seen.insert(p.key), "repeated {}", p.key);
    }
    assert_eq!(tracker.used_count(PhraseCategory::Greetings), size);
  }

  #[test]
  fn exhausted_category_starts_over() {
    let mut tracker = UsageTracker::new();
    let mut rng = StdRng::seed_from_u64(1);
    let size = phrases_in_category("fr", PhraseCategory::Travel).len();
    for _ in 0..size {
      pick_unused_phrase("fr", PhraseCategory::Travel, &mut tracker, &mut rng);
    }
    let next = pick_unused_phrase("fr", PhraseCategory::Travel, &mut tracker, &mut rng);
    assert!(next.is_some());
    assert_eq!(tracker.used_count(PhraseCategory::Travel), 1);
  }

  #[test]
  fn categories_are_tracked_independently() {
    let mut tracker = UsageTracker::new();
    let mut rng = StdRng::seed_from_u64(3);
    pick_unused_phrase("de", PhraseCategory::Food, &mut tracker, &mut rng);
    assert_eq!(tracker.used_count(PhraseCategory::Food), 1);
    assert_eq!(tracker.used_count(PhraseCategory::Courtesy), 0);

    tracker.reset_all();
    assert_eq!(tracker.used_count(PhraseCategory::Food), 0);
  }

  #[test]
  fn picks_are_localized() {
    let mut tracker = UsageTracker::new();
    let mut rng = StdRng::seed_from_u64(9);
    let p = pick_unused_phrase("ja", PhraseCategory::Courtesy, &mut tracker, &mut rng).expect("phrase");
    assert_ne!(p.target, p.en);
    assert!(tracker.is_used(PhraseCategory::Courtesy, p.key));
  }
}
