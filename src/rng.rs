//! Deterministic seeded randomness for exercise content.
//!
//! Everything here is keyed only by an explicit seed: no thread-local RNG,
//! no clock. The same seed yields the same draws on every platform, which is
//! what lets a repaired exercise regenerate identically after a reload.
//!
//! UI-level randomness (e.g. the phrase picker in `tracker`) uses `rand`
//! instead and must never be mixed with these helpers.

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

const LCG_MODULUS: i64 = 2_147_483_647;
const LCG_MULTIPLIER: i64 = 16_807;

/// FNV-1a over the UTF-16 code units of `s`.
///
/// The 32-bit state is read back as a signed integer and its absolute value
/// returned, so the result always fits in `[0, 2^31]`.
pub fn hash_string(s: &str) -> u32 {
  let mut hash = FNV_OFFSET_BASIS;
  for unit in s.encode_utf16() {
    hash ^= u32::from(unit);
    hash = hash.wrapping_mul(FNV_PRIME);
  }
  (hash as i32).unsigned_abs()
}

/// Park–Miller "minimal standard" generator (multiplier 16807, modulus 2^31 - 1).
///
/// One instance per call site; never shared.
#[derive(Clone, Debug)]
pub struct SeededRng {
  state: i64,
}

impl SeededRng {
  /// Seeds are folded into `[1, 2147483646]`: truncating remainder, then
  /// non-positive values are shifted up by `2147483646`.
  pub fn new(seed: i64) -> Self {
    let mut state = seed % LCG_MODULUS;
    if state <= 0 {
      state += LCG_MODULUS - 1;
    }
    // -2147483646 lands on zero, the generator's fixed point
    if state == 0 {
      state = LCG_MODULUS - 1;
    }
    Self { state }
  }

  /// Advance and return a float in `[0, 1)`.
  pub fn next_f64(&mut self) -> f64 {
    self.state = self.state * LCG_MULTIPLIER % LCG_MODULUS;
    (self.state - 1) as f64 / (LCG_MODULUS - 1) as f64
  }

  /// Uniform index in `[0, bound)`. `bound` must be non-zero.
  pub fn next_index(&mut self, bound: usize) -> usize {
    let idx = (self.next_f64() * bound as f64).floor() as usize;
    // draws are < 1.0, so this only guards float edge cases
    idx.min(bound.saturating_sub(1))
  }
}

/// Closure form of [`SeededRng`], for callers that only want draws.
pub fn make_seeded_rng(seed: i64) -> impl FnMut() -> f64 {
  let mut rng = SeededRng::new(seed);
  move || rng.next_f64()
}

/// Fisher–Yates shuffle into a new vector; `items` is left untouched.
pub fn seeded_shuffle<T: Clone>(items: &[T], seed: i64) -> Vec<T> {
  let mut out = items.to_vec();
  let mut rng = SeededRng::new(seed);
  for i in (1..out.len()).rev() {
    let j = rng.next_index(i + 1);
    out.swap(i, j);
  }
  out
}
