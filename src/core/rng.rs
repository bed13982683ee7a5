//! Seeded randomness for policies.
//!
//! The engine itself never draws random numbers: the same configuration
//! and the same actions always produce the same match. Randomness lives
//! on the policy side, and `PolicyRng` keeps that reproducible too.
//!
//! ## Streams
//!
//! - `fork()`: a new, deterministic branch (one per robot, one per episode)
//! - `for_context(name)`: an independent stream keyed by a label, so that
//!   adding draws in one place does not shift the sequence in another
//!
//! ```
//! use rust_hubsim::core::PolicyRng;
//!
//! let mut a = PolicyRng::new(7).for_context("red");
//! let mut b = PolicyRng::new(7).for_context("red");
//! assert_eq!(a.gen_index(12), b.gen_index(12));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Deterministic ChaCha8 generator with forking and labelled streams.
#[derive(Clone, Debug)]
pub struct PolicyRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl PolicyRng {
    /// Create a generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this generator started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Split off an independent branch.
    ///
    /// The n-th fork of a given seed is always the same.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Derive a labelled stream from this generator's seed.
    ///
    /// Uses `FxHasher`, which is stable across runs and platforms.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform index in `0..len`. `len` must be nonzero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Capture the generator position.
    #[must_use]
    pub fn state(&self) -> PolicyRngState {
        PolicyRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Resume from a captured position.
    #[must_use]
    pub fn from_state(state: &PolicyRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable generator position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRngState {
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    pub fork_counter: u64,
}
