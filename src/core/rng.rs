//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Context streams**: Independent sequences for board generation and dice,
//!   so changing how many dice are rolled never changes the board
//!
//! ```
//! use ladder_race::core::GameRng;
//!
//! let root = GameRng::new(42);
//! let mut board = root.for_context("board");
//! let mut again = GameRng::new(42).for_context("board");
//!
//! assert_eq!(board.gen_inclusive(2, 99), again.gen_inclusive(2, 99));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Seeded RNG shared by the board generator and the dice.
///
/// Uses ChaCha8 for speed while keeping runs reproducible across platforms.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform integer in `[low, high]`.
    ///
    /// Callers guarantee `low <= high`.
    pub fn gen_inclusive(&mut self, low: u32, high: u32) -> u32 {
        self.inner.gen_range(low..=high)
    }

    /// Uniform die face in `[1, faces]`.
    pub fn gen_face(&mut self, faces: u8) -> u8 {
        self.inner.gen_range(1..=faces.max(1))
    }
}
