//! Seedable random source threaded through dealing, drawing and agents.
//!
//! There is no process-wide generator. Everything that needs randomness takes
//! a `&mut GameRng`, so a game replays exactly from its seed:
//!
//! ```
//! use goalpile::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.gen_index(52), b.gen_index(52));
//!
//! // Forks give agents their own stream without disturbing the deal.
//! let mut agent_rng = a.fork();
//! let _ = agent_rng.gen_index(10);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic ChaCha8-backed generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Derive an independent, deterministic child stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Capture the stream position for replay.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Resume a stream captured with [`GameRng::state`].
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
    pub fork_counter: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_index(1000), rng2.gen_index(1000));
        }
    }

    #[test]
    fn test_fork_is_deterministic_and_distinct() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let mut f1 = rng1.fork();
        let mut f2 = rng2.fork();
        let seq1: Vec<_> = (0..10).map(|_| f1.gen_index(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| f2.gen_index(1000)).collect();
        assert_eq!(seq1, seq2);

        let own: Vec<_> = (0..10).map(|_| rng1.gen_index(1000)).collect();
        assert_ne!(own, seq1);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(3);
        let mut data: Vec<u32> = (1..=20).collect();
        rng.shuffle(&mut data);
        data.sort_unstable();
        assert_eq!(data, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = [1, 2, 3];
        assert!(items.contains(rng.choose(&items).unwrap()));

        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_state_round_trip() {
        let mut rng = GameRng::new(42);
        for _ in 0..37 {
            rng.gen_index(100);
        }

        let saved = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.gen_index(100)).collect();

        let mut restored = GameRng::from_state(&saved);
        let actual: Vec<_> = (0..10).map(|_| restored.gen_index(100)).collect();
        assert_eq!(expected, actual);

        let json = serde_json::to_string(&saved).unwrap();
        assert_eq!(serde_json::from_str::<GameRngState>(&json).unwrap(), saved);
    }
}
