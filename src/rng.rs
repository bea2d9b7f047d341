//! Random draw source for glitch passes.
//!
//! Unseeded runs pull from the thread-local entropy generator without
//! interruption. Seeded runs use a deterministic generator that the
//! sequencer re-keys with `seed + k` before each band-shift iteration `k`,
//! and with `seed` alone before the channel-offset draws. That keeps the
//! channel offset reproducible no matter how many band shifts the current
//! intensity asked for.

use rand::rngs::{StdRng, ThreadRng};
use rand::{RngCore, SeedableRng};

/// Either library entropy or a re-keyable deterministic stream.
#[derive(Debug)]
pub enum GlitchRng {
    Entropy(ThreadRng),
    Seeded { seed: u64, rng: StdRng },
}

impl GlitchRng {
    /// Deterministic when `seed` is `Some`, entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Seeded {
                seed,
                rng: StdRng::seed_from_u64(seed),
            },
            None => Self::Entropy(rand::rng()),
        }
    }

    #[inline]
    pub fn is_seeded(&self) -> bool {
        matches!(self, Self::Seeded { .. })
    }

    /// Restart the deterministic stream at `seed + offset`. No-op for entropy.
    pub fn reseed(&mut self, offset: u64) {
        if let Self::Seeded { seed, rng } = self {
            *rng = StdRng::seed_from_u64(seed.wrapping_add(offset));
        }
    }
}

impl RngCore for GlitchRng {
    fn next_u32(&mut self) -> u32 {
        match self {
            Self::Entropy(rng) => rng.next_u32(),
            Self::Seeded { rng, .. } => rng.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            Self::Entropy(rng) => rng.next_u64(),
            Self::Seeded { rng, .. } => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        match self {
            Self::Entropy(rng) => rng.fill_bytes(dst),
            Self::Seeded { rng, .. } => rng.fill_bytes(dst),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn reseed_restarts_the_stream() {
        let mut a = GlitchRng::new(Some(7));
        let first: u64 = a.random();
        let _: u64 = a.random();
        a.reseed(0);
        assert_eq!(a.random::<u64>(), first);
    }

    #[test]
    fn reseed_offset_matches_fresh_seed() {
        let mut a = GlitchRng::new(Some(40));
        a.reseed(2);
        let mut b = GlitchRng::new(Some(42));
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn entropy_ignores_reseed() {
        let mut rng = GlitchRng::new(None);
        assert!(!rng.is_seeded());
        rng.reseed(3);
        let _: u32 = rng.random_range(0..10);
    }
}
