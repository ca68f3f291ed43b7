use std::collections::VecDeque;

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of the coin flips that interleave the two feed orders.
pub trait RandomSource {
    /// One fair boolean draw.
    fn next_bool(&mut self) -> bool;
}

/// Coin flips backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource(rng)
    }
}

impl RngSource<ThreadRng> {
    /// The thread-local generator. Not `Send`.
    pub fn thread() -> Self {
        RngSource(rand::rng())
    }
}

impl RngSource<StdRng> {
    /// Reproducible draws for a given seed.
    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }

    pub fn from_os() -> Self {
        RngSource(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_bool(&mut self) -> bool {
        self.0.random_bool(0.5)
    }
}

/// Replays a fixed sequence of draws, then keeps returning `fallback`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: VecDeque<bool>,
    fallback: bool,
    consumed: usize,
}

impl ScriptedSource {
    pub fn new(draws: impl IntoIterator<Item = bool>) -> Self {
        ScriptedSource {
            draws: draws.into_iter().collect(),
            fallback: false,
            consumed: 0,
        }
    }

    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// Number of draws taken so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RandomSource for ScriptedSource {
    fn next_bool(&mut self) -> bool {
        self.consumed += 1;
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_repeat() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        let left: Vec<bool> = (0..64).map(|_| a.next_bool()).collect();
        let right: Vec<bool> = (0..64).map(|_| b.next_bool()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn scripted_source_replays_then_falls_back() {
        let mut source = ScriptedSource::new([true, false]).with_fallback(true);
        assert!(source.next_bool());
        assert!(!source.next_bool());
        assert!(source.next_bool());
        assert_eq!(source.consumed(), 3);
    }
}
