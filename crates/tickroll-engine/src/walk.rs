//! Per-tick price deltas.

use rand::distributions::Standard;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the price change applied to an instrument on each tick.
pub trait PriceWalk: Send {
    /// Returns the next delta.
    fn next_delta(&mut self) -> f64;
}

/// Uniform random walk with deltas in `[-max_delta, max_delta)`.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    rng: StdRng,
    max_delta: f64,
}

impl RandomWalk {
    /// Default half-width of the delta range.
    pub const DEFAULT_MAX_DELTA: f64 = 0.05;

    /// Creates a walk seeded from OS entropy.
    #[must_use]
    pub fn new(max_delta: f64) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            max_delta,
        }
    }

    /// Creates a reproducible walk.
    #[must_use]
    pub fn seeded(max_delta: f64, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_delta,
        }
    }
}

impl Default for RandomWalk {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DELTA)
    }
}

impl PriceWalk for RandomWalk {
    fn next_delta(&mut self) -> f64 {
        let unit: f64 = self.rng.sample(Standard);
        (unit - 0.5) * 2.0 * self.max_delta
    }
}

/// Deterministic walk cycling through a fixed list of deltas.
#[derive(Debug, Clone)]
pub struct FixedWalk {
    deltas: Vec<f64>,
    next: usize,
}

impl FixedWalk {
    /// Creates a walk that replays `deltas` in order, wrapping around.
    ///
    /// An empty list behaves like a constant zero delta.
    #[must_use]
    pub const fn new(deltas: Vec<f64>) -> Self {
        Self { deltas, next: 0 }
    }

    /// Creates a walk that always returns `delta`.
    #[must_use]
    pub fn constant(delta: f64) -> Self {
        Self::new(vec![delta])
    }
}

impl PriceWalk for FixedWalk {
    fn next_delta(&mut self) -> f64 {
        let Some(&delta) = self.deltas.get(self.next) else {
            return 0.0;
        };
        self.next = (self.next + 1) % self.deltas.len();
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_random_walk_stays_in_range() {
        let mut walk = RandomWalk::seeded(0.05, 7);
        for _ in 0..10_000 {
            let delta = walk.next_delta();
            assert!((-0.05..0.05).contains(&delta), "delta {delta} out of range");
        }
    }

    #[test]
    fn test_seeded_walk_is_reproducible() {
        let mut a = RandomWalk::seeded(0.05, 42);
        let mut b = RandomWalk::seeded(0.05, 42);
        for _ in 0..100 {
            assert_relative_eq!(a.next_delta(), b.next_delta());
        }
    }

    #[test]
    fn test_zero_width_walk() {
        let mut walk = RandomWalk::seeded(0.0, 1);
        assert_relative_eq!(walk.next_delta(), 0.0);
    }

    #[test]
    fn test_fixed_walk_cycles() {
        let mut walk = FixedWalk::new(vec![0.1, -0.2]);
        assert_relative_eq!(walk.next_delta(), 0.1);
        assert_relative_eq!(walk.next_delta(), -0.2);
        assert_relative_eq!(walk.next_delta(), 0.1);

        let mut empty = FixedWalk::new(Vec::new());
        assert_relative_eq!(empty.next_delta(), 0.0);
    }
}
