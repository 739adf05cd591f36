//! RNG module - piece selection
//!
//! Two policies are supported (see [`Randomizer`]):
//!
//! - **SevenBag**: each bag holds one of each shape, shuffled; the bag is dealt
//!   out completely before a new one is shuffled.
//! - **Uniform**: every draw picks any shape with equal probability.
//!
//! Both are driven by a small seeded LCG so games are reproducible.

use crate::types::{Randomizer, ShapeKind};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (usable as a seed to continue the stream)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Source of spawn shapes
#[derive(Debug, Clone)]
pub struct PieceQueue {
    policy: Randomizer,
    rng: SimpleRng,
    /// Current bag; unused by the uniform policy
    bag: [ShapeKind; 7],
    /// Index into current bag (7 = exhausted)
    bag_index: usize,
}

impl PieceQueue {
    /// Create a new piece queue with the given policy and seed
    pub fn new(policy: Randomizer, seed: u32) -> Self {
        Self {
            policy,
            rng: SimpleRng::new(seed),
            bag: ShapeKind::ALL,
            bag_index: ShapeKind::ALL.len(),
        }
    }

    fn refill_bag(&mut self) {
        self.bag = ShapeKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next shape
    pub fn draw(&mut self) -> ShapeKind {
        match self.policy {
            Randomizer::Uniform => {
                let i = self.rng.next_range(ShapeKind::ALL.len() as u32) as usize;
                ShapeKind::ALL[i]
            }
            Randomizer::SevenBag => {
                if self.bag_index >= self.bag.len() {
                    self.refill_bag();
                }
                let kind = self.bag[self.bag_index];
                self.bag_index += 1;
                kind
            }
        }
    }

    /// Peek at the next shape without consuming it.
    ///
    /// Works on a clone so the preview is always what the next `draw()` returns.
    pub fn peek(&self) -> ShapeKind {
        self.clone().draw()
    }

    /// Seed that continues this queue's random stream
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(Randomizer::SevenBag, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_bag_deals_all_seven() {
        let mut queue = PieceQueue::new(Randomizer::SevenBag, 1);

        for _ in 0..3 {
            let mut drawn: Vec<ShapeKind> = (0..7).map(|_| queue.draw()).collect();
            drawn.sort();
            assert_eq!(drawn, ShapeKind::ALL.to_vec());
        }
    }

    #[test]
    fn test_peek_matches_draw() {
        for policy in [Randomizer::SevenBag, Randomizer::Uniform] {
            let mut queue = PieceQueue::new(policy, 99);
            for _ in 0..20 {
                let peeked = queue.peek();
                assert_eq!(peeked, queue.draw());
            }
        }
    }

    #[test]
    fn test_uniform_hits_every_shape() {
        let mut queue = PieceQueue::new(Randomizer::Uniform, 42);
        let mut seen = [false; 7];
        for _ in 0..500 {
            let kind = queue.draw();
            let i = ShapeKind::ALL.iter().position(|&k| k == kind).unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
