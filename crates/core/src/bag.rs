//! Bag module - 7-bag piece randomization and the next-piece queue
//!
//! Each bag holds one of every kind, shuffled with a uniform Fisher-Yates
//! pass; the queue is kept topped up to the lookahead size by popping the
//! bag, regenerating it transparently when it runs dry. No kind can starve
//! beyond 7 spawns without appearing.
//!
//! The shuffle is driven by a small LCG so games are reproducible from a
//! seed.

use arrayvec::ArrayVec;
use blockfall_types::{PieceKind, NEXT_QUEUE_SIZE};

/// Simple LCG (Numerical Recipes constants).
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed (0 is remapped to avoid a stuck
    /// all-zero stream).
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform value in [0, max).
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Fisher-Yates shuffle: for i from the last index down to 1, swap with a
    /// uniform j in [0, i].
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// The piece feed: current bag plus the fixed-lookahead next queue.
#[derive(Debug, Clone)]
pub struct PieceFeed {
    bag: ArrayVec<PieceKind, 7>,
    queue: ArrayVec<PieceKind, NEXT_QUEUE_SIZE>,
    rng: SimpleRng,
}

impl PieceFeed {
    /// Create a feed with the queue already topped up.
    pub fn new(seed: u32) -> Self {
        let mut feed = Self {
            bag: ArrayVec::new(),
            queue: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        };
        feed.refill();
        feed
    }

    fn regenerate_bag(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
    }

    /// Top the queue up to the lookahead size, regenerating the bag whenever
    /// it runs out.
    fn refill(&mut self) {
        while self.queue.len() < NEXT_QUEUE_SIZE {
            if let Some(kind) = self.bag.pop() {
                self.queue.push(kind);
            } else {
                self.regenerate_bag();
            }
        }
    }

    /// Pop the head of the queue and top it back up.
    pub fn next(&mut self) -> PieceKind {
        let kind = self.queue.remove(0);
        self.refill();
        kind
    }

    /// The upcoming pieces, soonest first.
    pub fn preview(&self) -> &[PieceKind] {
        &self.queue
    }

    /// Current RNG state, so a restarted session continues the stream instead
    /// of replaying it.
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceFeed {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rng_is_deterministic() {
        let mut a = SimpleRng::new(12345);
        let mut b = SimpleRng::new(12345);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn rng_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn shuffle_keeps_all_elements() {
        let mut rng = SimpleRng::new(7);
        let mut kinds = PieceKind::ALL;
        rng.shuffle(&mut kinds);
        let set: HashSet<_> = kinds.iter().collect();
        assert_eq!(set.len(), 7);
    }

    #[test]
    fn queue_is_always_at_lookahead_size() {
        let mut feed = PieceFeed::new(42);
        assert_eq!(feed.preview().len(), NEXT_QUEUE_SIZE);
        for _ in 0..30 {
            feed.next();
            assert_eq!(feed.preview().len(), NEXT_QUEUE_SIZE);
        }
    }

    #[test]
    fn every_aligned_window_of_seven_draws_is_a_permutation() {
        let mut feed = PieceFeed::new(9001);
        for _ in 0..10 {
            let window: HashSet<_> = (0..7).map(|_| feed.next()).collect();
            assert_eq!(window.len(), 7);
        }
    }

    #[test]
    fn next_matches_preview_head() {
        let mut feed = PieceFeed::new(3);
        for _ in 0..20 {
            let head = feed.preview()[0];
            assert_eq!(feed.next(), head);
        }
    }

    #[test]
    fn same_seed_produces_same_sequence() {
        let mut a = PieceFeed::new(555);
        let mut b = PieceFeed::new(555);
        for _ in 0..21 {
            assert_eq!(a.next(), b.next());
        }
    }
}
