//! 7-bag randomizer for piece generation
//!
//! All 7 kinds are shuffled into a bag and dealt out one at a time. A new
//! bag is only shuffled once the previous one is empty, so every window of
//! 7 draws starting at a refill holds each kind exactly once.

use crate::piece::Piece;
use crate::tetromino::PieceKind;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// The 7-bag piece randomizer
#[derive(Debug, Clone)]
pub struct Bag {
    /// Kinds left in the current bag, in deal order
    remaining: VecDeque<PieceKind>,
    rng: ChaCha8Rng,
}

impl Bag {
    /// Create an empty bag seeded from OS entropy
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy())
    }

    /// Create an empty bag with a fixed seed (reproducible sequences)
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: ChaCha8Rng) -> Self {
        Self {
            remaining: VecDeque::with_capacity(7),
            rng,
        }
    }

    /// Deal the next kind, shuffling a fresh bag first if this one is empty
    pub fn next_kind(&mut self) -> PieceKind {
        loop {
            if let Some(kind) = self.remaining.pop_front() {
                return kind;
            }
            self.refill();
        }
    }

    /// Deal the next piece at its spawn position
    pub fn draw(&mut self) -> Piece {
        Piece::spawn(self.next_kind())
    }

    /// Number of kinds left before the next reshuffle
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    fn refill(&mut self) {
        let mut new_bag = PieceKind::all();
        new_bag.shuffle(&mut self.rng);
        self.remaining.extend(new_bag);
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_bag_contains_all_pieces() {
        let mut bag = Bag::new();
        let pieces: HashSet<_> = (0..7).map(|_| bag.next_kind()).collect();
        assert_eq!(pieces.len(), 7);
        assert_eq!(bag.remaining(), 0);
    }

    #[test]
    fn test_every_window_of_seven_is_a_permutation() {
        let mut bag = Bag::with_seed(42);
        for _ in 0..50 {
            let window: HashSet<_> = (0..7).map(|_| bag.next_kind()).collect();
            assert_eq!(window.len(), 7);
        }
    }

    #[test]
    fn test_long_run_frequency_is_uniform() {
        let mut bag = Bag::with_seed(7);
        let mut counts: HashMap<PieceKind, usize> = HashMap::new();
        for _ in 0..700 {
            *counts.entry(bag.next_kind()).or_default() += 1;
        }
        assert_eq!(counts.len(), 7);
        assert!(counts.values().all(|&n| n == 100));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Bag::with_seed(1234);
        let mut b = Bag::with_seed(1234);
        let seq_a: Vec<_> = (0..21).map(|_| a.next_kind()).collect();
        let seq_b: Vec<_> = (0..21).map(|_| b.next_kind()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_draw_spawns_piece() {
        let mut bag = Bag::with_seed(3);
        let piece = bag.draw();
        assert_eq!(piece, Piece::spawn(piece.kind));
        assert_eq!(bag.remaining(), 6);
    }
}
