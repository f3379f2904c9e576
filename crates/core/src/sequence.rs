//! Sequence module - the growing list of symbols and its replay cursor
//!
//! The same cursor serves both halves of a round: the machine walks it to play
//! the sequence back, then it is rewound with `reset(false)` and walked again to
//! check the player's selections one for one.

use crate::rng::SimpleRng;
use crate::types::{Next, Symbol};

#[derive(Debug, Clone)]
pub struct Sequence {
    list: Vec<Symbol>,
    /// Next unread index, always in `0..=list.len()`.
    cursor: usize,
    pad_count: u8,
    rng: SimpleRng,
}

impl Sequence {
    /// Create an empty sequence drawing symbols from `pad_count` pads.
    pub fn new(pad_count: u8, seed: u32) -> Self {
        debug_assert!(pad_count > 0);
        Self {
            list: Vec::new(),
            cursor: 0,
            pad_count,
            rng: SimpleRng::new(seed),
        }
    }

    /// Rewind the cursor; when `growing`, append one new random symbol first.
    pub fn reset(&mut self, growing: bool) {
        self.cursor = 0;
        if growing {
            let symbol = self.rng.next_symbol(self.pad_count);
            self.list.push(symbol);
        }
    }

    /// Return the symbol under the cursor and advance past it.
    ///
    /// Once the cursor reaches the end this keeps returning
    /// [`Next::EndOfSequence`] without moving.
    pub fn next(&mut self) -> Next {
        match self.list.get(self.cursor) {
            Some(&symbol) => {
                self.cursor += 1;
                Next::Symbol(symbol)
            }
            None => Next::EndOfSequence,
        }
    }

    pub fn has_next(&self) -> bool {
        self.cursor < self.list.len()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn pad_count(&self) -> u8 {
        self.pad_count
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.list
    }

    /// Full game reset: forget every symbol.
    ///
    /// The RNG keeps its state, so a restarted game gets a fresh sequence.
    pub fn clear(&mut self) {
        self.list.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sequence_is_empty() {
        let mut seq = Sequence::new(4, 1);
        assert_eq!(seq.len(), 0);
        assert!(!seq.has_next());
        assert_eq!(seq.next(), Next::EndOfSequence);
    }

    #[test]
    fn growing_reset_appends_exactly_one() {
        let mut seq = Sequence::new(4, 1);
        for n in 1..=10 {
            seq.reset(true);
            assert_eq!(seq.len(), n);
            assert_eq!(seq.cursor(), 0);
        }
    }

    #[test]
    fn non_growing_reset_only_rewinds() {
        let mut seq = Sequence::new(4, 1);
        seq.reset(true);
        seq.reset(true);
        let _ = seq.next();
        seq.reset(false);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.cursor(), 0);
    }

    #[test]
    fn replay_matches_playback_in_order() {
        let mut seq = Sequence::new(4, 42);
        for _ in 0..8 {
            seq.reset(true);
        }

        let mut played = Vec::new();
        while let Next::Symbol(s) = seq.next() {
            played.push(s);
        }

        seq.reset(false);
        let mut replayed = Vec::new();
        for _ in 0..seq.len() {
            replayed.push(seq.next().symbol().unwrap());
        }

        assert_eq!(played, replayed);
        assert_eq!(played.as_slice(), seq.as_slice());
    }

    #[test]
    fn has_next_agrees_with_next() {
        let mut seq = Sequence::new(3, 5);
        for _ in 0..5 {
            seq.reset(true);
        }
        seq.reset(false);
        loop {
            let expect_symbol = seq.has_next();
            match seq.next() {
                Next::Symbol(_) => assert!(expect_symbol),
                Next::EndOfSequence => {
                    assert!(!expect_symbol);
                    break;
                }
            }
        }
        // Exhausted cursor stays put.
        assert_eq!(seq.next(), Next::EndOfSequence);
        assert_eq!(seq.cursor(), seq.len());
    }

    #[test]
    fn earlier_symbols_survive_growth() {
        let mut seq = Sequence::new(4, 9);
        seq.reset(true);
        seq.reset(true);
        let prefix = seq.as_slice().to_vec();
        seq.reset(true);
        assert_eq!(&seq.as_slice()[..2], prefix.as_slice());
    }

    #[test]
    fn clear_forgets_everything() {
        let mut seq = Sequence::new(4, 9);
        seq.reset(true);
        seq.reset(true);
        seq.clear();
        assert!(seq.is_empty());
        assert_eq!(seq.cursor(), 0);
        seq.reset(true);
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Sequence::new(4, 77);
        let mut b = Sequence::new(4, 77);
        for _ in 0..16 {
            a.reset(true);
            b.reset(true);
        }
        assert_eq!(a.as_slice(), b.as_slice());
    }
}
