//! RNG module - seeded symbol generation
//!
//! Provides a simple LCG so a game can be replayed exactly from its seed.
//! Symbols are drawn from the high bits of each step: the low bits of a
//! power-of-two LCG repeat with a tiny period (the lowest two bits cycle every
//! four draws), which would make a four-pad game visibly periodic.

use crate::types::Symbol;

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate a value in `[0, max)` using multiply-shift on the full word.
    pub fn next_below(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Draw one of `pad_count` symbols.
    pub fn next_symbol(&mut self, pad_count: u8) -> Symbol {
        Symbol::new(self.next_below(pad_count as u32) as u8)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
