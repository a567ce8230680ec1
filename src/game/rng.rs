//! Deterministic random source
//!
//! Xorshift PRNG with explicitly seeded, serializable state. Session replay
//! and snapshot/restore both depend on the generator producing the same
//! sequence from the same state, so the state is part of saved sessions.

use serde::{Serialize, Deserialize};

/// Seedable PRNG for platform placement and particle variation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRng {
    state: u32,
}

impl GameRng {
    /// Create a generator from a seed. A zero seed is remapped because
    /// xorshift has a fixed point at zero.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E3779B9 } else { seed },
        }
    }

    /// Fast xorshift PRNG, uniform in [0, 1)
    pub fn next_random(&mut self) -> f32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        // Use the top 24 bits so the result stays below 1.0 after rounding
        (self.state >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Random float in range [min, max)
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_random() * (max - min)
    }
}
