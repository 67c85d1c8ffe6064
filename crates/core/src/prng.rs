//! Seedable Xorshift64 generator.
//!
//! Engines never touch an ambient RNG: every random draw (well placement,
//! particle sampling, regeneration seeds) goes through a [`Xorshift64`] owned
//! by the engine, so a seed fully determines the output on every platform.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Xorshift64 with the (13, 7, 17) shift triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Zero is a fixed point of xorshift; it is swapped for this constant.
    const ZERO_SEED_REPLACEMENT: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 {
                Self::ZERO_SEED_REPLACEMENT
            } else {
                seed
            },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform in [0, 1), built from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform angle in [0, 2pi).
    pub fn next_angle(&mut self) -> f64 {
        self.next_f64() * TAU
    }

    /// Uniform point in the axis-aligned box `[min, max)`; x is drawn first.
    pub fn next_point(&mut self, min: DVec2, max: DVec2) -> DVec2 {
        let x = self.next_range(min.x, max.x);
        let y = self.next_range(min.y, max.y);
        DVec2::new(x, y)
    }
}
