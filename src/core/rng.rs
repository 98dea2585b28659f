// Copyright @yucwang 2026

use crate::math::constants::{ Float, Vector3f };

pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Deterministic per-pixel stream: identical positions always yield the
    /// same sample sequence, so a forward pass is repeatable.
    pub fn from_position(position: &Vector3f, salt: u64) -> Self {
        let mut state = salt ^ 0x9e3779b97f4a7c15;
        for c in 0..3 {
            state = state
                .wrapping_mul(0x100000001b3)
                .wrapping_add(position[c].to_bits() as u64);
        }
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    pub fn next_f32(&mut self) -> Float {
        (self.next_u32() as Float) / (u32::MAX as Float)
    }
}
