// Copyright 2026 @TwoCookingMice

pub mod constants;
pub mod frame;
pub mod grid;
pub mod warp;
