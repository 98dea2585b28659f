// Copyright @yucwang 2026

pub mod config;
pub mod error;
pub mod lighting;
pub mod rng;
