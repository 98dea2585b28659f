// Copyright @yucwang 2026

use std::fmt;

/// Errors raised by integrator construction and forward calls. Degenerate
/// geometry never lands here; it is absorbed into per-pixel masks.
#[derive(Debug)]
pub enum RenderError {
    InvalidConfig(String),
    ShapeMismatch(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            RenderError::ShapeMismatch(msg) => write!(f, "shape mismatch: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}
