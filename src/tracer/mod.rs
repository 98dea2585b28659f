// Copyright @yucwang 2026

pub mod screen_space;

pub use screen_space::{ ScreenSpaceTracer, TraceResult };
