// Copyright @yucwang 2026

#![allow(dead_code)]

pub mod brdf;
pub mod core;
pub mod emitters;
pub mod integrators;
pub mod io;
pub mod math;
pub mod sensors;
pub mod tracer;
