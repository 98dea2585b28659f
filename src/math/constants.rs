/* Copyright 2026 @Yuchen Wong */

pub type Float = f32;
pub type Int = i32;

pub type Vector2f = nalgebra::Vector2<Float>;
pub type Vector2i = nalgebra::Vector2<Int>;
pub type Vector3f = nalgebra::Vector3<Float>;
pub type Point3f = nalgebra::Point3<Float>;

pub const EPSILON: Float = 1e-4;
pub const PI: Float = 3.14159265359;
pub const INV_PI: Float = 0.31830988618;

// Numeric guards used by the shading-space transforms.
pub const GRAZING_EPS: Float = 1e-6;
pub const COS_THETA_FLOOR: Float = 1e-3;
pub const NORMALIZE_EPS: Float = 1e-6;

// Density floor shared by the BRDF adapter and the integrator.
pub const MIN_PDF: Float = 1e-3;
