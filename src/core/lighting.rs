// Copyright @yucwang 2026

use crate::math::constants::{ Float, Vector3f };

/// Capability interface over the lighting model consumed by the shading
/// integrator. Implementations are interchangeable: a learned emitter, a
/// parametric environment, or a test fixture all look the same here.
///
/// Directions are world space and unit length. `sample_directions` must
/// return exactly `spp` entries per query; the integrator validates this
/// against its own configuration before shading.
pub trait LightingModel: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Fixed number of incident directions drawn per pixel.
    fn spp(&self) -> usize;

    /// Draw `spp` incident directions for the surface point at `position`
    /// with surface normal `normal`.
    fn sample_directions(&self, position: &Vector3f, normal: &Vector3f) -> Vec<Vector3f>;

    /// Probability density of `direction` for the point at `position`.
    fn pdf_direction(&self, position: &Vector3f, direction: &Vector3f) -> Float;

    /// Predicted RGB radiance arriving from `direction`.
    fn eval(&self, direction: &Vector3f) -> Vector3f;
}
