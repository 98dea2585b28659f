// Copyright @yucwang 2026

pub mod diffuse;
pub mod disney;
pub mod ggx;

use crate::core::error::RenderError;
use crate::math::constants::{ Float, Vector3f, MIN_PDF };

/// Closed set of reflectance models the integrator can dispatch over. Each
/// kind is an independent strategy sharing the evaluate/density contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrdfKind {
    Ggx,
    Diffuse,
    Disney,
}

impl BrdfKind {
    pub fn parse(name: &str) -> Result<Self, RenderError> {
        match name {
            "ggx" => Ok(BrdfKind::Ggx),
            "diffuse" => Ok(BrdfKind::Diffuse),
            "disney" => Ok(BrdfKind::Disney),
            other => Err(RenderError::InvalidConfig(format!(
                "unrecognized brdf type: {}", other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BrdfKind::Ggx => "ggx",
            BrdfKind::Diffuse => "diffuse",
            BrdfKind::Disney => "disney",
        }
    }
}

/// Normalized output of every reflectance kernel. Invalid geometry
/// (non-positive cosines, degenerate half vectors) yields zeroed terms with
/// `valid = false` rather than an error.
#[derive(Debug, Clone, Copy)]
pub struct BrdfEval {
    pub diffuse: Vector3f,
    pub specular: Vector3f,
    pub valid: bool,
}

impl BrdfEval {
    pub(crate) fn invalid() -> Self {
        Self {
            diffuse: Vector3f::zeros(),
            specular: Vector3f::zeros(),
            valid: false,
        }
    }
}

/// Evaluate the selected reflectance model. `wi` is the view direction and
/// `wo` the light direction, both unit vectors in the shading frame.
pub fn evaluate(kind: BrdfKind,
                albedo: &Vector3f,
                rough: Float,
                metal: Float,
                wi: &Vector3f,
                wo: &Vector3f) -> BrdfEval {
    match kind {
        BrdfKind::Ggx => ggx::eval(albedo, rough, metal, wi, wo),
        BrdfKind::Diffuse => diffuse::eval(albedo, wi, wo),
        BrdfKind::Disney => disney::eval(albedo, rough, metal, wi, wo),
    }
}

/// Sampling density the selected model would assign to `wo`. Only reported
/// for diagnostics: the integrator samples from the emitter, so its
/// BRDF-side weighting density is identically one. Clamped away from zero
/// for every kind.
pub fn density(kind: BrdfKind, rough: Float, wi: &Vector3f, wo: &Vector3f) -> Float {
    let pdf = match kind {
        BrdfKind::Ggx => ggx::pdf(rough, wi, wo),
        BrdfKind::Diffuse => diffuse::pdf(wo),
        BrdfKind::Disney => disney::pdf(rough, wi, wo),
    };
    pdf.max(MIN_PDF)
}
