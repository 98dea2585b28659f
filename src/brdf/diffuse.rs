// Copyright @yucwang 2026

use super::BrdfEval;
use crate::math::constants::{ Float, Vector3f, INV_PI };

pub fn eval(albedo: &Vector3f, wi: &Vector3f, wo: &Vector3f) -> BrdfEval {
    if wi.z <= 0.0 || wo.z <= 0.0 {
        return BrdfEval::invalid();
    }

    BrdfEval {
        diffuse: albedo * INV_PI,
        specular: Vector3f::zeros(),
        valid: true,
    }
}

pub fn pdf(wo: &Vector3f) -> Float {
    wo.z.max(0.0) * INV_PI
}
