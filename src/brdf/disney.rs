// Copyright @yucwang 2026

use super::BrdfEval;
use super::ggx;
use crate::math::constants::{ Float, Vector3f, INV_PI };

fn schlick_weight(cos_theta: Float) -> Float {
    (1.0 - cos_theta.max(0.0).min(1.0)).powi(5)
}

/// Burley retro-reflective diffuse lobe plus the shared GGX specular lobe.
pub fn eval(albedo: &Vector3f,
            rough: Float,
            metal: Float,
            wi: &Vector3f,
            wo: &Vector3f) -> BrdfEval {
    if wi.z <= 0.0 || wo.z <= 0.0 {
        return BrdfEval::invalid();
    }
    let h = match ggx::half_vector(wi, wo) {
        Some(h) => h,
        None => return BrdfEval::invalid(),
    };

    let ldh = wo.dot(&h).max(0.0);
    let fd90 = 0.5 + 2.0 * rough * ldh * ldh;
    let fl = schlick_weight(wo.z);
    let fv = schlick_weight(wi.z);
    let fd = (1.0 + (fd90 - 1.0) * fl) * (1.0 + (fd90 - 1.0) * fv);

    BrdfEval {
        diffuse: albedo * (INV_PI * fd * (1.0 - metal)),
        specular: ggx::specular_lobe(albedo, rough, metal, wi, wo, &h),
        valid: true,
    }
}

/// Even blend of the cosine lobe and the microfacet lobe. Reported for
/// diagnostics only; emitter sampling never weights by it.
pub fn pdf(rough: Float, wi: &Vector3f, wo: &Vector3f) -> Float {
    0.5 * wo.z.max(0.0) * INV_PI + 0.5 * ggx::pdf(rough, wi, wo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_normal_incidence_matches_lambert() {
        // At normal incidence ldh = 1, fd90 = 0.5 + 2*rough; for rough 0.25
        // the retro term cancels and the diffuse lobe is plain albedo/pi.
        let albedo = Vector3f::new(0.6, 0.4, 0.2);
        let up = Vector3f::new(0.0, 0.0, 1.0);
        let e = eval(&albedo, 0.25, 0.0, &up, &up);
        assert!(e.valid);
        assert!((e.diffuse - albedo * INV_PI).norm() < 1e-5);
    }

    #[test]
    fn test_grazing_retro_reflection_brightens_rough_surfaces() {
        let albedo = Vector3f::new(0.5, 0.5, 0.5);
        let grazing = Vector3f::new(0.9, 0.0, 0.1).normalize();
        let rough_eval = eval(&albedo, 1.0, 0.0, &grazing, &grazing);
        let smooth_eval = eval(&albedo, 0.0, 0.0, &grazing, &grazing);
        assert!(rough_eval.diffuse.x > smooth_eval.diffuse.x);
    }
}
