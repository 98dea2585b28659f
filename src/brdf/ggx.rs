// Copyright @yucwang 2026

use super::BrdfEval;
use crate::math::constants::{ Float, Vector3f, INV_PI, PI };

pub fn ggx_d(ndh: Float, alpha: Float) -> Float {
    if ndh <= 0.0 {
        return 0.0;
    }
    let a = alpha.max(1e-4);
    let a2 = a * a;
    let cos2 = ndh * ndh;
    let denom = cos2 * (a2 - 1.0) + 1.0;
    a2 / (PI * denom * denom)
}

// Schlick-GGX masking term with the direct-lighting roughness remap
// k = (rough + 1)^2 / 8.
pub fn smith_g1(ndx: Float, k: Float) -> Float {
    if ndx <= 0.0 {
        return 0.0;
    }
    ndx / (ndx * (1.0 - k) + k)
}

pub fn fresnel_schlick(f0: &Vector3f, vdh: Float) -> Vector3f {
    let vdh = vdh.max(0.0).min(1.0);
    let one_minus = (1.0 - vdh).powi(5);
    f0 + (Vector3f::new(1.0, 1.0, 1.0) - f0) * one_minus
}

pub(super) fn specular_lobe(albedo: &Vector3f,
                            rough: Float,
                            metal: Float,
                            wi: &Vector3f,
                            wo: &Vector3f,
                            h: &Vector3f) -> Vector3f {
    let ndv = wi.z;
    let ndl = wo.z;
    let ndh = h.z.max(0.0);
    let vdh = wi.dot(h).max(0.0);

    let alpha = rough * rough;
    let d = ggx_d(ndh, alpha);
    let k = (rough + 1.0) * (rough + 1.0) / 8.0;
    let g = smith_g1(ndv, k) * smith_g1(ndl, k);
    let f0 = Vector3f::new(0.04, 0.04, 0.04).lerp(albedo, metal);
    let f = fresnel_schlick(&f0, vdh);

    f * (d * g / (4.0 * ndv * ndl).max(1e-6))
}

pub(super) fn half_vector(wi: &Vector3f, wo: &Vector3f) -> Option<Vector3f> {
    let h = wi + wo;
    let len = h.norm();
    if len < 1e-6 {
        return None;
    }
    Some(h / len)
}

pub fn eval(albedo: &Vector3f,
            rough: Float,
            metal: Float,
            wi: &Vector3f,
            wo: &Vector3f) -> BrdfEval {
    if wi.z <= 0.0 || wo.z <= 0.0 {
        return BrdfEval::invalid();
    }
    let h = match half_vector(wi, wo) {
        Some(h) => h,
        None => return BrdfEval::invalid(),
    };

    BrdfEval {
        diffuse: albedo * (1.0 - metal) * INV_PI,
        specular: specular_lobe(albedo, rough, metal, wi, wo, &h),
        valid: true,
    }
}

pub fn pdf(rough: Float, wi: &Vector3f, wo: &Vector3f) -> Float {
    if wi.z <= 0.0 || wo.z <= 0.0 {
        return 0.0;
    }
    let h = match half_vector(wi, wo) {
        Some(h) => h,
        None => return 0.0,
    };
    let vdh = wi.dot(&h);
    if vdh <= 0.0 {
        return 0.0;
    }
    ggx_d(h.z, rough * rough) * h.z / (4.0 * vdh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndf_normal_incidence_grows_as_roughness_shrinks() {
        assert!(ggx_d(1.0, 0.01) > ggx_d(1.0, 0.5));
        assert_eq!(ggx_d(0.0, 0.5), 0.0);
    }

    #[test]
    fn test_fresnel_bounds() {
        let f0 = Vector3f::new(0.04, 0.04, 0.04);
        let at_normal = fresnel_schlick(&f0, 1.0);
        assert!((at_normal - f0).norm() < 1e-6);
        let at_grazing = fresnel_schlick(&f0, 0.0);
        assert!((at_grazing.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_metal_kills_diffuse() {
        let albedo = Vector3f::new(0.8, 0.6, 0.2);
        let up = Vector3f::new(0.0, 0.0, 1.0);
        let eval = eval(&albedo, 0.3, 1.0, &up, &up);
        assert!(eval.diffuse.norm() < 1e-6);
        assert!(eval.specular.norm() > 0.0);
    }
}
