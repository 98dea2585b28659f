// Copyright @yucwang 2026

use super::constants::{ Float, PI, Vector2f, Vector3f };

pub fn sample_uniform_sphere(u: &Vector2f) -> Vector3f {
    let z: Float = 1.0 - 2.0 * u.x;
    let r: Float = (1.0 - z * z).max(0.0).sqrt();
    let phi: Float = 2.0 * PI * u.y;

    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

pub fn sample_uniform_sphere_pdf() -> Float {
    1.0 / (4.0 * PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sphere_is_unit() {
        let samples = [
            Vector2f::new(0.0, 0.0),
            Vector2f::new(0.5, 0.25),
            Vector2f::new(0.99, 0.7),
        ];
        for u in &samples {
            let d = sample_uniform_sphere(u);
            assert!((d.norm() - 1.0).abs() < 1e-5);
        }
    }
}
