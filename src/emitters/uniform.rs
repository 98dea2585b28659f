// Copyright @yucwang 2026

use crate::core::lighting::LightingModel;
use crate::core::rng::LcgRng;
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::warp::{ sample_uniform_sphere, sample_uniform_sphere_pdf };

/// Constant-radiance environment with uniform sphere sampling. Sample
/// streams are seeded from the queried position, so repeated forward calls
/// over the same inputs reproduce the same directions.
pub struct UniformEnvironment {
    radiance: Vector3f,
    spp: usize,
    seed: u64,
}

impl UniformEnvironment {
    pub fn new(radiance: Vector3f, spp: usize, seed: u64) -> Self {
        Self { radiance, spp, seed }
    }
}

impl LightingModel for UniformEnvironment {
    fn spp(&self) -> usize {
        self.spp
    }

    fn sample_directions(&self, position: &Vector3f, _normal: &Vector3f) -> Vec<Vector3f> {
        let mut rng = LcgRng::from_position(position, self.seed);
        (0..self.spp)
            .map(|_| {
                let u = Vector2f::new(rng.next_f32(), rng.next_f32());
                sample_uniform_sphere(&u)
            })
            .collect()
    }

    fn pdf_direction(&self, _position: &Vector3f, _direction: &Vector3f) -> Float {
        sample_uniform_sphere_pdf()
    }

    fn eval(&self, _direction: &Vector3f) -> Vector3f {
        self.radiance
    }
}
