// Copyright @yucwang 2026

use crate::math::constants::{ EPSILON, Float, Point3f, Vector2i, Vector3f };
use crate::math::grid::{ ScalarGrid, VectorGrid };

use nalgebra::Perspective3;

/// Step budget for a single ray; tracing always runs at one ray per pixel.
pub const MAX_STEPS: usize = 64;
/// Total march length in normalized (unit max depth) camera units.
pub const MARCH_LENGTH: Float = 2.0;
/// A marched sample counts as occluded once it falls behind the stored
/// depth by more than this, in remapped [0, 1] depth.
pub const HIT_TOLERANCE: Float = 1e-3;
/// Floor on the near plane: the raw dmin/dmax ratio degenerates for
/// near-planar scenes.
pub const NEAR_FLOOR: Float = 1e-2;
pub const MIN_DEPTH_RANGE: Float = 1e-3;
pub const UNCERTAINTY_GAIN: Float = 10.0;

/// Outcome of one traced ray. Misses are data, not errors: the pixel holds
/// the (-1, -1) sentinel and the uncertainty saturates at one.
#[derive(Debug, Clone, Copy)]
pub struct TraceResult {
    /// Hit coordinate as (row, col), or (-1, -1) on miss.
    pub pixel: Vector2i,
    pub hit: bool,
    /// Depth discrepancy at the hit, in remapped [0, 1] depth.
    pub dz: Float,
}

impl TraceResult {
    pub fn miss() -> Self {
        Self {
            pixel: Vector2i::new(-1, -1),
            hit: false,
            dz: 0.0,
        }
    }

    /// How little the hit should be trusted: tanh(10 dz) clamped to
    /// [0, 1], saturated to 1 for misses.
    pub fn uncertainty(&self) -> Float {
        if !self.hit {
            return 1.0;
        }
        (UNCERTAINTY_GAIN * self.dz).tanh().max(0.0).min(1.0)
    }
}

/// Screen-space occlusion tracer over a 2D depth buffer. Built per forward
/// call from the view's position map: depth is normalized by the scene
/// maximum, pushed through a perspective projection whose near plane is the
/// (floored) dmin/dmax ratio, and remapped to [0, 1].
pub struct ScreenSpaceTracer {
    width: usize,
    height: usize,
    depth: ScalarGrid,
    proj: Perspective3<Float>,
    near: Float,
    inv_d_max: Float,
}

impl ScreenSpaceTracer {
    pub fn new(position: &VectorGrid, fov_y: Float) -> Self {
        let (width, height) = position.dimensions();
        let aspect = width as Float / height as Float;

        let mut d_min = Float::MAX;
        let mut d_max: Float = 0.0;
        for p in position.data() {
            let d = -p.z;
            if !d.is_finite() {
                continue;
            }
            let d = d.max(0.0);
            d_min = d_min.min(d);
            d_max = d_max.max(d);
        }
        let d_max = d_max.max(1e-6);
        let d_min = if d_min == Float::MAX { 0.0 } else { d_min };

        let near = (d_min / d_max).max(NEAR_FLOOR).min(1.0 - MIN_DEPTH_RANGE);
        if d_max - d_min < MIN_DEPTH_RANGE * d_max {
            log::warn!(
                "near-planar depth range [{}, {}], near plane floored at {}",
                d_min, d_max, near
            );
        }
        let proj = Perspective3::new(aspect, fov_y, near, 1.0);

        let mut depth = ScalarGrid::new(width, height, 1.0);
        let mut non_finite = 0usize;
        for y in 0..height {
            for x in 0..width {
                let dn = -position[(x, y)].z / d_max;
                if !dn.is_finite() {
                    non_finite += 1;
                    continue;
                }
                let ndc = proj.project_point(&Point3f::new(0.0, 0.0, -dn));
                let remapped = ndc.z * 0.5 + 0.5;
                depth[(x, y)] = if remapped.is_finite() { remapped } else { 1.0 };
            }
        }
        if non_finite > 0 {
            log::warn!("{} non-finite depth entries forced to the far plane", non_finite);
        }

        Self {
            width,
            height,
            depth,
            proj,
            near,
            inv_d_max: 1.0 / d_max,
        }
    }

    pub fn depth_buffer(&self) -> &ScalarGrid {
        &self.depth
    }

    /// March one ray from the camera-space point `origin` (owned by pixel
    /// `(x, y)`) along the world direction `direction`. Every ray resolves
    /// to a result; running out of steps, leaving the screen or crossing
    /// the near plane are all reported as misses.
    pub fn trace(&self, pixel: (usize, usize), origin: &Vector3f, direction: &Vector3f) -> TraceResult {
        let p0 = origin * self.inv_d_max;
        let step_len = MARCH_LENGTH / (MAX_STEPS as Float);

        for step in 1..=MAX_STEPS {
            let q = p0 + direction * (step as Float * step_len);
            if q.z > -self.near {
                return TraceResult::miss();
            }

            let ndc = self.proj.project_point(&Point3f::new(q.x, q.y, q.z));
            if !(ndc.x.is_finite() && ndc.y.is_finite() && ndc.z.is_finite()) {
                return TraceResult::miss();
            }
            if ndc.x < -1.0 || ndc.x > 1.0 || ndc.y < -1.0 || ndc.y > 1.0 {
                return TraceResult::miss();
            }

            let ray_depth = ndc.z * 0.5 + 0.5;
            if ray_depth > 1.0 + EPSILON {
                return TraceResult::miss();
            }

            let col = ((ndc.x * 0.5 + 0.5) * ((self.width - 1) as Float)).round() as usize;
            let row = ((0.5 - ndc.y * 0.5) * ((self.height - 1) as Float)).round() as usize;
            let col = col.min(self.width - 1);
            let row = row.min(self.height - 1);
            if (col, row) == pixel {
                continue;
            }

            let dz = ray_depth - self.depth[(col, row)];
            if dz > HIT_TOLERANCE {
                return TraceResult {
                    pixel: Vector2i::new(row as i32, col as i32),
                    hit: true,
                    dz,
                };
            }
        }

        TraceResult::miss()
    }
}
