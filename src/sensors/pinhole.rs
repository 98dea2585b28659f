// Copyright @yucwang 2026

use crate::core::config::RenderConfig;
use crate::math::constants::{ Float, Vector3f };
use crate::math::grid::{ ScalarGrid, VectorGrid };

/// Camera-derived per-pixel grids, built once at integrator construction
/// and immutable afterwards. The camera sits at a fixed position looking
/// down -z; `ray_target[i,j]` is the point the pixel's ray passes through
/// on the z = -1 plane and `view_dir[i,j]` is the unit direction from that
/// point back toward the camera.
pub struct PinholeCamera {
    width: usize,
    height: usize,
    position: Vector3f,
    fov_y: Float,
    view_dir: VectorGrid,
    ray_target: VectorGrid,
}

fn linspace(start: Float, end: Float, n: usize, i: usize) -> Float {
    if n <= 1 {
        return start;
    }
    start + (end - start) * (i as Float) / ((n - 1) as Float)
}

impl PinholeCamera {
    pub fn new(config: &RenderConfig) -> Self {
        let width = config.im_width;
        let height = config.im_height;
        let x_range = (config.fov_radians() * 0.5).tan();
        let y_range = (height as Float) / (width as Float) * x_range;

        let mut ray_target = VectorGrid::zeros(width, height);
        let mut view_dir = VectorGrid::zeros(width, height);
        for y in 0..height {
            // Rows run top to bottom while camera y points up.
            let py = linspace(y_range, -y_range, height, y);
            for x in 0..width {
                let px = linspace(-x_range, x_range, width, x);
                let target = Vector3f::new(px, py, -1.0);
                let v = config.camera_pos - target;
                let inv_len = 1.0 / v.norm_squared().max(1e-12).sqrt();
                ray_target[(x, y)] = target;
                view_dir[(x, y)] = v * inv_len;
            }
        }

        log::info!(
            "pinhole camera grids built: {}x{}, fov = {} deg",
            width, height, config.fov
        );

        Self {
            width,
            height,
            position: config.camera_pos,
            fov_y: config.fov_y_radians(),
            view_dir,
            ray_target,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn position(&self) -> Vector3f {
        self.position
    }

    /// Vertical field of view in radians.
    pub fn fov_y(&self) -> Float {
        self.fov_y
    }

    pub fn view_dir(&self) -> &VectorGrid {
        &self.view_dir
    }

    pub fn ray_target(&self) -> &VectorGrid {
        &self.ray_target
    }
}

/// Reconstruct camera-space positions from a depth map. Depth is distance
/// along -z; when `normalize` is set the map is first divided by its
/// maximum so positions land in the unit-depth range the tracer expects.
pub fn depth_to_position(depth: &ScalarGrid, fov_degrees: Float, normalize: bool) -> VectorGrid {
    let (width, height) = depth.dimensions();
    let fov_x = fov_degrees.to_radians();
    let aspect = width as Float / height as Float;
    let fov_y = 2.0 * ((fov_x * 0.5).tan() / aspect).atan();
    let tan_x = (fov_x * 0.5).tan();
    let tan_y = (fov_y * 0.5).tan();

    let mut d_max: Float = 0.0;
    if normalize {
        for d in depth.data() {
            if d.is_finite() && *d > d_max {
                d_max = *d;
            }
        }
    }
    let scale = if normalize && d_max > 0.0 { 1.0 / d_max } else { 1.0 };

    let mut position = VectorGrid::zeros(width, height);
    for y in 0..height {
        let ndc_y = 1.0 - 2.0 * ((y as Float) + 0.5) / (height as Float);
        for x in 0..width {
            let ndc_x = 2.0 * ((x as Float) + 0.5) / (width as Float) - 1.0;
            let d = depth[(x, y)] * scale;
            position[(x, y)] = Vector3f::new(d * ndc_x * tan_x, d * ndc_y * tan_y, -d);
        }
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::grid::Grid;

    #[test]
    fn test_view_directions_point_back_to_camera() {
        let mut config = RenderConfig::default();
        config.im_width = 5;
        config.im_height = 5;
        config.fov = 90.0;
        let cam = PinholeCamera::new(&config);

        // The central pixel's target sits straight ahead on z = -1.
        let center = cam.ray_target()[(2, 2)];
        assert!(center.x.abs() < 1e-6);
        assert!(center.y.abs() < 1e-6);
        assert!((center.z + 1.0).abs() < 1e-6);

        let v = cam.view_dir()[(2, 2)];
        assert!((v - Vector3f::new(0.0, 0.0, 1.0)).norm() < 1e-6);

        for y in 0..5 {
            for x in 0..5 {
                assert!((cam.view_dir()[(x, y)].norm() - 1.0).abs() < 1e-5);
            }
        }

        // Top-left pixel maps to -x, +y.
        let corner = cam.ray_target()[(0, 0)];
        assert!(corner.x < 0.0 && corner.y > 0.0);
    }

    #[test]
    fn test_depth_to_position_recovers_depth() {
        let depth = Grid::new(4, 4, 2.0f32);
        let position = depth_to_position(&depth, 60.0, false);
        for y in 0..4 {
            for x in 0..4 {
                assert!((position[(x, y)].z + 2.0).abs() < 1e-5);
            }
        }

        let normalized = depth_to_position(&depth, 60.0, true);
        assert!((normalized[(1, 1)].z + 1.0).abs() < 1e-5);
    }
}
