// Copyright @yucwang 2026

use crate::brdf::BrdfKind;
use crate::core::error::RenderError;
use crate::math::constants::{ Float, Vector3f, PI };

/// Construction-time configuration for the shading integrator. Validated
/// once, before any camera buffer is built.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub im_width: usize,
    pub im_height: usize,
    /// Horizontal field of view, degrees.
    pub fov: Float,
    pub camera_pos: Vector3f,
    pub brdf_type: BrdfKind,
    pub spp: usize,
    pub double_sided: bool,
    pub use_ssrt: bool,
    pub use_specular: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            im_width: 320,
            im_height: 240,
            fov: 85.0,
            camera_pos: Vector3f::zeros(),
            brdf_type: BrdfKind::Ggx,
            spp: 1,
            double_sided: true,
            use_ssrt: false,
            use_specular: false,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.im_width == 0 || self.im_height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image dimensions must be positive, got {}x{}",
                self.im_width, self.im_height
            )));
        }
        if self.spp == 0 {
            return Err(RenderError::InvalidConfig(String::from(
                "samples per pixel must be positive",
            )));
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(RenderError::InvalidConfig(format!(
                "field of view must lie in (0, 180) degrees, got {}",
                self.fov
            )));
        }
        Ok(())
    }

    /// Horizontal field of view in radians.
    pub fn fov_radians(&self) -> Float {
        self.fov / 180.0 * PI
    }

    /// Vertical field of view derived from the horizontal one and the
    /// aspect ratio.
    pub fn fov_y_radians(&self) -> Float {
        let aspect = self.im_width as Float / self.im_height as Float;
        2.0 * ((self.fov_radians() * 0.5).tan() / aspect).atan()
    }
}
