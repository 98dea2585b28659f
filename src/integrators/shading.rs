// Copyright @yucwang 2026

use crate::brdf;
use crate::core::config::RenderConfig;
use crate::core::error::RenderError;
use crate::core::lighting::LightingModel;
use crate::math::constants::{ Float, Vector3f, MIN_PDF };
use crate::math::frame::{ to_shading_local, Frame };
use crate::math::grid::{ ScalarGrid, VectorGrid };
use crate::sensors::pinhole::PinholeCamera;
use crate::tracer::ScreenSpaceTracer;

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

/// One view's worth of per-pixel inputs, all matching the constructed
/// image extent. Read-only to the integrator.
pub struct ViewInput<'a> {
    /// RGB albedo in [0, 1].
    pub albedo: &'a VectorGrid,
    pub rough: &'a ScalarGrid,
    pub metal: &'a ScalarGrid,
    /// Unit world-space normals.
    pub normal: &'a VectorGrid,
    /// Camera-space positions, z negative in front of the camera.
    pub position: &'a VectorGrid,
}

/// Per-pixel results of a forward call.
pub struct RenderOutput {
    pub diffuse: VectorGrid,
    pub specular: VectorGrid,
    /// 1.0 where the view direction passed the grazing test, else 0.0.
    pub view_mask: ScalarGrid,
    /// Mean incident light before BRDF weighting, kept for diagnostics.
    pub shading: VectorGrid,
}

struct PixelResult {
    diffuse: Vector3f,
    specular: Vector3f,
    mask: Float,
    shading: Vector3f,
}

/// Monte-Carlo estimator of outgoing radiance for a single camera view.
/// Camera grids are built once here and reused for every forward call;
/// everything else is call-scoped.
pub struct ShadingIntegrator {
    config: RenderConfig,
    camera: PinholeCamera,
}

impl ShadingIntegrator {
    pub fn new(config: RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let camera = PinholeCamera::new(&config);
        log::info!(
            "shading integrator ready: brdf = {}, spp = {}, ssrt = {}, specular = {}",
            config.brdf_type.name(), config.spp, config.use_ssrt, config.use_specular
        );
        Ok(Self { config, camera })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn check_shapes(&self, lighting: &dyn LightingModel, batch: &[ViewInput]) -> Result<(), RenderError> {
        if batch.len() != 1 {
            return Err(RenderError::ShapeMismatch(format!(
                "batch size must be exactly 1, got {}", batch.len()
            )));
        }
        let expected = (self.config.im_width, self.config.im_height);
        let view = &batch[0];
        let grids = [
            ("albedo", view.albedo.dimensions()),
            ("rough", view.rough.dimensions()),
            ("metal", view.metal.dimensions()),
            ("normal", view.normal.dimensions()),
            ("position", view.position.dimensions()),
        ];
        for (name, dims) in grids.iter() {
            if *dims != expected {
                return Err(RenderError::ShapeMismatch(format!(
                    "{} extent {:?} does not match configured {:?}", name, dims, expected
                )));
            }
        }
        if lighting.spp() != self.config.spp {
            return Err(RenderError::ShapeMismatch(format!(
                "lighting model draws {} samples per pixel, configured for {}",
                lighting.spp(), self.config.spp
            )));
        }
        Ok(())
    }

    /// Central-square clipping window applied before visibility tracing.
    /// Without tracing the whole image is shaded.
    fn window(&self) -> (usize, usize, usize, usize) {
        let width = self.config.im_width;
        let height = self.config.im_height;
        if !self.config.use_ssrt {
            return (0, width, 0, height);
        }
        let center_x = width / 2;
        let center_y = height / 2;
        let radius = center_x.min(center_y);
        (
            center_x - radius,
            (center_x + radius).min(width),
            center_y - radius,
            (center_y + radius).min(height),
        )
    }

    /// Render one view. Pure over its inputs: repeated calls with the same
    /// view and a deterministic lighting model give identical outputs.
    pub fn forward(&self, lighting: &dyn LightingModel, batch: &[ViewInput]) -> Result<RenderOutput, RenderError> {
        self.check_shapes(lighting, batch)?;
        let view = &batch[0];
        let width = self.config.im_width;
        let height = self.config.im_height;
        let (left, right, top, bottom) = self.window();
        log::info!(
            "forward pass: lighting = {}, window = [{}, {}) x [{}, {})",
            lighting.name(), left, right, top, bottom
        );

        let tracer = if self.config.use_ssrt {
            Some(ScreenSpaceTracer::new(view.position, self.camera.fov_y()))
        } else {
            None
        };

        let mut output = RenderOutput {
            diffuse: VectorGrid::zeros(width, height),
            specular: VectorGrid::zeros(width, height),
            view_mask: ScalarGrid::new(width, height, 0.0),
            shading: VectorGrid::zeros(width, height),
        };

        let total_rows = bottom - top;
        let progress = ProgressBar::new(total_rows as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rows")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let next_row = AtomicUsize::new(0);
        let thread_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let (tx, rx) = mpsc::channel::<(usize, Vec<PixelResult>)>();

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let tx = tx.clone();
                let next_row = &next_row;
                let tracer = tracer.as_ref();
                scope.spawn(move || loop {
                    let index = next_row.fetch_add(1, Ordering::Relaxed);
                    if index >= total_rows {
                        break;
                    }
                    let y = top + index;
                    let mut row = Vec::with_capacity(right - left);
                    for x in left..right {
                        row.push(self.shade_pixel(lighting, view, tracer, x, y));
                    }
                    if tx.send((y, row)).is_err() {
                        break;
                    }
                });
            }
            drop(tx);

            for (y, row) in rx.iter() {
                for (i, pixel) in row.into_iter().enumerate() {
                    let x = left + i;
                    output.diffuse[(x, y)] = pixel.diffuse;
                    output.specular[(x, y)] = pixel.specular;
                    output.view_mask[(x, y)] = pixel.mask;
                    output.shading[(x, y)] = pixel.shading;
                }
                progress.inc(1);
            }
        });
        progress.finish_and_clear();

        Ok(output)
    }

    fn shade_pixel(&self,
                   lighting: &dyn LightingModel,
                   view: &ViewInput,
                   tracer: Option<&ScreenSpaceTracer>,
                   x: usize,
                   y: usize) -> PixelResult {
        let double_sided = self.config.double_sided;
        let spp = self.config.spp;

        let normal = view.normal[(x, y)];
        let position = view.position[(x, y)];
        let albedo = view.albedo[(x, y)];
        let rough = view.rough[(x, y)];
        let metal = view.metal[(x, y)];

        let frame = Frame::from_normal(&normal);
        let wi = to_shading_local(&frame, &self.camera.view_dir()[(x, y)], double_sided);
        let mask = if wi.valid { 1.0 } else { 0.0 };

        let directions = lighting.sample_directions(&position, &normal);
        debug_assert_eq!(directions.len(), spp);

        let mut diffuse = Vector3f::zeros();
        let mut specular = Vector3f::zeros();
        let mut shading = Vector3f::zeros();

        for (k, wo_world) in directions.iter().enumerate().take(spp) {
            let mut wo = frame.to_local(wo_world);
            if double_sided {
                wo.z = wo.z.abs();
            }
            let ndl = wo.z.max(0.0);

            let pdf_emitter = lighting.pdf_direction(&position, wo_world).max(MIN_PDF);
            let light = lighting.eval(wo_world);
            let contribution = light * (ndl / pdf_emitter);

            // Only the last sample is traced; misses and untrusted hits
            // suppress its contribution through the uncertainty.
            let weight = match tracer {
                Some(tracer) if k + 1 == spp => {
                    let result = tracer.trace((x, y), &position, wo_world);
                    1.0 - result.uncertainty()
                }
                _ => 1.0,
            };

            // Directions come from the emitter, so the BRDF-side sampling
            // density is identically one (floored like every density).
            let pdf_brdf = (1.0 as Float).max(MIN_PDF);
            let eval = brdf::evaluate(self.config.brdf_type, &albedo, rough, metal, &wi.dir, &wo);
            diffuse += eval.diffuse.component_mul(&contribution) * (weight / pdf_brdf);
            specular += eval.specular.component_mul(&contribution) * (weight / pdf_brdf);
            shading += contribution * weight;
        }

        let inv_spp = 1.0 / (spp as Float);
        PixelResult {
            diffuse: diffuse * inv_spp,
            specular: if self.config.use_specular {
                specular * inv_spp
            } else {
                Vector3f::zeros()
            },
            mask,
            shading: shading * inv_spp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brdf::BrdfKind;
    use crate::emitters::uniform::UniformEnvironment;
    use crate::math::constants::INV_PI;
    use crate::math::grid::Grid;

    struct FixedLighting {
        direction: Vector3f,
        radiance: Vector3f,
        pdf: Float,
        spp: usize,
    }

    impl LightingModel for FixedLighting {
        fn spp(&self) -> usize {
            self.spp
        }

        fn sample_directions(&self, _position: &Vector3f, _normal: &Vector3f) -> Vec<Vector3f> {
            vec![self.direction; self.spp]
        }

        fn pdf_direction(&self, _position: &Vector3f, _direction: &Vector3f) -> Float {
            self.pdf
        }

        fn eval(&self, _direction: &Vector3f) -> Vector3f {
            self.radiance
        }
    }

    fn constant_view(width: usize, height: usize) -> (VectorGrid, ScalarGrid, ScalarGrid, VectorGrid, VectorGrid) {
        (
            Grid::new(width, height, Vector3f::new(0.5, 0.5, 0.5)),
            Grid::new(width, height, 0.5),
            Grid::new(width, height, 0.0),
            Grid::new(width, height, Vector3f::new(0.0, 0.0, 1.0)),
            Grid::new(width, height, Vector3f::new(0.0, 0.0, -1.0)),
        )
    }

    fn view_input<'a>(
        grids: &'a (VectorGrid, ScalarGrid, ScalarGrid, VectorGrid, VectorGrid),
    ) -> ViewInput<'a> {
        ViewInput {
            albedo: &grids.0,
            rough: &grids.1,
            metal: &grids.2,
            normal: &grids.3,
            position: &grids.4,
        }
    }

    fn diffuse_config(width: usize, height: usize) -> RenderConfig {
        let mut config = RenderConfig::default();
        config.im_width = width;
        config.im_height = height;
        config.fov = 90.0;
        config.brdf_type = BrdfKind::Diffuse;
        config.spp = 1;
        config
    }

    #[test]
    fn test_constant_diffuse_scene_closed_form() {
        let integrator = ShadingIntegrator::new(diffuse_config(4, 4)).unwrap();
        let lighting = FixedLighting {
            direction: Vector3f::new(0.0, 0.0, 1.0),
            radiance: Vector3f::new(1.0, 1.0, 1.0),
            pdf: 1.0,
            spp: 1,
        };

        let grids = constant_view(4, 4);
        let output = integrator.forward(&lighting, &[view_input(&grids)]).unwrap();

        let expected = Vector3f::new(0.5, 0.5, 0.5) * INV_PI;
        for y in 0..4 {
            for x in 0..4 {
                assert!((output.diffuse[(x, y)] - expected).norm() < 1e-6);
                assert_eq!(output.specular[(x, y)], Vector3f::zeros());
                assert!((output.shading[(x, y)] - Vector3f::new(1.0, 1.0, 1.0)).norm() < 1e-6);
                assert_eq!(output.view_mask[(x, y)], 1.0);
            }
        }
    }

    #[test]
    fn test_near_mirror_specular_dominates_diffuse() {
        let mut config = diffuse_config(4, 4);
        config.brdf_type = BrdfKind::Ggx;
        config.use_specular = true;
        let integrator = ShadingIntegrator::new(config).unwrap();

        // Light mirroring the view direction of pixel (1, 1) about the
        // normal, so the half vector there sits on the normal.
        let aligned = Vector3f::new(-1.0, 1.0, 3.0) / (11.0 as Float).sqrt();
        let lighting = FixedLighting {
            direction: aligned,
            radiance: Vector3f::new(1.0, 1.0, 1.0),
            pdf: 1.0,
            spp: 1,
        };

        let mut grids = constant_view(4, 4);
        grids.1.fill(0.1); // near-mirror roughness
        let output = integrator.forward(&lighting, &[view_input(&grids)]).unwrap();

        assert!(output.specular[(1, 1)].x > output.diffuse[(1, 1)].x * 10.0);
    }

    #[test]
    fn test_construction_and_shape_errors() {
        let config = diffuse_config(0, 4);
        assert!(matches!(
            ShadingIntegrator::new(config),
            Err(RenderError::InvalidConfig(_))
        ));

        let integrator = ShadingIntegrator::new(diffuse_config(4, 4)).unwrap();
        let lighting = FixedLighting {
            direction: Vector3f::new(0.0, 0.0, 1.0),
            radiance: Vector3f::new(1.0, 1.0, 1.0),
            pdf: 1.0,
            spp: 1,
        };

        let grids = constant_view(4, 4);
        let batch = [view_input(&grids), view_input(&grids)];
        assert!(matches!(
            integrator.forward(&lighting, &batch),
            Err(RenderError::ShapeMismatch(_))
        ));

        let wrong = constant_view(5, 4);
        assert!(matches!(
            integrator.forward(&lighting, &[view_input(&wrong)]),
            Err(RenderError::ShapeMismatch(_))
        ));

        let mismatched_spp = FixedLighting {
            direction: Vector3f::new(0.0, 0.0, 1.0),
            radiance: Vector3f::new(1.0, 1.0, 1.0),
            pdf: 1.0,
            spp: 3,
        };
        assert!(matches!(
            integrator.forward(&mismatched_spp, &[view_input(&grids)]),
            Err(RenderError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_forward_is_idempotent() {
        let mut config = diffuse_config(6, 4);
        config.spp = 4;
        let integrator = ShadingIntegrator::new(config).unwrap();
        let lighting = UniformEnvironment::new(Vector3f::new(0.8, 0.9, 1.0), 4, 42);

        let grids = constant_view(6, 4);
        let first = integrator.forward(&lighting, &[view_input(&grids)]).unwrap();
        let second = integrator.forward(&lighting, &[view_input(&grids)]).unwrap();

        for y in 0..4 {
            for x in 0..6 {
                assert_eq!(first.diffuse[(x, y)], second.diffuse[(x, y)]);
                assert_eq!(first.specular[(x, y)], second.specular[(x, y)]);
                assert_eq!(first.shading[(x, y)], second.shading[(x, y)]);
                assert_eq!(first.view_mask[(x, y)], second.view_mask[(x, y)]);
            }
        }
    }

    #[test]
    fn test_traced_misses_suppress_contribution() {
        // Flat scene: every traced ray misses, and with spp = 1 the whole
        // estimate rides on the traced sample.
        let mut config = diffuse_config(4, 4);
        config.use_ssrt = true;
        let integrator = ShadingIntegrator::new(config).unwrap();
        let lighting = FixedLighting {
            direction: Vector3f::new(0.0, 0.0, 1.0),
            radiance: Vector3f::new(1.0, 1.0, 1.0),
            pdf: 1.0,
            spp: 1,
        };

        let grids = constant_view(4, 4);
        let output = integrator.forward(&lighting, &[view_input(&grids)]).unwrap();

        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(output.diffuse[(x, y)], Vector3f::zeros());
                assert_eq!(output.shading[(x, y)], Vector3f::zeros());
                // The view mask is independent of tracing.
                assert_eq!(output.view_mask[(x, y)], 1.0);
            }
        }
    }

    #[test]
    fn test_clipping_window_zeroes_outside_pixels() {
        let mut config = diffuse_config(6, 4);
        config.use_ssrt = true;
        let integrator = ShadingIntegrator::new(config).unwrap();
        let lighting = FixedLighting {
            direction: Vector3f::new(0.0, 0.0, 1.0),
            radiance: Vector3f::new(1.0, 1.0, 1.0),
            pdf: 1.0,
            spp: 1,
        };

        let grids = constant_view(6, 4);
        let output = integrator.forward(&lighting, &[view_input(&grids)]).unwrap();

        // Central 4x4 square: columns 1..5 shaded, 0 and 5 untouched.
        for y in 0..4 {
            assert_eq!(output.view_mask[(0, y)], 0.0);
            assert_eq!(output.view_mask[(5, y)], 0.0);
            assert_eq!(output.diffuse[(0, y)], Vector3f::zeros());
            for x in 1..5 {
                assert_eq!(output.view_mask[(x, y)], 1.0);
            }
        }
    }
}
