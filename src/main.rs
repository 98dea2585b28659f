// Copyright 2026 TwoCookingMice

use ganache::brdf::BrdfKind;
use ganache::core::config::RenderConfig;
use ganache::emitters::uniform::UniformEnvironment;
use ganache::integrators::shading::{ShadingIntegrator, ViewInput};
use ganache::io::{ exr_utils, png_utils };
use ganache::math::constants::Vector3f;
use ganache::math::grid::ScalarGrid;
use ganache::sensors::pinhole::depth_to_position;

use std::env;

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 6 {
        eprintln!(
            "Usage: {} <albedo.exr> <normal.exr> <depth.exr> <material.exr> <output_prefix> \
             [--fov DEG] [--spp N] [--brdf ggx|diffuse|disney] [--specular] [--ssrt] [--seed N] \
             [--mask mask.png]",
            args[0]
        );
        std::process::exit(1);
    }

    let albedo_path = &args[1];
    let normal_path = &args[2];
    let depth_path = &args[3];
    let material_path = &args[4];
    let output_prefix = &args[5];

    let mut fov: f32 = 85.0;
    let mut spp: usize = 1;
    let mut brdf_type = BrdfKind::Ggx;
    let mut use_specular = false;
    let mut use_ssrt = false;
    let mut seed: u64 = 0;
    let mut mask_path: Option<String> = None;

    let mut i = 6;
    while i < args.len() {
        match args[i].as_str() {
            "--fov" => {
                i += 1;
                fov = args.get(i).and_then(|v| v.parse::<f32>().ok()).unwrap_or(fov);
            }
            "--spp" => {
                i += 1;
                spp = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(spp);
            }
            "--brdf" => {
                i += 1;
                brdf_type = args
                    .get(i)
                    .map(|v| BrdfKind::parse(v).expect("unknown brdf type"))
                    .unwrap_or(brdf_type);
            }
            "--specular" => {
                use_specular = true;
            }
            "--ssrt" => {
                use_ssrt = true;
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|v| v.parse::<u64>().ok()).unwrap_or(0);
            }
            "--mask" => {
                i += 1;
                mask_path = args.get(i).cloned();
            }
            _ => {}
        }
        i += 1;
    }

    let albedo = exr_utils::read_exr_to_grid(albedo_path).expect("failed to load albedo");
    let normal = exr_utils::read_exr_to_grid(normal_path).expect("failed to load normal");
    let depth = exr_utils::read_exr_to_scalar_grid(depth_path).expect("failed to load depth");
    let material = exr_utils::read_exr_to_grid(material_path).expect("failed to load material");

    let (width, height) = albedo.dimensions();
    let mut rough = ScalarGrid::new(width, height, 0.0);
    let mut metal = ScalarGrid::new(width, height, 0.0);
    for y in 0..height {
        for x in 0..width {
            rough[(x, y)] = material[(x, y)].x;
            metal[(x, y)] = material[(x, y)].y;
        }
    }

    let position = depth_to_position(&depth, fov, true);

    let mut config = RenderConfig::default();
    config.im_width = width;
    config.im_height = height;
    config.fov = fov;
    config.brdf_type = brdf_type;
    config.spp = spp;
    config.use_specular = use_specular;
    config.use_ssrt = use_ssrt;

    let integrator = ShadingIntegrator::new(config).expect("invalid configuration");
    let lighting = UniformEnvironment::new(Vector3f::new(1.0, 1.0, 1.0), spp, seed);

    let view = ViewInput {
        albedo: &albedo,
        rough: &rough,
        metal: &metal,
        normal: &normal,
        position: &position,
    };
    let mut output = integrator
        .forward(&lighting, &[view])
        .expect("forward pass failed");

    // A validity mask gates every output, matching how training views
    // exclude unlabeled pixels.
    if let Some(path) = mask_path {
        let mask = png_utils::read_mask_from_file(&path).expect("failed to load mask");
        assert_eq!(mask.dimensions(), (width, height), "mask extent mismatch");
        for y in 0..height {
            for x in 0..width {
                let m = mask[(x, y)];
                output.diffuse[(x, y)] *= m;
                output.specular[(x, y)] *= m;
                output.shading[(x, y)] *= m;
            }
        }
    }

    exr_utils::write_grid_to_exr(&output.diffuse, &format!("{}_diffuse.exr", output_prefix))
        .expect("failed to write diffuse");
    exr_utils::write_grid_to_exr(&output.specular, &format!("{}_specular.exr", output_prefix))
        .expect("failed to write specular");
    exr_utils::write_grid_to_exr(&output.shading, &format!("{}_shading.exr", output_prefix))
        .expect("failed to write shading");
}
