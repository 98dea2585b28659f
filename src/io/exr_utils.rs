/* Copyright 2026 @TwoCookingMice */

use super::IoError;
use crate::math::constants::{ Float, Vector3f };
use crate::math::grid::{ Grid, ScalarGrid, VectorGrid };

use exr::prelude::*;

use std::result::Result;

// Read the first RGBA layer of an EXR image into a per-pixel vector grid.
pub fn read_exr_to_grid(file_path: &str) -> Result<VectorGrid, IoError> {
    log::info!("Starting reading OpenEXR image from: {}.", file_path);

    let image = read()
        .no_deep_data()
        .largest_resolution_level()
        .rgba_channels(
            |resolution, _| {
                Grid::new(resolution.width(), resolution.height(), Vector3f::zeros())
            },
            |grid: &mut VectorGrid, position, (r, g, b, _a): (Float, Float, Float, Float)| {
                grid[(position.x(), position.y())] = Vector3f::new(r, g, b);
            },
        )
        .first_valid_layer()
        .all_attributes()
        .from_file(file_path)?;

    let grid = image.layer_data.channel_data.pixels;
    log::info!("OpenEXR loaded, width = {}, height = {}.", grid.width(), grid.height());
    Ok(grid)
}

// Single-channel feature maps (depth) are stored in the red channel.
pub fn read_exr_to_scalar_grid(file_path: &str) -> Result<ScalarGrid, IoError> {
    let rgb = read_exr_to_grid(file_path)?;
    let (width, height) = rgb.dimensions();
    let mut grid = ScalarGrid::new(width, height, 0.0);
    for y in 0..height {
        for x in 0..width {
            grid[(x, y)] = rgb[(x, y)].x;
        }
    }
    Ok(grid)
}

// Write a per-pixel color grid as an RGB EXR image.
pub fn write_grid_to_exr(grid: &VectorGrid, file_path: &str) -> Result<(), IoError> {
    log::info!("Starting writing openexr images: {}.", file_path);

    write_rgb_file(file_path, grid.width(), grid.height(), |x, y| {
        let c = grid[(x, y)];
        (c.x, c.y, c.z)
    })?;
    Ok(())
}
