/* Copyright 2026 @TwoCookingMice */

use super::IoError;
use crate::math::grid::ScalarGrid;

// Binary validity masks are stored as PNG; any nonzero pixel counts as
// valid.
pub fn read_mask_from_file(file_path: &str) -> Result<ScalarGrid, IoError> {
    log::info!("Starting reading mask image from: {}.", file_path);

    let img = image::open(file_path)?.to_luma8();
    let (width, height) = img.dimensions();
    let mut mask = ScalarGrid::new(width as usize, height as usize, 0.0);
    for (x, y, pixel) in img.enumerate_pixels() {
        mask[(x as usize, y as usize)] = if pixel.0[0] > 0 { 1.0 } else { 0.0 };
    }
    Ok(mask)
}
