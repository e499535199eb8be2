//! Sprite sheet loading and slicing into tile images

use image::{RgbaImage, imageops};
use log::debug;
use std::path::Path;

use crate::analysis::signature::is_transparent;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};

/// Load a sprite sheet from disk
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded
pub fn load_sheet(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).map_err(|e| AlgorithmError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(image.to_rgba8())
}

/// Cut a sheet into `cell_size` squares, row by row
///
/// Cells that do not fit completely at the right or bottom edge are
/// ignored, and fully transparent cells are dropped.
///
/// # Errors
///
/// Returns an error if `cell_size` is zero
pub fn slice_sheet(sheet: &RgbaImage, cell_size: u32) -> Result<Vec<RgbaImage>> {
    if cell_size == 0 {
        return Err(invalid_parameter(
            "cell_size",
            &cell_size,
            &"cells must be at least one pixel wide",
        ));
    }

    let columns = sheet.width() / cell_size;
    let rows = sheet.height() / cell_size;
    let mut tiles = Vec::new();

    for row in 0..rows {
        for column in 0..columns {
            let tile = crop(sheet, column * cell_size, row * cell_size, cell_size, cell_size);
            if is_transparent(&tile) {
                debug!("skipping transparent cell ({column}, {row})");
                continue;
            }
            tiles.push(tile);
        }
    }

    debug!(
        "sliced {}x{} sheet into {} tiles of {cell_size}px",
        sheet.width(),
        sheet.height(),
        tiles.len()
    );
    Ok(tiles)
}

/// Load a sheet and slice it in one go
///
/// # Errors
///
/// Returns an error if loading or slicing fails
pub fn load_sheet_tiles(path: &Path, cell_size: u32) -> Result<Vec<RgbaImage>> {
    let sheet = load_sheet(path)?;
    slice_sheet(&sheet, cell_size)
}

/// Copy a rectangle out of an image
///
/// Parts of the rectangle outside the source stay transparent.
pub fn crop(source: &RgbaImage, x: u32, y: u32, width: u32, height: u32) -> RgbaImage {
    let mut tile = RgbaImage::new(width, height);
    let cropped = imageops::crop_imm(source, x, y, width, height).to_image();
    imageops::replace(&mut tile, &cropped, 0, 0);
    tile
}
