//! PNG rendering of a solved grid

use image::{Rgba, RgbaImage, imageops};
use std::path::Path;

use crate::analysis::catalog::Catalog;
use crate::io::configuration::UNRESOLVED_COLOR;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::Grid;

/// Composite every resolved tile at `(x * cell_width, y * cell_height)`
///
/// Slots that did not collapse are painted with `UNRESOLVED_COLOR`.
///
/// # Errors
///
/// Returns an error if:
/// - The catalog is empty, lacks pixel data, or mixes tile sizes
/// - A slot refers to a tile outside the catalog
/// - The output would exceed `u32` pixel coordinates
pub fn render_grid(grid: &Grid, catalog: &Catalog) -> Result<RgbaImage> {
    let (cell_width, cell_height) = catalog.tile_size()?;
    let width = scaled(grid.width(), cell_width)?;
    let height = scaled(grid.height(), cell_height)?;

    let mut canvas = RgbaImage::new(width, height);
    let unresolved = RgbaImage::from_pixel(cell_width, cell_height, Rgba(UNRESOLVED_COLOR));

    for slot in grid.slots() {
        let position = slot.position();
        let x = i64::from(cell_width) * position.x as i64;
        let y = i64::from(cell_height) * position.y as i64;

        let image = match slot.tile() {
            Some(id) => catalog
                .get(id)
                .and_then(|tile| tile.image())
                .ok_or(AlgorithmError::InvalidTileIndex {
                    index: id,
                    max_tiles: catalog.len(),
                })?,
            None => &unresolved,
        };

        imageops::replace(&mut canvas, image, x, y);
    }

    Ok(canvas)
}

/// Render a grid and save it as PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if rendering fails, the parent directory cannot be
/// created, or the image cannot be saved
pub fn export_grid_as_png(grid: &Grid, catalog: &Catalog, output_path: &Path) -> Result<()> {
    let canvas = render_grid(grid, catalog)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    canvas
        .save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

fn scaled(cells: usize, cell_size: u32) -> Result<u32> {
    u32::try_from(cells)
        .ok()
        .and_then(|cells| cells.checked_mul(cell_size))
        .ok_or_else(|| {
            crate::io::error::invalid_parameter(
                "dimensions",
                &cells,
                &"rendered image exceeds the maximum image size",
            )
        })
}
