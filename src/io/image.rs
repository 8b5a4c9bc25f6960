//! PNG mask import and render grid export

use image::{ImageBuffer, Rgba, RgbaImage};
use ndarray::Array2;
use std::path::Path;

use crate::algorithm::rules::VariantId;
use crate::io::configuration::{BACKGROUND_COLOR, MAX_GRID_DIMENSION};
use crate::io::error::{DualGridError, Result};
use crate::spatial::grid::{BoundingBox, RenderGrid};

/// Read a PNG as a fill mask: any pixel that is not fully transparent is a filled cell
///
/// Row 0 of the result is the top row of the image.
///
/// # Errors
///
/// Returns an error if:
/// - The image cannot be opened or decoded
/// - The image exceeds `MAX_GRID_DIMENSION` in either direction
pub fn load_mask(path: &Path) -> Result<Array2<bool>> {
    let img = image::open(path)
        .map_err(|e| DualGridError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .to_rgba8();

    let (width, height) = img.dimensions();
    if width as usize > MAX_GRID_DIMENSION || height as usize > MAX_GRID_DIMENSION {
        return Err(DualGridError::InvalidSourceData {
            reason: format!(
                "mask is {width}x{height}, larger than the {MAX_GRID_DIMENSION} cell limit"
            ),
        });
    }

    Ok(Array2::from_shape_fn(
        (height as usize, width as usize),
        |(row, col)| {
            img.get_pixel_checked(col as u32, row as u32)
                .is_some_and(|pixel| pixel.0[3] > 0)
        },
    ))
}

/// Display color for a variant id
///
/// Hues step by the golden angle so neighboring ids stay distinguishable.
pub fn variant_color(variant: VariantId) -> [u8; 4] {
    const GOLDEN_ANGLE: f64 = 137.507_764;
    let hue = (f64::from(variant.0) * GOLDEN_ANGLE) % 360.0;
    let [r, g, b] = hsv_to_rgb(hue, 0.65, 0.9);
    [r, g, b, 255]
}

fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> [u8; 3] {
    let chroma = value * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = value - chroma;
    [r, g, b].map(|channel| ((channel + m) * 255.0).round().clamp(0.0, 255.0) as u8)
}

/// Rasterize the render grid: one square block per render cell, colored by variant
///
/// The image is cropped to the render grid's bounds, with y increasing upwards.
///
/// # Errors
///
/// Returns `InvalidSourceData` if the render grid is empty or `pixels_per_cell` is 0
pub fn render_grid_image(render: &RenderGrid, pixels_per_cell: u32) -> Result<RgbaImage> {
    let bounds = render.bounds().ok_or_else(|| DualGridError::InvalidSourceData {
        reason: "render grid has no tiles to export".to_string(),
    })?;
    if pixels_per_cell == 0 {
        return Err(DualGridError::InvalidSourceData {
            reason: "pixels per cell must be positive".to_string(),
        });
    }

    let (width, height) = canvas_size(&bounds, pixels_per_cell)?;
    let mut img = ImageBuffer::from_pixel(width, height, Rgba(BACKGROUND_COLOR));

    for (coord, tile) in render.iter() {
        let cell_x = (i64::from(coord.x) - i64::from(bounds.min[0])) as u32;
        let cell_y = (i64::from(bounds.max[1]) - i64::from(coord.y)) as u32;
        let color = Rgba(variant_color(tile.variant));

        for dy in 0..pixels_per_cell {
            for dx in 0..pixels_per_cell {
                if let Some(pixel) = img.get_pixel_mut_checked(
                    cell_x * pixels_per_cell + dx,
                    cell_y * pixels_per_cell + dy,
                ) {
                    *pixel = color;
                }
            }
        }
    }

    Ok(img)
}

/// Pixel dimensions of an image covering `bounds`
///
/// # Errors
///
/// Returns `InvalidSourceData` if the bounds span more than `MAX_GRID_DIMENSION` cells
/// plus a one-cell frame, or the pixel size overflows
pub(crate) fn canvas_size(bounds: &BoundingBox, pixels_per_cell: u32) -> Result<(u32, u32)> {
    let limit = MAX_GRID_DIMENSION as u64 + 2;
    let too_large = || DualGridError::InvalidSourceData {
        reason: format!(
            "{}x{} cells cannot be drawn; the limit is {limit} per side",
            bounds.width(),
            bounds.height()
        ),
    };
    if bounds.width() > limit || bounds.height() > limit {
        return Err(too_large());
    }
    let width = (bounds.width() as u32).checked_mul(pixels_per_cell);
    let height = (bounds.height() as u32).checked_mul(pixels_per_cell);
    width.zip(height).ok_or_else(too_large)
}

/// Export the render grid as a PNG with a transparent background
///
/// # Errors
///
/// Returns an error if:
/// - The render grid is empty
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_render_grid_png(
    render: &RenderGrid,
    output_path: &Path,
    pixels_per_cell: u32,
) -> Result<()> {
    let img = render_grid_image(render, pixels_per_cell)?;
    save_png(&img, output_path)
}

/// Save an image, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the image cannot be written
pub fn save_png(img: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(|e| DualGridError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| DualGridError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
