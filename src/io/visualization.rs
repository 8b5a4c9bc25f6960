//! Diagnostic overlay showing how render cells sit on the data grid
//!
//! Data cell boundaries are drawn in red, render cell boundaries in blue, and every
//! render tile gets short green lines from its center towards its filled data cells.

use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

use crate::io::configuration::{
    BACKGROUND_COLOR, CONNECTION_COLOR, CONNECTION_LENGTH, DATA_BOUNDARY_COLOR,
    FILLED_CELL_COLOR, RENDER_BOUNDARY_COLOR,
};
use crate::io::error::{DualGridError, Result};
use crate::io::image::{canvas_size, save_png};
use crate::spatial::grid::BoundingBox;
use crate::tilemap::dual_grid::DualGrid;

/// Maps world positions in data-cell units onto overlay pixels
#[derive(Debug, Clone, Copy)]
struct Viewport {
    origin: [f64; 2],
    top: f64,
    pixels_per_cell: f64,
}

impl Viewport {
    fn to_pixel(self, world: [f64; 2]) -> [i64; 2] {
        [
            ((world[0] - self.origin[0]) * self.pixels_per_cell).round() as i64,
            ((self.top - world[1]) * self.pixels_per_cell).round() as i64,
        ]
    }
}

/// Rasterizes the overlay for one dual grid
#[derive(Debug, Clone, Copy)]
pub struct OverlayRenderer {
    pixels_per_cell: u32,
}

impl OverlayRenderer {
    /// Renderer drawing each data cell as a square of `pixels_per_cell` pixels
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `pixels_per_cell` is below 2
    pub fn new(pixels_per_cell: u32) -> Result<Self> {
        if pixels_per_cell < 2 {
            return Err(crate::io::error::invalid_parameter(
                "pixels_per_cell",
                &pixels_per_cell,
                &"overlay cells need at least 2 pixels to show both boundaries",
            ));
        }
        Ok(Self { pixels_per_cell })
    }

    /// Draw the overlay, framed one data cell beyond every occupied cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the data grid is empty or spans too many cells
    pub fn render(&self, grid: &DualGrid) -> Result<RgbaImage> {
        let data_bounds =
            grid.data_grid()
                .bounds()
                .ok_or_else(|| DualGridError::InvalidSourceData {
                    reason: "data grid has no cells to draw".to_string(),
                })?;
        let frame = BoundingBox::new(
            data_bounds.min.map(|v| v.saturating_sub(1)),
            data_bounds.max.map(|v| v.saturating_add(1)),
        );

        let ppc = self.pixels_per_cell;
        let (width, height) = canvas_size(&frame, ppc)?;
        let mut img = ImageBuffer::from_pixel(width, height, Rgba(BACKGROUND_COLOR));

        let viewport = Viewport {
            origin: [f64::from(frame.min[0]), f64::from(frame.min[1])],
            top: f64::from(frame.max[1]) + 1.0,
            pixels_per_cell: f64::from(ppc),
        };

        for (coord, _) in grid.data_grid().iter() {
            let [left, top] = viewport.to_pixel([f64::from(coord.x), f64::from(coord.y) + 1.0]);
            fill_rect(&mut img, [left, top], ppc, Rgba(FILLED_CELL_COLOR));
        }

        // Render boundaries sit half a cell off the data boundaries
        let half = ppc / 2;
        for column in 0..frame.width() as u32 {
            draw_vertical(&mut img, column * ppc + half, Rgba(RENDER_BOUNDARY_COLOR));
        }
        for row in 0..frame.height() as u32 {
            draw_horizontal(&mut img, row * ppc + half, Rgba(RENDER_BOUNDARY_COLOR));
        }
        for column in 0..=frame.width() as u32 {
            draw_vertical(&mut img, column * ppc, Rgba(DATA_BOUNDARY_COLOR));
        }
        for row in 0..=frame.height() as u32 {
            draw_horizontal(&mut img, row * ppc, Rgba(DATA_BOUNDARY_COLOR));
        }

        for (coord, _) in grid.render_grid().iter() {
            let center = coord.world_center();
            for direction in grid.connections(coord) {
                let end = [
                    f64::from(direction.x).mul_add(CONNECTION_LENGTH, center[0]),
                    f64::from(direction.y).mul_add(CONNECTION_LENGTH, center[1]),
                ];
                draw_line(
                    &mut img,
                    viewport.to_pixel(center),
                    viewport.to_pixel(end),
                    Rgba(CONNECTION_COLOR),
                );
            }
        }

        Ok(img)
    }

    /// Draw the overlay and save it as a PNG
    ///
    /// # Errors
    ///
    /// Returns an error if the data grid is empty or the image cannot be saved
    pub fn export(&self, grid: &DualGrid, output_path: &Path) -> Result<()> {
        let img = self.render(grid)?;
        save_png(&img, output_path)
    }
}

fn put(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if let Some(pixel) = img.get_pixel_mut_checked(x, y) {
        *pixel = color;
    }
}

fn fill_rect(img: &mut RgbaImage, top_left: [i64; 2], size: u32, color: Rgba<u8>) {
    for dy in 0..i64::from(size) {
        for dx in 0..i64::from(size) {
            put(img, top_left[0] + dx, top_left[1] + dy, color);
        }
    }
}

fn draw_vertical(img: &mut RgbaImage, x: u32, color: Rgba<u8>) {
    // The closing boundary lands one past the last column
    let x = x.min(img.width().saturating_sub(1));
    for y in 0..img.height() {
        put(img, i64::from(x), i64::from(y), color);
    }
}

fn draw_horizontal(img: &mut RgbaImage, y: u32, color: Rgba<u8>) {
    let y = y.min(img.height().saturating_sub(1));
    for x in 0..img.width() {
        put(img, i64::from(x), i64::from(y), color);
    }
}

fn draw_line(img: &mut RgbaImage, from: [i64; 2], to: [i64; 2], color: Rgba<u8>) {
    let steps = (to[0] - from[0]).abs().max((to[1] - from[1]).abs()).max(1);
    for step in 0..=steps {
        let t = step as f64 / steps as f64;
        let x = ((to[0] - from[0]) as f64).mul_add(t, from[0] as f64);
        let y = ((to[1] - from[1]) as f64).mul_add(t, from[1] as f64);
        put(img, x.round() as i64, y.round() as i64, color);
    }
}
