//! In-memory RGB page raster.

use crate::error::{TarjaError, TarjaResult};

/// Opaque black, the only fill the rasterizer paints.
pub const REDACTION_FILL: [u8; 3] = [0, 0, 0];

/// A rendered page as tightly packed RGB8 rows.
///
/// One raster is alive at a time during export; it is painted, handed to
/// the assembler and dropped before the next page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRaster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PageRaster {
    /// Creates a white raster of the given pixel dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0xff; width * height * 3],
        }
    }

    /// Wraps existing RGB8 data, validating its length.
    pub fn from_rgb(width: usize, height: usize, pixels: Vec<u8>) -> TarjaResult<Self> {
        if pixels.len() != width * height * 3 {
            return Err(TarjaError::InvalidInput {
                parameter: "pixels".to_string(),
                reason: format!(
                    "expected {} bytes for {}x{} RGB, got {}",
                    width * height * 3,
                    width,
                    height,
                    pixels.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Paints an opaque rectangle, clamped to the raster bounds.
    ///
    /// The box covers every pixel the rectangle touches: the left/top
    /// edges floor, the right/bottom edges ceil. Degenerate or fully
    /// off-raster rectangles paint nothing.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [u8; 3]) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let x0 = x.max(0.0).floor() as usize;
        let y0 = y.max(0.0).floor() as usize;
        let x1 = ((x + w).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((y + h).ceil().max(0.0) as usize).min(self.height);

        for row in y0..y1 {
            for col in x0..x1 {
                let i = (row * self.width + col) * 3;
                self.pixels[i..i + 3].copy_from_slice(&color);
            }
        }
    }
}
