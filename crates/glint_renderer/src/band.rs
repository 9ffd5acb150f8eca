//! Row-band rendering.
//!
//! Divides the image into horizontal bands of whole rows that can be traced
//! independently and in parallel using rayon.

use crate::{CancelToken, RenderConfig, Scene, TraceStats, Tracer};

/// A range of full-width image rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    /// First row of the band
    pub y: u32,
    /// Number of rows in the band
    pub height: u32,
    /// Image width in pixels
    pub width: u32,
    /// Index of this band, top to bottom
    pub index: usize,
}

impl RowBand {
    pub fn new(y: u32, height: u32, width: u32, index: usize) -> Self {
        Self {
            y,
            height,
            width,
            index,
        }
    }

    /// Get the total number of pixels in this band.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Default band height in rows.
pub const DEFAULT_BAND_HEIGHT: u32 = 16;

/// Split an image into bands of `band_height` rows, top to bottom.
///
/// The last band is shorter when the height is not a multiple.
pub fn generate_bands(width: u32, height: u32, band_height: u32) -> Vec<RowBand> {
    let band_height = band_height.max(1);
    let mut bands = Vec::new();

    let mut y = 0;
    while y < height {
        let h = band_height.min(height - y);
        bands.push(RowBand::new(y, h, width, bands.len()));
        y += h;
    }

    bands
}

/// Result of rendering a band.
#[derive(Debug, Clone)]
pub struct BandResult {
    /// The band that was rendered
    pub band: RowBand,
    /// Pixel colors in row-major order
    pub pixels: Vec<[u8; 3]>,
    pub stats: TraceStats,
}

/// Trace every pixel of a band with a tracer of its own.
///
/// Returns `None` if `cancel` fires before the band is finished; the token
/// is checked before each row.
pub fn render_band(
    band: &RowBand,
    scene: &Scene,
    config: &RenderConfig,
    cancel: &CancelToken,
) -> Option<BandResult> {
    let tracer = Tracer::new(scene, config);
    let mut pixels = Vec::with_capacity(band.pixel_count());

    for y in band.y..band.y + band.height {
        if cancel.is_cancelled() {
            log::debug!("Band {} cancelled at row {}", band.index, y);
            return None;
        }
        for x in 0..band.width {
            pixels.push(tracer.pixel(x, y));
        }
    }

    log::debug!("Band {} done (rows {}..{})", band.index, band.y, band.y + band.height);

    Some(BandResult {
        band: *band,
        pixels,
        stats: tracer.stats(),
    })
}
