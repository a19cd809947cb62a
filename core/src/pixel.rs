use alloc::vec::Vec;
use core::ops::Range;
use ndarray::Array2;

use crate::*;

/// Software RGBA raster, stored row-major as `(height, width)`.
///
/// Strokes are rasterized hard-edged: a pixel is touched when its center lies within half the stroke width of the
/// segment, which gives round caps and joins for free.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelRaster {
    pixels: Array2<Rgba>,
    mode: CompositeMode,
}

impl PixelRaster {
    pub fn new(size: Size) -> Self {
        Self::filled(size, Rgba::TRANSPARENT)
    }

    pub fn filled(size: Size, color: Rgba) -> Self {
        Self {
            pixels: Array2::from_elem((size.height as usize, size.width as usize), color),
            mode: CompositeMode::default(),
        }
    }

    pub fn pixel_at(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixels.get([y as usize, x as usize]).copied()
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(pixel) = self.pixels.get_mut([y as usize, x as usize]) {
            *pixel = color;
        }
    }

    pub fn transparent_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_transparent()).count()
    }

    pub fn is_fully_opaque(&self) -> bool {
        self.pixels.iter().all(|p| p.is_opaque())
    }

    fn composite(&mut self, index: [usize; 2], color: Rgba) {
        let mode = self.mode;
        let pixel = &mut self.pixels[index];
        *pixel = match mode {
            CompositeMode::Paint => color.over(*pixel),
            CompositeMode::Erase => pixel.erased_by(color.a),
        };
    }
}

/// Pixel indices whose centers may fall inside `lo..=hi`, clamped to `0..limit`.
fn covered_span(lo: f32, hi: f32, limit: u32) -> Range<usize> {
    let limit = limit as usize;
    // positive floats truncate toward zero, which is floor
    let start = if lo > 0.0 { lo as usize } else { 0 };
    let end = if hi > 0.0 {
        (hi as usize).saturating_add(1)
    } else {
        0
    };
    start.min(limit)..end.min(limit)
}

impl Raster for PixelRaster {
    fn size(&self) -> Size {
        let (height, width) = self.pixels.dim();
        Size::new(width as u32, height as u32)
    }

    fn composite_mode(&self) -> CompositeMode {
        self.mode
    }

    fn set_composite_mode(&mut self, mode: CompositeMode) {
        self.mode = mode;
    }

    fn fill(&mut self, color: Rgba) {
        match self.mode {
            CompositeMode::Paint => self.pixels.map_inplace(|p| *p = color.over(*p)),
            CompositeMode::Erase => self.pixels.map_inplace(|p| *p = p.erased_by(color.a)),
        }
    }

    fn stroke_segment(&mut self, from: Point, to: Point, width: f32, color: Rgba) {
        let radius = width / 2.0;
        if !(radius > 0.0 && radius.is_finite()) || !from.is_finite() || !to.is_finite() {
            return;
        }

        let size = self.size();
        let xs = covered_span(from.x.min(to.x) - radius, from.x.max(to.x) + radius, size.width);
        let ys = covered_span(from.y.min(to.y) - radius, from.y.max(to.y) + radius, size.height);
        let radius_squared = radius * radius;

        for y in ys {
            for x in xs.clone() {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                if center.distance_squared_to_segment(from, to) <= radius_squared {
                    self.composite([y, x], color);
                }
            }
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    fn read_pixels(&self) -> Result<Vec<u8>> {
        Ok(self
            .pixels
            .iter()
            .flat_map(|p| [p.r, p.g, p.b, p.a])
            .collect())
    }
}

impl RasterTarget for PixelRaster {
    type Raster = Self;

    fn into_raster(self) -> Result<Self> {
        Ok(self)
    }
}
