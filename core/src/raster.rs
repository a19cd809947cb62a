use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// How new paint combines with what is already on the raster.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositeMode {
    /// New paint is drawn on top (source-over).
    Paint,
    /// New paint removes opacity instead of adding color (destination-out).
    Erase,
}

impl Default for CompositeMode {
    fn default() -> Self {
        Self::Paint
    }
}

/// Instructional text drawn over a fresh cover. Purely cosmetic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    #[serde(default = "Label::default_color")]
    pub color: Rgba,
}

impl Label {
    fn default_color() -> Rgba {
        Rgba::opaque(0x55, 0x55, 0x55)
    }

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Self::default_color(),
        }
    }
}

/// Drawable raster capability the scratch surface paints on.
///
/// Backends only need to honour the composite mode for `fill` and `stroke_segment`; `clear` always leaves every
/// pixel fully transparent.
pub trait Raster {
    fn size(&self) -> Size;

    fn composite_mode(&self) -> CompositeMode;

    fn set_composite_mode(&mut self, mode: CompositeMode);

    /// Covers the whole raster with `color`.
    fn fill(&mut self, color: Rgba);

    fn fill_label(&mut self, _label: &Label, _center: Point) {}

    /// Strokes the segment `from..to` with round caps and joins. A zero-length segment leaves a round dab.
    fn stroke_segment(&mut self, from: Point, to: Point, width: f32, color: Rgba);

    fn clear(&mut self);

    /// Reads back the whole raster as row-major RGBA, four bytes per pixel.
    fn read_pixels(&self) -> Result<Vec<u8>>;
}

/// Something a drawable [`Raster`] can be obtained from, e.g. a canvas element.
pub trait RasterTarget {
    type Raster: Raster;

    fn into_raster(self) -> Result<Self::Raster>;
}
