use kezuri_core as scratch;
use scratch::{CompositeMode, Label, Point, Raster, RasterTarget, Rgba, ScratchError, Size};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const LABEL_FONT: &str = "bold 20px sans-serif";
/// Nudges the label down so it looks vertically centered with an alphabetic baseline.
const LABEL_BASELINE_OFFSET: f64 = 7.0;

/// Canvas element a [`CanvasRaster`] is created from.
#[derive(Clone, Debug)]
pub(crate) struct CanvasTarget(pub HtmlCanvasElement);

impl RasterTarget for CanvasTarget {
    type Raster = CanvasRaster;

    fn into_raster(self) -> scratch::Result<CanvasRaster> {
        let canvas = self.0;

        let options = js_sys::Object::new();
        if let Err(err) = js_sys::Reflect::set(
            &options,
            &JsValue::from_str("willReadFrequently"),
            &JsValue::TRUE,
        ) {
            log::warn!("failed to set context options: {:?}", err);
        }

        let context = canvas
            .get_context_with_context_options("2d", &options)
            .map_err(|err| {
                log::error!("failed to get 2d context: {:?}", err);
                ScratchError::ContextUnavailable
            })?
            .ok_or(ScratchError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ScratchError::ContextUnavailable)?;

        Ok(CanvasRaster {
            canvas,
            context,
            mode: CompositeMode::default(),
        })
    }
}

/// [`Raster`] backed by a `CanvasRenderingContext2D`.
#[derive(Debug)]
pub(crate) struct CanvasRaster {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    mode: CompositeMode,
}

impl CanvasRaster {
    const fn composite_operation(mode: CompositeMode) -> &'static str {
        match mode {
            CompositeMode::Paint => "source-over",
            CompositeMode::Erase => "destination-out",
        }
    }
}

impl Raster for CanvasRaster {
    fn size(&self) -> Size {
        Size::new(self.canvas.width(), self.canvas.height())
    }

    fn composite_mode(&self) -> CompositeMode {
        self.mode
    }

    fn set_composite_mode(&mut self, mode: CompositeMode) {
        let operation = Self::composite_operation(mode);
        match self.context.set_global_composite_operation(operation) {
            Ok(()) => self.mode = mode,
            Err(err) => log::error!("failed to set composite operation {}: {:?}", operation, err),
        }
    }

    fn fill(&mut self, color: Rgba) {
        let Size { width, height } = self.size();
        self.context.set_fill_style_str(&color.to_css());
        self.context
            .fill_rect(0.0, 0.0, f64::from(width), f64::from(height));
    }

    fn fill_label(&mut self, label: &Label, center: Point) {
        self.context.set_fill_style_str(&label.color.to_css());
        self.context.set_font(LABEL_FONT);
        self.context.set_text_align("center");
        let x = f64::from(center.x);
        let y = f64::from(center.y) + LABEL_BASELINE_OFFSET;
        if let Err(err) = self.context.fill_text(&label.text, x, y) {
            log::warn!("failed to draw label: {:?}", err);
        }
    }

    fn stroke_segment(&mut self, from: Point, to: Point, width: f32, color: Rgba) {
        let context = &self.context;
        context.begin_path();
        context.set_line_width(f64::from(width));
        context.set_line_cap("round");
        context.set_line_join("round");
        context.set_stroke_style_str(&color.to_css());
        context.move_to(f64::from(from.x), f64::from(from.y));
        context.line_to(f64::from(to.x), f64::from(to.y));
        context.stroke();
    }

    fn clear(&mut self) {
        let Size { width, height } = self.size();
        self.context
            .clear_rect(0.0, 0.0, f64::from(width), f64::from(height));
    }

    fn read_pixels(&self) -> scratch::Result<Vec<u8>> {
        let Size { width, height } = self.size();
        let image = self
            .context
            .get_image_data(0.0, 0.0, f64::from(width), f64::from(height))
            .map_err(|err| {
                log::warn!("pixel read-back failed: {:?}", err);
                ScratchError::ContextLost
            })?;
        Ok(image.data().0)
    }
}
