use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ScratchState {
    Idle,
    Scratching { last_point: Point },
    Revealed,
}

impl ScratchState {
    pub const fn is_scratching(self) -> bool {
        matches!(self, Self::Scratching { .. })
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

impl Default for ScratchState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StrokeOutcome {
    Ignored,
    Started,
    Erased,
    Ended,
    Revealed,
}

impl StrokeOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Opaque cover over a raster that is erased by strokes until enough of it is gone.
///
/// Input points are in surface pixels, see [`client_to_surface`] for mapping pointer positions. Progress is only
/// estimated when a stroke ends, reading back the whole raster once per stroke; on large surfaces that read-back is
/// the dominant cost of a stroke.
#[derive(Debug)]
pub struct ScratchSurface<R, O = ()> {
    raster: R,
    config: ScratchConfig,
    estimator: ProgressEstimator,
    observer: O,
    state: ScratchState,
    last_progress: Option<f32>,
}

impl<R: Raster, O: ScratchObserver> ScratchSurface<R, O> {
    pub fn new<T>(target: T, config: ScratchConfig, observer: O) -> Result<Self>
    where
        T: RasterTarget<Raster = R>,
    {
        let raster = target.into_raster()?;
        let config = config.sanitized();
        let estimator = config.estimator();

        let mut surface = Self {
            raster,
            config,
            estimator,
            observer,
            state: ScratchState::Idle,
            last_progress: None,
        };
        surface.reset();

        log::debug!(
            "scratch surface ready: {:?}, stride {}",
            surface.size(),
            surface.estimator.stride()
        );
        Ok(surface)
    }

    /// Repaints the cover for a new round and switches the raster to erasing.
    pub fn reset(&mut self) {
        let size = self.raster.size();

        self.raster.clear();
        self.raster.set_composite_mode(CompositeMode::Paint);
        self.raster.fill(self.config.cover_color);
        if let Some(label) = &self.config.label {
            self.raster.fill_label(label, size.center());
        }
        self.raster.set_composite_mode(CompositeMode::Erase);

        self.state = ScratchState::Idle;
        self.last_progress = None;
        log::trace!("surface reset");
    }

    pub fn stroke_start(&mut self, point: Point) -> StrokeOutcome {
        match self.state {
            ScratchState::Revealed => StrokeOutcome::Ignored,
            ScratchState::Scratching { .. } => self.stroke_move(point),
            ScratchState::Idle if !point.is_finite() => StrokeOutcome::Ignored,
            ScratchState::Idle => {
                self.erase(point, point);
                self.state = ScratchState::Scratching { last_point: point };
                log::trace!("stroke start at {:?}", point);
                self.observer.on_scratch_start();
                StrokeOutcome::Started
            }
        }
    }

    pub fn stroke_move(&mut self, point: Point) -> StrokeOutcome {
        let ScratchState::Scratching { last_point } = self.state else {
            return StrokeOutcome::Ignored;
        };
        if !point.is_finite() {
            return StrokeOutcome::Ignored;
        }

        self.erase(last_point, point);
        self.state = ScratchState::Scratching { last_point: point };
        StrokeOutcome::Erased
    }

    pub fn stroke_end(&mut self) -> StrokeOutcome {
        if !self.state.is_scratching() {
            return StrokeOutcome::Ignored;
        }

        self.state = ScratchState::Idle;
        log::trace!("stroke end");
        self.observer.on_scratch_end();
        self.calculate_progress();

        if self.state.is_revealed() {
            StrokeOutcome::Revealed
        } else {
            StrokeOutcome::Ended
        }
    }

    /// Estimates the erased fraction, reports it and reveals the rest when past the auto-reveal threshold.
    ///
    /// Returns `None` without reporting anything when the raster could not be read back.
    pub fn calculate_progress(&mut self) -> Option<f32> {
        let size = self.raster.size();
        let estimate = self
            .raster
            .read_pixels()
            .and_then(|pixels| self.estimator.estimate(&pixels, size));

        let progress = match estimate {
            Ok(progress) => progress,
            Err(err) => {
                log::warn!("skipping progress report: {}", err);
                return None;
            }
        };

        log::debug!("progress: {:.3}", progress);
        self.last_progress = Some(progress);
        self.observer.on_progress(progress);

        if progress > self.config.auto_reveal_threshold && !self.state.is_revealed() {
            self.reveal();
        }

        Some(progress)
    }

    /// Clears whatever is left of the cover. Returns `false` when it was already revealed.
    pub fn reveal(&mut self) -> bool {
        if self.state.is_revealed() {
            return false;
        }

        if self.state.is_scratching() {
            self.observer.on_scratch_end();
        }

        self.raster.clear();
        self.state = ScratchState::Revealed;
        log::debug!("surface revealed");
        self.observer.on_complete();
        true
    }

    fn erase(&mut self, from: Point, to: Point) {
        // only the alpha of the brush matters when erasing
        let brush = Rgba::opaque(0, 0, 0);
        self.raster.stroke_segment(from, to, self.config.brush_width(), brush);
    }

    pub fn state(&self) -> ScratchState {
        self.state
    }

    pub fn is_scratching(&self) -> bool {
        self.state.is_scratching()
    }

    pub fn is_revealed(&self) -> bool {
        self.state.is_revealed()
    }

    pub fn last_point(&self) -> Option<Point> {
        match self.state {
            ScratchState::Scratching { last_point } => Some(last_point),
            _ => None,
        }
    }

    /// Last reported progress this round, if any stroke has ended since the last reset.
    pub fn last_progress(&self) -> Option<f32> {
        self.last_progress
    }

    pub fn size(&self) -> Size {
        self.raster.size()
    }

    pub fn config(&self) -> &ScratchConfig {
        &self.config
    }

    pub fn raster(&self) -> &R {
        &self.raster
    }

    pub fn raster_mut(&mut self) -> &mut R {
        &mut self.raster
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}
