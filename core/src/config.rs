use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScratchConfig {
    pub cover_color: Rgba,
    /// Half the width of an erase stroke, in surface pixels. Strokes are `2 * brush_radius` wide.
    pub brush_radius: f32,
    pub label: Option<Label>,
    /// Inspect every n-th pixel when estimating progress, within `1..=ProgressEstimator::MAX_STRIDE`.
    pub sample_stride: usize,
    /// Progress strictly above this reveals the whole surface.
    pub auto_reveal_threshold: f32,
}

impl ScratchConfig {
    pub const DEFAULT_BRUSH_RADIUS: f32 = 20.0;
    pub const MAX_BRUSH_RADIUS: f32 = 1024.0;
    pub const DEFAULT_AUTO_REVEAL_THRESHOLD: f32 = 0.85;

    /// Replaces unusable values with defaults.
    pub fn sanitized(mut self) -> Self {
        if !(self.brush_radius > 0.0 && self.brush_radius <= Self::MAX_BRUSH_RADIUS) {
            log::warn!(
                "Invalid brush radius {}, fallback to {}",
                self.brush_radius,
                Self::DEFAULT_BRUSH_RADIUS
            );
            self.brush_radius = Self::DEFAULT_BRUSH_RADIUS;
        }

        if !(1..=ProgressEstimator::MAX_STRIDE).contains(&self.sample_stride) {
            log::warn!(
                "Sample stride {} out of range, fallback to {}",
                self.sample_stride,
                ProgressEstimator::DEFAULT_STRIDE
            );
            self.sample_stride = ProgressEstimator::DEFAULT_STRIDE;
        }

        // NaN fails the range check too
        if !(self.auto_reveal_threshold > 0.0 && self.auto_reveal_threshold <= 1.0) {
            log::warn!(
                "Invalid auto-reveal threshold {}, fallback to {}",
                self.auto_reveal_threshold,
                Self::DEFAULT_AUTO_REVEAL_THRESHOLD
            );
            self.auto_reveal_threshold = Self::DEFAULT_AUTO_REVEAL_THRESHOLD;
        }

        self
    }

    /// Full width of an erase stroke, twice the radius.
    pub fn brush_width(&self) -> f32 {
        self.brush_radius * 2.0
    }

    pub fn estimator(&self) -> ProgressEstimator {
        ProgressEstimator::new(self.sample_stride)
    }
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            cover_color: Rgba::SILVER,
            brush_radius: Self::DEFAULT_BRUSH_RADIUS,
            label: None,
            sample_stride: ProgressEstimator::DEFAULT_STRIDE,
            auto_reveal_threshold: Self::DEFAULT_AUTO_REVEAL_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_already_sane() {
        assert_eq!(ScratchConfig::default().sanitized(), ScratchConfig::default());
        assert_eq!(ScratchConfig::default().brush_width(), 40.0);
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let config = ScratchConfig {
            cover_color: Rgba::opaque(1, 2, 3),
            brush_radius: -3.0,
            label: Some(Label::new("scratch here")),
            sample_stride: 0,
            auto_reveal_threshold: f32::NAN,
        }
        .sanitized();

        assert_eq!(config.brush_radius, ScratchConfig::DEFAULT_BRUSH_RADIUS);
        assert_eq!(config.sample_stride, ProgressEstimator::DEFAULT_STRIDE);
        assert_eq!(
            config.auto_reveal_threshold,
            ScratchConfig::DEFAULT_AUTO_REVEAL_THRESHOLD
        );
        assert_eq!(config.cover_color, Rgba::opaque(1, 2, 3));
        assert_eq!(config.label, Some(Label::new("scratch here")));
    }

    #[test]
    fn threshold_of_one_is_kept() {
        let config = ScratchConfig {
            auto_reveal_threshold: 1.0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(config.auto_reveal_threshold, 1.0);
    }

    #[test]
    fn stride_outside_validated_range_falls_back() {
        for sample_stride in [65, 100, usize::MAX / 2, usize::MAX] {
            let config = ScratchConfig {
                sample_stride,
                ..Default::default()
            }
            .sanitized();

            assert_eq!(config.sample_stride, ProgressEstimator::DEFAULT_STRIDE);
        }

        for sample_stride in [1, 16, ProgressEstimator::MAX_STRIDE] {
            let config = ScratchConfig {
                sample_stride,
                ..Default::default()
            }
            .sanitized();

            assert_eq!(config.sample_stride, sample_stride);
        }
    }

    #[test]
    fn oversized_brush_falls_back() {
        for brush_radius in [f32::MAX, f32::INFINITY, ScratchConfig::MAX_BRUSH_RADIUS * 2.0] {
            let config = ScratchConfig {
                brush_radius,
                ..Default::default()
            }
            .sanitized();

            assert_eq!(config.brush_radius, ScratchConfig::DEFAULT_BRUSH_RADIUS);
            assert_eq!(config.brush_width(), 40.0);
        }

        let config = ScratchConfig {
            brush_radius: ScratchConfig::MAX_BRUSH_RADIUS,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.brush_width(), 2048.0);
    }

    #[test]
    fn partial_config_deserializes_with_defaults() {
        let config: ScratchConfig = serde_json::from_str(
            r##"{"cover_color": "#ffd700", "label": {"text": "請在此刮開"}}"##,
        )
        .unwrap();

        assert_eq!(config.cover_color, Rgba::opaque(0xff, 0xd7, 0x00));
        assert_eq!(config.brush_radius, ScratchConfig::DEFAULT_BRUSH_RADIUS);
        assert_eq!(config.label.unwrap().color, Rgba::opaque(0x55, 0x55, 0x55));
    }
}
