use crate::*;

/// Bytes per pixel in a read-back buffer.
const BYTES_PER_PIXEL: usize = 4;
const ALPHA_OFFSET: usize = 3;

/// Estimates how much of the cover has been erased by sampling the alpha channel.
///
/// Only every `stride`-th pixel of the flattened buffer is inspected, so the cost per estimate is
/// `O(width * height / stride)`. With the default stride of 4 a 300x200 card takes 15 000 samples. Scratched
/// regions are blobs many pixels wide (the default brush is 40 px across), so a regular 1-in-4 lattice misses at
/// most a thin fringe along their edges; in practice the estimate stays within about 1% of the exact fraction.
/// Larger strides make each estimate cheaper but coarser, and the auto-reveal threshold has to be revalidated when
/// changing it. Configured strides are kept within `1..=MAX_STRIDE`, see [`ScratchConfig::sanitized`]; a stride that
/// is a multiple of the surface width would only ever look at one column.
///
/// The estimate divides by the number of samples actually taken, not by `width * height / stride`, so it can never
/// exceed 1 even when the pixel count is not a multiple of the stride.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProgressEstimator {
    stride: usize,
}

impl ProgressEstimator {
    pub const DEFAULT_STRIDE: usize = 4;
    /// Largest stride the 0.85 auto-reveal threshold was validated for.
    pub const MAX_STRIDE: usize = 64;

    /// A stride of zero is treated as 1 (exhaustive scan).
    pub const fn new(stride: usize) -> Self {
        Self {
            stride: if stride == 0 { 1 } else { stride },
        }
    }

    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Number of pixels that get inspected for a surface of `size`.
    pub const fn sample_count(&self, size: Size) -> usize {
        size.area().div_ceil(self.stride)
    }

    /// Fraction of sampled pixels that are fully transparent, in `[0, 1]`.
    pub fn estimate(&self, pixels: &[u8], size: Size) -> Result<f32> {
        let area = size.area();
        let expected = area * BYTES_PER_PIXEL;
        if pixels.len() < expected {
            return Err(ScratchError::PixelBufferMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        if area == 0 {
            return Ok(0.0);
        }

        let (sampled, transparent) = pixels[..expected]
            .iter()
            .skip(ALPHA_OFFSET)
            .step_by(self.stride.saturating_mul(BYTES_PER_PIXEL))
            .fold((0usize, 0usize), |(sampled, transparent), &alpha| {
                (sampled + 1, transparent + usize::from(alpha == 0))
            });

        Ok((transparent as f32 / sampled as f32).clamp(0.0, 1.0))
    }
}

impl Default for ProgressEstimator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STRIDE)
    }
}
