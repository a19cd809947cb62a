use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScratchError {
    #[error("Could not obtain a drawable 2D context from the raster target")]
    ContextUnavailable,
    #[error("Raster context was lost, pixels cannot be read back")]
    ContextLost,
    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    PixelBufferMismatch { expected: usize, actual: usize },
    #[error("Invalid color")]
    InvalidColor,
}

pub type Result<T> = core::result::Result<T, ScratchError>;
