#![no_std]

extern crate alloc;

pub use color::*;
pub use config::*;
pub use error::*;
pub use estimator::*;
pub use observer::*;
pub use pixel::*;
pub use raster::*;
pub use surface::*;
pub use types::*;

mod color;
mod config;
mod error;
mod estimator;
mod observer;
mod pixel;
mod raster;
mod surface;
mod types;
