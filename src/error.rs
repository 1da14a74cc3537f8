//! Errors

use thiserror::Error;

/// Errors from destination buffer construction and image output
///
/// Rasterizing and painting never fail.
#[derive(Debug,Error)]
pub enum Error {
    #[error("buffer of {len} bytes is too small, {required} bytes required")]
    BufferTooSmall { len: usize, required: usize },
    #[error("stride {stride} is smaller than a row of {row} bytes")]
    InvalidStride { stride: usize, row: usize },
    #[error("image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
