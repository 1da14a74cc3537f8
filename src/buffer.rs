//! Rendering buffer

use crate::error::{Error, Result};

use std::ops::Index;
use std::ops::IndexMut;

/// Rendering Buffer
///
/// Data is stored as row-major order (C-format), `stride` bytes per row
#[derive(Debug,Default,Clone,PartialEq,Eq)]
pub struct RenderingBuffer {
    /// Pixel / Component level data of Image
    pub data: Vec<u8>,
    /// Image Width in pixels
    pub width: usize,
    /// Image Height in pixels
    pub height: usize,
    /// Bytes per pixel or number of color components
    pub bpp: usize,
    /// Bytes per row, at least `width * bpp`
    pub stride: usize,
}

impl RenderingBuffer {
    /// Create a new zeroed buffer of width, height, and bpp
    pub fn new(width: usize, height: usize, bpp: usize) -> Self {
        RenderingBuffer {
            width, height, bpp, stride: width * bpp,
            data: vec![0u8; width * height * bpp],
        }
    }
    /// Wrap existing pixel data
    ///
    /// Fails if `stride` cannot hold a row or `data` cannot hold
    ///   `height` rows.
    ///
    ///     use smooth_raster::{RenderingBuffer, Error};
    ///
    ///     let rbuf = RenderingBuffer::from_raw(4, 2, 1, 8, vec![0; 12]).unwrap();
    ///     assert_eq!(rbuf.row(1).len(), 4);
    ///
    ///     let err = RenderingBuffer::from_raw(4, 2, 1, 8, vec![0; 11]);
    ///     assert!(matches!(err, Err(Error::BufferTooSmall { .. })));
    ///     let err = RenderingBuffer::from_raw(4, 2, 1, 3, vec![0; 12]);
    ///     assert!(matches!(err, Err(Error::InvalidStride { .. })));
    pub fn from_raw(width: usize, height: usize, bpp: usize, stride: usize, data: Vec<u8>) -> Result<Self> {
        let row = width * bpp;
        if stride < row {
            return Err(Error::InvalidStride { stride, row });
        }
        // The last row need not be padded out to the full stride
        let required = if height == 0 { 0 } else { (height - 1) * stride + row };
        if data.len() < required {
            return Err(Error::BufferTooSmall { len: data.len(), required });
        }
        Ok(RenderingBuffer { data, width, height, bpp, stride })
    }
    /// Size of underlying Rendering Buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Pixels of row `y`, without stride padding
    pub fn row(&self, y: usize) -> &[u8] {
        debug_assert!(y < self.height);
        let i = y * self.stride;
        &self.data[i .. i + self.width * self.bpp]
    }
    /// Mutable pixels of row `y`, without stride padding
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        debug_assert!(y < self.height);
        let i = y * self.stride;
        &mut self.data[i .. i + self.width * self.bpp]
    }
    /// Set every byte of every row to `v`
    pub fn fill(&mut self, v: u8) {
        for y in 0 .. self.height {
            self.row_mut(y).iter_mut().for_each(|b| *b = v);
        }
    }
    /// Clear an image to zero
    pub fn clear(&mut self) {
        self.fill(0);
    }
    fn offset(&self, index: (usize, usize)) -> usize {
        assert!(index.0 < self.width, "request {} >= {} width", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height", index.1, self.height);
        index.1 * self.stride + index.0 * self.bpp
    }
}

impl Index<(usize,usize)> for RenderingBuffer {
    type Output = [u8];
    fn index(&self, index: (usize, usize)) -> &[u8] {
        let i = self.offset(index);
        &self.data[i .. i + self.bpp]
    }
}
impl IndexMut<(usize,usize)> for RenderingBuffer {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut [u8] {
        let i = self.offset(index);
        &mut self.data[i .. i + self.bpp]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_padding_untouched() {
        let mut rbuf = RenderingBuffer::from_raw(2, 2, 2, 6, vec![7; 12]).unwrap();
        rbuf.clear();
        assert_eq!(rbuf.data, vec![0, 0, 0, 0, 7, 7, 0, 0, 0, 0, 7, 7]);
        rbuf[(1, 1)].copy_from_slice(&[3, 4]);
        assert_eq!(rbuf.row(1), &[0, 0, 3, 4]);
    }
}
