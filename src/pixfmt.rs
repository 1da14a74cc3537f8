//! Pixel Format
//!
//! Typed destinations for painters. The caller owns a [`Pixfmt`]; painters
//!   only borrow it.

use crate::buffer::RenderingBuffer;
use crate::color::{Gray8, Rgba8};
use crate::error::{Error, Result};

use image::{GrayImage, RgbaImage};

use std::marker::PhantomData;
use std::path::Path;

/// Layout of one pixel
pub trait PixelFormat {
    /// Bytes per pixel
    fn bpp() -> usize;
}
impl PixelFormat for Gray8 {
    fn bpp() -> usize { 1 }
}
impl PixelFormat for Rgba8 {
    fn bpp() -> usize { 4 }
}

/// Pixel Format Wrapper around raw pixel component data
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct Pixfmt<T> {
    rbuf: RenderingBuffer,
    phantom: PhantomData<T>,
}

impl<T: PixelFormat> Pixfmt<T> {
    /// Create new zeroed Pixel Format of width * height * bpp
    pub fn new(width: usize, height: usize) -> Self {
        Self { rbuf: RenderingBuffer::new(width, height, T::bpp()),
               phantom: PhantomData }
    }
    /// Wrap existing pixel data with `stride` bytes per row
    pub fn from_raw(width: usize, height: usize, stride: usize, data: Vec<u8>) -> Result<Self> {
        let rbuf = RenderingBuffer::from_raw(width, height, T::bpp(), stride, data)?;
        Ok(Self { rbuf, phantom: PhantomData })
    }
    pub fn width(&self) -> usize {
        self.rbuf.width
    }
    pub fn height(&self) -> usize {
        self.rbuf.height
    }
    pub fn stride(&self) -> usize {
        self.rbuf.stride
    }
    pub fn rbuf(&self) -> &RenderingBuffer {
        &self.rbuf
    }
    /// Raw bytes, including stride padding
    pub fn pixeldata(&self) -> &[u8] {
        &self.rbuf.data
    }
    /// Release the underlying bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.rbuf.data
    }
    /// Clear all pixels to zero
    pub fn clear(&mut self) {
        self.rbuf.clear();
    }
    /// Bytes of pixels `x0 .. x1` on row `y`
    ///
    /// Callers clip to the bounds first.
    pub(crate) fn hspan_mut(&mut self, y: usize, x0: usize, x1: usize) -> &mut [u8] {
        let bpp = T::bpp();
        &mut self.rbuf.row_mut(y)[x0 * bpp .. x1 * bpp]
    }
    /// Rows of image data, stride padding removed
    fn packed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width() * self.height() * T::bpp());
        for y in 0 .. self.height() {
            out.extend_from_slice(self.rbuf.row(y));
        }
        out
    }
}

impl Pixfmt<Gray8> {
    /// Value at (`x`,`y`)
    pub fn get(&self, id: (usize, usize)) -> u8 {
        self.rbuf[id][0]
    }
    /// Set (`x`,`y`), ignoring locations outside the image
    pub fn set(&mut self, id: (usize, usize), v: u8) {
        if id.0 < self.width() && id.1 < self.height() {
            self.rbuf[id][0] = v;
        }
    }
    pub fn fill(&mut self, v: u8) {
        self.rbuf.fill(v);
    }
    pub fn from_image(img: &GrayImage) -> Self {
        let (w, h) = img.dimensions();
        Self { rbuf: RenderingBuffer { data: img.as_raw().clone(),
                                       width: w as usize,
                                       height: h as usize,
                                       bpp: 1,
                                       stride: w as usize },
               phantom: PhantomData }
    }
    pub fn to_image(&self) -> Result<GrayImage> {
        let required = self.width() * self.height();
        GrayImage::from_raw(self.width() as u32, self.height() as u32, self.packed())
            .ok_or(Error::BufferTooSmall { len: self.rbuf.len(), required })
    }
    /// Write to an image file, the format chosen by extension (PNG)
    pub fn to_file<P: AsRef<Path>>(&self, filename: P) -> Result<()> {
        self.to_image()?.save(filename)?;
        Ok(())
    }
}

impl Pixfmt<Rgba8> {
    /// Color at (`x`,`y`)
    pub fn get(&self, id: (usize, usize)) -> Rgba8 {
        let p = &self.rbuf[id];
        Rgba8::new(p[0], p[1], p[2], p[3])
    }
    /// Set (`x`,`y`), ignoring locations outside the image
    pub fn set(&mut self, id: (usize, usize), c: Rgba8) {
        if id.0 < self.width() && id.1 < self.height() {
            let c: [u8; 4] = c.into();
            self.rbuf[id].copy_from_slice(&c);
        }
    }
    pub fn fill(&mut self, c: Rgba8) {
        let c: [u8; 4] = c.into();
        for y in 0 .. self.height() {
            for p in self.rbuf.row_mut(y).chunks_exact_mut(4) {
                p.copy_from_slice(&c);
            }
        }
    }
    pub fn from_image(img: &RgbaImage) -> Self {
        let (w, h) = img.dimensions();
        Self { rbuf: RenderingBuffer { data: img.as_raw().clone(),
                                       width: w as usize,
                                       height: h as usize,
                                       bpp: 4,
                                       stride: w as usize * 4 },
               phantom: PhantomData }
    }
    pub fn to_image(&self) -> Result<RgbaImage> {
        let required = self.width() * self.height() * 4;
        RgbaImage::from_raw(self.width() as u32, self.height() as u32, self.packed())
            .ok_or(Error::BufferTooSmall { len: self.rbuf.len(), required })
    }
    /// Write to an image file, the format chosen by extension (PNG)
    pub fn to_file<P: AsRef<Path>>(&self, filename: P) -> Result<()> {
        self.to_image()?.save(filename)?;
        Ok(())
    }
}
