//! LCD subpixel painting
//!
//! The outline is rasterized at three times the destination resolution
//!   along one axis. Each of the three samples covering a pixel drives one
//!   color channel. The alpha channel follows the strongest of the three,
//!   applied once per pixel, so no channel ever exceeds alpha.
//!
//!     use smooth_raster::*;
//!
//!     // A 1 pixel wide bar starting one subpixel into pixel 1
//!     let mut ras = Rasterizer::new(12, 1);
//!     ras.start(p26_6(4, 0));
//!     ras.add1(p26_6(4, 1));
//!     ras.add1(p26_6(7, 1));
//!     ras.add1(p26_6(7, 0));
//!     ras.add1(p26_6(4, 0));
//!
//!     let mut pix = Pixfmt::<Rgba8>::new(4, 1);
//!     pix.fill(Rgba8::white());
//!     let mut ren = RgbSubpixelPainter::new(&mut pix, Orientation::Horizontal, SubpixelOrder::Rgb);
//!     ren.set_color(Rgba8::black());
//!     ras.rasterize(&mut ren, 12, 1);
//!     assert_eq!(pix.get((0, 0)), Rgba8::white());
//!     assert_eq!(pix.get((1, 0)), Rgba8::new(255, 0, 0, 255));
//!     assert_eq!(pix.get((2, 0)), Rgba8::new(0, 255, 255, 255));
//!

use crate::color::Rgba8;
use crate::paint::{blend_over, blend_src, Op};
use crate::pixfmt::Pixfmt;
use crate::span::Span;
use crate::Painter;

/// Axis along which the three subpixels of a pixel are laid out
#[derive(Debug,PartialEq,Eq,Copy,Clone)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Physical order of the subpixels on the panel
#[derive(Debug,PartialEq,Eq,Copy,Clone)]
pub enum SubpixelOrder {
    Rgb,
    Bgr,
}

/// Paints a solid color using per-channel subpixel coverage
///
/// For [`Orientation::Horizontal`] span columns are subpixels, for
///   [`Orientation::Vertical`] span rows are.
pub struct RgbSubpixelPainter<'a> {
    pix: &'a mut Pixfmt<Rgba8>,
    op: Op,
    orientation: Orientation,
    order: SubpixelOrder,
    color: Rgba8,
    c16: [u32; 4],
    // Strongest sample coverage per pixel of the pending row
    cov: Vec<u32>,
    cov_row: Option<usize>,
}

impl<'a> RgbSubpixelPainter<'a> {
    /// Paint opaque black with [`Op::Over`]
    pub fn new(pix: &'a mut Pixfmt<Rgba8>, orientation: Orientation, order: SubpixelOrder) -> Self {
        let color = Rgba8::black();
        let cov = vec![0; pix.width()];
        Self { pix, op: Op::Over, orientation, order, color, c16: color.to_rgba16(),
               cov, cov_row: None }
    }
    pub fn set_color(&mut self, color: Rgba8) {
        self.flush_alpha();
        self.color = color;
        self.c16 = color.to_rgba16();
    }
    pub fn color(&self) -> Rgba8 {
        self.color
    }
    pub fn set_op(&mut self, op: Op) {
        self.flush_alpha();
        self.op = op;
    }
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }
    pub fn set_order(&mut self, order: SubpixelOrder) {
        self.order = order;
    }
    /// Canvas size, in subpixels, to rasterize at for this destination
    pub fn raster_size(&self) -> (i32, i32) {
        let (w, h) = (self.pix.width() as i32, self.pix.height() as i32);
        match self.orientation {
            Orientation::Horizontal => (w * 3, h),
            Orientation::Vertical => (w, h * 3),
        }
    }

    fn blender(&self) -> Blender {
        Blender { op: self.op, order: self.order, c16: self.c16 }
    }

    /// Blend the alpha of the pending row from its recorded coverage
    fn flush_alpha(&mut self) {
        let y = match self.cov_row.take() {
            Some(y) => y,
            None => return,
        };
        let (op, ca) = (self.op, self.c16[3]);
        let row = self.pix.hspan_mut(y, 0, self.cov.len());
        for (p, ma) in row.chunks_exact_mut(4).zip(self.cov.iter_mut()) {
            if *ma == 0 {
                continue;
            }
            let a = match op {
                Op::Over => blend_over(p[3], ca, ca, *ma),
                Op::Src => blend_src(ca, *ma),
            };
            // Uncovered channels keep their old values
            p[3] = a.max(p[0]).max(p[1]).max(p[2]);
            *ma = 0;
        }
    }
}

#[derive(Debug,Copy,Clone)]
struct Blender {
    op: Op,
    order: SubpixelOrder,
    c16: [u32; 4],
}

impl Blender {
    /// Blend the color channel of subpixel `k` of the pixel `p`
    fn blend(&self, p: &mut [u8], k: usize, ma: u32) {
        let ch = match self.order {
            SubpixelOrder::Rgb => k,
            SubpixelOrder::Bgr => 2 - k,
        };
        p[ch] = match self.op {
            Op::Over => blend_over(p[ch], self.c16[ch], self.c16[3], ma),
            Op::Src => blend_src(self.c16[ch], ma),
        };
    }
}

impl Painter for RgbSubpixelPainter<'_> {
    fn paint(&mut self, spans: &mut [Span], done: bool) {
        let (w, h) = (self.pix.width(), self.pix.height());
        let blender = self.blender();
        for s in spans.iter() {
            if s.alpha == 0 || s.y < 0 {
                continue;
            }
            let ma = s.alpha.min(0xFFFF);
            let y = match self.orientation {
                Orientation::Horizontal => s.y as usize,
                Orientation::Vertical => s.y as usize / 3,
            };
            if y >= h {
                continue;
            }
            if self.cov_row != Some(y) {
                self.flush_alpha();
                self.cov_row = Some(y);
            }
            match self.orientation {
                Orientation::Horizontal => {
                    let (x0, x1) = match s.clip_x(0, 3 * w as i32) {
                        Some(v) => v,
                        None => continue,
                    };
                    let (x0, x1) = (x0 as usize, x1 as usize);
                    let row = self.pix.hspan_mut(y, x0 / 3, (x1 + 2) / 3);
                    for sx in x0 .. x1 {
                        let px = sx / 3 - x0 / 3;
                        blender.blend(&mut row[px * 4 .. px * 4 + 4], sx % 3, ma);
                        let c = &mut self.cov[sx / 3];
                        *c = (*c).max(ma);
                    }
                }
                Orientation::Vertical => {
                    let k = s.y as usize % 3;
                    let (x0, x1) = match s.clip_x(0, w as i32) {
                        Some(v) => v,
                        None => continue,
                    };
                    let (x0, x1) = (x0 as usize, x1 as usize);
                    for p in self.pix.hspan_mut(y, x0, x1).chunks_exact_mut(4) {
                        blender.blend(p, k, ma);
                    }
                    for c in &mut self.cov[x0 .. x1] {
                        *c = (*c).max(ma);
                    }
                }
            }
        }
        if done {
            self.flush_alpha();
        }
    }
}
