//! Painters
//!
//! Painters turn [`Span`]s into pixels. Every painter clips against its
//!   own destination, and spans with zero alpha never touch a pixel.

use crate::color::{Gray8, Rgba8};
use crate::pixfmt::Pixfmt;
use crate::span::Span;
use crate::Painter;

/// Full 16-bit alpha
pub(crate) const M: u64 = 0xFFFF;

/// Porter-Duff operator
#[derive(Debug,PartialEq,Eq,Copy,Clone)]
pub enum Op {
    /// Replace the destination
    Src,
    /// Source over destination
    Over,
}
impl Default for Op {
    fn default() -> Op {
        Op::Over
    }
}

/// Adapts a closure into a [`Painter`]
///
///     use smooth_raster::{Painter, PainterFunc, Span};
///
///     let mut n = 0;
///     let mut count = PainterFunc::new(|spans: &mut [Span], _done| n += spans.len());
///     count.paint(&mut [Span::new(0, 0, 4, 0xFFFF)], true);
///     drop(count);
///     assert_eq!(n, 1);
pub struct PainterFunc<F>(pub F);

impl<F> PainterFunc<F> where F: FnMut(&mut [Span], bool) {
    pub fn new(f: F) -> Self {
        PainterFunc(f)
    }
}

impl<F> Painter for PainterFunc<F> where F: FnMut(&mut [Span], bool) {
    fn paint(&mut self, spans: &mut [Span], done: bool) {
        (self.0)(spans, done)
    }
}

/// Rows and columns of `s` inside a `width` x `height` destination
fn clip(s: &Span, width: usize, height: usize) -> Option<(usize, usize, usize)> {
    if s.alpha == 0 || s.y < 0 || s.y as usize >= height {
        return None;
    }
    let (x0, x1) = s.clip_x(0, width as i32)?;
    Some((s.y as usize, x0 as usize, x1 as usize))
}

/// Replaces the destination with the span alpha, `alpha >> 8`
pub struct AlphaSrcPainter<'a> {
    pix: &'a mut Pixfmt<Gray8>,
}

impl<'a> AlphaSrcPainter<'a> {
    pub fn new(pix: &'a mut Pixfmt<Gray8>) -> Self {
        Self { pix }
    }
}

impl Painter for AlphaSrcPainter<'_> {
    fn paint(&mut self, spans: &mut [Span], _done: bool) {
        let (w, h) = (self.pix.width(), self.pix.height());
        for s in spans.iter() {
            if let Some((y, x0, x1)) = clip(s, w, h) {
                let v = (s.alpha.min(0xFFFF) >> 8) as u8;
                self.pix.hspan_mut(y, x0, x1).iter_mut().for_each(|p| *p = v);
            }
        }
    }
}

/// Composites the span alpha over the destination
pub struct AlphaOverPainter<'a> {
    pix: &'a mut Pixfmt<Gray8>,
}

impl<'a> AlphaOverPainter<'a> {
    pub fn new(pix: &'a mut Pixfmt<Gray8>) -> Self {
        Self { pix }
    }
}

impl Painter for AlphaOverPainter<'_> {
    fn paint(&mut self, spans: &mut [Span], _done: bool) {
        let (w, h) = (self.pix.width(), self.pix.height());
        for s in spans.iter() {
            if let Some((y, x0, x1)) = clip(s, w, h) {
                let a = s.alpha.min(0xFFFF) >> 8;
                for p in self.pix.hspan_mut(y, x0, x1) {
                    let v = u32::from(*p);
                    *p = ((v * 255 + (255 - v) * a) / 255) as u8;
                }
            }
        }
    }
}

/// `dst * (1 - ca * ma) + c * ma` for one premultiplied channel
///
/// `c`, `ca` and `ma` are 16-bit.
#[inline]
pub(crate) fn blend_over(d: u8, c: u32, ca: u32, ma: u32) -> u8 {
    let (c, ca, ma) = (u64::from(c), u64::from(ca), u64::from(ma));
    let a = (M - ca * ma / M) * 0x101;
    ((u64::from(d) * a + c * ma) / M >> 8) as u8
}

/// `c * ma` for one premultiplied channel
#[inline]
pub(crate) fn blend_src(c: u32, ma: u32) -> u8 {
    (u64::from(c) * u64::from(ma) / M >> 8) as u8
}

/// Paints a solid premultiplied color onto an RGBA destination
///
///     use smooth_raster::{Painter, RgbaPainter, Pixfmt, Rgba8, Op, Span};
///
///     let mut pix = Pixfmt::<Rgba8>::new(4, 1);
///     pix.fill(Rgba8::white());
///     let mut ren = RgbaPainter::new(&mut pix);
///     ren.set_color(Rgba8::new(0, 0, 255, 255));
///     ren.set_op(Op::Src);
///     ren.paint(&mut [Span::new(0, 1, 3, 0xFFFF)], true);
///     assert_eq!(pix.get((0, 0)), Rgba8::white());
///     assert_eq!(pix.get((1, 0)), Rgba8::new(0, 0, 255, 255));
///     assert_eq!(pix.get((3, 0)), Rgba8::white());
pub struct RgbaPainter<'a> {
    pix: &'a mut Pixfmt<Rgba8>,
    op: Op,
    color: Rgba8,
    // Color widened to 16 bits
    c16: [u32; 4],
}

impl<'a> RgbaPainter<'a> {
    /// Paint opaque black with [`Op::Over`]
    pub fn new(pix: &'a mut Pixfmt<Rgba8>) -> Self {
        let color = Rgba8::black();
        Self { pix, op: Op::Over, color, c16: color.to_rgba16() }
    }
    pub fn with_color(pix: &'a mut Pixfmt<Rgba8>, color: Rgba8, op: Op) -> Self {
        Self { pix, op, color, c16: color.to_rgba16() }
    }
    pub fn set_color(&mut self, color: Rgba8) {
        self.color = color;
        self.c16 = color.to_rgba16();
    }
    pub fn color(&self) -> Rgba8 {
        self.color
    }
    pub fn set_op(&mut self, op: Op) {
        self.op = op;
    }
    pub fn op(&self) -> Op {
        self.op
    }
}

impl Painter for RgbaPainter<'_> {
    fn paint(&mut self, spans: &mut [Span], _done: bool) {
        let (w, h) = (self.pix.width(), self.pix.height());
        let [cr, cg, cb, ca] = self.c16;
        let op = self.op;
        for s in spans.iter() {
            let (y, x0, x1) = match clip(s, w, h) {
                Some(v) => v,
                None => continue,
            };
            let ma = s.alpha.min(0xFFFF);
            let row = self.pix.hspan_mut(y, x0, x1);
            match op {
                Op::Over => {
                    for p in row.chunks_exact_mut(4) {
                        p[0] = blend_over(p[0], cr, ca, ma);
                        p[1] = blend_over(p[1], cg, ca, ma);
                        p[2] = blend_over(p[2], cb, ca, ma);
                        p[3] = blend_over(p[3], ca, ca, ma);
                    }
                }
                Op::Src => {
                    let c = [blend_src(cr, ma), blend_src(cg, ma), blend_src(cb, ma), blend_src(ca, ma)];
                    for p in row.chunks_exact_mut(4) {
                        p.copy_from_slice(&c);
                    }
                }
            }
        }
    }
}
