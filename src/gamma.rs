//! Gamma correction

use crate::span::{Span, ALPHA_OPAQUE};
use crate::Painter;

const LUT_LEN: usize = 256;

/// Remaps span alpha through a gamma curve before passing spans on
///
/// The curve is sampled into a 256 entry table when the gamma is set;
///   alphas between entries are linearly interpolated. Alphas of exactly
///   0 and 0xFFFF are never changed.
///
///     use smooth_raster::{GammaCorrectionPainter, Painter, PainterFunc, Span};
///
///     let mut out = vec![];
///     let mut sink = PainterFunc::new(|spans: &mut [Span], _done| out.extend_from_slice(spans));
///     let mut gamma = GammaCorrectionPainter::new(&mut sink, 2.0);
///     gamma.paint(&mut [Span::new(0, 0, 1, 0x8080), Span::new(0, 1, 2, 0xFFFF)], true);
///     drop(gamma);
///     drop(sink);
///     assert_eq!(out[0].alpha, 0x4080);
///     assert_eq!(out[1].alpha, 0xFFFF);
pub struct GammaCorrectionPainter<'a, P: Painter + ?Sized> {
    painter: &'a mut P,
    gamma: f64,
    lut: [u16; LUT_LEN],
    gamma_is_one: bool,
}

impl<'a, P: Painter + ?Sized> GammaCorrectionPainter<'a, P> {
    pub fn new(painter: &'a mut P, gamma: f64) -> Self {
        let mut g = Self { painter, gamma: 1.0, lut: [0; LUT_LEN], gamma_is_one: true };
        g.set_gamma(gamma);
        g
    }
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
    /// Set the gamma and rebuild the lookup table
    pub fn set_gamma(&mut self, gamma: f64) {
        self.gamma = gamma;
        self.gamma_is_one = gamma == 1.0;
        if self.gamma_is_one {
            return;
        }
        for (i, v) in self.lut.iter_mut().enumerate() {
            let a = (i as f64 / 255.0).powf(gamma);
            *v = (65535.0 * a) as u16;
        }
    }
    /// Corrected value of a single alpha
    pub fn correct(&self, alpha: u32) -> u32 {
        if self.gamma_is_one || alpha == 0 || alpha >= ALPHA_OPAQUE {
            return alpha;
        }
        const N: u32 = 0x101;
        let (p, q) = ((alpha / N) as usize, alpha % N);
        let a = u32::from(self.lut[p]) * (N - q) + u32::from(self.lut[p + 1]) * q;
        (a + N / 2) / N
    }
}

impl<P: Painter + ?Sized> Painter for GammaCorrectionPainter<'_, P> {
    fn paint(&mut self, spans: &mut [Span], done: bool) {
        if !self.gamma_is_one {
            for s in spans.iter_mut() {
                s.alpha = self.correct(s.alpha);
            }
        }
        self.painter.paint(spans, done);
    }
}
