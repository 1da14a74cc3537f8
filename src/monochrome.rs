//! Monochrome quantization

use crate::span::{Span, ALPHA_OPAQUE};
use crate::Painter;

/// Quantizes spans to fully opaque or nothing before passing them on
///
/// Spans with `alpha >= 0x8000` become opaque and adjacent opaque spans on
///   the same row are merged; everything else is dropped. The last merged
///   run is held back until `done`.
///
///     use smooth_raster::{MonochromePainter, Painter, PainterFunc, Span};
///
///     let mut out = vec![];
///     let mut sink = PainterFunc::new(|spans: &mut [Span], _done| out.extend_from_slice(spans));
///     let mut mono = MonochromePainter::new(&mut sink);
///     mono.paint(&mut [Span::new(3, 0, 2, 0x8000), Span::new(3, 2, 5, 0xFFFF)], false);
///     mono.paint(&mut [Span::new(3, 5, 6, 0x7FFF)], true);
///     drop(mono);
///     drop(sink);
///     assert_eq!(out, vec![Span::new(3, 0, 5, 0xFFFF)]);
pub struct MonochromePainter<'a, P: Painter + ?Sized> {
    painter: &'a mut P,
    pending: Option<Span>,
}

impl<'a, P: Painter + ?Sized> MonochromePainter<'a, P> {
    pub fn new(painter: &'a mut P) -> Self {
        Self { painter, pending: None }
    }
}

impl<P: Painter + ?Sized> Painter for MonochromePainter<'_, P> {
    fn paint(&mut self, spans: &mut [Span], done: bool) {
        // Compact in place; at most one span is written per span read
        let mut j = 0;
        for i in 0 .. spans.len() {
            let s = spans[i];
            if s.alpha < 0x8000 || s.is_empty() {
                continue;
            }
            if let Some(p) = self.pending.as_mut() {
                if p.y == s.y && p.x1 == s.x0 {
                    p.x1 = s.x1;
                    continue;
                }
            }
            let next = Span::new(s.y, s.x0, s.x1, ALPHA_OPAQUE);
            if let Some(p) = self.pending.replace(next) {
                spans[j] = p;
                j += 1;
            }
        }
        if !done {
            self.painter.paint(&mut spans[..j], false);
            return;
        }
        match self.pending.take() {
            Some(last) if j < spans.len() => {
                spans[j] = last;
                self.painter.paint(&mut spans[..=j], true);
            }
            Some(last) => {
                self.painter.paint(&mut spans[..j], false);
                self.painter.paint(&mut [last], true);
            }
            None => self.painter.paint(&mut spans[..j], true),
        }
    }
}
