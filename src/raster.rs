//! Rasterizer
//!
//! Accumulates lines and Bézier curves, in 26.6 fixed-point, into a grid
//!   of cells holding signed area and cover, then walks the cells row by
//!   row turning them into [`Span`]s for a [`Painter`].
//!
//! Lines are broken first into scanlines and then into cells within a
//!   scanline. For each cell the doubled trapezoid area left of the edge
//!   and the vertical extent of the edge are recorded. Curves are
//!   flattened into lines.
//!
//!     use smooth_raster::{Rasterizer, Pixfmt, Gray8, AlphaSrcPainter, p26_6};
//!
//!     let mut ras = Rasterizer::new(8, 8);
//!     ras.start(p26_6(2, 2));
//!     ras.add1(p26_6(2, 6));
//!     ras.add1(p26_6(6, 6));
//!     ras.add1(p26_6(6, 2));
//!     ras.add1(p26_6(2, 2));
//!
//!     let mut pix = Pixfmt::<Gray8>::new(8, 8);
//!     ras.rasterize(&mut AlphaSrcPainter::new(&mut pix), 8, 8);
//!     assert_eq!(pix.get((3, 3)), 255);
//!     assert_eq!(pix.get((1, 3)), 0);
//!     assert_eq!(pix.get((6, 3)), 0);
//!

use log::{debug, trace, warn};

use crate::cell::CellBuffer;
use crate::fixed::{Int26_6, Point26_6, FIXED_MASK, FIXED_ONE, FIXED_SHIFT};
use crate::path::Path;
use crate::span::{Span, SPAN_BUFFER_LEN};
use crate::Adder;
use crate::Painter;

/// Upper bound on the number of curve subdivision levels
pub const MAX_NSPLIT: usize = 16;

const ONE: i64 = FIXED_ONE as i64;
const SHIFT: i64 = FIXED_SHIFT as i64;
const MASK: i64 = FIXED_MASK as i64;

/// Rule deciding the inside of self-overlapping outlines
#[derive(Debug,PartialEq,Eq,Copy,Clone)]
pub enum FillingRule {
    NonZero,
    EvenOdd,
}
impl Default for FillingRule {
    fn default() -> FillingRule {
        FillingRule::NonZero
    }
}

/// Lifecycle of a [`Rasterizer`]
#[derive(Debug,PartialEq,Eq,Copy,Clone)]
pub enum RasterState {
    /// Reset, no geometry yet
    Idle,
    /// Outline commands are being accumulated
    Accumulating,
    /// Spans have been emitted and the cells dropped
    Flushed,
}
impl Default for RasterState {
    fn default() -> RasterState {
        RasterState::Idle
    }
}

/// Anti-aliased cell accumulation rasterizer
///
/// Construct once and [`reset`](#method.reset) between frames; the cell
///   arena keeps its allocation.
#[derive(Debug)]
pub struct Rasterizer {
    cells: CellBuffer,
    filling_rule: FillingRule,
    state: RasterState,
    // Offset added to every emitted span
    dx: i32,
    dy: i32,
    split_scale2: i64,
    split_scale3: i64,
    // Pen position
    a: Point26_6,
    // Current cell and its pending contribution
    xi: i64,
    yi: i64,
    area: i64,
    cover: i64,
    spans: [Span; SPAN_BUFFER_LEN],
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Rasterizer {
    /// Create a rasterizer for a `width` x `height` pixel canvas
    pub fn new(width: i32, height: i32) -> Self {
        let mut ras = Rasterizer {
            cells: CellBuffer::new(),
            filling_rule: FillingRule::default(),
            state: RasterState::Idle,
            dx: 0,
            dy: 0,
            split_scale2: 0,
            split_scale3: 0,
            a: Point26_6::default(),
            xi: 0,
            yi: 0,
            area: 0,
            cover: 0,
            spans: [Span::default(); SPAN_BUFFER_LEN],
        };
        ras.reset(width, height);
        ras
    }

    /// Set the canvas size and drop all accumulated geometry
    ///
    /// Negative sizes are treated as zero.
    pub fn reset(&mut self, width: i32, height: i32) {
        let width = width.max(0);
        let height = height.max(0);
        // Same flatness heuristic as FreeType 2.4
        let (mut ss2, mut ss3) = (32, 16);
        if width > 24 || height > 24 {
            ss2 *= 2;
            ss3 *= 2;
            if width > 120 || height > 120 {
                ss2 *= 2;
                ss3 *= 2;
            }
        }
        self.split_scale2 = ss2;
        self.split_scale3 = ss3;
        self.cells.reset(i64::from(width), i64::from(height));
        self.clear_pen();
        debug!("raster reset {}x{}", width, height);
    }

    /// Drop all accumulated geometry, keeping the canvas size
    pub fn clear(&mut self) {
        self.cells.clear();
        self.clear_pen();
    }

    fn clear_pen(&mut self) {
        self.a = Point26_6::default();
        self.xi = 0;
        self.yi = 0;
        self.area = 0;
        self.cover = 0;
        self.state = RasterState::Idle;
    }

    pub fn width(&self) -> i32 {
        self.cells.width() as i32
    }
    pub fn height(&self) -> i32 {
        self.cells.height() as i32
    }
    pub fn state(&self) -> RasterState {
        self.state
    }
    pub fn filling_rule(&self) -> FillingRule {
        self.filling_rule
    }
    pub fn set_filling_rule(&mut self, rule: FillingRule) {
        self.filling_rule = rule;
    }
    /// Select non-zero (`true`) or even-odd (`false`) winding
    pub fn set_use_non_zero_winding(&mut self, non_zero: bool) {
        self.filling_rule = if non_zero {
            FillingRule::NonZero
        } else {
            FillingRule::EvenOdd
        };
    }
    /// Offset added to the position of every emitted span
    pub fn set_offset(&mut self, dx: i32, dy: i32) {
        self.dx = dx;
        self.dy = dy;
    }
    pub fn offset(&self) -> (i32, i32) {
        (self.dx, self.dy)
    }
    /// Number of cells currently stored, including the pending cell
    pub fn total_cells(&self) -> usize {
        self.cells.total_cells() + if self.area != 0 || self.cover != 0 { 1 } else { 0 }
    }

    fn save_cell(&mut self) {
        if self.area != 0 || self.cover != 0 {
            self.cells.add(self.xi, self.yi, self.area, self.cover);
            self.area = 0;
            self.cover = 0;
        }
    }

    fn set_cell(&mut self, xi: i64, yi: i64) {
        if self.xi != xi || self.yi != yi {
            self.save_cell();
            self.xi = xi;
            self.yi = yi;
        }
    }

    /// Accumulate the part of a line within scanline `yi`
    ///
    /// `x0` and `x1` are 26.6 positions, `y0f` and `y1f` are the fractional
    ///   rows within the scanline, in `0..=64`.
    fn scan(&mut self, yi: i64, x0: i64, y0f: i64, x1: i64, y1f: i64) {
        let x0i = x0 >> SHIFT;
        let x0f = x0 & MASK;
        let x1i = x1 >> SHIFT;
        let x1f = x1 & MASK;

        // Horizontal
        if y0f == y1f {
            self.set_cell(x1i, yi);
            return;
        }
        let dx = x1 - x0;
        let dy = y1f - y0f;
        // Single cell
        if x0i == x1i {
            self.area += (x0f + x1f) * dy;
            self.cover += dy;
            return;
        }
        // Two or more cells; all but the first and last span the full width
        let (p, q, edge0, edge1, xi_delta) = if dx > 0 {
            ((ONE - x0f) * dy, dx, 0, ONE, 1)
        } else {
            (x0f * dy, -dx, ONE, 0, -1)
        };
        let (mut y_delta, mut y_rem) = (p / q, p % q);
        if y_rem < 0 {
            y_delta -= 1;
            y_rem += q;
        }
        // First cell
        let mut xi = x0i;
        let mut y = y0f;
        self.area += (x0f + edge1) * y_delta;
        self.cover += y_delta;
        xi += xi_delta;
        y += y_delta;
        self.set_cell(xi, yi);
        if xi != x1i {
            let p = ONE * (y1f - y + y_delta);
            let (mut full_delta, mut full_rem) = (p / q, p % q);
            if full_rem < 0 {
                full_delta -= 1;
                full_rem += q;
            }
            y_rem -= q;
            while xi != x1i {
                y_delta = full_delta;
                y_rem += full_rem;
                if y_rem >= 0 {
                    y_delta += 1;
                    y_rem -= q;
                }
                self.area += ONE * y_delta;
                self.cover += y_delta;
                xi += xi_delta;
                y += y_delta;
                self.set_cell(xi, yi);
            }
        }
        // Last cell
        let y_delta = y1f - y;
        self.area += (edge0 + x1f) * y_delta;
        self.cover += y_delta;
    }

    /// Begin a new subpath at `a`
    ///
    /// Subpaths are never closed automatically.
    pub fn start(&mut self, a: Point26_6) {
        self.set_cell(i64::from(a.x.floor()), i64::from(a.y.floor()));
        self.a = a;
        self.state = RasterState::Accumulating;
    }

    /// Add a line from the pen to `b`
    pub fn add1(&mut self, b: Point26_6) {
        let (x0, y0) = (self.a.x.wide(), self.a.y.wide());
        let (x1, y1) = (b.x.wide(), b.y.wide());
        let dx = x1 - x0;
        let dy = y1 - y0;
        let y0i = y0 >> SHIFT;
        let y0f = y0 & MASK;
        let y1i = y1 >> SHIFT;
        let y1f = y1 & MASK;

        if y0i == y1i {
            // Single scanline
            self.scan(y0i, x0, y0f, x1, y1f);
        } else if dx == 0 {
            // Vertical; only the cover and area of one column change
            let (edge0, edge1, yi_delta) = if dy > 0 { (0, ONE, 1) } else { (ONE, 0, -1) };
            let x0i = x0 >> SHIFT;
            let x0f_times2 = (x0 & MASK) * 2;
            let mut yi = y0i;
            // First pixel
            let dcover = edge1 - y0f;
            self.area += x0f_times2 * dcover;
            self.cover += dcover;
            yi += yi_delta;
            self.set_cell(x0i, yi);
            // Intermediate pixels
            let dcover = edge1 - edge0;
            let darea = x0f_times2 * dcover;
            while yi != y1i {
                self.area += darea;
                self.cover += dcover;
                yi += yi_delta;
                self.set_cell(x0i, yi);
            }
            // Last pixel
            let dcover = y1f - edge0;
            self.area += x0f_times2 * dcover;
            self.cover += dcover;
        } else {
            // Two or more scanlines; all but the first and last span the
            // full height of the row
            let (p, q, edge0, edge1, yi_delta) = if dy > 0 {
                ((ONE - y0f) * dx, dy, 0, ONE, 1)
            } else {
                (y0f * dx, -dy, ONE, 0, -1)
            };
            let (mut x_delta, mut x_rem) = (p / q, p % q);
            if x_rem < 0 {
                x_delta -= 1;
                x_rem += q;
            }
            // First scanline
            let mut x = x0;
            let mut yi = y0i;
            self.scan(yi, x, y0f, x + x_delta, edge1);
            x += x_delta;
            yi += yi_delta;
            self.set_cell(x >> SHIFT, yi);
            if yi != y1i {
                let p = ONE * dx;
                let (mut full_delta, mut full_rem) = (p / q, p % q);
                if full_rem < 0 {
                    full_delta -= 1;
                    full_rem += q;
                }
                x_rem -= q;
                while yi != y1i {
                    x_delta = full_delta;
                    x_rem += full_rem;
                    if x_rem >= 0 {
                        x_delta += 1;
                        x_rem -= q;
                    }
                    self.scan(yi, x, edge0, x + x_delta, edge1);
                    x += x_delta;
                    yi += yi_delta;
                    self.set_cell(x >> SHIFT, yi);
                }
            }
            // Last scanline
            self.scan(yi, x, edge0, x1, y1f);
        }
        self.a = b;
        self.state = RasterState::Accumulating;
    }

    /// Add a quadratic Bézier from the pen through control `b` to `c`
    pub fn add2(&mut self, b: Point26_6, c: Point26_6) {
        let a = self.a;
        // How far the control point strays from the chord midpoint
        let dev = max_abs(
            a.x.wide() - 2 * b.x.wide() + c.x.wide(),
            a.y.wide() - 2 * b.y.wide() + c.y.wide(),
        ) / self.split_scale2;
        let nsplit = quad_splits(dev);
        trace!("add2 {} {} {} nsplit {}", a, b, c, nsplit);

        let mut pstack = [Point26_6::default(); 2 * MAX_NSPLIT + 3];
        let mut sstack = [0usize; MAX_NSPLIT + 1];
        sstack[0] = nsplit;
        pstack[0] = c;
        pstack[1] = b;
        pstack[2] = a;
        let mut i = 0;
        loop {
            let s = sstack[i];
            let p = &mut pstack[2 * i..];
            if s > 0 {
                // Halve p[..3] into p[..3] and p[2..5]; p[0] stays, the new
                // p[4] is the old p[2]
                let m = p[1];
                p[4] = p[2];
                p[3] = mid(p[4], m);
                p[1] = mid(p[0], m);
                p[2] = mid(p[1], p[3]);
                sstack[i] = s - 1;
                sstack[i + 1] = s - 1;
                i += 1;
            } else {
                // Two line pieces through the curve midpoint
                let end = p[0];
                let m = Point26_6::new(
                    quad_mid(p[0].x, p[1].x, p[2].x),
                    quad_mid(p[0].y, p[1].y, p[2].y),
                );
                self.add1(m);
                self.add1(end);
                if i == 0 {
                    break;
                }
                i -= 1;
            }
        }
    }

    /// Add a cubic Bézier from the pen through controls `b` and `c` to `d`
    pub fn add3(&mut self, b: Point26_6, c: Point26_6, d: Point26_6) {
        let a = self.a;
        let dev2 = max_abs(
            a.x.wide() - 3 * (b.x.wide() + c.x.wide()) + d.x.wide(),
            a.y.wide() - 3 * (b.y.wide() + c.y.wide()) + d.y.wide(),
        ) / self.split_scale2;
        let dev3 = max_abs(
            a.x.wide() - 2 * b.x.wide() + d.x.wide(),
            a.y.wide() - 2 * b.y.wide() + d.y.wide(),
        ) / self.split_scale3;
        let nsplit = cubic_splits(dev2, dev3);
        trace!("add3 {} {} {} {} nsplit {}", a, b, c, d, nsplit);

        let mut pstack = [Point26_6::default(); 3 * MAX_NSPLIT + 4];
        let mut sstack = [0usize; MAX_NSPLIT + 1];
        sstack[0] = nsplit;
        pstack[0] = d;
        pstack[1] = c;
        pstack[2] = b;
        pstack[3] = a;
        let mut i = 0;
        loop {
            let s = sstack[i];
            let p = &mut pstack[3 * i..];
            if s > 0 {
                // Halve p[..4] into p[..4] and p[3..7]; p[0] stays, the new
                // p[6] is the old p[3]
                let m01 = mid(p[0], p[1]);
                let m12 = mid(p[1], p[2]);
                let m23 = mid(p[2], p[3]);
                p[6] = p[3];
                p[5] = m23;
                p[1] = m01;
                p[2] = mid(m01, m12);
                p[4] = mid(m12, m23);
                p[3] = mid(p[2], p[4]);
                sstack[i] = s - 1;
                sstack[i + 1] = s - 1;
                i += 1;
            } else {
                let end = p[0];
                let m = Point26_6::new(
                    cubic_mid(p[0].x, p[1].x, p[2].x, p[3].x),
                    cubic_mid(p[0].y, p[1].y, p[2].y, p[3].y),
                );
                self.add1(m);
                self.add1(end);
                if i == 0 {
                    break;
                }
                i -= 1;
            }
        }
    }

    /// Replay every command of `path`
    pub fn add_path(&mut self, path: &Path) {
        path.replay(self);
    }

    /// Emit the accumulated coverage as spans to `painter`
    ///
    /// Rows are visited top to bottom, cells left to right. Spans are
    ///   clamped to `[0,width)` and rows at or beyond `height` are skipped.
    ///   Batches of at most [`SPAN_BUFFER_LEN`] spans are painted with
    ///   `done == false`, followed by exactly one final, possibly empty,
    ///   batch with `done == true`. The cells are dropped afterwards; call
    ///   [`reset`](#method.reset) or [`clear`](#method.clear) before
    ///   accumulating again.
    pub fn rasterize<P: Painter + ?Sized>(&mut self, painter: &mut P, width: i32, height: i32) {
        if self.state == RasterState::Flushed {
            warn!("rasterize called again without reset");
        }
        self.save_cell();

        let rule = self.filling_rule;
        let (dx, dy) = (self.dx, self.dy);
        let width = i64::from(width.max(0));
        let rows = i64::from(height.max(0)).min(self.cells.height());
        let spans = &mut self.spans;
        let mut n = 0;
        let mut total = 0;
        for yi in 0..rows {
            let mut xi = 0;
            let mut cover = 0;
            for cell in self.cells.row(yi) {
                // Gap between the previous cell and this one
                if cover != 0 && cell.x > xi {
                    let alpha = area_to_alpha(rule, cover * ONE * 2);
                    if alpha != 0 {
                        if let Some(s) = clamped_span(yi, xi, cell.x, width, alpha) {
                            spans[n] = s.translate(dx, dy);
                            n += 1;
                        }
                    }
                }
                cover += cell.cover;
                let alpha = area_to_alpha(rule, cover * ONE * 2 - cell.area);
                xi = cell.x + 1;
                if alpha != 0 {
                    if let Some(s) = clamped_span(yi, cell.x, xi, width, alpha) {
                        spans[n] = s.translate(dx, dy);
                        n += 1;
                    }
                }
                if n > SPAN_BUFFER_LEN - 2 {
                    trace!("paint batch of {} spans", n);
                    painter.paint(&mut spans[..n], false);
                    total += n;
                    n = 0;
                }
            }
        }
        total += n;
        painter.paint(&mut spans[..n], true);
        debug!("rasterized {} cells into {} spans", self.cells.total_cells(), total);

        self.cells.clear();
        self.area = 0;
        self.cover = 0;
        self.state = RasterState::Flushed;
    }

    /// Convert an accumulated area into a 16-bit alpha
    pub fn area_to_alpha(&self, area: i64) -> u32 {
        area_to_alpha(self.filling_rule, area)
    }
}

impl Adder for Rasterizer {
    fn start(&mut self, a: Point26_6) {
        Rasterizer::start(self, a)
    }
    fn add1(&mut self, b: Point26_6) {
        Rasterizer::add1(self, b)
    }
    fn add2(&mut self, b: Point26_6, c: Point26_6) {
        Rasterizer::add2(self, b, c)
    }
    fn add3(&mut self, b: Point26_6, c: Point26_6, d: Point26_6) {
        Rasterizer::add3(self, b, c, d)
    }
}

fn clamped_span(y: i64, x0: i64, x1: i64, width: i64, alpha: u32) -> Option<Span> {
    let x0 = x0.max(0);
    let x1 = x1.min(width);
    if x0 < x1 {
        Some(Span::new(y as i32, x0 as i32, x1 as i32, alpha))
    } else {
        None
    }
}

/// Convert an area into a 16-bit alpha
///
/// A fully covered pixel has an area of 64 * 64 * 2 and maps to 0xFFFF.
///   Larger areas saturate under [`FillingRule::NonZero`] and fold back
///   toward zero under [`FillingRule::EvenOdd`].
pub fn area_to_alpha(rule: FillingRule, area: i64) -> u32 {
    // Round to nearest
    let a = ((area + 1) >> 1).abs();
    let alpha = match rule {
        FillingRule::NonZero => a.min(0x0FFF) as u32,
        FillingRule::EvenOdd => {
            let alpha = (a & 0x1FFF) as u32;
            if alpha > 0x1000 {
                0x2000 - alpha
            } else if alpha == 0x1000 {
                0x0FFF
            } else {
                alpha
            }
        }
    };
    // 12-bit to 16-bit
    alpha << 4 | alpha >> 8
}

fn max_abs(a: i64, b: i64) -> i64 {
    a.abs().max(b.abs())
}

fn quad_splits(mut dev: i64) -> usize {
    let mut nsplit = 0;
    while dev > 0 && nsplit < MAX_NSPLIT {
        dev /= 4;
        nsplit += 1;
    }
    nsplit
}

fn cubic_splits(mut dev2: i64, mut dev3: i64) -> usize {
    let mut nsplit = 0;
    while (dev2 > 0 || dev3 > 0) && nsplit < MAX_NSPLIT {
        dev2 /= 8;
        dev3 /= 4;
        nsplit += 1;
    }
    nsplit
}

fn mid(a: Point26_6, b: Point26_6) -> Point26_6 {
    Point26_6::new(
        Int26_6(((a.x.wide() + b.x.wide()) / 2) as i32),
        Int26_6(((a.y.wide() + b.y.wide()) / 2) as i32),
    )
}

fn quad_mid(a: Int26_6, b: Int26_6, c: Int26_6) -> Int26_6 {
    Int26_6(((a.wide() + 2 * b.wide() + c.wide()) / 4) as i32)
}

fn cubic_mid(a: Int26_6, b: Int26_6, c: Int26_6, d: Int26_6) -> Int26_6 {
    Int26_6(((a.wide() + 3 * (b.wide() + c.wide()) + d.wide()) / 8) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_non_zero_saturates() {
        let full = 64 * 64 * 2;
        assert_eq!(area_to_alpha(FillingRule::NonZero, 0), 0);
        assert_eq!(area_to_alpha(FillingRule::NonZero, full), 0xFFFF);
        assert_eq!(area_to_alpha(FillingRule::NonZero, -full), 0xFFFF);
        assert_eq!(area_to_alpha(FillingRule::NonZero, 2 * full), 0xFFFF);
        assert_eq!(area_to_alpha(FillingRule::NonZero, full / 2), 0x800 << 4 | 0x800 >> 8);
    }
    #[test]
    fn alpha_even_odd_folds() {
        let full = 64 * 64 * 2;
        assert_eq!(area_to_alpha(FillingRule::EvenOdd, full), 0xFFFF);
        assert_eq!(area_to_alpha(FillingRule::EvenOdd, 2 * full), 0);
        assert_eq!(area_to_alpha(FillingRule::EvenOdd, 3 * full), 0xFFFF);
        // 0x1800 folds to 0x0800
        assert_eq!(area_to_alpha(FillingRule::EvenOdd, 0x3000), 0x8008);
        assert_eq!(area_to_alpha(FillingRule::EvenOdd, 0x2001), 0xFFFF);
    }
    #[test]
    fn split_counts_are_bounded() {
        assert_eq!(quad_splits(0), 0);
        assert_eq!(quad_splits(3), 1);
        assert_eq!(quad_splits(4), 2);
        assert_eq!(quad_splits(i64::MAX), MAX_NSPLIT);
        assert_eq!(cubic_splits(0, 0), 0);
        assert_eq!(cubic_splits(0, 5), 2);
        assert_eq!(cubic_splits(i64::MAX, i64::MAX), MAX_NSPLIT);
    }
    #[test]
    fn split_scale_tracks_size() {
        let ras = Rasterizer::new(10, 10);
        assert_eq!((ras.split_scale2, ras.split_scale3), (32, 16));
        let ras = Rasterizer::new(100, 10);
        assert_eq!((ras.split_scale2, ras.split_scale3), (64, 32));
        let ras = Rasterizer::new(10, 200);
        assert_eq!((ras.split_scale2, ras.split_scale3), (128, 64));
    }
    #[test]
    fn state_transitions() {
        let mut ras = Rasterizer::new(4, 4);
        assert_eq!(ras.state(), RasterState::Idle);
        ras.start(Point26_6::default());
        assert_eq!(ras.state(), RasterState::Accumulating);
        ras.rasterize(&mut crate::PainterFunc::new(|_, _| {}), 4, 4);
        assert_eq!(ras.state(), RasterState::Flushed);
        assert_eq!(ras.total_cells(), 0);
        ras.reset(4, 4);
        assert_eq!(ras.state(), RasterState::Idle);
    }
}
