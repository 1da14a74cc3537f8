//! Anti-aliased scanline rasterizer
//!
//! How does this work
//!    ras = Rasterizer::new(w, h)
//!    ras.start(p)                  -- 26.6 fixed-point outline
//!      add1() / add2() / add3()    -- line, quadratic, cubic
//!        scan()                    -- split a line into cells of one row
//!          set_cell()
//!     Output: Cells with X, Cover, and Area, linked per row
//!  Render to Image
//!    ras.rasterize(painter, w, h)
//!      area_to_alpha()             -- non-zero or even-odd winding
//!      Painter::paint(spans, done) -- batches of constant alpha runs
//!        AlphaSrcPainter, AlphaOverPainter, RgbaPainter, RgbSubpixelPainter
//!        MonochromePainter, GammaCorrectionPainter wrap another painter
//!
//! A filled square on an 8-bit coverage plane
//!
//!     use smooth_raster::*;
//!
//!     let mut ras = Rasterizer::new(100, 100);
//!     ras.start(p26_6(10, 10));
//!     ras.add1(p26_6(10, 90));
//!     ras.add1(p26_6(90, 90));
//!     ras.add1(p26_6(90, 10));
//!     ras.add1(p26_6(10, 10));
//!
//!     let mut pix = Pixfmt::<Gray8>::new(100, 100);
//!     ras.rasterize(&mut AlphaSrcPainter::new(&mut pix), 100, 100);
//!     assert_eq!(pix.get((50, 50)), 255);
//!     assert_eq!(pix.get((5, 5)), 0);
//!

pub mod fixed;
pub mod cell;
pub mod raster;
pub mod path;
pub mod span;
pub mod buffer;
pub mod pixfmt;
pub mod color;
pub mod paint;
pub mod monochrome;
pub mod gamma;
pub mod subpixel;
pub mod error;

pub use fixed::*;
pub use cell::{Cell, CellBuffer};
pub use raster::*;
pub use path::*;
pub use span::*;
pub use buffer::*;
pub use pixfmt::*;
pub use color::*;
pub use paint::*;
pub use monochrome::*;
pub use gamma::*;
pub use subpixel::*;
pub use error::{Error, Result};

/// Sink for outline commands in 26.6 fixed-point
pub trait Adder {
    /// Begin a new subpath at `a`
    fn start(&mut self, a: Point26_6);
    /// Line to `b`
    fn add1(&mut self, b: Point26_6);
    /// Quadratic Bézier with control `b`, ending at `c`
    fn add2(&mut self, b: Point26_6, c: Point26_6);
    /// Cubic Bézier with controls `b` and `c`, ending at `d`
    fn add3(&mut self, b: Point26_6, c: Point26_6, d: Point26_6);
}

/// Consumer of [`Span`]s
///
/// `paint` is called zero or more times with `done == false` and then
///   exactly once with `done == true`, possibly with no spans, to end a
///   pass. Spans may be modified in place and may lie partly or wholly
///   outside the destination; implementations clip. A painter is reusable
///   for another pass once it has seen `done`.
pub trait Painter {
    fn paint(&mut self, spans: &mut [Span], done: bool);
}

impl<P: Painter + ?Sized> Painter for &mut P {
    fn paint(&mut self, spans: &mut [Span], done: bool) {
        (**self).paint(spans, done)
    }
}
