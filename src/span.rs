//! Spans

/// Number of spans collected before they are handed to a painter
pub const SPAN_BUFFER_LEN: usize = 64;

/// Fully opaque span alpha
pub const ALPHA_OPAQUE: u32 = 0xFFFF;

/// Horizontal run of pixels `[x0,x1)` on row `y` with a constant alpha
///
/// Alpha ranges from 0 (transparent) to [`ALPHA_OPAQUE`].
#[derive(Debug,Copy,Clone,Default,PartialEq,Eq)]
pub struct Span {
    pub y: i32,
    pub x0: i32,
    pub x1: i32,
    pub alpha: u32,
}

impl Span {
    pub fn new(y: i32, x0: i32, x1: i32, alpha: u32) -> Self {
        Span { y, x0, x1, alpha }
    }
    /// Number of pixels covered
    pub fn len(&self) -> i32 {
        (self.x1 - self.x0).max(0)
    }
    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0
    }
    /// Move by (`dx`,`dy`)
    pub fn translate(self, dx: i32, dy: i32) -> Span {
        Span::new(self.y + dy, self.x0 + dx, self.x1 + dx, self.alpha)
    }
    /// Clip to the columns `[min,max)`, returning `None` if nothing is left
    pub fn clip_x(&self, min: i32, max: i32) -> Option<(i32, i32)> {
        let x0 = self.x0.max(min);
        let x1 = self.x1.min(max);
        if x0 < x1 {
            Some((x0, x1))
        } else {
            None
        }
    }
}
