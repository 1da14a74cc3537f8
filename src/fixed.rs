//! 26.6 Fixed-point coordinates
//!
//! The low 6 bits of an [`Int26_6`] are the fractional part of a pixel,
//!   giving 1/64 pixel precision. All arithmetic is integer.
//!
//!     use smooth_raster::{Int26_6, p26_6, i26_6};
//!
//!     let a = i26_6(3);
//!     assert_eq!(a, Int26_6(192));
//!     assert_eq!(a.floor(), 3);
//!     assert_eq!(Int26_6(65).ceil(), 2);
//!
//!     let p = p26_6(1, 2) + p26_6(3, 4);
//!     assert_eq!(p, p26_6(4, 6));
//!

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Number of fractional bits
pub const FIXED_SHIFT: i32 = 6;
/// One pixel, 64 units
pub const FIXED_ONE: i32 = 1 << FIXED_SHIFT;
/// Mask of the fractional bits
pub const FIXED_MASK: i32 = FIXED_ONE - 1;

/// Signed 26.6 fixed-point number
#[derive(Debug,Copy,Clone,Default,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct Int26_6(pub i32);

impl Int26_6 {
    /// Zero value
    pub const ZERO: Int26_6 = Int26_6(0);

    /// Create from a whole pixel value
    #[inline]
    pub fn from_int(px: i32) -> Self {
        Int26_6(px << FIXED_SHIFT)
    }
    /// Greatest whole pixel less than or equal to self
    #[inline]
    pub fn floor(self) -> i32 {
        self.0 >> FIXED_SHIFT
    }
    /// Nearest whole pixel, ties rounded up
    #[inline]
    pub fn round(self) -> i32 {
        self.0.wrapping_add(FIXED_ONE / 2) >> FIXED_SHIFT
    }
    /// Least whole pixel greater than or equal to self
    #[inline]
    pub fn ceil(self) -> i32 {
        self.0.wrapping_add(FIXED_MASK) >> FIXED_SHIFT
    }
    /// Fractional part, always in `0..64`
    #[inline]
    pub fn frac(self) -> i32 {
        self.0 & FIXED_MASK
    }
    /// Raw value widened for intermediate arithmetic
    #[inline]
    pub fn wide(self) -> i64 {
        i64::from(self.0)
    }
}

impl From<i32> for Int26_6 {
    fn from(px: i32) -> Self {
        Int26_6::from_int(px)
    }
}

/// Formats as `integer:fraction`, e.g. `2:16` for 2 + 16/64 pixels
impl fmt::Display for Int26_6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let x = i64::from(self.0).abs();
        write!(f, "{}{}:{:02}", sign, x >> FIXED_SHIFT, x & i64::from(FIXED_MASK))
    }
}

impl Add for Int26_6 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self { Int26_6(self.0 + other.0) }
}
impl Sub for Int26_6 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self { Int26_6(self.0 - other.0) }
}
impl Neg for Int26_6 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self { Int26_6(-self.0) }
}
impl Mul<i32> for Int26_6 {
    type Output = Self;
    #[inline]
    fn mul(self, k: i32) -> Self { Int26_6(self.0 * k) }
}
impl Div<i32> for Int26_6 {
    type Output = Self;
    #[inline]
    fn div(self, k: i32) -> Self { Int26_6(self.0 / k) }
}

/// Fixed-point coordinate pair
#[derive(Debug,Copy,Clone,Default,PartialEq,Eq,Hash)]
pub struct Point26_6 {
    pub x: Int26_6,
    pub y: Int26_6,
}

impl Point26_6 {
    /// Create a point from raw 26.6 values
    #[inline]
    pub fn new(x: Int26_6, y: Int26_6) -> Self {
        Point26_6 { x, y }
    }
    /// Create a point from whole pixel values
    #[inline]
    pub fn from_pixels(x: i32, y: i32) -> Self {
        Point26_6 { x: Int26_6::from_int(x), y: Int26_6::from_int(y) }
    }
}

impl fmt::Display for Point26_6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point26_6 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Point26_6 { x: self.x + other.x, y: self.y + other.y }
    }
}
impl Sub for Point26_6 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Point26_6 { x: self.x - other.x, y: self.y - other.y }
    }
}
impl Neg for Point26_6 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Point26_6 { x: -self.x, y: -self.y }
    }
}
impl Mul<i32> for Point26_6 {
    type Output = Self;
    #[inline]
    fn mul(self, k: i32) -> Self {
        Point26_6 { x: self.x * k, y: self.y * k }
    }
}
impl Div<i32> for Point26_6 {
    type Output = Self;
    #[inline]
    fn div(self, k: i32) -> Self {
        Point26_6 { x: self.x / k, y: self.y / k }
    }
}

/// Whole pixel value as 26.6
#[inline]
pub fn i26_6(px: i32) -> Int26_6 {
    Int26_6::from_int(px)
}

/// Whole pixel point as 26.6
#[inline]
pub fn p26_6(x: i32, y: i32) -> Point26_6 {
    Point26_6::from_pixels(x, y)
}
