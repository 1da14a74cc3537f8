//! Colors

/// Single 8-bit coverage or gray channel
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Gray8(pub u8);

impl Gray8 {
    pub fn new(v: u8) -> Self {
        Gray8(v)
    }
}

/// Color as premultiplied Red, Green, Blue, and Alpha
///
/// Color components never exceed alpha.
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba8 {
    /// White Color (255,255,255,255)
    pub fn white() -> Self {
        Self::new(255,255,255,255)
    }
    /// Black Color (0,0,0,255)
    pub fn black() -> Self {
        Self::new(0,0,0,255)
    }
    /// Fully transparent (0,0,0,0)
    pub fn transparent() -> Self {
        Self::new(0,0,0,0)
    }
    /// Create new color from premultiplied components
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }
    /// Create new color from non-premultiplied components
    ///
    ///     use smooth_raster::Rgba8;
    ///
    ///     assert_eq!(Rgba8::premultiply(255, 128, 0, 128), Rgba8::new(128, 64, 0, 128));
    ///     assert_eq!(Rgba8::premultiply(10, 20, 30, 255), Rgba8::new(10, 20, 30, 255));
    pub fn premultiply(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8::new(multiply_u8(r, a), multiply_u8(g, a), multiply_u8(b, a), a)
    }
    /// Components widened to 16 bits, `v * 0x101`
    pub fn to_rgba16(self) -> [u32; 4] {
        [u32::from(self.r) * 0x101,
         u32::from(self.g) * 0x101,
         u32::from(self.b) * 0x101,
         u32::from(self.a) * 0x101]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(c: [u8; 4]) -> Rgba8 {
        Rgba8::new(c[0], c[1], c[2], c[3])
    }
}
impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> [u8; 4] {
        [c.r, c.g, c.b, c.a]
    }
}

// See agg_color_rgba.h:395
// Rounded a * b / 255
pub fn multiply_u8(a: u8, b: u8) -> u8 {
    let base_shift = 8;
    let base_msb = 1 << (base_shift - 1);
    let (a,b) = (u32::from(a), u32::from(b));
    let t : u32  = a * b + base_msb;
    let tt : u32 = ((t >> base_shift) + t) >> base_shift;
    tt as u8
}
