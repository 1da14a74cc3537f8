#![allow(dead_code)]

use smooth_raster::*;

/// Pixel value to 26.6, rounded to the nearest 1/64
pub fn fx(v: f64) -> Int26_6 {
    Int26_6((v * 64.0).round() as i32)
}

pub fn pt(x: f64, y: f64) -> Point26_6 {
    Point26_6::new(fx(x), fx(y))
}

/// Closed rectangle, traced down the left side first
pub fn rect<A: Adder>(ras: &mut A, x0: f64, y0: f64, x1: f64, y1: f64) {
    ras.start(pt(x0, y0));
    ras.add1(pt(x0, y1));
    ras.add1(pt(x1, y1));
    ras.add1(pt(x1, y0));
    ras.add1(pt(x0, y0));
}

/// Closed polygon through `pts`
pub fn polygon<A: Adder>(ras: &mut A, pts: &[(f64, f64)]) {
    assert!(pts.len() >= 3);
    ras.start(pt(pts[0].0, pts[0].1));
    for &(x, y) in &pts[1..] {
        ras.add1(pt(x, y));
    }
    ras.add1(pt(pts[0].0, pts[0].1));
}

/// Spans of one rasterize call, with the done flag of every batch
pub fn collect(ras: &mut Rasterizer, width: i32, height: i32) -> (Vec<Span>, Vec<bool>) {
    let mut spans = vec![];
    let mut dones = vec![];
    {
        let mut sink = PainterFunc::new(|s: &mut [Span], done| {
            spans.extend_from_slice(s);
            dones.push(done);
        });
        ras.rasterize(&mut sink, width, height);
    }
    (spans, dones)
}

/// Total coverage in pixels
pub fn coverage(spans: &[Span]) -> f64 {
    spans.iter()
        .map(|s| f64::from(s.alpha) / 65535.0 * f64::from(s.len()))
        .sum()
}

/// Alpha of pixel (x,y) or 0 if no span covers it
pub fn alpha_at(spans: &[Span], x: i32, y: i32) -> u32 {
    spans.iter()
        .find(|s| s.y == y && s.x0 <= x && x < s.x1)
        .map(|s| s.alpha)
        .unwrap_or(0)
}
