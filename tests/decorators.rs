mod util;

use smooth_raster::*;

fn triangle(ras: &mut Rasterizer) {
    util::polygon(ras, &[(3.3, 2.1), (44.7, 9.8), (17.2, 45.5)]);
}

#[test_log::test]
fn monochrome_spans_are_opaque_and_merged() {
    let mut ras = Rasterizer::new(48, 48);
    triangle(&mut ras);
    let mut out = vec![];
    let mut dones = vec![];
    {
        let mut sink = PainterFunc::new(|s: &mut [Span], done| {
            out.extend_from_slice(s);
            dones.push(done);
        });
        ras.rasterize(&mut MonochromePainter::new(&mut sink), 48, 48);
    }
    assert!(!out.is_empty());
    assert_eq!(dones.last(), Some(&true));
    assert_eq!(dones.iter().filter(|&&d| d).count(), 1);
    for s in &out {
        assert_eq!(s.alpha, ALPHA_OPAQUE);
        assert!(!s.is_empty());
    }
    for w in out.windows(2) {
        assert!(!(w[0].y == w[1].y && w[0].x1 == w[1].x0), "unmerged {:?}", w);
    }
    // One run per row for a convex shape
    let mut rows: Vec<i32> = out.iter().map(|s| s.y).collect();
    rows.dedup();
    assert_eq!(rows.len(), out.len());
}

#[test]
fn monochrome_threshold() {
    let mut ras = Rasterizer::new(16, 4);
    // Quarter, half and three quarter coverage
    util::rect(&mut ras, 1.0, 0.0, 2.0, 0.25);
    util::rect(&mut ras, 4.0, 1.0, 5.0, 1.5);
    util::rect(&mut ras, 7.0, 2.0, 8.0, 2.75);
    let mut pix = Pixfmt::<Gray8>::new(16, 4);
    {
        let mut dst = AlphaSrcPainter::new(&mut pix);
        ras.rasterize(&mut MonochromePainter::new(&mut dst), 16, 4);
    }
    assert_eq!(pix.get((1, 0)), 0);
    assert_eq!(pix.get((4, 1)), 255);
    assert_eq!(pix.get((7, 2)), 255);
}

#[test]
fn gamma_one_is_identity() {
    let mut a = Rasterizer::new(48, 48);
    let mut b = Rasterizer::new(48, 48);
    triangle(&mut a);
    triangle(&mut b);
    let (plain, _) = util::collect(&mut a, 48, 48);
    let mut corrected = vec![];
    {
        let mut sink = PainterFunc::new(|s: &mut [Span], _| corrected.extend_from_slice(s));
        let mut gamma = GammaCorrectionPainter::new(&mut sink, 1.0);
        assert_eq!(gamma.gamma(), 1.0);
        b.rasterize(&mut gamma, 48, 48);
    }
    assert_eq!(plain, corrected);
}

#[test]
fn gamma_preserves_geometry() {
    let mut a = Rasterizer::new(48, 48);
    let mut b = Rasterizer::new(48, 48);
    triangle(&mut a);
    triangle(&mut b);
    let (plain, _) = util::collect(&mut a, 48, 48);
    let mut corrected = vec![];
    {
        let mut sink = PainterFunc::new(|s: &mut [Span], _| corrected.extend_from_slice(s));
        b.rasterize(&mut GammaCorrectionPainter::new(&mut sink, 2.2), 48, 48);
    }
    assert_eq!(plain.len(), corrected.len());
    for (p, c) in plain.iter().zip(&corrected) {
        assert_eq!((p.y, p.x0, p.x1), (c.y, c.x0, c.x1));
        assert!(c.alpha <= p.alpha);
        if p.alpha == ALPHA_OPAQUE {
            assert_eq!(c.alpha, ALPHA_OPAQUE);
        }
    }
}

#[test]
fn decorators_stack() {
    let mut ras = Rasterizer::new(48, 48);
    triangle(&mut ras);
    let mut pix = Pixfmt::<Rgba8>::new(48, 48);
    {
        let mut dst = RgbaPainter::with_color(&mut pix, Rgba8::new(0, 0, 255, 255), Op::Src);
        let mut gamma = GammaCorrectionPainter::new(&mut dst, 0.5);
        let mut mono = MonochromePainter::new(&mut gamma);
        ras.rasterize(&mut mono, 48, 48);
    }
    for y in 0 .. 48 {
        for x in 0 .. 48 {
            let p = pix.get((x, y));
            assert!(p == Rgba8::transparent() || p == Rgba8::new(0, 0, 255, 255), "{:?}", p);
        }
    }
    assert_eq!(pix.get((20, 15)), Rgba8::new(0, 0, 255, 255));
}
