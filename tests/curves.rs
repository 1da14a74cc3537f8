mod util;

use smooth_raster::*;
use util::pt;

/// Circle of radius `r` around (`cx`,`cy`) from four cubic arcs
fn circle<A: Adder>(a: &mut A, cx: f64, cy: f64, r: f64) {
    let k = 0.552_284_749_8 * r;
    a.start(pt(cx + r, cy));
    a.add3(pt(cx + r, cy + k), pt(cx + k, cy + r), pt(cx, cy + r));
    a.add3(pt(cx - k, cy + r), pt(cx - r, cy + k), pt(cx - r, cy));
    a.add3(pt(cx - r, cy - k), pt(cx - k, cy - r), pt(cx, cy - r));
    a.add3(pt(cx + k, cy - r), pt(cx + r, cy - k), pt(cx + r, cy));
}

#[test]
fn cubic_circle_area() {
    let mut ras = Rasterizer::new(100, 100);
    circle(&mut ras, 50.0, 50.0, 40.0);
    let (spans, _) = util::collect(&mut ras, 100, 100);
    let want = std::f64::consts::PI * 40.0 * 40.0;
    let got = util::coverage(&spans);
    assert!((got - want).abs() / want < 0.005, "coverage {} area {}", got, want);
    assert_eq!(util::alpha_at(&spans, 50, 50), 0xFFFF);
    assert_eq!(util::alpha_at(&spans, 50, 5), 0);
    assert_eq!(util::alpha_at(&spans, 15, 15), 0);
}

#[test]
fn quadratic_segment_area() {
    // Parabolic segment: two thirds of base times apex height
    let mut ras = Rasterizer::new(100, 100);
    ras.start(pt(10.0, 50.0));
    ras.add2(pt(50.0, 10.0), pt(90.0, 50.0));
    ras.add1(pt(10.0, 50.0));
    let (spans, _) = util::collect(&mut ras, 100, 100);
    let want = 2.0 / 3.0 * 80.0 * 20.0;
    let got = util::coverage(&spans);
    assert!((got - want).abs() / want < 0.01, "coverage {} area {}", got, want);
    for s in &spans {
        assert!(s.y >= 29 && s.y < 50, "{:?}", s);
    }
}

#[test]
fn path_replay_matches_direct() {
    let mut path = Path::new();
    circle(&mut path, 30.0, 30.0, 17.5);
    path.start(pt(5.0, 5.0));
    path.add2(pt(30.0, -5.0), pt(55.0, 5.0));
    path.add1(pt(5.0, 5.0));
    assert_eq!(path.len(), 8);

    let mut a = Rasterizer::new(60, 60);
    a.add_path(&path);
    let (sa, _) = util::collect(&mut a, 60, 60);

    let mut b = Rasterizer::new(60, 60);
    circle(&mut b, 30.0, 30.0, 17.5);
    b.start(pt(5.0, 5.0));
    b.add2(pt(30.0, -5.0), pt(55.0, 5.0));
    b.add1(pt(5.0, 5.0));
    let (sb, _) = util::collect(&mut b, 60, 60);
    assert_eq!(sa, sb);
}

#[test]
fn degenerate_curves_terminate() {
    let mut ras = Rasterizer::new(32, 32);
    let p = pt(10.0, 10.0);
    // Coincident control points
    ras.start(p);
    ras.add2(p, p);
    ras.add3(p, p, p);
    // Collinear control points
    ras.add2(pt(20.0, 10.0), pt(30.0, 10.0));
    ras.add3(pt(25.0, 10.0), pt(15.0, 10.0), p);
    let (spans, dones) = util::collect(&mut ras, 32, 32);
    assert!(spans.is_empty(), "{:?}", spans);
    assert_eq!(dones, vec![true]);
}

#[test]
fn collinear_curve_is_a_line() {
    let mut a = Rasterizer::new(32, 32);
    a.start(pt(2.0, 2.0));
    a.add3(pt(2.0, 12.0), pt(2.0, 20.0), pt(2.0, 30.0));
    a.add2(pt(16.0, 30.0), pt(30.0, 30.0));
    a.add1(pt(2.0, 2.0));
    let (sa, _) = util::collect(&mut a, 32, 32);
    assert!((util::coverage(&sa) - 392.0).abs() < 0.5);
}

#[test]
fn huge_control_points_terminate() {
    let mut ras = Rasterizer::new(64, 64);
    ras.start(pt(8.0, 8.0));
    ras.add2(pt(-20_000.0, 30_000.0), pt(56.0, 8.0));
    ras.add3(pt(25_000.0, -25_000.0), pt(-25_000.0, 25_000.0), pt(56.0, 56.0));
    ras.add1(pt(8.0, 8.0));
    let (spans, dones) = util::collect(&mut ras, 64, 64);
    assert_eq!(dones.last(), Some(&true));
    for s in &spans {
        assert!(s.x0 >= 0 && s.x1 <= 64 && s.y >= 0 && s.y < 64, "{:?}", s);
        assert!(s.alpha <= ALPHA_OPAQUE);
    }
}

#[test]
fn tiny_canvas_curves() {
    // The smallest split scale
    let mut ras = Rasterizer::new(16, 16);
    circle(&mut ras, 8.0, 8.0, 6.0);
    let (spans, _) = util::collect(&mut ras, 16, 16);
    let want = std::f64::consts::PI * 36.0;
    assert!((util::coverage(&spans) - want).abs() / want < 0.02);
}
