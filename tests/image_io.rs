mod util;

use smooth_raster::*;

#[test]
fn gray_png_round_trip() {
    let mut ras = Rasterizer::new(40, 30);
    util::polygon(&mut ras, &[(4.5, 3.0), (36.0, 9.25), (12.0, 27.5)]);
    let mut pix = Pixfmt::<Gray8>::new(40, 30);
    ras.rasterize(&mut AlphaOverPainter::new(&mut pix), 40, 30);

    let path = std::env::temp_dir().join(format!("smooth-raster-gray-{}.png", std::process::id()));
    pix.to_file(&path).unwrap();
    let img = image::open(&path).unwrap().to_luma8();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(img.dimensions(), (40, 30));
    assert_eq!(img.as_raw().as_slice(), pix.pixeldata());
}

#[test]
fn rgba_png_round_trip_with_stride() {
    let mut pix = Pixfmt::<Rgba8>::from_raw(3, 2, 16, vec![0; 28]).unwrap();
    pix.set((2, 1), Rgba8::new(1, 2, 3, 4));
    let img = pix.to_image().unwrap();
    assert_eq!(img.as_raw().len(), 24);
    assert_eq!(img.get_pixel(2, 1).0, [1, 2, 3, 4]);
    let back = Pixfmt::<Rgba8>::from_image(&img);
    assert_eq!(back.get((2, 1)), Rgba8::new(1, 2, 3, 4));
}

#[test]
fn raw_buffer_errors() {
    match Pixfmt::<Rgba8>::from_raw(4, 2, 8, vec![0; 64]) {
        Err(Error::InvalidStride { stride: 8, row: 16 }) => {}
        other => panic!("unexpected {:?}", other.map(|p| p.stride())),
    }
    match Pixfmt::<Gray8>::from_raw(4, 3, 5, vec![0; 13]) {
        Err(Error::BufferTooSmall { len: 13, required: 14 }) => {}
        other => panic!("unexpected {:?}", other.map(|p| p.stride())),
    }
    let e = Pixfmt::<Gray8>::from_raw(4, 3, 5, vec![0; 1]).unwrap_err();
    assert_eq!(e.to_string(), "buffer of 1 bytes is too small, 14 bytes required");
}

#[test]
fn bad_extension_is_an_error() {
    let pix = Pixfmt::<Gray8>::new(2, 2);
    let path = std::env::temp_dir().join("smooth-raster.not-an-image-format");
    match pix.to_file(&path) {
        Err(Error::Image(_)) => {}
        other => panic!("unexpected {:?}", other),
    }
}
