use std::io::Cursor;

use image::{Rgba, RgbaImage};

use super::*;

fn encode(img: RgbaImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    let dynamic = image::DynamicImage::ImageRgba8(img);
    let dynamic = if format == image::ImageFormat::Jpeg {
        image::DynamicImage::ImageRgb8(dynamic.to_rgb8())
    } else {
        dynamic
    };
    dynamic.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

fn solid_png(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    encode(RgbaImage::from_pixel(w, h, Rgba(px)), image::ImageFormat::Png)
}

#[test]
fn crop_resize_same_size_is_a_borrowed_no_op() {
    let buf = solid_png(80, 80, [255, 0, 0, 255]);
    let out = crop_resize(&buf, 80, 80).unwrap();
    assert!(matches!(out, Cow::Borrowed(_)));
    assert_eq!(out.as_ref(), buf.as_slice());
}

#[test]
fn crop_resize_hits_exact_size() {
    let buf = solid_png(300, 100, [0, 128, 0, 255]);
    let out = crop_resize(&buf, 120, 63).unwrap();
    let img = decode::decode_image(&out).unwrap();
    assert_eq!(img.dimensions(), (120, 63));
    let px = img.get_pixel(60, 30).0;
    assert!(px[1].abs_diff(128) <= 2 && px[0] <= 2 && px[2] <= 2, "{px:?}");
}

#[test]
fn crop_resize_is_idempotent() {
    let src = RgbaImage::from_fn(97, 41, |x, y| Rgba([(x * 3) as u8, (y * 5) as u8, 40, 255]));
    let buf = encode(src, image::ImageFormat::Jpeg);

    let once = crop_resize(&buf, 50, 50).unwrap().into_owned();
    let twice = crop_resize(&once, 50, 50).unwrap();
    assert_eq!(twice.as_ref(), once.as_slice());
}

#[test]
fn crop_resize_upscales_small_sources() {
    let buf = solid_png(10, 20, [0, 0, 255, 255]);
    let out = crop_resize(&buf, 64, 32).unwrap();
    assert_eq!(decode::image_dimensions(&out).unwrap(), (64, 32));
}

#[test]
fn crop_resize_keeps_the_busy_side() {
    // 200x50, right quarter is a high-contrast checkerboard.
    let src = RgbaImage::from_fn(200, 50, |x, y| {
        if x >= 150 {
            let v = if (x / 2 + y / 2) % 2 == 0 { 0 } else { 255 };
            Rgba([v, v, v, 255])
        } else {
            Rgba([128, 128, 128, 255])
        }
    });
    let buf = encode(src, image::ImageFormat::Png);
    let out = crop_resize(&buf, 50, 50).unwrap();
    let img = decode::decode_image(&out).unwrap();

    let contrast = img
        .pixels()
        .filter(|p| p.0[0] < 40 || p.0[0] > 215)
        .count();
    assert!(contrast > 1000, "expected the checkerboard, got {contrast} contrasty px");
}

#[test]
fn crop_resize_rejects_garbage_as_decode_error() {
    let err = crop_resize(b"nope", 10, 10).unwrap_err();
    assert!(matches!(err, TransformError::Decode(_)));
}

#[test]
fn crop_resize_rejects_zero_target() {
    let buf = solid_png(4, 4, [0, 0, 0, 255]);
    assert!(matches!(
        crop_resize(&buf, 0, 4),
        Err(TransformError::Invalid(_))
    ));
}

#[test]
fn scale_to_height_same_height_is_a_borrowed_no_op() {
    let buf = solid_png(200, 40, [0, 0, 255, 255]);
    let out = scale_to_height(&buf, 40).unwrap();
    assert!(matches!(out, Cow::Borrowed(_)));
}

#[test]
fn scale_to_height_preserves_aspect_ratio() {
    for ((w, h), target) in [((200, 40), 20), ((200, 40), 97), ((37, 91), 40), ((640, 480), 31)] {
        let buf = solid_png(w, h, [10, 20, 30, 255]);
        let out = scale_to_height(&buf, target).unwrap();
        let (ow, oh) = decode::image_dimensions(&out).unwrap();
        assert_eq!(oh, target);

        let expected = f64::from(w) * f64::from(target) / f64::from(h);
        assert!(
            (f64::from(ow) - expected).abs() <= 0.5 + f64::EPSILON,
            "{w}x{h} -> h={target}: got width {ow}, expected ~{expected}"
        );
    }
}

#[test]
fn scale_to_height_rasterizes_svg_at_target() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="20">
        <rect width="100" height="20" fill="blue"/>
    </svg>"#;
    let out = scale_to_height(svg, 40).unwrap();
    let img = decode::decode_image(&out).unwrap();
    assert_eq!(img.dimensions(), (200, 40));
    assert_eq!(img.get_pixel(100, 20).0, [0, 0, 255, 255]);
}

#[test]
fn scale_to_height_rejects_zero() {
    let buf = solid_png(4, 4, [0, 0, 0, 255]);
    assert!(matches!(
        scale_to_height(&buf, 0),
        Err(TransformError::Invalid(_))
    ));
}

#[test]
fn cover_size_covers_target() {
    assert_eq!(cover_size((300, 100), (120, 63)), (189, 63));
    assert_eq!(cover_size((100, 300), (50, 50)), (50, 150));
    assert_eq!(cover_size((10, 20), (64, 32)), (64, 128));
    assert_eq!(cover_size((1200, 630), (1200, 630)), (1200, 630));
}
