use super::*;
use crate::assets::fonts::{DirFontSource, FontFiles};

fn px(img: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
    img.get_pixel(x, y).0
}

#[test]
fn new_rejects_zero_and_oversized_surfaces() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());

    let canvas = Canvas::new(12, 7).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (12, 7));
}

#[test]
fn untouched_canvas_is_transparent() {
    let img = Canvas::new(4, 4).unwrap().into_image().unwrap();
    assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 0]));
}

#[test]
fn later_fills_paint_over_earlier_ones() {
    let mut canvas = Canvas::new(20, 20).unwrap();
    canvas.fill_rect(kurbo::Rect::new(0.0, 0.0, 20.0, 20.0), Rgba8::rgba(255, 0, 0, 255));
    canvas.fill_rect(kurbo::Rect::new(10.0, 0.0, 20.0, 20.0), Rgba8::rgba(0, 0, 255, 255));
    let img = canvas.into_image().unwrap();

    assert_eq!(px(&img, 2, 10), [255, 0, 0, 255]);
    assert_eq!(px(&img, 17, 10), [0, 0, 255, 255]);
}

#[test]
fn translucent_black_darkens_the_fill_below() {
    let mut canvas = Canvas::new(8, 8).unwrap();
    canvas.fill_rect(kurbo::Rect::new(0.0, 0.0, 8.0, 8.0), Rgba8::WHITE);
    canvas.fill_rect(kurbo::Rect::new(0.0, 0.0, 8.0, 8.0), Rgba8::BLACK.with_alpha(128));
    let [r, g, b, a] = px(&canvas.into_image().unwrap(), 4, 4);

    assert_eq!(a, 255);
    assert_eq!((r, g), (g, b));
    assert!((120..=135).contains(&r), "{r}");
}

#[test]
fn circle_covers_its_center_but_not_the_corners() {
    let mut canvas = Canvas::new(40, 40).unwrap();
    canvas.fill_circle(kurbo::Point::new(20.0, 20.0), 10.0, Rgba8::WHITE);
    let img = canvas.into_image().unwrap();

    assert_eq!(px(&img, 20, 20), [255, 255, 255, 255]);
    assert_eq!(px(&img, 13, 20), [255, 255, 255, 255]);
    assert_eq!(px(&img, 1, 1)[3], 0);
    assert_eq!(px(&img, 38, 38)[3], 0);
}

#[test]
fn images_land_at_whole_pixel_offsets() {
    let sprite = RgbaImage::from_pixel(3, 2, image::Rgba([0, 200, 0, 255]));
    let mut canvas = Canvas::new(10, 10).unwrap();
    canvas.draw_image(&sprite, kurbo::Point::new(4.0, 5.0)).unwrap();
    let img = canvas.into_image().unwrap();

    assert_eq!(px(&img, 4, 5), [0, 200, 0, 255]);
    assert_eq!(px(&img, 6, 6), [0, 200, 0, 255]);
    assert_eq!(px(&img, 3, 5)[3], 0);
    assert_eq!(px(&img, 7, 5)[3], 0);
    assert_eq!(px(&img, 4, 7)[3], 0);
}

#[test]
fn anchored_images_center_on_the_anchor() {
    let sprite = RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));
    let mut canvas = Canvas::new(10, 10).unwrap();
    canvas
        .draw_image_anchored(&sprite, kurbo::Point::new(5.0, 5.0), 0.5, 0.5)
        .unwrap();
    let img = canvas.into_image().unwrap();

    assert_eq!(px(&img, 3, 3), [10, 20, 30, 255]);
    assert_eq!(px(&img, 6, 6), [10, 20, 30, 255]);
    assert_eq!(px(&img, 2, 2)[3], 0);
    assert_eq!(px(&img, 7, 7)[3], 0);
}

#[test]
fn transparent_image_pixels_keep_the_backdrop() {
    let mut sprite = RgbaImage::from_pixel(2, 1, image::Rgba([255, 0, 0, 255]));
    sprite.put_pixel(1, 0, image::Rgba([255, 0, 0, 0]));

    let mut canvas = Canvas::new(2, 1).unwrap();
    canvas.fill_rect(kurbo::Rect::new(0.0, 0.0, 2.0, 1.0), Rgba8::rgba(0, 0, 255, 255));
    canvas.draw_image(&sprite, kurbo::Point::ZERO).unwrap();
    let img = canvas.into_image().unwrap();

    assert_eq!(px(&img, 0, 0), [255, 0, 0, 255]);
    assert_eq!(px(&img, 1, 0), [0, 0, 255, 255]);
}

fn fixture_fonts() -> DirFontSource {
    DirFontSource::with_files(
        "tests/data/fonts",
        FontFiles {
            text: "DejaVuSansMono.ttf".to_owned(),
            symbols: "DejaVuSerif.ttf".to_owned(),
            emoji: "DejaVuSans.ttf".to_owned(),
        },
    )
}

#[test]
fn text_paints_inside_its_layout_box() {
    let mut face = CompositeFace::load(&fixture_fonts(), 32.0).unwrap();
    let layout = face.layout("HHHH", Rgba8::WHITE, None, 1.0);

    let mut canvas = Canvas::new(200, 80).unwrap();
    canvas.fill_rect(kurbo::Rect::new(0.0, 0.0, 200.0, 80.0), Rgba8::BLACK);
    canvas
        .draw_text(&face, &layout, kurbo::Point::new(10.0, 10.0))
        .unwrap();
    let img = canvas.into_image().unwrap();

    let lit = |x0: u32, x1: u32, y0: u32, y1: u32| {
        (y0..y1)
            .flat_map(|y| (x0..x1).map(move |x| (x, y)))
            .filter(|&(x, y)| px(&img, x, y)[0] > 128)
            .count()
    };

    let right = 10 + layout.width().ceil() as u32 + 2;
    let bottom = 10 + layout.height().ceil() as u32 + 2;
    assert!(lit(10, right, 10, bottom) > 50);
    assert_eq!(lit(0, 200, 0, 8), 0);
    assert_eq!(lit(right.min(200), 200, 0, 80), 0);
}

#[test]
fn translucent_text_keeps_an_opaque_backdrop_opaque() {
    let mut face = CompositeFace::load(&fixture_fonts(), 28.0).unwrap();
    let layout = face.layout(
        "Jane Doe \u{2022} Ag@#%&",
        Rgba8::WHITE.with_alpha(204),
        None,
        1.0,
    );

    let mut canvas = Canvas::new(400, 60).unwrap();
    canvas.fill_rect(kurbo::Rect::new(0.0, 0.0, 400.0, 60.0), Rgba8::rgba(0x11, 0x22, 0x33, 255));
    canvas.fill_rect(kurbo::Rect::new(0.0, 0.0, 400.0, 60.0), Rgba8::BLACK.with_alpha(128));
    canvas
        .draw_text(&face, &layout, kurbo::Point::new(5.3, 7.6))
        .unwrap();
    let img = canvas.into_image().unwrap();

    assert!(img.pixels().any(|p| p.0[0] > 160), "text was not drawn");
    assert!(img.pixels().all(|p| p.0[3] == 255));
}
