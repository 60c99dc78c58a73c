use super::*;

fn card() -> RgbaImage {
    RgbaImage::from_fn(64, 32, |x, _| {
        if x < 32 {
            image::Rgba([200, 30, 30, 255])
        } else {
            image::Rgba([30, 30, 200, 255])
        }
    })
}

#[test]
fn parses_names_and_extensions() {
    assert_eq!("jpeg".parse::<OutputFormat>(), Ok(OutputFormat::Jpeg));
    assert_eq!("JPG".parse::<OutputFormat>(), Ok(OutputFormat::Jpeg));
    assert_eq!("png".parse::<OutputFormat>(), Ok(OutputFormat::Png));
    assert!("webp".parse::<OutputFormat>().is_err());

    assert_eq!(
        OutputFormat::from_path(Path::new("out/card.PNG")),
        Some(OutputFormat::Png)
    );
    assert_eq!(
        OutputFormat::from_path(Path::new("card.jpeg")),
        Some(OutputFormat::Jpeg)
    );
    assert_eq!(OutputFormat::from_path(Path::new("card")), None);
}

#[test]
fn png_is_lossless() {
    let img = card();
    let bytes = encode(&img, OutputFormat::Png, 0).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
    assert_eq!(image::load_from_memory(&bytes).unwrap().to_rgba8(), img);
}

#[test]
fn jpeg_honours_quality() {
    let img = card();
    let high = encode(&img, OutputFormat::Jpeg, 100).unwrap();
    let low = encode(&img, OutputFormat::Jpeg, 0).unwrap();

    assert_eq!(image::guess_format(&high).unwrap(), image::ImageFormat::Jpeg);
    assert!(low.len() < high.len());

    let decoded = image::load_from_memory(&high).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (64, 32));
    let [r, _, b] = decoded.get_pixel(8, 16).0;
    assert!(r > 150 && b < 80, "{r} {b}");
}
