use image::RgbaImage;

/// Cut the largest centered circle out of `src`.
///
/// Radius is `min(w, h) / 2` and the center is `(w / 2, h / 2)`, both in whole
/// pixels. A pixel is kept when its center lies within the radius; everything
/// else becomes fully transparent. The output has the same bounds as `src`.
#[tracing::instrument(level = "debug", skip(src), fields(width = src.width(), height = src.height()))]
pub fn circular_mask(src: &RgbaImage) -> RgbaImage {
    tracing::debug!("circling an image");

    let (w, h) = src.dimensions();
    let r = f64::from(w.min(h) / 2);
    let cx = f64::from(w / 2);
    let cy = f64::from(h / 2);

    let mut out = RgbaImage::new(w, h);
    for (x, y, px) in src.enumerate_pixels() {
        let dx = f64::from(x) + 0.5 - cx;
        let dy = f64::from(y) + 0.5 - cy;
        if dx * dx + dy * dy <= r * r {
            out.put_pixel(x, y, *px);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/mask.rs"]
mod tests;
