//! Attention-based crop window selection.
//!
//! Each pixel gets an interest score from three cues: luma edges, color
//! saturation and skin tones, weighted by alpha. The crop window with the
//! largest total score wins. Only one axis is ever free after a cover resize,
//! so the search reduces to a 1-D sliding window over per-column (or per-row)
//! sums.

use image::RgbaImage;

const EDGE_WEIGHT: u32 = 2;
const SATURATION_WEIGHT: u32 = 1;
const SKIN_BONUS: u32 = 160;

/// Top-left offset of the `w`×`h` window of `img` with the most interest.
///
/// `img` must be at least `w`×`h`. Equal scores resolve to the window closest
/// to the center, so featureless images are center-cropped.
pub fn attention_offset(img: &RgbaImage, w: u32, h: u32) -> (u32, u32) {
    let (iw, ih) = img.dimensions();
    let slack_x = iw.saturating_sub(w);
    let slack_y = ih.saturating_sub(h);

    match (slack_x > 0, slack_y > 0) {
        (false, false) => (0, 0),
        (true, false) => (best_window(&column_profile(img), w as usize), 0),
        (false, true) => (0, best_window(&row_profile(img), h as usize)),
        // A cover resize never leaves both axes free; search them one after
        // the other if a caller hands us such an image anyway.
        (true, true) => (
            best_window(&column_profile(img), w as usize),
            best_window(&row_profile(img), h as usize),
        ),
    }
}

fn column_profile(img: &RgbaImage) -> Vec<u64> {
    let (iw, ih) = img.dimensions();
    let mut profile = vec![0u64; iw as usize];
    for y in 0..ih {
        for x in 0..iw {
            profile[x as usize] += u64::from(interest(img, x, y));
        }
    }
    profile
}

fn row_profile(img: &RgbaImage) -> Vec<u64> {
    let (iw, ih) = img.dimensions();
    let mut profile = vec![0u64; ih as usize];
    for y in 0..ih {
        for x in 0..iw {
            profile[y as usize] += u64::from(interest(img, x, y));
        }
    }
    profile
}

/// Offset of the length-`window` slice of `profile` with the largest sum.
fn best_window(profile: &[u64], window: usize) -> u32 {
    if window == 0 || window >= profile.len() {
        return 0;
    }

    let slack = profile.len() - window;
    let center2 = slack; // twice the centered offset, kept integral

    let mut sum: u64 = profile[..window].iter().sum();
    let mut best = (sum, 0usize);
    for offset in 1..=slack {
        sum = sum - profile[offset - 1] + profile[offset + window - 1];
        let closer = (2 * offset).abs_diff(center2) < (2 * best.1).abs_diff(center2);
        if sum > best.0 || (sum == best.0 && closer) {
            best = (sum, offset);
        }
    }
    best.1 as u32
}

fn luma(px: &image::Rgba<u8>) -> i32 {
    let [r, g, b, _] = px.0;
    (299 * i32::from(r) + 587 * i32::from(g) + 114 * i32::from(b)) / 1000
}

fn interest(img: &RgbaImage, x: u32, y: u32) -> u32 {
    let (iw, ih) = img.dimensions();
    let px = img.get_pixel(x, y);
    let a = u32::from(px.0[3]);
    if a == 0 {
        return 0;
    }

    let l = luma(px);
    let right = img.get_pixel((x + 1).min(iw - 1), y);
    let down = img.get_pixel(x, (y + 1).min(ih - 1));
    let edge = (l - luma(right)).unsigned_abs() + (l - luma(down)).unsigned_abs();

    let [r, g, b, _] = px.0;
    let saturation = u32::from(r.max(g).max(b) - r.min(g).min(b));

    let skin = if is_skin(r, g, b) { SKIN_BONUS } else { 0 };

    (EDGE_WEIGHT * edge + SATURATION_WEIGHT * saturation + skin) * a / 255
}

fn is_skin(r: u8, g: u8, b: u8) -> bool {
    r > 95 && g > 40 && b > 20 && r > g && r > b && r.abs_diff(g) > 15
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/attention.rs"]
mod tests;
