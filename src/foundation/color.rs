/// Straight (non-premultiplied) RGBA8 color.
///
/// Also used as the Parley brush for text runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Rgba8 = Rgba8::rgba(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Rgba8 = Rgba8::rgba(0, 0, 0, 255);

    /// Build a color from its four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#RGB` or `#RRGGBB` (case-insensitive). Anything else, including
    /// surrounding whitespace or an alpha component, is rejected.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        fn nibble(b: u8) -> u8 {
            match b {
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                _ => b - b'A' + 10,
            }
        }

        let b = hex.as_bytes();
        match b.len() {
            3 => {
                let expand = |c: u8| nibble(c) * 17;
                Some(Self::rgba(expand(b[0]), expand(b[1]), expand(b[2]), 255))
            }
            6 => {
                let byte = |i: usize| (nibble(b[i]) << 4) | nibble(b[i + 1]);
                Some(Self::rgba(byte(0), byte(2), byte(4), 255))
            }
            _ => None,
        }
    }
}

/// Alpha for a `0.0..=1.0` opacity fraction, clamped.
pub fn opacity_to_alpha(opacity: f64) -> u8 {
    if !opacity.is_finite() {
        return 0;
    }
    (opacity.clamp(0.0, 1.0) * 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
