#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);
    pub const LIGHT_GRAY: Color = Color(170, 170, 170, 255);

    /// Parses `#RRGGBB` or `#RRGGBBAA`. Malformed channels fall back to 0
    /// (alpha to 255); any other length yields opaque black.
    pub fn from_hex(hex: &str) -> Self {
        let s = hex.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>, fallback: u8| {
            s.get(range)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .unwrap_or(fallback)
        };
        match s.len() {
            6 => Color(channel(0..2, 0), channel(2..4, 0), channel(4..6, 0), 255),
            8 => Color(
                channel(0..2, 0),
                channel(2..4, 0),
                channel(4..6, 0),
                channel(6..8, 255),
            ),
            _ => Color::BLACK,
        }
    }
}

/// Colours used when composing the keyboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Keyboard background.
    pub background: Color,
    pub key: Color,
    pub function_key: Color,
    pub popup: Color,
    pub popup_border: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_hex("#D1D1D6"),
            key: Color::WHITE,
            function_key: Color::LIGHT_GRAY,
            popup: Color::WHITE,
            popup_border: Color::LIGHT_GRAY,
        }
    }
}
