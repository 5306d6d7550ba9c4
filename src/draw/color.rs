//! RGBA color type, hex parsing, and predefined color constants.

use thiserror::Error;

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use inkboard::draw::Color;
/// let olive = Color::from_hex("#6C7D47").unwrap();
/// assert_eq!(olive.to_hex(), "#6C7D47");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

/// Error returned when a color control yields a value that is not `#RGB` or `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{0}': expected #RGB or #RRGGBB")]
pub struct ParseColorError(pub String);

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Parses the value produced by an HTML-style color picker.
    ///
    /// Accepts `#RRGGBB` and the short `#RGB` form (leading `#` optional,
    /// case-insensitive). The result is always fully opaque.
    pub fn from_hex(value: &str) -> Result<Self, ParseColorError> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let err = || ParseColorError(value.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        match digits.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
                let (r, g, b) = (channel(0), channel(2), channel(4));
                match (r, g, b) {
                    (Ok(r), Ok(g), Ok(b)) => Ok(Self::from_rgb8(r, g, b)),
                    _ => Err(err()),
                }
            }
            3 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|v| v * 17);
                let (r, g, b) = (channel(0), channel(1), channel(2));
                match (r, g, b) {
                    (Ok(r), Ok(g), Ok(b)) => Ok(Self::from_rgb8(r, g, b)),
                    _ => Err(err()),
                }
            }
            _ => Err(err()),
        }
    }

    /// Formats the RGB channels as `#RRGGBB` (alpha is dropped).
    pub fn to_hex(&self) -> String {
        let to_u8 = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }
}

/// Default pen color of a fresh whiteboard session (#6C7D47).
pub const OLIVE: Color = Color {
    r: 108.0 / 255.0,
    g: 125.0 / 255.0,
    b: 71.0 / 255.0,
    a: 1.0,
};

/// Predefined white color (R=1.0, G=1.0, B=1.0)
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined black color (R=0.0, G=0.0, B=0.0)
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};
