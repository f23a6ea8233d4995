//! Color types for tag markup.
//!
//! Supports the named palette and hex formats.

use crate::error::ColorParseError;

/// The named color palette, with grey/gray aliases.
static PALETTE: phf::Map<&'static str, [u8; 3]> = phf::phf_map! {
    "black" => [0, 0, 0],
    "dark_blue" => [0, 0, 170],
    "dark_green" => [0, 170, 0],
    "dark_aqua" => [0, 170, 170],
    "dark_red" => [170, 0, 0],
    "dark_purple" => [170, 0, 170],
    "gold" => [255, 170, 0],
    "gray" => [170, 170, 170],
    "grey" => [170, 170, 170],
    "dark_gray" => [85, 85, 85],
    "dark_grey" => [85, 85, 85],
    "blue" => [85, 85, 255],
    "green" => [85, 255, 85],
    "aqua" => [85, 255, 255],
    "red" => [255, 85, 85],
    "light_purple" => [255, 85, 255],
    "yellow" => [255, 255, 85],
    "white" => [255, 255, 255],
};

/// A color specification in tag markup.
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    /// Named palette color (e.g., "red", "dark_aqua").
    Named(String),
    /// RGB color components.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color from a string.
    ///
    /// Supports:
    /// - Palette names: `red`, `dark_aqua`, etc.
    /// - Hex colors: `#RGB`, `#RRGGBB`
    ///
    /// # Examples
    ///
    /// ```
    /// use minitag::Color;
    ///
    /// let red = Color::parse("red").unwrap();
    /// let hex = Color::parse("#ff5733").unwrap();
    /// ```
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ColorParseError::UnknownName(input.to_string()));
        }

        if let Some(hex) = input.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        Self::parse_named(input)
    }

    /// Check if a name is part of the color palette.
    pub fn is_named(name: &str) -> bool {
        PALETTE.contains_key(name.to_lowercase().as_str())
    }

    /// Parse a hex color (without the # prefix).
    fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        match hex.len() {
            // #RGB
            3 => {
                let mut digits = hex.chars();
                let r = Self::parse_hex_digit(hex, digits.next())?;
                let g = Self::parse_hex_digit(hex, digits.next())?;
                let b = Self::parse_hex_digit(hex, digits.next())?;
                Ok(Color::Rgb(r * 17, g * 17, b * 17))
            }
            // #RRGGBB
            6 => {
                let mut digits = hex.chars();
                let r = Self::parse_hex_pair(hex, digits.next(), digits.next())?;
                let g = Self::parse_hex_pair(hex, digits.next(), digits.next())?;
                let b = Self::parse_hex_pair(hex, digits.next(), digits.next())?;
                Ok(Color::Rgb(r, g, b))
            }
            _ => Err(ColorParseError::InvalidHex(format!("#{}", hex))),
        }
    }

    fn parse_hex_digit(hex: &str, c: Option<char>) -> Result<u8, ColorParseError> {
        match c {
            Some(c @ '0'..='9') => Ok(c as u8 - b'0'),
            Some(c @ 'a'..='f') => Ok(c as u8 - b'a' + 10),
            Some(c @ 'A'..='F') => Ok(c as u8 - b'A' + 10),
            _ => Err(ColorParseError::InvalidHex(format!("#{}", hex))),
        }
    }

    fn parse_hex_pair(
        hex: &str,
        c1: Option<char>,
        c2: Option<char>,
    ) -> Result<u8, ColorParseError> {
        let high = Self::parse_hex_digit(hex, c1)?;
        let low = Self::parse_hex_digit(hex, c2)?;
        Ok(high * 16 + low)
    }

    /// Parse a named color.
    fn parse_named(name: &str) -> Result<Self, ColorParseError> {
        let name_lower = name.to_lowercase();

        if PALETTE.contains_key(name_lower.as_str()) {
            Ok(Color::Named(name_lower))
        } else {
            Err(ColorParseError::UnknownName(name.to_string()))
        }
    }

    /// Convert the color to RGB components.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Rgb(r, g, b) => (*r, *g, *b),
            Color::Named(name) => match PALETTE.get(name.as_str()) {
                Some([r, g, b]) => (*r, *g, *b),
                None => (0, 0, 0),
            },
        }
    }

    /// Linear interpolation between two colors at `t` in `[0, 1]`.
    pub fn lerp(from: &Color, to: &Color, t: f32) -> Color {
        let (r1, g1, b1) = from.to_rgb();
        let (r2, g2, b2) = to.to_rgb();
        Color::Rgb(
            lerp_channel(r1, r2, t),
            lerp_channel(g1, g2, t),
            lerp_channel(b1, b2, t),
        )
    }

    /// Build a color from hue/saturation/value, hue in `[0, 1)`.
    pub fn hsv(h: f32, s: f32, v: f32) -> Color {
        let h = h.rem_euclid(1.0) * 6.0;
        let i = h.floor();
        let f = h - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match i as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Color::Rgb(
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
        )
    }
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named_color() {
        assert_eq!(Color::parse("red").unwrap(), Color::Named("red".into()));
        assert_eq!(Color::parse("Blue").unwrap(), Color::Named("blue".into()));
        assert_eq!(
            Color::parse("DARK_AQUA").unwrap(),
            Color::Named("dark_aqua".into())
        );
    }

    #[test]
    fn parse_alias() {
        assert_eq!(Color::parse("grey").unwrap(), Color::Named("grey".into()));
        assert_eq!(Color::Named("grey".into()).to_rgb(), (170, 170, 170));
    }

    #[test]
    fn parse_hex_short() {
        assert_eq!(Color::parse("#f00").unwrap(), Color::Rgb(255, 0, 0));
        assert_eq!(Color::parse("#0f0").unwrap(), Color::Rgb(0, 255, 0));
    }

    #[test]
    fn parse_hex_long() {
        assert_eq!(Color::parse("#ff5733").unwrap(), Color::Rgb(255, 87, 51));
        assert_eq!(Color::parse("#000000").unwrap(), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn parse_invalid() {
        assert!(Color::parse("notacolor").is_err());
        assert!(Color::parse("#gg0000").is_err());
        assert!(Color::parse("#ff00").is_err());
        assert!(Color::parse("").is_err());
    }

    #[test]
    fn is_named() {
        assert!(Color::is_named("red"));
        assert!(Color::is_named("dark_purple"));
        assert!(!Color::is_named("bold"));
        assert!(!Color::is_named("#ff0000"));
    }

    #[test]
    fn to_rgb() {
        assert_eq!(Color::Named("red".into()).to_rgb(), (255, 85, 85));
        assert_eq!(Color::Rgb(10, 20, 30).to_rgb(), (10, 20, 30));
    }

    #[test]
    fn lerp_endpoints() {
        let a = Color::Rgb(0, 0, 0);
        let b = Color::Rgb(255, 255, 255);
        assert_eq!(Color::lerp(&a, &b, 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(Color::lerp(&a, &b, 1.0), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(Color::hsv(0.0, 1.0, 1.0), Color::Rgb(255, 0, 0));
        assert_eq!(Color::hsv(1.0 / 3.0, 1.0, 1.0), Color::Rgb(0, 255, 0));
        assert_eq!(Color::hsv(2.0 / 3.0, 1.0, 1.0), Color::Rgb(0, 0, 255));
    }
}
