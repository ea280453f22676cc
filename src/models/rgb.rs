//! RGB color handling with hex parsing, serialization and the text contrast rule.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// RGB color value with hex string representation.
///
/// Represents a color using red, green, and blue channels (0-255 each).
/// Serializes as a `#RRGGBB` string so snapshots stay human readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Pure black, used for text on light backgrounds.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white, used for text on dark backgrounds.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB" (case-insensitive).
    /// Three-digit colors expand each digit, so "#abc" is "#AABBCC".
    ///
    /// # Examples
    ///
    /// ```
    /// use lazypanel::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 0, 0));
    ///
    /// let color = RgbColor::from_hex("0f0").unwrap();
    /// assert_eq!(color, RgbColor::new(0, 255, 0));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if !hex.is_ascii() {
            anyhow::bail!("Invalid hex color format '{hex}'. Expected RGB or RRGGBB");
        }

        match hex.len() {
            3 => {
                let channel = |i: usize, name: &str| -> Result<u8> {
                    let digit = u8::from_str_radix(&hex[i..=i], 16)
                        .context(format!("Invalid {name} channel in hex color '{hex}'"))?;
                    Ok(digit * 17)
                };
                Ok(Self::new(
                    channel(0, "red")?,
                    channel(1, "green")?,
                    channel(2, "blue")?,
                ))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16)
                    .context(format!("Invalid red channel in hex color '{hex}'"))?;
                let g = u8::from_str_radix(&hex[2..4], 16)
                    .context(format!("Invalid green channel in hex color '{hex}'"))?;
                let b = u8::from_str_radix(&hex[4..6], 16)
                    .context(format!("Invalid blue channel in hex color '{hex}'"))?;
                Ok(Self::new(r, g, b))
            }
            _ => anyhow::bail!("Invalid hex color format '{hex}'. Expected RGB or RRGGBB"),
        }
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Converts the color to a Ratatui Color for terminal rendering.
    #[cfg(feature = "ratatui")]
    #[must_use]
    pub const fn to_ratatui_color(&self) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(self.r, self.g, self.b)
    }

    /// Perceived luminance `0.299R + 0.587G + 0.114B` in the 0-255 range.
    #[must_use]
    pub fn luminance(&self) -> f32 {
        0.114f32.mul_add(
            f32::from(self.b),
            0.299f32.mul_add(f32::from(self.r), 0.587 * f32::from(self.g)),
        )
    }

    /// Text color that stays readable on this background.
    ///
    /// Black when the luminance is strictly above 128, white otherwise.
    ///
    /// ```
    /// use lazypanel::models::RgbColor;
    ///
    /// assert_eq!(RgbColor::WHITE.text_contrast(), RgbColor::BLACK);
    /// assert_eq!(RgbColor::new(128, 128, 128).text_contrast(), RgbColor::WHITE);
    /// ```
    #[must_use]
    pub fn text_contrast(&self) -> Self {
        // Integer form of the weights avoids float drift at the 128 boundary.
        let weighted = u32::from(self.r) * 299 + u32::from(self.g) * 587 + u32::from(self.b) * 114;
        if weighted > 128 * 1000 {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }
}

/// Text color for a background given as a hex string.
///
/// Malformed strings fail closed to black text.
#[must_use]
pub fn contrast_text_color(background: &str) -> RgbColor {
    RgbColor::from_hex(background).map_or(RgbColor::BLACK, |color| color.text_contrast())
}

impl FromStr for RgbColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for RgbColor {
    /// Default color is white (#FFFFFF).
    fn default() -> Self {
        Self::WHITE
    }
}

impl Serialize for RgbColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RgbColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_valid() {
        let color = RgbColor::from_hex("#FF0000").unwrap();
        assert_eq!(color, RgbColor::new(255, 0, 0));

        let color = RgbColor::from_hex("00FF00").unwrap();
        assert_eq!(color, RgbColor::new(0, 255, 0));

        let color = RgbColor::from_hex("#0000ff").unwrap();
        assert_eq!(color, RgbColor::new(0, 0, 255));

        let color = RgbColor::from_hex("  #FFFFFF  ").unwrap();
        assert_eq!(color, RgbColor::new(255, 255, 255));
    }

    #[test]
    fn test_from_hex_short_form() {
        assert_eq!(RgbColor::from_hex("#fff").unwrap(), RgbColor::WHITE);
        assert_eq!(RgbColor::from_hex("000").unwrap(), RgbColor::BLACK);
        assert_eq!(
            RgbColor::from_hex("#a1c").unwrap(),
            RgbColor::new(0xAA, 0x11, 0xCC)
        );
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(RgbColor::from_hex("#FFFF").is_err());
        assert!(RgbColor::from_hex("#FFFFFFF").is_err());
        assert!(RgbColor::from_hex("GGGGGG").is_err());
        assert!(RgbColor::from_hex("#GGG").is_err());
        assert!(RgbColor::from_hex("").is_err());
        assert!(RgbColor::from_hex("#").is_err());
        assert!(RgbColor::from_hex("#ÿÿÿ").is_err());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(RgbColor::new(255, 0, 0).to_hex(), "#FF0000");
        assert_eq!(RgbColor::new(0, 128, 255).to_hex(), "#0080FF");
        assert_eq!(RgbColor::new(0, 0, 0).to_hex(), "#000000");
    }

    #[test]
    fn test_contrast_extremes() {
        assert_eq!(contrast_text_color("#ffffff"), RgbColor::BLACK);
        assert_eq!(contrast_text_color("#000000"), RgbColor::WHITE);
    }

    #[test]
    fn test_contrast_boundary_resolves_to_white() {
        // Luminance of #808080 is exactly 128, which is not > 128.
        let gray = RgbColor::from_hex("#808080").unwrap();
        assert!((gray.luminance() - 128.0).abs() < 0.01);
        assert_eq!(contrast_text_color("#808080"), RgbColor::WHITE);

        // One step brighter tips over.
        assert_eq!(contrast_text_color("#818181"), RgbColor::BLACK);
    }

    #[test]
    fn test_contrast_malformed_fails_closed() {
        assert_eq!(contrast_text_color("not-a-color"), RgbColor::BLACK);
        assert_eq!(contrast_text_color("#12"), RgbColor::BLACK);
        assert_eq!(contrast_text_color(""), RgbColor::BLACK);
    }

    #[test]
    fn test_contrast_rcd_blue() {
        // 0x21*0.299 + 0x96*0.587 + 0xF3*0.114 ≈ 125.7
        assert_eq!(contrast_text_color("#2196F3"), RgbColor::WHITE);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&RgbColor::new(0x21, 0x96, 0xF3)).unwrap();
        assert_eq!(json, "\"#2196F3\"");

        let parsed: RgbColor = serde_json::from_str("\"#fff\"").unwrap();
        assert_eq!(parsed, RgbColor::WHITE);

        assert!(serde_json::from_str::<RgbColor>("\"#zzzzzz\"").is_err());
    }

    #[test]
    fn test_default() {
        assert_eq!(RgbColor::default(), RgbColor::new(255, 255, 255));
    }
}
