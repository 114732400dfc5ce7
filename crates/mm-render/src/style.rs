//! Colors and the theme painters draw with.

use serde::{Deserialize, Serialize};

// ─── Color ───────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
///
/// Serializes as a hex string so themes read naturally in config files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`. The `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let short = |i: usize| hex_val(bytes[i]).map(|v| v * 17);
        let pair = |i: usize| Some(hex_val(bytes[i])? * 16 + hex_val(bytes[i + 1])?);

        let (r, g, b, a) = match bytes.len() {
            3 => (short(0)?, short(1)?, short(2)?, 255),
            6 => (pair(0)?, pair(2)?, pair(4)?, 255),
            8 => (pair(0)?, pair(2)?, pair(4)?, pair(6)?),
            _ => return None,
        };
        Some(Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ))
    }

    /// The channels as bytes, rounded.
    pub fn to_rgba8(self) -> [u8; 4] {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [byte(self.r), byte(self.g), byte(self.b), byte(self.a)]
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    pub fn to_peniko(self) -> peniko::Color {
        let [r, g, b, a] = self.to_rgba8();
        peniko::Color::from_rgba8(r, g, b, a)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(hex: String) -> Result<Self, Self::Error> {
        Color::from_hex(&hex).ok_or_else(|| format!("invalid color: {hex:?}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

// ─── Theme ───────────────────────────────────────────────────────────────

/// Colors and stroke widths for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    pub node_fill: Color,
    pub node_stroke: Color,
    pub selected_stroke: Color,
    pub text: Color,
    pub connector: Color,
    pub folding_icon: Color,
    pub bookmark: Color,
    pub node_stroke_width: f64,
    pub selected_stroke_width: f64,
    pub connector_width: f64,
    pub folding_icon_stroke_width: f64,
    pub bookmark_radius: f64,
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color::rgb8(0xF5, 0xF5, 0xF7),
            node_fill: Color::rgb8(0xFF, 0xFF, 0xFF),
            node_stroke: Color::rgb8(0xC7, 0xC7, 0xCC),
            selected_stroke: Color::rgb8(0x00, 0x7A, 0xFF),
            text: Color::rgb8(0x1C, 0x1C, 0x1E),
            connector: Color::rgb8(0x8E, 0x8E, 0x93),
            folding_icon: Color::rgb8(0x63, 0x63, 0x66),
            bookmark: Color::rgb8(0xFF, 0x95, 0x00),
            node_stroke_width: 1.0,
            selected_stroke_width: 2.5,
            connector_width: 1.5,
            folding_icon_stroke_width: 1.5,
            bookmark_radius: 3.5,
            font_family: "sans-serif".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::rgb8(0x1C, 0x1C, 0x1E),
            node_fill: Color::rgb8(0x2C, 0x2C, 0x2E),
            node_stroke: Color::rgb8(0x48, 0x48, 0x4A),
            selected_stroke: Color::rgb8(0x0A, 0x84, 0xFF),
            text: Color::rgb8(0xF2, 0xF2, 0xF7),
            connector: Color::rgb8(0x63, 0x63, 0x66),
            folding_icon: Color::rgb8(0xAE, 0xAE, 0xB2),
            bookmark: Color::rgb8(0xFF, 0x9F, 0x0A),
            ..Self::light()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Color::from_hex("#fff"), Some(Color::rgba(1.0, 1.0, 1.0, 1.0)));
        assert_eq!(Color::from_hex("007AFF").map(Color::to_hex), Some("#007aff".to_string()));
        assert_eq!(
            Color::from_hex("#00000080").map(Color::to_rgba8),
            Some([0, 0, 0, 0x80])
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Color::from_hex("#12"), None);
        assert_eq!(Color::from_hex("#gggggg"), None);
    }

    #[test]
    fn translucent_color_keeps_alpha_in_hex() {
        let c = Color::rgba(1.0, 0.0, 0.0, 0.5);
        assert_eq!(c.to_hex(), "#ff000080");
    }

    #[test]
    fn theme_deserializes_hex_overrides() {
        let theme: Theme = serde_json::from_str(r##"{"node_fill": "#101010"}"##).unwrap();
        assert_eq!(theme.node_fill.to_hex(), "#101010");
        assert_eq!(theme.text, Theme::light().text);
    }

    #[test]
    fn invalid_theme_color_is_an_error() {
        let result: Result<Theme, _> = serde_json::from_str(r#"{"text": "blue"}"#);
        assert!(result.is_err());
    }
}
