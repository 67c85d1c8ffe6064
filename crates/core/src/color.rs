//! Colors used in scenes: hex sRGB for fixed fills and HSLA for the
//! particle palette, which animates lightness and alpha per frame.

use crate::error::EngineError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1]. Serializes as `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    /// Parses `"#ff00aa"` or `"ff00aa"`, case insensitive.
    pub fn from_hex(hex: &str) -> Result<Srgb, EngineError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 hex digits in {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>, label: &str| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| EngineError::InvalidColor(format!("bad {label} channel in {hex:?}: {e}")))
        };
        Ok(Srgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// 8-bit channels, clamped and rounded.
    pub fn to_bytes(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// CSS-style HSLA: hue in degrees, saturation and lightness in percent,
/// alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl Hsla {
    pub fn to_css(self) -> String {
        format!("hsla({}, {}%, {}%, {})", self.h, self.s, self.l, self.a)
    }

    /// Standard HSL to RGB conversion; alpha is dropped.
    pub fn to_srgb(self) -> Srgb {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);
        if s == 0.0 {
            return Srgb { r: l, g: l, b: l };
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Srgb {
            r: hue_to_channel(p, q, h + 1.0 / 3.0),
            g: hue_to_channel(p, q, h),
            b: hue_to_channel(p, q, h - 1.0 / 3.0),
        }
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Fill of a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "space", rename_all = "snake_case")]
pub enum Color {
    Rgb { hex: Srgb },
    Hsla(Hsla),
}

impl Color {
    pub fn to_css(self) -> String {
        match self {
            Color::Rgb { hex } => hex.to_hex(),
            Color::Hsla(c) => c.to_css(),
        }
    }

    /// Straight (non-premultiplied) RGBA in [0, 1].
    pub fn to_rgba(self) -> [f64; 4] {
        match self {
            Color::Rgb { hex } => [hex.r, hex.g, hex.b, 1.0],
            Color::Hsla(c) => {
                let rgb = c.to_srgb();
                [rgb.r, rgb.g, rgb.b, c.a.clamp(0.0, 1.0)]
            }
        }
    }
}

impl From<Srgb> for Color {
    fn from(hex: Srgb) -> Self {
        Color::Rgb { hex }
    }
}

impl From<Hsla> for Color {
    fn from(c: Hsla) -> Self {
        Color::Hsla(c)
    }
}
