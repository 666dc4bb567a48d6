//! Value types shared across crates.

use serde_json::Value;

/// RGBA color with 8-bit channels and float alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from hex string (e.g., "#2563eb", "2563eb", "#fff" or "#78788033").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| -> Option<u8> {
            u8::from_str_radix(hex.get(range)?, 16).ok()
        };
        match hex.len() {
            3 => {
                let expand = |i: usize| -> Option<u8> {
                    let digit = u8::from_str_radix(hex.get(i..i + 1)?, 16).ok()?;
                    Some(digit * 17)
                };
                Some(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Some(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)? as f32 / 255.0,
            )),
            _ => None,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Relative luminance, 0.0 (black) to 1.0 (white).
    pub fn luminance(&self) -> f32 {
        let linear = |c: u8| {
            let c = c as f32 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// Black or white, whichever reads better on top of `self`.
    pub fn contrasting(&self) -> Color {
        if self.luminance() > 0.4 {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }

    /// CSS color text: `#rrggbb` when opaque, `rgba(...)` otherwise.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, trim_float(self.a))
        }
    }

    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
}

fn trim_float(value: f32) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Semantic spacing scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spacing {
    Tight,
    Standard,
    Loose,
    Px(f32),
}

impl Spacing {
    /// Read a spacing token or pixel count. Unknown names give `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(|n| Spacing::Px(n as f32)),
            Value::String(s) => Self::from_name(s),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "tight" => Some(Spacing::Tight),
            "standard" => Some(Spacing::Standard),
            "loose" => Some(Spacing::Loose),
            other => other
                .trim_end_matches("px")
                .parse::<f32>()
                .ok()
                .map(Spacing::Px),
        }
    }

    /// Gap between siblings, in px.
    pub fn gap(self) -> f32 {
        match self {
            Spacing::Tight => 4.0,
            Spacing::Standard => 12.0,
            Spacing::Loose => 20.0,
            Spacing::Px(px) => px,
        }
    }

    /// Inner padding, in px.
    pub fn padding(self) -> f32 {
        match self {
            Spacing::Tight => 8.0,
            Spacing::Standard => 16.0,
            Spacing::Loose => 24.0,
            Spacing::Px(px) => px,
        }
    }
}
