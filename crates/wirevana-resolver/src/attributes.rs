//! Concrete visual attributes produced by style resolution.

use serde::Serialize;
use std::fmt::Write;
use wirevana_core::tokens::Platform;

/// Font metrics for one entry of the type scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub family: &'static str,
    pub size: f32,
    pub weight: u16,
    pub line_height: f32,
    pub letter_spacing: f32,
}

impl Typography {
    pub const fn new(
        family: &'static str,
        size: f32,
        weight: u16,
        line_height: f32,
        letter_spacing: f32,
    ) -> Self {
        Self {
            family,
            size,
            weight,
            line_height,
            letter_spacing,
        }
    }
}

/// The resolved look of a node.
///
/// Always carries a background, a foreground, a corner radius and a
/// typography block, whatever the input style.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualAttributes {
    /// Design system used, never `Auto`.
    pub platform: Platform,
    pub background: String,
    pub foreground: String,
    pub border: Option<String>,
    pub corner_radius: f32,
    pub shadow: Option<String>,
    pub backdrop_filter: Option<String>,
    pub typography: Typography,
}

impl VisualAttributes {
    /// Inline CSS declarations for these attributes.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        let _ = write!(
            css,
            "background:{};color:{};border-radius:{}px;",
            self.background,
            self.foreground,
            format_px(self.corner_radius)
        );
        if let Some(border) = &self.border {
            let _ = write!(css, "border:{};", border);
        }
        if let Some(shadow) = &self.shadow {
            let _ = write!(css, "box-shadow:{};", shadow);
        }
        if let Some(filter) = &self.backdrop_filter {
            let _ = write!(css, "backdrop-filter:{0};-webkit-backdrop-filter:{0};", filter);
        }
        let t = &self.typography;
        let _ = write!(
            css,
            "font-family:{};font-size:{}px;font-weight:{};line-height:{}px;letter-spacing:{}px;",
            t.family,
            format_px(t.size),
            t.weight,
            format_px(t.line_height),
            format_px(t.letter_spacing)
        );
        css
    }

    /// Color and typography only, for nodes that sit on a parent's surface.
    pub fn to_text_css(&self) -> String {
        let t = &self.typography;
        format!(
            "color:{};font-family:{};font-size:{}px;font-weight:{};line-height:{}px;letter-spacing:{}px;",
            self.foreground,
            t.family,
            format_px(t.size),
            t.weight,
            format_px(t.line_height),
            format_px(t.letter_spacing)
        )
    }
}

/// Format a pixel value without a trailing `.0`.
pub fn format_px(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
