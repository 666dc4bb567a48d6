//! The seam between semantic styles and a platform design system.

use crate::attributes::{Typography, VisualAttributes};
use wirevana_core::tokens::{BrandColors, ColorRole, Platform, SurfaceLevel, TextStyle, Variant};
use wirevana_core::types::Color;

/// Colors for one color role.
#[derive(Debug, Clone, PartialEq)]
pub struct RolePalette {
    /// The role color itself (filled backgrounds, text-button labels).
    pub main: String,
    /// Content drawn on `main`.
    pub on_main: String,
    /// Low-emphasis tinted background.
    pub container: String,
    /// Content drawn on `container`.
    pub on_container: String,
}

impl RolePalette {
    pub fn new(main: &str, on_main: &str, container: &str, on_container: &str) -> Self {
        Self {
            main: main.to_string(),
            on_main: on_main.to_string(),
            container: container.to_string(),
            on_container: on_container.to_string(),
        }
    }

    /// Derive a palette from a single brand color.
    pub fn from_brand(color: Color) -> Self {
        Self {
            main: color.to_css(),
            on_main: color.contrasting().to_css(),
            container: color.with_alpha(0.16).to_css(),
            on_container: color.to_css(),
        }
    }
}

/// A semantic style with every field decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveStyle {
    pub surface: SurfaceLevel,
    pub color_role: ColorRole,
    pub variant: Option<Variant>,
    pub text_style: TextStyle,
}

/// A platform design system: token tables plus the rules combining them.
pub trait DesignSystem {
    fn platform(&self) -> Platform;

    /// Built-in palette for a role.
    fn palette(&self, role: ColorRole) -> RolePalette;

    fn typography(&self, style: TextStyle) -> Typography;

    /// Attributes for a style, given the (possibly brand-overridden) palette.
    fn compose(&self, style: &EffectiveStyle, palette: &RolePalette) -> VisualAttributes;

    /// Palette for a role with brand overrides applied.
    fn branded_palette(&self, role: ColorRole, brand: &BrandColors) -> RolePalette {
        let brand_color = match role {
            ColorRole::Primary => brand.primary.as_deref(),
            ColorRole::Secondary => brand.secondary.as_deref(),
            ColorRole::Tertiary => brand.accent.as_deref(),
            _ => None,
        };
        brand_color
            .and_then(Color::from_hex)
            .map(RolePalette::from_brand)
            .unwrap_or_else(|| self.palette(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_from_brand() {
        let palette = RolePalette::from_brand(Color::rgb(0x25, 0x63, 0xeb));
        assert_eq!(palette.main, "#2563eb");
        assert_eq!(palette.on_main, "#ffffff");
        assert_eq!(palette.container, "rgba(37, 99, 235, 0.16)");
        assert_eq!(palette.on_container, "#2563eb");
    }
}
