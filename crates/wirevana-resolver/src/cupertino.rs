//! iOS design tokens: translucent materials, system colors, SF type scale.

use crate::attributes::{Typography, VisualAttributes};
use crate::system::{DesignSystem, EffectiveStyle, RolePalette};
use wirevana_core::tokens::{ColorRole, Platform, TextStyle, Variant};
use wirevana_core::types::Color;

const LABEL: &str = "#000000";
const CORNER_MEDIUM: f32 = 12.0;
const BLUR: &str = "blur(10px) saturate(1.8)";
const HAIRLINE: &str = "0.5px solid rgba(255, 255, 255, 0.2)";
const DISPLAY_FONT: &str = "-apple-system, BlinkMacSystemFont, 'SF Pro Display', sans-serif";
const TEXT_FONT: &str = "-apple-system, BlinkMacSystemFont, 'SF Pro Text', sans-serif";

/// Material fill per elevation level, ultra-thin to ultra-thick.
const MATERIALS: [&str; 6] = [
    "transparent",
    "rgba(120, 120, 128, 0.16)",
    "rgba(120, 120, 128, 0.24)",
    "rgba(120, 120, 128, 0.32)",
    "rgba(120, 120, 128, 0.48)",
    "rgba(120, 120, 128, 0.64)",
];

/// iOS / Human Interface Guidelines look.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cupertino;

impl Cupertino {
    fn system_color(role: ColorRole) -> &'static str {
        match role {
            ColorRole::Primary => "#007aff",   // systemBlue
            ColorRole::Secondary => "#5856d6", // systemIndigo
            ColorRole::Tertiary => "#af52de",  // systemPurple
            ColorRole::Error => "#ff3b30",     // systemRed
            ColorRole::Warning => "#ff9500",   // systemOrange
            ColorRole::Success => "#34c759",   // systemGreen
            ColorRole::Surface => "#ffffff",   // systemBackground
            ColorRole::Background => "#f2f2f7", // secondarySystemBackground
        }
    }
}

impl DesignSystem for Cupertino {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn palette(&self, role: ColorRole) -> RolePalette {
        let main = Self::system_color(role);
        if role.is_neutral() {
            return RolePalette::new(main, LABEL, MATERIALS[1], LABEL);
        }
        match Color::from_hex(main) {
            Some(color) => RolePalette {
                main: main.to_string(),
                on_main: "#ffffff".to_string(),
                container: color.with_alpha(0.15).to_css(),
                on_container: main.to_string(),
            },
            None => RolePalette::new(main, "#ffffff", main, "#ffffff"),
        }
    }

    fn typography(&self, style: TextStyle) -> Typography {
        // largeTitle / title1-3 / headline / body / callout / subhead / caption1
        let (family, size, weight, line_height) = match style {
            TextStyle::DisplayLarge => (DISPLAY_FONT, 34.0, 400, 41.0),
            TextStyle::DisplayMedium | TextStyle::HeadlineLarge => (DISPLAY_FONT, 28.0, 400, 34.0),
            TextStyle::DisplaySmall
            | TextStyle::HeadlineMedium
            | TextStyle::TitleLarge => (DISPLAY_FONT, 22.0, 400, 28.0),
            TextStyle::HeadlineSmall | TextStyle::TitleMedium => (DISPLAY_FONT, 20.0, 400, 25.0),
            TextStyle::TitleSmall => (TEXT_FONT, 17.0, 600, 22.0),
            TextStyle::BodyLarge | TextStyle::BodyMedium => (TEXT_FONT, 17.0, 400, 22.0),
            TextStyle::BodySmall | TextStyle::LabelLarge => (TEXT_FONT, 16.0, 400, 21.0),
            TextStyle::LabelMedium => (TEXT_FONT, 15.0, 400, 20.0),
            TextStyle::LabelSmall => (TEXT_FONT, 12.0, 400, 16.0),
        };
        Typography::new(family, size, weight, line_height, 0.0)
    }

    fn compose(&self, style: &EffectiveStyle, palette: &RolePalette) -> VisualAttributes {
        let level = style.surface.index();
        let neutral = style.color_role.is_neutral();
        let accent = if neutral { LABEL.to_string() } else { palette.main.clone() };

        let material = |level: usize| {
            (
                MATERIALS[level].to_string(),
                (level > 0).then(|| BLUR.to_string()),
                (level > 0).then(|| HAIRLINE.to_string()),
            )
        };

        let (background, foreground, border, backdrop) = match style.variant {
            Some(Variant::Filled) if !neutral => {
                (palette.main.clone(), palette.on_main.clone(), None, None)
            }
            Some(Variant::Tonal) if !neutral => {
                (palette.container.clone(), palette.on_container.clone(), None, None)
            }
            Some(Variant::Outlined) => (
                "transparent".to_string(),
                accent.clone(),
                Some(format!("1px solid {}", if neutral { "#c6c6c8" } else { palette.main.as_str() })),
                None,
            ),
            Some(Variant::Text) => ("transparent".to_string(), accent.clone(), None, None),
            Some(Variant::Elevated) => {
                let (background, backdrop, border) = material(level.max(1));
                (background, accent.clone(), border, backdrop)
            }
            _ if neutral => {
                let (background, backdrop, border) = material(level);
                (background, LABEL.to_string(), border, backdrop)
            }
            _ => (palette.container.clone(), palette.on_container.clone(), None, None),
        };

        VisualAttributes {
            platform: Platform::Ios,
            background,
            foreground,
            border,
            corner_radius: CORNER_MEDIUM,
            shadow: None,
            backdrop_filter: backdrop,
            typography: self.typography(style.text_style),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirevana_core::tokens::SurfaceLevel;

    fn style(surface: SurfaceLevel, role: ColorRole, variant: Option<Variant>) -> EffectiveStyle {
        EffectiveStyle {
            surface,
            color_role: role,
            variant,
            text_style: TextStyle::BodyMedium,
        }
    }

    #[test]
    fn test_surface_uses_translucent_material() {
        let ios = Cupertino;
        let palette = ios.palette(ColorRole::Surface);

        let attrs = ios.compose(&style(SurfaceLevel::Level2, ColorRole::Surface, None), &palette);
        assert_eq!(attrs.background, MATERIALS[2]);
        assert_eq!(attrs.backdrop_filter.as_deref(), Some(BLUR));
        assert_eq!(attrs.border.as_deref(), Some(HAIRLINE));
        assert_eq!(attrs.foreground, LABEL);

        let flat = ios.compose(&style(SurfaceLevel::Level0, ColorRole::Surface, None), &palette);
        assert_eq!(flat.background, "transparent");
        assert_eq!(flat.backdrop_filter, None);
        assert_eq!(flat.border, None);
    }

    #[test]
    fn test_system_colors() {
        let ios = Cupertino;
        let palette = ios.palette(ColorRole::Success);
        let attrs = ios.compose(
            &style(SurfaceLevel::Level1, ColorRole::Success, Some(Variant::Filled)),
            &palette,
        );
        assert_eq!(attrs.background, "#34c759");
        assert_eq!(attrs.foreground, "#ffffff");

        let tonal = ios.palette(ColorRole::Primary);
        assert_eq!(tonal.container, "rgba(0, 122, 255, 0.15)");
    }

    #[test]
    fn test_sf_typography() {
        let ios = Cupertino;
        assert_eq!(ios.typography(TextStyle::BodyMedium).size, 17.0);
        assert_eq!(ios.typography(TextStyle::TitleSmall).weight, 600);
        assert_eq!(ios.typography(TextStyle::DisplayLarge).family, DISPLAY_FONT);
    }
}
