//! Material Design 3 token tables (light theme).

use crate::attributes::{Typography, VisualAttributes};
use crate::system::{DesignSystem, EffectiveStyle, RolePalette};
use wirevana_core::tokens::{ColorRole, Platform, TextStyle, Variant};

const ON_SURFACE: &str = "#1d1b20";
const OUTLINE: &str = "#79747e";
const CORNER_MEDIUM: f32 = 12.0;
const FONT: &str = "Roboto, 'Helvetica Neue', Arial, sans-serif";

/// Surface container tint per elevation level.
const SURFACE_CONTAINERS: [&str; 6] = [
    "#fffbfe", // surface
    "#ffffff", // surfaceContainerLowest
    "#f7f2fa", // surfaceContainerLow
    "#f3edf7", // surfaceContainer
    "#ede6f0", // surfaceContainerHigh
    "#e6e0e9", // surfaceContainerHighest
];

/// Elevation shadow per level.
const ELEVATION: [&str; 6] = [
    "none",
    "0px 1px 2px 0px rgba(0, 0, 0, 0.3), 0px 1px 3px 1px rgba(0, 0, 0, 0.15)",
    "0px 1px 2px 0px rgba(0, 0, 0, 0.3), 0px 2px 6px 2px rgba(0, 0, 0, 0.15)",
    "0px 1px 3px 0px rgba(0, 0, 0, 0.3), 0px 4px 8px 3px rgba(0, 0, 0, 0.15)",
    "0px 2px 3px 0px rgba(0, 0, 0, 0.3), 0px 6px 10px 4px rgba(0, 0, 0, 0.15)",
    "0px 4px 4px 0px rgba(0, 0, 0, 0.3), 0px 8px 12px 6px rgba(0, 0, 0, 0.15)",
];

/// Material You on Android.
#[derive(Debug, Clone, Copy, Default)]
pub struct Material;

impl DesignSystem for Material {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn palette(&self, role: ColorRole) -> RolePalette {
        match role {
            ColorRole::Primary => RolePalette::new("#6750a4", "#ffffff", "#eaddff", "#21005d"),
            ColorRole::Secondary => RolePalette::new("#625b71", "#ffffff", "#e8def8", "#1d192b"),
            ColorRole::Tertiary => RolePalette::new("#7d5260", "#ffffff", "#ffd8e4", "#31111d"),
            ColorRole::Error => RolePalette::new("#b3261e", "#ffffff", "#f9dedc", "#410e0b"),
            ColorRole::Warning => RolePalette::new("#7d5700", "#ffffff", "#ffdea6", "#271900"),
            ColorRole::Success => RolePalette::new("#386a20", "#ffffff", "#b7f397", "#042100"),
            ColorRole::Surface | ColorRole::Background => {
                RolePalette::new("#fffbfe", ON_SURFACE, "#f3edf7", ON_SURFACE)
            }
        }
    }

    fn typography(&self, style: TextStyle) -> Typography {
        let (size, weight, line_height, letter_spacing) = match style {
            TextStyle::DisplayLarge => (57.0, 400, 64.0, -0.25),
            TextStyle::DisplayMedium => (45.0, 400, 52.0, 0.0),
            TextStyle::DisplaySmall => (36.0, 400, 44.0, 0.0),
            TextStyle::HeadlineLarge => (32.0, 400, 40.0, 0.0),
            TextStyle::HeadlineMedium => (28.0, 400, 36.0, 0.0),
            TextStyle::HeadlineSmall => (24.0, 400, 32.0, 0.0),
            TextStyle::TitleLarge => (22.0, 400, 28.0, 0.0),
            TextStyle::TitleMedium => (16.0, 500, 24.0, 0.15),
            TextStyle::TitleSmall => (14.0, 500, 20.0, 0.1),
            TextStyle::BodyLarge => (16.0, 400, 24.0, 0.5),
            TextStyle::BodyMedium => (14.0, 400, 20.0, 0.25),
            TextStyle::BodySmall => (12.0, 400, 16.0, 0.4),
            TextStyle::LabelLarge => (14.0, 500, 20.0, 0.1),
            TextStyle::LabelMedium => (12.0, 500, 16.0, 0.5),
            TextStyle::LabelSmall => (11.0, 500, 16.0, 0.5),
        };
        Typography::new(FONT, size, weight, line_height, letter_spacing)
    }

    fn compose(&self, style: &EffectiveStyle, palette: &RolePalette) -> VisualAttributes {
        let level = style.surface.index();
        let neutral = style.color_role.is_neutral();

        let (background, foreground, border, shadow) = match style.variant {
            Some(Variant::Filled) if neutral => (
                SURFACE_CONTAINERS[level].to_string(),
                ON_SURFACE.to_string(),
                None,
                ELEVATION[level],
            ),
            Some(Variant::Filled) => (
                palette.main.clone(),
                palette.on_main.clone(),
                None,
                ELEVATION[level],
            ),
            Some(Variant::Tonal) => (
                palette.container.clone(),
                palette.on_container.clone(),
                None,
                ELEVATION[level],
            ),
            Some(Variant::Outlined) => (
                "transparent".to_string(),
                if neutral { ON_SURFACE.to_string() } else { palette.main.clone() },
                Some(format!("1px solid {}", if neutral { OUTLINE } else { palette.main.as_str() })),
                ELEVATION[0],
            ),
            Some(Variant::Text) => (
                "transparent".to_string(),
                if neutral { ON_SURFACE.to_string() } else { palette.main.clone() },
                None,
                ELEVATION[0],
            ),
            Some(Variant::Elevated) => (
                SURFACE_CONTAINERS[level.max(1)].to_string(),
                if neutral { ON_SURFACE.to_string() } else { palette.main.clone() },
                None,
                ELEVATION[level.max(1)],
            ),
            None if neutral => (
                SURFACE_CONTAINERS[level].to_string(),
                ON_SURFACE.to_string(),
                None,
                ELEVATION[level],
            ),
            None => (
                palette.container.clone(),
                palette.on_container.clone(),
                None,
                ELEVATION[level],
            ),
        };

        VisualAttributes {
            platform: Platform::Android,
            background,
            foreground,
            border,
            corner_radius: CORNER_MEDIUM,
            shadow: Some(shadow.to_string()),
            backdrop_filter: None,
            typography: self.typography(style.text_style),
        }
    }
}
