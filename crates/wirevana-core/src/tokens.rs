//! Semantic style tokens.
//!
//! A [`StyleDefinition`] names *what* a surface means (its elevation, its
//! color role, its place in the type scale) and leaves the concrete colors and
//! metrics to the platform design system chosen at resolution time.

use indexmap::IndexMap;

/// Target platform for style resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Platform {
    Ios,
    Android,
    #[default]
    Auto,
}

impl Platform {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ios" => Some(Platform::Ios),
            "android" => Some(Platform::Android),
            "auto" => Some(Platform::Auto),
            _ => None,
        }
    }

    /// Returns `self` unless it is `Auto`, in which case `fallback` wins.
    pub fn or(self, fallback: Platform) -> Platform {
        match self {
            Platform::Auto => fallback,
            other => other,
        }
    }
}

/// Ordinal elevation level of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SurfaceLevel {
    #[default]
    Level0,
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
}

impl SurfaceLevel {
    pub const ALL: [SurfaceLevel; 6] = [
        SurfaceLevel::Level0,
        SurfaceLevel::Level1,
        SurfaceLevel::Level2,
        SurfaceLevel::Level3,
        SurfaceLevel::Level4,
        SurfaceLevel::Level5,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "level0" => Some(SurfaceLevel::Level0),
            "level1" => Some(SurfaceLevel::Level1),
            "level2" => Some(SurfaceLevel::Level2),
            "level3" => Some(SurfaceLevel::Level3),
            "level4" => Some(SurfaceLevel::Level4),
            "level5" => Some(SurfaceLevel::Level5),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Color role within the design system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorRole {
    Primary,
    Secondary,
    Tertiary,
    Error,
    Warning,
    Success,
    #[default]
    Surface,
    Background,
}

impl ColorRole {
    pub const ALL: [ColorRole; 8] = [
        ColorRole::Primary,
        ColorRole::Secondary,
        ColorRole::Tertiary,
        ColorRole::Error,
        ColorRole::Warning,
        ColorRole::Success,
        ColorRole::Surface,
        ColorRole::Background,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "primary" => Some(ColorRole::Primary),
            "secondary" => Some(ColorRole::Secondary),
            "tertiary" => Some(ColorRole::Tertiary),
            "error" => Some(ColorRole::Error),
            "warning" => Some(ColorRole::Warning),
            "success" => Some(ColorRole::Success),
            "surface" => Some(ColorRole::Surface),
            "background" => Some(ColorRole::Background),
            _ => None,
        }
    }

    /// Neutral roles paint the surface itself rather than an accent.
    pub fn is_neutral(self) -> bool {
        matches!(self, ColorRole::Surface | ColorRole::Background)
    }
}

/// Component variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Variant {
    Filled,
    Outlined,
    Text,
    Elevated,
    Tonal,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Filled,
        Variant::Outlined,
        Variant::Text,
        Variant::Elevated,
        Variant::Tonal,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "filled" => Some(Variant::Filled),
            "outlined" => Some(Variant::Outlined),
            "text" => Some(Variant::Text),
            "elevated" => Some(Variant::Elevated),
            "tonal" => Some(Variant::Tonal),
            _ => None,
        }
    }
}

/// Typography scale entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TextStyle {
    DisplayLarge,
    DisplayMedium,
    DisplaySmall,
    HeadlineLarge,
    HeadlineMedium,
    HeadlineSmall,
    TitleLarge,
    TitleMedium,
    TitleSmall,
    BodyLarge,
    #[default]
    BodyMedium,
    BodySmall,
    LabelLarge,
    LabelMedium,
    LabelSmall,
}

impl TextStyle {
    pub const ALL: [TextStyle; 15] = [
        TextStyle::DisplayLarge,
        TextStyle::DisplayMedium,
        TextStyle::DisplaySmall,
        TextStyle::HeadlineLarge,
        TextStyle::HeadlineMedium,
        TextStyle::HeadlineSmall,
        TextStyle::TitleLarge,
        TextStyle::TitleMedium,
        TextStyle::TitleSmall,
        TextStyle::BodyLarge,
        TextStyle::BodyMedium,
        TextStyle::BodySmall,
        TextStyle::LabelLarge,
        TextStyle::LabelMedium,
        TextStyle::LabelSmall,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|style| style.name() == name.trim())
    }

    pub fn name(self) -> &'static str {
        match self {
            TextStyle::DisplayLarge => "display-large",
            TextStyle::DisplayMedium => "display-medium",
            TextStyle::DisplaySmall => "display-small",
            TextStyle::HeadlineLarge => "headline-large",
            TextStyle::HeadlineMedium => "headline-medium",
            TextStyle::HeadlineSmall => "headline-small",
            TextStyle::TitleLarge => "title-large",
            TextStyle::TitleMedium => "title-medium",
            TextStyle::TitleSmall => "title-small",
            TextStyle::BodyLarge => "body-large",
            TextStyle::BodyMedium => "body-medium",
            TextStyle::BodySmall => "body-small",
            TextStyle::LabelLarge => "label-large",
            TextStyle::LabelMedium => "label-medium",
            TextStyle::LabelSmall => "label-small",
        }
    }
}

/// Theme preference of a style library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
}

impl Theme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "auto" => Some(Theme::Auto),
            _ => None,
        }
    }
}

/// A semantic style. Every field is optional; absent fields take the
/// design system's defaults at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StyleDefinition {
    pub surface: Option<SurfaceLevel>,
    pub color_role: Option<ColorRole>,
    pub variant: Option<Variant>,
    pub text_style: Option<TextStyle>,
    pub platform: Option<Platform>,
}

impl StyleDefinition {
    pub fn surface(level: SurfaceLevel, role: ColorRole) -> Self {
        Self {
            surface: Some(level),
            color_role: Some(role),
            ..Self::default()
        }
    }

    pub fn text(text_style: TextStyle) -> Self {
        Self {
            text_style: Some(text_style),
            ..Self::default()
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn with_text_style(mut self, text_style: TextStyle) -> Self {
        self.text_style = Some(text_style);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fill fields that are unset in `self` from `base`.
    pub fn merged_over(self, base: StyleDefinition) -> StyleDefinition {
        StyleDefinition {
            surface: self.surface.or(base.surface),
            color_role: self.color_role.or(base.color_role),
            variant: self.variant.or(base.variant),
            text_style: self.text_style.or(base.text_style),
            platform: self.platform.or(base.platform),
        }
    }
}

/// A style given either inline or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleRef {
    Named(String),
    Inline(StyleDefinition),
}

/// Brand color overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrandColors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
}

/// Named reusable styles plus design-system preferences.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StyleLibrary {
    pub styles: IndexMap<String, StyleDefinition>,
    pub platform: Platform,
    pub theme: Theme,
    pub brand_colors: BrandColors,
}

impl StyleLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&StyleDefinition> {
        self.styles.get(name)
    }
}
