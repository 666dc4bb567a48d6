//! Style resolution: semantic style in, platform attributes out.

use tracing::debug;

use wirevana_core::tokens::*;

use crate::attributes::VisualAttributes;
use crate::cupertino::Cupertino;
use crate::material::Material;
use crate::system::{DesignSystem, EffectiveStyle};

/// Names available in every wireframe, after the document's own library.
pub const BUILTIN_STYLE_NAMES: &[&str] = &[
    "primary-button",
    "secondary-button",
    "card-default",
    "card-elevated",
    "card-outlined",
    "text-headline",
    "text-body",
    "text-caption",
    "surface-primary",
    "surface-secondary",
    "surface-elevated",
    "surface-modal",
    "surface-overlay",
    "button-outlined",
    "button-text",
    "button-destructive",
    "status-success",
    "status-warning",
    "status-error",
    "status-info",
];

/// Built-in style by name.
pub fn builtin_style(name: &str) -> Option<StyleDefinition> {
    use ColorRole::*;
    use SurfaceLevel::*;

    let style = match name {
        "primary-button" => StyleDefinition::surface(Level1, Primary)
            .with_variant(Variant::Filled)
            .with_text_style(TextStyle::LabelLarge),
        "secondary-button" => StyleDefinition::surface(Level1, Secondary)
            .with_variant(Variant::Tonal)
            .with_text_style(TextStyle::LabelLarge),
        "card-default" => StyleDefinition::surface(Level1, Surface),
        "card-elevated" => StyleDefinition::surface(Level3, Surface).with_variant(Variant::Elevated),
        "card-outlined" => StyleDefinition::surface(Level0, Surface).with_variant(Variant::Outlined),
        "text-headline" => {
            StyleDefinition::surface(Level0, Surface).with_text_style(TextStyle::HeadlineMedium)
        }
        "text-body" => StyleDefinition::surface(Level0, Surface).with_text_style(TextStyle::BodyMedium),
        "text-caption" => {
            StyleDefinition::surface(Level0, Surface).with_text_style(TextStyle::LabelSmall)
        }
        "surface-primary" => StyleDefinition::surface(Level1, Surface),
        "surface-secondary" => StyleDefinition::surface(Level2, Surface),
        "surface-elevated" => StyleDefinition::surface(Level3, Surface),
        "surface-modal" => StyleDefinition::surface(Level4, Surface),
        "surface-overlay" => StyleDefinition::surface(Level5, Surface),
        "button-outlined" => StyleDefinition::surface(Level0, Primary)
            .with_variant(Variant::Outlined)
            .with_text_style(TextStyle::LabelLarge),
        "button-text" => StyleDefinition::surface(Level0, Primary)
            .with_variant(Variant::Text)
            .with_text_style(TextStyle::LabelLarge),
        "button-destructive" => StyleDefinition::surface(Level1, Error)
            .with_variant(Variant::Tonal)
            .with_text_style(TextStyle::LabelLarge),
        "status-success" => StyleDefinition::surface(Level1, Success),
        "status-warning" => StyleDefinition::surface(Level1, Warning),
        "status-error" => StyleDefinition::surface(Level1, Error),
        "status-info" => StyleDefinition::surface(Level1, Primary),
        _ => return None,
    };
    Some(style)
}

/// Style resolver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Used when neither the style nor the library pins a platform.
    pub platform_preference: Platform,
    /// Emit a `tracing` event for every resolution.
    pub debug_styles: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            platform_preference: Platform::Android,
            debug_styles: false,
        }
    }
}

/// Resolves semantic styles against a style library.
///
/// Resolution is total: unknown names fall back to the default style and
/// every result carries colors, a corner radius and typography.
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    library: &'a StyleLibrary,
    config: ResolverConfig,
}

impl<'a> StyleResolver<'a> {
    pub fn new(library: &'a StyleLibrary, config: ResolverConfig) -> Self {
        Self { library, config }
    }

    pub fn config(&self) -> ResolverConfig {
        self.config
    }

    /// Look a name up: document library, built-ins, then the type scale.
    pub fn lookup(&self, name: &str) -> Option<StyleDefinition> {
        self.library
            .get(name)
            .copied()
            .or_else(|| builtin_style(name))
            .or_else(|| TextStyle::from_name(name).map(StyleDefinition::text))
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// The definition behind a style reference. Unknown names give the default style.
    pub fn definition(&self, style: &StyleRef) -> StyleDefinition {
        match style {
            StyleRef::Inline(definition) => *definition,
            StyleRef::Named(name) => self.lookup(name).unwrap_or_else(|| {
                debug!(style = %name, "unknown style name, using default style");
                StyleDefinition::default()
            }),
        }
    }

    /// Platform a style renders with; never `Auto`.
    pub fn effective_platform(&self, style: &StyleDefinition) -> Platform {
        style
            .platform
            .unwrap_or(Platform::Auto)
            .or(self.library.platform)
            .or(self.config.platform_preference)
            .or(Platform::Android)
    }

    pub fn resolve(&self, style: &StyleDefinition) -> VisualAttributes {
        let platform = self.effective_platform(style);
        let system: &dyn DesignSystem = match platform {
            Platform::Ios => &Cupertino,
            _ => &Material,
        };

        let effective = EffectiveStyle {
            surface: style.surface.unwrap_or_default(),
            color_role: style.color_role.unwrap_or_default(),
            variant: style.variant,
            text_style: style.text_style.unwrap_or_default(),
        };
        let palette = system.branded_palette(effective.color_role, &self.library.brand_colors);
        let attributes = system.compose(&effective, &palette);

        if self.config.debug_styles {
            debug!(
                target: "wirevana::style",
                ?style,
                ?platform,
                background = %attributes.background,
                foreground = %attributes.foreground,
                "resolved style"
            );
        }

        attributes
    }

    /// Resolve `style` layered over a primitive's default look.
    pub fn resolve_over(&self, style: Option<&StyleRef>, base: StyleDefinition) -> VisualAttributes {
        let definition = style
            .map(|s| self.definition(s))
            .unwrap_or_default()
            .merged_over(base);
        self.resolve(&definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn library() -> StyleLibrary {
        let mut library = StyleLibrary::new();
        library.styles.insert(
            "app-header".into(),
            StyleDefinition::surface(SurfaceLevel::Level1, ColorRole::Primary)
                .with_text_style(TextStyle::HeadlineLarge),
        );
        library
    }

    #[test]
    fn test_lookup_order() {
        let mut library = library();
        library.styles.insert(
            "card-default".into(),
            StyleDefinition::surface(SurfaceLevel::Level5, ColorRole::Error),
        );
        let resolver = StyleResolver::new(&library, ResolverConfig::default());

        // Document library shadows built-ins.
        assert_eq!(
            resolver.lookup("card-default").and_then(|s| s.color_role),
            Some(ColorRole::Error)
        );
        assert_eq!(
            resolver.lookup("card-elevated").and_then(|s| s.surface),
            Some(SurfaceLevel::Level3)
        );
        assert_eq!(
            resolver.lookup("body-large"),
            Some(StyleDefinition::text(TextStyle::BodyLarge))
        );
        assert_eq!(resolver.lookup("display-hero"), None);
    }

    #[test]
    fn test_unknown_name_falls_back() {
        let library = library();
        let resolver = StyleResolver::new(&library, ResolverConfig::default());
        let fallback = resolver.resolve(&resolver.definition(&StyleRef::Named("label-muted".into())));
        assert_eq!(fallback, resolver.resolve(&StyleDefinition::default()));
    }

    #[test]
    fn test_effective_platform() {
        let mut library = library();
        let config = ResolverConfig {
            platform_preference: Platform::Ios,
            debug_styles: false,
        };

        let auto = StyleDefinition {
            platform: Some(Platform::Auto),
            ..StyleDefinition::default()
        };
        let pinned = StyleDefinition {
            platform: Some(Platform::Android),
            ..StyleDefinition::default()
        };

        {
            let resolver = StyleResolver::new(&library, config);
            assert_eq!(resolver.effective_platform(&auto), Platform::Ios);
            assert_eq!(resolver.effective_platform(&pinned), Platform::Android);
        }

        library.platform = Platform::Android;
        let resolver = StyleResolver::new(&library, config);
        assert_eq!(resolver.effective_platform(&auto), Platform::Android);

        let defaulted = StyleResolver::new(&library, ResolverConfig {
            platform_preference: Platform::Auto,
            debug_styles: false,
        });
        assert_eq!(defaulted.effective_platform(&StyleDefinition::default()), Platform::Android);
    }

    #[test]
    fn test_brand_colors_override_primary() {
        let mut library = library();
        library.brand_colors.primary = Some("#2563eb".into());
        let resolver = StyleResolver::new(&library, ResolverConfig::default());

        let button = resolver.resolve(&builtin_style("primary-button").unwrap());
        assert_eq!(button.background, "#2563eb");
        assert_eq!(button.foreground, "#ffffff");
    }

    #[test]
    fn test_no_text_style_gets_body_medium() {
        let library = library();
        let resolver = StyleResolver::new(&library, ResolverConfig::default());
        let attrs = resolver.resolve(&StyleDefinition::default());
        assert_eq!(attrs.typography.size, 14.0);
        assert_eq!(attrs.platform, Platform::Android);
    }

    #[test]
    fn test_resolve_over_base() {
        let library = library();
        let resolver = StyleResolver::new(&library, ResolverConfig::default());
        let base = builtin_style("primary-button").unwrap();

        let plain = resolver.resolve_over(None, base);
        assert_eq!(plain.background, "#6750a4");

        let destructive = resolver.resolve_over(
            Some(&StyleRef::Inline(StyleDefinition {
                color_role: Some(ColorRole::Error),
                ..StyleDefinition::default()
            })),
            base,
        );
        assert_eq!(destructive.background, "#b3261e");
    }

    #[test]
    fn test_builtin_names_resolve() {
        for name in BUILTIN_STYLE_NAMES {
            assert!(builtin_style(name).is_some(), "{name}");
        }
    }

    fn option_of<T: Clone + std::fmt::Debug + 'static>(values: &'static [T]) -> impl Strategy<Value = Option<T>> {
        prop::option::of(prop::sample::select(values))
    }

    prop_compose! {
        fn any_style()(
            surface in option_of(&SurfaceLevel::ALL),
            color_role in option_of(&ColorRole::ALL),
            variant in option_of(&Variant::ALL),
            text_style in option_of(&TextStyle::ALL),
            platform in option_of(&[Platform::Ios, Platform::Android, Platform::Auto]),
        ) -> StyleDefinition {
            StyleDefinition { surface, color_role, variant, text_style, platform }
        }
    }

    proptest! {
        #[test]
        fn resolution_is_total(style in any_style(), ios in any::<bool>()) {
            let library = StyleLibrary::new();
            let config = ResolverConfig {
                platform_preference: if ios { Platform::Ios } else { Platform::Android },
                debug_styles: true,
            };
            let attrs = StyleResolver::new(&library, config).resolve(&style);
            prop_assert!(!attrs.background.is_empty());
            prop_assert!(!attrs.foreground.is_empty());
            prop_assert!(attrs.corner_radius > 0.0);
            prop_assert!(attrs.typography.size > 0.0);
            prop_assert_ne!(attrs.platform, Platform::Auto);
        }
    }
}
