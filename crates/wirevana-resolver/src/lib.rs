//! Style and binding resolution for Wirevana wireframes.
//!
//! This crate resolves:
//! - Semantic styles (surface level, color role, variant, type scale) to
//!   concrete attributes under Material Design 3 or iOS
//! - Binding expressions against sample data, session state and list items
//! - Value converters (`RelativeDate`, `CompletedToStrikethrough`, ...)

mod attributes;
mod bindings;
mod converters;
mod cupertino;
mod material;
mod styles;
mod system;

pub use attributes::{format_px, Typography, VisualAttributes};
pub use bindings::{BindingContext, BindingResolver};
pub use converters::Converter;
pub use cupertino::Cupertino;
pub use material::Material;
pub use styles::{builtin_style, ResolverConfig, StyleResolver, BUILTIN_STYLE_NAMES};
pub use system::{DesignSystem, EffectiveStyle, RolePalette};
