//! Visual output for Wirevana previews.
//!
//! This crate provides:
//! - The visual node tree the interpreter produces
//! - The primitive component library (stateless node builders)
//! - Semantic icon lookup
//! - HTML serialisation for the preview canvas

pub mod html;
pub mod icons;
pub mod node;
pub mod primitives;

pub use html::render_html;
pub use icons::{icon_glyph, icon_symbol, IconGlyph};
pub use node::*;
