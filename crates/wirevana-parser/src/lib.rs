//! Loader for Wirevana wireframe documents.
//!
//! This crate turns wireframe JSON into the typed document model, parsing
//! every prop string into a binding expression along the way. The binding
//! grammar is built on `nom`.

mod document;
mod grammar;

pub use document::{from_value, parse_child, parse_component, parse_style_definition};
pub use grammar::parse_binding;

use wirevana_core::{LoadError, WireframeDefinition};

/// Parse a wireframe document from JSON text.
///
/// # Example
///
/// ```ignore
/// use wirevana_parser::parse_document;
///
/// let source = r#"{
///   "name": "Demo",
///   "tabs": { "Home": { "title": "Home", "page": "HomePage" } },
///   "pages": { "HomePage": { "layout": { "type": "VerticalStack" } } }
/// }"#;
///
/// let wireframe = parse_document(source)?;
/// ```
pub fn parse_document(source: &str) -> Result<WireframeDefinition, LoadError> {
    let value: serde_json::Value = serde_json::from_str(source)?;
    from_value(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_document("{ nope"), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_parse_document() {
        let def = parse_document(
            r#"{
                "name": "Demo",
                "tabs": { "Home": { "title": "Home", "page": "HomePage" } },
                "pages": { "HomePage": { "title": "Home", "layout": { "type": "VerticalStack" } } }
            }"#,
        )
        .unwrap();

        assert_eq!(def.name, "Demo");
        assert_eq!(def.tabs.len(), 1);
        let page = def.page("HomePage").unwrap();
        assert!(page.layout.is_some());
    }
}
