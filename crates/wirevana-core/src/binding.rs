//! Binding expression AST.
//!
//! Prop strings are parsed once into a [`Binding`]:
//! - `{binding path[, converter=Name]}` reads from the current list item
//! - `@sampleData.path` reads from the document's sample data
//! - `@state.path` reads from the session state
//!
//! Anything else is a literal.

use smallvec::SmallVec;
use std::fmt;

/// A dotted path like `form.itemId` or `loans.0.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingPath(pub SmallVec<[String; 4]>);

impl BindingPath {
    /// Split a dotted path. Empty segments are dropped, so `""` and `"."`
    /// both give the empty path.
    pub fn parse(path: &str) -> Self {
        BindingPath(
            path.split('.')
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// The empty path refers to the binding root itself.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BindingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// A reference into `sampleData` or `state`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingRef {
    pub path: BindingPath,
    /// The expression as written, returned when the path misses.
    pub source: String,
}

/// A `{binding ...}` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemBinding {
    pub path: BindingPath,
    pub converter: Option<String>,
    pub source: String,
}

/// A parsed binding expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Binding {
    Literal(String),
    SampleDataRef(BindingRef),
    StateRef(BindingRef),
    ItemBinding(ItemBinding),
}

impl Binding {
    /// The expression text as written in the document.
    pub fn source(&self) -> &str {
        match self {
            Binding::Literal(text) => text,
            Binding::SampleDataRef(r) | Binding::StateRef(r) => &r.source,
            Binding::ItemBinding(b) => &b.source,
        }
    }

    /// The state path this binding writes back to, if any.
    pub fn state_path(&self) -> Option<&BindingPath> {
        match self {
            Binding::StateRef(r) => Some(&r.path),
            _ => None,
        }
    }

    pub fn converter(&self) -> Option<&str> {
        match self {
            Binding::ItemBinding(b) => b.converter.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_parse() {
        let path = BindingPath::parse("form.itemId");
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["form", "itemId"]);
        assert_eq!(path.to_string(), "form.itemId");
    }

    #[test]
    fn test_root_paths() {
        assert!(BindingPath::parse("").is_root());
        assert!(BindingPath::parse(".").is_root());
        assert!(!BindingPath::parse("name").is_root());
    }

    #[test]
    fn test_source_is_preserved() {
        let binding = Binding::StateRef(BindingRef {
            path: BindingPath::parse("flags.showSnackbar"),
            source: "@state.flags.showSnackbar".into(),
        });
        assert_eq!(binding.source(), "@state.flags.showSnackbar");
        assert_eq!(
            binding.state_path().map(ToString::to_string).as_deref(),
            Some("flags.showSnackbar")
        );
    }
}
