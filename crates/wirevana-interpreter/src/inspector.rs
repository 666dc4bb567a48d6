//! Static checks over a loaded wireframe.
//!
//! None of these stop a preview from rendering; the interpreter already
//! degrades every case below to something visible. The inspector lists them
//! so a wireframe author can see why a placeholder appeared.

use serde::Serialize;
use std::fmt;

use wirevana_core::{ast::*, binding::Binding, tokens::StyleRef};
use wirevana_resolver::{Converter, StyleResolver};

/// Action names the session handles without a declaration.
pub const BUILTIN_ACTIONS: &[&str] = &["closePopup", "dismissSnackbar", "showSnackbar"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

/// One finding, located by a path like `components.LoanCard/children/0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub component: String,
    pub message: String,
}

impl Diagnostic {
    fn warning(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            component: component.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}: {}", self.severity, self.component, self.message)
    }
}

/// Run every check over `definition`.
pub fn inspect(definition: &WireframeDefinition, styles: &StyleResolver<'_>) -> Vec<Diagnostic> {
    let mut inspector = Inspector {
        definition,
        styles,
        found: Vec::new(),
    };
    inspector.run();
    inspector.found
}

struct Inspector<'a, 'r> {
    definition: &'a WireframeDefinition,
    styles: &'r StyleResolver<'a>,
    found: Vec<Diagnostic>,
}

impl Inspector<'_, '_> {
    fn run(&mut self) {
        let definition = self.definition;

        for tab in &definition.tabs {
            let location = format!("tabs.{}", tab.id);
            match definition.tab_page_id(tab) {
                None => self.warn(&location, "Tab has no page"),
                Some(page) if definition.page(page).is_none() => {
                    self.warn(&location, format!("Tab points at missing page '{page}'"))
                }
                Some(_) => {}
            }
            self.check_style(&location, tab.style.as_ref());
        }

        if let Some(bar) = definition.shell.tab_bar.as_deref() {
            if definition.component(bar).is_none() {
                self.warn("shell", format!("Tab bar '{bar}' is not defined"));
            }
        }
        self.check_style("shell", definition.shell.style.as_ref());

        for (id, page) in &definition.pages {
            let location = format!("pages.{id}");
            self.check_style(&location, page.style.as_ref());
            if let Some(layout) = &page.layout {
                self.check_child(&format!("{location}/layout"), layout);
            }
        }

        for (id, def) in definition.components.iter().chain(&definition.root_components) {
            self.check_definition(&format!("components.{id}"), def);
        }
    }

    fn warn(&mut self, location: &str, message: impl Into<String>) {
        self.found.push(Diagnostic::warning(location, message));
    }

    fn check_style(&mut self, location: &str, style: Option<&StyleRef>) {
        if let Some(StyleRef::Named(name)) = style {
            if !self.styles.is_known(name) {
                self.warn(location, format!("Unknown style '{name}'"));
            }
        }
    }

    fn check_props(&mut self, location: &str, props: &PropMap) {
        for (key, prop) in props {
            let Some(converter) = prop.as_binding().and_then(Binding::converter) else {
                continue;
            };
            if Converter::from_name(converter).is_none() {
                self.warn(location, format!("Unknown converter '{converter}' in '{key}'"));
            }
        }
    }

    fn check_definition(&mut self, location: &str, def: &ComponentDefinition) {
        if let ComponentKind::Unknown(name) = &def.kind {
            self.warn(location, format!("Unknown component type '{name}'"));
        }
        self.check_style(location, def.style.as_ref());
        self.check_props(location, &def.props);

        match ComponentProps::from_map(&def.kind, &def.props) {
            ComponentProps::Button { text: None, icon: None, .. } => {
                self.warn(location, "Button has neither text nor icon")
            }
            ComponentProps::Border { variant: None, .. } if def.style.is_none() => {
                self.warn(location, "Border has neither a style nor a variant")
            }
            ComponentProps::Collection { items: None, .. } if def.kind == ComponentKind::CollectionView => {
                self.warn(location, "CollectionView has no items")
            }
            _ => {}
        }

        for action in def.interactions.values() {
            let name = strip_action_prefix(action);
            if self.definition.action(name).is_none() && !BUILTIN_ACTIONS.contains(&name) {
                self.warn(location, format!("Interaction targets undeclared action '{action}'"));
            }
        }

        if let Some(layout) = &def.layout {
            self.check_child(&format!("{location}/layout"), layout);
        }
        for (index, child) in def.children.iter().enumerate() {
            self.check_child(&format!("{location}/children/{index}"), child);
        }

        let slots = [
            ("content", &def.slots.content),
            ("header", &def.slots.header),
            ("footer", &def.slots.footer),
            ("template", &def.slots.template),
            ("emptyView", &def.slots.empty_view),
        ];
        for (name, slot) in slots {
            if let Some(child) = slot {
                self.check_child(&format!("{location}/{name}"), child);
            }
        }
    }

    fn check_child(&mut self, location: &str, child: &LayoutChild) {
        match child {
            LayoutChild::Reference(reference) => {
                if self.definition.component(&reference.id).is_none() {
                    self.warn(location, format!("Reference to missing component '{}'", reference.id));
                }
                self.check_style(location, reference.style.as_ref());
                self.check_props(location, &reference.props);
            }
            LayoutChild::Inline(def) => self.check_definition(location, def),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirevana_parser::parse_document;
    use wirevana_resolver::ResolverConfig;

    fn diagnostics(json: &str) -> Vec<Diagnostic> {
        let definition = parse_document(json).unwrap();
        let styles = StyleResolver::new(&definition.style_library, ResolverConfig::default());
        inspect(&definition, &styles)
    }

    fn messages(json: &str) -> Vec<String> {
        diagnostics(json).into_iter().map(|d| d.message).collect()
    }

    #[test]
    fn test_clean_document() {
        let found = diagnostics(
            r#"{
                "tabs": { "Home": { "title": "Home", "page": "HomePage" } },
                "pages": { "HomePage": { "layout": { "type": "VerticalStack", "children": [
                    { "type": "Button", "text": "Go", "style": "primary-button" }
                ] } } }
            }"#,
        );
        assert!(found.is_empty(), "{found:?}");
    }

    #[test]
    fn test_component_checks() {
        let found = messages(
            r#"{
                "components": {
                    "Empty": { "type": "Button" },
                    "Plain": { "type": "Border" },
                    "List": { "type": "CollectionView" },
                    "Odd": { "type": "Carousel" }
                }
            }"#,
        );
        assert_eq!(
            found,
            vec![
                "Button has neither text nor icon",
                "Border has neither a style nor a variant",
                "CollectionView has no items",
                "Unknown component type 'Carousel'",
            ]
        );
    }

    #[test]
    fn test_reference_style_and_converter() {
        let found = diagnostics(
            r#"{
                "pages": { "P": { "layout": { "type": "VerticalStack", "children": [
                    { "component": "Ghost" },
                    { "type": "Label", "text": "{binding due, Converter=Sideways}", "style": "no-such-style" }
                ] } } }
            }"#,
        );
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].component, "pages.P/layout/children/0");
        assert_eq!(found[0].message, "Reference to missing component 'Ghost'");
        assert!(found.iter().any(|d| d.message == "Unknown style 'no-such-style'"));
        assert!(found.iter().any(|d| d.message.starts_with("Unknown converter 'Sideways'")));
    }

    #[test]
    fn test_tab_without_page() {
        let found = messages(r#"{ "tabs": { "Lost": { "title": "Lost" }, "Gone": { "page": "Nowhere" } } }"#);
        assert_eq!(found, vec!["Tab has no page", "Tab points at missing page 'Nowhere'"]);
    }

    #[test]
    fn test_builtin_actions_are_not_flagged() {
        let found = messages(
            r#"{
                "components": {
                    "Close": { "type": "Button", "text": "Close", "interactions": { "Clicked": "actions.closePopup" } },
                    "Broken": { "type": "Button", "text": "Save", "interactions": { "Clicked": "actions.save" } }
                }
            }"#,
        );
        assert_eq!(found, vec!["Interaction targets undeclared action 'actions.save'"]);
    }
}
