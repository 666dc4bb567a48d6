//! Loading wireframe documents from JSON.
//!
//! The loader is lenient: sections of the wrong shape are skipped with a
//! warning so a half-written wireframe still previews. Only a non-object root
//! and duplicate tab ids are load failures.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use wirevana_core::{
    ast::*,
    tokens::*,
    LoadError,
};

use crate::grammar::parse_binding;

/// Keys of a component object that are not folded into props.
const COMPONENT_KEYS: &[&str] = &[
    "type",
    "id",
    "props",
    "style",
    "layout",
    "children",
    "content",
    "header",
    "footer",
    "template",
    "emptyView",
    "interactions",
    "row",
    "column",
    "component",
];

/// Keys that hold a child when their value is an object.
const SLOT_KEYS: &[&str] = &["content", "header", "footer", "template", "emptyView"];

/// Convert a parsed JSON value into a wireframe definition.
pub fn from_value(root: &Value) -> Result<WireframeDefinition, LoadError> {
    let Value::Object(root) = root else {
        return Err(LoadError::NotAnObject {
            what: "wireframe document".to_string(),
        });
    };

    let components = parse_component_map(root.get("components"), "components");
    let root_components = parse_component_map(root.get("rootComponents"), "rootComponents");
    let shell = parse_shell(root.get("shell"), root_components.get("shell"));
    let tabs = parse_tabs(root.get("tabs"), &shell, &components, &root_components)?;

    let definition = WireframeDefinition {
        name: str_field(root, "name").unwrap_or("Untitled wireframe").to_string(),
        description: str_field(root, "description").map(str::to_string),
        shell,
        tabs,
        pages: parse_pages(root.get("pages")),
        components,
        root_components,
        sample_data: object_or_empty(root.get("sampleData")),
        actions: parse_actions(root.get("actions")),
        state: object_or_empty(root.get("state")),
        style_library: parse_style_library(root.get("styleLibrary")),
    };

    debug!(
        name = %definition.name,
        tabs = definition.tabs.len(),
        pages = definition.pages.len(),
        components = definition.components.len(),
        "loaded wireframe"
    );

    Ok(definition)
}

fn str_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

fn object_or_empty(value: Option<&Value>) -> Value {
    match value {
        Some(value @ Value::Object(_)) => value.clone(),
        _ => Value::Object(Map::new()),
    }
}

fn as_object<'a>(value: Option<&'a Value>, section: &str) -> Option<&'a Map<String, Value>> {
    match value {
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            warn!(section, "expected an object, section ignored");
            None
        }
        None => None,
    }
}

fn parse_shell(shell: Option<&Value>, root_shell: Option<&ComponentDefinition>) -> ShellDefinition {
    let shell = shell.and_then(Value::as_object);
    let field = |key: &str| -> Option<String> {
        shell
            .and_then(|map| str_field(map, key))
            .or_else(|| root_shell.and_then(|def| def.literal_str(key)))
            .map(str::to_string)
    };

    ShellDefinition {
        title: field("title"),
        tab_bar: field("tabBar"),
        content: field("content"),
        style: shell
            .and_then(|map| map.get("style"))
            .and_then(parse_style_ref)
            .or_else(|| root_shell.and_then(|def| def.style.clone())),
    }
}

/// `tab-{index}`, bumped past ids other tabs already claim.
fn fallback_tab_id(index: usize, explicit: &[&str], tabs: &[TabDefinition]) -> String {
    (index..)
        .map(|n| format!("tab-{n}"))
        .find(|id| !explicit.contains(&id.as_str()) && !tabs.iter().any(|tab| &tab.id == id))
        .unwrap_or_default()
}

/// Parse `tabs` in object or array form, then apply the tab bar's ordering.
fn parse_tabs(
    value: Option<&Value>,
    shell: &ShellDefinition,
    components: &IndexMap<String, ComponentDefinition>,
    root_components: &IndexMap<String, ComponentDefinition>,
) -> Result<Vec<TabDefinition>, LoadError> {
    let mut tabs: Vec<TabDefinition> = Vec::new();

    match value {
        Some(Value::Object(map)) => {
            for (id, tab) in map {
                if let Some(tab) = parse_tab(id, tab) {
                    tabs.push(tab);
                }
            }
        }
        Some(Value::Array(items)) => {
            let explicit: Vec<&str> = items
                .iter()
                .filter_map(|tab| tab.get("id").and_then(Value::as_str))
                .collect();
            for (index, tab) in items.iter().enumerate() {
                let id = match tab.get("id").and_then(Value::as_str) {
                    Some(id) => id.to_string(),
                    None => fallback_tab_id(index, &explicit, &tabs),
                };
                if tabs.iter().any(|existing| existing.id == id) {
                    return Err(LoadError::DuplicateTab { id });
                }
                if let Some(tab) = parse_tab(&id, tab) {
                    tabs.push(tab);
                }
            }
        }
        Some(_) => warn!("expected tabs to be an object or array, tabs ignored"),
        None => {}
    }

    let tab_bar = shell
        .tab_bar
        .as_deref()
        .and_then(|id| root_components.get(id).or_else(|| components.get(id)))
        .filter(|def| def.kind == ComponentKind::TabBar);

    let Some(order) = tab_bar.and_then(|def| def.prop("tabs")) else {
        return Ok(tabs);
    };
    let PropValue::Value(Value::Array(order)) = order else {
        return Ok(tabs);
    };

    let mut ordered = Vec::with_capacity(tabs.len());
    for id in order.iter().filter_map(Value::as_str) {
        if ordered.iter().any(|tab: &TabDefinition| tab.id == id) {
            return Err(LoadError::DuplicateTab { id: id.to_string() });
        }
        match tabs.iter().position(|tab| tab.id == id) {
            Some(index) => ordered.push(tabs.remove(index)),
            None => warn!(tab = id, "tab bar lists an undeclared tab"),
        }
    }
    ordered.extend(tabs);
    Ok(ordered)
}

fn parse_tab(id: &str, value: &Value) -> Option<TabDefinition> {
    let Value::Object(map) = value else {
        warn!(tab = id, "tab definition is not an object, skipped");
        return None;
    };

    let target = if let Some(page) = str_field(map, "page") {
        TabTarget::Page(page.to_string())
    } else if let Some(content) = str_field(map, "content") {
        TabTarget::Content(content.to_string())
    } else {
        TabTarget::None
    };

    Some(TabDefinition {
        id: id.to_string(),
        title: str_field(map, "title").unwrap_or(id).to_string(),
        icon: str_field(map, "icon").map(str::to_string),
        target,
        style: map.get("style").and_then(parse_style_ref),
    })
}

fn parse_pages(value: Option<&Value>) -> IndexMap<String, PageDefinition> {
    let mut pages = IndexMap::new();
    let Some(map) = as_object(value, "pages") else {
        return pages;
    };

    for (id, page) in map {
        let Value::Object(page) = page else {
            warn!(page = %id, "page definition is not an object, skipped");
            continue;
        };
        let layout = page.get("layout").and_then(parse_child);
        pages.insert(
            id.clone(),
            PageDefinition {
                id: id.clone(),
                title: str_field(page, "title").map(str::to_string),
                style: page.get("style").and_then(parse_style_ref),
                layout,
            },
        );
    }
    pages
}

fn parse_component_map(value: Option<&Value>, section: &str) -> IndexMap<String, ComponentDefinition> {
    let mut components = IndexMap::new();
    let Some(map) = as_object(value, section) else {
        return components;
    };

    for (id, component) in map {
        match component {
            Value::Object(component) => {
                components.insert(id.clone(), parse_component(component));
            }
            _ => warn!(section, component = %id, "component definition is not an object, skipped"),
        }
    }
    components
}

fn parse_actions(value: Option<&Value>) -> IndexMap<String, Action> {
    let mut actions = IndexMap::new();
    let Some(map) = as_object(value, "actions") else {
        return actions;
    };

    for (name, action) in map {
        let Value::Object(action) = action else {
            warn!(action = %name, "action is not an object, skipped");
            continue;
        };
        let kind = match str_field(action, "type") {
            Some("command") => {
                ActionKind::Command(str_field(action, "command").unwrap_or(name.as_str()).to_string())
            }
            Some("popup") => {
                ActionKind::Popup(str_field(action, "target").unwrap_or_default().to_string())
            }
            other => ActionKind::Other(other.unwrap_or_default().to_string()),
        };
        actions.insert(
            name.clone(),
            Action {
                name: name.clone(),
                kind,
            },
        );
    }
    actions
}

fn parse_style_library(value: Option<&Value>) -> StyleLibrary {
    let mut library = StyleLibrary::new();
    let Some(map) = as_object(value, "styleLibrary") else {
        return library;
    };

    if let Some(Value::Object(styles)) = map.get("styles") {
        for (name, style) in styles {
            if let Value::Object(style) = style {
                library.styles.insert(name.clone(), parse_style_definition(style));
            }
        }
    }
    library.platform = str_field(map, "platform")
        .and_then(Platform::from_name)
        .unwrap_or_default();
    library.theme = str_field(map, "theme")
        .and_then(Theme::from_name)
        .unwrap_or_default();
    if let Some(Value::Object(brand)) = map.get("brandColors") {
        library.brand_colors = BrandColors {
            primary: str_field(brand, "primary").map(str::to_string),
            secondary: str_field(brand, "secondary").map(str::to_string),
            accent: str_field(brand, "accent").map(str::to_string),
        };
    }
    library
}

/// Parse a semantic style object. Unknown token names are dropped.
pub fn parse_style_definition(map: &Map<String, Value>) -> StyleDefinition {
    fn token<T>(map: &Map<String, Value>, key: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
        let raw = str_field(map, key)?;
        let parsed = parse(raw);
        if parsed.is_none() {
            debug!(key, value = raw, "unknown style token ignored");
        }
        parsed
    }

    StyleDefinition {
        surface: token(map, "surface", SurfaceLevel::from_name),
        color_role: token(map, "colorRole", ColorRole::from_name),
        variant: token(map, "variant", Variant::from_name),
        text_style: token(map, "textStyle", TextStyle::from_name),
        platform: token(map, "platform", Platform::from_name),
    }
}

fn parse_style_ref(value: &Value) -> Option<StyleRef> {
    match value {
        Value::String(name) => Some(StyleRef::Named(name.clone())),
        Value::Object(map) => Some(StyleRef::Inline(parse_style_definition(map))),
        _ => None,
    }
}

fn parse_prop(value: &Value) -> PropValue {
    match value {
        Value::String(text) => PropValue::Binding(parse_binding(text)),
        other => PropValue::Value(other.clone()),
    }
}

/// `onToggle: "actions.x"` style props are interactions in disguise.
fn event_prop_name(key: &str) -> Option<&str> {
    let event = key.strip_prefix("on")?;
    event
        .chars()
        .next()
        .filter(char::is_ascii_uppercase)
        .map(|_| event)
}

fn parse_placement(map: &Map<String, Value>) -> GridPlacement {
    let index = |key: &str| map.get(key).and_then(Value::as_u64).map(|n| n as u32);
    GridPlacement {
        row: index("row"),
        column: index("column"),
    }
}

/// Parse a component definition object.
pub fn parse_component(map: &Map<String, Value>) -> ComponentDefinition {
    let kind = ComponentKind::from_name(str_field(map, "type").unwrap_or_default());
    let mut def = ComponentDefinition::new(kind);

    if let Some(Value::Object(props)) = map.get("props") {
        for (key, value) in props {
            if SLOT_KEYS.contains(&key.as_str()) && value.is_object() {
                set_slot(&mut def.slots, key, value);
                continue;
            }
            if let (Some(event), Value::String(action)) = (event_prop_name(key), value) {
                def.interactions.insert(event.to_string(), action.clone());
                continue;
            }
            if key == "style" {
                def.style = parse_style_ref(value);
                continue;
            }
            def.props.insert(key.clone(), parse_prop(value));
        }
    }

    // Explicit `props` win over folded top-level keys.
    for (key, value) in map {
        if COMPONENT_KEYS.contains(&key.as_str()) || def.props.contains_key(key) {
            continue;
        }
        def.props.insert(key.clone(), parse_prop(value));
    }

    if let Some(style) = map.get("style").and_then(parse_style_ref) {
        def.style = Some(style);
    }

    if let Some(layout) = map.get("layout").and_then(parse_child) {
        def.layout = Some(Box::new(layout));
    }

    if let Some(Value::Array(children)) = map.get("children") {
        def.children = children.iter().filter_map(parse_child).collect();
    }

    for key in SLOT_KEYS {
        if let Some(value) = map.get(*key).filter(|value| value.is_object()) {
            set_slot(&mut def.slots, key, value);
        }
    }

    match map.get("component") {
        Some(Value::String(id)) => {
            def.slots.content = Some(Box::new(LayoutChild::reference(id.clone())));
        }
        Some(Value::Object(inner)) => {
            let inner = parse_component(inner);
            def.slots.content = Some(Box::new(LayoutChild::inline(inner)));
        }
        _ => {}
    }

    if let Some(Value::Object(interactions)) = map.get("interactions") {
        for (event, action) in interactions {
            if let Value::String(action) = action {
                def.interactions.insert(event.clone(), action.clone());
            }
        }
    }

    // Non-string top-level `content` (e.g. a shell's page id) is already a prop.
    if let Some(Value::String(content)) = map.get("content") {
        def.props
            .entry("content".to_string())
            .or_insert_with(|| PropValue::literal(content.clone()));
    }

    def.placement = parse_placement(map);
    def
}

fn set_slot(slots: &mut Slots, key: &str, value: &Value) {
    let Some(child) = parse_child(value) else {
        return;
    };
    let child = Some(Box::new(child));
    match key {
        "content" => slots.content = child,
        "header" => slots.header = child,
        "footer" => slots.footer = child,
        "template" => slots.template = child,
        "emptyView" => slots.empty_view = child,
        _ => {}
    }
}

/// Parse one entry of a child list or slot.
pub fn parse_child(value: &Value) -> Option<LayoutChild> {
    let Value::Object(map) = value else {
        warn!("layout child is not an object, skipped");
        return None;
    };

    let kind = str_field(map, "type");

    if let (None, Some(id)) = (kind, str_field(map, "component")) {
        let mut reference = ComponentRef::new(id);
        if let Some(Value::Object(props)) = map.get("props") {
            for (key, value) in props {
                reference.props.insert(key.clone(), parse_prop(value));
            }
        }
        reference.style = map.get("style").and_then(parse_style_ref);
        reference.slot = str_field(map, "slot").map(str::to_string);
        reference.placement = parse_placement(map);
        return Some(LayoutChild::Reference(reference));
    }

    if kind.is_none() {
        warn!("layout child has neither a type nor a component reference, skipped");
        return None;
    }

    let def = parse_component(map);

    // A bare DataTemplate wrapper stands for its component.
    if def.kind == ComponentKind::DataTemplate && !def.props.contains_key("items") {
        if let Some(inner) = def.slots.content.clone() {
            return Some(*inner);
        }
    }

    Some(LayoutChild::inline(def))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wirevana_core::binding::Binding;

    fn component(value: Value) -> ComponentDefinition {
        match value {
            Value::Object(map) => parse_component(&map),
            _ => panic!("test component must be an object"),
        }
    }

    #[test]
    fn test_root_must_be_object() {
        assert!(matches!(
            from_value(&json!([1, 2])),
            Err(LoadError::NotAnObject { .. })
        ));
    }

    #[test]
    fn test_minimal_document() {
        let def = from_value(&json!({ "name": "Empty" })).unwrap();
        assert_eq!(def.name, "Empty");
        assert!(def.tabs.is_empty());
        assert!(def.sample_data.is_object());
        assert!(def.state.is_object());
    }

    #[test]
    fn test_tabs_object_form_keeps_order() {
        let def = from_value(&json!({
            "tabs": {
                "Home": { "title": "Home", "page": "HomePage" },
                "List": { "title": "List", "content": "ListContent" },
            }
        }))
        .unwrap();

        let ids: Vec<_> = def.tabs.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["Home", "List"]);
        assert_eq!(def.tabs[0].target, TabTarget::Page("HomePage".into()));
        assert_eq!(def.tabs[1].target, TabTarget::Content("ListContent".into()));
    }

    #[test]
    fn test_fallback_tab_id_skips_explicit_ids() {
        let ids = |tabs: Value| -> Vec<String> {
            let def = from_value(&json!({ "tabs": tabs })).unwrap();
            def.tabs.into_iter().map(|t| t.id).collect()
        };

        assert_eq!(
            ids(json!([{ "id": "tab-1", "page": "A" }, { "page": "B" }])),
            vec!["tab-1", "tab-2"]
        );
        assert_eq!(
            ids(json!([{ "page": "A" }, { "id": "tab-0", "page": "B" }])),
            vec!["tab-1", "tab-0"]
        );
    }

    #[test]
    fn test_duplicate_tab_in_array_form() {
        let result = from_value(&json!({
            "tabs": [
                { "id": "Home", "page": "A" },
                { "id": "Home", "page": "B" },
            ]
        }));
        assert!(matches!(result, Err(LoadError::DuplicateTab { id }) if id == "Home"));
    }

    #[test]
    fn test_tab_bar_orders_tabs() {
        let def = from_value(&json!({
            "shell": { "tabBar": "Bar" },
            "tabs": {
                "A": { "page": "PA" },
                "B": { "page": "PB" },
                "C": { "page": "PC" },
            },
            "rootComponents": {
                "Bar": { "type": "TabBar", "tabs": ["C", "A"] }
            }
        }))
        .unwrap();

        let ids: Vec<_> = def.tabs.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_duplicate_tab_in_tab_bar() {
        let result = from_value(&json!({
            "shell": { "tabBar": "Bar" },
            "tabs": { "A": { "page": "PA" } },
            "rootComponents": { "Bar": { "type": "TabBar", "tabs": ["A", "A"] } }
        }));
        assert!(matches!(result, Err(LoadError::DuplicateTab { .. })));
    }

    #[test]
    fn test_shell_content_from_root_components() {
        let def = from_value(&json!({
            "shell": { "title": "Todos" },
            "pages": { "TodoPage": { "layout": { "type": "VerticalStack" } } },
            "rootComponents": { "shell": { "type": "Shell", "content": "TodoPage" } }
        }))
        .unwrap();
        assert_eq!(def.shell.title.as_deref(), Some("Todos"));
        assert_eq!(def.shell.content.as_deref(), Some("TodoPage"));
        assert_eq!(def.fallback_page_id(), Some("TodoPage"));
    }

    #[test]
    fn test_layout_may_reference_a_component() {
        let def = from_value(&json!({
            "pages": { "P": { "layout": { "component": "Root" } } },
            "components": {
                "Root": { "type": "Label", "text": "Hello" },
                "Card": { "type": "Border", "layout": { "component": "Root" } }
            }
        }))
        .unwrap();
        assert_eq!(def.page("P").unwrap().layout, Some(LayoutChild::reference("Root")));

        let card = def.component("Card").unwrap();
        let children: Vec<_> = card.all_children().collect();
        assert_eq!(children, vec![&LayoutChild::reference("Root")]);
    }

    #[test]
    fn test_props_are_parsed_to_bindings() {
        let def = component(json!({
            "type": "Label",
            "props": { "text": "{binding name}", "size": 12 }
        }));
        assert!(matches!(
            def.prop("text"),
            Some(PropValue::Binding(Binding::ItemBinding(_)))
        ));
        assert_eq!(def.prop("size"), Some(&PropValue::Value(json!(12))));
    }

    #[test]
    fn test_top_level_keys_fold_into_props() {
        let def = component(json!({
            "type": "VerticalStack",
            "spacing": 16,
            "props": { "padding": "standard" },
            "children": []
        }));
        assert_eq!(def.prop("spacing"), Some(&PropValue::Value(json!(16))));
        assert_eq!(def.literal_str("padding"), Some("standard"));

        let explicit = component(json!({
            "type": "Grid",
            "gap": 4,
            "props": { "gap": 8 }
        }));
        assert_eq!(explicit.prop("gap"), Some(&PropValue::Value(json!(8))));
    }

    #[test]
    fn test_slots_lifted_from_props_and_top_level() {
        let def = component(json!({
            "type": "CollectionView",
            "props": {
                "items": "@sampleData.loans",
                "emptyView": { "component": "EmptyLoans" }
            },
            "template": { "type": "DataTemplate", "component": "LoanCard" },
            "footer": { "component": "LoansFooter" }
        }));

        assert!(def.prop("emptyView").is_none());
        assert_eq!(
            def.slots.empty_view.as_deref(),
            Some(&LayoutChild::reference("EmptyLoans"))
        );
        // The DataTemplate wrapper unwraps to its component.
        assert_eq!(
            def.slots.template.as_deref(),
            Some(&LayoutChild::reference("LoanCard"))
        );
        assert_eq!(
            def.slots.footer.as_deref(),
            Some(&LayoutChild::reference("LoansFooter"))
        );
    }

    #[test]
    fn test_data_template_with_items_is_kept() {
        let child = parse_child(&json!({
            "type": "DataTemplate",
            "props": { "items": "@sampleData.items" },
            "component": { "type": "Label", "props": { "text": "{binding name}" } }
        }));
        match child {
            Some(LayoutChild::Inline(def)) => {
                assert_eq!(def.kind, ComponentKind::DataTemplate);
                assert!(matches!(
                    def.slots.content.as_deref(),
                    Some(LayoutChild::Inline(_))
                ));
            }
            other => panic!("expected inline DataTemplate, got {other:?}"),
        }
    }

    #[test]
    fn test_reference_child_overrides() {
        let child = parse_child(&json!({
            "component": "HeroCard",
            "row": 1,
            "style": "card-elevated",
            "props": { "header": "Hi" }
        }));
        match child {
            Some(LayoutChild::Reference(reference)) => {
                assert_eq!(reference.id, "HeroCard");
                assert_eq!(reference.placement.row, Some(1));
                assert_eq!(reference.style, Some(StyleRef::Named("card-elevated".into())));
                assert_eq!(reference.props.get("header"), Some(&PropValue::literal("Hi")));
            }
            other => panic!("expected reference, got {other:?}"),
        }
    }

    #[test]
    fn test_prop_style_becomes_style_ref() {
        let def = component(json!({
            "type": "Label",
            "props": { "text": "8", "style": "display-hero" }
        }));
        assert_eq!(def.style, Some(StyleRef::Named("display-hero".into())));
        assert!(def.prop("style").is_none());
    }

    #[test]
    fn test_event_props_become_interactions() {
        let def = component(json!({
            "type": "Switch",
            "props": { "isToggled": "@state.remindersEnabled", "onToggle": "actions.toggleReminders" }
        }));
        assert_eq!(def.interaction(&["Toggle"]), Some("actions.toggleReminders"));
        assert!(def.prop("onToggle").is_none());
    }

    #[test]
    fn test_style_library() {
        let def = from_value(&json!({
            "styleLibrary": {
                "styles": {
                    "app-header": { "surface": "level1", "colorRole": "primary", "textStyle": "headline-large", "platform": "auto" },
                    "odd": { "surface": "level9" }
                },
                "platform": "ios",
                "brandColors": { "primary": "#2563eb" }
            }
        }))
        .unwrap();

        let library = &def.style_library;
        assert_eq!(library.platform, Platform::Ios);
        assert_eq!(library.brand_colors.primary.as_deref(), Some("#2563eb"));

        let header = library.get("app-header").unwrap();
        assert_eq!(header.surface, Some(SurfaceLevel::Level1));
        assert_eq!(header.text_style, Some(TextStyle::HeadlineLarge));
        assert_eq!(header.platform, Some(Platform::Auto));

        assert_eq!(library.get("odd").unwrap().surface, None);
    }

    #[test]
    fn test_actions() {
        let def = from_value(&json!({
            "actions": {
                "open": { "type": "popup", "target": "Editor" },
                "save": { "type": "command", "command": "notes.save" },
                "weird": { "type": "navigate" }
            }
        }))
        .unwrap();
        assert_eq!(def.action("open").unwrap().kind, ActionKind::Popup("Editor".into()));
        assert_eq!(
            def.action("actions.save").unwrap().kind,
            ActionKind::Command("notes.save".into())
        );
        assert_eq!(def.action("weird").unwrap().kind, ActionKind::Other("navigate".into()));
    }
}
