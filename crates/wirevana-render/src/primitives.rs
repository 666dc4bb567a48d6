//! The primitive component library.
//!
//! Every builder is a plain function from already-resolved values to a
//! [`VisualNode`]. Bindings, styles and session state are resolved by the
//! interpreter before a builder is called, so nothing here reads the document.

use serde_json::Value;
use wirevana_core::{
    ast::ComponentKind,
    tokens::{ColorRole, StyleDefinition, SurfaceLevel, TextStyle, Variant},
    types::Spacing,
    value::display,
};
use wirevana_resolver::builtin_style;

use crate::icons::icon_symbol;
use crate::node::*;

/// Swipe action background when none is given.
pub const DEFAULT_SWIPE_BACKGROUND: &str = "#ef4444";

/// Default icon size in px.
pub const DEFAULT_ICON_SIZE: f32 = 24.0;

/// The look a primitive has before the use site's own style is layered on.
pub fn default_style(kind: &ComponentKind, appearance: Option<&str>) -> StyleDefinition {
    let named = |name: &str| builtin_style(name).unwrap_or_default();
    match kind {
        ComponentKind::Button => match appearance.map(str::trim) {
            Some("outlined") => named("button-outlined"),
            Some("text") => named("button-text"),
            Some("tonal") | Some("secondary") => named("secondary-button"),
            Some("destructive") => named("button-destructive"),
            _ => named("primary-button"),
        },
        ComponentKind::FabButton => StyleDefinition::surface(SurfaceLevel::Level3, ColorRole::Primary)
            .with_variant(Variant::Tonal)
            .with_text_style(TextStyle::LabelLarge),
        ComponentKind::Border => match appearance.map(str::trim) {
            Some("elevated") => named("card-elevated"),
            Some("outlined") => named("card-outlined"),
            _ => named("card-default"),
        },
        ComponentKind::Entry
        | ComponentKind::Editor
        | ComponentKind::Picker
        | ComponentKind::DatePicker
        | ComponentKind::TimePicker => StyleDefinition::surface(SurfaceLevel::Level0, ColorRole::Surface)
            .with_variant(Variant::Outlined)
            .with_text_style(TextStyle::BodyLarge),
        ComponentKind::Popup => named("surface-modal"),
        ComponentKind::Snackbar => StyleDefinition::surface(SurfaceLevel::Level3, ColorRole::Surface)
            .with_text_style(TextStyle::BodyMedium),
        ComponentKind::TabBar | ComponentKind::Tab => {
            StyleDefinition::surface(SurfaceLevel::Level2, ColorRole::Surface)
                .with_text_style(TextStyle::LabelMedium)
        }
        ComponentKind::Shell | ComponentKind::ContentPage => {
            StyleDefinition::surface(SurfaceLevel::Level0, ColorRole::Surface)
        }
        _ => StyleDefinition::surface(SurfaceLevel::Level0, ColorRole::Surface),
    }
}

/// Resolve a spacing prop, falling back to `default`.
pub fn spacing(value: &Value, default: Spacing) -> Spacing {
    Spacing::from_value(value).unwrap_or(default)
}

/// Grid track list to CSS: `*` and `2*` become `fr` units, numbers px.
///
/// Accepts an array or a comma separated string.
pub fn grid_tracks(value: &Value) -> Vec<String> {
    let track = |raw: &str| -> String {
        let raw = raw.trim();
        if raw == "*" {
            return "1fr".to_string();
        }
        if let Some(weight) = raw.strip_suffix('*') {
            if weight.parse::<f32>().is_ok() {
                return format!("{}fr", weight);
            }
        }
        if raw.parse::<f32>().is_ok() {
            return format!("{}px", raw);
        }
        raw.to_string()
    };

    match value {
        Value::Array(items) => items.iter().map(|item| track(&display(item))).collect(),
        Value::String(text) => text
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(track)
            .collect(),
        Value::Number(n) => (0..n.as_u64().unwrap_or(0)).map(|_| "1fr".to_string()).collect(),
        _ => Vec::new(),
    }
}

pub fn label(id: impl Into<String>, text: String, decoration: Option<String>) -> VisualNode {
    let decoration = decoration.filter(|d| !d.is_empty() && d != "none");
    VisualNode::new(
        id,
        NodeKind::Text {
            text,
            decoration,
            align: None,
        },
    )
}

pub fn icon(id: impl Into<String>, name: &str, size: Option<f32>) -> VisualNode {
    VisualNode::new(
        id,
        NodeKind::Icon {
            name: name.to_string(),
            glyph: icon_symbol(name),
            size: size.unwrap_or(DEFAULT_ICON_SIZE),
        },
    )
}

/// A button; `action` becomes an invoke interaction.
pub fn button(
    id: impl Into<String>,
    text: Option<String>,
    icon: Option<&str>,
    action: Option<Interaction>,
) -> VisualNode {
    let node = VisualNode::new(
        id,
        NodeKind::Button {
            text: text.unwrap_or_default(),
            glyph: icon.map(icon_symbol),
        },
    );
    match action {
        Some(action) => node.with_interaction(action),
        None => node,
    }
}

pub fn fab(
    id: impl Into<String>,
    label: Option<String>,
    icon: Option<&str>,
    action: Option<Interaction>,
) -> VisualNode {
    let node = VisualNode::new(
        id,
        NodeKind::Fab {
            label,
            glyph: icon_symbol(icon.unwrap_or("add")),
        },
    );
    match action {
        Some(action) => node.with_interaction(action),
        None => node,
    }
}

/// Card with optional header and footer text. Padding defaults to standard.
pub fn border(
    id: impl Into<String>,
    header: Option<String>,
    footer: Option<String>,
    padding: Spacing,
    background: Option<String>,
    children: Vec<VisualNode>,
) -> VisualNode {
    VisualNode::new(
        id,
        NodeKind::Card {
            header,
            footer,
            padding: padding.padding(),
            background,
        },
    )
    .with_children(children)
}

pub fn stack(
    id: impl Into<String>,
    direction: Direction,
    gap: Spacing,
    padding: Option<Spacing>,
    children: Vec<VisualNode>,
) -> VisualNode {
    VisualNode::new(
        id,
        NodeKind::Stack {
            direction,
            gap: gap.gap(),
            padding: padding.map_or(0.0, Spacing::padding),
        },
    )
    .with_children(children)
}

pub fn grid(
    id: impl Into<String>,
    rows: Vec<String>,
    columns: Vec<String>,
    gap: Spacing,
    children: Vec<VisualNode>,
) -> VisualNode {
    VisualNode::new(
        id,
        NodeKind::Grid {
            rows,
            columns,
            gap: gap.gap(),
        },
    )
    .with_children(children)
}

pub fn flex(
    id: impl Into<String>,
    direction: Direction,
    wrap: bool,
    gap: Spacing,
    children: Vec<VisualNode>,
) -> VisualNode {
    VisualNode::new(
        id,
        NodeKind::Flex {
            direction,
            wrap,
            gap: gap.gap(),
        },
    )
    .with_children(children)
}

pub fn overlay(id: impl Into<String>, children: Vec<VisualNode>) -> VisualNode {
    VisualNode::new(id, NodeKind::Overlay).with_children(children)
}

/// A list. With no items the empty view (if any) takes their place.
pub fn collection(
    id: impl Into<String>,
    header: Option<VisualNode>,
    items: Vec<VisualNode>,
    footer: Option<VisualNode>,
    empty_view: Option<VisualNode>,
) -> VisualNode {
    let count = items.len();
    let mut children = Vec::with_capacity(count + 2);
    children.extend(header);
    if items.is_empty() {
        children.extend(empty_view);
    } else {
        children.extend(items);
    }
    children.extend(footer);
    VisualNode::new(id, NodeKind::Collection { count }).with_children(children)
}

/// One template instance inside a collection.
pub fn collection_item(id: impl Into<String>, index: usize, content: VisualNode) -> VisualNode {
    VisualNode::new(id, NodeKind::CollectionItem { index }).with_child(content)
}

pub fn empty_view(id: impl Into<String>, content: Option<VisualNode>) -> VisualNode {
    let node = VisualNode::new(id, NodeKind::EmptyView);
    match content {
        Some(content) => node.with_child(content),
        None => node,
    }
}

/// Read swipe items: `[{ content, background?, action? }]`.
pub fn swipe_actions(value: &Value) -> Vec<SwipeAction> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| match item {
            Value::Object(fields) => SwipeAction {
                label: fields
                    .get("content")
                    .or_else(|| fields.get("text"))
                    .map(display)
                    .unwrap_or_default(),
                background: fields
                    .get("background")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_SWIPE_BACKGROUND)
                    .to_string(),
                action: fields
                    .get("action")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            other => SwipeAction {
                label: display(other),
                background: DEFAULT_SWIPE_BACKGROUND.to_string(),
                action: None,
            },
        })
        .collect()
}

pub fn swipe(
    id: impl Into<String>,
    left: Vec<SwipeAction>,
    right: Vec<SwipeAction>,
    content: Option<VisualNode>,
) -> VisualNode {
    let node = VisualNode::new(id, NodeKind::Swipe { left, right });
    match content {
        Some(content) => node.with_child(content),
        None => node,
    }
}

/// Resolved props of an `Entry` or `Editor`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFieldSpec {
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub value: String,
    pub helper: Option<String>,
    pub error: Option<String>,
    pub secure: bool,
    pub multiline: bool,
}

pub fn text_field(id: impl Into<String>, spec: TextFieldSpec, target: ValueTarget) -> VisualNode {
    VisualNode::new(
        id,
        NodeKind::TextField {
            label: spec.label,
            placeholder: spec.placeholder,
            value: spec.value,
            helper: spec.helper,
            error: spec.error,
            secure: spec.secure,
            multiline: spec.multiline,
        },
    )
    .with_interaction(Interaction::EditText { target })
}

/// One picker entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerOption {
    pub label: String,
    pub value: Value,
}

/// Read picker options. Records use `label_path`/`value_path` (default
/// `label`/`value`); scalars are their own label and value.
pub fn picker_options(value: &Value, label_path: Option<&str>, value_path: Option<&str>) -> Vec<PickerOption> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    let label_key = label_path.unwrap_or("label");
    let value_key = value_path.unwrap_or("value");
    items
        .iter()
        .map(|item| match item {
            Value::Object(fields) => {
                let value = fields
                    .get(value_key)
                    .cloned()
                    .unwrap_or_else(|| item.clone());
                let label = fields
                    .get(label_key)
                    .map(display)
                    .unwrap_or_else(|| display(&value));
                PickerOption { label, value }
            }
            scalar => PickerOption {
                label: display(scalar),
                value: scalar.clone(),
            },
        })
        .collect()
}

/// A picker. With zero options it is disabled and has no interaction.
pub fn picker(
    id: impl Into<String>,
    label: Option<String>,
    options: &[PickerOption],
    selected: &Value,
    target: ValueTarget,
) -> VisualNode {
    let current = options.iter().position(|option| &option.value == selected);
    let node = VisualNode::new(
        id,
        NodeKind::Picker {
            label,
            selected_label: current.map(|index| options[index].label.clone()),
            option_count: options.len(),
            disabled: options.is_empty(),
        },
    );
    if options.is_empty() {
        return node;
    }
    node.with_interaction(Interaction::CyclePicker {
        target,
        options: options.iter().map(|option| option.value.clone()).collect(),
        current,
    })
}

pub fn date_time(id: impl Into<String>, label: Option<String>, value: String, mode: DateTimeMode) -> VisualNode {
    VisualNode::new(id, NodeKind::DateTime { label, value, mode })
}

pub fn toggle(
    id: impl Into<String>,
    label: Option<String>,
    on: bool,
    style: ToggleStyle,
    target: ValueTarget,
    then: Option<String>,
) -> VisualNode {
    VisualNode::new(id, NodeKind::Toggle { label, on, style }).with_interaction(Interaction::Toggle {
        target,
        current: on,
        then,
    })
}

pub fn radio_group(id: impl Into<String>, label: Option<String>, children: Vec<VisualNode>) -> VisualNode {
    VisualNode::new(id, NodeKind::RadioGroup { label }).with_children(children)
}

pub fn radio(id: impl Into<String>, label: String, value: Value, selected: bool, target: ValueTarget) -> VisualNode {
    VisualNode::new(id, NodeKind::Radio { label, selected })
        .with_interaction(Interaction::SelectRadio { target, value })
}

/// Modal overlay. Clicking the scrim closes it; so does the close button.
pub fn popup(
    id: impl Into<String>,
    popup_id: &str,
    title: Option<String>,
    content: Vec<VisualNode>,
    footer: Option<VisualNode>,
) -> VisualNode {
    let id = id.into();
    let close = VisualNode::new(
        format!("{id}/close"),
        NodeKind::Button {
            text: String::new(),
            glyph: Some(icon_symbol("close")),
        },
    )
    .with_interaction(Interaction::ClosePopup);

    let mut children = vec![close];
    children.extend(content);
    children.extend(footer);

    VisualNode::new(
        id,
        NodeKind::Popup {
            id: popup_id.to_string(),
            title,
        },
    )
    .with_children(children)
    .with_interaction(Interaction::ClosePopup)
}

/// Snackbar with an optional action and a dismiss button.
pub fn snackbar(
    id: impl Into<String>,
    message: String,
    action_label: Option<String>,
    action: Option<String>,
) -> VisualNode {
    let id = id.into();
    let mut children = Vec::new();
    if let Some(text) = action_label.clone() {
        children.push(
            VisualNode::new(format!("{id}/action"), NodeKind::Button { text, glyph: None })
                .with_interaction(Interaction::SnackbarAction { action }),
        );
    }
    children.push(
        VisualNode::new(
            format!("{id}/dismiss"),
            NodeKind::Button {
                text: String::new(),
                glyph: Some(icon_symbol("close")),
            },
        )
        .with_interaction(Interaction::DismissSnackbar),
    );

    VisualNode::new(id, NodeKind::Snackbar { message, action_label }).with_children(children)
}

/// Resolved tab entry for the tab bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSpec {
    pub id: String,
    pub title: String,
    pub icon: Option<String>,
    pub active: bool,
}

pub fn tab_bar(id: impl Into<String>, tabs: Vec<TabSpec>) -> VisualNode {
    let id = id.into();
    let children = tabs
        .into_iter()
        .map(|tab| {
            let glyph = icon_symbol(tab.icon.as_deref().unwrap_or("home"));
            VisualNode::new(
                format!("{id}/{}", tab.id),
                NodeKind::Tab {
                    id: tab.id.clone(),
                    title: tab.title,
                    glyph,
                    active: tab.active,
                },
            )
            .with_interaction(Interaction::SelectTab { tab: tab.id })
        })
        .collect();
    VisualNode::new(id, NodeKind::TabBar).with_children(children)
}

pub fn page(id: impl Into<String>, title: Option<String>, content: Option<VisualNode>) -> VisualNode {
    let node = VisualNode::new(id, NodeKind::Page { title });
    match content {
        Some(content) => node.with_child(content),
        None => node,
    }
}

/// Parts of a rendered screen, in paint order.
#[derive(Debug, Default)]
pub struct ScreenParts {
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
    pub page: Option<VisualNode>,
    pub tab_bar: Option<VisualNode>,
    pub popup: Option<VisualNode>,
    pub snackbar: Option<VisualNode>,
}

pub fn screen(id: impl Into<String>, parts: ScreenParts) -> VisualNode {
    let mut children = Vec::with_capacity(4);
    children.extend(parts.page);
    children.extend(parts.tab_bar);
    children.extend(parts.popup);
    children.extend(parts.snackbar);
    VisualNode::new(
        id,
        NodeKind::Screen {
            title: parts.title,
            width: parts.width,
            height: parts.height,
        },
    )
    .with_children(children)
}

pub fn placeholder(id: impl Into<String>, type_name: &str) -> VisualNode {
    VisualNode::new(
        id,
        NodeKind::Placeholder {
            type_name: type_name.to_string(),
        },
    )
}

pub fn missing(id: impl Into<String>, reference: &str, reason: MissingReason) -> VisualNode {
    VisualNode::new(
        id,
        NodeKind::Missing {
            id: reference.to_string(),
            reason,
        },
    )
}
