//! Document model for Wirevana wireframes.
//!
//! A wireframe is loaded once into these types and then handed, read-only, to
//! the interpreter. String props have already been parsed into [`Binding`]s.

use crate::binding::Binding;
use crate::tokens::{StyleLibrary, StyleRef};
use indexmap::IndexMap;
use serde_json::Value;

/// A complete wireframe document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WireframeDefinition {
    pub name: String,
    pub description: Option<String>,
    pub shell: ShellDefinition,
    /// Navigation entries in display order.
    pub tabs: Vec<TabDefinition>,
    pub pages: IndexMap<String, PageDefinition>,
    pub components: IndexMap<String, ComponentDefinition>,
    /// Shell-level definitions (`Shell`, `TabBar`) kept for lookups.
    pub root_components: IndexMap<String, ComponentDefinition>,
    pub sample_data: Value,
    pub actions: IndexMap<String, Action>,
    /// Initial interaction values.
    pub state: Value,
    pub style_library: StyleLibrary,
}

impl WireframeDefinition {
    pub fn tab(&self, id: &str) -> Option<&TabDefinition> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    pub fn first_tab(&self) -> Option<&TabDefinition> {
        self.tabs.first()
    }

    pub fn page(&self, id: &str) -> Option<&PageDefinition> {
        self.pages.get(id)
    }

    /// Look up a component by id, falling back to root components.
    pub fn component(&self, id: &str) -> Option<&ComponentDefinition> {
        self.components
            .get(id)
            .or_else(|| self.root_components.get(id))
    }

    /// Look up an action, accepting an optional `actions.` prefix.
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(strip_action_prefix(name))
    }

    /// Page id a tab navigates to, following `ShellContent` indirection.
    pub fn tab_page_id<'a>(&'a self, tab: &'a TabDefinition) -> Option<&'a str> {
        match &tab.target {
            TabTarget::Page(page) => Some(page.as_str()),
            TabTarget::Content(content) => self.content_page_id(content),
            TabTarget::None => None,
        }
    }

    /// Page shown when the shell has no tabs: `shell.content`, then the first page.
    pub fn fallback_page_id(&self) -> Option<&str> {
        self.shell
            .content
            .as_deref()
            .and_then(|content| self.content_page_id(content))
            .or_else(|| self.pages.keys().next().map(String::as_str))
    }

    fn content_page_id<'a>(&'a self, content: &'a str) -> Option<&'a str> {
        if self.pages.contains_key(content) {
            return Some(content);
        }
        self.component(content)
            .filter(|def| def.kind == ComponentKind::ShellContent)
            .and_then(|def| def.literal_str("page"))
    }

    /// The first declared `Snackbar` component.
    pub fn snackbar(&self) -> Option<(&String, &ComponentDefinition)> {
        self.components
            .iter()
            .find(|(_, def)| def.kind == ComponentKind::Snackbar)
    }
}

/// Strip the optional `actions.` namespace from an interaction target.
pub fn strip_action_prefix(name: &str) -> &str {
    name.strip_prefix("actions.").unwrap_or(name)
}

/// Root navigation container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShellDefinition {
    pub title: Option<String>,
    pub tab_bar: Option<String>,
    /// Single page (or `ShellContent`) shown by tab-less shells.
    pub content: Option<String>,
    pub style: Option<StyleRef>,
}

/// A named navigation entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TabDefinition {
    pub id: String,
    pub title: String,
    pub icon: Option<String>,
    pub target: TabTarget,
    pub style: Option<StyleRef>,
}

/// What a tab navigates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabTarget {
    /// A page id.
    Page(String),
    /// A `ShellContent` component id whose `page` prop names the page.
    Content(String),
    None,
}

/// A named screen with exactly one root layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageDefinition {
    pub id: String,
    pub title: Option<String>,
    pub style: Option<StyleRef>,
    /// Inline definition or a reference to a named component.
    pub layout: Option<LayoutChild>,
}

/// A declared action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    pub kind: ActionKind,
}

/// What invoking an action does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Opaque command label, surfaced to the embedder.
    Command(String),
    /// Opens the popup component with this id.
    Popup(String),
    /// Any other declared type; treated as a no-op.
    Other(String),
}

/// Closed catalog of primitive component types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Shell,
    ShellContent,
    ContentPage,
    TabBar,
    Tab,
    Border,
    VerticalStack,
    HorizontalStack,
    Grid,
    FlexLayout,
    AbsoluteLayout,
    CollectionView,
    SwipeView,
    DataTemplate,
    Entry,
    Editor,
    Picker,
    DatePicker,
    TimePicker,
    Switch,
    CheckBox,
    RadioButtonGroup,
    RadioButton,
    Button,
    FabButton,
    Label,
    Icon,
    Popup,
    Snackbar,
    /// Unrecognised type name, kept verbatim.
    Unknown(String),
}

impl ComponentKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Shell" => ComponentKind::Shell,
            "ShellContent" => ComponentKind::ShellContent,
            "ContentPage" => ComponentKind::ContentPage,
            "TabBar" => ComponentKind::TabBar,
            "Tab" => ComponentKind::Tab,
            "Border" | "Frame" => ComponentKind::Border,
            "VerticalStack" | "VerticalStackLayout" | "StackLayout" => ComponentKind::VerticalStack,
            "HorizontalStack" | "HorizontalStackLayout" => ComponentKind::HorizontalStack,
            "Grid" => ComponentKind::Grid,
            "FlexLayout" => ComponentKind::FlexLayout,
            "AbsoluteLayout" => ComponentKind::AbsoluteLayout,
            "CollectionView" | "ListView" => ComponentKind::CollectionView,
            "SwipeView" => ComponentKind::SwipeView,
            "DataTemplate" => ComponentKind::DataTemplate,
            "Entry" => ComponentKind::Entry,
            "Editor" => ComponentKind::Editor,
            "Picker" => ComponentKind::Picker,
            "DatePicker" => ComponentKind::DatePicker,
            "TimePicker" => ComponentKind::TimePicker,
            "Switch" => ComponentKind::Switch,
            "CheckBox" => ComponentKind::CheckBox,
            "RadioButtonGroup" => ComponentKind::RadioButtonGroup,
            "RadioButton" => ComponentKind::RadioButton,
            "Button" => ComponentKind::Button,
            "FabButton" => ComponentKind::FabButton,
            "Label" => ComponentKind::Label,
            "Icon" | "Image" => ComponentKind::Icon,
            "Popup" => ComponentKind::Popup,
            "Snackbar" => ComponentKind::Snackbar,
            other => ComponentKind::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ComponentKind::Shell => "Shell",
            ComponentKind::ShellContent => "ShellContent",
            ComponentKind::ContentPage => "ContentPage",
            ComponentKind::TabBar => "TabBar",
            ComponentKind::Tab => "Tab",
            ComponentKind::Border => "Border",
            ComponentKind::VerticalStack => "VerticalStack",
            ComponentKind::HorizontalStack => "HorizontalStack",
            ComponentKind::Grid => "Grid",
            ComponentKind::FlexLayout => "FlexLayout",
            ComponentKind::AbsoluteLayout => "AbsoluteLayout",
            ComponentKind::CollectionView => "CollectionView",
            ComponentKind::SwipeView => "SwipeView",
            ComponentKind::DataTemplate => "DataTemplate",
            ComponentKind::Entry => "Entry",
            ComponentKind::Editor => "Editor",
            ComponentKind::Picker => "Picker",
            ComponentKind::DatePicker => "DatePicker",
            ComponentKind::TimePicker => "TimePicker",
            ComponentKind::Switch => "Switch",
            ComponentKind::CheckBox => "CheckBox",
            ComponentKind::RadioButtonGroup => "RadioButtonGroup",
            ComponentKind::RadioButton => "RadioButton",
            ComponentKind::Button => "Button",
            ComponentKind::FabButton => "FabButton",
            ComponentKind::Label => "Label",
            ComponentKind::Icon => "Icon",
            ComponentKind::Popup => "Popup",
            ComponentKind::Snackbar => "Snackbar",
            ComponentKind::Unknown(name) => name,
        }
    }
}

impl Default for ComponentKind {
    fn default() -> Self {
        ComponentKind::Unknown(String::new())
    }
}

/// A prop value: parsed binding for strings, raw JSON for everything else.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Binding(Binding),
    Value(Value),
}

impl PropValue {
    pub fn literal(text: impl Into<String>) -> Self {
        PropValue::Binding(Binding::Literal(text.into()))
    }

    /// The literal string, if this prop is a plain (non-binding) string.
    pub fn as_literal_str(&self) -> Option<&str> {
        match self {
            PropValue::Binding(Binding::Literal(text)) => Some(text),
            PropValue::Value(Value::String(text)) => Some(text),
            _ => None,
        }
    }

    pub fn as_binding(&self) -> Option<&Binding> {
        match self {
            PropValue::Binding(binding) => Some(binding),
            PropValue::Value(_) => None,
        }
    }
}

/// Ordered prop map.
pub type PropMap = IndexMap<String, PropValue>;

/// Grid cell placement of a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridPlacement {
    pub row: Option<u32>,
    pub column: Option<u32>,
}

impl GridPlacement {
    pub fn is_set(&self) -> bool {
        self.row.is_some() || self.column.is_some()
    }
}

/// Optional named child slots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Slots {
    pub content: Option<Box<LayoutChild>>,
    pub header: Option<Box<LayoutChild>>,
    pub footer: Option<Box<LayoutChild>>,
    pub template: Option<Box<LayoutChild>>,
    pub empty_view: Option<Box<LayoutChild>>,
}

/// A reusable node definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentDefinition {
    pub kind: ComponentKind,
    pub props: PropMap,
    pub style: Option<StyleRef>,
    /// Container for the children: an inline definition whose children are
    /// taken over, or a reference that becomes the first child.
    pub layout: Option<Box<LayoutChild>>,
    pub children: Vec<LayoutChild>,
    pub slots: Slots,
    /// Event name to action name, e.g. `Clicked` to `actions.openEditor`.
    pub interactions: IndexMap<String, String>,
    pub placement: GridPlacement,
}

impl ComponentDefinition {
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: PropValue) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    pub fn with_child(mut self, child: LayoutChild) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_interaction(mut self, event: impl Into<String>, action: impl Into<String>) -> Self {
        self.interactions.insert(event.into(), action.into());
        self
    }

    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    pub fn literal_str(&self, key: &str) -> Option<&str> {
        self.prop(key).and_then(PropValue::as_literal_str)
    }

    /// Children in render order: `layout` children first, then direct ones.
    pub fn all_children(&self) -> impl Iterator<Item = &LayoutChild> {
        self.layout
            .iter()
            .flat_map(|layout| match layout.as_ref() {
                LayoutChild::Inline(def) => def.children.as_slice(),
                LayoutChild::Reference(_) => std::slice::from_ref(layout.as_ref()),
            })
            .chain(self.children.iter())
    }

    /// The action bound to the first matching event name.
    pub fn interaction(&self, events: &[&str]) -> Option<&str> {
        events
            .iter()
            .find_map(|event| self.interactions.get(*event))
            .map(String::as_str)
    }
}

/// A reference to a named component, with per-use overrides.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentRef {
    pub id: String,
    pub props: PropMap,
    pub style: Option<StyleRef>,
    pub slot: Option<String>,
    pub placement: GridPlacement,
}

impl ComponentRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// An entry in a child list.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutChild {
    Reference(ComponentRef),
    Inline(Box<ComponentDefinition>),
}

impl LayoutChild {
    pub fn reference(id: impl Into<String>) -> Self {
        LayoutChild::Reference(ComponentRef::new(id))
    }

    pub fn inline(def: ComponentDefinition) -> Self {
        LayoutChild::Inline(Box::new(def))
    }
}

/// Typed view over a component's props.
///
/// Built from the merged [`PropMap`] of a use site; keys the primitive does
/// not know are kept in `extra`.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentProps {
    Label {
        text: Option<PropValue>,
        decoration: Option<PropValue>,
        extra: PropMap,
    },
    Button {
        text: Option<PropValue>,
        icon: Option<PropValue>,
        appearance: Option<PropValue>,
        extra: PropMap,
    },
    Fab {
        label: Option<PropValue>,
        icon: Option<PropValue>,
        extra: PropMap,
    },
    Icon {
        name: Option<PropValue>,
        size: Option<PropValue>,
        extra: PropMap,
    },
    Border {
        header: Option<PropValue>,
        footer: Option<PropValue>,
        variant: Option<PropValue>,
        padding: Option<PropValue>,
        background: Option<PropValue>,
        extra: PropMap,
    },
    Stack {
        spacing: Option<PropValue>,
        padding: Option<PropValue>,
        extra: PropMap,
    },
    Grid {
        rows: Option<PropValue>,
        columns: Option<PropValue>,
        gap: Option<PropValue>,
        extra: PropMap,
    },
    Flex {
        direction: Option<PropValue>,
        wrap: Option<PropValue>,
        gap: Option<PropValue>,
        extra: PropMap,
    },
    Collection {
        items: Option<PropValue>,
        extra: PropMap,
    },
    Swipe {
        left_items: Option<PropValue>,
        right_items: Option<PropValue>,
        extra: PropMap,
    },
    TextInput {
        label: Option<PropValue>,
        placeholder: Option<PropValue>,
        value: Option<PropValue>,
        helper: Option<PropValue>,
        error: Option<PropValue>,
        secure: Option<PropValue>,
        extra: PropMap,
    },
    Picker {
        label: Option<PropValue>,
        options: Option<PropValue>,
        label_path: Option<PropValue>,
        value_path: Option<PropValue>,
        selected: Option<PropValue>,
        extra: PropMap,
    },
    DateTime {
        label: Option<PropValue>,
        value: Option<PropValue>,
        extra: PropMap,
    },
    Toggle {
        label: Option<PropValue>,
        value: Option<PropValue>,
        extra: PropMap,
    },
    RadioGroup {
        label: Option<PropValue>,
        value: Option<PropValue>,
        extra: PropMap,
    },
    Radio {
        value: Option<PropValue>,
        content: Option<PropValue>,
        extra: PropMap,
    },
    Popup {
        title: Option<PropValue>,
        extra: PropMap,
    },
    Snackbar {
        message: Option<PropValue>,
        action_label: Option<PropValue>,
        visible: Option<PropValue>,
        duration: Option<PropValue>,
        extra: PropMap,
    },
    Generic {
        extra: PropMap,
    },
}

impl ComponentProps {
    pub fn from_map(kind: &ComponentKind, props: &PropMap) -> Self {
        let mut extra = props.clone();
        let mut take = |keys: &[&str]| -> Option<PropValue> {
            let mut found = None;
            for key in keys {
                if let Some(value) = extra.shift_remove(*key) {
                    found.get_or_insert(value);
                }
            }
            found
        };

        match kind {
            ComponentKind::Label => ComponentProps::Label {
                text: take(&["text"]),
                decoration: take(&["textDecorations", "textDecoration"]),
                extra,
            },
            ComponentKind::Button => ComponentProps::Button {
                text: take(&["text"]),
                icon: take(&["icon"]),
                appearance: take(&["appearance", "variant"]),
                extra,
            },
            ComponentKind::FabButton => ComponentProps::Fab {
                label: take(&["label", "text"]),
                icon: take(&["icon"]),
                extra,
            },
            ComponentKind::Icon => ComponentProps::Icon {
                name: take(&["name", "icon", "source"]),
                size: take(&["size"]),
                extra,
            },
            ComponentKind::Border => ComponentProps::Border {
                header: take(&["header"]),
                footer: take(&["footer"]),
                variant: take(&["variant"]),
                padding: take(&["padding"]),
                background: take(&["background"]),
                extra,
            },
            ComponentKind::VerticalStack
            | ComponentKind::HorizontalStack
            | ComponentKind::AbsoluteLayout => ComponentProps::Stack {
                spacing: take(&["spacing", "gap"]),
                padding: take(&["padding"]),
                extra,
            },
            ComponentKind::Grid => ComponentProps::Grid {
                rows: take(&["rows"]),
                columns: take(&["columns"]),
                gap: take(&["gap", "spacing"]),
                extra,
            },
            ComponentKind::FlexLayout => ComponentProps::Flex {
                direction: take(&["direction"]),
                wrap: take(&["wrap"]),
                gap: take(&["gap", "spacing"]),
                extra,
            },
            ComponentKind::CollectionView | ComponentKind::DataTemplate => {
                ComponentProps::Collection {
                    items: take(&["items", "itemsSource"]),
                    extra,
                }
            }
            ComponentKind::SwipeView => ComponentProps::Swipe {
                left_items: take(&["leftItems"]),
                right_items: take(&["rightItems"]),
                extra,
            },
            ComponentKind::Entry | ComponentKind::Editor => ComponentProps::TextInput {
                label: take(&["label"]),
                placeholder: take(&["placeholder"]),
                value: take(&["value", "text"]),
                helper: take(&["helperText", "helper"]),
                error: take(&["errorText", "error"]),
                secure: take(&["isPassword", "secure"]),
                extra,
            },
            ComponentKind::Picker => ComponentProps::Picker {
                label: take(&["label", "title"]),
                options: take(&["options", "itemsSource"]),
                label_path: take(&["labelPath"]),
                value_path: take(&["valuePath"]),
                selected: take(&["selectedValue", "value"]),
                extra,
            },
            ComponentKind::DatePicker | ComponentKind::TimePicker => ComponentProps::DateTime {
                label: take(&["label"]),
                value: take(&["value", "date", "time"]),
                extra,
            },
            ComponentKind::Switch | ComponentKind::CheckBox => ComponentProps::Toggle {
                label: take(&["label"]),
                value: take(&["isToggled", "checked", "isChecked", "value"]),
                extra,
            },
            ComponentKind::RadioButtonGroup => ComponentProps::RadioGroup {
                label: take(&["label"]),
                value: take(&["value", "selectedValue"]),
                extra,
            },
            ComponentKind::RadioButton => ComponentProps::Radio {
                value: take(&["value"]),
                content: take(&["content", "text", "label"]),
                extra,
            },
            ComponentKind::Popup => ComponentProps::Popup {
                title: take(&["title"]),
                extra,
            },
            ComponentKind::Snackbar => ComponentProps::Snackbar {
                message: take(&["message", "text"]),
                action_label: take(&["actionLabel", "actionButtonText"]),
                visible: take(&["isVisible", "visible"]),
                duration: take(&["durationMs", "duration"]),
                extra,
            },
            _ => ComponentProps::Generic { extra },
        }
    }
}
