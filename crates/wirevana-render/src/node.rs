//! The visual node tree.
//!
//! Primitives produce [`VisualNode`]s; the HTML writer and the preview's
//! event dispatch both walk the same tree. Node ids are paths from the screen
//! root, so they are stable across re-renders of the same state.

use serde::Serialize;
use serde_json::Value;
use wirevana_resolver::VisualAttributes;

/// One node of the rendered preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualNode {
    pub id: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrs: Option<VisualAttributes>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VisualNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Interaction>,
    /// Cell inside a parent grid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<GridCell>,
}

/// Zero-based grid row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GridCell {
    pub row: u32,
    pub column: u32,
}

impl VisualNode {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            attrs: None,
            children: Vec::new(),
            interaction: None,
            cell: None,
        }
    }

    pub fn with_attrs(mut self, attrs: VisualAttributes) -> Self {
        self.attrs = Some(attrs);
        self
    }

    pub fn with_children(mut self, children: Vec<VisualNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_child(mut self, child: VisualNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interaction = Some(interaction);
        self
    }

    pub fn with_cell(mut self, cell: GridCell) -> Self {
        self.cell = Some(cell);
        self
    }

    /// Depth-first search by id.
    pub fn find(&self, id: &str) -> Option<&VisualNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Pre-order iterator over this node and its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Count nodes matching a predicate.
    pub fn count(&self, predicate: impl Fn(&VisualNode) -> bool) -> usize {
        self.descendants().filter(|node| predicate(node)).count()
    }
}

/// Pre-order traversal of a node tree.
pub struct Descendants<'a> {
    stack: Vec<&'a VisualNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a VisualNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Main axis of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Vertical,
    Horizontal,
}

/// Which control a toggle draws as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleStyle {
    Switch,
    Checkbox,
}

/// Which value a date/time field shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateTimeMode {
    Date,
    Time,
}

/// Why a reference rendered as a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MissingReason {
    /// No component with that id.
    NotFound,
    /// The reference chain is too deep, usually a cycle.
    TooDeep,
}

/// A swipe-revealed action button.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeAction {
    pub label: String,
    pub background: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// What a node draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeKind {
    #[serde(rename_all = "camelCase")]
    Screen {
        title: Option<String>,
        width: u32,
        height: u32,
    },
    Page {
        title: Option<String>,
    },
    TabBar,
    Tab {
        id: String,
        title: String,
        glyph: String,
        active: bool,
    },
    Stack {
        direction: Direction,
        gap: f32,
        padding: f32,
    },
    Grid {
        columns: Vec<String>,
        rows: Vec<String>,
        gap: f32,
    },
    Flex {
        direction: Direction,
        wrap: bool,
        gap: f32,
    },
    /// Free-positioned overlay container.
    Overlay,
    Card {
        header: Option<String>,
        footer: Option<String>,
        padding: f32,
        background: Option<String>,
    },
    Collection {
        count: usize,
    },
    CollectionItem {
        index: usize,
    },
    EmptyView,
    Swipe {
        left: Vec<SwipeAction>,
        right: Vec<SwipeAction>,
    },
    Text {
        text: String,
        decoration: Option<String>,
        align: Option<String>,
    },
    Icon {
        name: String,
        glyph: String,
        size: f32,
    },
    Button {
        text: String,
        glyph: Option<String>,
    },
    Fab {
        label: Option<String>,
        glyph: String,
    },
    #[serde(rename_all = "camelCase")]
    TextField {
        label: Option<String>,
        placeholder: Option<String>,
        value: String,
        helper: Option<String>,
        error: Option<String>,
        secure: bool,
        multiline: bool,
    },
    #[serde(rename_all = "camelCase")]
    Picker {
        label: Option<String>,
        selected_label: Option<String>,
        option_count: usize,
        disabled: bool,
    },
    DateTime {
        label: Option<String>,
        value: String,
        mode: DateTimeMode,
    },
    Toggle {
        label: Option<String>,
        on: bool,
        style: ToggleStyle,
    },
    RadioGroup {
        label: Option<String>,
    },
    Radio {
        label: String,
        selected: bool,
    },
    Popup {
        id: String,
        title: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Snackbar {
        message: String,
        action_label: Option<String>,
    },
    /// Dashed box for a type outside the primitive catalog.
    #[serde(rename_all = "camelCase")]
    Placeholder {
        type_name: String,
    },
    /// Dangling or too-deep component reference.
    Missing {
        id: String,
        reason: MissingReason,
    },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Screen { .. } => "screen",
            NodeKind::Page { .. } => "page",
            NodeKind::TabBar => "tab-bar",
            NodeKind::Tab { .. } => "tab",
            NodeKind::Stack { .. } => "stack",
            NodeKind::Grid { .. } => "grid",
            NodeKind::Flex { .. } => "flex",
            NodeKind::Overlay => "overlay",
            NodeKind::Card { .. } => "card",
            NodeKind::Collection { .. } => "collection",
            NodeKind::CollectionItem { .. } => "collection-item",
            NodeKind::EmptyView => "empty-view",
            NodeKind::Swipe { .. } => "swipe",
            NodeKind::Text { .. } => "text",
            NodeKind::Icon { .. } => "icon",
            NodeKind::Button { .. } => "button",
            NodeKind::Fab { .. } => "fab",
            NodeKind::TextField { .. } => "text-field",
            NodeKind::Picker { .. } => "picker",
            NodeKind::DateTime { .. } => "date-time",
            NodeKind::Toggle { .. } => "toggle",
            NodeKind::RadioGroup { .. } => "radio-group",
            NodeKind::Radio { .. } => "radio",
            NodeKind::Popup { .. } => "popup",
            NodeKind::Snackbar { .. } => "snackbar",
            NodeKind::Placeholder { .. } => "placeholder",
            NodeKind::Missing { .. } => "missing",
        }
    }
}

impl NodeKind {
    /// Whether the node draws its own surface. Text-like nodes take only
    /// color and typography and show their parent's background.
    pub fn paints_surface(&self) -> bool {
        !matches!(
            self,
            NodeKind::Text { .. }
                | NodeKind::Icon { .. }
                | NodeKind::Tab { .. }
                | NodeKind::Toggle { .. }
                | NodeKind::RadioGroup { .. }
                | NodeKind::Radio { .. }
        )
    }
}

/// Where a control writes its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "key", rename_all = "camelCase")]
pub enum ValueTarget {
    /// A dotted path into session state.
    State(String),
    /// A per-node value keyed by node id.
    Local(String),
}

/// What activating a node does.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Interaction {
    SelectTab {
        tab: String,
    },
    #[serde(rename_all = "camelCase")]
    Invoke {
        action: String,
        /// Inside an open popup's footer.
        from_popup_footer: bool,
    },
    ClosePopup,
    DismissSnackbar,
    SnackbarAction {
        action: Option<String>,
    },
    /// Advance to the next option, wrapping around.
    CyclePicker {
        target: ValueTarget,
        options: Vec<Value>,
        current: Option<usize>,
    },
    Toggle {
        target: ValueTarget,
        current: bool,
        then: Option<String>,
    },
    SelectRadio {
        target: ValueTarget,
        value: Value,
    },
    EditText {
        target: ValueTarget,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(id: &str) -> VisualNode {
        VisualNode::new(
            id,
            NodeKind::Text {
                text: id.to_string(),
                decoration: None,
                align: None,
            },
        )
    }

    #[test]
    fn test_find_and_descendants() {
        let tree = VisualNode::new("root", NodeKind::Overlay)
            .with_child(text("root/0"))
            .with_child(VisualNode::new("root/1", NodeKind::Overlay).with_child(text("root/1/0")));

        assert!(tree.find("root/1/0").is_some());
        assert!(tree.find("root/2").is_none());

        let ids: Vec<_> = tree.descendants().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "root/0", "root/1", "root/1/0"]);
        assert_eq!(tree.count(|n| matches!(n.kind, NodeKind::Text { .. })), 2);
    }

    #[test]
    fn test_serialize_shape() {
        let node = VisualNode::new("t", NodeKind::TabBar).with_interaction(Interaction::ClosePopup);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"]["type"], "tabBar");
        assert_eq!(json["interaction"]["type"], "closePopup");
        assert!(json.get("children").is_none());
    }
}
