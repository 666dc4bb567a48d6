//! The wireframe interpreter.
//!
//! Walks active tab, page, root layout and every child below it, turning each
//! component into a visual node through a single dispatch function. The walk
//! never fails: dangling references, missing pages and unknown types all
//! degrade to placeholders so the rest of the screen still renders.

use std::borrow::Cow;

use serde_json::Value;
use tracing::{debug, warn};

use wirevana_core::{
    ast::*,
    tokens::StyleRef,
    types::Spacing,
    value::{display, is_truthy},
};
use wirevana_render::{
    primitives::{self, default_style, PickerOption, ScreenParts, TabSpec, TextFieldSpec},
    DateTimeMode, Direction, GridCell, Interaction, MissingReason, ToggleStyle, ValueTarget,
    VisualNode,
};
use wirevana_resolver::{BindingContext, BindingResolver, StyleResolver, VisualAttributes};

use crate::options::RenderOptions;
use crate::session::SessionState;

/// Maximum component nesting. Deeper references, usually cycles, render as
/// placeholders.
pub const MAX_RENDER_DEPTH: usize = 64;

/// Id of the screen root; every other node id starts with it.
pub const SCREEN_ID: &str = "screen";

const CLICK_EVENTS: &[&str] = &["Clicked", "Click", "Tapped", "Pressed"];
const TOGGLE_EVENTS: &[&str] = &["Toggled", "CheckedChanged", "Changed"];
const SNACKBAR_EVENTS: &[&str] = &["ActionInvoked", "Action", "Clicked"];

/// The value and write target a radio group hands to its buttons.
struct RadioScope {
    target: ValueTarget,
    current: Value,
}

/// What a node inherits from the nodes above it.
#[derive(Clone, Copy, Default)]
struct Scope<'s> {
    item: Option<&'s Value>,
    in_popup_footer: bool,
    radio: Option<&'s RadioScope>,
    depth: usize,
}

impl<'s> Scope<'s> {
    fn deeper(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    fn with_item(self, item: &'s Value) -> Self {
        Self {
            item: Some(item),
            ..self
        }
    }
}

/// A component at one use site: its definition plus the site's overrides.
struct Instance<'d> {
    def: &'d ComponentDefinition,
    props: Cow<'d, PropMap>,
    style: Option<&'d StyleRef>,
    placement: GridPlacement,
}

impl<'d> Instance<'d> {
    fn inline(def: &'d ComponentDefinition) -> Self {
        Self {
            def,
            props: Cow::Borrowed(&def.props),
            style: def.style.as_ref(),
            placement: def.placement,
        }
    }

    /// Use-site props win over the definition's; so do style and placement.
    fn referenced(def: &'d ComponentDefinition, reference: &'d ComponentRef) -> Self {
        let props = if reference.props.is_empty() {
            Cow::Borrowed(&def.props)
        } else {
            let mut merged = def.props.clone();
            merged.extend(reference.props.iter().map(|(k, v)| (k.clone(), v.clone())));
            Cow::Owned(merged)
        };
        Self {
            def,
            props,
            style: reference.style.as_ref().or(def.style.as_ref()),
            placement: if reference.placement.is_set() {
                reference.placement
            } else {
                def.placement
            },
        }
    }
}

/// Renders one session of a wireframe to a node tree.
pub struct Interpreter<'a> {
    definition: &'a WireframeDefinition,
    session: &'a SessionState,
    styles: StyleResolver<'a>,
    bindings: &'a BindingResolver,
    options: &'a RenderOptions,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        definition: &'a WireframeDefinition,
        session: &'a SessionState,
        bindings: &'a BindingResolver,
        options: &'a RenderOptions,
    ) -> Self {
        Self {
            definition,
            session,
            styles: StyleResolver::new(&definition.style_library, options.resolver_config()),
            bindings,
            options,
        }
    }

    /// Render the whole screen for the current session state.
    pub fn render(&self) -> VisualNode {
        let definition = self.definition;
        let active = self
            .session
            .active_tab
            .as_deref()
            .and_then(|id| definition.tab(id));
        let page_id = match active {
            Some(tab) => definition.tab_page_id(tab),
            None => definition.fallback_page_id(),
        };
        let page = page_id.and_then(|id| definition.page(id));
        if page.is_none() {
            debug!(tab = ?active.map(|t| &t.id), page = ?page_id, "no page to render");
        }

        let parts = ScreenParts {
            title: definition.shell.title.clone(),
            width: self.options.viewport_width,
            height: self.options.viewport_height,
            page: Some(self.render_page(page)),
            tab_bar: (!definition.tabs.is_empty()).then(|| self.render_tab_bar()),
            popup: self
                .session
                .open_popup
                .as_deref()
                .map(|popup| self.render_popup(popup)),
            snackbar: if self.session.snackbar_visible {
                self.render_snackbar()
            } else {
                None
            },
        };

        let attrs = self.styles.resolve_over(
            definition.shell.style.as_ref(),
            default_style(&ComponentKind::Shell, None),
        );
        primitives::screen(SCREEN_ID, parts).with_attrs(attrs)
    }

    /// Render one component on its own, as the debug player shows it.
    pub fn render_component(&self, component_id: &str) -> VisualNode {
        let reference = LayoutChild::reference(component_id);
        self.render_child(&reference, format!("player/{component_id}"), Scope::default())
    }

    fn render_page(&self, page: Option<&PageDefinition>) -> VisualNode {
        let id = format!("{SCREEN_ID}/page");
        let Some(page) = page else {
            return primitives::page(id, None, None);
        };
        let content = match &page.layout {
            Some(layout) => Some(self.render_child(layout, format!("{id}/0"), Scope::default())),
            None => {
                debug!(page = %page.id, "page has no layout");
                None
            }
        };
        let attrs = self
            .styles
            .resolve_over(page.style.as_ref(), default_style(&ComponentKind::ContentPage, None));
        primitives::page(id, page.title.clone(), content).with_attrs(attrs)
    }

    fn render_tab_bar(&self) -> VisualNode {
        let definition = self.definition;
        let tabs = definition
            .tabs
            .iter()
            .map(|tab| TabSpec {
                id: tab.id.clone(),
                title: tab.title.clone(),
                icon: tab.icon.clone(),
                active: self.session.active_tab.as_deref() == Some(tab.id.as_str()),
            })
            .collect();

        let bar_style = definition
            .shell
            .tab_bar
            .as_deref()
            .and_then(|id| definition.component(id))
            .and_then(|bar| bar.style.as_ref());
        let mut bar = primitives::tab_bar(format!("{SCREEN_ID}/tabs"), tabs)
            .with_attrs(self.styles.resolve_over(bar_style, default_style(&ComponentKind::TabBar, None)));

        for (node, tab) in bar.children.iter_mut().zip(&definition.tabs) {
            node.attrs = Some(
                self.styles
                    .resolve_over(tab.style.as_ref(), default_style(&ComponentKind::Tab, None)),
            );
        }
        bar
    }

    fn render_popup(&self, popup_id: &str) -> VisualNode {
        let id = format!("{SCREEN_ID}/popup");
        let Some(def) = self.definition.component(popup_id) else {
            warn!(popup = popup_id, "open popup does not exist");
            return primitives::missing(id, popup_id, MissingReason::NotFound);
        };

        let ctx = self.context(None);
        let title = match ComponentProps::from_map(&def.kind, &def.props) {
            ComponentProps::Popup { title, .. } => self.bindings.text(title.as_ref(), &ctx),
            _ => None,
        };

        let scope = Scope::default().deeper();
        let mut content = Vec::new();
        if let Some(child) = def.slots.content.as_deref() {
            content.push(self.render_child(child, format!("{id}/content"), scope));
        }
        content.extend(self.render_children(def, &id, scope));

        let footer_scope = Scope {
            in_popup_footer: true,
            ..scope
        };
        let footer = def
            .slots
            .footer
            .as_deref()
            .map(|child| self.render_child(child, format!("{id}/footer"), footer_scope));

        let attrs = self
            .styles
            .resolve_over(def.style.as_ref(), default_style(&ComponentKind::Popup, None));
        primitives::popup(id, popup_id, title, content, footer).with_attrs(attrs)
    }

    fn render_snackbar(&self) -> Option<VisualNode> {
        let (_, def) = self.definition.snackbar()?;
        let ComponentProps::Snackbar {
            message,
            action_label,
            ..
        } = ComponentProps::from_map(&def.kind, &def.props)
        else {
            return None;
        };

        let ctx = self.context(None);
        let node = primitives::snackbar(
            format!("{SCREEN_ID}/snackbar"),
            self.bindings.text(message.as_ref(), &ctx).unwrap_or_default(),
            self.bindings.text(action_label.as_ref(), &ctx),
            def.interaction(SNACKBAR_EVENTS).map(str::to_string),
        );
        let attrs = self
            .styles
            .resolve_over(def.style.as_ref(), default_style(&ComponentKind::Snackbar, None));
        Some(node.with_attrs(attrs))
    }

    fn context<'s>(&'s self, item: Option<&'s Value>) -> BindingContext<'s> {
        let ctx = BindingContext::new(&self.definition.sample_data, &self.session.values);
        match item {
            Some(item) => ctx.with_item(item),
            None => ctx,
        }
    }

    fn render_children(&self, def: &ComponentDefinition, id: &str, scope: Scope<'_>) -> Vec<VisualNode> {
        def.all_children()
            .enumerate()
            .map(|(index, child)| self.render_child(child, format!("{id}/{index}"), scope))
            .collect()
    }

    /// The one dispatch point for layout children.
    fn render_child(&self, child: &LayoutChild, id: String, scope: Scope<'_>) -> VisualNode {
        if scope.depth >= MAX_RENDER_DEPTH {
            let name = match child {
                LayoutChild::Reference(reference) => reference.id.as_str(),
                LayoutChild::Inline(def) => def.kind.name(),
            };
            warn!(component = name, depth = scope.depth, "render depth exceeded");
            return primitives::missing(id, name, MissingReason::TooDeep);
        }

        match child {
            LayoutChild::Reference(reference) => match self.definition.component(&reference.id) {
                Some(def) => self.render_instance(&Instance::referenced(def, reference), id, scope),
                None => {
                    warn!(component = %reference.id, "dangling component reference");
                    primitives::missing(id, &reference.id, MissingReason::NotFound)
                }
            },
            LayoutChild::Inline(def) => self.render_instance(&Instance::inline(def), id, scope),
        }
    }

    fn attrs(&self, instance: &Instance<'_>, appearance: Option<&str>) -> VisualAttributes {
        self.styles
            .resolve_over(instance.style, default_style(&instance.def.kind, appearance))
    }

    /// Layout containers only get a surface when the use site asks for one.
    fn container_attrs(&self, node: VisualNode, instance: &Instance<'_>) -> VisualNode {
        match instance.style {
            Some(_) => node.with_attrs(self.attrs(instance, None)),
            None => node,
        }
    }

    /// Where a control bound through `prop` writes.
    fn target(&self, prop: Option<&PropValue>, id: &str) -> ValueTarget {
        prop.and_then(PropValue::as_binding)
            .and_then(|binding| binding.state_path())
            .map(|path| ValueTarget::State(path.to_string()))
            .unwrap_or_else(|| ValueTarget::Local(id.to_string()))
    }

    /// A control's current value: the session's, else the prop's.
    fn control_value(&self, target: &ValueTarget, prop: Option<&PropValue>, ctx: &BindingContext<'_>) -> Value {
        match target {
            ValueTarget::State(_) => self.bindings.value(prop, ctx),
            ValueTarget::Local(id) => self
                .session
                .locals
                .get(id)
                .cloned()
                .unwrap_or_else(|| self.bindings.value(prop, ctx)),
        }
    }

    fn spacing(&self, prop: Option<&PropValue>, ctx: &BindingContext<'_>, default: Spacing) -> Spacing {
        primitives::spacing(&self.bindings.value(prop, ctx), default)
    }

    fn click_action(&self, def: &ComponentDefinition, extra: &PropMap, scope: Scope<'_>) -> Option<Interaction> {
        def.interaction(CLICK_EVENTS)
            .or_else(|| {
                extra
                    .get("command")
                    .or_else(|| extra.get("action"))
                    .and_then(PropValue::as_literal_str)
            })
            .map(|action| Interaction::Invoke {
                action: action.to_string(),
                from_popup_footer: scope.in_popup_footer,
            })
    }

    fn render_instance(&self, instance: &Instance<'_>, id: String, scope: Scope<'_>) -> VisualNode {
        let def = instance.def;
        let ctx = self.context(scope.item);
        let text = |prop: &Option<PropValue>| self.bindings.text(prop.as_ref(), &ctx);
        let value = |prop: &Option<PropValue>| self.bindings.value(prop.as_ref(), &ctx);
        let inner = scope.deeper();

        let node = match ComponentProps::from_map(&def.kind, &instance.props) {
            ComponentProps::Label { text: label, decoration, .. } => {
                primitives::label(id, text(&label).unwrap_or_default(), text(&decoration))
                    .with_attrs(self.attrs(instance, None))
            }
            ComponentProps::Icon { name, size, .. } => {
                let size = value(&size).as_f64().map(|px| px as f32);
                primitives::icon(id, &text(&name).unwrap_or_default(), size)
                    .with_attrs(self.attrs(instance, None))
            }
            ComponentProps::Button { text: label, icon, appearance, extra } => {
                let appearance = text(&appearance);
                let action = self.click_action(def, &extra, scope);
                primitives::button(id, text(&label), text(&icon).as_deref(), action)
                    .with_attrs(self.attrs(instance, appearance.as_deref()))
            }
            ComponentProps::Fab { label, icon, extra } => {
                let action = self.click_action(def, &extra, scope);
                primitives::fab(id, text(&label), text(&icon).as_deref(), action)
                    .with_attrs(self.attrs(instance, None))
            }
            ComponentProps::Border { header, footer, variant, padding, background, .. } => {
                let variant = text(&variant);
                let mut children = Vec::new();
                if let Some(content) = def.slots.content.as_deref() {
                    children.push(self.render_child(content, format!("{id}/content"), inner));
                }
                children.extend(self.render_children(def, &id, inner));
                primitives::border(
                    id,
                    text(&header),
                    text(&footer),
                    self.spacing(padding.as_ref(), &ctx, Spacing::Standard),
                    text(&background),
                    children,
                )
                .with_attrs(self.attrs(instance, variant.as_deref()))
            }
            ComponentProps::Stack { spacing, padding, .. } => {
                let children = self.render_children(def, &id, inner);
                let node = if def.kind == ComponentKind::AbsoluteLayout {
                    primitives::overlay(id, children)
                } else {
                    let direction = if def.kind == ComponentKind::HorizontalStack {
                        Direction::Horizontal
                    } else {
                        Direction::Vertical
                    };
                    let padding = padding
                        .as_ref()
                        .map(|prop| self.spacing(Some(prop), &ctx, Spacing::Standard));
                    primitives::stack(
                        id,
                        direction,
                        self.spacing(spacing.as_ref(), &ctx, Spacing::Standard),
                        padding,
                        children,
                    )
                };
                self.container_attrs(node, instance)
            }
            ComponentProps::Grid { rows, columns, gap, .. } => {
                let children = self.render_children(def, &id, inner);
                let node = primitives::grid(
                    id,
                    primitives::grid_tracks(&value(&rows)),
                    primitives::grid_tracks(&value(&columns)),
                    self.spacing(gap.as_ref(), &ctx, Spacing::Standard),
                    children,
                );
                self.container_attrs(node, instance)
            }
            ComponentProps::Flex { direction, wrap, gap, .. } => {
                let direction = match text(&direction).as_deref().map(str::trim) {
                    Some("column") | Some("vertical") => Direction::Vertical,
                    _ => Direction::Horizontal,
                };
                let wrap = match value(&wrap) {
                    Value::String(mode) => mode.trim() != "nowrap" && !mode.is_empty(),
                    other => is_truthy(&other),
                };
                let children = self.render_children(def, &id, inner);
                let node = primitives::flex(
                    id,
                    direction,
                    wrap,
                    self.spacing(gap.as_ref(), &ctx, Spacing::Standard),
                    children,
                );
                self.container_attrs(node, instance)
            }
            ComponentProps::Collection { items, .. } => {
                let node = self.render_collection(def, id, &value(&items), inner);
                self.container_attrs(node, instance)
            }
            ComponentProps::Swipe { left_items, right_items, .. } => {
                let content = def
                    .slots
                    .content
                    .as_deref()
                    .or_else(|| def.all_children().next())
                    .map(|child| self.render_child(child, format!("{id}/content"), inner));
                primitives::swipe(
                    id,
                    primitives::swipe_actions(&value(&left_items)),
                    primitives::swipe_actions(&value(&right_items)),
                    content,
                )
            }
            ComponentProps::TextInput { label, placeholder, value: bound, helper, error, secure, .. } => {
                let target = self.target(bound.as_ref(), &id);
                let current = self.control_value(&target, bound.as_ref(), &ctx);
                let spec = TextFieldSpec {
                    label: text(&label),
                    placeholder: text(&placeholder),
                    value: display(&current),
                    helper: text(&helper),
                    error: text(&error),
                    secure: is_truthy(&value(&secure)),
                    multiline: def.kind == ComponentKind::Editor,
                };
                primitives::text_field(id, spec, target).with_attrs(self.attrs(instance, None))
            }
            ComponentProps::Picker { label, options, label_path, value_path, selected, .. } => {
                let options: Vec<PickerOption> = primitives::picker_options(
                    &value(&options),
                    label_path.as_ref().and_then(PropValue::as_literal_str),
                    value_path.as_ref().and_then(PropValue::as_literal_str),
                );
                let target = self.target(selected.as_ref(), &id);
                let current = self.control_value(&target, selected.as_ref(), &ctx);
                primitives::picker(id, text(&label), &options, &current, target)
                    .with_attrs(self.attrs(instance, None))
            }
            ComponentProps::DateTime { label, value: shown, .. } => {
                let mode = if def.kind == ComponentKind::TimePicker {
                    DateTimeMode::Time
                } else {
                    DateTimeMode::Date
                };
                primitives::date_time(id, text(&label), text(&shown).unwrap_or_default(), mode)
                    .with_attrs(self.attrs(instance, None))
            }
            ComponentProps::Toggle { label, value: bound, .. } => {
                let target = self.target(bound.as_ref(), &id);
                let on = is_truthy(&self.control_value(&target, bound.as_ref(), &ctx));
                let style = if def.kind == ComponentKind::CheckBox {
                    ToggleStyle::Checkbox
                } else {
                    ToggleStyle::Switch
                };
                let then = def.interaction(TOGGLE_EVENTS).map(str::to_string);
                primitives::toggle(id, text(&label), on, style, target, then)
                    .with_attrs(self.attrs(instance, None))
            }
            ComponentProps::RadioGroup { label, value: bound, .. } => {
                let target = self.target(bound.as_ref(), &id);
                let current = self.control_value(&target, bound.as_ref(), &ctx);
                let radio = RadioScope { target, current };
                let children = self.render_children(def, &id, Scope {
                    radio: Some(&radio),
                    ..inner
                });
                primitives::radio_group(id, text(&label), children).with_attrs(self.attrs(instance, None))
            }
            ComponentProps::Radio { value: own, content, .. } => {
                let own = value(&own);
                let label = text(&content).unwrap_or_else(|| display(&own));
                let (target, selected) = match scope.radio {
                    Some(group) => (group.target.clone(), group.current == own),
                    None => {
                        let selected = self.session.locals.get(&id) == Some(&own);
                        (ValueTarget::Local(id.clone()), selected)
                    }
                };
                primitives::radio(id, label, own, selected, target).with_attrs(self.attrs(instance, None))
            }
            // Popups and snackbars draw at screen level, above the page.
            ComponentProps::Popup { .. } | ComponentProps::Snackbar { .. } => {
                primitives::overlay(id, Vec::new())
            }
            ComponentProps::Generic { .. } => match &def.kind {
                ComponentKind::ContentPage => {
                    let children = self.render_children(def, &id, inner);
                    primitives::stack(id, Direction::Vertical, Spacing::Standard, None, children)
                }
                ComponentKind::Unknown(name) => {
                    warn!(component_type = %name, "unknown component type");
                    primitives::placeholder(id, name)
                }
                other => {
                    debug!(component_type = other.name(), "navigation component inside a layout");
                    primitives::placeholder(id, other.name())
                }
            },
        };

        match (instance.placement.row, instance.placement.column) {
            (None, None) => node,
            (row, column) => node.with_cell(GridCell {
                row: row.unwrap_or(0),
                column: column.unwrap_or(0),
            }),
        }
    }

    fn render_collection(
        &self,
        def: &ComponentDefinition,
        id: String,
        items: &Value,
        scope: Scope<'_>,
    ) -> VisualNode {
        let list: &[Value] = match items {
            Value::Array(list) => list,
            Value::Null => &[],
            other => {
                debug!(items = %other, "collection items are not a list");
                &[]
            }
        };

        let template = def
            .slots
            .template
            .as_deref()
            .or(def.slots.content.as_deref())
            .or_else(|| def.all_children().next());

        let rendered = list
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let item_id = format!("{id}/{index}");
                let content = match template {
                    Some(template) => {
                        self.render_child(template, format!("{item_id}/0"), scope.with_item(item))
                    }
                    None => primitives::label(format!("{item_id}/0"), display(item), None),
                };
                primitives::collection_item(item_id, index, content)
            })
            .collect();

        let slot = |child: Option<&LayoutChild>, name: &str| {
            child.map(|child| self.render_child(child, format!("{id}/{name}"), scope))
        };
        let (header, footer) = if def.kind == ComponentKind::DataTemplate {
            (None, None)
        } else {
            (
                slot(def.slots.header.as_deref(), "header"),
                slot(def.slots.footer.as_deref(), "footer"),
            )
        };
        let empty = if list.is_empty() {
            def.slots.empty_view.as_deref().map(|child| {
                let content = self.render_child(child, format!("{id}/empty/0"), scope);
                primitives::empty_view(format!("{id}/empty"), Some(content))
            })
        } else {
            None
        };

        primitives::collection(id, header, rendered, footer, empty)
    }
}
