//! HTML output for the preview canvas.
//!
//! Every node becomes one element carrying `data-wv-node="<id>"`, so a click
//! handler can map the event target back to the node and its interaction.
//! Styles are inline; the canvas needs no stylesheet.

use std::fmt::Write;

use wirevana_resolver::format_px;

use crate::node::*;

const SCRIM: &str = "rgba(15, 23, 42, 0.35)";
const POPUP_SHADOW: &str = "0 15px 45px rgba(15, 23, 42, 0.2)";
const SNACKBAR_BACKGROUND: &str = "#111827";
const SNACKBAR_FOREGROUND: &str = "#f9fafb";
const SNACKBAR_ACTION: &str = "#38bdf8";
const MUTED: &str = "#6b7280";

/// Render a node tree to an HTML fragment.
pub fn render_html(node: &VisualNode) -> String {
    let mut writer = HtmlWriter::default();
    writer.node(node);
    writer.out
}

/// Escape text for element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[derive(Default)]
struct HtmlWriter {
    out: String,
}

impl HtmlWriter {
    fn open(&mut self, tag: &str, node: &VisualNode, css: &str) {
        let mut style = match &node.attrs {
            Some(attrs) if node.kind.paints_surface() => attrs.to_css(),
            Some(attrs) => attrs.to_text_css(),
            None => String::new(),
        };
        if let Some(cell) = node.cell {
            let _ = write!(style, "grid-row:{};grid-column:{};", cell.row + 1, cell.column + 1);
        }
        style.push_str(css);

        let _ = write!(
            self.out,
            "<{tag} data-wv-node=\"{}\" data-wv-kind=\"{}\"",
            escape(&node.id),
            node.kind.name()
        );
        if node.interaction.is_some() {
            self.out.push_str(" data-wv-interactive=\"true\"");
        }
        if !style.is_empty() {
            let _ = write!(self.out, " style=\"{}\"", escape(&style));
        }
        self.out.push('>');
    }

    fn close(&mut self, tag: &str) {
        let _ = write!(self.out, "</{tag}>");
    }

    fn text(&mut self, text: &str) {
        self.out.push_str(&escape(text));
    }

    /// A styled `<span>` that is not a node of its own.
    fn span(&mut self, css: &str, text: &str) {
        let _ = write!(self.out, "<span style=\"{}\">{}</span>", escape(css), escape(text));
    }

    fn children(&mut self, node: &VisualNode) {
        for child in &node.children {
            self.node(child);
        }
    }

    fn node(&mut self, node: &VisualNode) {
        match &node.kind {
            NodeKind::Screen { title, width, height } => {
                let css = format!(
                    "position:relative;overflow:hidden;display:flex;flex-direction:column;width:{width}px;height:{height}px;"
                );
                self.open("div", node, &css);
                if let Some(title) = title {
                    self.span("display:block;padding:12px 16px;font-weight:600;font-size:18px;", title);
                }
                self.children(node);
                self.close("div");
            }
            NodeKind::Page { title } => {
                self.open("main", node, "flex:1 1 auto;overflow-y:auto;display:flex;flex-direction:column;");
                if let Some(title) = title {
                    self.span("display:block;padding:8px 16px;font-size:22px;", title);
                }
                self.children(node);
                self.close("main");
            }
            NodeKind::TabBar => {
                self.open("nav", node, "display:flex;flex:0 0 auto;justify-content:space-around;padding:8px 0;");
                self.children(node);
                self.close("nav");
            }
            NodeKind::Tab { title, glyph, active, .. } => {
                let css = format!(
                    "display:flex;flex-direction:column;align-items:center;border:none;background:transparent;color:inherit;cursor:pointer;opacity:{};font-weight:{};",
                    if *active { "1" } else { "0.6" },
                    if *active { 600 } else { 400 }
                );
                self.open("button", node, &css);
                self.span("font-size:20px;", glyph);
                self.span("font-size:12px;", title);
                self.close("button");
            }
            NodeKind::Stack { direction, gap, padding } => {
                let css = format!(
                    "display:flex;flex-direction:{};gap:{}px;padding:{}px;",
                    flex_direction(*direction),
                    format_px(*gap),
                    format_px(*padding)
                );
                self.open("div", node, &css);
                self.children(node);
                self.close("div");
            }
            NodeKind::Grid { rows, columns, gap } => {
                let mut css = format!("display:grid;gap:{}px;", format_px(*gap));
                if !rows.is_empty() {
                    let _ = write!(css, "grid-template-rows:{};", rows.join(" "));
                }
                if !columns.is_empty() {
                    let _ = write!(css, "grid-template-columns:{};", columns.join(" "));
                }
                self.open("div", node, &css);
                self.children(node);
                self.close("div");
            }
            NodeKind::Flex { direction, wrap, gap } => {
                let css = format!(
                    "display:flex;flex-direction:{};flex-wrap:{};gap:{}px;",
                    flex_direction(*direction),
                    if *wrap { "wrap" } else { "nowrap" },
                    format_px(*gap)
                );
                self.open("div", node, &css);
                self.children(node);
                self.close("div");
            }
            NodeKind::Overlay => {
                self.open("div", node, "position:relative;");
                self.children(node);
                self.close("div");
            }
            NodeKind::Card { header, footer, padding, background } => {
                let mut css = format!(
                    "display:flex;flex-direction:column;gap:12px;padding:{}px;",
                    format_px(*padding)
                );
                if let Some(background) = background {
                    let _ = write!(css, "background:{};", background);
                }
                self.open("section", node, &css);
                if let Some(header) = header {
                    self.span("font-weight:600;font-size:16px;", header);
                }
                self.children(node);
                if let Some(footer) = footer {
                    self.span("font-size:12px;opacity:0.7;", footer);
                }
                self.close("section");
            }
            NodeKind::Collection { .. } => {
                self.open("div", node, "display:flex;flex-direction:column;gap:8px;");
                self.children(node);
                self.close("div");
            }
            NodeKind::CollectionItem { .. } => {
                self.open("div", node, "");
                self.children(node);
                self.close("div");
            }
            NodeKind::EmptyView => {
                self.open("div", node, "opacity:0.6;text-align:center;padding:24px;");
                self.children(node);
                self.close("div");
            }
            NodeKind::Swipe { left, right } => {
                self.open("div", node, "display:flex;align-items:stretch;overflow:hidden;");
                self.swipe_side(left);
                self.out.push_str("<div style=\"flex:1 1 auto;\">");
                self.children(node);
                self.out.push_str("</div>");
                self.swipe_side(right);
                self.close("div");
            }
            NodeKind::Text { text, decoration, align } => {
                let mut css = String::new();
                if let Some(decoration) = decoration {
                    let value = if decoration == "strikethrough" { "line-through" } else { decoration };
                    let _ = write!(css, "text-decoration:{};", value);
                }
                if let Some(align) = align {
                    let _ = write!(css, "text-align:{};", align);
                }
                self.open("span", node, &css);
                self.text(text);
                self.close("span");
            }
            NodeKind::Icon { name, glyph, size } => {
                let css = format!("font-size:{}px;line-height:1;background:transparent;", format_px(*size));
                self.open("span", node, &css);
                let _ = write!(self.out, "<span aria-label=\"{}\">{}</span>", escape(name), escape(glyph));
                self.close("span");
            }
            NodeKind::Button { text, glyph } => {
                self.open("button", node, "display:inline-flex;align-items:center;gap:8px;padding:10px 24px;cursor:pointer;");
                if let Some(glyph) = glyph {
                    self.span("", glyph);
                }
                self.text(text);
                self.close("button");
            }
            NodeKind::Fab { label, glyph } => {
                self.open(
                    "button",
                    node,
                    "position:absolute;right:16px;bottom:80px;display:inline-flex;align-items:center;gap:8px;padding:16px;border-radius:16px;cursor:pointer;z-index:20;",
                );
                self.span("font-size:20px;", glyph);
                if let Some(label) = label {
                    self.text(label);
                }
                self.close("button");
            }
            NodeKind::TextField { label, placeholder, value, helper, error, secure, multiline } => {
                self.open("label", node, "display:flex;flex-direction:column;gap:4px;padding:8px 12px;");
                if let Some(label) = label {
                    self.span("font-size:12px;", label);
                }
                let placeholder = placeholder.as_deref().map(escape).unwrap_or_default();
                if *multiline {
                    let _ = write!(
                        self.out,
                        "<textarea placeholder=\"{}\" style=\"border:none;background:transparent;color:inherit;font:inherit;min-height:80px;\">{}</textarea>",
                        placeholder,
                        escape(value)
                    );
                } else {
                    let _ = write!(
                        self.out,
                        "<input type=\"{}\" placeholder=\"{}\" value=\"{}\" style=\"border:none;background:transparent;color:inherit;font:inherit;\">",
                        if *secure { "password" } else { "text" },
                        placeholder,
                        escape(value)
                    );
                }
                if let Some(error) = error {
                    self.span("font-size:12px;color:#b3261e;", error);
                } else if let Some(helper) = helper {
                    self.span(&format!("font-size:12px;color:{MUTED};"), helper);
                }
                self.close("label");
            }
            NodeKind::Picker { label, selected_label, disabled, .. } => {
                let css = format!(
                    "display:flex;justify-content:space-between;align-items:center;padding:12px;cursor:{};opacity:{};",
                    if *disabled { "not-allowed" } else { "pointer" },
                    if *disabled { "0.5" } else { "1" }
                );
                self.open("div", node, &css);
                let mut caption = String::new();
                if let Some(label) = label {
                    caption.push_str(label);
                    caption.push_str(": ");
                }
                caption.push_str(selected_label.as_deref().unwrap_or("Select"));
                self.span("", &caption);
                self.span("font-size:10px;text-transform:uppercase;letter-spacing:1px;", "Cycle");
                self.close("div");
            }
            NodeKind::DateTime { label, value, mode } => {
                self.open("div", node, "display:flex;justify-content:space-between;padding:12px;");
                self.span("", label.as_deref().unwrap_or(match mode {
                    DateTimeMode::Date => "Date",
                    DateTimeMode::Time => "Time",
                }));
                self.span("font-weight:600;", value);
                self.close("div");
            }
            NodeKind::Toggle { label, on, style } => {
                self.open("div", node, "display:flex;align-items:center;justify-content:space-between;gap:12px;cursor:pointer;background:transparent;");
                if let Some(label) = label {
                    self.span("", label);
                }
                let mark = match (style, on) {
                    (ToggleStyle::Switch, true) => "●━",
                    (ToggleStyle::Switch, false) => "━○",
                    (ToggleStyle::Checkbox, true) => "☑",
                    (ToggleStyle::Checkbox, false) => "☐",
                };
                self.span("font-size:18px;", mark);
                self.close("div");
            }
            NodeKind::RadioGroup { label } => {
                self.open("fieldset", node, "display:flex;flex-direction:column;gap:8px;border:none;padding:0;margin:0;");
                if let Some(label) = label {
                    let _ = write!(self.out, "<legend>{}</legend>", escape(label));
                }
                self.children(node);
                self.close("fieldset");
            }
            NodeKind::Radio { label, selected } => {
                self.open("div", node, "display:flex;align-items:center;gap:8px;cursor:pointer;background:transparent;");
                self.span("", if *selected { "◉" } else { "○" });
                self.text(label);
                self.close("div");
            }
            NodeKind::Popup { title, .. } => self.popup(node, title.as_deref()),
            NodeKind::Snackbar { message, .. } => {
                let css = format!(
                    "position:absolute;left:50%;bottom:24px;transform:translateX(-50%);background:{SNACKBAR_BACKGROUND};color:{SNACKBAR_FOREGROUND};border-radius:9999px;padding:12px 20px;display:flex;align-items:center;gap:12px;box-shadow:0 10px 30px rgba(15, 23, 42, 0.3);z-index:40;"
                );
                self.open("div", node, &css);
                self.text(message);
                for child in &node.children {
                    if child.id.ends_with("/action") {
                        self.inline_button(child, &format!("color:{SNACKBAR_ACTION};font-weight:600;"));
                    } else {
                        self.inline_button(child, "color:inherit;");
                    }
                }
                self.close("div");
            }
            NodeKind::Placeholder { type_name } => {
                self.open("div", node, &format!("border:1px dashed {MUTED};padding:8px;color:{MUTED};font-size:12px;"));
                self.text(&format!("Unsupported component: {type_name}"));
                self.close("div");
            }
            NodeKind::Missing { id, reason } => {
                let what = match reason {
                    MissingReason::NotFound => "Component not found",
                    MissingReason::TooDeep => "Component nesting too deep",
                };
                self.open("div", node, "border:1px dashed #b3261e;padding:8px;color:#b3261e;font-size:12px;");
                self.text(&format!("{what}: {id}"));
                self.close("div");
            }
        }
    }

    fn swipe_side(&mut self, actions: &[SwipeAction]) {
        if actions.is_empty() {
            return;
        }
        self.out.push_str("<div style=\"display:flex;width:120px;opacity:0.8;\">");
        for action in actions {
            let _ = write!(
                self.out,
                "<div style=\"background:{};color:white;display:flex;align-items:center;justify-content:center;flex:1;font-size:12px;\">{}</div>",
                escape(&action.background),
                escape(&action.label)
            );
        }
        self.out.push_str("</div>");
    }

    /// Flat button inside a popup or snackbar, without design-system attributes.
    fn inline_button(&mut self, node: &VisualNode, css: &str) {
        let plain = VisualNode {
            attrs: None,
            children: Vec::new(),
            ..node.clone()
        };
        let css = format!("border:none;background:transparent;cursor:pointer;{css}");
        self.open("button", &plain, &css);
        if let NodeKind::Button { text, glyph } = &node.kind {
            if text.is_empty() {
                self.text(glyph.as_deref().unwrap_or_default());
            } else {
                self.text(text);
            }
        }
        self.close("button");
    }

    fn popup(&mut self, node: &VisualNode, title: Option<&str>) {
        // The scrim is the node itself, so a click on it closes the popup.
        let scrim = format!(
            "position:absolute;inset:0;background:{SCRIM};display:flex;align-items:center;justify-content:center;z-index:30;"
        );
        let _ = write!(
            self.out,
            "<div data-wv-node=\"{}\" data-wv-kind=\"popup\" data-wv-interactive=\"true\" style=\"{}\">",
            escape(&node.id),
            escape(&scrim)
        );

        let mut card = node
            .attrs
            .as_ref()
            .map(|attrs| attrs.to_css())
            .unwrap_or_default();
        let _ = write!(
            card,
            "border-radius:16px;width:min(420px, 90%);padding:24px;display:flex;flex-direction:column;gap:16px;box-shadow:{POPUP_SHADOW};"
        );
        // Clicks inside the card stop here instead of reaching the scrim.
        let _ = write!(
            self.out,
            "<div data-wv-node=\"{}/card\" data-wv-stop=\"true\" style=\"{}\">",
            escape(&node.id),
            escape(&card)
        );
        if let Some(title) = title {
            let _ = write!(self.out, "<h2 style=\"margin:0;font-size:20px;\">{}</h2>", escape(title));
        }

        let mut close = None;
        for child in &node.children {
            if matches!(child.interaction, Some(Interaction::ClosePopup)) && close.is_none() {
                close = Some(child);
                continue;
            }
            self.node(child);
        }
        if let Some(close) = close {
            self.inline_button(close, "align-self:flex-end;color:#2563eb;");
        }
        self.out.push_str("</div></div>");
    }
}

fn flex_direction(direction: Direction) -> &'static str {
    match direction {
        Direction::Vertical => "column",
        Direction::Horizontal => "row",
    }
}
