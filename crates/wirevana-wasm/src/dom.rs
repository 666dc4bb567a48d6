//! DOM mount target and event delegation.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlInputElement, HtmlTextAreaElement};
use wirevana_interpreter::RenderTarget;
use wirevana_render::VisualNode;

/// Renders previews into a container element's `innerHTML`.
pub struct DomTarget {
    element: Element,
}

impl DomTarget {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl RenderTarget for DomTarget {
    fn render(&mut self, _screen: &VisualNode, html: &str) {
        self.element.set_inner_html(html);
    }

    fn clear(&mut self) {
        self.element.set_inner_html("");
    }
}

/// Ancestors that take a click: interactive nodes, and popup cards that
/// swallow clicks before they reach the scrim.
const CLICK_SELECTOR: &str = "[data-wv-interactive], [data-wv-stop]";

/// The node id of the nearest interactive element around an event target.
pub fn interactive_node_id(event: &Event) -> Option<String> {
    let element = event.target()?.dyn_into::<Element>().ok()?;
    clicked_node_id(&element)
}

fn clicked_node_id(element: &Element) -> Option<String> {
    let hit = element.closest(CLICK_SELECTOR).ok().flatten()?;
    if hit.has_attribute("data-wv-stop") {
        return None;
    }
    hit.get_attribute("data-wv-node")
}

/// The node id and current text of a field an `input` event came from.
pub fn field_input(event: &Event) -> Option<(String, String)> {
    let target = event.target()?;
    let value = if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else {
        target.dyn_ref::<HtmlTextAreaElement>()?.value()
    };
    let element = target.dyn_into::<Element>().ok()?;
    let id = element
        .closest("[data-wv-node]")
        .ok()
        .flatten()?
        .get_attribute("data-wv-node")?;
    Some((id, value))
}

/// An event listener that removes itself when dropped.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}
