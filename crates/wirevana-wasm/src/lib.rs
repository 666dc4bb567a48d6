//! WebAssembly bindings for the Wirevana preview engine.
//!
//! ## Example
//!
//! ```js
//! import init, { renderToCanvas } from 'wirevana';
//!
//! await init();
//!
//! const preview = renderToCanvas(document.getElementById('frame'), wireframe, {
//!   platform: 'ios',
//!   snackbarDurationMs: 4000,
//! });
//!
//! preview.onEvent((event) => console.log(event));
//! preview.selectTab('List');
//!
//! // Later
//! preview.teardown();
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{Date, Function};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, MessageEvent};

use wirevana_core::ast::WireframeDefinition;
use wirevana_interpreter::{
    inspect, DebugPlayer, Interpreter, PlayerKey, Preview, PreviewEvent, RenderOptions, SessionState,
};
use wirevana_resolver::{BindingResolver, StyleResolver};

mod dom;
mod host;
mod types;

pub use dom::DomTarget;
pub use host::BrowserSink;
pub use types::*;

use dom::{field_input, interactive_node_id, Listener};

/// Snackbar and autoplay timers are checked this often.
const TICK_MS: i32 = 50;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

/// Engine version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn load_definition(source: JsValue) -> Result<WireframeDefinition, JsError> {
    if let Some(text) = source.as_string() {
        return wirevana_parser::parse_document(&text).map_err(|e| JsError::new(&e.to_string()));
    }
    let value: serde_json::Value = serde_wasm_bindgen::from_value(source)
        .map_err(|e| JsError::new(&format!("Invalid wireframe: {}", e)))?;
    wirevana_parser::from_value(&value).map_err(|e| JsError::new(&e.to_string()))
}

fn load_options(options: JsValue) -> Result<RenderOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(RenderOptions::default());
    }
    let opts: RenderOptionsJs = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?;
    Ok(opts.into_core())
}

fn to_js<S: Serialize + ?Sized>(value: &S) -> Result<JsValue, JsError> {
    to_plain_js(value).map_err(|e| JsError::new(&e.to_string()))
}

type SharedPreview = Rc<RefCell<Preview<DomTarget>>>;
type EventCallback = Rc<RefCell<Option<Function>>>;

/// Forward preview events to the registered callback, one call per event.
fn emit(callback: &EventCallback, events: &[PreviewEvent]) {
    let Some(callback) = callback.borrow().clone() else {
        return;
    };
    for event in events {
        match to_plain_js(event) {
            Ok(value) => {
                if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                    tracing::warn!(?err, "event callback threw");
                }
            }
            Err(err) => tracing::warn!(%err, "could not serialize preview event"),
        }
    }
}

/// Run `f` against the preview unless it is gone or already borrowed.
fn with_preview(
    preview: &Weak<RefCell<Preview<DomTarget>>>,
    f: impl FnOnce(&mut Preview<DomTarget>) -> Vec<PreviewEvent>,
) -> Vec<PreviewEvent> {
    let Some(preview) = preview.upgrade() else {
        return Vec::new();
    };
    let Ok(mut preview) = preview.try_borrow_mut() else {
        return Vec::new();
    };
    f(&mut preview)
}

/// Mount a wireframe into `element` and keep it interactive.
///
/// `source` is either a JSON string or an already parsed object.
#[wasm_bindgen(js_name = renderToCanvas)]
pub fn render_to_canvas(element: Option<Element>, source: JsValue, options: JsValue) -> Result<WirevanaPreview, JsError> {
    let definition = load_definition(source)?;
    let options = load_options(options)?;
    WirevanaPreview::mount(element, definition, options)
}

/// A mounted, interactive preview.
#[wasm_bindgen]
pub struct WirevanaPreview {
    inner: SharedPreview,
    on_event: EventCallback,
    mounted_at: f64,
    listeners: Vec<Listener>,
    interval: Option<(i32, Closure<dyn FnMut()>)>,
}

impl WirevanaPreview {
    fn mount(element: Option<Element>, definition: WireframeDefinition, options: RenderOptions) -> Result<Self, JsError> {
        let container = element.clone();
        let preview = Preview::mount(element.map(DomTarget::new), definition, options)
            .map_err(|e| JsError::new(&e.to_string()))?;

        let mut this = Self {
            inner: Rc::new(RefCell::new(preview)),
            on_event: Rc::new(RefCell::new(None)),
            mounted_at: Date::now(),
            listeners: Vec::new(),
            interval: None,
        };
        if let Some(container) = container {
            this.listen(&container).map_err(|_| JsError::new("Failed to attach event listeners"))?;
        }
        this.start_ticking().map_err(|_| JsError::new("Failed to start preview timers"))?;
        Ok(this)
    }

    fn listen(&mut self, container: &Element) -> Result<(), JsValue> {
        let weak = Rc::downgrade(&self.inner);
        let on_event = Rc::clone(&self.on_event);
        self.listeners.push(Listener::new(container, "click", move |event: Event| {
            let Some(id) = interactive_node_id(&event) else {
                return;
            };
            let events = with_preview(&weak, |p| p.activate(&id));
            emit(&on_event, &events);
        })?);

        // `change` rather than `input`: a re-render replaces the field and
        // would drop focus on every keystroke.
        let weak = Rc::downgrade(&self.inner);
        let on_event = Rc::clone(&self.on_event);
        self.listeners.push(Listener::new(container, "change", move |event: Event| {
            let Some((id, text)) = field_input(&event) else {
                return;
            };
            let events = with_preview(&weak, |p| p.change_text(&id, &text));
            emit(&on_event, &events);
        })?);
        Ok(())
    }

    fn start_ticking(&mut self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let weak = Rc::downgrade(&self.inner);
        let on_event = Rc::clone(&self.on_event);
        let mounted_at = self.mounted_at;
        let tick = Closure::wrap(Box::new(move || {
            let elapsed = (Date::now() - mounted_at).max(0.0) as u64;
            let events = with_preview(&weak, |p| p.advance(elapsed));
            emit(&on_event, &events);
        }) as Box<dyn FnMut()>);
        let handle =
            window.set_interval_with_callback_and_timeout_and_arguments_0(tick.as_ref().unchecked_ref(), TICK_MS)?;
        self.interval = Some((handle, tick));
        Ok(())
    }

    fn stop_ticking(&mut self) {
        if let Some((handle, _closure)) = self.interval.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }

    fn run(&self, f: impl FnOnce(&mut Preview<DomTarget>) -> Vec<PreviewEvent>) -> Result<JsValue, JsError> {
        let events = {
            let mut preview = self
                .inner
                .try_borrow_mut()
                .map_err(|_| JsError::new("Preview is busy"))?;
            f(&mut preview)
        };
        emit(&self.on_event, &events);
        to_js(&events)
    }
}

#[wasm_bindgen]
impl WirevanaPreview {
    /// Register a callback receiving every preview event.
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: Option<Function>) {
        *self.on_event.borrow_mut() = callback;
    }

    /// Switch to a tab. Returns the resulting events.
    #[wasm_bindgen(js_name = selectTab)]
    pub fn select_tab(&self, tab: &str) -> Result<JsValue, JsError> {
        self.run(|p| p.select_tab(tab))
    }

    /// Invoke a named action as if a control had triggered it.
    pub fn invoke(&self, action: &str) -> Result<JsValue, JsError> {
        self.run(|p| p.invoke(action))
    }

    /// Activate the rendered node with this id.
    pub fn activate(&self, node_id: &str) -> Result<JsValue, JsError> {
        self.run(|p| p.activate(node_id))
    }

    #[wasm_bindgen(js_name = changeText)]
    pub fn change_text(&self, node_id: &str, text: &str) -> Result<JsValue, JsError> {
        self.run(|p| p.change_text(node_id, text))
    }

    #[wasm_bindgen(js_name = closePopup)]
    pub fn close_popup(&self) -> Result<JsValue, JsError> {
        self.run(|p| p.close_popup())
    }

    #[wasm_bindgen(js_name = showSnackbar)]
    pub fn show_snackbar(&self) -> Result<JsValue, JsError> {
        self.run(|p| p.show_snackbar())
    }

    #[wasm_bindgen(js_name = dismissSnackbar)]
    pub fn dismiss_snackbar(&self) -> Result<JsValue, JsError> {
        self.run(|p| p.dismiss_snackbar())
    }

    /// Markup of the current screen.
    pub fn html(&self) -> String {
        self.inner.borrow().html()
    }

    /// Snapshot of tab, popup, snackbar and state values.
    pub fn session(&self) -> Result<JsValue, JsError> {
        let preview = self.inner.borrow();
        let session = preview.session();
        to_js(&SessionJs {
            active_tab: session.active_tab.clone(),
            open_popup: session.open_popup.clone(),
            snackbar_visible: session.snackbar_visible,
            state: session.values.clone(),
        })
    }

    /// Inspector findings for the mounted wireframe.
    pub fn diagnostics(&self) -> Result<JsValue, JsError> {
        let preview = self.inner.borrow();
        let diagnostics: Vec<DiagnosticJs> = preview.diagnostics().iter().map(DiagnosticJs::from).collect();
        to_js(&diagnostics)
    }

    /// Announce the preview to the embedding page and accept its
    /// `navigate` messages.
    #[wasm_bindgen(js_name = connectHost)]
    pub fn connect_host(&mut self, target_origin: Option<String>) -> Result<(), JsError> {
        let origin = target_origin.unwrap_or_else(|| self.inner.borrow().options().trusted_origin.clone());
        let sink = BrowserSink::connect(&origin).map_err(|e| JsError::new(&e.to_string()))?;
        self.inner
            .borrow_mut()
            .connect_host(Box::new(sink), Date::now())
            .map_err(|e| JsError::new(&e.to_string()))?;

        let window = web_sys::window().ok_or_else(|| JsError::new("Host adapter can only run in a browser context"))?;
        let weak = Rc::downgrade(&self.inner);
        let on_event = Rc::clone(&self.on_event);
        let listener = Listener::new(&window, "message", move |event: Event| {
            let Some(message) = event.dyn_ref::<MessageEvent>() else {
                return;
            };
            let Ok(data) = serde_wasm_bindgen::from_value::<serde_json::Value>(message.data()) else {
                return;
            };
            let origin = message.origin();
            let events = with_preview(&weak, |p| p.receive(&origin, &data));
            emit(&on_event, &events);
        })
        .map_err(|_| JsError::new("Failed to listen for host messages"))?;
        self.listeners.push(listener);
        Ok(())
    }

    /// Ask the host to navigate elsewhere.
    #[wasm_bindgen(js_name = requestNavigation)]
    pub fn request_navigation(&self, to: &str) -> Result<(), JsError> {
        self.inner
            .borrow_mut()
            .request_navigation(to)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Stop timers, detach listeners and clear the mount element.
    /// Calling it again does nothing.
    pub fn teardown(&mut self) {
        self.stop_ticking();
        self.listeners.clear();
        *self.on_event.borrow_mut() = None;
        if let Ok(mut preview) = self.inner.try_borrow_mut() {
            preview.teardown();
        }
    }
}

impl Drop for WirevanaPreview {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Steps through every component of a wireframe on its own.
#[wasm_bindgen]
pub struct WirevanaPlayer {
    definition: WireframeDefinition,
    options: RenderOptions,
    session: SessionState,
    bindings: BindingResolver,
    player: DebugPlayer,
    diagnostics: Vec<wirevana_interpreter::Diagnostic>,
}

#[wasm_bindgen]
impl WirevanaPlayer {
    #[wasm_bindgen(constructor)]
    pub fn new(source: JsValue, options: JsValue, autoplay: bool) -> Result<WirevanaPlayer, JsError> {
        let definition = load_definition(source)?;
        let options = load_options(options)?;
        let bindings = BindingResolver::new(options.reference_time.unwrap_or_else(chrono::Utc::now));
        let diagnostics = {
            let styles = StyleResolver::new(&definition.style_library, options.resolver_config());
            inspect(&definition, &styles)
        };
        Ok(Self {
            player: DebugPlayer::new(&definition, options.player_interval_ms, autoplay),
            session: SessionState::initial(&definition),
            definition,
            options,
            bindings,
            diagnostics,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.player.len()
    }

    #[wasm_bindgen(getter)]
    pub fn index(&self) -> usize {
        self.player.index()
    }

    /// Id of the component on screen.
    #[wasm_bindgen(getter)]
    pub fn current(&self) -> Option<String> {
        self.player.current().map(str::to_string)
    }

    #[wasm_bindgen(getter, js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    #[wasm_bindgen(getter, js_name = inspectorVisible)]
    pub fn inspector_visible(&self) -> bool {
        self.player.inspector_visible()
    }

    pub fn next(&mut self) {
        self.player.next();
    }

    pub fn previous(&mut self) {
        self.player.previous();
    }

    #[wasm_bindgen(js_name = setPlaying)]
    pub fn set_playing(&mut self, playing: bool) {
        self.player.set_playing(playing);
    }

    /// Handle a `KeyboardEvent.key`. Returns whether it was a player key.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> bool {
        PlayerKey::from_key(key).map_or(false, |key| self.player.handle_key(key))
    }

    /// Convenience for `keydown` listeners: handles the key and prevents
    /// the default action when it was consumed.
    #[wasm_bindgen(js_name = handleKeyboardEvent)]
    pub fn handle_keyboard_event(&mut self, event: &KeyboardEvent) -> bool {
        let handled = self.handle_key(&event.key());
        if handled {
            event.prevent_default();
        }
        handled
    }

    /// Feed the host clock in ms. Returns how many steps were taken.
    pub fn advance(&mut self, now_ms: f64) -> usize {
        self.player.advance(now_ms.max(0.0) as u64)
    }

    /// Markup of the current component, or `undefined` for an empty wireframe.
    #[wasm_bindgen(js_name = frameHtml)]
    pub fn frame_html(&self) -> Option<String> {
        let interpreter = Interpreter::new(&self.definition, &self.session, &self.bindings, &self.options);
        self.player.frame(&interpreter).map(|frame| wirevana_render::render_html(&frame))
    }

    /// Diagnostics for the current component.
    pub fn diagnostics(&self) -> Result<JsValue, JsError> {
        let diagnostics: Vec<DiagnosticJs> = self
            .player
            .diagnostics(&self.diagnostics)
            .into_iter()
            .map(DiagnosticJs::from)
            .collect();
        to_js(&diagnostics)
    }
}
