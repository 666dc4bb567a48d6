//! The render entry: a mounted, interactive preview.
//!
//! A [`Preview`] owns one session. Every state change re-renders the screen
//! and hands it to the mount target; timers and host messages are fed in by
//! the embedder through [`Preview::advance`] and [`Preview::receive`].

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use wirevana_core::{
    ast::{strip_action_prefix, ActionKind, ComponentProps, PropValue, WireframeDefinition},
    errors::{HostError, MountError},
};
use wirevana_render::{render_html, Interaction, ValueTarget, VisualNode};
use wirevana_resolver::{BindingResolver, StyleResolver};

use crate::host::{Envelope, HostAdapter, HostSink, Inbound, Outbound, Subscription};
use crate::inspector::{inspect, Diagnostic};
use crate::interpreter::Interpreter;
use crate::options::RenderOptions;
use crate::session::{PreviewEvent, SessionState};
use crate::timers::{TimerId, TimerQueue};

/// Where rendered screens go.
pub trait RenderTarget {
    /// Show a freshly rendered screen.
    fn render(&mut self, screen: &VisualNode, html: &str);

    /// Remove whatever was shown. Called once, on teardown.
    fn clear(&mut self) {}
}

/// Keeps the last frame in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTarget {
    pub html: String,
    pub frames: usize,
}

impl RenderTarget for MemoryTarget {
    fn render(&mut self, _screen: &VisualNode, html: &str) {
        self.html = html.to_string();
        self.frames += 1;
    }

    fn clear(&mut self) {
        self.html.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PreviewTimer {
    DismissSnackbar,
}

/// A mounted wireframe preview.
pub struct Preview<T: RenderTarget> {
    definition: WireframeDefinition,
    options: RenderOptions,
    bindings: BindingResolver,
    session: SessionState,
    target: T,
    screen: VisualNode,
    diagnostics: Vec<Diagnostic>,
    timers: TimerQueue<PreviewTimer>,
    snackbar_timer: Option<TimerId>,
    host: HostAdapter,
    torn_down: bool,
}

impl<T: RenderTarget> Preview<T> {
    /// Mount `definition` into `target` and render the initial screen.
    pub fn mount(target: Option<T>, definition: WireframeDefinition, options: RenderOptions) -> Result<Self, MountError> {
        let target = target.ok_or(MountError::MissingTarget)?;
        let bindings = BindingResolver::new(options.reference_time.unwrap_or_else(Utc::now));
        let session = SessionState::initial(&definition);
        let diagnostics = {
            let styles = StyleResolver::new(&definition.style_library, options.resolver_config());
            inspect(&definition, &styles)
        };
        for diagnostic in &diagnostics {
            debug!(%diagnostic, "wireframe diagnostic");
        }

        let screen = Interpreter::new(&definition, &session, &bindings, &options).render();

        let mut preview = Self {
            host: HostAdapter::new(options.trusted_origin.clone()),
            definition,
            options,
            bindings,
            session,
            target,
            screen,
            diagnostics,
            timers: TimerQueue::new(),
            snackbar_timer: None,
            torn_down: false,
        };
        if preview.session.snackbar_visible {
            preview.schedule_snackbar_dismiss();
        }
        let html = render_html(&preview.screen);
        preview.target.render(&preview.screen, &html);

        info!(
            wireframe = %preview.definition.name,
            tabs = preview.definition.tabs.len(),
            components = preview.definition.components.len(),
            warnings = preview.diagnostics.len(),
            "preview mounted"
        );
        Ok(preview)
    }

    /// Connect an outbound host sink: announces `ready`, the rendered
    /// wireframe and the frame height.
    pub fn connect_host(&mut self, sink: Box<dyn HostSink>, now_ms: f64) -> Result<(), HostError> {
        self.host.connect(sink, now_ms)?;
        self.send(Outbound::WireframeRendered {
            name: self.definition.name.clone(),
            timestamp: now_ms,
        })?;
        self.send(Outbound::Resize {
            height: f64::from(self.options.viewport_height),
        })
    }

    pub fn definition(&self) -> &WireframeDefinition {
        &self.definition
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn screen(&self) -> &VisualNode {
        &self.screen
    }

    pub fn html(&self) -> String {
        render_html(&self.screen)
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// An interpreter over the current state, for one-off renders.
    pub fn interpreter(&self) -> Interpreter<'_> {
        Interpreter::new(&self.definition, &self.session, &self.bindings, &self.options)
    }

    pub fn select_tab(&mut self, tab: &str) -> Vec<PreviewEvent> {
        let mut events = Vec::new();
        if !self.torn_down && self.session.select_tab(&self.definition, tab) {
            debug!(tab, "tab selected");
            events.push(PreviewEvent::TabSelected { tab: tab.to_string() });
            self.rerender();
        }
        events
    }

    /// Run an action by name; `actions.` is optional.
    pub fn invoke(&mut self, action: &str) -> Vec<PreviewEvent> {
        let mut events = Vec::new();
        if !self.torn_down {
            self.apply_action(action, &mut events);
            self.rerender();
        }
        events
    }

    pub fn close_popup(&mut self) -> Vec<PreviewEvent> {
        let mut events = Vec::new();
        if !self.torn_down && self.session.close_popup() {
            events.push(PreviewEvent::PopupClosed);
            self.rerender();
        }
        events
    }

    pub fn show_snackbar(&mut self) -> Vec<PreviewEvent> {
        let mut events = Vec::new();
        if !self.torn_down {
            self.apply_show_snackbar(&mut events);
            self.rerender();
        }
        events
    }

    pub fn dismiss_snackbar(&mut self) -> Vec<PreviewEvent> {
        let mut events = Vec::new();
        if !self.torn_down {
            self.apply_dismiss_snackbar(&mut events);
            self.rerender();
        }
        events
    }

    /// Activate (click) the node with this id.
    pub fn activate(&mut self, node_id: &str) -> Vec<PreviewEvent> {
        let mut events = Vec::new();
        if self.torn_down {
            return events;
        }
        let Some(interaction) = self.screen.find(node_id).and_then(|node| node.interaction.clone()) else {
            debug!(node = node_id, "activated node has no interaction");
            return events;
        };

        match interaction {
            Interaction::SelectTab { tab } => return self.select_tab(&tab),
            Interaction::Invoke {
                action,
                from_popup_footer,
            } => {
                let popup = self.session.open_popup.clone();
                self.apply_action(&action, &mut events);
                let command = events.iter().any(|e| matches!(e, PreviewEvent::Command { .. }));
                // Footer actions finish the popup unless they opened another one.
                if from_popup_footer && popup.is_some() && self.session.open_popup == popup {
                    self.session.close_popup();
                    events.push(PreviewEvent::PopupClosed);
                    if command && self.definition.snackbar().is_some() {
                        self.apply_show_snackbar(&mut events);
                    }
                }
            }
            Interaction::ClosePopup => {
                if self.session.close_popup() {
                    events.push(PreviewEvent::PopupClosed);
                }
            }
            Interaction::DismissSnackbar => self.apply_dismiss_snackbar(&mut events),
            Interaction::SnackbarAction { action } => {
                if let Some(action) = action {
                    self.apply_action(&action, &mut events);
                }
                self.apply_dismiss_snackbar(&mut events);
            }
            Interaction::CyclePicker {
                target,
                options,
                current,
            } => {
                if !options.is_empty() {
                    let next = current.map_or(0, |index| (index + 1) % options.len());
                    self.apply_value(target, options[next].clone(), &mut events);
                }
            }
            Interaction::Toggle {
                target,
                current,
                then,
            } => {
                self.apply_value(target, Value::Bool(!current), &mut events);
                if let Some(then) = then {
                    self.apply_action(&then, &mut events);
                }
            }
            Interaction::SelectRadio { target, value } => self.apply_value(target, value, &mut events),
            // Text changes arrive through `change_text`.
            Interaction::EditText { .. } => return events,
        }

        self.rerender();
        events
    }

    /// Replace the text of the field with this node id.
    pub fn change_text(&mut self, node_id: &str, text: &str) -> Vec<PreviewEvent> {
        let mut events = Vec::new();
        if self.torn_down {
            return events;
        }
        match self.screen.find(node_id).and_then(|node| node.interaction.clone()) {
            Some(Interaction::EditText { target }) => {
                self.apply_value(target, Value::String(text.to_string()), &mut events);
                self.rerender();
            }
            _ => debug!(node = node_id, "text change for a node that is not a text field"),
        }
        events
    }

    /// Feed the host clock. Fires due timers; cancelled ones never fire.
    pub fn advance(&mut self, now_ms: u64) -> Vec<PreviewEvent> {
        let mut events = Vec::new();
        if self.torn_down {
            return events;
        }
        for fired in self.timers.advance(now_ms) {
            match fired.key {
                PreviewTimer::DismissSnackbar if self.snackbar_timer == Some(fired.id) => {
                    self.snackbar_timer = None;
                    if self.session.snackbar_visible {
                        self.session.set_snackbar_visible(false);
                        events.push(PreviewEvent::SnackbarDismissed);
                    }
                }
                PreviewTimer::DismissSnackbar => {}
            }
        }
        if !events.is_empty() {
            self.rerender();
        }
        events
    }

    /// Register a handler for host messages of type `kind`.
    pub fn on(&mut self, kind: &str, handler: impl FnMut(&Envelope) + 'static) -> Subscription {
        self.host.channel_mut().on(kind, handler)
    }

    pub fn unsubscribe(&mut self, subscription: &Subscription) -> bool {
        self.host.channel_mut().unsubscribe(subscription)
    }

    /// Handle a raw message from the host window.
    pub fn receive(&mut self, origin: &str, data: &Value) -> Vec<PreviewEvent> {
        if self.torn_down {
            return Vec::new();
        }
        let Some(envelope) = self.host.channel_mut().receive(origin, data) else {
            return Vec::new();
        };
        match Inbound::from_envelope(&envelope) {
            Some(Inbound::Navigate { to }) => self.select_tab(&to),
            None => Vec::new(),
        }
    }

    /// Ask the host to navigate somewhere.
    pub fn request_navigation(&mut self, to: &str) -> Result<(), HostError> {
        self.send(Outbound::Navigate { to: to.to_string() })
    }

    /// Cancel timers, drop handlers and clear the target. Later calls are no-ops.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.timers.clear();
        self.snackbar_timer = None;
        self.host.disconnect();
        self.target.clear();
        info!(wireframe = %self.definition.name, "preview torn down");
    }

    fn send(&mut self, message: Outbound) -> Result<(), HostError> {
        self.host.send(&message)
    }

    fn rerender(&mut self) {
        self.screen = Interpreter::new(&self.definition, &self.session, &self.bindings, &self.options).render();
        let html = render_html(&self.screen);
        self.target.render(&self.screen, &html);
    }

    fn apply_action(&mut self, action: &str, events: &mut Vec<PreviewEvent>) {
        let name = strip_action_prefix(action);
        let declared = self.definition.action(name).map(|action| action.kind.clone());
        match declared {
            Some(ActionKind::Popup(popup)) => {
                if self.definition.component(&popup).is_none() {
                    warn!(action = name, popup = %popup, "action opens a popup that does not exist");
                }
                self.session.open_popup(&popup);
                events.push(PreviewEvent::PopupOpened { popup });
            }
            Some(ActionKind::Command(command)) => {
                debug!(action = name, command = %command, "command action");
                events.push(PreviewEvent::Command {
                    action: name.to_string(),
                    command,
                });
            }
            Some(ActionKind::Other(kind)) => debug!(action = name, kind = %kind, "action type has no effect"),
            None => match name {
                "closePopup" => {
                    if self.session.close_popup() {
                        events.push(PreviewEvent::PopupClosed);
                    }
                }
                "dismissSnackbar" => self.apply_dismiss_snackbar(events),
                "showSnackbar" => self.apply_show_snackbar(events),
                _ => {
                    warn!(action = name, "undeclared action");
                    events.push(PreviewEvent::UnknownAction {
                        action: name.to_string(),
                    });
                }
            },
        }
    }

    fn apply_show_snackbar(&mut self, events: &mut Vec<PreviewEvent>) {
        if self.definition.snackbar().is_none() {
            debug!("no snackbar component to show");
            return;
        }
        self.session.set_snackbar_visible(true);
        self.schedule_snackbar_dismiss();
        events.push(PreviewEvent::SnackbarShown);
    }

    fn apply_dismiss_snackbar(&mut self, events: &mut Vec<PreviewEvent>) {
        if let Some(timer) = self.snackbar_timer.take() {
            self.timers.cancel(timer);
        }
        if self.session.snackbar_visible {
            self.session.set_snackbar_visible(false);
            events.push(PreviewEvent::SnackbarDismissed);
        }
    }

    fn apply_value(&mut self, target: ValueTarget, value: Value, events: &mut Vec<PreviewEvent>) {
        if self.session.value(&target) == Some(&value) {
            return;
        }
        self.session.set_value(&target, value.clone());
        events.push(PreviewEvent::ValueChanged { target, value });
    }

    /// Replace any pending auto-dismiss with a fresh one.
    fn schedule_snackbar_dismiss(&mut self) {
        if let Some(timer) = self.snackbar_timer.take() {
            self.timers.cancel(timer);
        }
        let duration = self.snackbar_duration();
        if duration > 0 {
            self.snackbar_timer = Some(self.timers.schedule(PreviewTimer::DismissSnackbar, duration));
        }
    }

    /// The snackbar's own `duration`, else the configured default. Zero keeps it up.
    fn snackbar_duration(&self) -> u64 {
        let declared = self.definition.snackbar().and_then(|(_, def)| {
            match ComponentProps::from_map(&def.kind, &def.props) {
                ComponentProps::Snackbar {
                    duration: Some(prop),
                    ..
                } => duration_ms(&prop),
                _ => None,
            }
        });
        declared.unwrap_or(self.options.snackbar_duration_ms)
    }
}

fn duration_ms(prop: &PropValue) -> Option<u64> {
    match prop {
        PropValue::Value(Value::Number(n)) => n.as_f64().map(|ms| ms.max(0.0) as u64),
        other => other.as_literal_str()?.trim().parse().ok(),
    }
}

impl<T: RenderTarget> Drop for Preview<T> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingSink;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wirevana_parser::parse_document;

    const DOC: &str = r#"{
        "name": "Loans",
        "tabs": {
            "Home": { "title": "Home", "page": "HomePage" },
            "List": { "title": "List", "page": "ListPage" }
        },
        "pages": {
            "HomePage": { "layout": { "type": "VerticalStack", "children": [
                { "component": "AddButton" },
                { "type": "Entry", "props": { "label": "Notes", "value": "@state.form.notes" } }
            ] } },
            "ListPage": {}
        },
        "components": {
            "AddButton": { "type": "Button", "text": "Add", "interactions": { "Clicked": "actions.openEditor" } },
            "Editor": {
                "type": "Popup",
                "title": "New loan",
                "footer": { "type": "Button", "text": "Save", "interactions": { "Clicked": "actions.saveLoan" } }
            },
            "Undo": { "type": "Snackbar", "message": "Saved", "actionLabel": "Undo", "durationMs": 2000 }
        },
        "actions": {
            "openEditor": { "type": "popup", "target": "Editor" },
            "saveLoan": { "type": "command", "command": "loans.save" }
        },
        "state": { "form": { "notes": "" } }
    }"#;

    fn mount() -> Preview<MemoryTarget> {
        let options = RenderOptions::default().with_trusted_origin("https://host.example");
        Preview::mount(Some(MemoryTarget::default()), parse_document(DOC).unwrap(), options).unwrap()
    }

    #[test]
    fn test_mount_requires_target() {
        let result = Preview::<MemoryTarget>::mount(None, WireframeDefinition::default(), RenderOptions::default());
        assert!(matches!(result, Err(MountError::MissingTarget)));
    }

    #[test]
    fn test_mount_renders_once() {
        let preview = mount();
        assert_eq!(preview.target().frames, 1);
        assert!(preview.target().html.contains("data-wv-node=\"screen\""));
    }

    #[test]
    fn test_footer_save_closes_popup_and_shows_snackbar() {
        let mut preview = mount();
        let opened = preview.activate("screen/page/0/0");
        assert_eq!(opened, vec![PreviewEvent::PopupOpened { popup: "Editor".into() }]);

        let saved = preview.activate("screen/popup/footer");
        assert_eq!(
            saved,
            vec![
                PreviewEvent::Command { action: "saveLoan".into(), command: "loans.save".into() },
                PreviewEvent::PopupClosed,
                PreviewEvent::SnackbarShown,
            ]
        );
        assert_eq!(preview.session().open_popup, None);
        assert!(preview.screen().find("screen/snackbar").is_some());

        assert!(preview.advance(1999).is_empty());
        assert_eq!(preview.advance(2000), vec![PreviewEvent::SnackbarDismissed]);
        assert!(preview.advance(10_000).is_empty());
    }

    #[test]
    fn test_text_change_writes_state() {
        let mut preview = mount();
        let events = preview.change_text("screen/page/0/1", "Lens cap");
        assert_eq!(events.len(), 1);
        assert_eq!(preview.session().values["form"]["notes"], "Lens cap");
    }

    #[test]
    fn test_builtin_and_unknown_actions() {
        let mut preview = mount();
        assert_eq!(preview.invoke("actions.showSnackbar"), vec![PreviewEvent::SnackbarShown]);
        assert_eq!(preview.invoke("dismissSnackbar"), vec![PreviewEvent::SnackbarDismissed]);
        assert_eq!(
            preview.invoke("actions.launchRocket"),
            vec![PreviewEvent::UnknownAction { action: "launchRocket".into() }]
        );
    }

    #[test]
    fn test_host_navigation_and_teardown() {
        let mut preview = mount();
        let seen = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&seen);
        preview.on("navigate", move |_| *counter.borrow_mut() += 1);

        let message = json!({ "source": "wirevana", "type": "navigate", "payload": { "to": "List" } });
        assert!(preview.receive("https://elsewhere.example", &message).is_empty());
        assert_eq!(
            preview.receive("https://host.example", &message),
            vec![PreviewEvent::TabSelected { tab: "List".into() }]
        );
        assert_eq!(*seen.borrow(), 1);

        preview.invoke("showSnackbar");
        preview.teardown();
        assert!(preview.advance(60_000).is_empty());
        assert!(preview.receive("https://host.example", &message).is_empty());
        assert!(preview.target().html.is_empty());
    }

    #[test]
    fn test_connect_host_announces() {
        let mut preview = mount();
        let sink = Rc::new(RefCell::new(RecordingSink::default()));
        preview.connect_host(Box::new(Rc::clone(&sink)), 5.0).unwrap();
        preview.request_navigation("https://docs.example").unwrap();

        let kinds: Vec<_> = sink.borrow().sent.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(kinds, vec!["ready", "wireframe-rendered", "resize", "navigate"]);
    }
}
