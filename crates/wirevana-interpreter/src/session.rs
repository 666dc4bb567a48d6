//! Per-preview interaction state.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use wirevana_core::{
    ast::{ComponentProps, PropValue, WireframeDefinition},
    binding::BindingPath,
    value::{assign, is_truthy, lookup},
};
use wirevana_render::ValueTarget;

/// Mutable state of one mounted preview.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub active_tab: Option<String>,
    pub open_popup: Option<String>,
    pub snackbar_visible: bool,
    /// Working copy of the document's `state`.
    pub values: Value,
    /// Values of controls with no state binding, keyed by node id.
    pub locals: IndexMap<String, Value>,
    /// State flag the snackbar's visibility is bound to, if any.
    snackbar_flag: Option<BindingPath>,
}

impl SessionState {
    /// Initial state: first tab active, nothing open, snackbar from its flag.
    pub fn initial(definition: &WireframeDefinition) -> Self {
        let values = match &definition.state {
            Value::Null => Value::Object(Default::default()),
            other => other.clone(),
        };

        let snackbar_flag = definition.snackbar().and_then(|(_, snackbar)| {
            match ComponentProps::from_map(&snackbar.kind, &snackbar.props) {
                ComponentProps::Snackbar {
                    visible: Some(PropValue::Binding(binding)),
                    ..
                } => binding.state_path().cloned(),
                _ => None,
            }
        });
        let snackbar_visible = snackbar_flag
            .as_ref()
            .and_then(|path| lookup(&values, path))
            .map_or(false, is_truthy);

        Self {
            active_tab: definition.first_tab().map(|tab| tab.id.clone()),
            open_popup: None,
            snackbar_visible,
            values,
            locals: IndexMap::new(),
            snackbar_flag,
        }
    }

    /// Activate a tab. Returns `false` when it is already active or unknown.
    pub fn select_tab(&mut self, definition: &WireframeDefinition, tab: &str) -> bool {
        if self.active_tab.as_deref() == Some(tab) || definition.tab(tab).is_none() {
            return false;
        }
        self.active_tab = Some(tab.to_string());
        true
    }

    pub fn open_popup(&mut self, popup: &str) {
        self.open_popup = Some(popup.to_string());
    }

    /// Close whatever popup is open. Returns whether one was.
    pub fn close_popup(&mut self) -> bool {
        self.open_popup.take().is_some()
    }

    pub fn set_snackbar_visible(&mut self, visible: bool) {
        self.snackbar_visible = visible;
        if let Some(path) = &self.snackbar_flag {
            assign(&mut self.values, path, Value::Bool(visible));
        }
    }

    pub fn value(&self, target: &ValueTarget) -> Option<&Value> {
        match target {
            ValueTarget::State(path) => lookup(&self.values, &BindingPath::parse(path)),
            ValueTarget::Local(id) => self.locals.get(id),
        }
    }

    pub fn set_value(&mut self, target: &ValueTarget, value: Value) {
        match target {
            ValueTarget::State(path) => assign(&mut self.values, &BindingPath::parse(path), value),
            ValueTarget::Local(id) => {
                self.locals.insert(id.clone(), value);
            }
        }
    }
}

/// Something the embedder may want to react to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PreviewEvent {
    TabSelected {
        tab: String,
    },
    PopupOpened {
        popup: String,
    },
    PopupClosed,
    SnackbarShown,
    SnackbarDismissed,
    /// A declared command action. Its label is opaque to the engine.
    Command {
        action: String,
        command: String,
    },
    ValueChanged {
        target: ValueTarget,
        value: Value,
    },
    /// An action name nothing handled.
    UnknownAction {
        action: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirevana_parser::parse_document;

    fn definition() -> WireframeDefinition {
        parse_document(
            r#"{
                "name": "Session",
                "tabs": {
                    "Home": { "title": "Home", "page": "HomePage" },
                    "List": { "title": "List", "page": "ListPage" }
                },
                "pages": { "HomePage": {}, "ListPage": {} },
                "components": {
                    "Toast": {
                        "type": "Snackbar",
                        "props": { "message": "Saved", "isVisible": "@state.flags.toast" }
                    }
                },
                "state": { "flags": { "toast": true } }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let session = SessionState::initial(&definition());
        assert_eq!(session.active_tab.as_deref(), Some("Home"));
        assert_eq!(session.open_popup, None);
        assert!(session.snackbar_visible);
    }

    #[test]
    fn test_select_tab_is_idempotent() {
        let definition = definition();
        let mut session = SessionState::initial(&definition);
        assert!(session.select_tab(&definition, "List"));
        assert!(!session.select_tab(&definition, "List"));
        assert!(!session.select_tab(&definition, "Nowhere"));
        assert_eq!(session.active_tab.as_deref(), Some("List"));
    }

    #[test]
    fn test_snackbar_flag_written_back() {
        let mut session = SessionState::initial(&definition());
        session.set_snackbar_visible(false);
        let flag = ValueTarget::State("flags.toast".into());
        assert_eq!(session.value(&flag), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_values_by_target() {
        let mut session = SessionState::initial(&definition());
        let state = ValueTarget::State("form.notes".into());
        let local = ValueTarget::Local("screen/page/0".into());

        session.set_value(&state, Value::from("Lens cap"));
        session.set_value(&local, Value::from(true));

        assert_eq!(session.value(&state), Some(&Value::from("Lens cap")));
        assert_eq!(session.value(&local), Some(&Value::Bool(true)));
        assert_eq!(session.values["form"]["notes"], "Lens cap");
    }

    #[test]
    fn test_close_popup_from_any_state() {
        let mut session = SessionState::initial(&definition());
        assert!(!session.close_popup());
        session.open_popup("Editor");
        assert!(session.close_popup());
        assert_eq!(session.open_popup, None);
    }
}
