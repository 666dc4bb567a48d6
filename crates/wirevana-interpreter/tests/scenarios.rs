//! End-to-end preview scenarios over the loan tracker fixture.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use serde_json::{json, Value};

use wirevana_interpreter::{mount_source, MemoryTarget, Preview, PreviewEvent, RenderOptions};
use wirevana_render::{NodeKind, ValueTarget, VisualNode};

const LOANS: &str = include_str!("fixtures/loans.json");

fn options() -> RenderOptions {
    RenderOptions::default()
        .with_reference_time(Utc.with_ymd_and_hms(2024, 2, 20, 12, 0, 0).unwrap())
        .with_trusted_origin("https://host.example")
}

fn mount(source: &str) -> Preview<MemoryTarget> {
    mount_source(Some(MemoryTarget::default()), source, options()).unwrap()
}

fn texts(node: &VisualNode) -> Vec<String> {
    node.descendants()
        .filter_map(|n| match &n.kind {
            NodeKind::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn item_count(preview: &Preview<MemoryTarget>) -> usize {
    preview
        .screen()
        .count(|n| matches!(n.kind, NodeKind::CollectionItem { .. }))
}

#[test]
fn malformed_source_fails_before_mounting() {
    let mounted = mount_source(Some(MemoryTarget::default()), "{ not json", options());
    assert!(matches!(mounted, Err(wirevana_core::errors::WirevanaError::Load(_))));
}

#[test]
fn two_tabs_then_list() {
    let mut preview = mount(LOANS);

    let tabs: Vec<_> = preview
        .screen()
        .descendants()
        .filter_map(|n| match &n.kind {
            NodeKind::Tab { id, active, .. } => Some((id.clone(), *active)),
            _ => None,
        })
        .collect();
    assert_eq!(tabs, vec![("Home".to_string(), true), ("List".to_string(), false)]);
    assert_eq!(item_count(&preview), 0);

    let events = preview.select_tab("List");
    assert_eq!(events, vec![PreviewEvent::TabSelected { tab: "List".into() }]);
    assert_eq!(item_count(&preview), 3);
}

#[test]
fn select_tab_is_idempotent() {
    let mut preview = mount(LOANS);
    assert!(preview.select_tab("Home").is_empty());
    assert!(preview.select_tab("Nowhere").is_empty());
    assert_eq!(preview.session().active_tab.as_deref(), Some("Home"));
}

#[test]
fn clicking_tab_control_switches_page() {
    let mut preview = mount(LOANS);
    preview.activate("screen/tabs/List");
    assert_eq!(preview.session().active_tab.as_deref(), Some("List"));
    assert!(texts(preview.screen()).contains(&"Current loans".to_string()));
}

#[test]
fn button_opens_editor_popup() {
    let mut preview = mount(
        r#"{
            "pages": { "Main": { "layout": { "type": "VerticalStack", "children": [
                { "type": "Button", "text": "Edit", "interactions": { "Clicked": "actions.openEditor" } }
            ] } } },
            "components": { "Editor": { "type": "Popup", "title": "Editor" } },
            "actions": { "openEditor": { "type": "popup", "target": "Editor" } }
        }"#,
    );
    preview.activate("screen/page/0/0");
    assert_eq!(preview.session().open_popup.as_deref(), Some("Editor"));
    assert!(preview.screen().find("screen/popup").is_some());

    assert_eq!(preview.close_popup(), vec![PreviewEvent::PopupClosed]);
    assert_eq!(preview.session().open_popup, None);
    assert!(preview.close_popup().is_empty());
    assert_eq!(preview.session().open_popup, None);
}

#[test]
fn missing_binding_renders_literally() {
    let mut preview = mount(LOANS);
    preview.select_tab("List");
    let rendered = texts(preview.screen());
    assert_eq!(rendered.iter().filter(|t| *t == "{binding missingField}").count(), 3);
}

#[test]
fn item_bindings_and_converters() {
    let mut preview = mount(LOANS);
    preview.select_tab("List");
    let rendered = texts(preview.screen());
    for expected in ["Camera", "Tripod", "Tent", "12 days ago", "yesterday", "49 days ago"] {
        assert!(rendered.contains(&expected.to_string()), "missing {expected}: {rendered:?}");
    }
}

#[test]
fn save_in_footer_closes_popup_and_confirms() {
    let mut preview = mount(LOANS);
    preview.activate("screen/page/0/1");
    assert_eq!(preview.session().open_popup.as_deref(), Some("LoanPopup"));

    let events = preview.activate("screen/popup/footer/1");
    assert_eq!(
        events,
        vec![
            PreviewEvent::Command { action: "saveLoan".into(), command: "loans.save".into() },
            PreviewEvent::PopupClosed,
            PreviewEvent::SnackbarShown,
        ]
    );
    assert_eq!(preview.session().values["flags"]["showLoanSnackbar"], true);
    assert!(preview.screen().find("screen/snackbar/action").is_some());
}

#[test]
fn cancel_in_footer_only_closes() {
    let mut preview = mount(LOANS);
    preview.invoke("actions.openLoanForm");
    let events = preview.activate("screen/popup/footer/0");
    assert_eq!(events, vec![PreviewEvent::PopupClosed]);
    assert!(!preview.session().snackbar_visible);
}

#[test]
fn snackbar_auto_dismisses_once() {
    let mut preview = mount(LOANS);
    preview.show_snackbar();

    assert!(preview.advance(2_999).is_empty());
    assert_eq!(preview.advance(3_000), vec![PreviewEvent::SnackbarDismissed]);
    assert!(preview.advance(9_000).is_empty());
    assert_eq!(preview.session().values["flags"]["showLoanSnackbar"], false);
}

#[test]
fn dismissed_snackbar_timer_never_fires() {
    let mut preview = mount(LOANS);
    preview.show_snackbar();
    assert_eq!(preview.dismiss_snackbar(), vec![PreviewEvent::SnackbarDismissed]);
    assert!(preview.advance(60_000).is_empty());
}

#[test]
fn reshowing_snackbar_restarts_its_timer() {
    let mut preview = mount(LOANS);
    preview.show_snackbar();
    preview.advance(2_000);
    preview.show_snackbar();
    assert!(preview.advance(4_000).is_empty());
    assert_eq!(preview.advance(5_000), vec![PreviewEvent::SnackbarDismissed]);
}

#[test]
fn snackbar_action_invokes_and_dismisses() {
    let mut preview = mount(LOANS);
    preview.show_snackbar();
    let events = preview.activate("screen/snackbar/action");
    assert_eq!(
        events,
        vec![
            PreviewEvent::Command { action: "undoDelete".into(), command: "loans.undo".into() },
            PreviewEvent::SnackbarDismissed,
        ]
    );
}

#[test]
fn form_controls_write_state() {
    let mut preview = mount(LOANS);
    preview.invoke("openLoanForm");

    preview.activate("screen/popup/content/1");
    assert_eq!(preview.session().values["form"]["borrower"], "f1");
    preview.activate("screen/popup/content/1");
    assert_eq!(preview.session().values["form"]["borrower"], "f2");
    preview.activate("screen/popup/content/1");
    assert_eq!(preview.session().values["form"]["borrower"], "f1");

    let events = preview.activate("screen/popup/content/2/1");
    assert_eq!(
        events,
        vec![PreviewEvent::ValueChanged {
            target: ValueTarget::State("form.status".into()),
            value: json!("back"),
        }]
    );
    assert!(preview.activate("screen/popup/content/2/1").is_empty());

    preview.activate("screen/popup/content/3");
    assert_eq!(preview.session().values["form"]["remind"], true);

    preview.change_text("screen/popup/content/0", "Camera");
    assert_eq!(preview.session().values["form"]["item"], "Camera");
    let field = preview.screen().find("screen/popup/content/0").unwrap();
    assert!(matches!(&field.kind, NodeKind::TextField { value, .. } if value == "Camera"));
}

#[test]
fn host_navigate_selects_tab() {
    let mut preview = mount(LOANS);
    let message = json!({ "source": "wirevana", "type": "navigate", "payload": { "to": "List" } });

    assert!(preview.receive("https://other.example", &message).is_empty());
    assert!(preview.receive("https://host.example", &json!({ "type": "navigate" })).is_empty());
    assert_eq!(
        preview.receive("https://host.example", &message),
        vec![PreviewEvent::TabSelected { tab: "List".into() }]
    );
}

#[test]
fn teardown_makes_timers_inert() {
    let mut preview = mount(LOANS);
    preview.show_snackbar();
    preview.teardown();
    assert!(preview.is_torn_down());
    assert!(preview.advance(60_000).is_empty());
    assert!(preview.invoke("openLoanForm").is_empty());
    assert_eq!(preview.target().html, "");
}

#[test]
fn fixture_is_clean() {
    let preview = mount(LOANS);
    assert!(preview.diagnostics().is_empty(), "{:?}", preview.diagnostics());
}

fn list_document(items: &[Value]) -> String {
    json!({
        "pages": { "Main": { "layout": {
            "type": "CollectionView",
            "props": { "items": "@sampleData.items", "emptyView": { "type": "Label", "text": "Empty" } },
            "template": { "type": "Label", "text": "{binding name}" }
        } } },
        "sampleData": { "items": items }
    })
    .to_string()
}

proptest! {
    #[test]
    fn one_template_per_item(names in prop::collection::vec("[a-z]{1,8}", 0..20)) {
        let items: Vec<Value> = names.iter().map(|name| json!({ "name": name })).collect();
        let preview = mount(&list_document(&items));

        prop_assert_eq!(item_count(&preview), names.len());
        let empty_views = preview.screen().count(|n| n.kind == NodeKind::EmptyView);
        prop_assert_eq!(empty_views, usize::from(names.is_empty()));

        let rendered = texts(preview.screen());
        if names.is_empty() {
            prop_assert_eq!(rendered, vec!["Empty".to_string()]);
        } else {
            prop_assert_eq!(rendered, names);
        }
    }
}
