//! Browser tests. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use web_sys::Element;
use wirevana_interpreter::Outbound;
use wirevana_wasm::{render_to_canvas, to_plain_js, WirevanaPlayer};

wasm_bindgen_test_configure!(run_in_browser);

const WIREFRAME: &str = r#"{
    "name": "Browser",
    "tabs": {
        "Home": { "title": "Home", "page": "HomePage" },
        "List": { "title": "List", "page": "ListPage" }
    },
    "pages": {
        "HomePage": { "layout": { "type": "Label", "text": "Hello" } },
        "ListPage": { "layout": { "type": "Label", "text": "Items" } }
    },
    "components": {
        "Greeting": { "type": "Label", "text": "Hi" }
    }
}"#;

fn container() -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let div = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&div).unwrap();
    div
}

#[wasm_bindgen_test]
fn renders_into_the_element() {
    let element = container();
    let preview = render_to_canvas(Some(element.clone()), JsValue::from_str(WIREFRAME), JsValue::UNDEFINED).unwrap();

    assert!(element.inner_html().contains("Hello"));
    assert_eq!(preview.html(), element.inner_html());
}

#[wasm_bindgen_test]
fn missing_element_is_rejected() {
    assert!(render_to_canvas(None, JsValue::from_str(WIREFRAME), JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn tab_switch_rerenders() {
    let element = container();
    let preview = render_to_canvas(Some(element.clone()), JsValue::from_str(WIREFRAME), JsValue::NULL).unwrap();

    preview.select_tab("List").unwrap();
    assert!(element.inner_html().contains("Items"));
}

#[wasm_bindgen_test]
fn teardown_clears_the_element() {
    let element = container();
    let mut preview = render_to_canvas(Some(element.clone()), JsValue::from_str(WIREFRAME), JsValue::UNDEFINED).unwrap();

    preview.teardown();
    preview.teardown();
    assert_eq!(element.inner_html(), "");
}

#[wasm_bindgen_test]
fn player_renders_components() {
    let player = WirevanaPlayer::new(JsValue::from_str(WIREFRAME), JsValue::UNDEFINED, false).unwrap();

    assert_eq!(player.length(), 1);
    assert_eq!(player.current().as_deref(), Some("Greeting"));
    assert!(player.frame_html().unwrap().contains("Hi"));
}

#[wasm_bindgen_test]
fn envelope_payload_is_a_plain_object() {
    let envelope = Outbound::Resize { height: 844.0 }.to_envelope();
    let message = to_plain_js(&envelope).unwrap();

    let payload = Reflect::get(&message, &JsValue::from_str("payload")).unwrap();
    assert!(!payload.is_instance_of::<js_sys::Map>());
    let height = Reflect::get(&payload, &JsValue::from_str("height")).unwrap();
    assert_eq!(height.as_f64(), Some(844.0));
    assert_eq!(
        Reflect::get(&message, &JsValue::from_str("source")).unwrap().as_string().as_deref(),
        Some("wirevana")
    );
}

#[wasm_bindgen_test]
fn session_state_is_a_plain_object() {
    let source = r#"{
        "tabs": { "Home": { "title": "Home", "page": "HomePage" } },
        "pages": { "HomePage": { "layout": { "type": "Label", "text": "Hello" } } },
        "state": { "form": { "title": "Drill" } }
    }"#;
    let preview = render_to_canvas(Some(container()), JsValue::from_str(source), JsValue::UNDEFINED).unwrap();

    let session = preview.session().unwrap();
    let state = Reflect::get(&session, &JsValue::from_str("state")).unwrap();
    let form = Reflect::get(&state, &JsValue::from_str("form")).unwrap();
    let title = Reflect::get(&form, &JsValue::from_str("title")).unwrap();
    assert_eq!(title.as_string().as_deref(), Some("Drill"));
}
