//! Browser host adapter: `postMessage` to the embedding window.

use wasm_bindgen::JsValue;
use web_sys::Window;
use wirevana_core::errors::HostError;
use wirevana_interpreter::{Envelope, HostSink};

use crate::types::to_plain_js;

/// Posts envelopes to `window.parent`.
pub struct BrowserSink {
    parent: Window,
    target_origin: String,
}

impl BrowserSink {
    /// Fails outside a browser, or when the page is not inside an iframe.
    pub fn connect(target_origin: &str) -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let parent = window
            .parent()
            .ok()
            .flatten()
            .ok_or(HostError::NotEmbedded)?;
        if JsValue::from(parent.clone()) == JsValue::from(window) {
            return Err(HostError::NotEmbedded);
        }
        Ok(Self {
            parent,
            target_origin: target_origin.to_string(),
        })
    }
}

impl HostSink for BrowserSink {
    fn post(&mut self, envelope: &Envelope) -> Result<(), HostError> {
        let message = to_plain_js(envelope).map_err(|e| HostError::PostFailed {
            reason: e.to_string(),
        })?;
        self.parent
            .post_message(&message, &self.target_origin)
            .map_err(|e| HostError::PostFailed {
                reason: e.as_string().unwrap_or_else(|| "postMessage threw".to_string()),
            })
    }
}
