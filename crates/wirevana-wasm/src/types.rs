//! JavaScript-facing option and result types.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use wirevana_core::tokens::Platform;
use wirevana_interpreter::{Diagnostic, RenderOptions};

/// Convert to a JavaScript value with JSON objects as plain objects.
///
/// The default `serde_wasm_bindgen` serializer turns maps into ES `Map`s,
/// which hosts reading `payload.height` cannot see through.
pub fn to_plain_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

/// Render options from JavaScript. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptionsJs {
    #[serde(default)]
    pub viewport_width: Option<u32>,
    #[serde(default)]
    pub viewport_height: Option<u32>,
    /// `"ios"`, `"android"` or `"auto"`.
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub debug_styles: Option<bool>,
    #[serde(default)]
    pub snackbar_duration_ms: Option<u64>,
    #[serde(default)]
    pub player_interval_ms: Option<u64>,
    #[serde(default)]
    pub trusted_origin: Option<String>,
}

impl RenderOptionsJs {
    pub fn into_core(self) -> RenderOptions {
        let defaults = RenderOptions::default();
        let (width, height) = (defaults.viewport_width, defaults.viewport_height);
        let mut opts = defaults.with_viewport(
            self.viewport_width.unwrap_or(width),
            self.viewport_height.unwrap_or(height),
        );
        if let Some(platform) = self.platform.as_deref().and_then(Platform::from_name) {
            opts = opts.with_platform(platform);
        }
        if let Some(debug) = self.debug_styles {
            opts = opts.with_debug_styles(debug);
        }
        if let Some(ms) = self.snackbar_duration_ms {
            opts = opts.with_snackbar_duration(ms);
        }
        if let Some(ms) = self.player_interval_ms {
            opts = opts.with_player_interval(ms);
        }
        if let Some(origin) = self.trusted_origin {
            opts = opts.with_trusted_origin(origin);
        }
        opts
    }
}

/// Session snapshot for JavaScript.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionJs {
    pub active_tab: Option<String>,
    pub open_popup: Option<String>,
    pub snackbar_visible: bool,
    pub state: serde_json::Value,
}

/// Inspector finding for JavaScript.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticJs {
    pub severity: String,
    pub component: String,
    pub message: String,
}

impl From<&Diagnostic> for DiagnosticJs {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            severity: format!("{:?}", diagnostic.severity).to_lowercase(),
            component: diagnostic.component.clone(),
            message: diagnostic.message.clone(),
        }
    }
}
