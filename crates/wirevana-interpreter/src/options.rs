//! Render options.

use chrono::{DateTime, Utc};
use wirevana_core::tokens::Platform;
use wirevana_resolver::ResolverConfig;

/// Origin trusted for host messages unless configured otherwise.
pub const DEFAULT_TRUSTED_ORIGIN: &str = "https://chat.openai.com";

/// Options for mounting a preview.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Device frame width in px.
    pub viewport_width: u32,
    /// Device frame height in px.
    pub viewport_height: u32,
    /// Design system for styles that do not pin one.
    pub platform: Platform,
    /// Log every style resolution.
    pub debug_styles: bool,
    /// Snackbar auto-dismiss when the component gives no duration.
    pub snackbar_duration_ms: u64,
    /// Debug player autoplay step.
    pub player_interval_ms: u64,
    pub trusted_origin: String,
    /// Clock for relative dates; `None` reads the system clock at mount.
    pub reference_time: Option<DateTime<Utc>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            viewport_width: 390,
            viewport_height: 844,
            platform: Platform::Android,
            debug_styles: false,
            snackbar_duration_ms: 3000,
            player_interval_ms: 1500,
            trusted_origin: DEFAULT_TRUSTED_ORIGIN.to_string(),
            reference_time: None,
        }
    }
}

impl RenderOptions {
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_debug_styles(mut self, debug_styles: bool) -> Self {
        self.debug_styles = debug_styles;
        self
    }

    pub fn with_snackbar_duration(mut self, ms: u64) -> Self {
        self.snackbar_duration_ms = ms;
        self
    }

    pub fn with_player_interval(mut self, ms: u64) -> Self {
        self.player_interval_ms = ms;
        self
    }

    pub fn with_trusted_origin(mut self, origin: impl Into<String>) -> Self {
        self.trusted_origin = origin.into();
        self
    }

    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.reference_time = Some(now);
        self
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            platform_preference: self.platform,
            debug_styles: self.debug_styles,
        }
    }
}
