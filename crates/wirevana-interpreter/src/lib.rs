//! Wireframe interpreter and preview runtime for Wirevana.
//!
//! This crate provides:
//! - The interpreter that walks tab, page and layout into a visual node tree
//! - Session state and its transitions (tabs, popup, snackbar, controls)
//! - Host-clock timers for snackbar auto-dismiss and player autoplay
//! - The inspector's static checks and the debug player
//! - The host envelope protocol
//! - [`Preview`], the render entry that ties them together
//!
//! # Example
//!
//! ```
//! use wirevana_interpreter::{MemoryTarget, Preview, RenderOptions};
//!
//! let definition = wirevana_parser::parse_document(r#"{
//!     "tabs": { "Home": { "title": "Home", "page": "HomePage" } },
//!     "pages": { "HomePage": { "layout": { "type": "Label", "text": "Hello" } } }
//! }"#).unwrap();
//!
//! let preview = Preview::mount(Some(MemoryTarget::default()), definition, RenderOptions::default()).unwrap();
//! assert!(preview.target().html.contains("Hello"));
//! ```

pub mod host;
pub mod inspector;
pub mod interpreter;
pub mod options;
pub mod player;
pub mod preview;
pub mod session;
pub mod timers;

pub use host::{Envelope, HostAdapter, HostChannel, HostSink, Inbound, Outbound, RecordingSink, Subscription};
pub use inspector::{inspect, Diagnostic, Severity};
pub use interpreter::{Interpreter, MAX_RENDER_DEPTH};
pub use options::{RenderOptions, DEFAULT_TRUSTED_ORIGIN};
pub use player::{DebugPlayer, PlayerKey};
pub use preview::{MemoryTarget, Preview, RenderTarget};
pub use session::{PreviewEvent, SessionState};
pub use timers::{Fired, TimerId, TimerQueue};

use wirevana_core::errors::WirevanaError;

/// Parse a document and mount it in one step.
pub fn mount_source<T: RenderTarget>(
    target: Option<T>,
    source: &str,
    options: RenderOptions,
) -> Result<Preview<T>, WirevanaError> {
    let definition = wirevana_parser::parse_document(source)?;
    Ok(Preview::mount(target, definition, options)?)
}
