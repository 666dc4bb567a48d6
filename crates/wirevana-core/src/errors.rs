//! Error types for the Wirevana engine.
//!
//! Only integration mistakes are errors. Problems inside a wireframe document
//! (dangling references, unresolved bindings, unknown styles) never surface
//! here; the renderer degrades them to visible placeholders instead.

use thiserror::Error;

/// Top-level error type for the Wirevana engine.
#[derive(Debug, Error)]
pub enum WirevanaError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Mount(#[from] MountError),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Errors while loading a wireframe document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Invalid wireframe JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected {what} to be a JSON object")]
    NotAnObject { what: String },

    #[error("Duplicate tab id: {id}")]
    DuplicateTab { id: String },
}

/// Errors while mounting a preview.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("render_to_canvas requires a valid mount target")]
    MissingTarget,
}

/// Errors from the host adapter.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Host adapter can only run in a browser context")]
    NoWindow,

    #[error("Host adapter expects to run inside an embedding iframe")]
    NotEmbedded,

    #[error("Failed to post message to host: {reason}")]
    PostFailed { reason: String },
}
