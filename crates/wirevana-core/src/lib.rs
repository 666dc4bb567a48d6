//! Core types, document model, and utilities for the Wirevana preview engine.
//!
//! This crate provides the foundational types used across all other wirevana crates:
//! - The wireframe document model (shell, tabs, pages, components)
//! - Semantic style tokens (surface levels, color roles, type scale)
//! - The binding expression AST
//! - JSON value helpers for dotted-path lookup
//! - Error types

pub mod ast;
pub mod binding;
pub mod errors;
pub mod tokens;
pub mod types;
pub mod value;

pub use ast::*;
pub use binding::*;
pub use errors::*;
pub use tokens::*;
pub use types::*;
