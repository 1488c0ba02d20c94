//! ERD (Entity-Relationship Diagram) generation module.
//!
//! This module provides:
//! - Doctype selection from explicit names and substring filters
//! - Edge extraction from Link, Table, and fetch-from field metadata
//! - Graph-safe identifier sanitization with collision validation
//! - Output formats: DOT (Graphviz) and JSON

pub mod build;
pub mod format;
pub mod generate;
pub mod ident;
pub mod selection;
pub mod view;

pub use build::{LinkFieldMap, OmitLinks};
pub use format::{to_dot, to_json, Layout, OutputFormat};
pub use generate::{generate, GenerateOptions, Generation};
pub use ident::sanitize;
pub use selection::Selection;
pub use view::ErdView;
// Re-export for tests and external use
#[allow(unused_imports)]
pub use view::{Edge, EdgeKind, FieldRow, TableNode};
