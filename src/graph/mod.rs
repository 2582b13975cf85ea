//! ERD (Entity-Relationship Diagram) generation module.
//!
//! This module provides:
//! - A render-ready view of the schema (tables, columns, FK edges)
//! - Table filtering by glob pattern
//! - Output formats: DOT (Graphviz), Mermaid, JSON

pub mod format;
pub mod view;

pub use format::{to_dot, to_json, to_mermaid, Layout, OutputFormat};
pub use view::GraphView;
#[allow(unused_imports)]
pub use view::{Cardinality, ColumnInfo, EdgeInfo, TableInfo};
