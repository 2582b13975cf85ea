//! Graphviz DOT format output.

use crate::graph::format::Layout;
use crate::graph::view::{ColumnInfo, GraphView, TableInfo};

// Row highlights: FK rows yellow, junction PK/FK rows green,
// matching the platform's published diagram.
const FK_ROW_COLOR: &str = "lightyellow";
const JUNCTION_ROW_COLOR: &str = "lightgreen";
const FK_EDGE_COLOR: &str = "blue";
const JUNCTION_EDGE_COLOR: &str = "green";

/// Generate DOT source with one record-style node per table and one
/// labeled edge per foreign key
pub fn to_dot(view: &GraphView, layout: Layout) -> String {
    let mut output = String::new();

    output.push_str("digraph ERD {\n");
    output.push_str("  graph [pad=\"0.5\", nodesep=\"0.8\", ranksep=\"1.2\"];\n");

    let rankdir = match layout {
        Layout::LR => "LR",
        Layout::TB => "TB",
    };
    output.push_str(&format!("  rankdir={};\n", rankdir));

    output.push_str("  node [shape=none, margin=0];\n");
    output.push_str("  edge [arrowhead=crow, arrowtail=none, fontsize=10];\n\n");

    for table in &view.tables {
        output.push_str(&format!(
            "  {} [label=<{}>];\n",
            escape_dot_id(&table.name),
            table_label(table)
        ));
    }

    if !view.edges.is_empty() {
        output.push('\n');
    }

    for edge in &view.edges {
        let color = if edge.via_junction {
            JUNCTION_EDGE_COLOR
        } else {
            FK_EDGE_COLOR
        };
        output.push_str(&format!(
            "  {}:{} -> {}:{} [label=\"{}\", color=\"{}\"];\n",
            escape_dot_id(&edge.from_table),
            escape_dot_id(&edge.from_column),
            escape_dot_id(&edge.to_table),
            escape_dot_id(&edge.to_column),
            edge.from_column,
            color
        ));
    }

    output.push_str("}\n");
    output
}

/// HTML-like label: header row, then Key | Column | Type per column
fn table_label(table: &TableInfo) -> String {
    let mut html = String::new();

    html.push_str("<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\" CELLPADDING=\"4\">");

    html.push_str(&format!(
        "<TR><TD BGCOLOR=\"#4a5568\" COLSPAN=\"3\"><FONT COLOR=\"white\"><B>{}</B></FONT></TD></TR>",
        escape_html(&table.name.to_uppercase())
    ));

    for col in &table.columns {
        html.push_str("<TR>");

        let bgcolor = if col.is_foreign_key {
            let color = if table.is_junction && col.is_primary_key {
                JUNCTION_ROW_COLOR
            } else {
                FK_ROW_COLOR
            };
            format!(" BGCOLOR=\"{}\"", color)
        } else {
            String::new()
        };

        html.push_str(&format!(
            "<TD{} ALIGN=\"CENTER\">{}</TD>",
            bgcolor, col.key_marker
        ));
        html.push_str(&format!(
            "<TD{} ALIGN=\"LEFT\" PORT=\"{}\">{}</TD>",
            bgcolor,
            escape_html(&col.name),
            escape_html(&col.name)
        ));
        html.push_str(&format!(
            "<TD{} ALIGN=\"LEFT\">{}</TD>",
            bgcolor,
            type_cell(col)
        ));

        html.push_str("</TR>");
    }

    html.push_str("</TABLE>");
    html
}

/// Type cell: FK columns show their target, others the type with a
/// `?` suffix when nullable
fn type_cell(col: &ColumnInfo) -> String {
    if let (Some(table), Some(column)) = (&col.references_table, &col.references_column) {
        return format!("&rarr; {}.{}", escape_html(table), escape_html(column));
    }

    let suffix = if col.is_nullable { "?" } else { "" };
    format!("{}{}", escape_html(&col.col_type), suffix)
}

/// Escape a string for use in DOT HTML labels
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape a string for use as a DOT node ID
fn escape_dot_id(s: &str) -> String {
    if s.chars().all(|c| c.is_alphanumeric() || c == '_') && !s.is_empty() {
        s.to_string()
    } else {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
