//! Mermaid erDiagram format output.

use crate::graph::view::GraphView;

/// Generate a Mermaid erDiagram from a graph view
pub fn to_mermaid(view: &GraphView) -> String {
    let mut output = String::new();

    output.push_str("erDiagram\n");

    for table in &view.tables {
        let safe_name = escape_mermaid_id(&table.name);
        output.push_str(&format!("    {} {{\n", safe_name));

        for col in &table.columns {
            // Junction columns carry both roles; Mermaid takes
            // comma-separated key markers
            let key_marker = if col.is_primary_key && col.is_foreign_key {
                "PK, FK"
            } else {
                col.key_marker
            };

            let col_type = escape_mermaid_id(&col.col_type);
            let col_name = escape_mermaid_id(&col.name);

            if key_marker.is_empty() {
                output.push_str(&format!("        {} {}\n", col_type, col_name));
            } else {
                output.push_str(&format!(
                    "        {} {} {}\n",
                    col_type, col_name, key_marker
                ));
            }
        }

        output.push_str("    }\n");
    }

    if !view.edges.is_empty() {
        output.push('\n');
    }

    for edge in &view.edges {
        let from = escape_mermaid_id(&edge.from_table);
        let to = escape_mermaid_id(&edge.to_table);
        let cardinality = edge.cardinality.as_mermaid();

        output.push_str(&format!(
            "    {} {} {} : \"{}\"\n",
            from, cardinality, to, edge.from_column
        ));
    }

    output
}

/// Mermaid IDs must be alphanumeric with underscores
fn escape_mermaid_id(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::platform_schema;
    use crate::graph::view::GraphView;

    fn full_view() -> GraphView {
        GraphView::from_schema(&platform_schema())
    }

    #[test]
    fn test_mermaid_er_diagram() {
        let output = to_mermaid(&full_view());

        assert!(output.starts_with("erDiagram\n"));
        assert!(output.contains("User {"));
        assert!(output.contains("PostLike {"));
    }

    #[test]
    fn test_mermaid_columns() {
        let output = to_mermaid(&full_view());

        assert!(output.contains("String id PK"));
        assert!(output.contains("String username UK"));
        assert!(output.contains("String authorId FK"));
        assert!(output.contains("DateTime createdAt"));
    }

    #[test]
    fn test_mermaid_junction_columns_keep_both_roles() {
        let output = to_mermaid(&full_view());

        assert!(output.contains("String postId PK, FK"));
        assert!(output.contains("String userId PK, FK"));
        // Plain PK columns stay single-marker
        assert!(!output.contains("String id PK,"));
    }

    #[test]
    fn test_mermaid_relationships() {
        let output = to_mermaid(&full_view());

        assert!(output.contains("Community }o--|| User : \"ownerId\""));
        assert!(output.contains("PostLike }o--|| Post : \"postId\""));
    }
}
