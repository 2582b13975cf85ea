//! Render-ready view of the schema with table filtering.

use crate::schema::Schema;
use ahash::AHashSet;
use glob::Pattern;

/// Information about a column, flattened for rendering
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Column type (as string for display)
    pub col_type: String,
    /// Key marker for display ("PK", "FK", "PK/FK", "UK", or empty)
    pub key_marker: &'static str,
    /// Whether this column is part of the primary key
    pub is_primary_key: bool,
    /// Whether this column is a foreign key
    pub is_foreign_key: bool,
    /// Whether this column is nullable
    pub is_nullable: bool,
    /// If FK, which table it references
    pub references_table: Option<String>,
    /// If FK, which column it references
    pub references_column: Option<String>,
}

/// Information about a table for ERD rendering
#[derive(Debug, Clone)]
pub struct TableInfo {
    /// Table name
    pub name: String,
    /// All columns in declaration order
    pub columns: Vec<ColumnInfo>,
    /// Whether this is a composite-key junction table
    pub is_junction: bool,
}

/// Information about an edge (FK relationship) in the graph
#[derive(Debug, Clone)]
pub struct EdgeInfo {
    /// Source table (child with FK)
    pub from_table: String,
    /// Source column (FK column, also the edge label)
    pub from_column: String,
    /// Target table (parent being referenced)
    pub to_table: String,
    /// Target column (referenced PK column)
    pub to_column: String,
    /// Relationship cardinality
    pub cardinality: Cardinality,
    /// Edge leaves a junction table (one leg of a many-to-many)
    pub via_junction: bool,
}

/// Relationship cardinality for ERD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    /// Child table holds the FK; the only cardinality in this schema
    #[default]
    ManyToOne,
}

impl Cardinality {
    /// Mermaid erDiagram notation
    pub fn as_mermaid(self) -> &'static str {
        match self {
            Cardinality::ManyToOne => "}o--||",
        }
    }
}

/// A view of the schema ready for ERD rendering.
///
/// Tables and edges keep catalog declaration order so every run
/// produces the same output.
#[derive(Debug)]
pub struct GraphView {
    /// Tables included in this view with full column info
    pub tables: Vec<TableInfo>,
    /// Edges between tables (FK relationships)
    pub edges: Vec<EdgeInfo>,
}

impl GraphView {
    /// Create a full view of the schema (all tables and edges)
    pub fn from_schema(schema: &Schema) -> Self {
        let mut tables = Vec::new();
        let mut edges = Vec::new();

        for table in schema.iter() {
            let is_junction = table.is_junction();

            let columns = table
                .columns
                .iter()
                .map(|col| {
                    let (ref_table, ref_column) = col
                        .references
                        .as_ref()
                        .map(|t| (Some(t.table.clone()), Some(t.column.clone())))
                        .unwrap_or((None, None));

                    ColumnInfo {
                        name: col.name.clone(),
                        col_type: col.col_type.to_string(),
                        key_marker: col.key_role.marker(),
                        is_primary_key: col.key_role.is_primary(),
                        is_foreign_key: col.key_role.is_foreign(),
                        is_nullable: col.is_nullable,
                        references_table: ref_table,
                        references_column: ref_column,
                    }
                })
                .collect();

            for col in table.foreign_keys() {
                // validate() guarantees the target is present
                if let Some(target) = &col.references {
                    edges.push(EdgeInfo {
                        from_table: table.name.clone(),
                        from_column: col.name.clone(),
                        to_table: target.table.clone(),
                        to_column: target.column.clone(),
                        cardinality: Cardinality::ManyToOne,
                        via_junction: is_junction,
                    });
                }
            }

            tables.push(TableInfo {
                name: table.name.clone(),
                columns,
                is_junction,
            });
        }

        Self { tables, edges }
    }

    /// Keep only tables matching the given patterns
    pub fn filter_tables(&mut self, patterns: &[Pattern]) {
        if patterns.is_empty() {
            return;
        }

        let matching: AHashSet<String> = self
            .tables
            .iter()
            .filter(|t| patterns.iter().any(|p| p.matches(&t.name)))
            .map(|t| t.name.clone())
            .collect();

        self.apply_node_filter(&matching);
    }

    /// Drop tables matching the given patterns
    pub fn exclude_tables(&mut self, patterns: &[Pattern]) {
        if patterns.is_empty() {
            return;
        }

        let remaining: AHashSet<String> = self
            .tables
            .iter()
            .filter(|t| !patterns.iter().any(|p| p.matches(&t.name)))
            .map(|t| t.name.clone())
            .collect();

        self.apply_node_filter(&remaining);
    }

    /// Get the number of tables in the view
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Get the number of edges in the view
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Total number of columns across all tables in the view
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }

    /// Check if the view is empty
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Get table info by name
    pub fn get_table(&self, name: &str) -> Option<&TableInfo> {
        self.tables.iter().find(|t| t.name == name)
    }

    fn apply_node_filter(&mut self, keep: &AHashSet<String>) {
        self.tables.retain(|t| keep.contains(&t.name));
        self.edges
            .retain(|e| keep.contains(&e.from_table) && keep.contains(&e.to_table));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::platform_schema;

    fn full_view() -> GraphView {
        GraphView::from_schema(&platform_schema())
    }

    #[test]
    fn test_view_census() {
        let view = full_view();
        assert_eq!(view.table_count(), 8);
        assert_eq!(view.edge_count(), 11);
    }

    #[test]
    fn test_view_keeps_declaration_order() {
        let view = full_view();
        assert_eq!(view.tables[0].name, "User");
        assert_eq!(view.tables[7].name, "PostLike");

        let post = view.get_table("Post").unwrap();
        assert_eq!(post.columns[0].name, "id");
        assert_eq!(post.columns[1].name, "authorId");
    }

    #[test]
    fn test_junction_edges_marked() {
        let view = full_view();
        let junction_edges: Vec<_> = view.edges.iter().filter(|e| e.via_junction).collect();
        assert_eq!(junction_edges.len(), 2);
        assert!(junction_edges.iter().all(|e| e.from_table == "PostLike"));
    }

    #[test]
    fn test_edge_targets() {
        let view = full_view();
        let edge = view
            .edges
            .iter()
            .find(|e| e.from_table == "Community")
            .unwrap();
        assert_eq!(edge.from_column, "ownerId");
        assert_eq!(edge.to_table, "User");
        assert_eq!(edge.to_column, "id");
    }

    #[test]
    fn test_filter_tables() {
        let mut view = full_view();
        let patterns = vec![Pattern::new("Post*").unwrap(), Pattern::new("User").unwrap()];
        view.filter_tables(&patterns);

        assert_eq!(view.table_count(), 3); // User, Post, PostLike
        // Post->Community edge dropped, Post->User and both PostLike legs kept
        assert!(view.edges.iter().all(|e| e.to_table != "Community"));
        assert!(view.edges.iter().any(|e| e.from_table == "PostLike"));
    }

    #[test]
    fn test_exclude_tables_drops_edges() {
        let mut view = full_view();
        let patterns = vec![Pattern::new("User").unwrap()];
        view.exclude_tables(&patterns);

        assert_eq!(view.table_count(), 7);
        assert!(view.edges.iter().all(|e| e.to_table != "User"));
        assert_eq!(view.edge_count(), 6);
    }
}
