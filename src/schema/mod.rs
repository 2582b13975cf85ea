//! Data model for the platform database schema.
//!
//! This module provides:
//! - Column, table, and foreign-key definitions used by the catalog
//! - Key-role classification (PK, FK, composite PK/FK, UK)
//! - Consistency checks: FK targets must resolve to primary-key columns

use ahash::{AHashMap, AHashSet};
use std::fmt;

/// Application-level column type, displayed as it appears in the
/// platform's schema definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// String/text columns
    Text,
    /// Integer columns
    Int,
    /// Boolean columns
    Bool,
    /// Date/time columns
    DateTime,
}

impl ColumnType {
    /// Display name matching the platform schema definition
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Text => "String",
            ColumnType::Int => "Int",
            ColumnType::Bool => "Boolean",
            ColumnType::DateTime => "DateTime",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a column plays in its table's keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyRole {
    /// Plain data column
    #[default]
    None,
    /// Part of the primary key
    PrimaryKey,
    /// References another table's primary key
    ForeignKey,
    /// Composite-key junction column: both PK member and FK
    PrimaryForeignKey,
    /// Unique constraint
    Unique,
}

impl KeyRole {
    /// Short marker used in diagram output ("PK", "FK", "PK/FK", "UK")
    pub fn marker(self) -> &'static str {
        match self {
            KeyRole::None => "",
            KeyRole::PrimaryKey => "PK",
            KeyRole::ForeignKey => "FK",
            KeyRole::PrimaryForeignKey => "PK/FK",
            KeyRole::Unique => "UK",
        }
    }

    /// Whether this column is part of the primary key
    pub fn is_primary(self) -> bool {
        matches!(self, KeyRole::PrimaryKey | KeyRole::PrimaryForeignKey)
    }

    /// Whether this column carries a foreign-key reference
    pub fn is_foreign(self) -> bool {
        matches!(self, KeyRole::ForeignKey | KeyRole::PrimaryForeignKey)
    }
}

/// Target of a foreign-key reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FkTarget {
    /// Referenced table name
    pub table: String,
    /// Referenced column name (must be part of that table's PK)
    pub column: String,
}

/// Column definition within a table
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Column type
    pub col_type: ColumnType,
    /// Whether this column allows NULL values
    pub is_nullable: bool,
    /// Key role (PK, FK, PK/FK, UK, or none)
    pub key_role: KeyRole,
    /// FK target, set when `key_role.is_foreign()`
    pub references: Option<FkTarget>,
}

/// Table definition: a name and an ordered list of columns.
///
/// The builder methods keep the catalog readable as plain data entry.
#[derive(Debug, Clone)]
pub struct TableSchema {
    /// Table name
    pub name: String,
    /// Column definitions in declaration order
    pub columns: Vec<Column>,
}

impl TableSchema {
    /// Create a new empty table schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    fn push(mut self, name: &str, col_type: ColumnType, nullable: bool, key_role: KeyRole) -> Self {
        self.columns.push(Column {
            name: name.to_string(),
            col_type,
            is_nullable: nullable,
            key_role,
            references: None,
        });
        self
    }

    /// Add a primary-key column
    pub fn pk(self, name: &str, col_type: ColumnType) -> Self {
        self.push(name, col_type, false, KeyRole::PrimaryKey)
    }

    /// Add a unique column
    pub fn unique(self, name: &str, col_type: ColumnType) -> Self {
        self.push(name, col_type, false, KeyRole::Unique)
    }

    /// Add a plain NOT NULL column
    pub fn col(self, name: &str, col_type: ColumnType) -> Self {
        self.push(name, col_type, false, KeyRole::None)
    }

    /// Add a plain nullable column
    pub fn nullable(self, name: &str, col_type: ColumnType) -> Self {
        self.push(name, col_type, true, KeyRole::None)
    }

    /// Add a foreign-key column referencing `table.column`
    pub fn fk(mut self, name: &str, col_type: ColumnType, table: &str, column: &str) -> Self {
        self.columns.push(Column {
            name: name.to_string(),
            col_type,
            is_nullable: false,
            key_role: KeyRole::ForeignKey,
            references: Some(FkTarget {
                table: table.to_string(),
                column: column.to_string(),
            }),
        });
        self
    }

    /// Add a composite-key junction column (PK member that is also a FK)
    pub fn pk_fk(mut self, name: &str, col_type: ColumnType, table: &str, column: &str) -> Self {
        self.columns.push(Column {
            name: name.to_string(),
            col_type,
            is_nullable: false,
            key_role: KeyRole::PrimaryForeignKey,
            references: Some(FkTarget {
                table: table.to_string(),
                column: column.to_string(),
            }),
        });
        self
    }

    /// Add the standard createdAt/updatedAt audit columns
    pub fn timestamps(self) -> Self {
        self.col("createdAt", ColumnType::DateTime)
            .col("updatedAt", ColumnType::DateTime)
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Columns forming the primary key, in declaration order
    pub fn primary_key(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| c.key_role.is_primary())
            .collect()
    }

    /// Columns carrying a foreign-key reference, in declaration order
    pub fn foreign_keys(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.key_role.is_foreign())
    }

    /// A junction table's primary key is composite and made entirely of FKs
    pub fn is_junction(&self) -> bool {
        let pk = self.primary_key();
        pk.len() >= 2 && pk.iter().all(|c| c.key_role.is_foreign())
    }
}

/// Consistency problem found in a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaIssue {
    /// FK column references a table that does not exist
    UnknownFkTable { table: String, column: String, target: String },
    /// FK column references a column that does not exist in the target table
    UnknownFkColumn {
        table: String,
        column: String,
        target_table: String,
        target_column: String,
    },
    /// FK column references a column that is not part of the target's PK
    FkTargetNotPrimary {
        table: String,
        column: String,
        target_table: String,
        target_column: String,
    },
    /// FK key role declared without a reference target
    FkMissingTarget { table: String, column: String },
    /// Column name appears more than once in the same table
    DuplicateColumn { table: String, column: String },
    /// Table name appears more than once in the schema
    DuplicateTable { table: String },
    /// Table has no primary-key column
    MissingPrimaryKey { table: String },
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaIssue::UnknownFkTable { table, column, target } => {
                write!(f, "{}.{}: references unknown table '{}'", table, column, target)
            }
            SchemaIssue::UnknownFkColumn {
                table,
                column,
                target_table,
                target_column,
            } => write!(
                f,
                "{}.{}: references unknown column '{}.{}'",
                table, column, target_table, target_column
            ),
            SchemaIssue::FkTargetNotPrimary {
                table,
                column,
                target_table,
                target_column,
            } => write!(
                f,
                "{}.{}: referenced column '{}.{}' is not a primary key",
                table, column, target_table, target_column
            ),
            SchemaIssue::FkMissingTarget { table, column } => {
                write!(f, "{}.{}: foreign key has no reference target", table, column)
            }
            SchemaIssue::DuplicateColumn { table, column } => {
                write!(f, "{}: duplicate column '{}'", table, column)
            }
            SchemaIssue::DuplicateTable { table } => {
                write!(f, "duplicate table '{}'", table)
            }
            SchemaIssue::MissingPrimaryKey { table } => {
                write!(f, "{}: no primary-key column", table)
            }
        }
    }
}

/// Complete database schema: ordered tables with a name index
#[derive(Debug, Default)]
pub struct Schema {
    index: AHashMap<String, usize>,
    tables: Vec<TableSchema>,
}

impl Schema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table, keeping declaration order
    pub fn add_table(&mut self, table: TableSchema) {
        self.index.insert(table.name.clone(), self.tables.len());
        self.tables.push(table);
    }

    /// Get a table by name
    pub fn get_table(&self, name: &str) -> Option<&TableSchema> {
        self.index.get(name).map(|&i| &self.tables[i])
    }

    /// Iterate over tables in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.iter()
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if schema is empty
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Check schema consistency. Returns every issue found, empty when
    /// the schema is sound:
    /// - each FK target names an existing table and a PK column in it
    /// - table names are unique, and column names are unique within
    ///   each table
    /// - every table has a primary key
    pub fn validate(&self) -> Vec<SchemaIssue> {
        let mut issues = Vec::new();

        let mut seen_tables = AHashSet::new();
        for table in &self.tables {
            if !seen_tables.insert(table.name.as_str()) {
                issues.push(SchemaIssue::DuplicateTable {
                    table: table.name.clone(),
                });
            }
        }

        for table in &self.tables {
            let mut seen = AHashSet::new();
            for col in &table.columns {
                if !seen.insert(col.name.as_str()) {
                    issues.push(SchemaIssue::DuplicateColumn {
                        table: table.name.clone(),
                        column: col.name.clone(),
                    });
                }
            }

            if table.primary_key().is_empty() {
                issues.push(SchemaIssue::MissingPrimaryKey {
                    table: table.name.clone(),
                });
            }

            for col in &table.columns {
                if col.key_role.is_foreign() {
                    let Some(target) = &col.references else {
                        issues.push(SchemaIssue::FkMissingTarget {
                            table: table.name.clone(),
                            column: col.name.clone(),
                        });
                        continue;
                    };

                    let Some(referenced) = self.get_table(&target.table) else {
                        issues.push(SchemaIssue::UnknownFkTable {
                            table: table.name.clone(),
                            column: col.name.clone(),
                            target: target.table.clone(),
                        });
                        continue;
                    };

                    match referenced.get_column(&target.column) {
                        None => issues.push(SchemaIssue::UnknownFkColumn {
                            table: table.name.clone(),
                            column: col.name.clone(),
                            target_table: target.table.clone(),
                            target_column: target.column.clone(),
                        }),
                        Some(ref_col) if !ref_col.key_role.is_primary() => {
                            issues.push(SchemaIssue::FkTargetNotPrimary {
                                table: table.name.clone(),
                                column: col.name.clone(),
                                target_table: target.table.clone(),
                                target_column: target.column.clone(),
                            })
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        issues
    }
}
