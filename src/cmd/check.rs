//! Check command: report schema catalog consistency issues.

use crate::catalog::platform_schema;
use anyhow::{bail, Result};

/// Run the check command
pub fn run() -> Result<()> {
    let schema = platform_schema();
    let issues = schema.validate();

    if !issues.is_empty() {
        eprintln!("Schema issues found ({}):", issues.len());
        for (i, issue) in issues.iter().enumerate() {
            eprintln!("  {}. {}", i + 1, issue);
        }
        bail!("schema catalog is inconsistent");
    }

    let fk_count: usize = schema.iter().map(|t| t.foreign_keys().count()).sum();
    let column_count: usize = schema.iter().map(|t| t.columns.len()).sum();
    eprintln!(
        "Schema OK: {} tables, {} columns, {} relationships",
        schema.len(),
        column_count,
        fk_count
    );

    Ok(())
}
