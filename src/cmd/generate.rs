//! Generate command: build the schema view and write the diagram.

use crate::catalog::platform_schema;
use crate::graph::{to_dot, to_json, to_mermaid, GraphView, Layout, OutputFormat};
use anyhow::{bail, Context, Result};
use glob::Pattern;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run with the built-in defaults (bare invocation, no flags)
pub fn run_defaults() -> Result<()> {
    run(
        PathBuf::from("docs/database-erd.png"),
        None,
        "lr".to_string(),
        None,
        None,
        false,
    )
}

/// Run the generate command
pub fn run(
    output: PathBuf,
    format: Option<String>,
    layout: String,
    tables: Option<String>,
    exclude: Option<String>,
    no_render: bool,
) -> Result<()> {
    let extension = output
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    let format: OutputFormat = if let Some(ref f) = format {
        f.parse().map_err(|e| anyhow::anyhow!("{}", e))?
    } else {
        extension
            .as_deref()
            .and_then(OutputFormat::from_extension)
            .unwrap_or_default()
    };

    let layout: Layout = layout.parse().map_err(|e| anyhow::anyhow!("{}", e))?;

    let schema = platform_schema();
    let issues = schema.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
        bail!("schema catalog is inconsistent ({} issues)", issues.len());
    }

    let mut view = GraphView::from_schema(&schema);

    if let Some(ref tables) = tables {
        view.filter_tables(&parse_patterns(tables)?);
    }
    if let Some(ref exclude) = exclude {
        view.exclude_tables(&parse_patterns(exclude)?);
    }

    if view.is_empty() {
        bail!("no tables left after filtering");
    }

    let content = match format {
        OutputFormat::Dot => to_dot(&view, layout),
        OutputFormat::Mermaid => to_mermaid(&view),
        OutputFormat::Json => to_json(&view),
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create output directory: {}", parent.display()))?;
        }
    }

    let rasterized = matches!(extension.as_deref(), Some("png" | "svg" | "pdf"));
    if rasterized && format == OutputFormat::Dot && !no_render {
        render_with_graphviz(&content, &output)?;
    } else {
        let mut file = File::create(&output)
            .with_context(|| format!("failed to create output file: {}", output.display()))?;
        file.write_all(content.as_bytes())?;
        eprintln!("ERD written to: {}", output.display());
    }

    eprintln!(
        "ERD: {} tables, {} columns, {} relationships",
        view.table_count(),
        view.column_count(),
        view.edge_count()
    );

    Ok(())
}

/// Split a comma-separated flag value into glob patterns
fn parse_patterns(value: &str) -> Result<Vec<Pattern>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Pattern::new(s).with_context(|| format!("invalid table pattern: {}", s)))
        .collect()
}

/// Render DOT to PNG/SVG/PDF using Graphviz
fn render_with_graphviz(dot_source: &str, output_path: &Path) -> Result<()> {
    let ext = output_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");

    let format_arg = format!("-T{}", ext);

    let mut child = Command::new("dot")
        .arg(&format_arg)
        .arg("-o")
        .arg(output_path)
        .stdin(std::process::Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!(
                    "Graphviz 'dot' command not found. Install Graphviz or use --no-render to emit DOT source."
                )
            } else {
                anyhow::anyhow!("Failed to run dot: {}", e)
            }
        })?;

    if let Some(ref mut stdin) = child.stdin {
        stdin.write_all(dot_source.as_bytes())?;
    }

    let status = child.wait()?;
    if !status.success() {
        bail!("Graphviz dot command failed with status: {}", status);
    }

    eprintln!("Rendered to: {}", output_path.display());
    Ok(())
}
