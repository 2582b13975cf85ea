mod check;
mod generate;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "platform-erd")]
#[command(version)]
#[command(about = "Render the platform database schema as an entity-relationship diagram", long_about = None)]
pub struct Cli {
    /// Defaults to `generate` when no subcommand is given
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the ERD (the default when run without arguments)
    Generate {
        /// Output file; .png/.svg/.pdf are rendered through Graphviz,
        /// .dot/.mmd/.json are written as-is
        #[arg(short, long, default_value = "docs/database-erd.png")]
        output: PathBuf,

        /// Output format: dot, mermaid, json (detected from the output
        /// extension if not specified)
        #[arg(short, long)]
        format: Option<String>,

        /// Diagram layout direction: lr or tb
        #[arg(short, long, default_value = "lr")]
        layout: String,

        /// Only include specific tables (comma-separated glob patterns)
        #[arg(short, long)]
        tables: Option<String>,

        /// Exclude specific tables (comma-separated glob patterns)
        #[arg(short, long)]
        exclude: Option<String>,

        /// Write DOT source instead of invoking Graphviz
        #[arg(long)]
        no_render: bool,
    },

    /// Check the schema catalog for consistency issues
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        None => generate::run_defaults(),
        Some(Commands::Generate {
            output,
            format,
            layout,
            tables,
            exclude,
            no_render,
        }) => generate::run(output, format, layout, tables, exclude, no_render),
        Some(Commands::Check) => check::run(),
        Some(Commands::Completions { shell }) => {
            generate(shell, &mut Cli::command(), "platform-erd", &mut io::stdout());
            Ok(())
        }
    }
}
