mod generate;
mod list;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate as generate_completions, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "doctype-erd")]
#[command(version)]
#[command(about = "Generate entity-relationship diagrams from doctype metadata", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an ERD from exported doctype metadata
    Generate {
        /// Directory containing exported doctype metadata (one JSON file per doctype)
        meta_dir: PathBuf,

        /// Doctypes to include (comma-separated)
        #[arg(short, long)]
        doctypes: Option<String>,

        /// Also include doctypes whose name contains any of these substrings
        /// (comma-separated, case-insensitive)
        #[arg(short, long)]
        contains: Option<String>,

        /// Output file: .dot, .json, or .png/.svg/.pdf to render via Graphviz
        /// (default: timestamped .dot file in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: dot or json (detected from output extension if not specified)
        #[arg(short, long)]
        format: Option<String>,

        /// Layout direction: lr or tb
        #[arg(short, long)]
        layout: Option<String>,

        /// Exclude child-table (Table field) edges
        #[arg(long)]
        no_child_tables: bool,

        /// Omit Link fields: 'all' omits self-references, otherwise a
        /// comma-separated list of fieldnames
        #[arg(long)]
        omit_links: Option<String>,

        /// Write the diagnostic audit text to a sidecar .txt next to the output
        #[arg(long)]
        diagnostics: bool,

        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// List doctypes available in a metadata directory
    List {
        /// Directory containing exported doctype metadata
        meta_dir: PathBuf,

        /// Only show names containing any of these substrings
        /// (comma-separated, case-insensitive)
        #[arg(short, long)]
        contains: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            meta_dir,
            doctypes,
            contains,
            output,
            format,
            layout,
            no_child_tables,
            omit_links,
            diagnostics,
            stdout,
        } => generate::run(
            meta_dir,
            doctypes,
            contains,
            output,
            format,
            layout,
            no_child_tables,
            omit_links,
            diagnostics,
            stdout,
        ),
        Commands::List { meta_dir, contains } => list::run(meta_dir, contains),
        Commands::Completions { shell } => {
            generate_completions(
                shell,
                &mut Cli::command(),
                "doctype-erd",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
