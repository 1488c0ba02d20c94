//! Generate command implementation (ERD generation).

use crate::graph::{
    generate, selection::split_arg, to_dot, to_json, GenerateOptions, Layout, OmitLinks,
    OutputFormat,
};
use crate::meta::DirProvider;
use anyhow::{bail, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run the generate command
#[allow(clippy::too_many_arguments)]
pub fn run(
    meta_dir: PathBuf,
    doctypes: Option<String>,
    contains: Option<String>,
    output: Option<PathBuf>,
    format: Option<String>,
    layout: Option<String>,
    no_child_tables: bool,
    omit_links: Option<String>,
    diagnostics: bool,
    stdout: bool,
) -> Result<()> {
    // Parse format
    let format = if let Some(ref f) = format {
        f.parse().map_err(|e| anyhow::anyhow!("{}", e))?
    } else if let Some(ref out) = output {
        out.extension()
            .and_then(|e| e.to_str())
            .and_then(OutputFormat::from_extension)
            .unwrap_or(OutputFormat::Dot)
    } else {
        OutputFormat::Dot
    };

    // Parse layout
    let layout: Layout = layout
        .map(|l| l.parse())
        .transpose()
        .map_err(|e| anyhow::anyhow!("{}", e))?
        .unwrap_or_default();

    let omit_links: OmitLinks = omit_links
        .map(|o| o.parse())
        .transpose()
        .map_err(|e| anyhow::anyhow!("{}", e))?
        .unwrap_or_default();

    let provider = DirProvider::open(&meta_dir)?;
    if provider.is_empty() {
        eprintln!("No metadata files found in: {}", meta_dir.display());
    }

    let opts = GenerateOptions {
        doctypes: doctypes.as_deref().map(split_arg).unwrap_or_default(),
        substrings: contains.as_deref().map(split_arg).unwrap_or_default(),
        child_tables: !no_child_tables,
        omit_links,
    };

    let generation = generate(&provider, &opts)?;
    eprint!("{}", generation.diagnostic);

    let child_tables = opts.child_tables;
    let content = match format {
        OutputFormat::Dot => to_dot(&generation.view, layout, child_tables),
        OutputFormat::Json => to_json(&generation.view),
    };

    if stdout {
        println!("{}", content);
    } else {
        let out_path = output.unwrap_or_else(|| {
            let names: Vec<&str> = generation
                .selection
                .doctypes
                .iter()
                .map(String::as_str)
                .collect();
            PathBuf::from(format!("{}.{}", default_stem(&names), format.extension()))
        });

        // png/svg/pdf targets go through Graphviz
        let rendered_ext = out_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_lowercase().as_str(), "png" | "svg" | "pdf"))
            .unwrap_or(false);

        if rendered_ext && format == OutputFormat::Dot {
            render_with_graphviz(&content, &out_path)?;
        } else {
            let mut file = File::create(&out_path)?;
            file.write_all(content.as_bytes())?;
            eprintln!("ERD written to: {}", out_path.display());
        }

        if diagnostics {
            let diag_path = out_path.with_extension("txt");
            std::fs::write(&diag_path, &generation.diagnostic)?;
            eprintln!("Diagnostics written to: {}", diag_path.display());
        }
    }

    eprintln!(
        "\nERD: {} doctypes, {} fields, {} relationships",
        generation.view.table_count(),
        generation.view.field_count(),
        generation.view.edge_count()
    );

    Ok(())
}

/// Default output stem: run timestamp plus a short digest of the selection,
/// so repeated runs over different selections do not overwrite each other
fn default_stem(selected: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for name in selected {
        hasher.update(name.as_bytes());
        hasher.update([0]);
    }
    let digest = hex::encode(&hasher.finalize()[..2]);
    let timestamp = chrono::Local::now().format("%y%m%d%H%M");
    format!("{}-{}", timestamp, digest)
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
                    "Graphviz 'dot' command not found. Install Graphviz or write a .dot file instead."
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
