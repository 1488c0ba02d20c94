//! List command: show doctypes available in a metadata directory.

use crate::graph::selection::split_arg;
use crate::meta::{DirProvider, MetaProvider};
use anyhow::Result;
use std::path::PathBuf;

/// Run the list command
pub fn run(meta_dir: PathBuf, contains: Option<String>) -> Result<()> {
    let provider = DirProvider::open(&meta_dir)?;
    let needles: Vec<String> = contains
        .as_deref()
        .map(split_arg)
        .unwrap_or_default()
        .iter()
        .map(|s| s.to_lowercase())
        .collect();

    let names = provider.list_names()?;
    let mut shown = 0usize;
    for name in &names {
        let lower = name.to_lowercase();
        if needles.is_empty() || needles.iter().any(|needle| lower.contains(needle)) {
            println!("{}", name);
            shown += 1;
        }
    }

    eprintln!("\n{} of {} doctypes", shown, names.len());
    Ok(())
}
