//! Metadata providers: where doctype metadata comes from.

use super::DocTypeMeta;
use ahash::AHashMap;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Source of doctype metadata.
///
/// The generation pipeline is sequential, so providers are synchronous; a
/// missing doctype is an error that aborts generation rather than a skipped
/// node.
pub trait MetaProvider {
    /// Fetch the metadata snapshot for one doctype
    fn get_meta(&self, name: &str) -> Result<DocTypeMeta>;

    /// List all doctype names this provider knows about
    fn list_names(&self) -> Result<Vec<String>>;
}

/// Reads doctype metadata from a directory of exported JSON files.
///
/// Expects one `<file>.json` per doctype in the shape produced by the
/// framework's meta export (`name` plus a `fields` array). Files are indexed
/// by the `name` inside the document, not by filename.
#[derive(Debug)]
pub struct DirProvider {
    /// Doctype name -> file path
    index: AHashMap<String, PathBuf>,
}

impl DirProvider {
    /// Scan a directory for `*.json` metadata exports and index them by name
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            bail!("metadata directory does not exist: {}", dir.display());
        }

        let pattern = dir.join("*.json");
        let pattern = pattern
            .to_str()
            .with_context(|| format!("non-UTF-8 metadata path: {}", dir.display()))?;

        let mut index = AHashMap::new();
        for entry in glob::glob(pattern)? {
            let path = entry?;
            let name = peek_name(&path)
                .with_context(|| format!("invalid metadata file: {}", path.display()))?;
            index.insert(name, path);
        }

        Ok(Self { index })
    }

    /// Number of doctypes indexed
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the directory contained no metadata files
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl MetaProvider for DirProvider {
    fn get_meta(&self, name: &str) -> Result<DocTypeMeta> {
        let path = self
            .index
            .get(name)
            .with_context(|| format!("doctype not found: {}", name))?;
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let meta: DocTypeMeta = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(meta)
    }

    fn list_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.index.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

/// Read only the `name` key of a metadata file
fn peek_name(path: &Path) -> Result<String> {
    #[derive(serde::Deserialize)]
    struct NameOnly {
        name: String,
    }

    let content = fs::read_to_string(path)?;
    let doc: NameOnly = serde_json::from_str(&content)?;
    Ok(doc.name)
}

/// In-memory provider for tests and embedding
#[derive(Default)]
pub struct MemoryProvider {
    metas: AHashMap<String, DocTypeMeta>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a doctype snapshot, replacing any previous one with the same name
    pub fn insert(&mut self, meta: DocTypeMeta) {
        self.metas.insert(meta.name.clone(), meta);
    }

    /// Builder-style insert
    pub fn with(mut self, meta: DocTypeMeta) -> Self {
        self.insert(meta);
        self
    }
}

impl MetaProvider for MemoryProvider {
    fn get_meta(&self, name: &str) -> Result<DocTypeMeta> {
        self.metas
            .get(name)
            .cloned()
            .with_context(|| format!("doctype not found: {}", name))
    }

    fn list_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.metas.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
