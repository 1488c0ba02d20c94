//! Building the ERD view from doctype metadata.
//!
//! This is where relationship edges are collected from heterogeneous field
//! metadata: Link and Table fields become relationship edges, fetch-from
//! expressions become derived-value edges. Missing or malformed data never
//! aborts the build; every failure mode degrades to "no edge produced".

use crate::graph::ident::sanitize;
use crate::graph::selection::{split_arg, Selection};
use crate::graph::view::{Edge, EdgeKind, ErdView, FieldRow, TableNode};
use crate::meta::{DocField, DocTypeMeta, FieldType};
use ahash::{AHashMap, AHashSet};
use std::str::FromStr;

/// Which Link fields are excluded from relationship edges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OmitLinks {
    /// Omit nothing
    #[default]
    None,
    /// Omit Link fields whose target is the owning doctype itself
    SelfReferences,
    /// Omit Link fields by fieldname
    Fields(AHashSet<String>),
}

impl OmitLinks {
    /// Whether a Link field on `owner` is excluded
    fn omits(&self, owner: &str, fieldname: &str, target: &str) -> bool {
        match self {
            OmitLinks::None => false,
            OmitLinks::SelfReferences => target == owner,
            OmitLinks::Fields(fields) => fields.contains(fieldname),
        }
    }
}

impl FromStr for OmitLinks {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(OmitLinks::SelfReferences);
        }
        let fields: AHashSet<String> = split_arg(s).into_iter().collect();
        if fields.is_empty() {
            Err(format!(
                "empty omit-links value: {:?}. Pass 'all' or a comma-separated list of fieldnames",
                s
            ))
        } else {
            Ok(OmitLinks::Fields(fields))
        }
    }
}

/// Link fields across all selected doctypes, keyed by (owning doctype, fieldname).
///
/// Built once before edge extraction because a fetch-from expression on one
/// doctype resolves through a Link field that may sit anywhere in its own
/// field list. Keying by owner avoids picking up a same-named Link field from
/// an unrelated doctype.
#[derive(Debug, Default)]
pub struct LinkFieldMap {
    targets: AHashMap<(String, String), String>,
}

impl LinkFieldMap {
    /// Collect all Link fields from the given metadata snapshots
    pub fn collect(metas: &[DocTypeMeta]) -> Self {
        let mut targets = AHashMap::new();
        for meta in metas {
            for field in meta.link_fields() {
                if let Some(options) = &field.options {
                    targets.insert(
                        (meta.name.clone(), field.fieldname.clone()),
                        options.clone(),
                    );
                }
            }
        }
        Self { targets }
    }

    /// Target doctype of the Link field `fieldname` on `doctype`, if any
    pub fn target(&self, doctype: &str, fieldname: &str) -> Option<&str> {
        self.targets
            .get(&(doctype.to_string(), fieldname.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Build the full ERD view from the selected metadata snapshots.
///
/// `metas` must contain exactly the selected doctypes; callers fetch them in
/// sorted selection order so the resulting document is stable across runs.
pub fn build_view(
    metas: &[DocTypeMeta],
    selection: &Selection,
    child_tables: bool,
    omit: &OmitLinks,
) -> ErdView {
    let links = LinkFieldMap::collect(metas);

    let mut view = ErdView::default();
    for meta in metas {
        let (table, edges, fetch_edges) =
            extract_table(meta, &links, selection, child_tables, omit);
        view.tables.push(table);
        view.edges.extend(edges);
        view.fetch_edges.extend(fetch_edges);
    }
    view
}

/// Extract one doctype's table node and its outgoing edges
fn extract_table(
    meta: &DocTypeMeta,
    links: &LinkFieldMap,
    selection: &Selection,
    child_tables: bool,
    omit: &OmitLinks,
) -> (TableNode, Vec<Edge>, Vec<Edge>) {
    let ident = sanitize(&meta.name);
    let mut rows = Vec::new();
    let mut edges = Vec::new();
    let mut fetch_edges = Vec::new();

    for field in &meta.fields {
        if !field.fieldtype.is_structural() {
            rows.push(FieldRow {
                fieldname: field.fieldname.clone(),
                label: field.display_label().to_string(),
                is_custom: field.is_custom_field,
            });
        }

        match &field.fieldtype {
            FieldType::Link => {
                if let Some(target) = &field.options {
                    if !omit.omits(&meta.name, &field.fieldname, target)
                        && selection.contains(target)
                    {
                        edges.push(relationship_edge(&ident, field, target, EdgeKind::Link));
                    }
                }
            }
            FieldType::Table if child_tables => {
                if let Some(target) = &field.options {
                    if selection.contains(target) {
                        edges.push(relationship_edge(
                            &ident,
                            field,
                            target,
                            EdgeKind::ChildTable,
                        ));
                    }
                }
            }
            _ => {}
        }

        if let Some(expr) = &field.fetch_from {
            if let Some(edge) = fetch_edge(&meta.name, &field.fieldname, expr, links, selection) {
                fetch_edges.push(edge);
            }
        }
    }

    (TableNode { name: meta.name.clone(), ident, rows }, edges, fetch_edges)
}

fn relationship_edge(
    owner_ident: &str,
    field: &DocField,
    target: &str,
    kind: EdgeKind,
) -> Edge {
    Edge {
        from_table: owner_ident.to_string(),
        from_port: field.fieldname.clone(),
        to_table: sanitize(target),
        // Every table's header row carries the canonical identity port
        to_port: "name".to_string(),
        kind,
    }
}

/// Resolve a fetch-from expression into a dashed derived-value edge.
///
/// The expression is `<link_fieldname>.<target_fieldname>` where the link
/// field lives on the same doctype as the fetching field. Unparseable
/// expressions, unknown link fields, and targets outside the selection all
/// resolve to `None`.
fn fetch_edge(
    doctype: &str,
    fieldname: &str,
    expr: &str,
    links: &LinkFieldMap,
    selection: &Selection,
) -> Option<Edge> {
    let (link_field, target_field) = expr.split_once('.')?;
    let target = links.target(doctype, link_field)?;
    if !selection.contains(target) {
        return None;
    }

    Some(Edge {
        from_table: sanitize(doctype),
        from_port: fieldname.to_string(),
        to_table: sanitize(target),
        to_port: target_field.to_string(),
        kind: EdgeKind::FetchFrom,
    })
}
