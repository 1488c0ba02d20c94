//! JSON format output for ERD data.

use crate::graph::view::{EdgeKind, ErdView};
use schemars::JsonSchema;
use serde::Serialize;

/// JSON representation of the ERD
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErdJson {
    pub doctypes: Vec<DocTypeJson>,
    pub relationships: Vec<RelationshipJson>,
    pub stats: ErdStats,
}

/// JSON representation of a doctype node
#[derive(Debug, Serialize, JsonSchema)]
pub struct DocTypeJson {
    pub name: String,
    pub ident: String,
    pub fields: Vec<FieldJson>,
}

/// JSON representation of a field row
#[derive(Debug, Serialize, JsonSchema)]
pub struct FieldJson {
    pub fieldname: String,
    pub label: String,
    pub is_custom: bool,
}

/// JSON representation of a relationship edge
#[derive(Debug, Serialize, JsonSchema)]
pub struct RelationshipJson {
    pub from_doctype: String,
    pub from_field: String,
    pub to_doctype: String,
    pub to_field: String,
    pub kind: String,
}

/// ERD statistics
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErdStats {
    pub doctype_count: usize,
    pub field_count: usize,
    pub relationship_count: usize,
}

/// Generate JSON output from an ERD view
pub fn to_json(view: &ErdView) -> String {
    let erd = build_erd_json(view);
    serde_json::to_string_pretty(&erd).unwrap_or_else(|_| "{}".to_string())
}

/// Build the JSON structure
pub fn build_erd_json(view: &ErdView) -> ErdJson {
    let doctypes: Vec<DocTypeJson> = view
        .tables
        .iter()
        .map(|table| DocTypeJson {
            name: table.name.clone(),
            ident: table.ident.clone(),
            fields: table
                .rows
                .iter()
                .map(|row| FieldJson {
                    fieldname: row.fieldname.clone(),
                    label: row.label.clone(),
                    is_custom: row.is_custom,
                })
                .collect(),
        })
        .collect();

    let relationships: Vec<RelationshipJson> = view
        .edges
        .iter()
        .chain(view.fetch_edges.iter())
        .map(|e| RelationshipJson {
            from_doctype: e.from_table.clone(),
            from_field: e.from_port.clone(),
            to_doctype: e.to_table.clone(),
            to_field: e.to_port.clone(),
            kind: kind_tag(e.kind).to_string(),
        })
        .collect();

    ErdJson {
        stats: ErdStats {
            doctype_count: view.table_count(),
            field_count: view.field_count(),
            relationship_count: view.edge_count(),
        },
        doctypes,
        relationships,
    }
}

fn kind_tag(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Link => "link",
        EdgeKind::ChildTable => "child_table",
        EdgeKind::FetchFrom => "fetch_from",
    }
}
