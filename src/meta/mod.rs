//! Doctype metadata model.
//!
//! This module provides:
//! - Data models for doctypes and their fields
//! - A closed field-type classification over the framework's string tags
//! - Providers for loading metadata from exported JSON or from memory

mod provider;

pub use provider::{DirProvider, MemoryProvider, MetaProvider};

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Field type classification for diagram purposes.
///
/// The metadata store tags fields with free-form strings; only a handful of
/// them matter for ERD generation, everything else is `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum FieldType {
    /// Reference to another doctype by name; target doctype in `options`
    Link,
    /// Embedded one-to-many child table; child doctype in `options`
    Table,
    /// Layout-only: column break
    ColumnBreak,
    /// Layout-only: section break
    SectionBreak,
    /// Layout-only: tab break
    TabBreak,
    /// Any other field type (Data, Select, Currency, ...)
    Other(String),
}

impl FieldType {
    /// Classify a field-type tag as exported by the metadata store
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Link" => FieldType::Link,
            "Table" => FieldType::Table,
            "Column Break" => FieldType::ColumnBreak,
            "Section Break" => FieldType::SectionBreak,
            "Tab Break" => FieldType::TabBreak,
            _ => FieldType::Other(tag.to_string()),
        }
    }

    /// Layout-only field types never appear as rows in a table node
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            FieldType::ColumnBreak | FieldType::SectionBreak | FieldType::TabBreak
        )
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        FieldType::from_tag(&tag)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Link => write!(f, "Link"),
            FieldType::Table => write!(f, "Table"),
            FieldType::ColumnBreak => write!(f, "Column Break"),
            FieldType::SectionBreak => write!(f, "Section Break"),
            FieldType::TabBreak => write!(f, "Tab Break"),
            FieldType::Other(tag) => write!(f, "{}", tag),
        }
    }
}

/// A single field of a doctype, as exported by the metadata store
#[derive(Debug, Clone, Deserialize)]
pub struct DocField {
    /// Machine name, used as the node port for edges
    pub fieldname: String,
    /// Display label shown in the table row (falls back to fieldname when absent)
    #[serde(default)]
    pub label: Option<String>,
    /// Field type tag
    pub fieldtype: FieldType,
    /// For Link/Table fields, the target doctype name
    #[serde(default)]
    pub options: Option<String>,
    /// Derived-value expression: "<link_fieldname>.<target_fieldname>"
    #[serde(default)]
    pub fetch_from: Option<String>,
    /// User-added field, not part of the base schema
    #[serde(default, deserialize_with = "int_bool")]
    pub is_custom_field: bool,
}

impl DocField {
    /// Display label with fieldname fallback
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.fieldname)
    }
}

/// Metadata snapshot for one doctype: a name plus its ordered field list
#[derive(Debug, Clone, Deserialize)]
pub struct DocTypeMeta {
    /// Unique doctype name
    pub name: String,
    /// Fields in declared order
    #[serde(default)]
    pub fields: Vec<DocField>,
}

impl DocTypeMeta {
    /// Link fields of this doctype that carry a target
    pub fn link_fields(&self) -> impl Iterator<Item = &DocField> {
        self.fields
            .iter()
            .filter(|f| f.fieldtype == FieldType::Link && f.options.is_some())
    }
}

/// The metadata export writes booleans as 0/1 integers; accept both forms
fn int_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrBool {
        Int(i64),
        Bool(bool),
    }

    Ok(match IntOrBool::deserialize(deserializer)? {
        IntOrBool::Int(n) => n != 0,
        IntOrBool::Bool(b) => b,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_classification() {
        assert_eq!(FieldType::from_tag("Link"), FieldType::Link);
        assert_eq!(FieldType::from_tag("Table"), FieldType::Table);
        assert_eq!(FieldType::from_tag("Column Break"), FieldType::ColumnBreak);
        assert_eq!(FieldType::from_tag("Section Break"), FieldType::SectionBreak);
        assert_eq!(FieldType::from_tag("Tab Break"), FieldType::TabBreak);
        assert_eq!(
            FieldType::from_tag("Select"),
            FieldType::Other("Select".to_string())
        );
    }

    #[test]
    fn test_structural_types() {
        assert!(FieldType::ColumnBreak.is_structural());
        assert!(FieldType::SectionBreak.is_structural());
        assert!(FieldType::TabBreak.is_structural());
        assert!(!FieldType::Link.is_structural());
        assert!(!FieldType::Other("Data".to_string()).is_structural());
    }

    #[test]
    fn test_deserialize_field() {
        let json = r#"{
            "fieldname": "salutation",
            "label": "Salutation",
            "fieldtype": "Link",
            "options": "Salutation",
            "fetch_from": null,
            "is_custom_field": 0
        }"#;

        let field: DocField = serde_json::from_str(json).unwrap();
        assert_eq!(field.fieldname, "salutation");
        assert_eq!(field.fieldtype, FieldType::Link);
        assert_eq!(field.options.as_deref(), Some("Salutation"));
        assert!(field.fetch_from.is_none());
        assert!(!field.is_custom_field);
    }

    #[test]
    fn test_deserialize_custom_flag_variants() {
        let as_int: DocField = serde_json::from_str(
            r#"{"fieldname": "x", "fieldtype": "Data", "is_custom_field": 1}"#,
        )
        .unwrap();
        let as_bool: DocField = serde_json::from_str(
            r#"{"fieldname": "x", "fieldtype": "Data", "is_custom_field": true}"#,
        )
        .unwrap();
        let absent: DocField =
            serde_json::from_str(r#"{"fieldname": "x", "fieldtype": "Data"}"#).unwrap();

        assert!(as_int.is_custom_field);
        assert!(as_bool.is_custom_field);
        assert!(!absent.is_custom_field);
    }

    #[test]
    fn test_deserialize_doctype() {
        let json = r#"{
            "name": "Lead",
            "fields": [
                {"fieldname": "salutation", "label": "Salutation", "fieldtype": "Link", "options": "Salutation"},
                {"fieldname": "sb1", "fieldtype": "Section Break"}
            ]
        }"#;

        let meta: DocTypeMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.name, "Lead");
        assert_eq!(meta.fields.len(), 2);
        assert_eq!(meta.link_fields().count(), 1);
    }

    #[test]
    fn test_display_label_fallback() {
        let field: DocField =
            serde_json::from_str(r#"{"fieldname": "status", "fieldtype": "Select"}"#).unwrap();
        assert_eq!(field.display_label(), "status");
    }
}
