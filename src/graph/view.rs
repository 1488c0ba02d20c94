//! ERD view model: table nodes and relationship edges.

/// One row of a table node
#[derive(Debug, Clone)]
pub struct FieldRow {
    /// Machine name, used as the row's connection port
    pub fieldname: String,
    /// Display label shown in the row
    pub label: String,
    /// User-added field, rendered with a distinct background
    pub is_custom: bool,
}

/// A doctype rendered as a table node
#[derive(Debug, Clone)]
pub struct TableNode {
    /// Doctype display name (unsanitized)
    pub name: String,
    /// Sanitized node identifier
    pub ident: String,
    /// Field rows in declared order, structural fields excluded
    pub rows: Vec<FieldRow>,
}

/// How an edge is drawn, and what relationship it signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Many-to-one reference via a Link field
    Link,
    /// One-to-many child ownership via a Table field
    ChildTable,
    /// Derived value pulled through a Link field (fetch-from)
    FetchFrom,
}

/// A directed edge between two table-node ports.
///
/// Both endpoints carry sanitized table identifiers; the ports are raw
/// fieldnames (relationship edges always target the `name` header port).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from_table: String,
    pub from_port: String,
    pub to_table: String,
    pub to_port: String,
    pub kind: EdgeKind,
}

/// The assembled diagram content before formatting
#[derive(Debug, Default)]
pub struct ErdView {
    /// Table nodes in selection (sorted) order
    pub tables: Vec<TableNode>,
    /// Link and child-table edges
    pub edges: Vec<Edge>,
    /// Fetch-from edges, emitted after the relationship edges
    pub fetch_edges: Vec<Edge>,
}

impl ErdView {
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len() + self.fetch_edges.len()
    }

    pub fn field_count(&self) -> usize {
        self.tables.iter().map(|t| t.rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Look up a table node by doctype name
    pub fn get_table(&self, name: &str) -> Option<&TableNode> {
        self.tables.iter().find(|t| t.name == name)
    }
}
