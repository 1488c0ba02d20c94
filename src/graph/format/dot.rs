//! Graphviz DOT output: table nodes with row ports, styled edges, legend.

use crate::graph::format::Layout;
use crate::graph::ident::sanitize;
use crate::graph::view::{Edge, EdgeKind, ErdView, TableNode};

/// Background color marking user-added fields
const CUSTOM_FIELD_BG: &str = "#FEF3E2";

/// Generate the complete DOT document for an ERD view.
///
/// Node blocks come first, then relationship edges, then fetch-from edges,
/// then the fixed legend cluster. The child-table legend row only appears
/// when child-table edges are enabled for this run.
pub fn to_dot(view: &ErdView, layout: Layout, child_tables: bool) -> String {
    let mut output = String::new();

    output.push_str("digraph {\n");
    output.push_str("  graph [pad=\"0.5\", nodesep=\"0.5\", ranksep=\"2\"];\n");
    output.push_str("  node [shape=plain];\n");

    let rankdir = match layout {
        Layout::LR => "LR",
        Layout::TB => "TB",
    };
    output.push_str(&format!("  rankdir={};\n\n", rankdir));

    for table in &view.tables {
        output.push_str(&table_block(table));
        output.push('\n');
    }

    for edge in &view.edges {
        output.push_str(&edge_statement(edge));
        output.push('\n');
    }
    if !view.edges.is_empty() {
        output.push('\n');
    }

    for edge in &view.fetch_edges {
        output.push_str(&edge_statement(edge));
        output.push('\n');
    }
    if !view.fetch_edges.is_empty() {
        output.push('\n');
    }

    output.push_str(&legend_block(child_tables));
    output.push_str("}\n");
    output
}

/// One doctype as a DOT node with an HTML-like table label.
///
/// The header row always carries port `name`, the identity anchor every
/// relationship edge targets.
fn table_block(table: &TableNode) -> String {
    let mut block = String::new();

    block.push_str(&format!("  {} [label=<\n", table.ident));
    block.push_str("    <table border=\"0\" cellborder=\"1\" cellspacing=\"0\">\n");
    block.push_str(&format!(
        "    <tr><td port=\"name\"><b>{}</b></td></tr>\n",
        escape_html(&table.name)
    ));

    for row in &table.rows {
        if row.is_custom {
            block.push_str(&format!(
                "    <tr><td bgcolor=\"{}\" port=\"{}\">{}</td></tr>\n",
                CUSTOM_FIELD_BG,
                sanitize(&row.fieldname),
                escape_html(&row.label)
            ));
        } else {
            block.push_str(&format!(
                "    <tr><td port=\"{}\">{}</td></tr>\n",
                sanitize(&row.fieldname),
                escape_html(&row.label)
            ));
        }
    }

    block.push_str("    </table>>];\n");
    block
}

/// One edge statement with the crow's-foot styling for its kind
fn edge_statement(edge: &Edge) -> String {
    format!(
        "  {}:{} -> {}:{} {};",
        edge.from_table,
        sanitize(&edge.from_port),
        edge.to_table,
        sanitize(&edge.to_port),
        edge_attrs(edge.kind)
    )
}

/// Edge attribute list per kind.
///
/// Link and child-table edges draw arrowheads on both ends purely as
/// crow's-foot notation; the relationship itself is directional.
fn edge_attrs(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Link => "[arrowhead=tee arrowtail=crow dir=both]",
        EdgeKind::ChildTable => "[style=bold color=blue arrowhead=crow arrowtail=tee dir=both]",
        EdgeKind::FetchFrom => "[style=\"dashed\"]",
    }
}

/// The fixed legend cluster demonstrating each line style in use
fn legend_block(child_tables: bool) -> String {
    let (child_entry, child_port, child_key) = if child_tables {
        (
            "\n    <tr><td align=\"left\" port=\"i3\">Child Table</td></tr>",
            "\n    <tr><td port=\"i3\">&nbsp;</td></tr>",
            "\n    key:i3:e -> key2:i3:w [color=blue style=bold arrowhead=crow arrowtail=tee dir=both];",
        )
    } else {
        ("", "", "")
    };

    format!(
        r#"  subgraph cluster_01 {{
    label = "Legend";
    key [label=<<table border="0" cellpadding="2" cellspacing="0" cellborder="0">
    <tr><td align="left" port="i1">Link</td></tr>
    <tr><td align="left" port="i2">Fetch from</td></tr>{child_entry}
    <tr><td>Custom Fields</td>
    <td cellpadding="2"><table border="1" cellpadding="8" cellspacing="0">
    <tr><td bgcolor="{bg}"></td></tr></table></td></tr>
    </table>>];
    key2 [label=<<table border="0" cellpadding="2" cellspacing="0" cellborder="0">
    <tr><td port="i1">&nbsp;</td></tr>
    <tr><td port="i2">&nbsp;</td></tr>{child_port}
    </table>>];
    key:i1:e -> key2:i1:w [arrowhead=tee arrowtail=crow dir=both];
    key:i2:e -> key2:i2:w [style=dashed];{child_key}
  }}
"#,
        child_entry = child_entry,
        child_port = child_port,
        child_key = child_key,
        bg = CUSTOM_FIELD_BG,
    )
}

/// Escape a string for use in DOT HTML labels
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::view::FieldRow;

    fn create_test_view() -> ErdView {
        ErdView {
            tables: vec![
                TableNode {
                    name: "Lead".to_string(),
                    ident: "lead".to_string(),
                    rows: vec![
                        FieldRow {
                            fieldname: "salutation".to_string(),
                            label: "Salutation".to_string(),
                            is_custom: false,
                        },
                        FieldRow {
                            fieldname: "custom_region".to_string(),
                            label: "Region".to_string(),
                            is_custom: true,
                        },
                    ],
                },
                TableNode {
                    name: "Salutation".to_string(),
                    ident: "salutation".to_string(),
                    rows: vec![FieldRow {
                        fieldname: "description".to_string(),
                        label: "Description".to_string(),
                        is_custom: false,
                    }],
                },
            ],
            edges: vec![Edge {
                from_table: "lead".to_string(),
                from_port: "salutation".to_string(),
                to_table: "salutation".to_string(),
                to_port: "name".to_string(),
                kind: EdgeKind::Link,
            }],
            fetch_edges: vec![Edge {
                from_table: "lead".to_string(),
                from_port: "salutation_desc".to_string(),
                to_table: "salutation".to_string(),
                to_port: "description".to_string(),
                kind: EdgeKind::FetchFrom,
            }],
        }
    }

    #[test]
    fn test_dot_structure() {
        let output = to_dot(&create_test_view(), Layout::LR, true);

        assert!(output.starts_with("digraph {"));
        assert!(output.ends_with("}\n"));
        assert!(output.contains("rankdir=LR"));
        assert!(output.contains("node [shape=plain]"));
    }

    #[test]
    fn test_dot_table_blocks() {
        let output = to_dot(&create_test_view(), Layout::LR, true);

        assert!(output.contains("<tr><td port=\"name\"><b>Lead</b></td></tr>"));
        assert!(output.contains("<tr><td port=\"name\"><b>Salutation</b></td></tr>"));
        assert!(output.contains("<tr><td port=\"salutation\">Salutation</td></tr>"));
    }

    #[test]
    fn test_dot_custom_field_background() {
        let output = to_dot(&create_test_view(), Layout::LR, true);
        assert!(output
            .contains("<tr><td bgcolor=\"#FEF3E2\" port=\"custom_region\">Region</td></tr>"));
    }

    #[test]
    fn test_dot_edge_styles() {
        let output = to_dot(&create_test_view(), Layout::LR, true);

        assert!(output
            .contains("lead:salutation -> salutation:name [arrowhead=tee arrowtail=crow dir=both];"));
        assert!(output
            .contains("lead:salutation_desc -> salutation:description [style=\"dashed\"];"));
    }

    #[test]
    fn test_dot_legend() {
        let with_children = to_dot(&create_test_view(), Layout::LR, true);
        assert!(with_children.contains("label = \"Legend\""));
        assert!(with_children.contains(">Child Table</td>"));
        assert!(with_children.contains("key:i3:e -> key2:i3:w"));

        let without = to_dot(&create_test_view(), Layout::LR, false);
        assert!(without.contains("label = \"Legend\""));
        assert!(!without.contains("Child Table"));
        assert!(!without.contains("key:i3"));
    }

    #[test]
    fn test_dot_empty_view_is_valid() {
        let output = to_dot(&ErdView::default(), Layout::LR, false);
        assert!(output.starts_with("digraph {"));
        assert!(output.contains("label = \"Legend\""));
        assert!(output.ends_with("}\n"));
    }

    #[test]
    fn test_dot_escapes_html_labels() {
        let view = ErdView {
            tables: vec![TableNode {
                name: "A & B <C>".to_string(),
                ident: sanitize("A & B <C>"),
                rows: vec![],
            }],
            edges: vec![],
            fetch_edges: vec![],
        };
        let output = to_dot(&view, Layout::TB, false);

        assert!(output.contains("<b>A &amp; B &lt;C&gt;</b>"));
        assert!(output.contains("rankdir=TB"));
    }
}
