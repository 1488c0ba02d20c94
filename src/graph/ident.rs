//! Graph-safe identifiers derived from doctype and field names.

use ahash::AHashMap;

/// Map a name to a graph-safe node/port identifier.
///
/// Every non-alphanumeric character becomes `_`, then the whole string is
/// lowercased. Total and idempotent: sanitizing an already-sanitized string
/// is a no-op.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .to_lowercase()
}

/// Find groups of distinct names that sanitize to the same identifier.
///
/// Sanitization is lossy, so two doctype names can collapse onto one node id.
/// That would silently merge nodes and make edges ambiguous, so callers treat
/// any returned group as a validation failure.
pub fn find_collisions<'a, I>(names: I) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut by_ident: AHashMap<String, Vec<String>> = AHashMap::new();
    for name in names {
        by_ident
            .entry(sanitize(name))
            .or_default()
            .push(name.to_string());
    }

    let mut collisions: Vec<Vec<String>> = by_ident
        .into_values()
        .filter(|group| group.len() > 1)
        .collect();
    for group in &mut collisions {
        group.sort();
    }
    collisions.sort();
    collisions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_basic() {
        assert_eq!(sanitize("Lead"), "lead");
        assert_eq!(sanitize("Sales Order"), "sales_order");
        assert_eq!(sanitize("POS Invoice-Item"), "pos_invoice_item");
    }

    #[test]
    fn test_sanitize_idempotent() {
        for s in ["Lead", "Sales Order", "a!b@c", "", "already_sane_42"] {
            assert_eq!(sanitize(&sanitize(s)), sanitize(s));
        }
    }

    #[test]
    fn test_sanitize_non_alphanumeric() {
        assert_eq!(sanitize("a.b/c(d)"), "a_b_c_d_");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_find_collisions() {
        let collisions = find_collisions(["Sales Order", "Sales-Order", "Lead"]);
        assert_eq!(collisions.len(), 1);
        assert_eq!(
            collisions[0],
            vec!["Sales Order".to_string(), "Sales-Order".to_string()]
        );
    }

    #[test]
    fn test_find_collisions_none() {
        assert!(find_collisions(["Lead", "Salutation"]).is_empty());
    }
}
