//! Doctype selection: explicit names plus substring filters.

use std::collections::BTreeSet;

/// Resolved selection of doctypes to diagram.
///
/// The set is sorted so node enumeration order, and with it the emitted
/// document, is stable across runs.
#[derive(Debug, Default)]
pub struct Selection {
    /// Deduplicated doctype names in sorted order
    pub doctypes: BTreeSet<String>,
    /// Names that matched a substring filter (for the diagnostic audit)
    pub matched: Vec<String>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.doctypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctypes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.doctypes.contains(name)
    }
}

/// Resolve explicit names and case-insensitive substring filters into a
/// concrete selection.
///
/// Every name in `available` that contains any of the substrings
/// (case-insensitively) is unioned with the explicit list. Both inputs empty
/// is not an error; the result is simply empty and generation emits a
/// structurally valid empty document.
pub fn resolve(explicit: &[String], substrings: &[String], available: &[String]) -> Selection {
    let mut doctypes: BTreeSet<String> = explicit.iter().cloned().collect();

    let needles: Vec<String> = substrings.iter().map(|s| s.to_lowercase()).collect();
    let mut matched = Vec::new();

    if !needles.is_empty() {
        for name in available {
            let lower = name.to_lowercase();
            if needles.iter().any(|needle| lower.contains(needle)) {
                matched.push(name.clone());
                doctypes.insert(name.clone());
            }
        }
    }

    Selection { doctypes, matched }
}

/// Split a comma-separated CLI argument into trimmed, non-empty parts
pub fn split_arg(arg: &str) -> Vec<String> {
    arg.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_explicit_only() {
        let sel = resolve(
            &names(&["Lead", "Salutation", "Lead"]),
            &[],
            &names(&["Lead", "Salutation", "Item"]),
        );
        assert_eq!(sel.len(), 2);
        assert!(sel.contains("Lead"));
        assert!(sel.contains("Salutation"));
        assert!(sel.matched.is_empty());
    }

    #[test]
    fn test_substring_matching_case_insensitive() {
        let sel = resolve(
            &[],
            &names(&["sales"]),
            &names(&["Sales Order", "Sales Invoice", "Lead", "salesperson"]),
        );
        assert_eq!(sel.len(), 3);
        assert!(sel.contains("Sales Order"));
        assert!(sel.contains("Sales Invoice"));
        assert!(sel.contains("salesperson"));
        assert!(!sel.contains("Lead"));
    }

    #[test]
    fn test_union_deduplicates() {
        let sel = resolve(
            &names(&["Sales Order"]),
            &names(&["order"]),
            &names(&["Sales Order", "Purchase Order"]),
        );
        assert_eq!(sel.len(), 2);
        // Matched list records the filter hits even when already explicit
        assert_eq!(sel.matched, names(&["Sales Order", "Purchase Order"]));
    }

    #[test]
    fn test_empty_inputs() {
        let sel = resolve(&[], &[], &names(&["Lead"]));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_sorted_iteration_order() {
        let sel = resolve(&names(&["Zeta", "Alpha", "Mid"]), &[], &[]);
        let ordered: Vec<&String> = sel.doctypes.iter().collect();
        assert_eq!(ordered, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn test_split_arg() {
        assert_eq!(
            split_arg("Lead, Salutation ,,Item"),
            names(&["Lead", "Salutation", "Item"])
        );
        assert!(split_arg(" , ").is_empty());
    }
}
