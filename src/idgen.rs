use crate::dom;
use kuchiki::NodeRef;
use std::cell::Cell;

/// Prefixed id assignment for elements that need one. The counter only
/// moves forward; candidates already taken in the document are skipped,
/// so re-running a pass never reassigns or collides. kuchiki documents
/// are `Rc`-based and single-threaded, hence the plain `Cell`.
pub(crate) struct IdGenerator {
    prefix: String,
    next: Cell<u64>,
}

impl IdGenerator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: format!("ariafix-{prefix}"),
            next: Cell::new(1),
        }
    }

    /// Assign a generated id to `element` unless it already has one.
    pub fn ensure_id(&self, document: &NodeRef, element: &NodeRef) {
        if dom::has_attribute(element, "id") {
            return;
        }
        loop {
            let count = self.next.get();
            self.next.set(count + 1);
            let candidate = format!("{}-{}", self.prefix, count);
            if dom::element_by_id(document, &candidate).is_none() {
                dom::set_attribute(element, "id", &candidate);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{get_attribute, parse_document, select_all, select_first};

    #[test]
    fn existing_ids_are_kept() {
        let doc = parse_document(r#"<table><tr><th id="year">Year</th></tr></table>"#);
        let th = select_first(&doc, "th").expect("th");
        IdGenerator::new("table").ensure_id(&doc, &th);
        assert_eq!(get_attribute(&th, "id").as_deref(), Some("year"));
    }

    #[test]
    fn generated_ids_are_unique_within_a_document() {
        let doc = parse_document("<table><tr><th>A</th><th>B</th><th>C</th></tr></table>");
        let ids = IdGenerator::new("table");
        for th in select_all(&doc, "th") {
            ids.ensure_id(&doc, &th);
        }
        let mut seen: Vec<String> = select_all(&doc, "th")
            .iter()
            .filter_map(|th| get_attribute(th, "id"))
            .collect();
        assert_eq!(seen.len(), 3);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 3, "expected three distinct generated ids");
    }

    #[test]
    fn taken_candidates_are_skipped() {
        let doc =
            parse_document(r#"<div id="ariafix-table-1"></div><table><tr><th>A</th></tr></table>"#);
        let th = select_first(&doc, "th").expect("th");
        IdGenerator::new("table").ensure_id(&doc, &th);
        assert_eq!(get_attribute(&th, "id").as_deref(), Some("ariafix-table-2"));
    }
}
