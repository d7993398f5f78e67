use crate::error::AriaFixError;
use html5ever::{LocalName, QualName, namespace_url, ns};
use kuchiki::traits::TendrilSink;
use kuchiki::{Attribute, ExpandedName, NodeRef};

// Elements carrying this attribute (or nested under one that does) are
// left untouched by every batch fixer.
pub(crate) const DATA_IGNORE: &str = "data-ignoreaccessibilityfix";

pub(crate) fn parse_document(html: &str) -> NodeRef {
    kuchiki::parse_html().one(html)
}

pub(crate) fn serialize_document(document: &NodeRef) -> Result<String, AriaFixError> {
    let mut out = Vec::new();
    document.serialize(&mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Uppercase tag name, or `None` for non-element nodes.
pub(crate) fn tag_name(node: &NodeRef) -> Option<String> {
    node.as_element()
        .map(|el| el.name.local.as_ref().to_ascii_uppercase())
}

pub(crate) fn is_tag(node: &NodeRef, tag: &str) -> bool {
    node.as_element()
        .map(|el| el.name.local.as_ref().eq_ignore_ascii_case(tag))
        .unwrap_or(false)
}

pub(crate) fn has_attribute(node: &NodeRef, name: &str) -> bool {
    node.as_element()
        .map(|el| el.attributes.borrow().contains(name))
        .unwrap_or(false)
}

pub(crate) fn get_attribute(node: &NodeRef, name: &str) -> Option<String> {
    node.as_element()
        .and_then(|el| el.attributes.borrow().get(name).map(|v| v.to_string()))
}

pub(crate) fn set_attribute(node: &NodeRef, name: &str, value: &str) {
    if let Some(el) = node.as_element() {
        el.attributes.borrow_mut().insert(name, value.to_string());
    }
}

/// Direct children whose tag is one of `tags` (lowercase), in document order.
pub(crate) fn children_with_tags(node: &NodeRef, tags: &[&str]) -> Vec<NodeRef> {
    node.children()
        .filter(|child| {
            child
                .as_element()
                .map(|el| tags.contains(&el.name.local.as_ref()))
                .unwrap_or(false)
        })
        .collect()
}

pub(crate) fn descendants_with_tags(node: &NodeRef, tags: &[&str]) -> Vec<NodeRef> {
    node.descendants()
        .filter(|desc| {
            desc.as_element()
                .map(|el| tags.contains(&el.name.local.as_ref()))
                .unwrap_or(false)
        })
        .collect()
}

pub(crate) fn ancestor_with_tag(node: &NodeRef, tag: &str) -> Option<NodeRef> {
    node.ancestors().find(|ancestor| is_tag(ancestor, tag))
}

/// All matches for a CSS selector scoped to `root`, in document order.
/// An unparseable selector yields no matches rather than an error.
pub(crate) fn select_all(root: &NodeRef, selector: &str) -> Vec<NodeRef> {
    match root.select(selector) {
        Ok(matches) => matches.map(|m| m.as_node().clone()).collect(),
        Err(()) => Vec::new(),
    }
}

pub(crate) fn select_first(root: &NodeRef, selector: &str) -> Option<NodeRef> {
    root.select_first(selector).ok().map(|m| m.as_node().clone())
}

/// Id lookup by tree walk. Avoids quoting pitfalls that arise when user
/// supplied ids are spliced into a selector string.
pub(crate) fn element_by_id(root: &NodeRef, id: &str) -> Option<NodeRef> {
    root.inclusive_descendants().find(|node| {
        node.as_element()
            .map(|el| el.attributes.borrow().get("id") == Some(id))
            .unwrap_or(false)
    })
}

pub(crate) fn create_element(tag: &str) -> NodeRef {
    NodeRef::new_element(
        QualName::new(None, ns!(html), LocalName::from(tag)),
        Vec::<(ExpandedName, Attribute)>::new(),
    )
}

pub(crate) fn append_text(node: &NodeRef, text: &str) {
    node.append(NodeRef::new_text(text));
}

/// Text content with runs of whitespace collapsed to single spaces.
pub(crate) fn normalized_text(node: &NodeRef) -> String {
    node.text_contents()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when neither the element nor any ancestor opts out of remediation.
pub(crate) fn is_remediable(node: &NodeRef) -> bool {
    if has_attribute(node, DATA_IGNORE) {
        return false;
    }
    !node.ancestors().any(|ancestor| has_attribute(&ancestor, DATA_IGNORE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_name_is_uppercase() {
        let doc = parse_document("<table><tr><td>x</td></tr></table>");
        let td = select_first(&doc, "td").expect("td");
        assert_eq!(tag_name(&td).as_deref(), Some("TD"));
    }

    #[test]
    fn children_with_tags_keeps_document_order_and_skips_text() {
        let doc = parse_document("<table><tr> <th>a</th> <td>b</td> <td>c</td> </tr></table>");
        let tr = select_first(&doc, "tr").expect("tr");
        let cells = children_with_tags(&tr, &["td", "th"]);
        let tags: Vec<_> = cells.iter().filter_map(tag_name).collect();
        assert_eq!(tags, vec!["TH", "TD", "TD"]);
    }

    #[test]
    fn element_by_id_handles_ids_that_would_break_a_selector() {
        let doc = parse_document(r#"<div id="a:b.c d"></div>"#);
        assert!(element_by_id(&doc, "a:b.c d").is_some());
        assert!(element_by_id(&doc, "missing").is_none());
    }

    #[test]
    fn ignore_flag_covers_descendants() {
        let doc = parse_document(
            r#"<div data-ignoreaccessibilityfix="true"><table><tr><td>x</td></tr></table></div>"#,
        );
        let table = select_first(&doc, "table").expect("table");
        assert!(!is_remediable(&table));
        let body = select_first(&doc, "body").expect("body");
        assert!(is_remediable(&body));
    }

    #[test]
    fn normalized_text_collapses_whitespace() {
        let doc = parse_document("<label>  First \n name\t </label>");
        let label = select_first(&doc, "label").expect("label");
        assert_eq!(normalized_text(&label), "First name");
    }

    #[test]
    fn created_elements_serialize_with_attributes() {
        let anchor = create_element("a");
        set_attribute(&anchor, "href", "#main");
        append_text(&anchor, "Skip");
        assert!(has_attribute(&anchor, "href"));
        assert_eq!(get_attribute(&anchor, "href").as_deref(), Some("#main"));
        assert_eq!(normalized_text(&anchor), "Skip");
    }
}
