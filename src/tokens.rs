use crate::dom;
use kuchiki::NodeRef;

/// Ordered set of tokens backing HTML space-separated attribute values
/// (`headers`, `aria-labelledby`, `accesskey`). Insertion order is kept;
/// duplicates are dropped; matching is case-sensitive.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct TokenList {
    tokens: Vec<String>,
}

impl TokenList {
    pub fn parse(raw: &str) -> Self {
        let mut list = TokenList::default();
        for token in raw.split_whitespace() {
            list.insert(token);
        }
        list
    }

    /// Append-if-absent. Returns true when the token was added.
    pub fn insert(&mut self, token: &str) -> bool {
        if token.is_empty() || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|existing| existing == token)
    }

    /// Single-space separated, no leading or trailing space.
    pub fn to_attribute(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Union `token` into the space-separated attribute `name` of `node`,
/// preserving existing tokens and their order.
pub(crate) fn append_to_attribute(node: &NodeRef, name: &str, token: &str) {
    let mut list = match dom::get_attribute(node, name) {
        Some(value) => TokenList::parse(&value),
        None => TokenList::default(),
    };
    list.insert(token);
    dom::set_attribute(node, name, &list.to_attribute());
}
