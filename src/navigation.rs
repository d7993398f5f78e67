use crate::config::{Configure, Skipper};
use crate::debug::DebugLogger;
use crate::dom;
use crate::idgen::IdGenerator;
use crate::tokens::TokenList;
use kuchiki::NodeRef;
use std::cell::{Cell, RefCell};

const ID_CONTAINER_SHORTCUTS: &str = "container-shortcuts";
const ID_CONTAINER_SKIPPERS: &str = "container-skippers";
const ID_CONTAINER_HEADING: &str = "container-heading";
const ID_TEXT_SHORTCUTS: &str = "text-shortcuts";
const ID_TEXT_HEADING: &str = "text-heading";
const CLASS_SKIPPER_ANCHOR: &str = "skipper-anchor";
const CLASS_HEADING_ANCHOR: &str = "heading-anchor";
const CLASS_LONG_DESCRIPTION_LINK: &str = "longdescription-link";
const DATA_ACCESS_KEY: &str = "data-shortcutdescriptionfor";
const DATA_ANCHOR_FOR: &str = "data-anchorfor";
const DATA_HEADING_ANCHOR_FOR: &str = "data-headinganchorfor";
const DATA_HEADING_LEVEL: &str = "data-headinglevel";
const DATA_LONG_DESCRIPTION_FOR: &str = "data-longdescriptionfor";

/// Keyboard-shortcut inventory, skip-navigation links, heading anchors
/// and long-description links. Containers are generated on first use
/// and found again by id on later runs.
pub(crate) struct Navigation<'a> {
    document: &'a NodeRef,
    configure: &'a Configure,
    skippers: &'a [Skipper],
    shortcut_prefix: &'a str,
    ids: IdGenerator,
    debug: Option<&'a DebugLogger>,
    shortcut_list: RefCell<Option<NodeRef>>,
    shortcut_list_resolved: Cell<bool>,
    skipper_list: RefCell<Option<NodeRef>>,
    skipper_list_resolved: Cell<bool>,
    heading_checked: Cell<bool>,
    heading_valid: Cell<bool>,
}

impl<'a> Navigation<'a> {
    pub fn new(
        document: &'a NodeRef,
        configure: &'a Configure,
        skippers: &'a [Skipper],
        shortcut_prefix: &'a str,
        debug: Option<&'a DebugLogger>,
    ) -> Self {
        Self {
            document,
            configure,
            skippers,
            shortcut_prefix,
            ids: IdGenerator::new("navigation"),
            debug,
            shortcut_list: RefCell::new(None),
            shortcut_list_resolved: Cell::new(false),
            skipper_list: RefCell::new(None),
            skipper_list_resolved: Cell::new(false),
            heading_checked: Cell::new(false),
            heading_valid: Cell::new(false),
        }
    }

    pub fn fix_all(&self) {
        self.fix_skippers();
        self.fix_shortcuts();
        self.fix_headings();
        self.fix_long_descriptions();
    }

    /// Add a shortcuts-list entry for each key in the element's
    /// `accesskey`, described by the element's accessible name.
    pub fn fix_shortcut(&self, element: &NodeRef) {
        let Some(keys) = dom::get_attribute(element, "accesskey") else {
            return;
        };
        let description = self.description_of(element);
        if !dom::has_attribute(element, "title") {
            dom::set_attribute(element, "title", &description);
        }
        if !self.shortcut_list_resolved.get() {
            *self.shortcut_list.borrow_mut() = self.generate_shortcut_list();
            self.shortcut_list_resolved.set(true);
        }
        let list = self.shortcut_list.borrow();
        let Some(list) = list.as_ref() else {
            return;
        };
        for key in keys.split_whitespace() {
            let key = key.to_uppercase();
            if find_by_attribute(list, DATA_ACCESS_KEY, &key).is_some() {
                continue;
            }
            let item = dom::create_element("li");
            dom::set_attribute(&item, DATA_ACCESS_KEY, &key);
            dom::append_text(
                &item,
                &format!("{} + {}: {}", self.shortcut_prefix, key, description),
            );
            list.append(item);
            if let Some(log) = self.debug {
                log.increment("navigation.shortcut", 1);
            }
        }
    }

    pub fn fix_shortcuts(&self) {
        for element in dom::select_all(self.document, "[accesskey]") {
            if dom::is_remediable(&element) {
                self.fix_shortcut(&element);
            }
        }
    }

    /// Anchor the skipper target and add a jump link (with its access
    /// key, displacing any conflicting assignment) to the skippers list.
    pub fn fix_skipper(&self, element: &NodeRef, skipper: &Skipper) {
        if !self.skipper_list_resolved.get() {
            *self.skipper_list.borrow_mut() = self.generate_skipper_list();
            self.skipper_list_resolved.set(true);
        }
        let list = self.skipper_list.borrow();
        let Some(list) = list.as_ref() else {
            return;
        };
        let Some(anchor) = self.generate_anchor_for(element, DATA_ANCHOR_FOR, CLASS_SKIPPER_ANCHOR)
        else {
            return;
        };
        let Some(name) = dom::get_attribute(&anchor, "name") else {
            return;
        };
        let item = dom::create_element("li");
        let link = dom::create_element("a");
        dom::set_attribute(&link, "href", &format!("#{name}"));
        dom::append_text(&link, &skipper.description);
        if let Some(shortcut) = skipper.shortcut.chars().next() {
            let shortcut = shortcut.to_lowercase().to_string();
            self.free_shortcut(&shortcut);
            dom::set_attribute(&link, "accesskey", &shortcut);
        }
        self.ids.ensure_id(self.document, &link);
        item.append(link);
        list.append(item);
        if let Some(log) = self.debug {
            log.increment("navigation.skipper", 1);
        }
    }

    pub fn fix_skippers(&self) {
        for skipper in self.skippers {
            for element in dom::select_all(self.document, &skipper.selector) {
                if dom::is_remediable(&element) {
                    self.fix_skipper(&element, skipper);
                }
            }
        }
    }

    /// Anchor a heading and mirror it into the heading table of
    /// contents. Only runs when the whole document's heading hierarchy
    /// is consistent.
    pub fn fix_heading(&self, element: &NodeRef) {
        if !self.heading_checked.get() {
            self.heading_valid.set(self.headings_are_valid());
            self.heading_checked.set(true);
        }
        if !self.heading_valid.get() {
            return;
        }
        let Some(level) = heading_level(element) else {
            return;
        };
        let Some(anchor) =
            self.generate_anchor_for(element, DATA_HEADING_ANCHOR_FOR, CLASS_HEADING_ANCHOR)
        else {
            return;
        };
        let Some(name) = dom::get_attribute(&anchor, "name") else {
            return;
        };
        let list = if level == 1 {
            self.generate_heading_list()
        } else {
            self.heading_sublist_for_level(level)
        };
        let Some(list) = list else {
            return;
        };
        let item = dom::create_element("li");
        dom::set_attribute(&item, DATA_HEADING_LEVEL, &level.to_string());
        let link = dom::create_element("a");
        dom::set_attribute(&link, "href", &format!("#{name}"));
        dom::append_text(&link, &dom::normalized_text(element));
        item.append(link);
        list.append(item);
        if let Some(log) = self.debug {
            log.increment("navigation.heading", 1);
        }
    }

    pub fn fix_headings(&self) {
        for element in dom::select_all(self.document, "h1,h2,h3,h4,h5,h6") {
            if dom::is_remediable(&element) {
                self.fix_heading(&element);
            }
        }
    }

    /// Insert a visible link to an image's `longdesc` URL right after
    /// the image.
    pub fn fix_long_description(&self, element: &NodeRef) {
        let Some(longdesc) = dom::get_attribute(element, "longdesc") else {
            return;
        };
        self.ids.ensure_id(self.document, element);
        let Some(id) = dom::get_attribute(element, "id") else {
            return;
        };
        if find_by_attribute(self.document, DATA_LONG_DESCRIPTION_FOR, &id).is_some() {
            return;
        }
        let text = match dom::get_attribute(element, "alt") {
            Some(alt) => format!(
                "{} {} {}",
                self.configure.prefix_long_description, alt, self.configure.suffix_long_description
            ),
            None => format!(
                "{} {}",
                self.configure.prefix_long_description, self.configure.suffix_long_description
            ),
        };
        let anchor = dom::create_element("a");
        dom::set_attribute(&anchor, "href", &longdesc);
        dom::set_attribute(&anchor, "target", "_blank");
        dom::set_attribute(&anchor, DATA_LONG_DESCRIPTION_FOR, &id);
        dom::set_attribute(&anchor, "class", CLASS_LONG_DESCRIPTION_LINK);
        dom::append_text(&anchor, text.trim());
        element.insert_after(anchor);
        if let Some(log) = self.debug {
            log.log_fix("navigation", "[longdesc]", &longdesc);
            log.increment("navigation.longdesc", 1);
        }
    }

    pub fn fix_long_descriptions(&self) {
        for element in dom::select_all(self.document, "[longdesc]") {
            if dom::is_remediable(&element) {
                self.fix_long_description(&element);
            }
        }
    }

    /// Accessible name lookup: explicit naming attributes first, then
    /// referenced describers, then button values, then text content.
    fn description_of(&self, element: &NodeRef) -> String {
        let mut description = dom::get_attribute(element, "title")
            .or_else(|| dom::get_attribute(element, "aria-label"))
            .or_else(|| dom::get_attribute(element, "alt"))
            .or_else(|| dom::get_attribute(element, "label"));
        if description.is_none() {
            let referenced = dom::get_attribute(element, "aria-labelledby")
                .or_else(|| dom::get_attribute(element, "aria-describedby"));
            if let Some(ids) = referenced {
                for id in ids.split_whitespace() {
                    if let Some(target) = dom::element_by_id(self.document, id) {
                        description = Some(target.text_contents());
                        break;
                    }
                }
            }
        }
        if description.is_none() && dom::tag_name(element).as_deref() == Some("INPUT") {
            let input_type = dom::get_attribute(element, "type").map(|t| t.to_ascii_lowercase());
            if matches!(input_type.as_deref(), Some("button") | Some("submit") | Some("reset")) {
                description = dom::get_attribute(element, "value");
            }
        }
        let description = match description {
            Some(text) if !text.trim().is_empty() => text,
            _ => element.text_contents(),
        };
        description.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn generate_shortcut_list(&self) -> Option<NodeRef> {
        let container = match dom::element_by_id(self.document, ID_CONTAINER_SHORTCUTS) {
            Some(existing) => existing,
            None => {
                let body = dom::select_first(self.document, "body")?;
                let container = dom::create_element("div");
                dom::set_attribute(&container, "id", ID_CONTAINER_SHORTCUTS);
                let text = dom::create_element("span");
                dom::set_attribute(&text, "id", ID_TEXT_SHORTCUTS);
                dom::append_text(&text, &self.configure.text_shortcuts);
                container.append(text);
                body.append(container.clone());
                container
            }
        };
        match dom::children_with_tags(&container, &["ul"]).into_iter().next() {
            Some(list) => Some(list),
            None => {
                let list = dom::create_element("ul");
                container.append(list.clone());
                Some(list)
            }
        }
    }

    /// The skippers container leads the page: inserted before the
    /// body's first element so it is the first thing reached by tab.
    fn generate_skipper_list(&self) -> Option<NodeRef> {
        let container = match dom::element_by_id(self.document, ID_CONTAINER_SKIPPERS) {
            Some(existing) => existing,
            None => {
                let body = dom::select_first(self.document, "body")?;
                let container = dom::create_element("div");
                dom::set_attribute(&container, "id", ID_CONTAINER_SKIPPERS);
                match body.children().find(|child| child.as_element().is_some()) {
                    Some(first) => first.insert_before(container.clone()),
                    None => body.append(container.clone()),
                }
                container
            }
        };
        match dom::children_with_tags(&container, &["ul"]).into_iter().next() {
            Some(list) => Some(list),
            None => {
                let list = dom::create_element("ul");
                container.append(list.clone());
                Some(list)
            }
        }
    }

    fn generate_heading_list(&self) -> Option<NodeRef> {
        let container = match dom::element_by_id(self.document, ID_CONTAINER_HEADING) {
            Some(existing) => existing,
            None => {
                let body = dom::select_first(self.document, "body")?;
                let container = dom::create_element("div");
                dom::set_attribute(&container, "id", ID_CONTAINER_HEADING);
                let text = dom::create_element("span");
                dom::set_attribute(&text, "id", ID_TEXT_HEADING);
                dom::append_text(&text, &self.configure.text_heading);
                container.append(text);
                body.append(container.clone());
                container
            }
        };
        match dom::children_with_tags(&container, &["ol"]).into_iter().next() {
            Some(list) => Some(list),
            None => {
                let list = dom::create_element("ol");
                container.append(list.clone());
                Some(list)
            }
        }
    }

    /// Sub-level headings hang off the most recent entry one level up;
    /// without one (possible mid-document) the heading is skipped.
    fn heading_sublist_for_level(&self, level: i32) -> Option<NodeRef> {
        let container = dom::element_by_id(self.document, ID_CONTAINER_HEADING)?;
        let parent_item =
            find_all_by_attribute(&container, DATA_HEADING_LEVEL, &(level - 1).to_string())
                .into_iter()
                .last()?;
        match dom::children_with_tags(&parent_item, &["ol"]).into_iter().next() {
            Some(sublist) => Some(sublist),
            None => {
                let sublist = dom::create_element("ol");
                parent_item.append(sublist.clone());
                Some(sublist)
            }
        }
    }

    /// One `h1` at most, and no level may jump more than one step past
    /// the previous heading.
    fn headings_are_valid(&self) -> bool {
        let mut last_level: i32 = 0;
        let mut seen_main = false;
        for element in dom::select_all(self.document, "h1,h2,h3,h4,h5,h6") {
            let Some(level) = heading_level(&element) else {
                continue;
            };
            if level == 1 {
                if seen_main {
                    return false;
                }
                seen_main = true;
            }
            if level - last_level > 1 {
                return false;
            }
            last_level = level;
        }
        true
    }

    /// Ensure a named anchor exists for `element`, tied back to it via
    /// `data_attribute`. Returns `None` when the element was anchored
    /// by a previous run, which makes the callers idempotent.
    fn generate_anchor_for(
        &self,
        element: &NodeRef,
        data_attribute: &str,
        anchor_class: &str,
    ) -> Option<NodeRef> {
        self.ids.ensure_id(self.document, element);
        let id = dom::get_attribute(element, "id")?;
        if find_by_attribute(self.document, data_attribute, &id).is_some() {
            return None;
        }
        let anchor = if dom::tag_name(element).as_deref() == Some("A") {
            element.clone()
        } else {
            let anchor = dom::create_element("a");
            self.ids.ensure_id(self.document, &anchor);
            dom::set_attribute(&anchor, "class", anchor_class);
            element.insert_before(anchor.clone());
            anchor
        };
        if !dom::has_attribute(&anchor, "name") {
            if let Some(anchor_id) = dom::get_attribute(&anchor, "id") {
                dom::set_attribute(&anchor, "name", &anchor_id);
            }
        }
        dom::set_attribute(&anchor, data_attribute, &id);
        Some(anchor)
    }

    /// Reassign the first element holding `shortcut` in its `accesskey`
    /// to a free alphanumeric key, so the skipper link can claim it.
    fn free_shortcut(&self, shortcut: &str) {
        const CANDIDATES: &str = "1234567890abcdefghijklmnopqrstuvwxyz";
        let holders = dom::select_all(self.document, "[accesskey]");
        let keys_of = |element: &NodeRef| {
            TokenList::parse(
                &dom::get_attribute(element, "accesskey")
                    .unwrap_or_default()
                    .to_lowercase(),
            )
        };
        for holder in &holders {
            if !keys_of(holder).contains(shortcut) {
                continue;
            }
            let free = CANDIDATES.chars().map(|c| c.to_string()).find(|candidate| {
                !holders.iter().any(|other| keys_of(other).contains(candidate))
            });
            if let Some(free) = free {
                dom::set_attribute(holder, "accesskey", &free);
            }
            return;
        }
    }
}

fn heading_level(element: &NodeRef) -> Option<i32> {
    match dom::tag_name(element)?.as_str() {
        "H1" => Some(1),
        "H2" => Some(2),
        "H3" => Some(3),
        "H4" => Some(4),
        "H5" => Some(5),
        "H6" => Some(6),
        _ => None,
    }
}

/// Browsers disagree on the access-key modifier; mirror the common
/// ones and fall back to the configured default.
pub(crate) fn shortcut_prefix_for_user_agent(user_agent: Option<&str>, default: &str) -> String {
    let Some(user_agent) = user_agent else {
        return default.to_string();
    };
    let ua = user_agent.to_lowercase();
    let opera = ua.contains("opera");
    let mac = ua.contains("mac");
    let konqueror = ua.contains("konqueror");
    let spoofer = ua.contains("spoofer");
    let safari = ua.contains("applewebkit");
    let windows = ua.contains("windows");
    let chrome = ua.contains("chrome");
    let firefox = is_modern_firefox(&ua);
    let internet_explorer = ua.contains("msie") || ua.contains("trident");

    if opera {
        "SHIFT + ESC".to_string()
    } else if chrome && mac && !spoofer {
        "CTRL + OPTION".to_string()
    } else if safari && !windows && !spoofer {
        "CTRL + ALT".to_string()
    } else if !windows && (safari || mac || konqueror) {
        "CTRL".to_string()
    } else if firefox {
        "ALT + SHIFT".to_string()
    } else if chrome || internet_explorer {
        "ALT".to_string()
    } else {
        default.to_string()
    }
}

fn is_modern_firefox(ua: &str) -> bool {
    if ua.contains("minefield/3") {
        return true;
    }
    let Some(idx) = ua.find("firefox/") else {
        return false;
    };
    let major: String = ua[idx + "firefox/".len()..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    major.parse::<u32>().map(|version| version >= 2).unwrap_or(false)
}

fn find_by_attribute(root: &NodeRef, name: &str, value: &str) -> Option<NodeRef> {
    root.inclusive_descendants().find(|node| {
        node.as_element()
            .map(|el| el.attributes.borrow().get(name) == Some(value))
            .unwrap_or(false)
    })
}

fn find_all_by_attribute(root: &NodeRef, name: &str, value: &str) -> Vec<NodeRef> {
    root.inclusive_descendants()
        .filter(|node| {
            node.as_element()
                .map(|el| el.attributes.borrow().get(name) == Some(value))
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{get_attribute, parse_document, select_all, select_first};

    fn navigation_fixture(html: &str) -> (NodeRef, Configure, Vec<Skipper>) {
        (parse_document(html), Configure::default(), crate::config::default_skippers())
    }

    fn run_all(doc: &NodeRef, configure: &Configure, skippers: &[Skipper]) {
        Navigation::new(doc, configure, skippers, "ALT", None).fix_all();
    }

    #[test]
    fn shortcut_inventory_lists_each_key_once() {
        let (doc, configure, skippers) = navigation_fixture(
            r#"<html><body><a href="/search" accesskey="s" title="Search the site">Search</a></body></html>"#,
        );
        run_all(&doc, &configure, &skippers);
        run_all(&doc, &configure, &skippers);
        let container = select_first(&doc, "#container-shortcuts").expect("container");
        let items = select_all(&container, "li");
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].text_contents(),
            "ALT + S: Search the site"
        );
        assert_eq!(
            get_attribute(&items[0], DATA_ACCESS_KEY).as_deref(),
            Some("S")
        );
    }

    #[test]
    fn shortcut_description_falls_back_to_text_content() {
        let (doc, configure, skippers) =
            navigation_fixture(r#"<html><body><a href="/" accesskey="h">  Go \n home </a></body></html>"#);
        run_all(&doc, &configure, &skippers);
        let anchor = select_first(&doc, "a[accesskey]").expect("anchor");
        let title = get_attribute(&anchor, "title").expect("title added");
        assert!(title.starts_with("Go"), "got {title}");
    }

    #[test]
    fn skipper_links_lead_the_body() {
        let (doc, configure, skippers) = navigation_fixture(
            r#"<html><body><p>intro</p><main><h1>Title</h1></main></body></html>"#,
        );
        run_all(&doc, &configure, &skippers);
        let body = select_first(&doc, "body").expect("body");
        let first = body
            .children()
            .find(|child| child.as_element().is_some())
            .expect("first element");
        assert_eq!(
            get_attribute(&first, "id").as_deref(),
            Some("container-skippers")
        );
        let link = select_first(&first, "a").expect("skip link");
        assert_eq!(link.text_contents(), "Skip to main content");
        assert_eq!(get_attribute(&link, "accesskey").as_deref(), Some("1"));
        let href = get_attribute(&link, "href").expect("href");
        let name = href.trim_start_matches('#');
        let anchor = select_all(&doc, "a.skipper-anchor")
            .into_iter()
            .next()
            .expect("anchor before main");
        assert_eq!(get_attribute(&anchor, "name").as_deref(), Some(name));
    }

    #[test]
    fn skippers_are_not_duplicated_on_rerun() {
        let (doc, configure, skippers) =
            navigation_fixture(r#"<html><body><main>content</main></body></html>"#);
        run_all(&doc, &configure, &skippers);
        run_all(&doc, &configure, &skippers);
        let container = select_first(&doc, "#container-skippers").expect("container");
        assert_eq!(select_all(&container, "li").len(), 1);
    }

    #[test]
    fn conflicting_accesskey_is_moved_before_skipper_claims_it() {
        let (doc, configure, skippers) = navigation_fixture(
            r#"<html><body><a id="old" href="/" accesskey="1">old</a><main>content</main></body></html>"#,
        );
        run_all(&doc, &configure, &skippers);
        let old = select_first(&doc, "#old").expect("old holder");
        let moved = get_attribute(&old, "accesskey").expect("accesskey kept");
        assert_ne!(moved, "1", "conflicting key must be reassigned");
    }

    #[test]
    fn valid_headings_build_a_nested_toc() {
        let (doc, configure, skippers) = navigation_fixture(
            r#"<html><body><h1>Top</h1><h2>Part one</h2><h2>Part two</h2><h3>Detail</h3></body></html>"#,
        );
        run_all(&doc, &configure, &skippers);
        let container = select_first(&doc, "#container-heading").expect("container");
        let top_items = select_all(&container, "ol > li[data-headinglevel=\"1\"]");
        assert_eq!(top_items.len(), 1);
        let level2 = select_all(&container, "li[data-headinglevel=\"2\"]");
        assert_eq!(level2.len(), 2);
        // the h3 nests under the last h2
        let nested = select_all(&level2[1], "li[data-headinglevel=\"3\"]");
        assert_eq!(nested.len(), 1);
        assert_eq!(select_first(&nested[0], "a").expect("link").text_contents(), "Detail");
    }

    #[test]
    fn broken_heading_hierarchy_builds_nothing() {
        let (doc, configure, skippers) = navigation_fixture(
            r#"<html><body><h1>One</h1><h1>Two</h1></body></html>"#,
        );
        run_all(&doc, &configure, &skippers);
        assert!(select_first(&doc, "#container-heading").is_none());

        let (doc, configure, skippers) = navigation_fixture(
            r#"<html><body><h1>Top</h1><h4>Jump</h4></body></html>"#,
        );
        run_all(&doc, &configure, &skippers);
        assert!(select_first(&doc, "#container-heading").is_none());
    }

    #[test]
    fn heading_anchors_are_inserted_before_the_heading() {
        let (doc, configure, skippers) =
            navigation_fixture(r#"<html><body><h1>Top</h1></body></html>"#);
        run_all(&doc, &configure, &skippers);
        let anchor = select_first(&doc, "a.heading-anchor").expect("anchor");
        let h1 = select_first(&doc, "h1").expect("h1");
        assert_eq!(
            get_attribute(&anchor, DATA_HEADING_ANCHOR_FOR),
            get_attribute(&h1, "id")
        );
    }

    #[test]
    fn long_description_link_follows_the_image() {
        let (doc, configure, skippers) = navigation_fixture(
            r#"<html><body><img src="chart.png" alt="Sales chart" longdesc="chart.html"></body></html>"#,
        );
        run_all(&doc, &configure, &skippers);
        run_all(&doc, &configure, &skippers);
        let links = select_all(&doc, "a.longdescription-link");
        assert_eq!(links.len(), 1, "re-run must not duplicate the link");
        let link = &links[0];
        assert_eq!(get_attribute(link, "href").as_deref(), Some("chart.html"));
        assert_eq!(get_attribute(link, "target").as_deref(), Some("_blank"));
        let text = link.text_contents();
        assert!(text.contains("Sales chart"), "got {text}");
    }

    #[test]
    fn shortcut_prefix_matches_known_browsers() {
        let default = "ALT";
        let prefix = |ua: &str| shortcut_prefix_for_user_agent(Some(ua), default);
        assert_eq!(prefix("Opera/9.80 (Windows NT 6.1)"), "SHIFT + ESC");
        assert_eq!(
            prefix("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 Chrome/120.0"),
            "CTRL + OPTION"
        );
        assert_eq!(
            prefix("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 Safari/605.1.15"),
            "CTRL + ALT"
        );
        assert_eq!(
            prefix("Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/119.0"),
            "ALT + SHIFT"
        );
        assert_eq!(prefix("Mozilla/5.0 (Windows NT 10.0; Trident/7.0; rv:11.0)"), "ALT");
        assert_eq!(prefix("SomethingElse/1.0"), "ALT");
        assert_eq!(shortcut_prefix_for_user_agent(None, "CTRL"), "CTRL");
    }
}
