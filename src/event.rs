use crate::debug::DebugLogger;
use crate::dom;
use crate::idgen::IdGenerator;
use kuchiki::NodeRef;
use std::cell::{Cell, RefCell};

const ID_SCRIPT_EVENT_LISTENER: &str = "script-eventlistener";
const ID_LIST_IDS_SCRIPT: &str = "list-ids-script";
const ID_FUNCTION_SCRIPT_FIX: &str = "id-function-script-fix";

const EVENT_LISTENER_JS: &str = include_str!("../js/eventlistener.js");
const INCLUDE_JS: &str = include_str!("../js/include.js");

/// Remediates mouse-only JavaScript handlers: marks drag/drop state for
/// assistive technology, makes the elements keyboard reachable, and
/// injects scripts that translate keyboard interaction into the mouse
/// events the page already listens for.
pub(crate) struct EventRemediation<'a> {
    document: &'a NodeRef,
    ids: IdGenerator,
    debug: Option<&'a DebugLogger>,
    main_scripts_added: Cell<bool>,
    script_list: RefCell<Option<NodeRef>>,
}

impl<'a> EventRemediation<'a> {
    pub fn new(document: &'a NodeRef, debug: Option<&'a DebugLogger>) -> Self {
        Self {
            document,
            ids: IdGenerator::new("event"),
            debug,
            main_scripts_added: Cell::new(false),
            script_list: RefCell::new(None),
        }
    }

    pub fn fix_all(&self) {
        self.fix_drags_and_drops();
        self.fix_hovers();
        self.fix_actives();
    }

    pub fn fix_drop(&self, element: &NodeRef) {
        dom::set_attribute(element, "aria-dropeffect", "none");
        self.register_event(element, "drop");
    }

    pub fn fix_drag(&self, element: &NodeRef) {
        self.keyboard_access(element);
        dom::set_attribute(element, "aria-grabbed", "false");
        self.register_event(element, "drag");
    }

    pub fn fix_drags_and_drops(&self) {
        for element in dom::select_all(self.document, "[ondrag],[ondragstart],[ondragend]") {
            if dom::is_remediable(&element) {
                self.fix_drag(&element);
            }
        }
        for element in
            dom::select_all(self.document, "[ondrop],[ondragenter],[ondragleave],[ondragover]")
        {
            if dom::is_remediable(&element) {
                self.fix_drop(&element);
            }
        }
    }

    pub fn fix_hover(&self, element: &NodeRef) {
        self.keyboard_access(element);
        self.register_event(element, "hover");
    }

    pub fn fix_hovers(&self) {
        for element in dom::select_all(self.document, "[onmouseover],[onmouseout]") {
            if dom::is_remediable(&element) {
                self.fix_hover(&element);
            }
        }
    }

    pub fn fix_active(&self, element: &NodeRef) {
        self.keyboard_access(element);
        self.register_event(element, "active");
    }

    pub fn fix_actives(&self) {
        for element in
            dom::select_all(self.document, "[onclick],[onmousedown],[onmouseup],[ondblclick]")
        {
            if dom::is_remediable(&element) {
                self.fix_active(&element);
            }
        }
    }

    /// `tabindex="0"` unless the element is natively focusable. Anchors
    /// count as focusable only when they carry `href`.
    fn keyboard_access(&self, element: &NodeRef) {
        if dom::has_attribute(element, "tabindex") {
            return;
        }
        let Some(tag) = dom::tag_name(element) else {
            return;
        };
        let focusable = match tag.as_str() {
            "A" => dom::has_attribute(element, "href"),
            "INPUT" | "BUTTON" | "SELECT" | "TEXTAREA" => true,
            _ => false,
        };
        if !focusable {
            dom::set_attribute(element, "tabindex", "0");
        }
    }

    /// Lazily install the support scripts, then append the element's id
    /// to the matching registration array.
    fn register_event(&self, element: &NodeRef, kind: &str) {
        if !self.main_scripts_added.get() {
            self.install_main_scripts();
        }
        let list = self.script_list.borrow();
        let Some(list) = list.as_ref() else {
            return;
        };
        self.ids.ensure_id(self.document, element);
        let Some(id) = dom::get_attribute(element, "id") else {
            return;
        };
        let statement = format!("{}Elements.push('{}');", kind, escape_js_string(&id));
        // An id already in the list means a previous run registered it.
        if list.text_contents().contains(&statement) {
            return;
        }
        dom::append_text(list, &statement);
        if let Some(log) = self.debug {
            log.log_fix("event", kind, &id);
            log.increment(&format!("event.{kind}"), 1);
        }
    }

    /// Once per document: listener functions prepended to `head`, the
    /// id-list script and the activation script appended to `body`.
    /// Looked up by id, so a second engine run reuses what is there.
    fn install_main_scripts(&self) {
        if let Some(head) = dom::select_first(self.document, "head") {
            if dom::element_by_id(self.document, ID_SCRIPT_EVENT_LISTENER).is_none() {
                let script = dom::create_element("script");
                dom::set_attribute(&script, "id", ID_SCRIPT_EVENT_LISTENER);
                dom::set_attribute(&script, "type", "text/javascript");
                dom::append_text(&script, EVENT_LISTENER_JS);
                head.prepend(script);
            }
        }
        if let Some(body) = dom::select_first(self.document, "body") {
            let list = match dom::element_by_id(self.document, ID_LIST_IDS_SCRIPT) {
                Some(existing) => existing,
                None => {
                    let script = dom::create_element("script");
                    dom::set_attribute(&script, "id", ID_LIST_IDS_SCRIPT);
                    dom::set_attribute(&script, "type", "text/javascript");
                    dom::append_text(&script, "var activeElements = [];");
                    dom::append_text(&script, "var hoverElements = [];");
                    dom::append_text(&script, "var dragElements = [];");
                    dom::append_text(&script, "var dropElements = [];");
                    body.append(script.clone());
                    script
                }
            };
            *self.script_list.borrow_mut() = Some(list);
            if dom::element_by_id(self.document, ID_FUNCTION_SCRIPT_FIX).is_none() {
                let script = dom::create_element("script");
                dom::set_attribute(&script, "id", ID_FUNCTION_SCRIPT_FIX);
                dom::set_attribute(&script, "type", "text/javascript");
                dom::append_text(&script, INCLUDE_JS);
                body.append(script);
            }
        }
        self.main_scripts_added.set(true);
    }
}

fn escape_js_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}
