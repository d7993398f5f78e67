mod config;
mod debug;
mod dom;
mod error;
mod event;
mod form;
mod grid;
mod idgen;
mod navigation;
mod table;
mod tokens;

pub use config::{Configure, Skipper};
use debug::DebugLogger;
pub use error::AriaFixError;
pub use kuchiki::NodeRef;
use std::path::PathBuf;
use std::sync::Arc;

/// Parse an HTML string into a document tree the engine can work on.
pub fn parse_html(html: &str) -> NodeRef {
    dom::parse_document(html)
}

/// The remediation engine. Holds the configuration shared by every
/// pass; the passes themselves are stateless between documents apart
/// from id generation, which is scoped to one `apply` call.
pub struct AriaFix {
    configure: Configure,
    skippers: Vec<Skipper>,
    shortcut_prefix: String,
    debug: Option<Arc<DebugLogger>>,
}

#[derive(Default)]
pub struct AriaFixBuilder {
    configure: Configure,
    user_agent: Option<String>,
    skippers: Option<Vec<Skipper>>,
    skipper_path: Option<PathBuf>,
    debug_path: Option<PathBuf>,
}

impl AriaFix {
    pub fn builder() -> AriaFixBuilder {
        AriaFixBuilder::new()
    }

    /// Parse, remediate everything, serialize back.
    pub fn remediate(&self, html: &str) -> Result<String, AriaFixError> {
        let document = dom::parse_document(html);
        self.apply(&document);
        dom::serialize_document(&document)
    }

    /// Run every pass on an already-parsed document.
    pub fn apply(&self, document: &NodeRef) {
        self.fix_tables(document);
        self.fix_forms(document);
        self.fix_events(document);
        self.fix_navigation(document);
        if let Some(log) = &self.debug {
            log.emit_summary("apply");
            log.flush();
        }
    }

    /// Header/data cell association for one table, idempotently.
    pub fn fix_table(&self, table: &NodeRef) {
        let root = document_root(table);
        table::TableAssociation::new(&root, self.debug_ref()).fix_table(table);
    }

    /// Header/data cell association for every table in the document.
    pub fn fix_tables(&self, document: &NodeRef) {
        table::TableAssociation::new(document, self.debug_ref()).fix_tables();
    }

    /// Label wiring and ARIA mirroring for form fields.
    pub fn fix_forms(&self, document: &NodeRef) {
        form::FormFields::new(document, &self.configure, self.debug_ref()).fix_all();
    }

    /// Keyboard remediation of mouse-only event handlers.
    pub fn fix_events(&self, document: &NodeRef) {
        event::EventRemediation::new(document, self.debug_ref()).fix_all();
    }

    /// Skippers, shortcut inventory, heading anchors, long descriptions.
    pub fn fix_navigation(&self, document: &NodeRef) {
        navigation::Navigation::new(
            document,
            &self.configure,
            &self.skippers,
            &self.shortcut_prefix,
            self.debug_ref(),
        )
        .fix_all();
    }

    fn debug_ref(&self) -> Option<&DebugLogger> {
        self.debug.as_deref()
    }
}

impl Default for AriaFix {
    fn default() -> Self {
        let configure = Configure::default();
        let shortcut_prefix = configure.standard_shortcut_prefix.clone();
        Self {
            configure,
            skippers: config::default_skippers(),
            shortcut_prefix,
            debug: None,
        }
    }
}

impl AriaFixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(mut self, configure: Configure) -> Self {
        self.configure = configure;
        self
    }

    // The access-key modifier shown in the shortcuts list depends on
    // the visitor's browser; pass the request's User-Agent when known.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn skippers(mut self, skippers: Vec<Skipper>) -> Self {
        self.skippers = Some(skippers);
        self
    }

    pub fn skipper_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.skipper_path = Some(path.into());
        self
    }

    // JSON-lines log of every fix applied, plus per-pass counters.
    pub fn debug_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<AriaFix, AriaFixError> {
        let skippers = match (self.skippers, self.skipper_path) {
            (Some(list), _) => list,
            (None, Some(path)) => config::skippers_from_file(&path)?,
            (None, None) => config::default_skippers(),
        };
        for skipper in &skippers {
            if skipper.selector.trim().is_empty() {
                return Err(AriaFixError::InvalidConfiguration(
                    "skipper selector must not be empty".to_string(),
                ));
            }
        }
        let debug = match self.debug_path {
            Some(path) => Some(Arc::new(DebugLogger::new(path)?)),
            None => None,
        };
        let shortcut_prefix = navigation::shortcut_prefix_for_user_agent(
            self.user_agent.as_deref(),
            &self.configure.standard_shortcut_prefix,
        );
        Ok(AriaFix {
            configure: self.configure,
            skippers,
            shortcut_prefix,
            debug,
        })
    }
}

fn document_root(node: &NodeRef) -> NodeRef {
    node.ancestors().last().unwrap_or_else(|| node.clone())
}
