use crate::error::AriaFixError;
use std::path::Path;

/// User-visible text the engine writes into generated markup. Every
/// field has an English default; hosts localize by overriding fields
/// through the builder. `{{value}}` placeholders are substituted with
/// the concrete attribute value at fix time.
#[derive(Debug, Clone)]
pub struct Configure {
    pub text_shortcuts: String,
    pub text_heading: String,
    pub standard_shortcut_prefix: String,
    pub prefix_long_description: String,
    pub suffix_long_description: String,
    pub prefix_required_field: String,
    pub suffix_required_field: String,
    pub prefix_range_min_field: String,
    pub suffix_range_min_field: String,
    pub prefix_range_max_field: String,
    pub suffix_range_max_field: String,
    pub prefix_autocomplete_field: String,
    pub suffix_autocomplete_field: String,
    pub text_autocomplete_value_both: String,
    pub text_autocomplete_value_list: String,
    pub text_autocomplete_value_inline: String,
    pub text_autocomplete_value_none: String,
}

impl Default for Configure {
    fn default() -> Self {
        Self {
            text_shortcuts: "Shortcuts:".to_string(),
            text_heading: "Headings:".to_string(),
            standard_shortcut_prefix: "ALT".to_string(),
            prefix_long_description: "Long description of image".to_string(),
            suffix_long_description: "(opens in a new window)".to_string(),
            prefix_required_field: String::new(),
            suffix_required_field: "(required)".to_string(),
            prefix_range_min_field: String::new(),
            suffix_range_min_field: "(minimum value {{value}})".to_string(),
            prefix_range_max_field: String::new(),
            suffix_range_max_field: "(maximum value {{value}})".to_string(),
            prefix_autocomplete_field: String::new(),
            suffix_autocomplete_field: "(autocomplete {{value}})".to_string(),
            text_autocomplete_value_both: "inline and list".to_string(),
            text_autocomplete_value_list: "list".to_string(),
            text_autocomplete_value_inline: "inline".to_string(),
            text_autocomplete_value_none: "none".to_string(),
        }
    }
}

/// One skip-navigation target: where the generated link jumps
/// (`selector`), what it says (`description`), and which access key it
/// claims (first character of `shortcut`, empty for none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipper {
    pub selector: String,
    pub description: String,
    pub shortcut: String,
}

const DEFAULT_SKIPPERS_XML: &str = include_str!("../config/skippers.xml");

pub(crate) fn default_skippers() -> Vec<Skipper> {
    // The embedded file is validated by tests; an empty list is the
    // harmless fallback if it were ever broken.
    parse_skippers(DEFAULT_SKIPPERS_XML).unwrap_or_default()
}

pub(crate) fn skippers_from_file(path: &Path) -> Result<Vec<Skipper>, AriaFixError> {
    let xml = std::fs::read_to_string(path)?;
    parse_skippers(&xml)
}

/// Parse a `<skippers><skipper selector=... description=... shortcut=.../>`
/// document. Each `skipper` element must carry all three attributes.
pub(crate) fn parse_skippers(xml: &str) -> Result<Vec<Skipper>, AriaFixError> {
    let document = roxmltree::Document::parse(xml)
        .map_err(|err| AriaFixError::SkipperConfig(err.to_string()))?;
    let mut skippers = Vec::new();
    for node in document
        .descendants()
        .filter(|node| node.has_tag_name("skipper"))
    {
        let attribute = |name: &str| {
            node.attribute(name).map(str::to_string).ok_or_else(|| {
                AriaFixError::SkipperConfig(format!("skipper element missing `{name}` attribute"))
            })
        };
        skippers.push(Skipper {
            selector: attribute("selector")?,
            description: attribute("description")?,
            shortcut: attribute("shortcut")?,
        });
    }
    Ok(skippers)
}
