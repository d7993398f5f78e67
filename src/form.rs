use crate::config::Configure;
use crate::debug::DebugLogger;
use crate::dom;
use crate::idgen::IdGenerator;
use crate::tokens;
use kuchiki::NodeRef;

// Decoration markers on labels. Their presence means the matching text
// was already applied, so re-runs never stack prefixes or suffixes.
const DATA_PREFIX_REQUIRED: &str = "data-prefixrequiredfield";
const DATA_SUFFIX_REQUIRED: &str = "data-suffixrequiredfield";
const DATA_PREFIX_RANGE_MIN: &str = "data-prefixvalueminfield";
const DATA_SUFFIX_RANGE_MIN: &str = "data-suffixvalueminfield";
const DATA_PREFIX_RANGE_MAX: &str = "data-prefixvaluemaxfield";
const DATA_SUFFIX_RANGE_MAX: &str = "data-suffixvaluemaxfield";
const DATA_PREFIX_AUTOCOMPLETE: &str = "data-prefixautocompletefield";
const DATA_SUFFIX_AUTOCOMPLETE: &str = "data-suffixautocompletefield";

/// Associates form fields with their labels and mirrors native
/// constraint attributes into ARIA equivalents.
pub(crate) struct FormFields<'a> {
    document: &'a NodeRef,
    configure: &'a Configure,
    ids: IdGenerator,
    debug: Option<&'a DebugLogger>,
}

impl<'a> FormFields<'a> {
    pub fn new(
        document: &'a NodeRef,
        configure: &'a Configure,
        debug: Option<&'a DebugLogger>,
    ) -> Self {
        Self {
            document,
            configure,
            ids: IdGenerator::new("field"),
            debug,
        }
    }

    pub fn fix_all(&self) {
        self.fix_labels();
        self.fix_required_fields();
        self.fix_range_fields();
        self.fix_autocomplete_fields();
    }

    /// Wire a `label` to its field: explicit `for`, or the first form
    /// control inside the label (which then receives an id and a back
    /// reference). The field gains `aria-label` from the label text and
    /// the label's id in `aria-labelledby`.
    pub fn fix_label(&self, label: &NodeRef) {
        if dom::tag_name(label).as_deref() != Some("LABEL") {
            return;
        }
        let field = if let Some(for_id) = dom::get_attribute(label, "for") {
            dom::element_by_id(self.document, &for_id)
        } else {
            let field = dom::descendants_with_tags(label, &["input", "select", "textarea"])
                .into_iter()
                .next();
            if let Some(field) = &field {
                self.ids.ensure_id(self.document, field);
                if let Some(id) = dom::get_attribute(field, "id") {
                    dom::set_attribute(label, "for", &id);
                }
            }
            field
        };
        let Some(field) = field else {
            return;
        };
        if !dom::has_attribute(&field, "aria-label") {
            dom::set_attribute(&field, "aria-label", &dom::normalized_text(label));
        }
        self.decorate_required(label, &field);
        self.decorate_range(label, &field);
        self.decorate_autocomplete(label, &field);
        self.ids.ensure_id(self.document, label);
        if let Some(label_id) = dom::get_attribute(label, "id") {
            tokens::append_to_attribute(&field, "aria-labelledby", &label_id);
        }
        if let Some(log) = self.debug {
            log.increment("form.label", 1);
        }
    }

    pub fn fix_labels(&self) {
        for label in dom::select_all(self.document, "label") {
            if dom::is_remediable(&label) {
                self.fix_label(&label);
            }
        }
    }

    pub fn fix_required_field(&self, field: &NodeRef) {
        if !dom::has_attribute(field, "required") {
            return;
        }
        dom::set_attribute(field, "aria-required", "true");
        for label in self.labels_of(field) {
            self.decorate_required(&label, field);
        }
        if let Some(log) = self.debug {
            log.increment("form.required", 1);
        }
    }

    pub fn fix_required_fields(&self) {
        for field in dom::select_all(self.document, "[required]") {
            if dom::is_remediable(&field) {
                self.fix_required_field(&field);
            }
        }
    }

    pub fn fix_range_field(&self, field: &NodeRef) {
        if let Some(min) = dom::get_attribute(field, "min") {
            dom::set_attribute(field, "aria-valuemin", &min);
        }
        if let Some(max) = dom::get_attribute(field, "max") {
            dom::set_attribute(field, "aria-valuemax", &max);
        }
        for label in self.labels_of(field) {
            self.decorate_range(&label, field);
        }
        if let Some(log) = self.debug {
            log.increment("form.range", 1);
        }
    }

    pub fn fix_range_fields(&self) {
        for field in dom::select_all(self.document, "[min],[max]") {
            if dom::is_remediable(&field) {
                self.fix_range_field(&field);
            }
        }
    }

    pub fn fix_autocomplete_field(&self, field: &NodeRef) {
        let Some(value) = self.aria_autocomplete_value(field) else {
            return;
        };
        dom::set_attribute(field, "aria-autocomplete", value);
        for label in self.labels_of(field) {
            self.decorate_autocomplete(&label, field);
        }
        if let Some(log) = self.debug {
            log.increment("form.autocomplete", 1);
        }
    }

    pub fn fix_autocomplete_fields(&self) {
        let selector = "input[autocomplete],textarea[autocomplete],\
                        form[autocomplete] input,form[autocomplete] textarea,\
                        [list],[form]";
        for field in dom::select_all(self.document, selector) {
            if dom::is_remediable(&field) {
                self.fix_autocomplete_field(&field);
            }
        }
    }

    /// The `aria-autocomplete` token for a text-entry field, derived
    /// from its own `autocomplete`, the owning form's `autocomplete`,
    /// and any referenced `datalist`. `None` for non-text controls and
    /// fields with no autocompletion signal.
    fn aria_autocomplete_value(&self, field: &NodeRef) -> Option<&'static str> {
        let tag = dom::tag_name(field)?;
        let input_type = dom::get_attribute(field, "type").map(|t| t.to_ascii_lowercase());
        let text_entry = tag == "TEXTAREA"
            || (tag == "INPUT"
                && !matches!(
                    input_type.as_deref(),
                    Some("button")
                        | Some("submit")
                        | Some("reset")
                        | Some("image")
                        | Some("file")
                        | Some("checkbox")
                        | Some("radio")
                        | Some("hidden")
                ));
        if !text_entry {
            return None;
        }
        let mut value = dom::get_attribute(field, "autocomplete").map(|v| v.to_ascii_lowercase());
        if value.is_none() {
            let form = dom::ancestor_with_tag(field, "form").or_else(|| {
                dom::get_attribute(field, "form")
                    .and_then(|id| dom::element_by_id(self.document, &id))
            });
            if let Some(form) = form {
                value = dom::get_attribute(&form, "autocomplete").map(|v| v.to_ascii_lowercase());
            }
        }
        if value.as_deref() == Some("on") {
            return Some("both");
        }
        if let Some(list_id) = dom::get_attribute(field, "list") {
            if let Some(target) = dom::element_by_id(self.document, &list_id) {
                if dom::is_tag(&target, "datalist") {
                    return Some("list");
                }
            }
        }
        if value.as_deref() == Some("off") {
            return Some("none");
        }
        None
    }

    /// Labels for a field: `label[for]` references first, enclosing
    /// `label` elements as fallback.
    fn labels_of(&self, field: &NodeRef) -> Vec<NodeRef> {
        if let Some(id) = dom::get_attribute(field, "id") {
            let referencing: Vec<NodeRef> = dom::select_all(self.document, "label[for]")
                .into_iter()
                .filter(|label| dom::get_attribute(label, "for").as_deref() == Some(id.as_str()))
                .collect();
            if !referencing.is_empty() {
                return referencing;
            }
        }
        match dom::ancestor_with_tag(field, "label") {
            Some(label) => vec![label],
            None => Vec::new(),
        }
    }

    fn decorate_required(&self, label: &NodeRef, field: &NodeRef) {
        let required = dom::has_attribute(field, "required")
            || dom::get_attribute(field, "aria-required")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false);
        if required
            && dom::has_attribute(field, "aria-label")
            && !dom::has_attribute(label, DATA_PREFIX_REQUIRED)
            && !dom::has_attribute(label, DATA_SUFFIX_REQUIRED)
        {
            self.apply_prefix_suffix(
                label,
                field,
                &self.configure.prefix_required_field,
                &self.configure.suffix_required_field,
                DATA_PREFIX_REQUIRED,
                DATA_SUFFIX_REQUIRED,
            );
        }
    }

    fn decorate_range(&self, label: &NodeRef, field: &NodeRef) {
        if !dom::has_attribute(field, "aria-label") {
            return;
        }
        let min = dom::get_attribute(field, "min")
            .or_else(|| dom::get_attribute(field, "aria-valuemin"));
        if let Some(min) = min {
            if !dom::has_attribute(label, DATA_PREFIX_RANGE_MIN)
                && !dom::has_attribute(label, DATA_SUFFIX_RANGE_MIN)
            {
                self.apply_prefix_suffix(
                    label,
                    field,
                    &substitute_value(&self.configure.prefix_range_min_field, &min),
                    &substitute_value(&self.configure.suffix_range_min_field, &min),
                    DATA_PREFIX_RANGE_MIN,
                    DATA_SUFFIX_RANGE_MIN,
                );
            }
        }
        let max = dom::get_attribute(field, "max")
            .or_else(|| dom::get_attribute(field, "aria-valuemax"));
        if let Some(max) = max {
            if !dom::has_attribute(label, DATA_PREFIX_RANGE_MAX)
                && !dom::has_attribute(label, DATA_SUFFIX_RANGE_MAX)
            {
                self.apply_prefix_suffix(
                    label,
                    field,
                    &substitute_value(&self.configure.prefix_range_max_field, &max),
                    &substitute_value(&self.configure.suffix_range_max_field, &max),
                    DATA_PREFIX_RANGE_MAX,
                    DATA_SUFFIX_RANGE_MAX,
                );
            }
        }
    }

    fn decorate_autocomplete(&self, label: &NodeRef, field: &NodeRef) {
        if !dom::has_attribute(field, "aria-label")
            || dom::has_attribute(label, DATA_PREFIX_AUTOCOMPLETE)
            || dom::has_attribute(label, DATA_SUFFIX_AUTOCOMPLETE)
        {
            return;
        }
        let Some(kind) = self.aria_autocomplete_value(field) else {
            return;
        };
        let word = match kind {
            "both" => &self.configure.text_autocomplete_value_both,
            "list" => &self.configure.text_autocomplete_value_list,
            "inline" => &self.configure.text_autocomplete_value_inline,
            _ => &self.configure.text_autocomplete_value_none,
        };
        self.apply_prefix_suffix(
            label,
            field,
            &substitute_value(&self.configure.prefix_autocomplete_field, word),
            &substitute_value(&self.configure.suffix_autocomplete_field, word),
            DATA_PREFIX_AUTOCOMPLETE,
            DATA_SUFFIX_AUTOCOMPLETE,
        );
    }

    /// Fold decoration text into the field's `aria-label`, recording on
    /// the label which decoration was applied.
    fn apply_prefix_suffix(
        &self,
        label: &NodeRef,
        field: &NodeRef,
        prefix: &str,
        suffix: &str,
        data_prefix: &str,
        data_suffix: &str,
    ) {
        let mut content = dom::get_attribute(field, "aria-label").unwrap_or_default();
        if !prefix.is_empty() {
            dom::set_attribute(label, data_prefix, prefix);
            if !content.contains(prefix) {
                content = format!("{prefix} {content}");
            }
        }
        if !suffix.is_empty() {
            dom::set_attribute(label, data_suffix, suffix);
            if !content.contains(suffix) {
                content = format!("{content} {suffix}");
            }
        }
        dom::set_attribute(field, "aria-label", &content);
    }
}

fn substitute_value(template: &str, value: &str) -> String {
    template.replace("{{value}}", value)
}
