//! Field fragment rendering.
//!
//! A fragment is one field wrapped in a `<div>` whose id is derived from
//! `(record id, field name)`. The form inside declares its own update
//! contract as htmx attributes: verb, endpoint, trigger, swap target and
//! in-flight indicator. The update handlers return the same fragment
//! re-rendered, so the client can swap it in place.

use std::fmt::{self, Write};

use crate::error::RenderError;
use crate::field::{FieldName, FieldSpec, FieldValue, WidgetKind};

/// HTTP verb a fragment submits its changes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Put,
    Post,
}

impl Verb {
    fn htmx_attr(self) -> &'static str {
        match self {
            Verb::Put => "hx-put",
            Verb::Post => "hx-post",
        }
    }
}

/// The self-describing update contract embedded in a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBinding {
    pub verb: Verb,
    pub endpoint: String,
    /// Client event that fires the request.
    pub trigger: &'static str,
    /// CSS selector of the element replaced by the response.
    pub target: String,
    /// CSS selector of the element shown while the request is in flight.
    pub indicator: String,
}

impl UpdateBinding {
    pub fn for_field(record_id: u32, spec: &FieldSpec) -> Self {
        let id = fragment_id(record_id, spec.name);
        let (verb, endpoint, trigger) = match spec.kind {
            WidgetKind::SortableList => (
                Verb::Post,
                format!("/item/{}/sort/{}", record_id, spec.name),
                "end",
            ),
            _ => (
                Verb::Put,
                format!("/item/{}/field/{}", record_id, spec.name),
                "change",
            ),
        };
        UpdateBinding {
            verb,
            endpoint,
            trigger,
            target: format!("#{}", id),
            indicator: format!("#{}", indicator_id(&id)),
        }
    }

    fn write_attrs(&self, out: &mut String) {
        let _ = write!(
            out,
            r#" {}="{}" hx-trigger="{}" hx-target="{}" hx-swap="outerHTML" hx-indicator="{}""#,
            self.verb.htmx_attr(),
            escape(&self.endpoint),
            self.trigger,
            escape(&self.target),
            escape(&self.indicator),
        );
    }
}

/// A rendered, independently swappable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub id: String,
    pub binding: UpdateBinding,
    html: String,
}

impl Fragment {
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// Stable DOM id of the fragment for `field` on record `record_id`.
pub fn fragment_id(record_id: u32, field: FieldName) -> String {
    format!("item-{}-{}", field, record_id)
}

fn indicator_id(fragment_id: &str) -> String {
    format!("{}-indicator", fragment_id)
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render `value` through the widget described by `spec`.
pub fn render_fragment(
    record_id: u32,
    spec: &FieldSpec,
    value: &FieldValue,
) -> Result<Fragment, RenderError> {
    let id = fragment_id(record_id, spec.name);
    let binding = UpdateBinding::for_field(record_id, spec);

    let mut html = String::new();
    let _ = write!(html, r#"<div id="{}" class="autosave-field">"#, id);

    html.push_str("<form");
    // The sortable list fires `end` itself, so it carries the binding.
    let message = if spec.kind == WidgetKind::SortableList {
        "Saving order..."
    } else {
        binding.write_attrs(&mut html);
        "Saving..."
    };
    html.push('>');
    render_control(&mut html, spec, value, &id, &binding)?;
    push_hidden_and_indicator(&mut html, record_id, &id, message);

    html.push_str("</form></div>");
    Ok(Fragment { id, binding, html })
}

fn render_control(
    html: &mut String,
    spec: &FieldSpec,
    value: &FieldValue,
    id: &str,
    binding: &UpdateBinding,
) -> Result<(), RenderError> {
    let key = spec.name.input_key();
    let key = key.as_str();
    let label = escape(spec.label);
    match spec.kind {
        WidgetKind::Text => {
            let v = escape(single_value(spec, value)?);
            let _ = write!(
                html,
                r#"<label for="{key}">{label}</label><input type="text" id="{key}" name="{key}" value="{v}">"#,
            );
        }
        WidgetKind::Textarea => {
            let v = escape(single_value(spec, value)?);
            let _ = write!(
                html,
                r#"<label for="{key}">{label}</label><textarea id="{key}" name="{key}">{v}</textarea>"#,
            );
        }
        WidgetKind::Dropdown => {
            let current = single_value(spec, value)?;
            let _ = write!(
                html,
                r#"<label for="{key}">{label}</label><select id="{key}" name="{key}">"#,
            );
            for opt in spec.options {
                let selected = if *opt == current { " selected" } else { "" };
                let opt = escape(opt);
                let _ = write!(html, r#"<option value="{opt}"{selected}>{opt}</option>"#);
            }
            html.push_str("</select>");
        }
        WidgetKind::Multiselect => {
            let current = list_value(spec, value)?;
            push_choice_group(html, spec, key, "checkbox", |opt| {
                current.iter().any(|v| v == opt)
            });
        }
        WidgetKind::Radio => {
            let current = single_value(spec, value)?;
            push_choice_group(html, spec, key, "radio", |opt| opt == current);
        }
        WidgetKind::SortableList => {
            let items = list_value(spec, value)?;
            let _ = write!(html, "<label>{label}</label>");
            html.push_str(r#"<ul class="sortable""#);
            binding.write_attrs(html);
            html.push('>');
            for (i, item) in items.iter().enumerate() {
                let item = escape(item);
                let _ = write!(
                    html,
                    r#"<li id="{id}-{i}"><span class="handle">&#9776;</span><span>{item}</span><input type="hidden" name="{key}" value="{item}"></li>"#,
                );
            }
            html.push_str("</ul>");
        }
    }
    Ok(())
}

fn push_choice_group(
    html: &mut String,
    spec: &FieldSpec,
    key: &str,
    input_type: &str,
    is_checked: impl Fn(&str) -> bool,
) {
    let _ = write!(html, "<fieldset><legend>{}</legend>", escape(spec.label));
    for (i, opt) in spec.options.iter().copied().enumerate() {
        let checked = if is_checked(opt) { " checked" } else { "" };
        let opt = escape(opt);
        let field = spec.name;
        let _ = write!(
            html,
            r#"<label for="{field}_{i}"><input type="{input_type}" id="{field}_{i}" name="{key}" value="{opt}"{checked}> {opt}</label>"#,
        );
    }
    html.push_str("</fieldset>");
}

fn push_hidden_and_indicator(html: &mut String, record_id: u32, id: &str, message: &str) {
    let _ = write!(
        html,
        r#"<input type="hidden" name="item_id" value="{}"><div id="{}" class="htmx-indicator"><span>{}</span></div>"#,
        record_id,
        indicator_id(id),
        message,
    );
}

fn single_value<'a>(spec: &FieldSpec, value: &'a FieldValue) -> Result<&'a str, RenderError> {
    value.as_single().ok_or(RenderError::ShapeMismatch {
        field: spec.name,
        kind: spec.kind,
        expected: "single",
    })
}

fn list_value<'a>(spec: &FieldSpec, value: &'a FieldValue) -> Result<&'a [String], RenderError> {
    value.as_list().ok_or(RenderError::ShapeMismatch {
        field: spec.name,
        kind: spec.kind,
        expected: "list",
    })
}
