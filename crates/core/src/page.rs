//! Full-page rendering of the demo record.

use std::fmt::Write;

use crate::error::RenderError;
use crate::field::FieldName;
use crate::record::Record;
use crate::render::render_fragment;

pub const PAGE_TITLE: &str = "Auto-Save Fields Demo";

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.4";
const SORTABLE_SRC: &str = "https://cdn.jsdelivr.net/npm/sortablejs@1.15.6/Sortable.min.js";

// Binds SortableJS to every `.sortable` list, including ones swapped in by htmx.
const SORTABLE_INIT: &str = r#"htmx.onLoad(function (content) {
  content.querySelectorAll(".sortable").forEach(function (el) {
    new Sortable(el, { animation: 150, ghostClass: "sortable-ghost" });
  });
});"#;

/// Render the whole editing page: one fragment per field, in page order.
pub fn render_page(record: &Record) -> Result<String, RenderError> {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{PAGE_TITLE}</title>
<script src="{HTMX_SRC}"></script>
<script src="{SORTABLE_SRC}"></script>
<style>.htmx-indicator {{ display: none; }} .htmx-request .htmx-indicator, .htmx-request.htmx-indicator {{ display: inline; }}</style>
</head>
<body>
<div id="main-content">
<h1>{PAGE_TITLE}</h1>
<p>Edit any field below - they will save automatically when changed.</p>
<div class="fields">
"#,
    );

    for field in FieldName::ALL {
        let fragment = render_fragment(record.id, &field.spec(), &record.value(field))?;
        html.push_str(fragment.html());
        html.push('\n');
    }

    let _ = write!(
        html,
        "</div>\n</div>\n<script>\n{SORTABLE_INIT}\n</script>\n</body>\n</html>\n"
    );
    Ok(html)
}
