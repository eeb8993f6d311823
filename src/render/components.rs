//! Reusable HTML components

use super::escape;
use crate::data::DataTable;

/// Alert flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Info,
    Warning,
    Error,
}

impl AlertKind {
    fn class(self) -> &'static str {
        match self {
            AlertKind::Success => "alert-success",
            AlertKind::Info => "alert-info",
            AlertKind::Warning => "alert-warning",
            AlertKind::Error => "alert-error",
        }
    }
}

/// Colored message box. `html` is trusted markup.
pub fn alert(kind: AlertKind, html: &str) -> String {
    format!(r#"<div class="alert {}">{}</div>"#, kind.class(), html)
}

/// Page heading with a caption underneath
pub fn page_heading(title: &str, caption: &str) -> String {
    format!(
        r#"<h2>{}</h2><p class="muted">{}</p>"#,
        escape(title),
        escape(caption)
    )
}

/// KPI tile
pub fn metric_tile(label: &str, value: &str) -> String {
    format!(
        r#"<div class="metric"><div class="label">{}</div><div class="value">{}</div></div>"#,
        escape(label),
        escape(value)
    )
}

/// Bordered card around trusted markup
pub fn card(inner: &str) -> String {
    format!(r#"<div class="card">{}</div>"#, inner)
}

/// Inert full-width button
pub fn action_button(label: &str) -> String {
    format!(
        r#"<button class="btn btn-block" type="button">{}</button>"#,
        escape(label)
    )
}

/// Collapsible section around trusted markup
pub fn expander(summary: &str, inner: &str, open: bool) -> String {
    format!(
        r#"<details{}><summary>{}</summary>{}</details>"#,
        if open { " open" } else { "" },
        escape(summary),
        inner
    )
}

/// Grid of columns; `class` is one of the `columns-*` layout classes
pub fn columns(class: &str, cells: &[String]) -> String {
    let mut html = format!(r#"<div class="columns {}">"#, class);
    for cell in cells {
        html.push_str("<div>");
        html.push_str(cell);
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

/// Render up to `max_rows` rows of a table
pub fn data_table(table: &DataTable, max_rows: usize) -> String {
    let mut html = String::from(r#"<div class="table-wrap"><table class="data"><thead><tr><th></th>"#);
    for column in table.columns() {
        html.push_str("<th>");
        html.push_str(&escape(column));
        html.push_str("</th>");
    }
    html.push_str("</tr></thead><tbody>");

    for (i, row) in table.rows().iter().take(max_rows).enumerate() {
        html.push_str(&format!("<tr><th>{}</th>", i));
        for cell in row {
            match cell {
                Some(value) => {
                    html.push_str("<td>");
                    html.push_str(&escape(value));
                    html.push_str("</td>");
                }
                None => html.push_str(r#"<td class="null">None</td>"#),
            }
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></div>");

    if table.row_count() > max_rows {
        html.push_str(&format!(
            r#"<p class="muted">Showing first {} of {} rows.</p>"#,
            max_rows,
            table.row_count()
        ));
    }

    html
}

/// Two-column key/value table
pub fn key_value_table(rows: &[(String, String)]) -> String {
    let mut html = String::from(r#"<table class="data"><tbody>"#);
    for (key, value) in rows {
        html.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>",
            escape(key),
            escape(value)
        ));
    }
    html.push_str("</tbody></table>");
    html
}
