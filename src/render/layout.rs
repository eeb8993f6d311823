//! Document Layout
//!
//! The shell shared by every page: stylesheet, theme wrapper, header with
//! the theme toggle and sample download, navigation sidebar with the
//! session's notifications, and the footer.

use super::theme::STYLESHEET;
use super::{escape, Page};
use crate::session::{Notification, Theme};

/// Everything the shell needs besides the page body
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub page: Page,
    pub theme: Theme,
    pub notifications: &'a [Notification],
    pub site_title: &'a str,
    pub banner_url: &'a str,
    /// Path the theme toggle redirects back to
    pub return_to: String,
}

/// Render a complete HTML document around `body`
pub fn render_document(ctx: &PageContext<'_>, body: &str) -> String {
    let mut html = String::with_capacity(STYLESHEET.len() + body.len() + 4096);

    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#);
    html.push_str(&format!(
        "<title>{} · {}</title>",
        escape(ctx.page.title()),
        escape(ctx.site_title)
    ));
    html.push_str("<style>");
    html.push_str(STYLESHEET);
    html.push_str("</style></head><body>");

    html.push_str(&format!(
        r#"<div class="app {}" data-theme="{}">"#,
        ctx.theme.css_class(),
        ctx.theme
    ));
    html.push_str(&sidebar(ctx));
    html.push_str(r#"<main class="main">"#);
    html.push_str(&header(ctx));
    html.push_str(body);
    html.push_str(&footer(ctx.site_title));
    html.push_str("</main></div></body></html>");

    html
}

fn header(ctx: &PageContext<'_>) -> String {
    format!(
        r#"<header class="header card">
  <div class="brand">
    <div class="logo"></div>
    <div class="title">{title}</div>
    <span class="pill">✨ Modern</span>
  </div>
  <div class="actions">
    <form method="post" action="/theme">
      <input type="hidden" name="mode" value="{next}">
      <input type="hidden" name="return_to" value="{return_to}">
      <button class="btn" type="submit">{label}</button>
    </form>
    <a class="btn" href="/download/sample.csv" download="sample_data.csv">⬇️ Download Sample CSV</a>
  </div>
</header>"#,
        title = escape(ctx.site_title),
        next = ctx.theme.toggled(),
        return_to = escape(&ctx.return_to),
        label = ctx.theme.toggle_label(),
    )
}

fn sidebar(ctx: &PageContext<'_>) -> String {
    let mut html = String::from(r#"<aside class="sidebar">"#);
    html.push_str(&format!(
        r#"<img class="banner" src="{}" alt="{}">"#,
        escape(ctx.banner_url),
        escape(ctx.site_title)
    ));

    html.push_str(r#"<h3>Navigation</h3><nav class="nav">"#);
    for page in Page::all() {
        let class = if *page == ctx.page { " class=\"active\"" } else { "" };
        html.push_str(&format!(
            r#"<a href="{}"{}>{}</a>"#,
            page.path(),
            class,
            page.title()
        ));
    }
    html.push_str("</nav><hr class=\"divider\"><h4>Notifications</h4>");

    for n in ctx.notifications {
        html.push_str(&format!(
            r#"<div class="notification"><strong>{}</strong>  ·  {}<div class="muted">{}</div></div>"#,
            escape(&n.title),
            escape(&n.time),
            escape(&n.body)
        ));
    }

    html.push_str("</aside>");
    html
}

fn footer(site_title: &str) -> String {
    format!(
        r#"<div class="footer">
  Built with <strong>{}</strong> · Themeable · Responsive · Single-binary demo.
  <br/>Pro tip: use the sidebar to navigate and the header to switch themes.
</div>"#,
        escape(site_title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::default_notifications;

    fn ctx(theme: Theme, notifications: &[Notification]) -> PageContext<'_> {
        PageContext {
            page: Page::Analytics,
            theme,
            notifications,
            site_title: "Hi-Fi Dashboard",
            banner_url: "https://example.com/banner.png",
            return_to: "/analytics?days=14".to_string(),
        }
    }

    #[test]
    fn test_dark_document() {
        let notifications = default_notifications();
        let html = render_document(&ctx(Theme::Dark, &notifications), "<p>body</p>");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"data-theme="dark""#));
        assert!(html.contains("🌞 Light Mode"));
        assert!(html.contains(r#"name="mode" value="light""#));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains("Welcome!"));
        assert!(html.contains("Toggle theme from the header."));
        assert!(html.contains(r#"<a href="/analytics" class="active">Analytics</a>"#));
        assert!(html.contains(r#"value="/analytics?days=14""#));
    }

    #[test]
    fn test_light_document() {
        let html = render_document(&ctx(Theme::Light, &[]), "");
        assert!(html.contains(r#"<div class="app light" data-theme="light">"#));
        assert!(html.contains("🌙 Dark Mode"));
        assert!(html.contains(r#"name="mode" value="dark""#));
    }
}
