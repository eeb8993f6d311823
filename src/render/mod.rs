//! HTML Rendering
//!
//! Pure functions from view models to HTML strings. Every request renders a
//! whole document: theme wrapper, header, sidebar, the selected page and
//! the footer.
//!
//! - [`layout`]: document shell (header, sidebar, footer)
//! - [`components`]: cards, metric tiles, alerts, tables
//! - [`chart`]: server-side SVG charts
//! - [`pages`]: one view per dashboard page
//! - [`theme`]: the stylesheet

pub mod chart;
pub mod components;
pub mod layout;
pub mod pages;
pub mod theme;

pub use layout::{render_document, PageContext};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The five dashboard pages, in navigation order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Overview,
    Analytics,
    Data,
    Gallery,
    Contact,
}

impl Page {
    pub fn all() -> &'static [Page] {
        &[
            Page::Overview,
            Page::Analytics,
            Page::Data,
            Page::Gallery,
            Page::Contact,
        ]
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Analytics => "Analytics",
            Page::Data => "Data",
            Page::Gallery => "Gallery",
            Page::Contact => "Contact",
        }
    }

    /// Canonical URL path of the page
    pub fn path(self) -> &'static str {
        match self {
            Page::Overview => "/overview",
            Page::Analytics => "/analytics",
            Page::Data => "/data",
            Page::Gallery => "/gallery",
            Page::Contact => "/contact",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::all()
            .iter()
            .copied()
            .find(|p| p.title().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown page: {}", s))
    }
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_page_from_str() {
        assert_eq!("analytics".parse::<Page>().unwrap(), Page::Analytics);
        assert_eq!("Gallery".parse::<Page>().unwrap(), Page::Gallery);
        assert!("settings".parse::<Page>().is_err());
    }

    #[test]
    fn test_page_paths_are_unique() {
        let paths: std::collections::HashSet<&str> = Page::all().iter().map(|p| p.path()).collect();
        assert_eq!(paths.len(), 5);
    }
}
