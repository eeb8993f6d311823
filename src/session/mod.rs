//! Session State
//!
//! Per-browser state that survives re-renders: the theme, the notification
//! list and whatever the visitor uploaded on the Data and Gallery pages.
//! Sessions are identified by a cookie and kept in a [`SessionStore`].

pub mod store;

pub use store::{SessionConfig, SessionError, SessionStore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::data::DataTable;

/// Unique identifier for a browser session
pub type SessionId = Uuid;

/// Color theme of the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Class applied to the root wrapper (dark is the stylesheet default)
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "",
        }
    }

    /// Label of the button that switches away from this theme
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "🌞 Light Mode",
            Theme::Light => "🌙 Dark Mode",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

/// A sidebar notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    /// Relative time label, e.g. "1 min"
    pub time: String,
    pub body: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, time: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            time: time.into(),
            body: body.into(),
        }
    }
}

/// Notifications every new session starts with
pub fn default_notifications() -> Vec<Notification> {
    vec![
        Notification::new("Welcome!", "Just now", "Explore the tabs and upload data."),
        Notification::new("Tip", "1 min", "Toggle theme from the header."),
    ]
}

/// The CSV last uploaded on the Data page
#[derive(Debug, Clone)]
pub struct UploadedDataset {
    pub file_name: String,
    /// Size of the uploaded file
    pub size_bytes: usize,
    pub table: DataTable,
    pub uploaded_at: DateTime<Utc>,
}

/// An image uploaded on the Gallery page
#[derive(Debug, Clone)]
pub struct GalleryImage {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl GalleryImage {
    /// Accept a file by extension (`.png`, `.jpg`, `.jpeg`); other files
    /// return `None`.
    pub fn from_upload(file_name: impl Into<String>, bytes: Vec<u8>) -> Option<Self> {
        let file_name = file_name.into();
        let content_type = image_content_type(&file_name)?;
        Some(Self {
            file_name,
            content_type,
            bytes,
        })
    }
}

/// Content type for an accepted image file name
pub fn image_content_type(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

/// Whether a file name has the `.csv` extension
pub fn is_csv_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// State of one browser session.
///
/// Uploads are behind `Arc` so a snapshot per request stays cheap.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub theme: Theme,
    pub notifications: Vec<Notification>,
    pub dataset: Option<Arc<UploadedDataset>>,
    pub images: Vec<Arc<GalleryImage>>,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            theme: Theme::default(),
            notifications: default_notifications(),
            dataset: None,
            images: Vec::new(),
            created_at: now,
            last_seen: now,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn dataset_bytes(&self) -> usize {
        self.dataset.as_ref().map(|d| d.size_bytes).unwrap_or(0)
    }

    pub fn image_bytes(&self) -> usize {
        self.images.iter().map(|i| i.bytes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(Uuid::new_v4());
        assert_eq!(session.theme, Theme::Dark);
        assert_eq!(session.notifications.len(), 2);
        assert_eq!(session.notifications[0].title, "Welcome!");
        assert_eq!(session.notifications[1].time, "1 min");
        assert!(session.dataset.is_none());
        assert!(session.images.is_empty());
        assert_eq!(session.dataset_bytes() + session.image_bytes(), 0);
    }

    #[test]
    fn test_light_then_dark_returns_to_dark() {
        let mut session = Session::new(Uuid::new_v4());
        session.set_theme(Theme::Light);
        session.set_theme(Theme::Dark);
        assert_eq!(session.theme, Theme::Dark);

        session.set_theme(Theme::Light);
        session.set_theme(Theme::Light);
        assert_eq!(session.theme, Theme::Light);
    }

    #[test]
    fn test_theme_parse_and_display() {
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!(" DARK ".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.to_string(), "light");
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_toggle_labels() {
        assert_eq!(Theme::Dark.toggle_label(), "🌞 Light Mode");
        assert_eq!(Theme::Light.toggle_label(), "🌙 Dark Mode");
        assert_eq!(Theme::Light.css_class(), "light");
        assert_eq!(Theme::Dark.css_class(), "");
    }

    #[test]
    fn test_image_extension_filter() {
        assert_eq!(image_content_type("a.PNG"), Some("image/png"));
        assert_eq!(image_content_type("photo.jpeg"), Some("image/jpeg"));
        assert_eq!(image_content_type("photo.jpg"), Some("image/jpeg"));
        assert_eq!(image_content_type("anim.gif"), None);
        assert_eq!(image_content_type("noext"), None);

        assert!(GalleryImage::from_upload("x.png", vec![1, 2]).is_some());
        assert!(GalleryImage::from_upload("x.txt", vec![1, 2]).is_none());
    }

    #[test]
    fn test_csv_extension_filter() {
        assert!(is_csv_file("data.csv"));
        assert!(is_csv_file("DATA.CSV"));
        assert!(!is_csv_file("data.tsv"));
        assert!(!is_csv_file("csv"));
    }
}
