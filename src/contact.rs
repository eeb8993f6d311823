//! Contact Form
//!
//! The Contact page collects six fields and echoes them back with the
//! submission time. Nothing is validated or stored.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Smallest priority the slider allows
pub const MIN_PRIORITY: u8 = 1;
/// Largest priority the slider allows
pub const MAX_PRIORITY: u8 = 5;
/// Slider position on first render
pub const DEFAULT_PRIORITY: u8 = 3;

/// Message topic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topic {
    #[default]
    General,
    Support,
    Partnership,
    Feedback,
}

impl Topic {
    pub fn all() -> &'static [Topic] {
        &[
            Topic::General,
            Topic::Support,
            Topic::Partnership,
            Topic::Feedback,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Topic::General => "General",
            Topic::Support => "Support",
            Topic::Partnership => "Partnership",
            Topic::Feedback => "Feedback",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw form fields as posted by the browser.
///
/// An unchecked checkbox is absent from the body, so `subscribe` defaults
/// to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub topic: Topic,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub subscribe: Option<String>,
    /// Raw slider value; parsed leniently by [`parse_priority`]
    #[serde(default)]
    pub priority: Option<String>,
}

/// The echoed submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub topic: Topic,
    pub message: String,
    pub subscribe: bool,
    pub priority: u8,
    /// Local submission time, ISO-8601 to the second
    pub time: String,
}

impl ContactSubmission {
    /// Build the echo from the posted form at `now`
    pub fn from_form(form: ContactForm, now: DateTime<Local>) -> Self {
        let subscribe = form
            .subscribe
            .as_deref()
            .map(|v| !matches!(v, "" | "false" | "off" | "0"))
            .unwrap_or(false);

        Self {
            name: form.name,
            email: form.email,
            topic: form.topic,
            message: form.message,
            subscribe,
            priority: form
                .priority
                .as_deref()
                .map(parse_priority)
                .unwrap_or(DEFAULT_PRIORITY),
            time: format_submission_time(now),
        }
    }

    /// Pretty JSON shown on the page
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Slider value clamped to 1-5. Blank or non-numeric input falls back to
/// the default; integers too large to represent clamp by sign.
pub fn parse_priority(raw: &str) -> u8 {
    let raw = raw.trim();
    let digits = raw.strip_prefix(|c| c == '-' || c == '+').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return DEFAULT_PRIORITY;
    }
    if raw.starts_with('-') {
        return MIN_PRIORITY;
    }
    digits
        .parse::<u64>()
        .map(|v| v.clamp(MIN_PRIORITY as u64, MAX_PRIORITY as u64) as u8)
        .unwrap_or(MAX_PRIORITY)
}

/// `YYYY-MM-DDTHH:MM:SS`
pub fn format_submission_time(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 4, 13, 37, 9).unwrap()
    }

    #[test]
    fn test_echo_keeps_fields_verbatim() {
        let form = ContactForm {
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            topic: Topic::Support,
            message: "hi".to_string(),
            subscribe: Some("on".to_string()),
            priority: Some("4".to_string()),
        };

        let submission = ContactSubmission::from_form(form, fixed_now());
        assert_eq!(submission.name, "A");
        assert_eq!(submission.email, "a@b.com");
        assert_eq!(submission.topic, Topic::Support);
        assert_eq!(submission.message, "hi");
        assert!(submission.subscribe);
        assert_eq!(submission.priority, 4);
        assert_eq!(submission.time, "2024-05-04T13:37:09");
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let submission = ContactSubmission::from_form(ContactForm::default(), fixed_now());
        assert_eq!(submission.topic, Topic::General);
        assert!(!submission.subscribe);
        assert_eq!(submission.priority, DEFAULT_PRIORITY);
        assert_eq!(submission.name, "");
    }

    #[test]
    fn test_priority_is_clamped() {
        let form = ContactForm {
            priority: Some("9".to_string()),
            ..Default::default()
        };
        assert_eq!(ContactSubmission::from_form(form, fixed_now()).priority, 5);

        let form = ContactForm {
            priority: Some("0".to_string()),
            ..Default::default()
        };
        assert_eq!(ContactSubmission::from_form(form, fixed_now()).priority, 1);
    }

    #[test]
    fn test_parse_priority_out_of_range() {
        assert_eq!(parse_priority("4"), 4);
        assert_eq!(parse_priority(" 300 "), MAX_PRIORITY);
        assert_eq!(parse_priority("99999999999999999999999"), MAX_PRIORITY);
        assert_eq!(parse_priority("-3"), MIN_PRIORITY);
        assert_eq!(parse_priority(""), DEFAULT_PRIORITY);
        assert_eq!(parse_priority("high"), DEFAULT_PRIORITY);
    }

    #[test]
    fn test_json_echo() {
        let form = ContactForm {
            name: "A".to_string(),
            topic: Topic::Feedback,
            ..Default::default()
        };
        let json: serde_json::Value =
            serde_json::from_str(&ContactSubmission::from_form(form, fixed_now()).to_pretty_json())
                .unwrap();

        assert_eq!(json["name"], "A");
        assert_eq!(json["topic"], "Feedback");
        assert_eq!(json["subscribe"], false);
        assert_eq!(json["priority"], 3);
        assert_eq!(json["time"], "2024-05-04T13:37:09");
    }

    #[test]
    fn test_form_deserializes_from_urlencoded_shape() {
        let form: ContactForm = serde_json::from_value(serde_json::json!({
            "name": "A",
            "topic": "Partnership",
            "priority": "2"
        }))
        .unwrap();
        assert_eq!(form.topic, Topic::Partnership);
        assert_eq!(form.priority.as_deref(), Some("2"));
        assert!(form.subscribe.is_none());
    }
}
