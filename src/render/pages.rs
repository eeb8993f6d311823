//! Page Views
//!
//! One function per dashboard page, each returning the page body that
//! [`super::render_document`] wraps.

use chrono::{DateTime, Duration, Local};
use serde::Deserialize;
use std::sync::Arc;

use super::chart::{self, Mark, ScatterPoint, Series};
use super::components::{
    action_button, alert, card, columns, data_table, expander, key_value_table, metric_tile,
    page_heading, AlertKind,
};
use super::escape;
use crate::contact::{ContactSubmission, Topic, DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY};
use crate::data::{
    TrafficRow, TrafficSeries, MAX_WINDOW_DAYS, MIN_WINDOW_DAYS, SNAPSHOT_DAYS,
};
use crate::session::{GalleryImage, UploadedDataset};

/// Number of columns in the gallery grid
pub const GALLERY_COLUMNS: usize = 3;

/// Entries in the Overview activity feed
const ACTIVITY_ENTRIES: usize = 6;

/// Minutes between activity feed entries
const ACTIVITY_SPACING_MINUTES: i64 = 7;

/// Tabs of the Analytics page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsTab {
    #[default]
    Trends,
    Distributions,
}

impl AnalyticsTab {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalyticsTab::Trends => "trends",
            AnalyticsTab::Distributions => "distributions",
        }
    }
}

fn dates(rows: &[TrafficRow]) -> Vec<chrono::NaiveDate> {
    rows.iter().map(|r| r.date).collect()
}

// ============================================
// OVERVIEW
// ============================================

/// Overview: KPI tiles, traffic snapshot, activity feed, quick actions
pub fn overview(series: &TrafficSeries, now: DateTime<Local>) -> String {
    let summary = series.summary();
    let mut html = page_heading(
        "Overview",
        "A polished dashboard with theming, cards, charts, tables, forms, and file uploads.",
    );

    html.push_str(r#"<div class="metrics">"#);
    html.push_str(&metric_tile("Visitors (7d)", &summary.visitors.to_string()));
    html.push_str(&metric_tile("Signups (7d)", &summary.signups.to_string()));
    html.push_str(&metric_tile("Avg Bounce", &format!("{:.1}%", summary.avg_bounce)));
    html.push_str(&metric_tile("Avg CTR", &format!("{:.2}%", summary.avg_ctr)));
    html.push_str("</div>");

    let snapshot = series.tail(SNAPSHOT_DAYS);
    let snapshot_series = [
        Series::new(
            "Visitors",
            chart::COLOR_BRAND,
            Mark::Line { points: true },
            snapshot.iter().map(|r| r.visitors as f64).collect(),
        ),
        Series::new(
            "Signups",
            chart::COLOR_GREEN,
            Mark::Area { opacity: 0.25 },
            snapshot.iter().map(|r| r.signups as f64).collect(),
        )
        .on_right_axis(),
    ];
    html.push_str("<h3>Traffic Snapshot</h3>");
    html.push_str(&chart::legend(&snapshot_series));
    html.push_str(&chart::time_chart(
        &dates(snapshot),
        &snapshot_series,
        320.0,
        "Date",
        "Visitors",
    ));

    let mut feed = String::new();
    for (time, _) in activity_feed(now) {
        feed.push_str(&format!(
            r#"<p><strong>Update</strong> · {}</p><p class="muted">System processed new analytics and refreshed the dashboard.</p><hr class="divider">"#,
            time
        ));
    }

    let mut actions = String::from("<h3>Quick Actions</h3>");
    actions.push_str(&action_button("🚀 Publish Report"));
    actions.push_str(&action_button("📥 Import Data"));
    actions.push_str(&action_button("⚙️ Settings"));

    html.push_str(&columns(
        "columns-2-1",
        &[format!("<h3>Activity Feed</h3>{}", card(&feed)), actions],
    ));

    html
}

/// Activity feed timestamps (`HH:MM`), newest first
pub fn activity_feed(now: DateTime<Local>) -> Vec<(String, DateTime<Local>)> {
    (0..ACTIVITY_ENTRIES as i64)
        .map(|i| {
            let at = now - Duration::minutes(i * ACTIVITY_SPACING_MINUTES);
            (at.format("%H:%M").to_string(), at)
        })
        .collect()
}

// ============================================
// ANALYTICS
// ============================================

/// Analytics: day slider plus the Trends or Distributions tab
pub fn analytics(series: &TrafficSeries, days: usize, tab: AnalyticsTab) -> String {
    let days = crate::data::clamp_window(days);
    let filtered = series.window(days);

    let mut html = page_heading("Analytics", "Trends and distributions over a selectable window.");

    html.push_str(&format!(
        r#"<form method="get" action="/analytics" class="slider">
  <label for="days">Select days: <strong>{days}</strong></label>
  <input type="range" id="days" name="days" min="{min}" max="{max}" value="{days}" onchange="this.form.submit()">
  <input type="hidden" name="tab" value="{tab}">
  <noscript><button class="btn" type="submit">Apply</button></noscript>
</form>"#,
        days = days,
        min = MIN_WINDOW_DAYS,
        max = MAX_WINDOW_DAYS,
        tab = tab.as_str(),
    ));

    html.push_str(r#"<nav class="tabs">"#);
    for (t, label) in [
        (AnalyticsTab::Trends, "Trends"),
        (AnalyticsTab::Distributions, "Distributions"),
    ] {
        html.push_str(&format!(
            r#"<a href="/analytics?days={}&amp;tab={}"{}>{}</a>"#,
            days,
            t.as_str(),
            if t == tab { r#" class="active""# } else { "" },
            label
        ));
    }
    html.push_str("</nav>");

    match tab {
        AnalyticsTab::Trends => html.push_str(&trends(filtered)),
        AnalyticsTab::Distributions => html.push_str(&distributions(filtered)),
    }

    html
}

fn trends(rows: &[TrafficRow]) -> String {
    let d = dates(rows);

    let fold = [
        Series::new(
            "visitors",
            chart::COLOR_BLUE,
            Mark::Line { points: true },
            rows.iter().map(|r| r.visitors as f64).collect(),
        ),
        Series::new(
            "signups",
            chart::COLOR_ORANGE,
            Mark::Line { points: true },
            rows.iter().map(|r| r.signups as f64).collect(),
        ),
    ];

    let bounce = [Series::new(
        "Bounce %",
        chart::COLOR_BLUE,
        Mark::Area { opacity: 1.0 },
        rows.iter().map(|r| r.bounce).collect(),
    )];
    let ctr = [Series::new(
        "CTR %",
        chart::COLOR_BLUE,
        Mark::Bar,
        rows.iter().map(|r| r.ctr).collect(),
    )];

    let mut html = String::from("<h4>Visitors vs Signups</h4>");
    html.push_str(&chart::legend(&fold));
    html.push_str(&chart::time_chart(&d, &fold, 360.0, "date", "value"));

    html.push_str("<h4>Bounce Rate &amp; CTR</h4>");
    html.push_str(&columns(
        "columns-2",
        &[
            chart::time_chart(&d, &bounce, 260.0, "date", "Bounce %"),
            chart::time_chart(&d, &ctr, 260.0, "date", "CTR %"),
        ],
    ));
    html
}

fn distributions(rows: &[TrafficRow]) -> String {
    let visitors: Vec<f64> = rows.iter().map(|r| r.visitors as f64).collect();
    let points: Vec<ScatterPoint> = rows
        .iter()
        .map(|r| ScatterPoint {
            x: r.visitors as f64,
            y: r.signups as f64,
            tooltip: format!(
                "date: {} · visitors: {} · signups: {}",
                r.date.format("%Y-%m-%d"),
                r.visitors,
                r.signups
            ),
        })
        .collect();

    let mut html = String::from("<h4>Distribution of Visitors</h4>");
    html.push_str(&chart::histogram(&visitors, 10, 300.0, "visitors"));
    html.push_str("<h4>Signups vs Visitors (scatter)</h4>");
    html.push_str(&chart::scatter(&points, 320.0, "visitors", "signups"));
    html
}

// ============================================
// DATA
// ============================================

/// Data: upload form, then preview, profile and cleaning summary
pub fn data(dataset: Option<&UploadedDataset>, preview_rows: usize) -> String {
    let mut html = page_heading(
        "Data",
        "Upload a CSV to preview, profile, and download a cleaned version.",
    );

    html.push_str(
        r#"<form method="post" action="/data" enctype="multipart/form-data" class="stacked">
  <label for="file">Upload CSV</label>
  <input type="file" id="file" name="file" accept=".csv">
  <button class="btn btn-primary" type="submit">Upload</button>
</form>"#,
    );

    let Some(dataset) = dataset else {
        html.push_str(&alert(
            AlertKind::Warning,
            "No file uploaded yet. Use the Sample CSV from the header if you need data.",
        ));
        return html;
    };

    let table = &dataset.table;
    let (rows, cols) = table.shape();
    html.push_str(&alert(
        AlertKind::Success,
        &format!(
            "Loaded <strong>{}</strong> rows, <strong>{}</strong> columns from {}",
            rows,
            cols,
            escape(&dataset.file_name)
        ),
    ));

    html.push_str(&expander("Preview", &data_table(table, preview_rows), true));

    let profile = table.profile();
    let mut profile_html = format!(
        "<p>Shape: ({}, {})</p><p>Columns: {}</p><p>Nulls per column:</p>",
        profile.rows,
        profile.columns,
        escape(&format!("{:?}", profile.column_names()))
    );
    let null_rows: Vec<(String, String)> = profile
        .column_profiles
        .iter()
        .map(|c| (c.name.clone(), format!("{} ({})", c.nulls, c.kind)))
        .collect();
    profile_html.push_str(&key_value_table(&null_rows));
    html.push_str(&expander("Quick Profile", &profile_html, false));

    let report = table.clean();
    html.push_str(&alert(
        AlertKind::Info,
        &format!(
            "Removed {} duplicate rows. Filled nulls in numeric columns with median values.",
            report.duplicates_removed()
        ),
    ));
    if !report.filled_columns.is_empty() {
        let filled: Vec<(String, String)> = report
            .filled_columns
            .iter()
            .map(|c| (c.name.clone(), format!("{} filled with {}", c.filled, c.median)))
            .collect();
        html.push_str(&key_value_table(&filled));
    }

    html.push_str(
        r#"<p><a class="btn btn-primary" href="/data/clean.csv" download="clean_data.csv">⬇️ Download Clean CSV</a></p>"#,
    );

    html
}

// ============================================
// GALLERY
// ============================================

/// Image indices per grid column: image `i` goes to column `i % 3`
pub fn gallery_columns(count: usize) -> [Vec<usize>; GALLERY_COLUMNS] {
    let mut cols: [Vec<usize>; GALLERY_COLUMNS] = Default::default();
    for i in 0..count {
        cols[i % GALLERY_COLUMNS].push(i);
    }
    cols
}

/// Gallery: multi-file upload form and a 3-column image grid
pub fn gallery(images: &[Arc<GalleryImage>]) -> String {
    let mut html = page_heading("Gallery", "Drop images to view them in a responsive grid.");

    html.push_str(
        r#"<form method="post" action="/gallery" enctype="multipart/form-data" class="stacked">
  <label for="images">Upload images</label>
  <input type="file" id="images" name="images" accept=".png,.jpg,.jpeg" multiple>
  <button class="btn btn-primary" type="submit">Upload</button>
</form>"#,
    );

    if images.is_empty() {
        html.push_str(&alert(
            AlertKind::Info,
            "No images uploaded yet. Try dragging a few images here ✨",
        ));
        return html;
    }

    html.push_str(r#"<div class="gallery-grid">"#);
    for column in gallery_columns(images.len()) {
        html.push_str(r#"<div class="column">"#);
        for i in column {
            html.push_str(&format!(
                r#"<img src="/gallery/images/{}" alt="{}" data-index="{}">"#,
                i,
                escape(&images[i].file_name),
                i
            ));
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");

    html.push_str(
        r#"<form method="post" action="/gallery/clear"><button class="btn" type="submit">Clear images</button></form>"#,
    );

    html
}

// ============================================
// CONTACT
// ============================================

/// Contact: the form, plus the echo of the last submission if any
pub fn contact(submission: Option<&ContactSubmission>) -> String {
    let mut html = page_heading(
        "Contact",
        "Send a message. The form simulates submit and echoes your entry.",
    );

    let mut topics = String::new();
    for topic in Topic::all() {
        topics.push_str(&format!(r#"<option value="{0}">{0}</option>"#, topic));
    }

    html.push_str(&card(&format!(
        r#"<form method="post" action="/contact" class="stacked">
  <label for="name">Your Name</label>
  <input type="text" id="name" name="name">
  <label for="email">Email</label>
  <input type="text" id="email" name="email">
  <label for="topic">Topic</label>
  <select id="topic" name="topic">{topics}</select>
  <label for="message">Message</label>
  <textarea id="message" name="message" rows="6"></textarea>
  <div class="columns columns-2">
    <div><label><input type="checkbox" name="subscribe" value="on"> Subscribe to updates</label></div>
    <div><label for="priority">Priority</label>
      <input type="range" id="priority" name="priority" min="{min}" max="{max}" value="{default}"></div>
  </div>
  <button class="btn btn-primary btn-block" type="submit">Send</button>
</form>"#,
        topics = topics,
        min = MIN_PRIORITY,
        max = MAX_PRIORITY,
        default = DEFAULT_PRIORITY,
    )));

    if let Some(submission) = submission {
        let mut echo = alert(AlertKind::Success, "Message received! Here's what you sent:");
        echo.push_str(&format!(
            r#"<pre class="echo">{}</pre>"#,
            escape(&submission.to_pretty_json())
        ));
        html.push_str(&card(&echo));
    }

    html
}

// ============================================
// ERRORS
// ============================================

/// Error card shown in place of a page body
pub fn error(status: u16, message: &str, request_id: &str) -> String {
    let mut html = page_heading("Something went wrong", &format!("Error {}", status));
    html.push_str(&alert(AlertKind::Error, &escape(message)));
    html.push_str(&format!(
        r#"<p class="muted">Request ID: {}</p><p><a class="btn" href="/">Back to Overview</a></p>"#,
        escape(request_id)
    ));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataTable, TrafficGenerator};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn series() -> TrafficSeries {
        TrafficGenerator::default().generate(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_overview_tiles_use_seven_day_sums() {
        let s = series();
        let tail = &s.rows()[s.len() - 7..];
        let visitors: u64 = tail.iter().map(|r| r.visitors as u64).sum();
        let signups: u64 = tail.iter().map(|r| r.signups as u64).sum();

        let html = overview(&s, now());
        assert!(html.contains(&format!(
            r#"<div class="label">Visitors (7d)</div><div class="value">{}</div>"#,
            visitors
        )));
        assert!(html.contains(&format!(
            r#"<div class="label">Signups (7d)</div><div class="value">{}</div>"#,
            signups
        )));
        assert_eq!(html.matches("<button").count(), 3);
    }

    #[test]
    fn test_activity_feed_spacing() {
        let feed = activity_feed(now());
        let labels: Vec<&str> = feed.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["12:00", "11:53", "11:46", "11:39", "11:32", "11:25"]);
    }

    #[test]
    fn test_analytics_clamps_slider() {
        let html = analytics(&series(), 2, AnalyticsTab::Trends);
        assert!(html.contains(r#"value="7""#));
        assert!(html.contains("Visitors vs Signups"));

        let html = analytics(&series(), 99, AnalyticsTab::Distributions);
        assert!(html.contains(r#"value="60""#));
        assert!(html.contains("Distribution of Visitors"));
        assert_eq!(html.matches("<circle").count(), 61);
    }

    #[test]
    fn test_data_placeholder_without_upload() {
        let html = data(None, 100);
        assert!(html.contains("No file uploaded yet"));
        assert!(!html.contains("clean.csv"));
    }

    #[test]
    fn test_data_with_upload() {
        let dataset = UploadedDataset {
            file_name: "people.csv".to_string(),
            size_bytes: 30,
            table: DataTable::from_bytes(b"name,age\nann,30\nann,30\nbob,\n").unwrap(),
            uploaded_at: Utc::now(),
        };
        let html = data(Some(&dataset), 100);
        assert!(html.contains("Loaded <strong>3</strong> rows, <strong>2</strong> columns"));
        assert!(html.contains("Removed 1 duplicate rows."));
        assert!(html.contains("/data/clean.csv"));
    }

    #[test]
    fn test_gallery_columns_round_robin() {
        let cols = gallery_columns(7);
        assert_eq!(cols[0], vec![0, 3, 6]);
        assert_eq!(cols[1], vec![1, 4]);
        assert_eq!(cols[2], vec![2, 5]);

        for n in 0..20 {
            let cols = gallery_columns(n);
            for (c, items) in cols.iter().enumerate() {
                assert!(items.iter().all(|i| i % 3 == c));
            }
            assert_eq!(cols.iter().map(Vec::len).sum::<usize>(), n);
        }
    }

    #[test]
    fn test_gallery_placeholder() {
        assert!(gallery(&[]).contains("No images uploaded yet"));
    }

    #[test]
    fn test_contact_echo_escapes() {
        let submission = ContactSubmission {
            name: "<A>".to_string(),
            email: "a@b.com".to_string(),
            topic: Topic::Support,
            message: "hi".to_string(),
            subscribe: true,
            priority: 4,
            time: "2024-06-30T12:00:00".to_string(),
        };
        let html = contact(Some(&submission));
        assert!(html.contains("Message received!"));
        assert!(html.contains("&quot;name&quot;: &quot;&lt;A&gt;&quot;"));
        assert!(contact(None).contains(r#"<option value="Feedback">Feedback</option>"#));
    }
}
