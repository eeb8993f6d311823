//! SVG Charts
//!
//! Minimal server-side charts for the Overview and Analytics pages:
//! time series (line, area, bar, layered with independent scales),
//! histograms and scatter plots. Quantitative axes start at zero and end on
//! a "nice" tick, like most charting libraries do by default.

use chrono::NaiveDate;
use std::fmt::Write;

use super::escape;

const WIDTH: f64 = 720.0;
const MARGIN_LEFT: f64 = 52.0;
const MARGIN_RIGHT: f64 = 52.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 40.0;
const Y_TICKS: usize = 5;
const X_LABELS: usize = 8;

pub const COLOR_BLUE: &str = "#4c78a8";
pub const COLOR_ORANGE: &str = "#f58518";
pub const COLOR_BRAND: &str = "#7c3aed";
pub const COLOR_GREEN: &str = "#22c55e";

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mark {
    /// Polyline, optionally with a circle on every point
    Line { points: bool },
    /// Filled area down to zero
    Area { opacity: f64 },
    Bar,
}

/// Which y axis a series is scaled against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Left,
    Right,
}

/// One series of a time chart
#[derive(Debug, Clone)]
pub struct Series<'a> {
    pub label: &'a str,
    pub color: &'a str,
    pub mark: Mark,
    pub axis: Axis,
    pub values: Vec<f64>,
}

impl<'a> Series<'a> {
    pub fn new(label: &'a str, color: &'a str, mark: Mark, values: Vec<f64>) -> Self {
        Self {
            label,
            color,
            mark,
            axis: Axis::Left,
            values,
        }
    }

    /// Scale this series against the right-hand axis
    pub fn on_right_axis(mut self) -> Self {
        self.axis = Axis::Right;
        self
    }
}

/// A point of a scatter plot
#[derive(Debug, Clone)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub tooltip: String,
}

/// A histogram bin, `[start, end)` except the last which includes `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Linear mapping from a data domain onto pixel range
#[derive(Debug, Clone, Copy)]
struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if (d1 - d0).abs() < f64::EPSILON {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Smallest step from {1, 2, 5} × 10^k that splits `span` into at most
/// `max_steps` pieces
pub fn nice_step(span: f64, max_steps: usize) -> f64 {
    if span <= 0.0 || !span.is_finite() || max_steps == 0 {
        return 1.0;
    }
    let raw = span / max_steps as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    for factor in [1.0, 2.0, 5.0, 10.0] {
        let step = factor * magnitude;
        if step >= raw {
            return step;
        }
    }
    10.0 * magnitude
}

/// Zero-based domain ending on a nice tick, with the ticks
fn zero_domain(max: f64) -> ((f64, f64), Vec<f64>) {
    let max = if max > 0.0 && max.is_finite() { max } else { 1.0 };
    let step = nice_step(max, Y_TICKS);
    let top = (max / step).ceil() * step;
    let count = (top / step).round() as usize;
    let ticks = (0..=count).map(|i| i as f64 * step).collect();
    ((0.0, top), ticks)
}

/// Group values into at most `max_bins` equal-width bins on nice boundaries
pub fn bin_values(values: &[f64], max_bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let step = nice_step(max - min, max_bins.max(1));
    let start = (min / step).floor() * step;
    let mut bin_count = ((max - start) / step).ceil().max(1.0) as usize;
    if start + bin_count as f64 * step <= max && bin_count < max_bins {
        bin_count += 1;
    }

    let mut bins: Vec<Bin> = (0..bin_count)
        .map(|i| Bin {
            start: start + i as f64 * step,
            end: start + (i + 1) as f64 * step,
            count: 0,
        })
        .collect();

    for v in finite {
        let index = (((v - start) / step).floor() as usize).min(bin_count - 1);
        bins[index].count += 1;
    }

    bins
}

fn format_tick(v: f64) -> String {
    if v.fract().abs() < 1e-9 {
        format!("{}", v as i64)
    } else {
        format!("{:.1}", v)
    }
}

fn open_svg(height: f64, label: &str) -> String {
    format!(
        r#"<svg class="chart" viewBox="0 0 {} {}" role="img" aria-label="{}" xmlns="http://www.w3.org/2000/svg">"#,
        WIDTH,
        height,
        escape(label)
    )
}

fn empty_chart(height: f64, label: &str) -> String {
    let mut svg = open_svg(height, label);
    let _ = write!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle">No data</text></svg>"#,
        WIDTH / 2.0,
        height / 2.0
    );
    svg
}

/// Horizontal grid lines and tick labels for a y axis
fn y_axis(svg: &mut String, scale: &LinearScale, ticks: &[f64], axis: Axis, title: &str, height: f64) {
    let (x, anchor, title_x) = match axis {
        Axis::Left => (MARGIN_LEFT - 6.0, "end", 12.0),
        Axis::Right => (WIDTH - MARGIN_RIGHT + 6.0, "start", WIDTH - 8.0),
    };

    for &tick in ticks {
        let y = scale.map(tick);
        if axis == Axis::Left {
            let _ = write!(
                svg,
                r#"<line class="grid" x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"/>"#,
                MARGIN_LEFT,
                y,
                WIDTH - MARGIN_RIGHT,
                y
            );
        }
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="{}" dominant-baseline="middle">{}</text>"#,
            x,
            y,
            anchor,
            format_tick(tick)
        );
    }

    if !title.is_empty() {
        let mid = (MARGIN_TOP + height - MARGIN_BOTTOM) / 2.0;
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" transform="rotate(-90 {:.1} {:.1})">{}</text>"#,
            title_x,
            mid,
            title_x,
            mid,
            escape(title)
        );
    }
}

fn x_baseline(svg: &mut String, height: f64) {
    let y = height - MARGIN_BOTTOM;
    let _ = write!(
        svg,
        r#"<line class="axis" x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"/>"#,
        MARGIN_LEFT,
        y,
        WIDTH - MARGIN_RIGHT,
        y
    );
}

fn x_title(svg: &mut String, height: f64, title: &str) {
    if title.is_empty() {
        return;
    }
    let _ = write!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
        (MARGIN_LEFT + WIDTH - MARGIN_RIGHT) / 2.0,
        height - 4.0,
        escape(title)
    );
}

/// HTML legend for multi-series charts
pub fn legend(series: &[Series<'_>]) -> String {
    let mut html = String::from(r#"<div class="legend">"#);
    for s in series {
        let _ = write!(
            html,
            r#"<span><span class="swatch" style="background:{}"></span>{}</span>"#,
            escape(s.color),
            escape(s.label)
        );
    }
    html.push_str("</div>");
    html
}

/// Chart over daily dates. Series on the right axis get their own scale.
pub fn time_chart(
    dates: &[NaiveDate],
    series: &[Series<'_>],
    height: f64,
    x_label: &str,
    y_label: &str,
) -> String {
    if dates.is_empty() {
        return empty_chart(height, y_label);
    }

    let n = dates.len();
    let plot_left = MARGIN_LEFT;
    let plot_right = WIDTH - MARGIN_RIGHT;
    let plot_bottom = height - MARGIN_BOTTOM;
    let has_bars = series.iter().any(|s| s.mark == Mark::Bar);
    let band = (plot_right - plot_left) / n as f64;

    let x_at = |i: usize| -> f64 {
        if has_bars {
            plot_left + band * (i as f64 + 0.5)
        } else if n == 1 {
            (plot_left + plot_right) / 2.0
        } else {
            plot_left + i as f64 * (plot_right - plot_left) / (n - 1) as f64
        }
    };

    let axis_max = |axis: Axis| {
        series
            .iter()
            .filter(|s| s.axis == axis)
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0f64, f64::max)
    };

    let (left_domain, left_ticks) = zero_domain(axis_max(Axis::Left));
    let left = LinearScale {
        domain: left_domain,
        range: (plot_bottom, MARGIN_TOP),
    };
    let (right_domain, right_ticks) = zero_domain(axis_max(Axis::Right));
    let right = LinearScale {
        domain: right_domain,
        range: (plot_bottom, MARGIN_TOP),
    };

    let mut svg = open_svg(height, y_label);
    y_axis(&mut svg, &left, &left_ticks, Axis::Left, y_label, height);
    let right_label = series
        .iter()
        .find(|s| s.axis == Axis::Right)
        .map(|s| s.label);
    if let Some(label) = right_label {
        y_axis(&mut svg, &right, &right_ticks, Axis::Right, label, height);
    }
    x_baseline(&mut svg, height);

    // Date labels, thinned out to at most X_LABELS
    let every = n.div_ceil(X_LABELS).max(1);
    for (i, date) in dates.iter().enumerate().filter(|(i, _)| i % every == 0) {
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            x_at(i),
            plot_bottom + 16.0,
            date.format("%b %d")
        );
    }

    for s in series {
        let scale = match s.axis {
            Axis::Left => &left,
            Axis::Right => &right,
        };
        let points: Vec<(f64, f64)> = s
            .values
            .iter()
            .take(n)
            .enumerate()
            .map(|(i, v)| (x_at(i), scale.map(*v)))
            .collect();

        match s.mark {
            Mark::Line { points: with_points } => {
                let _ = write!(
                    svg,
                    r#"<path d="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
                    polyline(&points),
                    escape(s.color)
                );
                if with_points {
                    for (i, (x, y)) in points.iter().enumerate() {
                        let _ = write!(
                            svg,
                            r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{}"><title>{} · {}: {}</title></circle>"#,
                            x,
                            y,
                            escape(s.color),
                            dates[i].format("%Y-%m-%d"),
                            escape(s.label),
                            format_tick(s.values[i])
                        );
                    }
                }
            }
            Mark::Area { opacity } => {
                if let (Some(first), Some(last)) = (points.first(), points.last()) {
                    let _ = write!(
                        svg,
                        r#"<path d="{} L{:.1},{:.1} L{:.1},{:.1} Z" fill="{}" fill-opacity="{}" stroke="none"/>"#,
                        polyline(&points),
                        last.0,
                        plot_bottom,
                        first.0,
                        plot_bottom,
                        escape(s.color),
                        opacity
                    );
                }
            }
            Mark::Bar => {
                let width = (band * 0.8).max(1.0);
                for (x, y) in &points {
                    let _ = write!(
                        svg,
                        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                        x - width / 2.0,
                        y,
                        width,
                        (plot_bottom - y).max(0.0),
                        escape(s.color)
                    );
                }
            }
        }
    }

    x_title(&mut svg, height, x_label);
    svg.push_str("</svg>");
    svg
}

fn polyline(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let _ = write!(d, "{}{:.1},{:.1}", if i == 0 { "M" } else { " L" }, x, y);
    }
    d
}

/// Bar chart of binned counts
pub fn histogram(values: &[f64], max_bins: usize, height: f64, x_label: &str) -> String {
    let bins = bin_values(values, max_bins);
    if bins.is_empty() {
        return empty_chart(height, x_label);
    }

    let plot_bottom = height - MARGIN_BOTTOM;
    let x = LinearScale {
        domain: (bins[0].start, bins[bins.len() - 1].end),
        range: (MARGIN_LEFT, WIDTH - MARGIN_RIGHT),
    };
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;
    let (domain, ticks) = zero_domain(max_count);
    let y = LinearScale {
        domain,
        range: (plot_bottom, MARGIN_TOP),
    };

    let mut svg = open_svg(height, x_label);
    y_axis(&mut svg, &y, &ticks, Axis::Left, "Count of Records", height);
    x_baseline(&mut svg, height);

    for bin in &bins {
        let x0 = x.map(bin.start);
        let x1 = x.map(bin.end);
        let top = y.map(bin.count as f64);
        let _ = write!(
            svg,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}–{}: {}</title></rect>"#,
            x0 + 1.0,
            top,
            (x1 - x0 - 2.0).max(1.0),
            (plot_bottom - top).max(0.0),
            COLOR_BLUE,
            format_tick(bin.start),
            format_tick(bin.end),
            bin.count
        );
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            x0,
            plot_bottom + 16.0,
            format_tick(bin.start)
        );
    }
    if let Some(last) = bins.last() {
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            x.map(last.end),
            plot_bottom + 16.0,
            format_tick(last.end)
        );
    }

    x_title(&mut svg, height, &format!("{} (binned)", x_label));
    svg.push_str("</svg>");
    svg
}

/// Scatter plot with a tooltip per point
pub fn scatter(points: &[ScatterPoint], height: f64, x_label: &str, y_label: &str) -> String {
    if points.is_empty() {
        return empty_chart(height, y_label);
    }

    let plot_bottom = height - MARGIN_BOTTOM;
    let max_x = points.iter().map(|p| p.x).fold(0.0f64, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(0.0f64, f64::max);

    let (x_domain, x_ticks) = zero_domain(max_x);
    let (y_domain, y_ticks) = zero_domain(max_y);
    let x = LinearScale {
        domain: x_domain,
        range: (MARGIN_LEFT, WIDTH - MARGIN_RIGHT),
    };
    let y = LinearScale {
        domain: y_domain,
        range: (plot_bottom, MARGIN_TOP),
    };

    let mut svg = open_svg(height, y_label);
    y_axis(&mut svg, &y, &y_ticks, Axis::Left, y_label, height);
    x_baseline(&mut svg, height);

    for tick in x_ticks {
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            x.map(tick),
            plot_bottom + 16.0,
            format_tick(tick)
        );
    }

    for p in points {
        let _ = write!(
            svg,
            r#"<circle cx="{:.1}" cy="{:.1}" r="6" fill="{}" fill-opacity="0.7"><title>{}</title></circle>"#,
            x.map(p.x),
            y.map(p.y),
            COLOR_BLUE,
            escape(&p.tooltip)
        );
    }

    x_title(&mut svg, height, x_label);
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        (0..n)
            .map(|i| start + chrono::Duration::days(i as i64))
            .collect()
    }

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(100.0, 10), 10.0);
        assert_eq!(nice_step(370.0, 10), 50.0);
        assert_eq!(nice_step(7.0, 5), 2.0);
        assert_eq!(nice_step(0.0, 5), 1.0);
    }

    #[test]
    fn test_bins_cover_all_values() {
        let values: Vec<f64> = (80..450).step_by(7).map(|v| v as f64).collect();
        let bins = bin_values(&values, 10);

        assert!(!bins.is_empty());
        assert!(bins.len() <= 10);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert!(bins[0].start <= 80.0);
        assert!(bins[bins.len() - 1].end >= 443.0);
    }

    #[test]
    fn test_bins_single_value() {
        let bins = bin_values(&[5.0, 5.0, 5.0], 10);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn test_bins_empty() {
        assert!(bin_values(&[], 10).is_empty());
    }

    #[test]
    fn test_time_chart_marks() {
        let d = dates(5);
        let series = [
            Series::new("Visitors", COLOR_BRAND, Mark::Line { points: true }, vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            Series::new("Signups", COLOR_GREEN, Mark::Area { opacity: 0.25 }, vec![0.1; 5]).on_right_axis(),
        ];
        let svg = time_chart(&d, &series, 320.0, "Date", "Visitors");

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 5);
        assert!(svg.contains(r#"fill-opacity="0.25""#));
        assert!(svg.contains("Signups"));
    }

    #[test]
    fn test_bar_chart_has_one_rect_per_day() {
        let d = dates(7);
        let series = [Series::new("CTR %", COLOR_BLUE, Mark::Bar, vec![1.0; 7])];
        let svg = time_chart(&d, &series, 240.0, "", "CTR %");
        assert_eq!(svg.matches("<rect").count(), 7);
    }

    #[test]
    fn test_empty_chart() {
        let svg = time_chart(&[], &[], 200.0, "", "Empty");
        assert!(svg.contains("No data"));
    }

    #[test]
    fn test_scatter_tooltips() {
        let points = vec![ScatterPoint {
            x: 100.0,
            y: 10.0,
            tooltip: "2024-03-01 · <b>".to_string(),
        }];
        let svg = scatter(&points, 300.0, "visitors", "signups");
        assert!(svg.contains("<title>2024-03-01 · &lt;b&gt;</title>"));
    }
}
