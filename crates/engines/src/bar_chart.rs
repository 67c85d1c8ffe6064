//! Static SVG bar chart for the portfolio's data section.
//!
//! Values are percentages: each bar is labelled `"{value}%"` and the y axis
//! is ticked every [`TICK_STEP`] units from zero up to the largest value.

use folio_core::{EngineError, Srgb};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::svg::{escape, num, open_svg};

pub const MAX_WIDTH: f64 = 800.0;
pub const HEIGHT: f64 = 400.0;
pub const TICK_STEP: f64 = 20.0;
/// Most y-axis ticks a chart may draw; larger values are rejected.
pub const MAX_TICKS: usize = 50;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 60.0;
const MARGIN_LEFT: f64 = 60.0;
/// Horizontal room the page reserves around the chart.
const CONTAINER_PADDING: f64 = 40.0;
const BAR_FILL_RATIO: f64 = 0.8;
const BAR_CORNER: f64 = 4.0;
const INK: &str = "#333";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: Srgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_y_label")]
    pub y_label: String,
    pub bars: Vec<Bar>,
}

fn default_title() -> String {
    "Desktop Popularity (%)".to_string()
}

fn default_y_label() -> String {
    "Popularity (%)".to_string()
}

impl Default for BarChart {
    fn default() -> Self {
        Self::desktop_share()
    }
}

impl BarChart {
    /// Worldwide desktop OS share, the chart shown on the page.
    pub fn desktop_share() -> Self {
        let bar = |label: &str, value: f64, hex: &str| Bar {
            label: label.to_string(),
            value,
            color: Srgb::from_hex(hex).unwrap_or(Srgb {
                r: 0.2,
                g: 0.2,
                b: 0.2,
            }),
        };
        Self {
            title: default_title(),
            y_label: default_y_label(),
            bars: vec![
                bar("Windows", 72.0, "#f7df1e"),
                bar("Unknown", 11.0, "#3776ab"),
                bar("OSX", 8.0, "#ed8b00"),
                bar("MacOS", 4.0, "#3178c6"),
                bar("Linux", 3.0, "#239120"),
                bar("Chrome OS", 2.0, "#777bb4"),
            ],
        }
    }

    /// Largest bar value after checking the data is drawable.
    fn validate(&self) -> Result<f64, EngineError> {
        if self.bars.is_empty() {
            return Err(EngineError::InvalidChart("no bars".into()));
        }
        let mut max = 0.0_f64;
        for bar in &self.bars {
            if !bar.value.is_finite() || bar.value < 0.0 {
                return Err(EngineError::InvalidChart(format!(
                    "bar {:?} has invalid value {}",
                    bar.label, bar.value
                )));
            }
            max = max.max(bar.value);
        }
        if max == 0.0 {
            return Err(EngineError::InvalidChart("all values are zero".into()));
        }
        if max / TICK_STEP >= MAX_TICKS as f64 {
            return Err(EngineError::InvalidChart(format!(
                "largest value {max} needs more than {MAX_TICKS} axis ticks"
            )));
        }
        Ok(max)
    }

    /// Renders the chart for a container of the given CSS width.
    pub fn render_svg(&self, container_width: f64) -> Result<String, EngineError> {
        let max = self.validate()?;
        if !container_width.is_finite() {
            return Err(EngineError::InvalidChart(format!(
                "container width {container_width}"
            )));
        }
        let width = MAX_WIDTH.min(container_width - CONTAINER_PADDING);
        let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
        let chart_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        if chart_width <= 0.0 {
            return Err(EngineError::InvalidChart(format!(
                "container width {container_width} leaves no room for bars"
            )));
        }

        let slot = chart_width / self.bars.len() as f64;
        let bar_width = slot * BAR_FILL_RATIO;
        let y_scale = chart_height / max;

        let mut out = String::new();
        open_svg(&mut out, width, HEIGHT);
        let _ = write!(
            out,
            r#"<text x="{}" y="25" text-anchor="middle" font-size="18" font-weight="bold" fill="{INK}">{}</text>"#,
            num(width / 2.0),
            escape(&self.title),
        );
        let _ = write!(
            out,
            r#"<g transform="translate({}, {})">"#,
            num(MARGIN_LEFT),
            num(MARGIN_TOP)
        );

        for (i, bar) in self.bars.iter().enumerate() {
            let bar_height = bar.value * y_scale;
            let x = i as f64 * slot + (slot - bar_width) / 2.0;
            let y = chart_height - bar_height;
            let mid = num(x + bar_width / 2.0);
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" rx="{c}" ry="{c}"/>"#,
                num(x),
                num(y),
                num(bar_width),
                num(bar_height),
                bar.color.to_hex(),
                c = num(BAR_CORNER),
            );
            let _ = write!(
                out,
                r#"<text x="{mid}" y="{}" text-anchor="middle" font-size="12" fill="{INK}">{}%</text>"#,
                num(y - 5.0),
                num(bar.value),
            );
            let _ = write!(
                out,
                r#"<text x="{mid}" y="{}" text-anchor="middle" font-size="12" fill="{INK}">{}</text>"#,
                num(chart_height + 20.0),
                escape(&bar.label),
            );
        }

        out.push_str("<g>");
        let _ = write!(
            out,
            r#"<line x1="0" y1="0" x2="0" y2="{}" stroke="{INK}" stroke-width="2"/>"#,
            num(chart_height)
        );
        let ticks = (max / TICK_STEP).floor() as usize + 1;
        for tick in (0..ticks).map(|i| i as f64 * TICK_STEP) {
            let y = chart_height - tick * y_scale;
            let _ = write!(
                out,
                r#"<line x1="-5" y1="{y}" x2="0" y2="{y}" stroke="{INK}" stroke-width="1"/><text x="-10" y="{}" text-anchor="end" font-size="12" fill="{INK}">{}%</text>"#,
                num(y + 4.0),
                num(tick),
                y = num(y),
            );
        }
        out.push_str("</g>");

        let _ = write!(
            out,
            r#"<text x="{}" y="-35" text-anchor="middle" font-size="14" fill="{INK}" transform="rotate(-90)">{}</text>"#,
            num(-chart_height / 2.0),
            escape(&self.y_label),
        );
        out.push_str("</g></svg>");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn default_data_matches_the_page() {
        let chart = BarChart::desktop_share();
        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Windows", "Unknown", "OSX", "MacOS", "Linux", "Chrome OS"]
        );
        assert_eq!(chart.bars[0].color.to_hex(), "#f7df1e");
        assert_eq!(chart.bars[5].value, 2.0);
    }

    #[test]
    fn wide_container_caps_at_800() {
        let svg = BarChart::default().render_svg(1400.0).unwrap();
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="400""#));
        assert!(svg.ends_with("</g></svg>"));
    }

    #[test]
    fn tallest_bar_fills_the_plot_area() {
        let svg = BarChart::default().render_svg(840.0).unwrap();
        // chart 700 x 300, six slots of 116.667, bars of 93.333
        assert!(
            svg.contains(r##"<rect x="11.667" y="0" width="93.333" height="300" fill="#f7df1e" rx="4" ry="4"/>"##),
            "{svg}"
        );
        assert!(svg.contains(r##"y="287.5" width="93.333" height="12.5" fill="#239120""##));
        assert!(svg.contains(">72%</text>"));
        assert!(svg.contains(">Chrome OS</text>"));
    }

    #[test]
    fn ticks_every_twenty_up_to_max() {
        let svg = BarChart::default().render_svg(840.0).unwrap();
        for label in ["0%", "20%", "40%", "60%"] {
            assert!(svg.contains(&format!(r##"text-anchor="end" font-size="12" fill="#333">{label}</text>"##)));
        }
        assert!(!svg.contains(">80%</text>"));
        assert_eq!(count(&svg, r#"x1="-5""#), 4);
    }

    #[test]
    fn one_rect_and_two_labels_per_bar() {
        let svg = BarChart::default().render_svg(700.0).unwrap();
        assert_eq!(count(&svg, "<rect "), 6);
        assert_eq!(count(&svg, r#"y="320""#), 6, "category labels sit 20 below the axis");
    }

    #[test]
    fn title_and_axis_label_are_escaped() {
        let mut chart = BarChart::default();
        chart.title = "A & B".into();
        chart.y_label = "<share>".into();
        let svg = chart.render_svg(840.0).unwrap();
        assert!(svg.contains(">A &amp; B</text>"));
        assert!(svg.contains(r#"transform="rotate(-90)">&lt;share&gt;</text>"#));
    }

    #[test]
    fn invalid_data_is_rejected() {
        let mut chart = BarChart::default();
        chart.bars.clear();
        assert!(matches!(chart.render_svg(840.0), Err(EngineError::InvalidChart(_))));

        let mut chart = BarChart::default();
        chart.bars[2].value = f64::NAN;
        assert!(chart.render_svg(840.0).is_err());

        let mut chart = BarChart::default();
        chart.bars[1].value = -1.0;
        assert!(chart.render_svg(840.0).is_err());

        let mut chart = BarChart::default();
        for bar in &mut chart.bars {
            bar.value = 0.0;
        }
        assert!(chart.render_svg(840.0).is_err());
    }

    #[test]
    fn huge_values_are_rejected_before_drawing_ticks() {
        for value in [2.0e6, 1.0e20, f64::MAX] {
            let mut chart = BarChart::default();
            chart.bars[0].value = value;
            assert!(
                matches!(chart.render_svg(840.0), Err(EngineError::InvalidChart(_))),
                "value {value}"
            );
        }
    }

    #[test]
    fn largest_drawable_value_hits_the_tick_limit() {
        let mut chart = BarChart::default();
        chart.bars[0].value = 980.0;
        let svg = chart.render_svg(840.0).unwrap();
        assert_eq!(count(&svg, r#"x1="-5""#), MAX_TICKS);
        assert!(svg.contains(">980%</text>"));
    }

    #[test]
    fn narrow_container_is_rejected() {
        assert!(matches!(
            BarChart::default().render_svg(130.0),
            Err(EngineError::InvalidChart(_))
        ));
    }

    #[test]
    fn deserializes_with_default_titles() {
        let chart: BarChart = serde_json::from_str(
            r##"{"bars": [{"label": "Rust", "value": 50, "color": "#dea584"}]}"##,
        )
        .unwrap();
        assert_eq!(chart.title, "Desktop Popularity (%)");
        let svg = chart.render_svg(840.0).unwrap();
        assert!(svg.contains(">50%</text>"));
    }

    #[test]
    fn bad_color_fails_to_deserialize() {
        let result: Result<BarChart, _> = serde_json::from_str(
            r#"{"bars": [{"label": "x", "value": 1, "color": "red"}]}"#,
        );
        assert!(result.is_err());
    }
}
