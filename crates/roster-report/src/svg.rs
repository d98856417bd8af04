//! SVG histogram of quiz scores.
//!
//! One bar per score bin 0..=10, dashed vertical markers for mean, median,
//! and (when there is one) the unique mode, axis labels, a light grid, and
//! a legend. The output is a standalone SVG document.

use std::path::Path;

use anyhow::{Context, Result};

use roster_core::statistics::{ScoreReport, MAX_SCORE};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 70.0;

const BAR_COLOR: &str = "#4c72b0";
const MEAN_COLOR: &str = "blue";
const MEDIAN_COLOR: &str = "orange";
const MODE_COLOR: &str = "green";

/// Escape a string for safe insertion into SVG text.
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Maps score values and frequencies onto the plot area.
struct Plot {
    y_max: usize,
}

impl Plot {
    fn left(&self) -> f64 {
        MARGIN_LEFT
    }
    fn right(&self) -> f64 {
        WIDTH - MARGIN_RIGHT
    }
    fn top(&self) -> f64 {
        MARGIN_TOP
    }
    fn bottom(&self) -> f64 {
        HEIGHT - MARGIN_BOTTOM
    }

    /// Bins are centred on their score, so the domain is [-0.5, MAX + 0.5].
    fn x(&self, value: f64) -> f64 {
        let span = f64::from(MAX_SCORE) + 1.0;
        self.left() + (value + 0.5) / span * (self.right() - self.left())
    }

    fn bin_width(&self) -> f64 {
        (self.right() - self.left()) / (f64::from(MAX_SCORE) + 1.0)
    }

    fn y(&self, count: f64) -> f64 {
        self.bottom() - count / self.y_max as f64 * (self.bottom() - self.top())
    }
}

/// Integer y-axis tick step giving at most ten gridlines.
fn tick_step(max_count: usize) -> usize {
    max_count.div_ceil(10).max(1)
}

/// Render the score histogram as an SVG document.
pub fn render_histogram(report: &ScoreReport) -> String {
    let histogram = &report.histogram;
    let summary = &report.summary;
    let step = tick_step(histogram.max_count());
    let y_max = histogram.max_count().div_ceil(step).max(1) * step;
    let plot = Plot { y_max };

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg width=\"{WIDTH}\" height=\"{HEIGHT}\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" xmlns=\"http://www.w3.org/2000/svg\" font-family=\"sans-serif\">\n"
    ));
    svg.push_str(&format!(
        "  <desc>{} score(s), generated {}</desc>\n",
        summary.count,
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");

    // Title and axis labels
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-size=\"20\" text-anchor=\"middle\">Quiz Score Distribution</text>\n",
        WIDTH / 2.0,
        MARGIN_TOP / 2.0 + 6.0
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-size=\"14\" text-anchor=\"middle\">Score</text>\n",
        (plot.left() + plot.right()) / 2.0,
        HEIGHT - 20.0
    ));
    svg.push_str(&format!(
        "  <text x=\"20\" y=\"{y}\" font-size=\"14\" text-anchor=\"middle\" transform=\"rotate(-90 20 {y})\">Frequency</text>\n",
        y = (plot.top() + plot.bottom()) / 2.0
    ));

    // Grid and y ticks
    for tick in (0..=y_max).step_by(step) {
        let y = plot.y(tick as f64);
        svg.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{y:.1}\" x2=\"{}\" y2=\"{y:.1}\" stroke=\"#dddddd\" stroke-width=\"1\"/>\n",
            plot.left(),
            plot.right()
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{y:.1}\" font-size=\"12\" text-anchor=\"end\" dominant-baseline=\"middle\">{tick}</text>\n",
            plot.left() - 8.0
        ));
    }

    // Bars and x ticks
    let bar_width = plot.bin_width();
    for (score, count) in histogram.bins() {
        let center = plot.x(f64::from(score));
        if count > 0 {
            let top = plot.y(count as f64);
            svg.push_str(&format!(
                "  <rect x=\"{:.1}\" y=\"{top:.1}\" width=\"{bar_width:.1}\" height=\"{:.1}\" fill=\"{BAR_COLOR}\" fill-opacity=\"0.7\" stroke=\"black\"/>\n",
                center - bar_width / 2.0,
                plot.bottom() - top
            ));
        }
        svg.push_str(&format!(
            "  <text x=\"{center:.1}\" y=\"{}\" font-size=\"12\" text-anchor=\"middle\">{score}</text>\n",
            plot.bottom() + 18.0
        ));
    }

    // Axes
    svg.push_str(&format!(
        "  <line x1=\"{l}\" y1=\"{b}\" x2=\"{r}\" y2=\"{b}\" stroke=\"black\"/>\n",
        l = plot.left(),
        r = plot.right(),
        b = plot.bottom()
    ));
    svg.push_str(&format!(
        "  <line x1=\"{l}\" y1=\"{t}\" x2=\"{l}\" y2=\"{b}\" stroke=\"black\"/>\n",
        l = plot.left(),
        t = plot.top(),
        b = plot.bottom()
    ));

    // Markers
    let mut legend = vec![
        (MEAN_COLOR, format!("Mean: {:.2}", summary.mean), summary.mean),
        (MEDIAN_COLOR, format!("Median: {:.1}", summary.median), summary.median),
    ];
    if let Some(mode) = summary.mode.value() {
        legend.push((MODE_COLOR, format!("Mode: {mode}"), f64::from(mode)));
    }
    for (color, _, value) in &legend {
        let x = plot.x(*value);
        svg.push_str(&format!(
            "  <line class=\"marker\" x1=\"{x:.1}\" y1=\"{}\" x2=\"{x:.1}\" y2=\"{}\" stroke=\"{color}\" stroke-width=\"2\" stroke-dasharray=\"6 4\"/>\n",
            plot.top(),
            plot.bottom()
        ));
    }

    // Legend
    let legend_x = plot.right() - 170.0;
    let legend_y = plot.top() + 10.0;
    svg.push_str(&format!(
        "  <rect x=\"{legend_x}\" y=\"{legend_y}\" width=\"160\" height=\"{}\" fill=\"white\" fill-opacity=\"0.9\" stroke=\"#999999\" rx=\"4\"/>\n",
        legend.len() as f64 * 22.0 + 10.0
    ));
    for (i, (color, label, _)) in legend.iter().enumerate() {
        let y = legend_y + 18.0 + i as f64 * 22.0;
        svg.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{y}\" x2=\"{}\" y2=\"{y}\" stroke=\"{color}\" stroke-width=\"2\" stroke-dasharray=\"6 4\"/>\n",
            legend_x + 10.0,
            legend_x + 40.0
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{y}\" font-size=\"13\" dominant-baseline=\"middle\">{}</text>\n",
            legend_x + 48.0,
            xml_escape(label)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write the histogram to `path`, replacing any previous chart.
pub fn write_histogram(report: &ScoreReport, path: &Path) -> Result<()> {
    let svg = render_histogram(report);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, svg)
        .with_context(|| format!("failed to write chart to {}", path.display()))?;
    tracing::debug!("chart written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(scores: &[u32]) -> ScoreReport {
        ScoreReport::from_scores(scores).unwrap()
    }

    #[test]
    fn chart_contains_required_elements() {
        let svg = render_histogram(&report(&[2, 2, 2, 8, 8, 9]));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Quiz Score Distribution"));
        assert!(svg.contains(">Score</text>"));
        assert!(svg.contains(">Frequency</text>"));
        assert!(svg.contains("Mean: 5.17"));
        assert!(svg.contains("Median: 5.0"));
        assert!(svg.contains("Mode: 2"));
        assert_eq!(svg.matches("class=\"marker\"").count(), 3);
        assert_eq!(svg.matches("fill=\"#4c72b0\"").count(), 3);
    }

    #[test]
    fn one_element_per_line() {
        let svg = render_histogram(&report(&[0, 3, 3, 10]));
        assert!(svg.ends_with("</svg>\n"));
        for line in svg.lines() {
            let line = line.trim_start();
            assert!(line.starts_with('<') && line.ends_with('>'), "{line}");
        }
    }

    #[test]
    fn no_mode_marker_without_unique_mode() {
        let svg = render_histogram(&report(&[1, 2, 3]));
        assert_eq!(svg.matches("class=\"marker\"").count(), 2);
        assert!(!svg.contains("Mode:"));
    }

    #[test]
    fn every_bin_is_labelled() {
        let svg = render_histogram(&report(&[5]));
        for score in 0..=10 {
            assert!(svg.contains(&format!(">{score}</text>")), "missing tick {score}");
        }
    }

    #[test]
    fn tick_step_keeps_grid_small() {
        assert_eq!(tick_step(0), 1);
        assert_eq!(tick_step(7), 1);
        assert_eq!(tick_step(10), 1);
        assert_eq!(tick_step(11), 2);
        assert_eq!(tick_step(250), 25);
    }

    #[test]
    fn write_overwrites_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts").join("grafico_notas.svg");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "old").unwrap();

        write_histogram(&report(&[4, 6]), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<svg"));
    }
}
