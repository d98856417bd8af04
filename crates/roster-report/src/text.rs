//! Terminal rendering of the score histogram.

use roster_core::statistics::ScoreReport;

const BAR_WIDTH: usize = 40;

/// One row per score bin, scaled so the tallest bin is `BAR_WIDTH` wide.
///
/// Rows holding the median or the unique mode are annotated; the mean is
/// rarely an integer, so it only appears in the footer.
pub fn render_histogram(report: &ScoreReport) -> String {
    let histogram = &report.histogram;
    let summary = &report.summary;
    let max = histogram.max_count().max(1);

    let mut out = String::new();
    out.push_str("Score | Frequency\n");
    for (score, count) in histogram.bins() {
        let len = (count * BAR_WIDTH).div_ceil(max);
        let mut notes = Vec::new();
        if (summary.median - f64::from(score)).abs() < f64::EPSILON {
            notes.push("median");
        }
        if summary.mode.value() == Some(score) {
            notes.push("mode");
        }
        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!("  <- {}", notes.join(", "))
        };
        out.push_str(&format!("{score:>5} | {} ({count}){notes}\n", "#".repeat(len)));
    }
    out.push_str(&format!(
        "Mean: {:.2} | Median: {:.1} | Mode: {}\n",
        summary.mean, summary.median, summary.mode
    ));
    out
}
