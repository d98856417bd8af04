//! The `roster stats` command.

use std::path::Path;

use anyhow::Result;

use roster_core::RegistryStore;

/// Print the summary and histogram, then write the chart to `chart_path`.
///
/// With no recorded scores nothing is computed and no file is written.
pub fn execute(store: &RegistryStore, chart_path: &Path) -> Result<()> {
    let Some(report) = store.compute_statistics() else {
        println!("No scores recorded; nothing to compute.");
        return Ok(());
    };
    println!("\nScore statistics ({} scores):", report.summary.count);
    print!("{}", report.to_text());
    println!();
    print!("{}", roster_report::text::render_histogram(&report));

    roster_report::write_histogram(&report, chart_path)?;
    println!("\nChart saved to {}", chart_path.display());
    Ok(())
}
