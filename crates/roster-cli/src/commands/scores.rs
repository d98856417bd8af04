//! The `roster scores` command.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use roster_core::statistics::MAX_SCORE;
use roster_core::RegistryStore;

pub fn show_history(store: &RegistryStore) {
    let Some(records) = store.list_scores() else {
        println!("No scores recorded yet.");
        return;
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Student", "Score"]);

    for (i, record) in records.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            record.student_name.clone(),
            format!("{}/{MAX_SCORE}", record.score),
        ]);
    }

    println!("\nScore history:");
    println!("{table}");
}
