pub mod menu;
pub mod people;
pub mod quiz;
pub mod scores;
pub mod stats;

use std::io::{self, BufRead, Write};

use anyhow::Result;

/// Print `label`, then read one line. `None` at end of input.
pub fn prompt(input: &mut dyn BufRead, label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
