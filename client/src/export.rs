use anyhow::Result;
use std::io::Write;
use std::path::Path;

use crate::title_table::TitleRow;

const HEADERS: [&str; 6] = ["Title", "Category", "Cash", "Investment", "Current Value", "Gain/Loss"];

/// Write the title table as CSV; amounts are plain two-decimal numbers
pub fn write_title_table<W: Write>(rows: &[TitleRow], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;
    for row in rows {
        wtr.write_record([
            row.title.clone(),
            row.category.name().to_string(),
            format!("{:.2}", row.cash),
            format!("{:.2}", row.investment),
            format!("{:.2}", row.current_value),
            format!("{:.2}", row.gain_loss),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export to a file, returning the number of rows written
pub fn export_title_table(rows: &[TitleRow], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)?;
    write_title_table(rows, file)?;
    Ok(rows.len())
}
