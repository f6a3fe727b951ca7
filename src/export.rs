use log::info;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::error::Result;
use crate::history::History;

pub const CSV_FILENAME: &str = "savings_history.csv";
pub const JSON_FILENAME: &str = "savings_history.json";

/// Write the history as CSV, most recent first, followed by a total line.
pub fn write_csv(path: &Path, history: &History) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "Age,Old Yearly Cost,New Yearly Cost,Yearly Savings")?;
    for entry in history.entries() {
        writeln!(
            file,
            "{},{:.2},{:.2},{:.2}",
            entry.age(),
            entry.old_yearly_cost(),
            entry.new_yearly_cost(),
            entry.yearly_savings()
        )?;
    }

    if !history.is_empty() {
        writeln!(file)?;
        writeln!(file, "Total Yearly Savings,{:.2}", history.total_savings())?;
    }
    file.flush()?;

    info!("exported {} entries to {}", history.len(), path.display());
    Ok(())
}

/// Write the history as a pretty-printed JSON array.
pub fn write_json(path: &Path, history: &History) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, history.entries())?;
    info!("exported {} entries to {}", history.len(), path.display());
    Ok(())
}
