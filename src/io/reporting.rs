// src/io/reporting.rs

use crate::error::Result;
use crate::model::record_sheet::RecordSheet;
use crate::simulation::engine::HistoryRecord;
use crate::simulation::history::OrderHistory;
use log::info;
use serde::Serialize;
use std::path::Path;

/// Serializes rows into a CSV file with a header line.
fn write_rows<P, T>(file_path: P, rows: &[T]) -> Result<()>
where
    P: AsRef<Path>,
    T: Serialize,
{
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!("Exported {} rows to '{}'", rows.len(), path.display());
    Ok(())
}

/// Writes the per-role weekly simulation log to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/run_1.csv").
/// * `data` - The history records from the simulation engine.
pub fn write_simulation_log<P: AsRef<Path>>(file_path: P, data: &[HistoryRecord]) -> Result<()> {
    write_rows(file_path, data)
}

/// Writes the chain-wide order history, one row per week and one column per
/// node from Customer to Factory.
pub fn write_order_history<P: AsRef<Path>>(file_path: P, history: &OrderHistory) -> Result<()> {
    write_rows(file_path, &history.rows())
}

/// Writes a single role's record sheet.
pub fn write_record_sheet<P: AsRef<Path>>(file_path: P, sheet: &RecordSheet) -> Result<()> {
    write_rows(file_path, sheet.records())
}
