//! CSV reader for RTKLIB-style positioning logs.
//!
//! Expected header: `Calendar, GPST, Q, x-ecef(m), y-ecef(m), z-ecef(m)`.
//! Extra columns are ignored. Each row's timestamp is validated and converted
//! to GPS time once, so downstream layers never re-parse time fields.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::SolutionRecord;
use crate::enuplot_errors::EnuplotError;
use crate::frames::Ecef;
use crate::time::CalendarTimestamp;

#[derive(Debug, Deserialize)]
struct RawSolutionRow {
    #[serde(rename = "Calendar")]
    calendar: String,

    #[serde(rename = "GPST")]
    gpst: String,

    #[serde(rename = "Q")]
    quality: u8,

    #[serde(rename = "x-ecef(m)")]
    x: f64,

    #[serde(rename = "y-ecef(m)")]
    y: f64,

    #[serde(rename = "z-ecef(m)")]
    z: f64,
}

/// Read a positioning log file into solution records.
///
/// Argument
/// --------
/// * `path`: path of the CSV file
///
/// Return
/// ------
/// * The records in file order, or an [`EnuplotError`] on I/O, CSV or
///   timestamp failure.
pub fn read_solution_file<P: AsRef<Path>>(path: P) -> Result<Vec<SolutionRecord>, EnuplotError> {
    read_solution_records(File::open(path)?)
}

/// Read positioning records from any CSV source.
///
/// Argument
/// --------
/// * `reader`: a CSV byte stream with the expected header row
///
/// Return
/// ------
/// * The records in input order, or an [`EnuplotError`] on CSV or timestamp
///   failure.
pub fn read_solution_records<R: Read>(reader: R) -> Result<Vec<SolutionRecord>, EnuplotError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<RawSolutionRow>() {
        let row = row?;
        let timestamp = CalendarTimestamp::parse(&row.calendar, &row.gpst)?;
        let gps = timestamp.to_gps();
        records.push(SolutionRecord {
            timestamp,
            gps,
            quality: row.quality,
            position: Ecef::new(row.x, row.y, row.z),
        });
    }
    Ok(records)
}
