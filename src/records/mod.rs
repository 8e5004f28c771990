//! # Positioning solution records
//!
//! One [`SolutionRecord`] per receiver epoch: the civil timestamp, its GPS
//! time, the solution quality flag and the ECEF position. Records are
//! produced by the CSV reader in [`csv_reader`] and consumed by the series
//! builder in [`crate::series`].

pub mod csv_reader;

use crate::frames::Ecef;
use crate::time::{CalendarTimestamp, GpsTime};

/// Quality code of a fixed (carrier-ambiguity resolved) solution.
///
/// Epochs with any other code carry a degraded position and are masked out of
/// the displacement series.
pub const Q_FIXED: u8 = 5;

/// A single epoch of a positioning log.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionRecord {
    /// Civil timestamp of the epoch, as logged by the receiver.
    pub timestamp: CalendarTimestamp,

    /// GPS time of the epoch, derived once at ingestion.
    pub gps: GpsTime,

    /// Solution quality indicator ([`Q_FIXED`] = fixed).
    pub quality: u8,

    /// Receiver position in ECEF, meters.
    pub position: Ecef,
}

impl SolutionRecord {
    /// Whether this epoch carries a fixed (high-confidence) solution.
    pub fn is_fixed(&self) -> bool {
        self.quality == Q_FIXED
    }
}
