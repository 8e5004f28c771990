//! # ENU displacement series
//!
//! Reduction of a set of [`SolutionRecord`]s to a regularly sampled
//! East-North-Up displacement series about the dataset mean position.
//!
//! The time axis is a fixed-step grid spanning the first to the last observed
//! second of week. Grid epochs with no record, and epochs whose solution is
//! not fixed, carry `None` instead of a displacement: gaps stay visible in
//! the series instead of being silently dropped or zeroed.

use std::collections::HashMap;

use nalgebra::Vector3;

use crate::constants::Seconds;
use crate::enuplot_errors::EnuplotError;
use crate::frames::{ecef_to_enu, ecef_to_geographic, Ecef, EnuDisplacement, Geographic};
use crate::records::SolutionRecord;

/// Default grid step of the displacement series, in seconds.
///
/// Matches the 30 s logging rate of the receiver files this tool is usually
/// fed with; pass another step to [`EnuSeries::build`] for other rates.
pub const DEFAULT_GRID_STEP: Seconds = 30.0;

/// Resolution of the epoch lookup, in grid keys per second.
///
/// Records are matched to grid epochs at millisecond resolution, so the
/// usual integer-second logs match exactly while float noise in the grid
/// arithmetic stays harmless.
const EPOCH_KEYS_PER_SECOND: f64 = 1_000.0;

/// A local East-North-Up reference frame: the ECEF origin together with its
/// geographic coordinate, which fixes the tangent-plane rotation.
#[derive(Debug, Clone)]
pub struct EnuFrame {
    pub origin: Ecef,
    pub origin_geographic: Geographic,
}

impl EnuFrame {
    /// Build a frame at an explicit ECEF origin.
    ///
    /// Argument
    /// --------
    /// * `origin`: ECEF coordinate of the frame origin, in meters
    ///
    /// Return
    /// ------
    /// * The frame, or the error of [`ecef_to_geographic`] if the origin has
    ///   no geographic image (non-finite, polar axis, no convergence).
    pub fn new(origin: Ecef) -> Result<EnuFrame, EnuplotError> {
        let origin_geographic = ecef_to_geographic(&origin)?;
        Ok(EnuFrame {
            origin,
            origin_geographic,
        })
    }

    /// Build the frame at the mean ECEF position of a record set.
    ///
    /// This is the reference every displacement of the series is measured
    /// against, so the series scatters around zero.
    pub fn from_records(records: &[SolutionRecord]) -> Result<EnuFrame, EnuplotError> {
        EnuFrame::new(mean_position(records)?)
    }

    /// East-North-Up displacement of `point` relative to this frame's origin.
    pub fn displacement(&self, point: &Ecef) -> EnuDisplacement {
        ecef_to_enu(point, &self.origin, &self.origin_geographic)
    }
}

/// Mean ECEF position of a record set.
///
/// Return
/// ------
/// * The component-wise mean, or [`EnuplotError::EmptyRecordSet`] for an
///   empty input.
pub fn mean_position(records: &[SolutionRecord]) -> Result<Ecef, EnuplotError> {
    if records.is_empty() {
        return Err(EnuplotError::EmptyRecordSet);
    }
    let sum = records
        .iter()
        .fold(Vector3::zeros(), |acc, record| {
            acc + record.position.as_vector()
        });
    Ok(Ecef::from(sum / records.len() as f64))
}

/// One epoch of the displacement series.
///
/// `displacement` is `None` when the epoch has no record in the source data
/// or when its solution quality is not fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnuEpoch {
    pub second_of_week: Seconds,
    pub displacement: Option<EnuDisplacement>,
}

/// A regularly sampled ENU displacement series.
#[derive(Debug, Clone)]
pub struct EnuSeries {
    pub frame: EnuFrame,
    pub step: Seconds,
    pub epochs: Vec<EnuEpoch>,
}

impl EnuSeries {
    /// Build the displacement series of a record set.
    ///
    /// The grid runs from the earliest to the latest observed second of week
    /// (both included) in steps of `step`. A grid epoch gets a displacement
    /// when a record exists at that second of week **and** its solution is
    /// fixed; otherwise the epoch carries `None`.
    ///
    /// Records are assumed to fall on the grid (fixed-rate logs); matching is
    /// done at millisecond resolution.
    ///
    /// Arguments
    /// ---------
    /// * `records`: the positioning records, in any order
    /// * `frame`: the ENU reference frame, typically [`EnuFrame::from_records`]
    /// * `step`: grid step in seconds, strictly positive
    ///
    /// Return
    /// ------
    /// * The series, or [`EnuplotError::EmptyRecordSet`] /
    ///   [`EnuplotError::InvalidGridStep`] on degenerate input.
    pub fn build(
        records: &[SolutionRecord],
        frame: &EnuFrame,
        step: Seconds,
    ) -> Result<EnuSeries, EnuplotError> {
        if records.is_empty() {
            return Err(EnuplotError::EmptyRecordSet);
        }
        if !(step > 0.0) {
            return Err(EnuplotError::InvalidGridStep(step));
        }

        let (start, end) = records.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), record| {
                let t = record.gps.second_of_week;
                (lo.min(t), hi.max(t))
            },
        );

        let by_epoch: HashMap<i64, &SolutionRecord> = records
            .iter()
            .map(|record| (epoch_key(record.gps.second_of_week), record))
            .collect();

        let steps = ((end - start) / step).floor() as usize;
        let mut epochs = Vec::with_capacity(steps + 1);
        for k in 0..=steps {
            let second_of_week = start + k as f64 * step;
            let displacement = by_epoch
                .get(&epoch_key(second_of_week))
                .filter(|record| record.is_fixed())
                .map(|record| frame.displacement(&record.position));
            epochs.push(EnuEpoch {
                second_of_week,
                displacement,
            });
        }

        Ok(EnuSeries {
            frame: frame.clone(),
            step,
            epochs,
        })
    }

    /// `(second_of_week, east)` pairs of the valid epochs.
    pub fn east_series(&self) -> Vec<(Seconds, f64)> {
        self.component_series(|d| d.east)
    }

    /// `(second_of_week, north)` pairs of the valid epochs.
    pub fn north_series(&self) -> Vec<(Seconds, f64)> {
        self.component_series(|d| d.north)
    }

    /// `(second_of_week, up)` pairs of the valid epochs.
    pub fn up_series(&self) -> Vec<(Seconds, f64)> {
        self.component_series(|d| d.up)
    }

    fn component_series(&self, component: impl Fn(&EnuDisplacement) -> f64) -> Vec<(Seconds, f64)> {
        self.epochs
            .iter()
            .filter_map(|epoch| {
                epoch
                    .displacement
                    .as_ref()
                    .map(|d| (epoch.second_of_week, component(d)))
            })
            .collect()
    }
}

fn epoch_key(second_of_week: Seconds) -> i64 {
    (second_of_week * EPOCH_KEYS_PER_SECOND).round() as i64
}
