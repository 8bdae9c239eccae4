/// Shared data types for the POT extraction pipeline.
///
/// The central decision here is that missing streamflow values are an
/// explicit `Option<f64>` on `DailyObservation`, not a sentinel number.
/// Raw series files encode "no data" as -9999; the ingest layer translates
/// that to `None` exactly once, so no downstream stage ever compares
/// against a magic number.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Daily observations
// ---------------------------------------------------------------------------

/// The "no data" code used in raw daily series files.
pub const MISSING_SENTINEL: f64 = -9999.0;

/// One day of streamflow record. `value` is `None` where the gauge
/// reported the missing-data sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl DailyObservation {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

// ---------------------------------------------------------------------------
// Stations
// ---------------------------------------------------------------------------

/// A gauge station identified by its composite numeric code,
/// `code = region * 100000 + sequence`.
///
/// The two parts are reported as separate columns (`regine`, `main`) in the
/// output table, so the decomposition lives here rather than in the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Station {
    pub region: u32,
    pub sequence: u32,
}

impl Station {
    /// Splits a composite station code into region and sequence parts.
    pub fn from_code(code: u64) -> Self {
        Self {
            region: (code / 100_000) as u32,
            sequence: (code % 100_000) as u32,
        }
    }

    /// Recomposes the composite numeric code.
    pub fn code(&self) -> u64 {
        u64::from(self.region) * 100_000 + u64::from(self.sequence)
    }
}

impl std::fmt::Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.region, self.sequence)
    }
}

// ---------------------------------------------------------------------------
// Pipeline records
// ---------------------------------------------------------------------------

/// A candidate flood peak: the maximum of one threshold-crossing cluster.
/// `index` is the position of the peak day in the station series, kept so
/// the flow-ratio stage can take the inter-peak minimum by slicing the
/// original series instead of searching by date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub date: NaiveDate,
    pub index: usize,
    pub value: f64,
}

/// A final independent flood event, ready for the output table.
#[derive(Debug, Clone, Serialize)]
pub struct FloodEvent {
    pub region: u32,
    pub sequence: u32,
    pub date: NaiveDate,
    pub value: f64,
    pub threshold: f64,
}

impl FloodEvent {
    pub fn new(station: Station, date: NaiveDate, value: f64, threshold: f64) -> Self {
        Self {
            region: station.region,
            sequence: station.sequence,
            date,
            value,
            threshold,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure modes of per-station POT extraction.
///
/// `NoDataForStation` and `InsufficientValidData` are expected conditions —
/// the batch driver logs them and moves on to the next station. Only
/// structurally invalid input (`MalformedInput`, `InvalidParameter`, I/O
/// failures) is a hard failure for a station's processing. Missing-data
/// clusters are not errors at all: they are dropped by the peak extractor
/// and surfaced as a count in the pipeline result.
#[derive(Debug, Error)]
pub enum PotError {
    #[error("no daily series found for station {station}")]
    NoDataForStation { station: String },

    #[error("no valid observations to estimate a threshold from")]
    InsufficientValidData,

    #[error("invalid parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("malformed input at line {line}: {message}")]
    MalformedInput { line: usize, message: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
