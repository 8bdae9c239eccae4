/// Daily streamflow series parser.
///
/// Series files are plain text, one observation per line:
///
/// ```text
/// # ISO date, daily mean discharge (m3/s); -9999 marks missing data
/// 1995-05-30 412.0
/// 1995-05-31 -9999
/// 1995-06-01 389.5
/// ```
///
/// Lines starting with `#` and blank lines are skipped. The missing-data
/// sentinel is translated to `None` here, once — no later stage compares
/// against the raw code. Files are named `<region>.<sequence>.txt` inside
/// the configured data directory, matching the composite station code.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{Datelike, NaiveDate};

use crate::model::{DailyObservation, PotError, Station, MISSING_SENTINEL};

/// Loads the daily series for a station from `<data_dir>/<region>.<sequence>.txt`.
///
/// # Errors
///
/// - `NoDataForStation` if no series file exists for the station.
/// - `MalformedInput` for unparseable rows (see [`parse_daily_series`]).
pub fn load_station_series(
    data_dir: &Path,
    station: Station,
) -> Result<Vec<DailyObservation>, PotError> {
    let path = data_dir.join(format!("{station}.txt"));
    if !path.exists() {
        return Err(PotError::NoDataForStation {
            station: station.to_string(),
        });
    }
    let contents = fs::read_to_string(&path)?;
    parse_daily_series(&contents)
}

/// Parses series text into ordered daily observations.
///
/// # Errors
///
/// `MalformedInput` (with a 1-based line number) for rows that do not have
/// exactly a date and a value, dates that do not parse as `YYYY-MM-DD`,
/// non-numeric values, and rows out of ascending date order. A value is
/// never guessed: anything non-numeric that is not the missing sentinel is
/// a hard failure for the station.
pub fn parse_daily_series(text: &str) -> Result<Vec<DailyObservation>, PotError> {
    let mut series: Vec<DailyObservation> = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let malformed = |message: String| PotError::MalformedInput {
            line: number + 1,
            message,
        };

        let mut fields = line.split_whitespace();
        let (Some(date_field), Some(value_field), None) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed(format!(
                "expected 'date value', got '{line}'"
            )));
        };

        let date = NaiveDate::parse_from_str(date_field, "%Y-%m-%d")
            .map_err(|e| malformed(format!("invalid date '{date_field}': {e}")))?;

        let raw: f64 = value_field
            .parse()
            .map_err(|_| malformed(format!("non-numeric value '{value_field}'")))?;
        let value = if (raw - MISSING_SENTINEL).abs() < 1e-6 {
            None
        } else {
            Some(raw)
        };

        if let Some(previous) = series.last() {
            if date <= previous.date {
                return Err(malformed(format!(
                    "date {date} not after previous date {}",
                    previous.date
                )));
            }
        }
        series.push(DailyObservation::new(date, value));
    }

    Ok(series)
}

/// Restricts a series to the given calendar years. An empty year list means
/// "use every year present".
pub fn restrict_years(series: Vec<DailyObservation>, years: &[i32]) -> Vec<DailyObservation> {
    if years.is_empty() {
        return series;
    }
    let wanted: HashSet<i32> = years.iter().copied().collect();
    series
        .into_iter()
        .filter(|obs| wanted.contains(&obs.date.year()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
