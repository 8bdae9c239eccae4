/// flompot: Peaks-Over-Threshold flood event extraction for daily
/// streamflow series, with the declustering criteria of Lang et al. (1999).
///
/// # Module structure
///
/// ```text
/// flompot
/// ├── model       — shared data types (DailyObservation, Station, FloodEvent, PotError)
/// ├── config      — run configuration loader (flompot.toml: parameters + station registry)
/// ├── ingest
/// │   └── daily   — daily series file parsing (sentinel → missing, year restriction)
/// ├── pot         — the extraction pipeline (extract_independent_peaks)
/// │   ├── threshold  — empirical quantile threshold (type-7)
/// │   ├── crossings  — up/down crossing detection, cluster intervals
/// │   ├── peaks      — per-cluster peak extraction, missing-data invalidation
/// │   └── decluster  — temporal and flow-ratio independence filters
/// └── output
///     └── table   — semicolon event table + JSON export
/// ```
///
/// The `pot` pipeline is pure and per-station; station iteration, file
/// loading, and persistence live in the batch driver (`main.rs`).

/// Public modules
pub mod config;
pub mod ingest;
pub mod model;
pub mod output;
pub mod pot;
