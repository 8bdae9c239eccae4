//! POT Flood Event Extraction - Batch Driver
//!
//! For each station in the configured registry:
//! 1. Load its daily streamflow series (missing sentinel → None)
//! 2. Restrict the series to the configured calendar years
//! 3. Run the POT pipeline (threshold, crossings, peaks, declustering)
//! 4. Tag surviving peaks with station code and threshold
//!
//! All events are concatenated and written as a semicolon-delimited table
//! (`regine;main;date;flood;threshold`), optionally with a JSON export.
//!
//! Stations without data or without enough valid observations are logged
//! and skipped; malformed series files fail that station but not the run.
//!
//! Usage:
//!   flompot [--config PATH] [--output PATH] [--json PATH] [--jobs N]

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use threadpool::ThreadPool;

use flompot::config::{load_config, StationConfig};
use flompot::ingest::daily::{load_station_series, restrict_years};
use flompot::model::{FloodEvent, PotError};
use flompot::output::table;
use flompot::pot::{extract_independent_peaks, PotParams};

/// Per-station pipeline output, before concatenation.
struct StationReport {
    events: Vec<FloodEvent>,
    threshold: f64,
    invalid_clusters: usize,
}

fn main() {
    println!("🌊 POT Flood Event Extraction");
    println!("================================\n");

    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path = PathBuf::from("flompot.toml");
    let mut output_path = PathBuf::from("flood_events.txt");
    let mut json_path: Option<PathBuf> = None;
    let mut jobs: usize = 1;

    let mut i = 1;
    while i < args.len() {
        let take_value = |i: usize| -> String {
            args.get(i + 1).cloned().unwrap_or_else(|| {
                eprintln!("Error: {} requires a value", args[i]);
                eprintln!("Usage: {} [--config PATH] [--output PATH] [--json PATH] [--jobs N]", args[0]);
                std::process::exit(1);
            })
        };
        match args[i].as_str() {
            "--config" => {
                config_path = PathBuf::from(take_value(i));
                i += 2;
            }
            "--output" => {
                output_path = PathBuf::from(take_value(i));
                i += 2;
            }
            "--json" => {
                json_path = Some(PathBuf::from(take_value(i)));
                i += 2;
            }
            "--jobs" => {
                jobs = take_value(i).parse().unwrap_or_else(|_| {
                    eprintln!("Error: --jobs requires a positive integer");
                    std::process::exit(1);
                });
                i += 2;
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Usage: {} [--config PATH] [--output PATH] [--json PATH] [--jobs N]", args[0]);
                std::process::exit(1);
            }
        }
    }

    // Load run configuration
    println!("📋 Loading configuration from {}...", config_path.display());
    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ {e}\n");
            std::process::exit(1);
        }
    };
    let params = config.parameters.pot_params();
    if let Err(e) = params.validate() {
        eprintln!("\n❌ Invalid configuration: {e}\n");
        std::process::exit(1);
    }
    println!("✓ Loaded {} stations", config.stations.len());
    if config.parameters.years.is_empty() {
        println!("   Years: all available");
    } else {
        println!("   Years: {:?}", config.parameters.years);
    }
    println!(
        "   p = {}, separation = {} days, ratio = {}\n",
        params.p_threshold, params.min_separation_days, params.recession_ratio
    );

    // Run the per-station pipelines, optionally in parallel
    let outcomes = run_stations(&config.stations, &config.data.directory, &config.parameters.years, params, jobs);

    // Report per station, in registry order, and concatenate events
    let mut all_events: Vec<FloodEvent> = Vec::new();
    let mut processed = 0;
    let mut skipped = 0;
    let mut failed = 0;

    for (station, result) in &outcomes {
        let label = format!("{} ({})", station.station(), station.name);
        match result {
            Ok(report) => {
                println!(
                    "   ✓ {label} - {} events, threshold {:.1}",
                    report.events.len(),
                    report.threshold
                );
                if report.invalid_clusters > 0 {
                    println!(
                        "     ⚠ {} cluster(s) dropped due to missing data",
                        report.invalid_clusters
                    );
                }
                all_events.extend(report.events.iter().cloned());
                processed += 1;
            }
            Err(PotError::NoDataForStation { .. }) => {
                println!("   ⚠ {label} - no daily series found, skipped");
                skipped += 1;
            }
            Err(PotError::InsufficientValidData) => {
                println!("   ⚠ {label} - no valid observations, skipped");
                skipped += 1;
            }
            Err(e) => {
                eprintln!("   ✗ {label} - {e}");
                failed += 1;
            }
        }
    }

    // Persist the concatenated event table
    println!("\n📝 Writing {} events to {}...", all_events.len(), output_path.display());
    if let Err(e) = table::write_table_file(&output_path, &all_events) {
        eprintln!("\n❌ Failed to write event table: {e}\n");
        std::process::exit(1);
    }
    if let Some(path) = &json_path {
        if let Err(e) = table::write_json_file(path, &all_events) {
            eprintln!("\n❌ Failed to write JSON export: {e}\n");
            std::process::exit(1);
        }
        println!("   JSON export: {}", path.display());
    }

    println!("\n🎉 EXTRACTION COMPLETE");
    println!("================================");
    println!("Stations processed: {processed}");
    println!("Stations skipped:   {skipped}");
    println!("Stations failed:    {failed}");
    println!("Total flood events: {}", all_events.len());
}

/// Runs the pipeline for every station, preserving registry order in the
/// returned list. With `jobs > 1` stations are fanned out over a thread
/// pool — each station's pipeline is a pure function of its own series, so
/// this is safe without any shared state.
fn run_stations(
    stations: &[StationConfig],
    data_dir: &Path,
    years: &[i32],
    params: PotParams,
    jobs: usize,
) -> Vec<(StationConfig, Result<StationReport, PotError>)> {
    if jobs <= 1 || stations.len() <= 1 {
        return stations
            .iter()
            .map(|s| (s.clone(), process_station(data_dir, years, params, s)))
            .collect();
    }

    let pool = ThreadPool::new(jobs);
    let (tx, rx) = mpsc::channel();
    for (index, station) in stations.iter().enumerate() {
        let tx = tx.clone();
        let station = station.clone();
        let data_dir = data_dir.to_path_buf();
        let years = years.to_vec();
        pool.execute(move || {
            let result = process_station(&data_dir, &years, params, &station);
            // Receiver only disconnects if main panicked; nothing to do then
            let _ = tx.send((index, station, result));
        });
    }
    drop(tx);

    let mut outcomes: Vec<(usize, StationConfig, Result<StationReport, PotError>)> =
        rx.iter().collect();
    outcomes.sort_by_key(|(index, _, _)| *index);
    outcomes
        .into_iter()
        .map(|(_, station, result)| (station, result))
        .collect()
}

/// Loads one station's series and runs the POT pipeline on it.
fn process_station(
    data_dir: &Path,
    years: &[i32],
    params: PotParams,
    station_config: &StationConfig,
) -> Result<StationReport, PotError> {
    let station = station_config.station();
    let series = load_station_series(data_dir, station)?;
    let series = restrict_years(series, years);

    let result = extract_independent_peaks(&series, &params)?;
    let events = result
        .peaks
        .iter()
        .map(|peak| FloodEvent::new(station, peak.date, peak.value, result.threshold))
        .collect();

    Ok(StationReport {
        events,
        threshold: result.threshold,
        invalid_clusters: result.invalid_clusters,
    })
}
