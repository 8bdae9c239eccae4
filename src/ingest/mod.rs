/// Ingest layer: loading raw daily streamflow series from disk.

pub mod daily;
