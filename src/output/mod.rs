/// Output layer: flood event table and JSON export.

pub mod table;
