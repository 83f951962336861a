// Common library for shared code across the scheduling core and its callers

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod telemetry;
