use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Completion signal for one pipeline run, serializable for the JSON output
/// mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub files_loaded: usize,
    pub rows_loaded: usize,
    pub lines_written: usize,
    pub output_path: String,
    pub spec_used: SpecSnapshot,
}

/// Echo of the parameters the run actually used, for traceability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecSnapshot {
    pub input_files: Vec<String>,
    pub target_fields: Vec<String>,
    pub accepted_codes: Vec<String>,
}
