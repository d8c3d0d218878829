use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while building task records or persisting the roadmap.
#[derive(Debug, Error)]
pub enum RoadmapError {
    /// A date string could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate { input: String },

    /// The end date lies before the start date.
    #[error("end date {end} is before start date {start}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    /// Buffers push the effective span outside the supported calendar.
    #[error("buffers of {buffer_before}/{buffer_after} days fall outside the calendar")]
    BufferOutOfRange { buffer_before: u32, buffer_after: u32 },

    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to (de)serialize {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not locate a data directory for this platform")]
    NoDataDir,
}

pub type Result<T, E = RoadmapError> = std::result::Result<T, E>;
