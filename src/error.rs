use std::path::PathBuf;

use thiserror::Error;

use crate::model::PhaseKind;

/// Errors raised by the calendar timeline core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    #[error("invalid calendar range: start year {start} is after end year {end}")]
    InvalidRange { start: i32, end: i32 },

    #[error("year {0} is outside the supported calendar")]
    YearOutOfRange(i32),
}

/// Validation failures for a hack coming out of the editor form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HackError {
    #[error("Please enter a hack name.")]
    MissingName,

    #[error("{} end must be ≥ start.", .0.label())]
    PhaseEndsBeforeStart(PhaseKind),
}

/// Persistence and settings I/O failures. Callers log and swallow these.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no usable data directory on this platform")]
    NoDataDir,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode data: {0}")]
    Encode(#[from] serde_json::Error),
}
