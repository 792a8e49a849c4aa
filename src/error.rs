use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or configuring a workup run.
#[derive(Debug, Error)]
pub enum WorkupError {
    #[error("input directory {0} does not exist or is not a directory")]
    MissingDirectory(PathBuf),

    #[error("{path}: column '{column}' not found (have {available:?})")]
    MissingColumn {
        path: PathBuf,
        column: String,
        available: Vec<String>,
    },

    #[error("{path}: file ends before the header row (expected {header_rows} preamble lines)")]
    TruncatedPreamble { path: PathBuf, header_rows: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why a linear fit could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FitError {
    #[error("fewer than 2 points selected ({0})")]
    InsufficientPoints(usize),

    #[error("all selected points share the same x value")]
    DegenerateX,
}

pub type Result<T> = std::result::Result<T, WorkupError>;
