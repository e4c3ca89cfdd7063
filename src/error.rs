use thiserror::Error;

/// Error type for loading and analyzing wind observations.
#[derive(Debug, Error)]
pub enum WindError {
    /// Malformed input row (row numbers are 1-based, 0 for non-row input)
    #[error("invalid observation at row {row}: {reason}")]
    Validation { row: usize, reason: String },

    /// A statistic that needs at least one observation was requested on empty data
    #[error("dataset contains no observations")]
    EmptyDataset,

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader/writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// MessagePack serialization error
    #[error("failed to serialize results: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
}

impl WindError {
    pub(crate) fn validation(row: usize, reason: impl Into<String>) -> Self {
        Self::Validation {
            row,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WindError>;
