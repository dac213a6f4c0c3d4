use thiserror::Error;

/// Failures raised by the analysis stages once a dataset is in memory.
///
/// I/O and CSV schema problems stay in `anyhow` land (see [`crate::data::loader`]);
/// these variants cover what can go wrong with the numbers themselves.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("dataset is empty after cleaning; no valid voltage samples to analyse")]
    EmptyDataset,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
