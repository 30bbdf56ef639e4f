use std::path::PathBuf;

use thiserror::Error;

/// Failure while fitting, predicting or scoring one model of a comparison.
///
/// Every variant names the registry entry that failed; the comparator does not
/// retry or mask the underlying error.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("failed to fit model '{model}': {source}")]
    Training {
        model: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("prediction failed for model '{model}': {source}")]
    Prediction {
        model: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("cannot score model '{model}': {source}")]
    Metric {
        model: String,
        #[source]
        source: MetricError,
    },
}

impl CompareError {
    /// Name of the model whose step failed.
    pub fn model(&self) -> &str {
        match self {
            CompareError::Training { model, .. }
            | CompareError::Prediction { model, .. }
            | CompareError::Metric { model, .. } => model,
        }
    }
}

/// Reasons a metric cannot be computed from the given labels and scores.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    #[error("cannot compute a metric on an empty set of examples")]
    EmptyInput,
    #[error("length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("labels must be binary, found {n_classes} distinct classes")]
    NotBinary { n_classes: usize },
    #[error("only one class ({class}) present in true labels; ROC AUC is undefined")]
    SingleClass { class: usize },
    #[error("score at index {index} is not finite")]
    NonFiniteScore { index: usize },
    #[error("probability output has {actual} columns, column {column} was requested")]
    ProbabilityShape { column: usize, actual: usize },
    #[error("positive class {label} is not among the available classes")]
    MissingPositiveClass { label: usize },
}

/// Errors raised while persisting or reading metric files.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid metrics json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write csv {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

/// Errors raised while building or writing plots and reports.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Metric(#[from] MetricError),
    #[error("{given} display labels given for {expected} classes")]
    LabelCount { expected: usize, given: usize },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
