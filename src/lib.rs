//! classifier-eval: helpers for evaluating binary classification models.
//!
//! The core is [`comparison::compare`], which fits every model of a
//! [`models::ModelRegistry`] on one training split, scores it on one held-out
//! split by accuracy and ROC AUC, and ranks the models by AUC. Around it sit
//! the metric implementations, confusion matrix rendering (plotly), metric
//! persistence to indented JSON and a small HTML report.
//!
//! Classifiers plug in through the [`models::ClassifierModel`] trait. A
//! `linfa-logistic` adapter is available behind the `linfa` feature.
pub mod comparison;
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod metrics;
pub mod models;
pub mod report;

pub use comparison::{compare, compare_isolated, compare_with, ComparisonResult, ComparisonRow, ModelOutcome};
pub use config::{CompareConfig, MetricsOutput, PositiveClass, RankMetric};
pub use data_handling::Split;
pub use error::{CompareError, MetricError, PersistError, ReportError};
pub use models::{ClassifierModel, ModelRegistry};
