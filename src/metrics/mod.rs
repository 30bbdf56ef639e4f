//! Binary classification metrics used by the comparator and the reports.
//!
//! Labels are class identifiers (`usize`). Functions return
//! [`MetricError`](crate::error::MetricError) instead of panicking on
//! degenerate input so the comparator can surface the failure per model.
pub mod confusion;
pub mod roc;

pub use confusion::{confusion_matrix, confusion_matrix_with_labels, ConfusionMatrix};
pub use roc::{roc_auc_score, roc_curve, RocCurve, RocPoint};

use crate::error::MetricError;

/// Fraction of predictions equal to the true labels.
pub fn accuracy_score(y_true: &[usize], y_pred: &[usize]) -> Result<f64, MetricError> {
    check_lengths(y_true.len(), y_pred.len())?;
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Sorted distinct labels.
pub fn unique_labels(labels: &[usize]) -> Vec<usize> {
    let mut classes = labels.to_vec();
    classes.sort_unstable();
    classes.dedup();
    classes
}

pub(crate) fn check_lengths(expected: usize, actual: usize) -> Result<(), MetricError> {
    if expected == 0 {
        return Err(MetricError::EmptyInput);
    }
    if expected != actual {
        return Err(MetricError::LengthMismatch { expected, actual });
    }
    Ok(())
}
