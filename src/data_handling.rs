//! Train/test split shared by every model of a comparison.

use ndarray::{ArrayView1, ArrayView2};

use crate::error::MetricError;

/// Borrowed training and held-out data.
///
/// Rows of the feature matrices are examples. The split is never modified;
/// the same views are handed to every classifier.
#[derive(Debug, Clone, Copy)]
pub struct Split<'a> {
    pub x_train: ArrayView2<'a, f64>,
    pub x_test: ArrayView2<'a, f64>,
    pub y_train: ArrayView1<'a, usize>,
    pub y_test: ArrayView1<'a, usize>,
}

impl<'a> Split<'a> {
    /// Argument order follows the usual `(x_train, x_test, y_train, y_test)`.
    pub fn new(
        x_train: ArrayView2<'a, f64>,
        x_test: ArrayView2<'a, f64>,
        y_train: ArrayView1<'a, usize>,
        y_test: ArrayView1<'a, usize>,
    ) -> Self {
        Self {
            x_train,
            x_test,
            y_train,
            y_test,
        }
    }

    pub fn n_train(&self) -> usize {
        self.x_train.nrows()
    }

    pub fn n_test(&self) -> usize {
        self.x_test.nrows()
    }

    /// Training features and labels must describe the same examples.
    pub fn validate_train(&self) -> Result<(), MetricError> {
        if self.x_train.nrows() != self.y_train.len() {
            return Err(MetricError::LengthMismatch {
                expected: self.x_train.nrows(),
                actual: self.y_train.len(),
            });
        }
        Ok(())
    }

    /// Test features and labels must describe the same, non-empty set of examples.
    pub fn validate_test(&self) -> Result<(), MetricError> {
        if self.y_test.is_empty() {
            return Err(MetricError::EmptyInput);
        }
        if self.x_test.nrows() != self.y_test.len() {
            return Err(MetricError::LengthMismatch {
                expected: self.y_test.len(),
                actual: self.x_test.nrows(),
            });
        }
        Ok(())
    }

    /// Test labels as a contiguous vector.
    pub fn test_labels(&self) -> Vec<usize> {
        self.y_test.to_vec()
    }
}
