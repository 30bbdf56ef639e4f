use std::fmt;

use crate::error::MetricError;
use crate::metrics::check_lengths;

/// Confusion matrix for classification.
///
/// Element `[i][j]` counts samples whose true class is `labels[i]` and whose
/// predicted class is `labels[j]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfusionMatrix {
    matrix: Vec<Vec<usize>>,
    labels: Vec<usize>,
}

impl ConfusionMatrix {
    /// Count predictions against the given class list. Pairs involving a label
    /// outside `labels` are ignored.
    pub fn from_predictions(y_true: &[usize], y_pred: &[usize], labels: Vec<usize>) -> Self {
        let n = labels.len();
        let mut matrix = vec![vec![0; n]; n];
        let index_of = |label: usize| labels.iter().position(|&l| l == label);

        for (&t, &p) in y_true.iter().zip(y_pred) {
            if let (Some(i), Some(j)) = (index_of(t), index_of(p)) {
                matrix[i][j] += 1;
            }
        }

        Self { matrix, labels }
    }

    pub fn matrix(&self) -> &Vec<Vec<usize>> {
        &self.matrix
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Count at `[true_index][predicted_index]`.
    pub fn get(&self, true_index: usize, predicted_index: usize) -> usize {
        self.matrix[true_index][predicted_index]
    }

    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// Number of true instances of the class at `index`.
    pub fn support(&self, index: usize) -> usize {
        self.matrix[index].iter().sum()
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.n_classes()).map(|i| self.matrix[i][i]).sum();
        correct as f64 / total as f64
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .matrix
            .iter()
            .flatten()
            .map(|c| c.to_string().len())
            .chain(self.labels.iter().map(|l| l.to_string().len()))
            .max()
            .unwrap_or(1)
            .max(4);

        writeln!(f, "Confusion Matrix (rows = true, cols = predicted):")?;
        write!(f, "{:>width$} ", "", width = width)?;
        for label in &self.labels {
            write!(f, " {:>width$}", label, width = width)?;
        }
        writeln!(f)?;
        for (label, row) in self.labels.iter().zip(&self.matrix) {
            write!(f, "{:>width$} ", label, width = width)?;
            for count in row {
                write!(f, " {:>width$}", count, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Confusion matrix over the sorted union of classes seen in either input.
pub fn confusion_matrix(y_true: &[usize], y_pred: &[usize]) -> Result<ConfusionMatrix, MetricError> {
    check_lengths(y_true.len(), y_pred.len())?;
    let mut labels: Vec<usize> = y_true.iter().chain(y_pred).copied().collect();
    labels.sort_unstable();
    labels.dedup();
    Ok(ConfusionMatrix::from_predictions(y_true, y_pred, labels))
}

/// Confusion matrix with an explicit class order (rows and columns follow `labels`).
pub fn confusion_matrix_with_labels(
    y_true: &[usize],
    y_pred: &[usize],
    labels: &[usize],
) -> Result<ConfusionMatrix, MetricError> {
    check_lengths(y_true.len(), y_pred.len())?;
    Ok(ConfusionMatrix::from_predictions(y_true, y_pred, labels.to_vec()))
}
