use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// The capability the comparator needs from a model: fit on labeled
/// examples, predict one label per example, and predict a probability per
/// class per example.
///
/// Rows of `x` are examples and columns are features. Labels are class
/// identifiers; the comparator only feeds binary problems.
pub trait ClassifierModel {
    /// Fit the model, replacing any previous training state.
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, usize>) -> anyhow::Result<()>;

    /// Predict a class label per row of `x`.
    fn predict(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array1<usize>>;

    /// Predict class probabilities, shape `(n_examples, n_classes)`. Column
    /// `j` belongs to `classes()[j]` when the model reports its classes.
    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array2<f64>>;

    /// Class labels in probability-column order, once fitted. Models that do
    /// not track them return `None` and can only be scored positionally.
    fn classes(&self) -> Option<Vec<usize>> {
        None
    }

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}

impl<M: ClassifierModel + ?Sized> ClassifierModel for Box<M> {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, usize>) -> anyhow::Result<()> {
        (**self).fit(x, y)
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array1<usize>> {
        (**self).predict(x)
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array2<f64>> {
        (**self).predict_proba(x)
    }

    fn classes(&self) -> Option<Vec<usize>> {
        (**self).classes()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
