//! Deterministic classifiers for exercising the comparator.
#![allow(dead_code)]

use anyhow::bail;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use classifier_eval::ClassifierModel;

/// Returns scripted predictions and positive-class probabilities, one per
/// test row, regardless of the features.
pub struct Scripted {
    pub predictions: Vec<usize>,
    pub positive: Vec<f64>,
}

impl Scripted {
    pub fn new(predictions: Vec<usize>, positive: Vec<f64>) -> Self {
        Self { predictions, positive }
    }

    /// Predicts label 1 whenever the score is above 0.5.
    pub fn from_scores(positive: Vec<f64>) -> Self {
        let predictions = positive.iter().map(|&s| usize::from(s > 0.5)).collect();
        Self { predictions, positive }
    }
}

impl ClassifierModel for Scripted {
    fn fit(&mut self, _x: ArrayView2<'_, f64>, _y: ArrayView1<'_, usize>) -> anyhow::Result<()> {
        Ok(())
    }

    fn predict(&self, _x: ArrayView2<'_, f64>) -> anyhow::Result<Array1<usize>> {
        Ok(Array1::from_vec(self.predictions.clone()))
    }

    fn predict_proba(&self, _x: ArrayView2<'_, f64>) -> anyhow::Result<Array2<f64>> {
        let mut proba = Array2::zeros((self.positive.len(), 2));
        for (i, &p) in self.positive.iter().enumerate() {
            proba[[i, 0]] = 1.0 - p;
            proba[[i, 1]] = p;
        }
        Ok(proba)
    }

    fn classes(&self) -> Option<Vec<usize>> {
        Some(vec![0, 1])
    }
}

/// Learns the midpoint between the class means of one feature and scores
/// rows by a logistic of the distance to it.
pub struct Threshold {
    pub feature: usize,
    pub cut: Option<f64>,
}

impl Threshold {
    pub fn new(feature: usize) -> Self {
        Self { feature, cut: None }
    }

    fn cut(&self) -> anyhow::Result<f64> {
        match self.cut {
            Some(cut) => Ok(cut),
            None => bail!("threshold model used before fit"),
        }
    }
}

impl ClassifierModel for Threshold {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, usize>) -> anyhow::Result<()> {
        if self.feature >= x.ncols() {
            bail!("feature {} out of range for {} columns", self.feature, x.ncols());
        }
        let column = x.column(self.feature);
        let mean_of = |class: usize| {
            let values: Vec<f64> = column
                .iter()
                .zip(y.iter())
                .filter(|(_, &l)| l == class)
                .map(|(&v, _)| v)
                .collect();
            values.iter().sum::<f64>() / values.len().max(1) as f64
        };
        self.cut = Some((mean_of(0) + mean_of(1)) / 2.0);
        Ok(())
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array1<usize>> {
        let cut = self.cut()?;
        Ok(x.column(self.feature).mapv(|v| usize::from(v > cut)))
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array2<f64>> {
        let cut = self.cut()?;
        let mut proba = Array2::zeros((x.nrows(), 2));
        for (i, &v) in x.column(self.feature).iter().enumerate() {
            let p = 1.0 / (1.0 + (-(v - cut)).exp());
            proba[[i, 0]] = 1.0 - p;
            proba[[i, 1]] = p;
        }
        Ok(proba)
    }

    fn name(&self) -> &str {
        "threshold"
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Fit,
    Predict,
    PredictProba,
}

/// Fails at the configured stage.
pub struct Failing(pub Stage);

impl ClassifierModel for Failing {
    fn fit(&mut self, _x: ArrayView2<'_, f64>, _y: ArrayView1<'_, usize>) -> anyhow::Result<()> {
        if self.0 == Stage::Fit {
            bail!("singular matrix");
        }
        Ok(())
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array1<usize>> {
        if self.0 == Stage::Predict {
            bail!("predict exploded");
        }
        Ok(Array1::zeros(x.nrows()))
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array2<f64>> {
        if self.0 == Stage::PredictProba {
            bail!("no probabilities");
        }
        Ok(Array2::from_elem((x.nrows(), 2), 0.5))
    }
}

/// Two well separated clusters on feature 0; feature 1 is noise-free but
/// uninformative. Returns `(x_train, x_test, y_train, y_test)`.
pub fn clusters() -> (Array2<f64>, Array2<f64>, Array1<usize>, Array1<usize>) {
    let x_train = Array2::from_shape_vec(
        (8, 2),
        vec![
            0.0, 1.0, 0.2, 0.0, 0.4, 1.0, 0.1, 0.0, //
            2.0, 1.0, 2.2, 0.0, 1.8, 1.0, 2.1, 0.0,
        ],
    )
    .expect("valid shape");
    let y_train = Array1::from_vec(vec![0, 0, 0, 0, 1, 1, 1, 1]);
    let x_test = Array2::from_shape_vec(
        (6, 2),
        vec![0.3, 0.0, 0.05, 1.0, 0.5, 0.0, 1.9, 1.0, 2.4, 0.0, 1.6, 1.0],
    )
    .expect("valid shape");
    let y_test = Array1::from_vec(vec![0, 0, 0, 1, 1, 1]);
    (x_train, x_test, y_train, y_test)
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
