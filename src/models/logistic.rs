use anyhow::{anyhow, Context};
use linfa::prelude::*;
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::models::classifier_trait::ClassifierModel;

/// Hyper-parameters for [`LogisticClassifier`].
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogisticParams {
    pub alpha: f64,
    pub max_iterations: u64,
    pub fit_intercept: bool,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            max_iterations: 100,
            fit_intercept: true,
        }
    }
}

/// Binary logistic regression backed by `linfa-logistic`.
pub struct LogisticClassifier {
    model: Option<FittedLogisticRegression<f64, usize>>,
    params: LogisticParams,
}

impl LogisticClassifier {
    pub fn new(params: LogisticParams) -> Self {
        LogisticClassifier {
            model: None,
            params,
        }
    }

    fn fitted(&self) -> anyhow::Result<&FittedLogisticRegression<f64, usize>> {
        self.model
            .as_ref()
            .ok_or_else(|| anyhow!("logistic regression used before fit"))
    }
}

impl Default for LogisticClassifier {
    fn default() -> Self {
        Self::new(LogisticParams::default())
    }
}

impl ClassifierModel for LogisticClassifier {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, usize>) -> anyhow::Result<()> {
        log::debug!("Fitting logistic regression: rows={}, cols={}", x.nrows(), x.ncols());
        let dataset = Dataset::new(x.to_owned(), y.to_owned());
        let fitted = LogisticRegression::default()
            .alpha(self.params.alpha)
            .max_iterations(self.params.max_iterations)
            .with_intercept(self.params.fit_intercept)
            .fit(&dataset)
            .map_err(|e| anyhow!("{}", e))
            .context("logistic regression fit failed")?;
        self.model = Some(fitted);
        Ok(())
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array1<usize>> {
        Ok(self.fitted()?.predict(&x))
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array2<f64>> {
        let model = self.fitted()?;
        let positive = model.labels().pos.class;
        let p = model.predict_probabilities(&x);
        let classes = self.classes().unwrap_or_default();

        let mut proba = Array2::<f64>::zeros((x.nrows(), classes.len()));
        for (j, class) in classes.iter().enumerate() {
            let column = if *class == positive {
                p.clone()
            } else {
                p.mapv(|v| 1.0 - v)
            };
            proba.column_mut(j).assign(&column);
        }
        Ok(proba)
    }

    fn classes(&self) -> Option<Vec<usize>> {
        let labels = self.model.as_ref()?.labels();
        let mut classes = vec![labels.neg.class, labels.pos.class];
        classes.sort_unstable();
        Some(classes)
    }

    fn name(&self) -> &str {
        "logistic_regression"
    }
}
