//! Fit a set of classifiers on one training split, score them on one held-out
//! split, and rank them.
//!
//! Models are processed sequentially in registry order. Fitting mutates the
//! caller's classifiers; running a comparison again retrains them from
//! scratch with whatever state `fit` leaves behind.

use std::cmp::Ordering;
use std::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::config::{CompareConfig, PositiveClass, RankMetric};
use crate::data_handling::Split;
use crate::error::{CompareError, MetricError};
use crate::metrics::{accuracy_score, roc_auc_score, unique_labels};
use crate::models::{ClassifierModel, ModelRegistry};

/// Scores of one model on the held-out split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub name: String,
    pub accuracy: f64,
    pub auc: f64,
}

impl ComparisonRow {
    pub fn score(&self, metric: RankMetric) -> f64 {
        match metric {
            RankMetric::Auc => self.auc,
            RankMetric::Accuracy => self.accuracy,
        }
    }
}

/// Ranked comparison table: one row per model, sorted descending by
/// `ranked_by` (AUC unless configured otherwise). Rows with equal scores keep
/// registry order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonResult {
    rows: Vec<ComparisonRow>,
    ranked_by: RankMetric,
}

impl ComparisonResult {
    /// Build a table from unordered rows.
    pub fn from_rows(rows: Vec<ComparisonRow>, ranked_by: RankMetric) -> Self {
        let mut result = Self { rows, ranked_by };
        sort_rows(&mut result.rows, ranked_by);
        result
    }

    /// Keep the successful rows of an isolated comparison.
    pub fn from_outcomes(outcomes: &[ModelOutcome], ranked_by: RankMetric) -> Self {
        let rows = outcomes
            .iter()
            .filter_map(|o| o.outcome.as_ref().ok().cloned())
            .collect();
        Self::from_rows(rows, ranked_by)
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ComparisonRow> {
        self.rows
    }

    pub fn ranked_by(&self) -> RankMetric {
        self.ranked_by
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    /// Top-ranked model.
    pub fn best(&self) -> Option<&ComparisonRow> {
        self.rows.first()
    }

    /// Copy of the table re-ranked by another metric.
    pub fn sorted_by(&self, metric: RankMetric) -> Self {
        Self::from_rows(self.rows.clone(), metric)
    }

    /// `{model: {"accuracy": .., "auc": ..}}` in rank order, ready for
    /// [`crate::io::save_metrics`].
    pub fn to_metrics(&self) -> Value {
        let map: Map<String, Value> = self
            .rows
            .iter()
            .map(|r| (r.name.clone(), json!({ "accuracy": r.accuracy, "auc": r.auc })))
            .collect();
        Value::Object(map)
    }

    pub fn to_markdown(&self) -> String {
        let mut md = String::from("| Model | accuracy | auc |\n|-------|----------|-----|\n");
        for row in &self.rows {
            md.push_str(&format!("| {} | {:.4} | {:.4} |\n", row.name, row.accuracy, row.auc));
        }
        md
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "Comparison: (empty)");
        }
        let width = self.rows.iter().map(|r| r.name.len()).max().unwrap_or(5).max(5);
        writeln!(f, "{:<width$}  {:>10}  {:>10}", "Model", "accuracy", "auc", width = width)?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<width$}  {:>10.4}  {:>10.4}",
                row.name,
                row.accuracy,
                row.auc,
                width = width
            )?;
        }
        Ok(())
    }
}

/// Per-model result of [`compare_isolated`].
#[derive(Debug)]
pub struct ModelOutcome {
    pub name: String,
    pub outcome: Result<ComparisonRow, CompareError>,
}

impl ModelOutcome {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Fit, score and rank every model with the default configuration: the
/// second probability column is the positive class and rows are ranked by AUC.
///
/// The first failing model aborts the whole comparison.
pub fn compare(models: &mut ModelRegistry, split: &Split<'_>) -> Result<ComparisonResult, CompareError> {
    compare_with(models, split, &CompareConfig::default())
}

/// [`compare`] with an explicit [`CompareConfig`].
pub fn compare_with(
    models: &mut ModelRegistry,
    split: &Split<'_>,
    config: &CompareConfig,
) -> Result<ComparisonResult, CompareError> {
    let total = models.len();
    let mut rows = Vec::with_capacity(total);
    for (i, (name, model)) in models.iter_mut().enumerate() {
        log::info!("Evaluating model '{}' ({}/{})", name, i + 1, total);
        rows.push(evaluate_model(name, model, split, config.positive_class)?);
    }
    Ok(ComparisonResult::from_rows(rows, config.rank_by))
}

/// Like [`compare_with`], but a failing model does not stop the others.
///
/// Successful models come first, ranked; failed models follow in registry
/// order.
pub fn compare_isolated(
    models: &mut ModelRegistry,
    split: &Split<'_>,
    config: &CompareConfig,
) -> Vec<ModelOutcome> {
    let total = models.len();
    let mut outcomes: Vec<ModelOutcome> = models
        .iter_mut()
        .enumerate()
        .map(|(i, (name, model))| {
            log::info!("Evaluating model '{}' ({}/{})", name, i + 1, total);
            let outcome = evaluate_model(name, model, split, config.positive_class);
            if let Err(e) = &outcome {
                log::warn!("Skipping model '{}': {}", name, e);
            }
            ModelOutcome {
                name: name.to_string(),
                outcome,
            }
        })
        .collect();

    let metric = config.rank_by;
    outcomes.sort_by(|a, b| match (&a.outcome, &b.outcome) {
        (Ok(ra), Ok(rb)) => descending(ra.score(metric), rb.score(metric)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => Ordering::Equal,
    });
    outcomes
}

fn evaluate_model(
    name: &str,
    model: &mut dyn ClassifierModel,
    split: &Split<'_>,
    positive_class: PositiveClass,
) -> Result<ComparisonRow, CompareError> {
    let training = |source: anyhow::Error| CompareError::Training {
        model: name.to_string(),
        source,
    };
    let prediction = |source: anyhow::Error| CompareError::Prediction {
        model: name.to_string(),
        source,
    };
    let metric = |source: MetricError| CompareError::Metric {
        model: name.to_string(),
        source,
    };

    split
        .validate_train()
        .map_err(|e| training(anyhow::Error::new(e).context("training features and labels disagree")))?;
    model.fit(split.x_train, split.y_train).map_err(training)?;

    let y_pred = model.predict(split.x_test).map_err(prediction)?;
    let proba = model.predict_proba(split.x_test).map_err(prediction)?;

    split.validate_test().map_err(metric)?;
    let y_true = split.test_labels();
    let (scores, positive_label) = positive_scores(&proba, model, positive_class, &y_true).map_err(metric)?;

    let accuracy = accuracy_score(&y_true, &y_pred.to_vec()).map_err(metric)?;
    let auc = roc_auc_score(&y_true, &scores, positive_label).map_err(metric)?;
    log::debug!("Model '{}': accuracy={:.4}, auc={:.4}", name, accuracy, auc);

    Ok(ComparisonRow {
        name: name.to_string(),
        accuracy,
        auc,
    })
}

/// Positive-class probability column and the label it scores.
///
/// A positional column maps to the matching sorted test class when the
/// probability output has one column per class; otherwise the ROC code picks
/// the larger class.
fn positive_scores(
    proba: &Array2<f64>,
    model: &dyn ClassifierModel,
    positive_class: PositiveClass,
    y_true: &[usize],
) -> Result<(Vec<f64>, Option<usize>), MetricError> {
    let (column, label) = match positive_class {
        PositiveClass::Column(column) => {
            let classes = unique_labels(y_true);
            let label = if classes.len() == proba.ncols() {
                classes.get(column).copied()
            } else {
                None
            };
            (column, label)
        }
        PositiveClass::Label(label) => {
            let column = model
                .classes()
                .and_then(|classes| classes.iter().position(|&c| c == label))
                .ok_or(MetricError::MissingPositiveClass { label })?;
            (column, Some(label))
        }
    };

    if column >= proba.ncols() {
        return Err(MetricError::ProbabilityShape {
            column,
            actual: proba.ncols(),
        });
    }
    Ok((proba.column(column).to_vec(), label))
}

/// Higher scores first; NaN scores sink to the bottom.
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

fn sort_rows(rows: &mut [ComparisonRow], metric: RankMetric) {
    rows.sort_by(|a, b| descending(a.score(metric), b.score(metric)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, ArrayView1, ArrayView2};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Predicts a fixed score per test row; label 1 when the score is above 0.5.
    struct Fixed {
        scores: Vec<f64>,
        classes: Option<Vec<usize>>,
        fits: Rc<Cell<usize>>,
    }

    impl Fixed {
        fn new(scores: Vec<f64>) -> Self {
            Self {
                scores,
                classes: None,
                fits: Rc::new(Cell::new(0)),
            }
        }
    }

    impl ClassifierModel for Fixed {
        fn fit(&mut self, _x: ArrayView2<'_, f64>, _y: ArrayView1<'_, usize>) -> anyhow::Result<()> {
            self.fits.set(self.fits.get() + 1);
            Ok(())
        }

        fn predict(&self, _x: ArrayView2<'_, f64>) -> anyhow::Result<Array1<usize>> {
            Ok(self.scores.iter().map(|&s| usize::from(s > 0.5)).collect())
        }

        fn predict_proba(&self, _x: ArrayView2<'_, f64>) -> anyhow::Result<Array2<f64>> {
            let mut proba = Array2::zeros((self.scores.len(), 2));
            for (i, &s) in self.scores.iter().enumerate() {
                proba[[i, 0]] = 1.0 - s;
                proba[[i, 1]] = s;
            }
            Ok(proba)
        }

        fn classes(&self) -> Option<Vec<usize>> {
            self.classes.clone()
        }
    }

    fn fixture() -> (Array2<f64>, Array2<f64>, Array1<usize>, Array1<usize>) {
        let x_train = Array2::zeros((4, 1));
        let x_test = Array2::zeros((4, 1));
        (x_train, x_test, array![0, 1, 0, 1], array![0, 0, 1, 1])
    }

    #[test]
    fn label_lookup_uses_reported_classes() {
        let (x_train, x_test, y_train, y_test) = fixture();
        let split = Split::new(x_train.view(), x_test.view(), y_train.view(), y_test.view());

        // columns reported in reverse order: column 0 belongs to class 1
        let mut model = Fixed::new(vec![0.9, 0.8, 0.2, 0.1]);
        model.classes = Some(vec![1, 0]);
        let mut registry = ModelRegistry::new().with("reversed", model);

        let positional = compare(&mut registry, &split).unwrap();
        assert_eq!(positional.rows()[0].auc, 0.0);

        let config = CompareConfig::new(PositiveClass::Label(1), RankMetric::Auc);
        let by_label = compare_with(&mut registry, &split, &config).unwrap();
        assert_eq!(by_label.rows()[0].auc, 1.0);
    }

    #[test]
    fn label_lookup_without_classes_fails() {
        let (x_train, x_test, y_train, y_test) = fixture();
        let split = Split::new(x_train.view(), x_test.view(), y_train.view(), y_test.view());
        let mut registry = ModelRegistry::new().with("plain", Fixed::new(vec![0.1, 0.2, 0.8, 0.9]));

        let config = CompareConfig::new(PositiveClass::Label(1), RankMetric::Auc);
        let err = compare_with(&mut registry, &split, &config).unwrap_err();
        assert!(matches!(
            err,
            CompareError::Metric {
                source: MetricError::MissingPositiveClass { label: 1 },
                ..
            }
        ));
    }

    #[test]
    fn out_of_range_column_is_a_shape_error() {
        let (x_train, x_test, y_train, y_test) = fixture();
        let split = Split::new(x_train.view(), x_test.view(), y_train.view(), y_test.view());
        let mut registry = ModelRegistry::new().with("m", Fixed::new(vec![0.1, 0.2, 0.8, 0.9]));

        let config = CompareConfig::new(PositiveClass::Column(2), RankMetric::Auc);
        let err = compare_with(&mut registry, &split, &config).unwrap_err();
        assert_eq!(err.model(), "m");
        assert!(matches!(
            err,
            CompareError::Metric {
                source: MetricError::ProbabilityShape { column: 2, actual: 2 },
                ..
            }
        ));
    }

    #[test]
    fn first_column_scores_the_smaller_class() {
        let (x_train, x_test, y_train, y_test) = fixture();
        let split = Split::new(x_train.view(), x_test.view(), y_train.view(), y_test.view());
        let mut registry = ModelRegistry::new().with("m", Fixed::new(vec![0.1, 0.2, 0.8, 0.9]));

        let config = CompareConfig::new(PositiveClass::Column(0), RankMetric::Auc);
        let result = compare_with(&mut registry, &split, &config).unwrap();
        assert_eq!(result.rows()[0].auc, 1.0);
    }

    #[test]
    fn training_mismatch_is_reported_before_fit() {
        let x_train = Array2::zeros((3, 1));
        let (_, x_test, y_train, y_test) = fixture();
        let split = Split::new(x_train.view(), x_test.view(), y_train.view(), y_test.view());
        let mut registry = ModelRegistry::new().with("m", Fixed::new(vec![0.1, 0.2, 0.8, 0.9]));

        let err = compare(&mut registry, &split).unwrap_err();
        assert!(matches!(err, CompareError::Training { .. }));
    }

    #[test]
    fn rerunning_retrains_every_model() {
        let (x_train, x_test, y_train, y_test) = fixture();
        let split = Split::new(x_train.view(), x_test.view(), y_train.view(), y_test.view());
        let model = Fixed::new(vec![0.1, 0.2, 0.8, 0.9]);
        let fits = Rc::clone(&model.fits);
        let mut registry = ModelRegistry::new().with("m", model);

        let first = compare(&mut registry, &split).unwrap();
        let second = compare(&mut registry, &split).unwrap();
        assert_eq!(first, second);
        assert_eq!(fits.get(), 2);
    }

    #[test]
    fn ties_keep_registry_order() {
        let rows = vec![
            ComparisonRow { name: "a".into(), accuracy: 0.5, auc: 0.7 },
            ComparisonRow { name: "b".into(), accuracy: 0.9, auc: 0.8 },
            ComparisonRow { name: "c".into(), accuracy: 0.6, auc: 0.7 },
        ];
        let result = ComparisonResult::from_rows(rows, RankMetric::Auc);
        assert_eq!(result.names(), vec!["b", "a", "c"]);
        assert_eq!(result.sorted_by(RankMetric::Accuracy).names(), vec!["b", "c", "a"]);
    }

    #[test]
    fn metrics_map_follows_rank_order() {
        let rows = vec![
            ComparisonRow { name: "z".into(), accuracy: 0.5, auc: 0.6 },
            ComparisonRow { name: "a".into(), accuracy: 0.9, auc: 0.8 },
        ];
        let result = ComparisonResult::from_rows(rows, RankMetric::Auc);
        let metrics = result.to_metrics();
        let keys: Vec<&String> = metrics.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["a", "z"]);
        assert_eq!(metrics["a"]["auc"], json!(0.8));
        assert!(result.to_markdown().contains("| a | 0.9000 | 0.8000 |"));
        assert!(result.to_string().starts_with("Model"));
    }

    #[test]
    fn nan_scores_rank_last() {
        let rows: Vec<ComparisonRow> = (0..50)
            .map(|i| ComparisonRow {
                name: format!("m{}", i),
                accuracy: 0.5,
                auc: if i % 7 == 0 { f64::NAN } else { (i * 37 % 50) as f64 / 50.0 },
            })
            .collect();
        let result = ComparisonResult::from_rows(rows, RankMetric::Auc);
        let aucs: Vec<f64> = result.rows().iter().map(|r| r.auc).collect();
        let finite = aucs.iter().take_while(|a| !a.is_nan()).count();
        assert_eq!(finite, 42);
        assert!(aucs[finite..].iter().all(|a| a.is_nan()));
        assert!(aucs[..finite].windows(2).all(|w| w[0] >= w[1]));
    }
}
