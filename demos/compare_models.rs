//! Compare a few simple classifiers on a synthetic two-cluster problem, then
//! write the metrics, a CSV table, a confusion matrix and an HTML report to
//! `outputs/`.
//!
//! Run with `CLASSIFIER_EVAL_LOG=debug cargo run --example compare_models`.

use anyhow::Result;
use log::LevelFilter;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use classifier_eval::io::{save_metrics, write_comparison_csv};
use classifier_eval::metrics::roc_curve;
use classifier_eval::report::{plot_confusion, plot_roc_curves, write_report, ConfusionPlot};
use classifier_eval::{compare, ClassifierModel, MetricsOutput, ModelRegistry, Split};

/// Scores examples by one feature, centred on the midpoint of the class means.
struct FeatureThreshold {
    feature: usize,
    cut: f64,
}

impl FeatureThreshold {
    fn new(feature: usize) -> Self {
        Self { feature, cut: 0.0 }
    }

    fn score(&self, v: f64) -> f64 {
        1.0 / (1.0 + (-(v - self.cut)).exp())
    }
}

impl ClassifierModel for FeatureThreshold {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, usize>) -> anyhow::Result<()> {
        let (mut sums, mut counts) = ([0.0; 2], [0usize; 2]);
        for (&v, &label) in x.column(self.feature).iter().zip(y.iter()) {
            anyhow::ensure!(label < 2, "label {} is not binary", label);
            sums[label] += v;
            counts[label] += 1;
        }
        anyhow::ensure!(counts[0] > 0 && counts[1] > 0, "training labels contain a single class");
        self.cut = (sums[0] / counts[0] as f64 + sums[1] / counts[1] as f64) / 2.0;
        Ok(())
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array1<usize>> {
        Ok(x.column(self.feature).mapv(|v| usize::from(v > self.cut)))
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array2<f64>> {
        let mut proba = Array2::zeros((x.nrows(), 2));
        for (i, &v) in x.column(self.feature).iter().enumerate() {
            let p = self.score(v);
            proba[[i, 0]] = 1.0 - p;
            proba[[i, 1]] = p;
        }
        Ok(proba)
    }

    fn classes(&self) -> Option<Vec<usize>> {
        Some(vec![0, 1])
    }

    fn name(&self) -> &str {
        "feature_threshold"
    }
}

/// Deterministic two-cluster data: feature 0 separates the classes, feature 1
/// overlaps them.
fn synthetic(n: usize, offset: f64) -> (Array2<f64>, Array1<usize>) {
    let mut data = Vec::with_capacity(n * 2);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let label = i % 2;
        let jitter = ((i as f64 + offset) * 0.37).sin();
        data.push(label as f64 * 2.0 + jitter * 0.8);
        data.push(jitter + label as f64 * 0.3);
        labels.push(label);
    }
    (
        Array2::from_shape_vec((n, 2), data).expect("shape matches data"),
        Array1::from_vec(labels),
    )
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("CLASSIFIER_EVAL_LOG", "error,classifier_eval=info"))
        .init();

    let (x_train, y_train) = synthetic(200, 0.0);
    let (x_test, y_test) = synthetic(80, 0.5);
    let split = Split::new(x_train.view(), x_test.view(), y_train.view(), y_test.view());

    let mut models = ModelRegistry::new()
        .with("overlapping_feature", FeatureThreshold::new(1))
        .with("separating_feature", FeatureThreshold::new(0));

    let result = compare(&mut models, &split)?;
    println!("{}", result);

    let output = MetricsOutput::default();
    save_metrics(&result.to_metrics(), &output)?;
    write_comparison_csv(&result, output.output_dir.join("comparison.csv"))?;

    let mut figures = Vec::new();
    let mut curves = Vec::new();
    for (name, model) in models.iter() {
        let y_pred = model.predict(x_test.view())?;
        let proba = model.predict_proba(x_test.view())?;
        curves.push((name.to_string(), roc_curve(&y_test.to_vec(), &proba.column(1).to_vec(), None)?));

        let options = ConfusionPlot::titled(format!("{}: confusion matrix", name))
            .labels(["negative", "positive"])
            .save_to(output.output_dir.join(format!("{}_confusion.html", name)));
        figures.push((name.to_string(), plot_confusion(&y_test.to_vec(), &y_pred.to_vec(), &options)?));
    }
    figures.push(("ROC curves".to_string(), plot_roc_curves(&curves, "ROC curves")));

    write_report(output.output_dir.join("report.html"), "Model comparison", &result, &figures)?;
    Ok(())
}
