use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Default file name used by [`crate::io::save_metrics`].
pub const DEFAULT_METRICS_FILENAME: &str = "evaluation_metrics.json";
/// Default (relative) directory used by [`crate::io::save_metrics`].
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// How the comparator picks the positive-class probability for ROC AUC.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PositiveClass {
    /// Use a fixed column of `predict_proba`. The positive label is the
    /// largest class present in the test labels.
    Column(usize),
    /// Look the column up through `ClassifierModel::classes` and score
    /// against this label.
    Label(usize),
}

impl Default for PositiveClass {
    fn default() -> Self {
        PositiveClass::Column(1)
    }
}

impl FromStr for PositiveClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = s
            .split_once(':')
            .ok_or_else(|| format!("Invalid positive class: {}. Expected `column:<n>` or `label:<n>`", s))?;
        let value: usize = value
            .trim()
            .parse()
            .map_err(|e| format!("Invalid positive class index '{}': {}", value, e))?;
        match kind.trim().to_lowercase().as_str() {
            "column" => Ok(PositiveClass::Column(value)),
            "label" => Ok(PositiveClass::Label(value)),
            other => Err(format!(
                "Unknown positive class selector: {}. Valid options are: column, label",
                other
            )),
        }
    }
}

/// Metric a comparison table is ranked by (always descending).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    #[default]
    Auc,
    Accuracy,
}

impl RankMetric {
    pub fn name(&self) -> &'static str {
        match self {
            RankMetric::Auc => "auc",
            RankMetric::Accuracy => "accuracy",
        }
    }
}

impl FromStr for RankMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auc" | "roc_auc" => Ok(RankMetric::Auc),
            "accuracy" | "acc" => Ok(RankMetric::Accuracy),
            _ => Err(format!("Unknown rank metric: {}. Valid options are: auc, accuracy", s)),
        }
    }
}

/// Settings for a model comparison run.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CompareConfig {
    pub positive_class: PositiveClass,
    pub rank_by: RankMetric,
}

impl CompareConfig {
    pub fn new(positive_class: PositiveClass, rank_by: RankMetric) -> Self {
        Self {
            positive_class,
            rank_by,
        }
    }
}

/// Where [`crate::io::save_metrics`] writes its file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MetricsOutput {
    pub filename: String,
    pub output_dir: PathBuf,
}

impl MetricsOutput {
    pub fn new(filename: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Same file name, different directory.
    pub fn in_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn path(&self) -> PathBuf {
        self.output_dir.join(&self.filename)
    }
}

impl Default for MetricsOutput {
    fn default() -> Self {
        Self {
            filename: DEFAULT_METRICS_FILENAME.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}
