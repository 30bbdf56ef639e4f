use serde::Serialize;

use crate::error::MetricError;
use crate::metrics::{check_lengths, unique_labels};

/// A single point on the ROC curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocPoint {
    /// Scores at or above this value are predicted positive.
    pub threshold: f64,
    /// FP / (FP + TN)
    pub fpr: f64,
    /// TP / (TP + FN)
    pub tpr: f64,
}

/// ROC curve from (0, 0) to (1, 1) with its trapezoidal area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocCurve {
    pub points: Vec<RocPoint>,
    pub auc: f64,
    pub positive_label: usize,
}

impl RocCurve {
    pub fn fpr(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.fpr).collect()
    }

    pub fn tpr(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.tpr).collect()
    }
}

/// Compute the ROC curve of `scores` against binary `y_true`.
///
/// `positive_label` defaults to the larger of the two classes. Samples sharing
/// a score are added to the curve together, so ties contribute a diagonal
/// segment.
///
/// # Errors
///
/// Empty input, mismatched lengths, non-finite scores, labels with more than
/// two classes, a single class (AUC is undefined) or a positive label that is
/// not present.
pub fn roc_curve(
    y_true: &[usize],
    scores: &[f64],
    positive_label: Option<usize>,
) -> Result<RocCurve, MetricError> {
    check_lengths(y_true.len(), scores.len())?;
    if let Some(index) = scores.iter().position(|s| !s.is_finite()) {
        return Err(MetricError::NonFiniteScore { index });
    }

    let classes = unique_labels(y_true);
    match classes.len() {
        1 => return Err(MetricError::SingleClass { class: classes[0] }),
        2 => {}
        n_classes => return Err(MetricError::NotBinary { n_classes }),
    }
    let positive_label = match positive_label {
        Some(label) if classes.contains(&label) => label,
        Some(label) => return Err(MetricError::MissingPositiveClass { label }),
        None => classes[1],
    };

    let is_positive: Vec<bool> = y_true.iter().map(|&l| l == positive_label).collect();
    let total_pos = is_positive.iter().filter(|&&p| p).count() as f64;
    let total_neg = is_positive.len() as f64 - total_pos;

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut points = vec![RocPoint {
        threshold: f64::INFINITY,
        fpr: 0.0,
        tpr: 0.0,
    }];
    let (mut tp, mut fp) = (0usize, 0usize);
    let mut i = 0;
    while i < order.len() {
        let threshold = scores[order[i]];
        while i < order.len() && scores[order[i]] == threshold {
            if is_positive[order[i]] {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        points.push(RocPoint {
            threshold,
            fpr: fp as f64 / total_neg,
            tpr: tp as f64 / total_pos,
        });
    }

    let auc = points
        .windows(2)
        .map(|w| (w[1].fpr - w[0].fpr) * (w[1].tpr + w[0].tpr) / 2.0)
        .sum::<f64>()
        .clamp(0.0, 1.0);

    Ok(RocCurve {
        points,
        auc,
        positive_label,
    })
}

/// Area under the ROC curve. Shorthand for `roc_curve(..)?.auc`.
pub fn roc_auc_score(
    y_true: &[usize],
    scores: &[f64],
    positive_label: Option<usize>,
) -> Result<f64, MetricError> {
    Ok(roc_curve(y_true, scores, positive_label)?.auc)
}
