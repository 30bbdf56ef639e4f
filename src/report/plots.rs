use std::fs;
use std::path::PathBuf;

use plotly::common::{ColorScale, ColorScalePalette, DashType, Line, Mode};
use plotly::layout::{Axis, Layout};
use plotly::{HeatMap, Plot, Scatter};

use crate::error::ReportError;
use crate::metrics::{confusion_matrix, RocCurve};

/// Options for [`plot_confusion`].
#[derive(Debug, Clone)]
pub struct ConfusionPlot {
    /// Axis names for the classes, in sorted class order.
    pub labels: Option<Vec<String>>,
    /// Standalone HTML file to write the figure to.
    pub save_path: Option<PathBuf>,
    pub title: String,
    /// Open the figure in the default browser after saving.
    pub show: bool,
}

impl Default for ConfusionPlot {
    fn default() -> Self {
        Self {
            labels: None,
            save_path: None,
            title: "Confusion Matrix".to_string(),
            show: false,
        }
    }
}

impl ConfusionPlot {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn save_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = Some(path.into());
        self
    }
}

/// Plot the confusion matrix of `y_pred` against `y_true` as a heat map.
///
/// Rows are true classes (first class at the top) and columns are predicted
/// classes. The figure is written to `save_path` before it is shown.
/// `ConfusionPlot::default()` leaves `show` off; set it to open the figure
/// in the browser, or display the returned `Plot` yourself.
pub fn plot_confusion(y_true: &[usize], y_pred: &[usize], options: &ConfusionPlot) -> Result<Plot, ReportError> {
    let cm = confusion_matrix(y_true, y_pred)?;

    let names: Vec<String> = match &options.labels {
        Some(labels) if labels.len() != cm.n_classes() => {
            return Err(ReportError::LabelCount {
                expected: cm.n_classes(),
                given: labels.len(),
            })
        }
        Some(labels) => labels.clone(),
        None => cm.labels().iter().map(|l| l.to_string()).collect(),
    };

    // plotly draws the first y category at the bottom
    let y_names: Vec<String> = names.iter().rev().cloned().collect();
    let z: Vec<Vec<usize>> = cm.matrix().iter().rev().cloned().collect();

    let trace = HeatMap::new(names, y_names, z)
        .color_scale(ColorScale::Palette(ColorScalePalette::Blues))
        .name("count");

    let layout = Layout::new()
        .title(options.title.as_str())
        .x_axis(Axis::new().title("Predicted label"))
        .y_axis(Axis::new().title("True label"));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);

    if let Some(path) = &options.save_path {
        fs::write(path, plot.to_html()).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("Saved confusion matrix to {}", path.display());
    }
    if options.show {
        plot.show();
    }

    Ok(plot)
}

/// Overlay the ROC curves of several models with the chance diagonal.
pub fn plot_roc_curves(curves: &[(String, RocCurve)], title: &str) -> Plot {
    let mut plot = Plot::new();

    for (name, curve) in curves {
        let label = format!("{} (AUC = {:.3})", name, curve.auc);
        let trace = Scatter::new(curve.fpr(), curve.tpr())
            .mode(Mode::Lines)
            .name(&label);
        plot.add_trace(trace);
    }

    let chance = Scatter::new(vec![0.0, 1.0], vec![0.0, 1.0])
        .mode(Mode::Lines)
        .name("Chance")
        .line(Line::new().color("gray").dash(DashType::Dash));
    plot.add_trace(chance);

    plot.set_layout(
        Layout::new()
            .title(title)
            .x_axis(Axis::new().title("False positive rate"))
            .y_axis(Axis::new().title("True positive rate")),
    );
    plot
}
