//! Reporting and plotting helpers.
//!
//! Plots are small helper functions converting metrics into `plotly::Plot`;
//! `report` assembles a comparison table and figures into one HTML page.
pub mod plots;
pub mod report;

pub use plots::{plot_confusion, plot_roc_curves, ConfusionPlot};
pub use report::{render_report, write_report};
