//! File output: metric dumps and comparison tables.

pub mod comparison_csv;
pub mod metrics_json;

pub use comparison_csv::{read_comparison_csv, write_comparison_csv};
pub use metrics_json::{load_metrics, save_metrics};
