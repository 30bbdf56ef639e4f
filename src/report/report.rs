use std::fs;
use std::path::Path;

use maud::{html, Markup, PreEscaped, DOCTYPE};
use plotly::Plot;

use crate::comparison::ComparisonResult;
use crate::error::ReportError;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.12.1.min.js";

const STYLE: &str = "body { font-family: sans-serif; margin: 2em; } \
    table { border-collapse: collapse; } \
    th, td { border: 1px solid #ccc; padding: 4px 12px; text-align: right; } \
    td.model, th.model { text-align: left; } \
    p.generated { color: #666; }";

/// Standalone HTML page with the ranked comparison table followed by each
/// captioned figure.
pub fn render_report(title: &str, result: &ComparisonResult, figures: &[(String, Plot)]) -> Markup {
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
                script src=(PLOTLY_CDN) {}
                style { (PreEscaped(STYLE)) }
            }
            body {
                h1 { (title) }
                p.generated { "Generated " (generated) }
                @if result.is_empty() {
                    p { "No models were compared." }
                } @else {
                    table {
                        thead {
                            tr {
                                th { "Rank" }
                                th.model { "Model" }
                                th { "accuracy" }
                                th { "auc" }
                            }
                        }
                        tbody {
                            @for (i, row) in result.rows().iter().enumerate() {
                                tr {
                                    td { (i + 1) }
                                    td.model { (row.name) }
                                    td { (format!("{:.4}", row.accuracy)) }
                                    td { (format!("{:.4}", row.auc)) }
                                }
                            }
                        }
                    }
                }
                @for (i, (caption, plot)) in figures.iter().enumerate() {
                    @let div_id = format!("figure-{}", i);
                    section {
                        h2 { (caption) }
                        (PreEscaped(plot.to_inline_html(Some(div_id.as_str()))))
                    }
                }
            }
        }
    }
}

/// Render the report and write it to `path`, replacing any existing file.
pub fn write_report(
    path: impl AsRef<Path>,
    title: &str,
    result: &ComparisonResult,
    figures: &[(String, Plot)],
) -> Result<(), ReportError> {
    let path = path.as_ref();
    let markup = render_report(title, result, figures);
    fs::write(path, markup.into_string()).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Wrote comparison report to {}", path.display());
    Ok(())
}
