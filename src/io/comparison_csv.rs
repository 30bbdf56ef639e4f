use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::comparison::{ComparisonResult, ComparisonRow};
use crate::config::RankMetric;
use crate::error::PersistError;

#[derive(Serialize, Deserialize)]
struct CsvRow {
    model: String,
    accuracy: f64,
    auc: f64,
}

/// Write the ranked table as `model,accuracy,auc` rows.
pub fn write_comparison_csv(result: &ComparisonResult, path: impl AsRef<Path>) -> Result<(), PersistError> {
    let path = path.as_ref();
    let csv_err = |source: csv::Error| PersistError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    for row in result.rows() {
        writer
            .serialize(CsvRow {
                model: row.name.clone(),
                accuracy: row.accuracy,
                auc: row.auc,
            })
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Wrote {} comparison rows to {}", result.len(), path.display());
    Ok(())
}

/// Read a table written by [`write_comparison_csv`], re-ranked by `ranked_by`.
pub fn read_comparison_csv(path: impl AsRef<Path>, ranked_by: RankMetric) -> Result<ComparisonResult, PersistError> {
    let path = path.as_ref();
    let csv_err = |source: csv::Error| PersistError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let mut rows = Vec::new();
    for record in reader.deserialize::<CsvRow>() {
        let record = record.map_err(csv_err)?;
        rows.push(ComparisonRow {
            name: record.model,
            accuracy: record.accuracy,
            auc: record.auc,
        });
    }
    Ok(ComparisonResult::from_rows(rows, ranked_by))
}
