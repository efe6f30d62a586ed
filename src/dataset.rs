//! Training data loading.
//!
//! The training file is CSV with a header row. Feature columns hold numeric
//! symptom indicators and the last usable column holds the disease label:
//! ```csv
//! itching,skin_rash,nodal_skin_eruptions,prognosis
//! 1,1,1,Fungal infection
//! 0,1,0,Allergy
//! ```
//!
//! Any column with a missing (empty) cell in any row is dropped entirely
//! before the label column is chosen. Rows are never dropped.
//!
//! Header names are trimmed. Label cells are kept exactly as written, so
//! `"Diabetes "` and `"Diabetes"` are different classes.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use ndarray::Array2;
use tracing::{debug, info};

use crate::error::{Result, SympredictError};

/// Labeled symptom rows ready for training.
#[derive(Debug, Clone)]
pub struct TrainingData {
    /// Raw feature column names, in file order.
    pub feature_names: Vec<String>,
    /// Feature matrix, one row per example.
    pub features: Array2<f64>,
    /// Label per row.
    pub labels: Vec<String>,
    /// Name of the label column.
    pub label_column: String,
    /// Columns removed because they contained missing values.
    pub dropped_columns: Vec<String>,
}

impl TrainingData {
    /// Load training data from a CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SympredictError::data_load(format!("cannot open {}: {e}", path.display()))
        })?;
        let data = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = data.n_rows(),
            features = data.n_features(),
            dropped = data.dropped_columns.len(),
            "loaded training data"
        );
        Ok(data)
    }

    /// Load training data from any CSV source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| SympredictError::data_load(format!("failed to read CSV header: {e}")))?
            .clone();
        if headers.is_empty() {
            return Err(SympredictError::data_load("CSV header is empty"));
        }

        let records = reader
            .records()
            .collect::<std::result::Result<Vec<StringRecord>, _>>()
            .map_err(|e| SympredictError::data_load(format!("malformed CSV row: {e}")))?;
        if records.is_empty() {
            return Err(SympredictError::data_load("CSV has a header but no data rows"));
        }

        let (kept, dropped) = partition_complete_columns(&headers, &records);
        if !dropped.is_empty() {
            debug!(columns = ?dropped, "dropping columns with missing values");
        }
        if kept.len() < 2 {
            return Err(SympredictError::data_load(format!(
                "need at least one feature column and a label column, found {} complete column(s)",
                kept.len()
            )));
        }

        let label_idx = kept[kept.len() - 1];
        let feature_idx = &kept[..kept.len() - 1];

        let mut features = Array2::<f64>::zeros((records.len(), feature_idx.len()));
        let mut labels = Vec::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            for (col, &source) in feature_idx.iter().enumerate() {
                let cell = &record[source];
                features[[row, col]] = cell.trim().parse::<f64>().map_err(|_| {
                    SympredictError::data_load(format!(
                        "row {}, column '{}': '{}' is not a number",
                        row + 2,
                        &headers[source],
                        cell
                    ))
                })?;
            }
            labels.push(record[label_idx].to_string());
        }

        Ok(Self {
            feature_names: feature_idx.iter().map(|&i| headers[i].to_string()).collect(),
            features,
            labels,
            label_column: headers[label_idx].to_string(),
            dropped_columns: dropped,
        })
    }

    /// Number of training rows.
    pub fn n_rows(&self) -> usize {
        self.features.nrows()
    }

    /// Number of feature columns.
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }
}

/// Split column positions into complete ones and the names of those with a
/// missing cell somewhere.
fn partition_complete_columns(
    headers: &StringRecord,
    records: &[StringRecord],
) -> (Vec<usize>, Vec<String>) {
    let mut kept = Vec::with_capacity(headers.len());
    let mut dropped = Vec::new();
    for (col, name) in headers.iter().enumerate() {
        let complete = records
            .iter()
            .all(|record| record.get(col).is_some_and(|cell| !cell.is_empty()));
        if complete {
            kept.push(col);
        } else {
            dropped.push(name.to_string());
        }
    }
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_basic_csv() {
        let csv = "itching,skin_rash,prognosis\n1,0,Fungal infection\n0,1,Allergy\n";
        let data = TrainingData::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(data.feature_names, vec!["itching", "skin_rash"]);
        assert_eq!(data.label_column, "prognosis");
        assert_eq!(data.labels, vec!["Fungal infection", "Allergy"]);
        assert_eq!(data.n_rows(), 2);
        assert_eq!(data.n_features(), 2);
        assert_eq!(data.features[[0, 0]], 1.0);
        assert_eq!(data.features[[1, 1]], 1.0);
        assert!(data.dropped_columns.is_empty());
    }

    #[test]
    fn test_columns_with_missing_values_are_dropped() {
        let csv = "itching,chills,skin_rash,prognosis,\n\
                   1,,0,Fungal infection,\n\
                   0,1,1,Allergy,\n";
        let data = TrainingData::from_reader(csv.as_bytes()).unwrap();

        // The trailing unnamed column is empty everywhere, so `prognosis`
        // becomes the label column and `chills` loses its place.
        assert_eq!(data.feature_names, vec!["itching", "skin_rash"]);
        assert_eq!(data.label_column, "prognosis");
        assert_eq!(data.dropped_columns, vec!["chills".to_string(), String::new()]);
        assert_eq!(data.n_rows(), 2);
    }

    #[test]
    fn test_labels_keep_surrounding_whitespace() {
        let csv = " itching , skin_rash ,prognosis\n 1,0,Diabetes \n0, 1 ,Hypertension \n1,1,Allergy\n";
        let data = TrainingData::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(data.feature_names, vec!["itching", "skin_rash"]);
        assert_eq!(data.labels, vec!["Diabetes ", "Hypertension ", "Allergy"]);
        assert_eq!(data.features[[0, 0]], 1.0);
        assert_eq!(data.features[[1, 1]], 1.0);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = TrainingData::from_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, SympredictError::DataLoad(_)));

        let err = TrainingData::from_reader("a,prognosis\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("no data rows"));
    }

    #[test]
    fn test_non_numeric_feature_is_rejected() {
        let csv = "itching,prognosis\nyes,Allergy\n";
        let err = TrainingData::from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'yes' is not a number"));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let csv = "itching,skin_rash,prognosis\n1,0\n";
        let err = TrainingData::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SympredictError::DataLoad(_)));
    }

    #[test]
    fn test_label_only_is_rejected() {
        let csv = "itching,prognosis\n,Allergy\n";
        let err = TrainingData::from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("complete column"));
    }
}
