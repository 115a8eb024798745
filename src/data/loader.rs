use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{DatasetError, LoadError};
use super::model::{CellValue, Dataset};
use super::reference::ReferenceTables;

type Row = BTreeMap<String, CellValue>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a season table.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row followed by one line per player/team
/// * `.json`    – `[{ "player": "...", "pos": "C", ... }, ...]`
/// * `.parquet` – flat columns of strings, integers and floats
///
/// The whole file is read eagerly; any error leaves nothing loaded.
pub fn load_file(path: &Path, reference: &ReferenceTables) -> Result<Dataset, DatasetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let (headers, rows) = match ext.as_str() {
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    };
    log::debug!("Read {} raw rows from {}", rows.len(), path.display());

    Dataset::from_rows(headers, rows, reference)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<(Vec<String>, Vec<Row>), LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(col, value)| (col.clone(), guess_cell_type(value)))
            .collect();
        rows.push(row);
    }

    Ok((headers, rows))
}

/// Per-cell type guess: integer, float, empty as null, otherwise text.
pub(crate) fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "player": "Quincy Acy", "pos": "SF", "age": 23, "bref_team_id": "TOR", ... },
///   ...
/// ]
/// ```
///
/// Column order is the key order of the records, first record first.
fn read_json(path: &Path) -> Result<(Vec<String>, Vec<Row>), LoadError> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected a top-level JSON array".into()))?;

    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;

        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        rows.push(
            obj.iter()
                .map(|(key, val)| (key.clone(), json_to_cell(val)))
                .collect(),
        );
    }

    Ok((headers, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table as written by `df.to_parquet()` or by the
/// bundled `generate_sample` binary.
fn read_parquet(path: &Path) -> Result<(Vec<String>, Vec<Row>), LoadError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let cells = headers
                .iter()
                .enumerate()
                .map(|(col_idx, col_name)| {
                    let value = extract_cell(batch.column(col_idx), row)?;
                    Ok((col_name.clone(), value))
                })
                .collect::<Result<Row, LoadError>>()?;
            rows.push(cells);
        }
    }

    Ok((headers, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue, LoadError> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let mismatch = || LoadError::Malformed(format!("unexpected Arrow array for {:?}", col.data_type()));
    let value = match col.data_type() {
        DataType::Utf8 => {
            let arr = col.as_any().downcast_ref::<StringArray>().ok_or_else(mismatch)?;
            CellValue::String(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().ok_or_else(mismatch)?;
            CellValue::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().ok_or_else(mismatch)?;
            CellValue::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().ok_or_else(mismatch)?;
            CellValue::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().ok_or_else(mismatch)?;
            CellValue::Float(arr.value(row))
        }
        other => {
            return Err(LoadError::Malformed(format!(
                "unsupported Parquet column type {other:?}"
            )))
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_cell_types() {
        assert_eq!(guess_cell_type("23"), CellValue::Integer(23));
        assert_eq!(guess_cell_type("0.468"), CellValue::Float(0.468));
        assert_eq!(guess_cell_type(""), CellValue::Null);
        assert_eq!(guess_cell_type("NaN"), CellValue::Null);
        assert_eq!(guess_cell_type("TOR"), CellValue::String("TOR".into()));
        assert_eq!(guess_cell_type("2013-2014"), CellValue::String("2013-2014".into()));
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("players.xlsx"), &ReferenceTables::new()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Load(LoadError::UnsupportedExtension(ref e)) if e == "xlsx"
        ));
    }

    #[test]
    fn missing_file_is_load_error() {
        let err = load_file(Path::new("/nonexistent/nba.csv"), &ReferenceTables::new()).unwrap_err();
        assert!(matches!(err, DatasetError::Load(_)));
    }

    #[test]
    fn json_numbers_keep_their_type() {
        assert_eq!(json_to_cell(&serde_json::json!(7)), CellValue::Integer(7));
        assert_eq!(json_to_cell(&serde_json::json!(0.5)), CellValue::Float(0.5));
        assert_eq!(json_to_cell(&serde_json::json!(null)), CellValue::Null);
    }
}
