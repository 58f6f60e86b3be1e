use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{Dataset, LaunchRecord, OutcomeClass};
use crate::error::DashError;

pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_BOOSTER: &str = "Booster Version Category";
pub const COL_CLASS: &str = "class";

const REQUIRED_COLUMNS: [&str; 4] = [COL_SITE, COL_PAYLOAD, COL_BOOSTER, COL_CLASS];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the four required columns (extra columns ignored)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – columns with the same names
///
/// Every failure, from a missing file to a bad `class` value, is reported as
/// [`DashError::DataUnavailable`].
pub fn load_file(path: &Path) -> crate::error::Result<Dataset> {
    let dataset = read_records(path)
        .and_then(Dataset::from_records)
        .map_err(|e| DashError::DataUnavailable {
            path: path.to_path_buf(),
            reason: format!("{e:#}"),
        })?;

    log::info!(
        "Loaded {} launch records from {} ({} sites, payload {}..={} kg)",
        dataset.len(),
        path.display(),
        dataset.sites().len(),
        dataset.min_payload(),
        dataset.max_payload()
    );
    Ok(dataset)
}

fn read_records(path: &Path) -> Result<Vec<LaunchRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Row shape shared by the CSV and JSON readers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
    #[serde(rename = "class")]
    class: i64,
}

impl RawLaunchRow {
    fn into_record(self, row: usize) -> Result<LaunchRecord> {
        let outcome = OutcomeClass::try_from(self.class)
            .map_err(|msg| anyhow::anyhow!("Row {row}: {msg}"))?;
        Ok(LaunchRecord {
            site: self.site,
            payload_mass_kg: self.payload_mass_kg,
            booster_category: self.booster_category,
            outcome,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per row.
/// Only the required columns are read; the rest (flight number, orbit, ...)
/// are ignored.
fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!("CSV missing '{col}' column");
        }
    }

    reader
        .deserialize::<RawLaunchRow>()
        .enumerate()
        .map(|(row_no, result)| {
            result
                .with_context(|| format!("CSV row {row_no}"))?
                .into_record(row_no)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 525.0,
///     "Booster Version Category": "v1.0", "class": 0 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<RawLaunchRow> = serde_json::from_str(&text).context("parsing JSON")?;

    rows.into_iter()
        .enumerate()
        .map(|(i, raw)| raw.into_record(i))
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the launch columns.
///
/// The payload column may be any numeric type and `class` any signed or
/// unsigned integer type; both are cast with arrow's cast kernel, which
/// covers files written by both Pandas and Polars.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let site_col = column(&batch, COL_SITE)?;
        let booster_col = column(&batch, COL_BOOSTER)?;
        let payload_col =
            cast_column(&batch, COL_PAYLOAD, DataType::is_numeric, &DataType::Float64)?;
        let class_col =
            cast_column(&batch, COL_CLASS, DataType::is_integer, &DataType::Int64)?;
        let payload = payload_col.as_primitive::<Float64Type>();
        let class = class_col.as_primitive::<Int64Type>();

        for row in 0..batch.num_rows() {
            let n = records.len();
            if class.is_null(row) {
                bail!("Row {n}: null or out-of-range value in '{COL_CLASS}'");
            }
            let outcome = OutcomeClass::try_from(class.value(row))
                .map_err(|msg| anyhow::anyhow!("Row {n}: {msg}"))?;
            if payload.is_null(row) {
                bail!("Row {n}: null value in '{COL_PAYLOAD}'");
            }

            records.push(LaunchRecord {
                site: extract_text(site_col, row)
                    .with_context(|| format!("Row {n}: failed to read '{COL_SITE}'"))?,
                payload_mass_kg: payload.value(row),
                booster_category: extract_text(booster_col, row)
                    .with_context(|| format!("Row {n}: failed to read '{COL_BOOSTER}'"))?,
                outcome,
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

/// Cast column `name` to `target` after checking its type with `accepts`.
///
/// Text columns must fail the check: a safe cast turns unparsable text into nulls.
fn cast_column(
    batch: &RecordBatch,
    name: &str,
    accepts: fn(&DataType) -> bool,
    target: &DataType,
) -> Result<ArrayRef> {
    let col = column(batch, name)?;
    if !accepts(col.data_type()) {
        bail!("Column '{name}' has unsupported type {:?}", col.data_type());
    }
    cast(col, target).with_context(|| format!("casting '{name}' to {target:?}"))
}

fn extract_text(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in text column");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected Utf8 or LargeUtf8 column, got {other:?}"),
    }
}
