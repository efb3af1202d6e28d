use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{LaunchDataset, LaunchRecord};

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

/// One row as it appears in CSV / JSON, before validation.
/// Columns not named here are ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    class: f64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

impl RawRecord {
    fn validate(self, row: usize) -> Result<LaunchRecord> {
        Ok(LaunchRecord::from_raw(
            row,
            self.launch_site,
            self.payload_mass_kg,
            self.class,
            self.booster_version_category,
        )?)
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the four launch columns (others ignored)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in [COL_LAUNCH_SITE, COL_PAYLOAD_MASS, COL_CLASS, COL_BOOSTER_CATEGORY] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    reader
        .deserialize::<RawRecord>()
        .enumerate()
        .map(|(row, result)| {
            let raw = result.with_context(|| format!("CSV row {row}"))?;
            raw.validate(row)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let raw: Vec<RawRecord> = serde_json::from_str(&text).context("parsing JSON")?;

    raw.into_iter()
        .enumerate()
        .map(|(row, r)| r.validate(row))
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat launch columns.
///
/// Numeric columns may be any of Int32 / Int64 / Float32 / Float64, so files
/// written by both Pandas and Polars load unchanged.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let sites = column(&batch, COL_LAUNCH_SITE)?;
        let masses = column(&batch, COL_PAYLOAD_MASS)?;
        let classes = column(&batch, COL_CLASS)?;
        let boosters = column(&batch, COL_BOOSTER_CATEGORY)?;

        for i in 0..batch.num_rows() {
            let row = records.len();
            let rec = LaunchRecord::from_raw(
                row,
                string_at(sites, i).with_context(|| format!("Row {row}: '{COL_LAUNCH_SITE}'"))?,
                f64_at(masses, i).with_context(|| format!("Row {row}: '{COL_PAYLOAD_MASS}'"))?,
                f64_at(classes, i).with_context(|| format!("Row {row}: '{COL_CLASS}'"))?,
                string_at(boosters, i)
                    .with_context(|| format!("Row {row}: '{COL_BOOSTER_CATEGORY}'"))?,
            )?;
            records.push(rec);
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

/// Read a numeric cell as `f64`, whatever its physical type.
fn f64_at(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => downcast::<Float64Array>(any)?.value(row),
        DataType::Float32 => downcast::<Float32Array>(any)?.value(row) as f64,
        DataType::Int64 => downcast::<Int64Array>(any)?.value(row) as f64,
        DataType::Int32 => downcast::<Int32Array>(any)?.value(row) as f64,
        other => bail!("expected a numeric column, got {other:?}"),
    };
    Ok(value)
}

fn string_at(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Utf8 => downcast::<StringArray>(any)?.value(row).to_string(),
        DataType::LargeUtf8 => downcast::<LargeStringArray>(any)?.value(row).to_string(),
        other => bail!("expected a string column, got {other:?}"),
    };
    Ok(value)
}

fn downcast<T: 'static>(any: &dyn std::any::Any) -> Result<&T> {
    any.downcast_ref::<T>()
        .with_context(|| format!("expected {}", std::any::type_name::<T>()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::data::model::Outcome;

    const SAMPLE_CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
2,CCAFS LC-40,0,0.0,F9 v1.0  B0004,v1.0
6,VAFB SLC-4E,0,500.0,F9 v1.1  B1003,v1.1
26,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
";

    fn temp_with(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_csv_and_ignores_extra_columns() {
        let file = temp_with(".csv", SAMPLE_CSV);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 4);
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
        assert_eq!(ds.payload_bounds, Some((0.0, 2490.0)));
        assert_eq!(ds.records[3].outcome, Outcome::Success);
        assert_eq!(ds.records[3].booster_version_category, "FT");
    }

    #[test]
    fn csv_missing_column_is_an_error() {
        let file = temp_with(".csv", "Launch Site,class\nA,1\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Payload Mass (kg)"));
    }

    #[test]
    fn csv_invalid_class_reports_row() {
        let file = temp_with(
            ".csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\nA,1,10,FT\nA,2,10,FT\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("row 1: outcome flag 2"));
    }

    #[test]
    fn csv_non_numeric_payload_is_an_error() {
        let file = temp_with(
            ".csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\nA,1,heavy,FT\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"));
    }

    #[test]
    fn loads_json_records() {
        let file = temp_with(
            ".json",
            r#"[
                {"Launch Site": "A", "Payload Mass (kg)": 5000, "class": 1, "Booster Version Category": "FT"},
                {"Launch Site": "B", "Payload Mass (kg)": 320.5, "class": 0, "Booster Version Category": "v1.1", "Flight Number": 9}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.payload_bounds, Some((320.5, 5000.0)));
        assert_eq!(ds.records[1].outcome, Outcome::Failure);
    }

    #[test]
    fn loads_parquet_with_integer_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "B", "A"])),
                Arc::new(Float64Array::from(vec![100.0, 5000.0, 9600.0])),
                Arc::new(Int64Array::from(vec![1, 0, 1])),
                Arc::new(StringArray::from(vec!["FT", "B4", "FT"])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let sink = file.as_file().try_clone().unwrap();
        let mut writer = ArrowWriter::try_new(sink, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites, vec!["A", "B"]);
        assert_eq!(ds.booster_categories, vec!["FT", "B4"]);
        assert_eq!(ds.records[1].outcome, Outcome::Failure);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_file(Path::new("/nonexistent/spacex_launch_dash.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("loading /nonexistent/spacex_launch_dash.csv"));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let file = temp_with(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
