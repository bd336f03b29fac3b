use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use arrow::array::Array;
use arrow::error::ArrowError;
use arrow::util::display::array_value_to_string;
use csv::StringRecord;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::errors::ParquetError;
use thiserror::Error;

use super::model::{ALL_SITES_LABEL, CANONICAL_COLUMNS, LaunchDataset, LaunchRecord};

/// Why a dataset could not be loaded. Fatal for the dataset in question.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {source}")]
    Row { row: usize, source: csv::Error },
    #[error("reading parquet: {0}")]
    Parquet(#[from] ParquetError),
    #[error("reading arrow batch: {0}")]
    Arrow(#[from] ArrowError),
    #[error("row {row}: invalid payload mass {value}")]
    InvalidPayload { row: usize, value: f64 },
    #[error("row {row}: outcome class must be 0 or 1, found {value}")]
    InvalidClass { row: usize, value: u8 },
    #[error("row {row}: site name 'All Sites' is reserved")]
    ReservedSite { row: usize },
    #[error("dataset contains no launch records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – 14 columns, header row discarded
/// * `.parquet` – 14 fields of any printable type
///
/// Columns are mapped onto [`CANONICAL_COLUMNS`] by position; source header
/// names are ignored.
pub fn load_file(path: &Path) -> Result<LaunchDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let open = || {
        File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    let dataset = match ext.as_str() {
        "csv" => load_csv(open()?)?,
        "parquet" | "pq" => load_parquet(open()?)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} launches from {} ({} sites, payload {}..{} kg)",
        dataset.len(),
        path.display(),
        dataset.sites.len(),
        dataset.min_payload,
        dataset.max_payload
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV text whose first row is a header.
pub fn load_csv<R: Read>(source: R) -> Result<LaunchDataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    check_column_count(reader.headers()?.len())?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let raw = result.map_err(|source| LoadError::Row { row, source })?;
        records.push(parse_row(&raw, row)?);
    }

    finish(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the same 14 columns.
///
/// Every cell is rendered to text and fed through the CSV row parser, so a
/// column may be stored as string or numeric without changing the result.
fn load_parquet(file: File) -> Result<LaunchDataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    check_column_count(builder.schema().fields().len())?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for i in 0..batch.num_rows() {
            let row = records.len();
            let mut raw = StringRecord::with_capacity(0, CANONICAL_COLUMNS.len());
            for col in batch.columns() {
                if col.is_null(i) {
                    raw.push_field("");
                } else {
                    raw.push_field(array_value_to_string(col, i)?.trim());
                }
            }
            records.push(parse_row(&raw, row)?);
        }
    }

    finish(records)
}

// -- shared helpers --

fn check_column_count(found: usize) -> Result<(), LoadError> {
    if found != CANONICAL_COLUMNS.len() {
        return Err(LoadError::ColumnCount {
            expected: CANONICAL_COLUMNS.len(),
            found,
        });
    }
    Ok(())
}

fn parse_row(raw: &StringRecord, row: usize) -> Result<LaunchRecord, LoadError> {
    // Positional: no header is handed to serde.
    let rec: LaunchRecord = raw
        .deserialize(None)
        .map_err(|source| LoadError::Row { row, source })?;

    if !rec.payload_mass_kg.is_finite() || rec.payload_mass_kg < 0.0 {
        return Err(LoadError::InvalidPayload {
            row,
            value: rec.payload_mass_kg,
        });
    }
    if rec.class > 1 {
        return Err(LoadError::InvalidClass {
            row,
            value: rec.class,
        });
    }
    if rec.launch_site == ALL_SITES_LABEL {
        return Err(LoadError::ReservedSite { row });
    }
    Ok(rec)
}

fn finish(records: Vec<LaunchRecord>) -> Result<LaunchDataset, LoadError> {
    LaunchDataset::from_records(records).ok_or(LoadError::Empty)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str = "Flight Number,Date,Time (UTC),Booster Version,Launch Site,Payload,\
                          Payload Mass (kg),Orbit,Customer,Mission Outcome,Landing Outcome,\
                          class,Lat,Long\n";

    fn csv_with(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for r in rows {
            text.push_str(r);
            text.push('\n');
        }
        text
    }

    #[test]
    fn loads_rows_positionally_and_computes_bounds() {
        let text = csv_with(&[
            "1,2010-06-04,18:45:00,F9 v1.0  B0003,CCAFS LC-40,Dragon Qualification Unit,0,LEO,SpaceX,Success,Failure (parachute),0,28.562302,-80.577356",
            "2,2013-09-29,16:00:00,F9 v1.1  B1003,VAFB SLC-4E,CASSIOPE,500,Polar LEO,MDA,Success,Uncontrolled (ocean),0,34.632834,-120.610745",
            "3,2017-02-19,14:39:00,F9 FT B1031.1,KSC LC-39A,SpaceX CRS-10,2490,LEO (ISS),NASA (CRS),Success,Success (ground pad),1,28.573255,-80.646895",
        ]);

        let ds = load_csv(text.as_bytes()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[2].booster_version, "F9 FT B1031.1");
        assert_eq!(ds.records[2].launch_site, "KSC LC-39A");
        assert_eq!(ds.records[2].class, 1);
        assert_eq!(ds.records[1].payload_mass_kg, 500.0);
        assert_eq!(ds.min_payload, 0.0);
        assert_eq!(ds.max_payload, 2490.0);
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
    }

    #[test]
    fn quoted_fields_may_contain_commas() {
        let text = csv_with(&[
            "7,2014-04-18,19:25:00,F9 v1.1,CCAFS LC-40,SpaceX CRS-3,2296,LEO (ISS),NASA (CRS),Success,\"Controlled (ocean), legs\",1,28.56,-80.57",
        ]);
        let ds = load_csv(text.as_bytes()).unwrap();
        assert_eq!(ds.records[0].landing_outcome, "Controlled (ocean), legs");
    }

    #[test]
    fn rejects_wrong_column_count() {
        let text = "a,b,c\n1,2,3\n";
        match load_csv(text.as_bytes()) {
            Err(LoadError::ColumnCount { expected, found }) => {
                assert_eq!(expected, 14);
                assert_eq!(found, 3);
            }
            other => panic!("expected ColumnCount, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_row() {
        let text = csv_with(&[
            "1,2010-06-04,18:45:00,F9 v1.0,CCAFS LC-40,Dragon,heavy,LEO,SpaceX,Success,Failure,0,28.5,-80.5",
        ]);
        assert!(matches!(
            load_csv(text.as_bytes()),
            Err(LoadError::Row { row: 0, .. })
        ));
    }

    #[test]
    fn rejects_negative_payload_and_reserved_site() {
        let negative = csv_with(&[
            "1,2010-06-04,18:45:00,F9 v1.0,CCAFS LC-40,Dragon,-5,LEO,SpaceX,Success,Failure,0,28.5,-80.5",
        ]);
        assert!(matches!(
            load_csv(negative.as_bytes()),
            Err(LoadError::InvalidPayload { row: 0, .. })
        ));

        let reserved = csv_with(&[
            "1,2010-06-04,18:45:00,F9 v1.0,All Sites,Dragon,5,LEO,SpaceX,Success,Failure,0,28.5,-80.5",
        ]);
        assert!(matches!(
            load_csv(reserved.as_bytes()),
            Err(LoadError::ReservedSite { row: 0 })
        ));
    }

    #[test]
    fn rejects_non_binary_outcome_class() {
        let text = csv_with(&[
            "1,2010-06-04,18:45:00,F9 v1.0,CCAFS LC-40,Dragon,5,LEO,SpaceX,Success,Failure,0,28.5,-80.5",
            "2,2010-12-08,15:43:00,F9 v1.0,CCAFS LC-40,Dragon,5,LEO,SpaceX,Success,Failure,7,28.5,-80.5",
        ]);
        assert!(matches!(
            load_csv(text.as_bytes()),
            Err(LoadError::InvalidClass { row: 1, value: 7 })
        ));
    }

    #[test]
    fn rejects_header_only_source() {
        assert!(matches!(load_csv(HEADER.as_bytes()), Err(LoadError::Empty)));
    }

    #[test]
    fn load_file_reports_missing_and_unsupported_files() {
        assert!(matches!(
            load_file(Path::new("definitely/not/here.csv")),
            Err(LoadError::Io { .. })
        ));
        assert!(matches!(
            load_file(Path::new("launches.xlsx")),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    fn write_parquet_file(name: &str, columns: Vec<ArrayRef>) -> PathBuf {
        let fields: Vec<Field> = columns
            .iter()
            .enumerate()
            .map(|(i, col)| Field::new(format!("c{i}"), col.data_type().clone(), true))
            .collect();
        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let path = std::env::temp_dir().join(format!("{name}_{}.parquet", std::process::id()));
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        path
    }

    fn strings(values: &[Option<&str>]) -> ArrayRef {
        Arc::new(StringArray::from(values.to_vec()))
    }

    fn launch_columns() -> Vec<ArrayRef> {
        vec![
            Arc::new(Int64Array::from(vec![17, 44])),
            strings(&[Some("2015-06-28"), Some("2017-12-15")]),
            strings(&[Some("14:21:00"), Some("15:36:00")]),
            strings(&[Some("F9 v1.1 B1018"), Some("F9 FT B1035.2")]),
            strings(&[Some("CCAFS LC-40"), Some("CCAFS SLC-40")]),
            strings(&[Some("SpaceX CRS-7"), Some("SpaceX CRS-13")]),
            Arc::new(Float64Array::from(vec![1952.0, 15600.0])),
            strings(&[Some("LEO (ISS)"), Some("LEO (ISS)")]),
            strings(&[None, Some("NASA (CRS)")]),
            strings(&[Some("Failure (in flight)"), Some("Success")]),
            strings(&[Some("Precluded (drone ship)"), Some("Success (ground pad)")]),
            Arc::new(Int64Array::from(vec![0, 1])),
            Arc::new(Float64Array::from(vec![28.562302, 28.563197])),
            Arc::new(Float64Array::from(vec![-80.577356, -80.57682])),
        ]
    }

    #[test]
    fn loads_parquet_positionally() {
        let path = write_parquet_file("spacex_dash_launches", launch_columns());
        let loaded = load_file(&path);
        std::fs::remove_file(&path).unwrap();
        let ds = loaded.unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].flight_number, 17);
        assert_eq!(ds.records[0].customer, "");
        assert_eq!(ds.records[1].booster_version, "F9 FT B1035.2");
        assert_eq!(ds.records[1].class, 1);
        assert_eq!(ds.min_payload, 1952.0);
        assert_eq!(ds.max_payload, 15600.0);
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "CCAFS SLC-40"]);
    }

    #[test]
    fn rejects_parquet_with_missing_column() {
        let mut columns = launch_columns();
        columns.pop();
        let path = write_parquet_file("spacex_dash_short", columns);
        let loaded = load_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            loaded,
            Err(LoadError::ColumnCount {
                expected: 14,
                found: 13
            })
        ));
    }
}
