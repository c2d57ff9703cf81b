// src/write/columnar.rs
use anyhow::{Context, Result};
use arrow::{
    array::{
        ArrayRef, Date32Builder, Float64Builder, Int32Builder, Int64Builder, StringBuilder,
    },
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use chrono::Datelike;
use parquet::{
    arrow::ArrowWriter,
    basic::{BrotliLevel, Compression},
    file::properties::WriterProperties,
};
use std::{
    fs::{self, File},
    path::Path,
    sync::Arc,
};
use tracing::debug;

use crate::calendar::OUTPUT_CALENDAR_COLUMNS;
use crate::load::{infer_column_types, ColumnType};
use crate::mock::MockedRows;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn arrow_type(ty: ColumnType) -> DataType {
    match ty {
        ColumnType::Integer => DataType::Int64,
        ColumnType::Float => DataType::Float64,
        ColumnType::Text => DataType::Utf8,
    }
}

/// Arrow schema for the mocked rows: typed calendar columns, inferred types
/// for the copied ones.
pub fn output_schema(mocked: &MockedRows, copied_types: &[ColumnType]) -> Schema {
    let calendar_types = [
        DataType::Date32,
        DataType::Int32,
        DataType::Utf8,
        DataType::Utf8,
        DataType::Utf8,
    ];
    let mut fields: Vec<Field> = OUTPUT_CALENDAR_COLUMNS
        .iter()
        .zip(calendar_types)
        .map(|(name, ty)| Field::new(*name, ty, false))
        .collect();
    fields.extend(
        mocked
            .copied_headers
            .iter()
            .zip(copied_types)
            .map(|(name, ty)| Field::new(name, arrow_type(*ty), true)),
    );
    Schema::new(fields)
}

fn calendar_columns(mocked: &MockedRows) -> Vec<ArrayRef> {
    let n = mocked.len();
    let mut days = Date32Builder::with_capacity(n);
    let mut years = Int32Builder::with_capacity(n);
    let mut halves = StringBuilder::new();
    let mut quarters = StringBuilder::new();
    let mut weeks = StringBuilder::new();

    for row in &mocked.rows {
        let cal = &row.calendar;
        days.append_value(cal.week_day.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE);
        years.append_value(cal.calendar_year);
        halves.append_value(&cal.year_half);
        quarters.append_value(&cal.half_quarter);
        weeks.append_value(&cal.quarter_week);
    }

    vec![
        Arc::new(days.finish()),
        Arc::new(years.finish()),
        Arc::new(halves.finish()),
        Arc::new(quarters.finish()),
        Arc::new(weeks.finish()),
    ]
}

fn copied_column(mocked: &MockedRows, idx: usize, ty: ColumnType) -> ArrayRef {
    let values = mocked
        .rows
        .iter()
        .map(|r| r.copied.get(idx).map(str::trim).filter(|v| !v.is_empty()));

    match ty {
        ColumnType::Integer => {
            let mut b = Int64Builder::with_capacity(mocked.len());
            for v in values {
                b.append_option(v.and_then(|s| s.parse().ok()));
            }
            Arc::new(b.finish())
        }
        ColumnType::Float => {
            let mut b = Float64Builder::with_capacity(mocked.len());
            for v in values {
                b.append_option(v.and_then(|s| s.parse().ok()));
            }
            Arc::new(b.finish())
        }
        ColumnType::Text => {
            let mut b = StringBuilder::new();
            // text keeps the raw, untrimmed value
            for r in &mocked.rows {
                b.append_option(r.copied.get(idx).filter(|v| !v.is_empty()));
            }
            Arc::new(b.finish())
        }
    }
}

/// Convert the mocked rows into a single Arrow batch.
pub fn to_record_batch(mocked: &MockedRows) -> Result<RecordBatch> {
    let copied: Vec<_> = mocked.rows.iter().map(|r| r.copied.clone()).collect();
    let types = infer_column_types(mocked.copied_headers.len(), &copied);
    let schema = output_schema(mocked, &types);

    let mut columns = calendar_columns(mocked);
    for (idx, ty) in types.iter().enumerate() {
        columns.push(copied_column(mocked, idx, *ty));
    }

    RecordBatch::try_new(Arc::new(schema), columns).context("building record batch")
}

/// Write the mocked rows as one Brotli-compressed Parquet file. Returns the
/// file size in bytes.
pub fn write_parquet(path: &Path, mocked: &MockedRows) -> Result<u64> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    let batch = to_record_batch(mocked)?;
    debug!(schema = ?batch.schema(), "parquet schema");

    let file = File::create(path).with_context(|| format!("creating file {}", path.display()))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::BROTLI(BrotliLevel::try_new(5)?))
        .build();

    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), Some(props)).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch to parquet")?;
    writer.close().context("closing parquet writer")?;

    let metadata = fs::metadata(path).context("getting file metadata")?;
    Ok(metadata.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarStamper, Quarter, RecordsPerDay};
    use crate::load::read_table;
    use crate::mock::mock_rows;
    use arrow::array::{Array, Date32Array, Float64Array, Int64Array, StringArray};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use std::num::NonZeroU32;
    use tempfile::tempdir;

    fn mocked() -> MockedRows {
        let data = "\
Half.Quarter,Segment.Customer,Currency,Final Revenue
2017 Q2,12,USD,10.5
2017 Q1,7,,3
";
        let table = read_table(data.as_bytes(), b',').unwrap();
        let q = Quarter::new(2017, 4).unwrap();
        let mut stamper =
            CalendarStamper::new(&q, RecordsPerDay::Fixed(NonZeroU32::new(1).unwrap()));
        mock_rows(table, &mut stamper)
    }

    #[test]
    fn test_record_batch_types() -> Result<()> {
        let batch = to_record_batch(&mocked())?;
        let schema = batch.schema();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(schema.field(0).name(), "Week.Day");
        assert_eq!(schema.field(0).data_type(), &DataType::Date32);
        assert_eq!(schema.field(1).data_type(), &DataType::Int32);
        assert_eq!(schema.field(5).name(), "Segment_Customer");
        assert_eq!(schema.field(5).data_type(), &DataType::Int64);
        assert_eq!(schema.field(6).data_type(), &DataType::Utf8);
        assert_eq!(schema.field(7).data_type(), &DataType::Float64);

        let days = batch
            .column(0)
            .as_any()
            .downcast_ref::<Date32Array>()
            .unwrap();
        // 2017-10-01 and 2017-10-02 as days since the Unix epoch
        assert_eq!(days.value(0), 17440);
        assert_eq!(days.value(1), 17441);

        let segments = batch.column(5).as_any().downcast_ref::<Int64Array>().unwrap();
        assert_eq!(segments.value(1), 7);
        let currency = batch.column(6).as_any().downcast_ref::<StringArray>().unwrap();
        assert!(currency.is_null(1));
        let revenue = batch.column(7).as_any().downcast_ref::<Float64Array>().unwrap();
        assert_eq!(revenue.value(0), 10.5);
        Ok(())
    }

    #[test]
    fn test_write_parquet_roundtrip_rows() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("new_data.parquet");
        let bytes = write_parquet(&path, &mocked())?;
        assert!(bytes > 0);

        let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path)?)?.build()?;
        let rows: usize = reader.map(|b| b.map(|b| b.num_rows()).unwrap_or(0)).sum();
        assert_eq!(rows, 2);
        Ok(())
    }
}
