// src/mock.rs
use csv::StringRecord;
use tracing::{info, warn};

use crate::calendar::{
    CalendarFields, CalendarStamper, DailyCapacity, OUTPUT_CALENDAR_COLUMNS,
    SOURCE_CALENDAR_COLUMNS,
};
use crate::load::Table;

/// One generated row: fresh calendar values plus the untouched source columns.
#[derive(Debug, Clone, PartialEq)]
pub struct MockedRow {
    pub calendar: CalendarFields,
    pub copied: StringRecord,
}

impl MockedRow {
    /// Full text row in output column order.
    pub fn to_record(&self) -> StringRecord {
        let mut record = StringRecord::with_capacity(0, 5 + self.copied.len());
        for field in self.calendar.to_strings() {
            record.push_field(&field);
        }
        for field in &self.copied {
            record.push_field(field);
        }
        record
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockedRows {
    /// Names of the copied (non-calendar) columns, in source order.
    pub copied_headers: Vec<String>,
    pub rows: Vec<MockedRow>,
}

impl MockedRows {
    /// Output header: the dotted calendar names followed by the copied columns.
    pub fn headers(&self) -> Vec<String> {
        OUTPUT_CALENDAR_COLUMNS
            .iter()
            .map(|s| s.to_string())
            .chain(self.copied_headers.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Indices of every column that is not one of the source calendar columns.
pub fn copied_columns(headers: &[String]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !SOURCE_CALENDAR_COLUMNS.contains(&h.as_str()))
        .map(|(i, _)| i)
        .collect()
}

/// Replace the calendar columns of every sampled row with the next values
/// from `stamper`, in row order.
pub fn mock_rows<C: DailyCapacity>(sampled: Table, stamper: &mut CalendarStamper<C>) -> MockedRows {
    let keep = copied_columns(&sampled.headers);
    let copied_headers: Vec<String> = keep.iter().map(|&i| sampled.headers[i].clone()).collect();
    info!(columns = %copied_headers.join(", "), "copying columns");

    let rows: Vec<MockedRow> = sampled
        .rows
        .iter()
        .map(|src| {
            let copied: StringRecord = keep.iter().map(|&i| src.get(i).unwrap_or("")).collect();
            MockedRow {
                calendar: stamper.next_fields(),
                copied,
            }
        })
        .collect();

    MockedRows {
        copied_headers,
        rows,
    }
}

/// Warn when more rows were sampled than the quarter holds, which pushes dates
/// past its last day.
pub fn check_overflow(mocked: &MockedRows, last_day: chrono::NaiveDate) {
    if let Some(last) = mocked.rows.last() {
        if last.calendar.week_day > last_day {
            warn!(
                last = %last.calendar.week_day,
                quarter_end = %last_day,
                "sample overflowed the quarter; trailing rows are dated after it"
            );
        }
    }
}
