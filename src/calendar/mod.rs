// src/calendar/mod.rs
//! Synthetic calendar fields for the generated quarter.
//!
//! A [`DateCursor`] hands out one date per output row, moving to the next day
//! once the day's capacity is used up. [`CalendarStamper`] wraps a cursor and
//! attaches the week label and the quarter's constant labels to each date.

pub mod cursor;
pub mod labels;
pub mod quarter;

pub use cursor::{DailyCapacity, DateCursor, PerDate, RecordsPerDay};
pub use labels::{CalendarFields, CalendarStamper, WeekLabeler, WeekLabels};
pub use quarter::Quarter;

/// Calendar columns as they appear in the input after header normalization.
pub const SOURCE_CALENDAR_COLUMNS: [&str; 5] = [
    "Week_Day",
    "Calendar_Year",
    "Year_Half",
    "Half_Quarter",
    "Quarter_Week",
];

/// Names of the generated calendar columns in the output.
pub const OUTPUT_CALENDAR_COLUMNS: [&str; 5] = [
    "Week.Day",
    "Calendar.Year",
    "Year.Half",
    "Half.Quarter",
    "Quarter.Week",
];

/// Column holding the quarter label used to exclude the previous quarter.
pub const QUARTER_COLUMN: &str = "Half_Quarter";

/// Date format for `Week.Day` in text output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
