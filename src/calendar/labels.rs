// src/calendar/labels.rs
use chrono::{Datelike, NaiveDate};

use super::cursor::{DailyCapacity, DateCursor, RecordsPerDay};
use super::quarter::Quarter;
use super::DATE_FORMAT;

/// Formats `"<prefix><ISO week number>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekLabeler {
    prefix: String,
}

impl WeekLabeler {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn label(&self, date: NaiveDate) -> String {
        format!("{}{}", self.prefix, date.iso_week().week())
    }
}

/// A week-label generator driving its own cursor: each call consumes one
/// record slot and labels the date it lands on.
pub struct WeekLabels<C = RecordsPerDay> {
    cursor: DateCursor<C>,
    labeler: WeekLabeler,
}

impl<C: DailyCapacity> WeekLabels<C> {
    pub fn new(cursor: DateCursor<C>, labeler: WeekLabeler) -> Self {
        Self { cursor, labeler }
    }

    pub fn next_label(&mut self) -> String {
        let date = self.cursor.advance();
        self.labeler.label(date)
    }
}

/// The five generated calendar values for one output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarFields {
    pub week_day: NaiveDate,
    pub calendar_year: i32,
    pub year_half: String,
    pub half_quarter: String,
    pub quarter_week: String,
}

impl CalendarFields {
    /// Text form, in output column order.
    pub fn to_strings(&self) -> [String; 5] {
        [
            self.week_day.format(DATE_FORMAT).to_string(),
            self.calendar_year.to_string(),
            self.year_half.clone(),
            self.half_quarter.clone(),
            self.quarter_week.clone(),
        ]
    }
}

/// Produces [`CalendarFields`] for consecutive output rows of one quarter.
pub struct CalendarStamper<C = RecordsPerDay> {
    cursor: DateCursor<C>,
    weeks: WeekLabeler,
    year: i32,
    half: String,
    quarter: String,
}

impl<C: DailyCapacity> CalendarStamper<C> {
    pub fn new(quarter: &Quarter, capacity: C) -> Self {
        Self {
            cursor: DateCursor::new(quarter.start_date(), capacity),
            weeks: WeekLabeler::new(quarter.week_prefix()),
            year: quarter.year(),
            half: quarter.half_label(),
            quarter: quarter.label(),
        }
    }

    pub fn next_fields(&mut self) -> CalendarFields {
        let week_day = self.cursor.advance();
        CalendarFields {
            week_day,
            calendar_year: self.year,
            year_half: self.half.clone(),
            half_quarter: self.quarter.clone(),
            quarter_week: self.weeks.label(week_day),
        }
    }
}
