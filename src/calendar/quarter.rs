// src/calendar/quarter.rs
use chrono::NaiveDate;

use crate::error::ConfigError;

/// A calendar quarter, e.g. `2017 Q4` (2017-10-01 ..= 2017-12-31).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quarter {
    year: i32,
    quarter: u32,
    start: NaiveDate,
    end: NaiveDate,
}

impl Quarter {
    pub fn new(year: i32, quarter: u32) -> Result<Self, ConfigError> {
        if !(1..=4).contains(&quarter) {
            return Err(ConfigError::InvalidQuarter(quarter));
        }
        let start = NaiveDate::from_ymd_opt(year, 3 * (quarter - 1) + 1, 1)
            .ok_or(ConfigError::InvalidYear(year))?;
        let next_start = if quarter == 4 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, 3 * quarter + 1, 1)
        };
        let end = next_start
            .and_then(|d| d.pred_opt())
            .ok_or(ConfigError::InvalidYear(year))?;
        Ok(Self {
            year,
            quarter,
            start,
            end,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end
    }

    pub fn num_days(&self) -> u32 {
        (self.end - self.start).num_days() as u32 + 1
    }

    /// `"2017 Q4"`
    pub fn label(&self) -> String {
        format!("{} Q{}", self.year, self.quarter)
    }

    /// `"2017 HY2"`
    pub fn half_label(&self) -> String {
        let half = if self.quarter <= 2 { 1 } else { 2 };
        format!("{} HY{}", self.year, half)
    }

    /// Prefix for `Quarter.Week` labels, e.g. `"2017 Week "`.
    pub fn week_prefix(&self) -> String {
        format!("{} Week ", self.year)
    }

    /// The quarter before this one, wrapping Q1 into the previous year's Q4.
    pub fn previous(&self) -> Result<Self, ConfigError> {
        if self.quarter == 1 {
            Self::new(self.year - 1, 4)
        } else {
            Self::new(self.year, self.quarter - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_q4_2017() {
        let q = Quarter::new(2017, 4).unwrap();
        assert_eq!(q.start_date(), NaiveDate::from_ymd_opt(2017, 10, 1).unwrap());
        assert_eq!(q.end_date(), NaiveDate::from_ymd_opt(2017, 12, 31).unwrap());
        assert_eq!(q.num_days(), 92);
        assert_eq!(q.label(), "2017 Q4");
        assert_eq!(q.half_label(), "2017 HY2");
        assert_eq!(q.week_prefix(), "2017 Week ");
        assert_eq!(q.previous().unwrap().label(), "2017 Q3");
    }

    #[test]
    fn test_leap_year_q1() {
        let q = Quarter::new(2020, 1).unwrap();
        assert_eq!(q.num_days(), 91);
        assert_eq!(q.half_label(), "2020 HY1");
        assert_eq!(q.previous().unwrap().label(), "2019 Q4");

        assert_eq!(Quarter::new(2019, 1).unwrap().num_days(), 90);
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            Quarter::new(2017, 0),
            Err(ConfigError::InvalidQuarter(0))
        ));
        assert!(matches!(
            Quarter::new(i32::MAX, 1),
            Err(ConfigError::InvalidYear(_))
        ));
    }
}
