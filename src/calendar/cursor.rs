// src/calendar/cursor.rs
use chrono::{Datelike, NaiveDate, Weekday};
use std::num::NonZeroU32;

/// How many records a given day receives before the cursor moves on.
pub trait DailyCapacity {
    fn capacity(&self, day: NaiveDate) -> NonZeroU32;

    /// Sum of capacities over `days` consecutive days starting at `start`.
    fn total_over(&self, start: NaiveDate, days: u32) -> u64 {
        start
            .iter_days()
            .take(days as usize)
            .map(|d| u64::from(self.capacity(d).get()))
            .sum()
    }
}

/// Capacities that can be expressed in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordsPerDay {
    Fixed(NonZeroU32),
    /// Saturdays and Sundays get `weekend`, every other day `weekday`.
    WeekdaySplit {
        weekday: NonZeroU32,
        weekend: NonZeroU32,
    },
}

impl DailyCapacity for RecordsPerDay {
    fn capacity(&self, day: NaiveDate) -> NonZeroU32 {
        match *self {
            RecordsPerDay::Fixed(n) => n,
            RecordsPerDay::WeekdaySplit { weekday, weekend } => match day.weekday() {
                Weekday::Sat | Weekday::Sun => weekend,
                _ => weekday,
            },
        }
    }
}

/// Capacity computed by an arbitrary function of the date.
pub struct PerDate<F>(pub F);

impl<F> DailyCapacity for PerDate<F>
where
    F: Fn(NaiveDate) -> NonZeroU32,
{
    fn capacity(&self, day: NaiveDate) -> NonZeroU32 {
        (self.0)(day)
    }
}

/// Emits the same date `capacity(date)` times, then steps forward one day.
#[derive(Debug, Clone)]
pub struct DateCursor<C = RecordsPerDay> {
    current: NaiveDate,
    emitted: u32,
    capacity: C,
}

impl<C: DailyCapacity> DateCursor<C> {
    pub fn new(start: NaiveDate, capacity: C) -> Self {
        Self {
            current: start,
            emitted: 0,
            capacity,
        }
    }

    /// Date the next call to [`advance`](Self::advance) would return if the
    /// current day still has room.
    pub fn current(&self) -> NaiveDate {
        self.current
    }

    /// Returns the date for the next record.
    ///
    /// Saturates at `NaiveDate::MAX` rather than overflowing.
    pub fn advance(&mut self) -> NaiveDate {
        if self.emitted >= self.capacity.capacity(self.current).get() {
            if let Some(next) = self.current.succ_opt() {
                self.current = next;
            }
            self.emitted = 0;
        }
        self.emitted += 1;
        self.current
    }
}

impl<C: DailyCapacity> Iterator for DateCursor<C> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        Some(self.advance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixed(n: u32) -> RecordsPerDay {
        RecordsPerDay::Fixed(NonZeroU32::new(n).unwrap())
    }

    #[test]
    fn test_same_date_n_times_then_next_day() {
        let mut cursor = DateCursor::new(ymd(2017, 10, 1), fixed(3));
        let got: Vec<NaiveDate> = (0..7).map(|_| cursor.advance()).collect();
        assert_eq!(
            got,
            vec![
                ymd(2017, 10, 1),
                ymd(2017, 10, 1),
                ymd(2017, 10, 1),
                ymd(2017, 10, 2),
                ymd(2017, 10, 2),
                ymd(2017, 10, 2),
                ymd(2017, 10, 3),
            ]
        );
    }

    #[test]
    fn test_capacity_one_is_one_day_per_record() {
        let cursor = DateCursor::new(ymd(2017, 12, 30), fixed(1));
        let got: Vec<NaiveDate> = cursor.take(3).collect();
        assert_eq!(got, vec![ymd(2017, 12, 30), ymd(2017, 12, 31), ymd(2018, 1, 1)]);
    }

    #[test]
    fn test_full_quarter_ends_on_dec_31() {
        let start = ymd(2017, 10, 1);
        let per_day = fixed(59);
        let total = per_day.total_over(start, 92);
        assert_eq!(total, 5428);

        let mut cursor = DateCursor::new(start, per_day);
        let mut last = start;
        for _ in 0..total {
            last = cursor.advance();
        }
        assert_eq!(last, ymd(2017, 12, 31));
        // one more spills into the next year
        assert_eq!(cursor.advance(), ymd(2018, 1, 1));
    }

    #[test]
    fn test_weekday_split() {
        // 2017-10-01 is a Sunday
        let split = RecordsPerDay::WeekdaySplit {
            weekday: NonZeroU32::new(3).unwrap(),
            weekend: NonZeroU32::new(1).unwrap(),
        };
        let got: Vec<NaiveDate> = DateCursor::new(ymd(2017, 10, 1), split).take(5).collect();
        assert_eq!(
            got,
            vec![
                ymd(2017, 10, 1),
                ymd(2017, 10, 2),
                ymd(2017, 10, 2),
                ymd(2017, 10, 2),
                ymd(2017, 10, 3),
            ]
        );
        assert_eq!(split.total_over(ymd(2017, 10, 1), 7), 2 + 5 * 3);
    }

    #[test]
    fn test_per_date_closure() {
        let by_day = PerDate(|d: NaiveDate| NonZeroU32::new(d.day()).unwrap());
        let mut cursor = DateCursor::new(ymd(2017, 10, 1), by_day);
        assert_eq!(cursor.advance(), ymd(2017, 10, 1));
        assert_eq!(cursor.advance(), ymd(2017, 10, 2));
        assert_eq!(cursor.advance(), ymd(2017, 10, 2));
        assert_eq!(cursor.advance(), ymd(2017, 10, 3));
        assert_eq!(cursor.current(), ymd(2017, 10, 3));
    }

    #[test]
    fn test_saturates_at_max_date() {
        let mut cursor = DateCursor::new(NaiveDate::MAX, fixed(1));
        assert_eq!(cursor.advance(), NaiveDate::MAX);
        assert_eq!(cursor.advance(), NaiveDate::MAX);
    }
}
