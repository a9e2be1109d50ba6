//! Half-open calendar date ranges.

use chrono::{Datelike, Duration, NaiveDate};

use crate::entry::parse_date;
use crate::error::{SchedulerError, SchedulerResult};

/// Number of days shown by a month view (six full weeks).
pub const MONTH_VIEW_DAYS: i64 = 42;

/// A range of calendar days, `start` inclusive and `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> SchedulerResult<Self> {
        if end <= start {
            return Err(SchedulerError::Validation(format!(
                "End date {} must be after start date {}",
                end, start
            )));
        }
        Ok(DateRange { start, end })
    }

    pub fn single_day(date: NaiveDate) -> Self {
        DateRange {
            start: date,
            end: date + Duration::days(1),
        }
    }

    /// The six-week window a month calendar (weeks starting on Monday) shows
    /// for the month containing `date`.
    pub fn month_view(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let offset = first.weekday().num_days_from_monday() as i64;
        let start = first - Duration::days(offset);
        DateRange {
            start,
            end: start + Duration::days(MONTH_VIEW_DAYS),
        }
    }

    /// Build a range from optional `YYYY-MM-DD` arguments.
    /// - neither given: month view around `today`
    /// - only `from`: a month view's worth of days starting at `from`
    /// - `to` is exclusive
    pub fn from_args(from: Option<&str>, to: Option<&str>, today: NaiveDate) -> SchedulerResult<Self> {
        match (from, to) {
            (None, None) => Ok(Self::month_view(today)),
            (Some(from), None) => {
                let start = parse_date(from)?;
                Self::new(start, start + Duration::days(MONTH_VIEW_DAYS))
            }
            (None, Some(to)) => {
                let end = parse_date(to)?;
                Self::new(end - Duration::days(MONTH_VIEW_DAYS), end)
            }
            (Some(from), Some(to)) => Self::new(parse_date(from)?, parse_date(to)?),
        }
    }

    /// Every day in the range, in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d < end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}
