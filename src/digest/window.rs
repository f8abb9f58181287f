// src/digest/window.rs
//! The span of time whose saved items count as new.

use crate::error::AppError;
use crate::types::ValidationError;
use chrono::{DateTime, Days, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use std::fmt;

/// `(start, end)`, exclusive at both ends.
///
/// `end` is midnight at the start of the day the job runs on; `start` is
/// local midnight `check_interval_days` calendar days earlier, so a DST
/// change inside the window moves its length rather than its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewItemWindow {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    check_interval_days: u32,
}

impl NewItemWindow {
    /// The window that ends at the start of today in local time.
    pub fn ending_today(check_interval_days: u32) -> Result<Self, AppError> {
        Self::ending_on(Local::now().date_naive(), check_interval_days, &Local)
    }

    /// The window that ends at the start of `day` in `tz`.
    pub fn ending_on<Tz: TimeZone>(
        day: NaiveDate,
        check_interval_days: u32,
        tz: &Tz,
    ) -> Result<Self, AppError> {
        let start_day = day
            .checked_sub_days(Days::new(u64::from(check_interval_days)))
            .ok_or_else(|| ValidationError::InvalidTimestamp {
                value: day.to_string(),
                reason: format!("cannot go back {} days", check_interval_days),
            })?;
        let start = local_midnight(start_day, tz)?;
        let end = local_midnight(day, tz)?;

        Ok(Self {
            start,
            end,
            check_interval_days,
        })
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    pub fn check_interval_days(&self) -> u32 {
        self.check_interval_days
    }

    /// Strictly between `start` and `end`.
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start.with_timezone(&Utc) < *instant && *instant < self.end.with_timezone(&Utc)
    }

    /// `YYYY M/D` of the first day, as used in summary messages.
    pub fn start_label(&self) -> String {
        self.start.format("%Y %-m/%-d").to_string()
    }
}

fn local_midnight<Tz: TimeZone>(
    day: NaiveDate,
    tz: &Tz,
) -> Result<DateTime<FixedOffset>, AppError> {
    day.and_hms_opt(0, 0, 0)
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|midnight| midnight.fixed_offset())
        .ok_or_else(|| {
            ValidationError::InvalidTimestamp {
                value: day.to_string(),
                reason: "day has no local midnight".to_string(),
            }
            .into()
        })
}

impl fmt::Display for NewItemWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}
