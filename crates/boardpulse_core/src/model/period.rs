//! Inclusive reporting window.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Calendar-date window `[start 00:00:00.000, end 23:59:59.999]` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

/// Rejected period construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    /// `start` falls after `end`.
    Inverted { start: NaiveDate, end: NaiveDate },
}

impl Display for PeriodError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inverted { start, end } => {
                write!(f, "period start {start} is after period end {end}")
            }
        }
    }
}

impl Error for PeriodError {}

impl Period {
    /// Builds a window from two calendar dates.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// First instant inside the window.
    pub fn start_instant(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Last instant inside the window (23:59:59.999 of the end date).
    pub fn end_instant(&self) -> DateTime<Utc> {
        let end_of_day =
            NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        self.end.and_time(end_of_day).and_utc()
    }

    /// Returns whether `instant` lies inside the window, bounds included.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start_instant() && instant <= self.end_instant()
    }
}

#[cfg(test)]
mod tests {
    use super::{Period, PeriodError};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_end_is_normalized_to_end_of_day() {
        let period = Period::new(date(2025, 6, 2), date(2025, 6, 10)).unwrap();
        let last_ms = Utc
            .with_ymd_and_hms(2025, 6, 10, 23, 59, 59)
            .unwrap()
            + chrono::Duration::milliseconds(999);
        let next_day = Utc.with_ymd_and_hms(2025, 6, 11, 0, 0, 0).unwrap();

        assert_eq!(period.end_instant(), last_ms);
        assert!(period.contains(last_ms));
        assert!(!period.contains(next_day));
    }

    #[test]
    fn window_start_is_inclusive() {
        let period = Period::new(date(2025, 6, 2), date(2025, 6, 2)).unwrap();
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        assert!(period.contains(start));
        assert!(!period.contains(start - chrono::Duration::milliseconds(1)));
    }

    #[test]
    fn rejects_inverted_window() {
        let err = Period::new(date(2025, 6, 10), date(2025, 6, 2)).unwrap_err();
        assert_eq!(
            err,
            PeriodError::Inverted {
                start: date(2025, 6, 10),
                end: date(2025, 6, 2),
            }
        );
    }
}
