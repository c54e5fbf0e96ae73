use chrono::{Days, NaiveDate};

use crate::feed::FeedError;

/// days covered by the window used for headway and opening hours
pub const SCHEDULE_WINDOW_DAYS: u64 = 14;
/// days covered by the window used to select the variants of a line
pub const SELECTION_WINDOW_DAYS: u64 = 7;

/// an inclusive date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ServiceWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> ServiceWindow {
        ServiceWindow { start, end }
    }

    /// `[today, today + 14 days]`
    pub fn schedule_default(today: NaiveDate) -> Result<ServiceWindow, FeedError> {
        Self::starting_at(today, SCHEDULE_WINDOW_DAYS)
    }

    /// `[date, date + 7 days]`
    pub fn selection(date: NaiveDate) -> Result<ServiceWindow, FeedError> {
        Self::starting_at(date, SELECTION_WINDOW_DAYS)
    }

    fn starting_at(start: NaiveDate, days: u64) -> Result<ServiceWindow, FeedError> {
        let end = start
            .checked_add_days(Days::new(days))
            .ok_or(FeedError::DateOverflow(start, days))?;
        Ok(ServiceWindow { start, end })
    }

    /// true when both inclusive intervals share at least one day.
    pub fn intersects(&self, start: NaiveDate, end: NaiveDate) -> bool {
        end >= self.start && start <= self.end
    }
}
