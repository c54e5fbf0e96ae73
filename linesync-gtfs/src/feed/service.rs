use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::schedule::ServiceWindow;

/// a row of calendar.txt: the weekdays a service runs on within an
/// inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    /// indexed by [`Weekday::num_days_from_monday`]
    pub weekdays: [bool; 7],
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Service {
    pub fn runs_on_weekday(&self, weekday: Weekday) -> bool {
        self.weekdays[weekday.num_days_from_monday() as usize]
    }

    /// true if [start_date, end_date] and the window share at least one day.
    pub fn intersects(&self, window: &ServiceWindow) -> bool {
        self.start_date <= window.end && window.start <= self.end_date
    }

    /// a service runs on a weekday within a window when that weekday flag is
    /// set and its date range intersects the window.
    pub fn is_serviced_on(&self, weekday: Weekday, window: &ServiceWindow) -> bool {
        self.runs_on_weekday(weekday) && self.intersects(window)
    }
}

impl From<&gtfs_structures::Calendar> for Service {
    fn from(c: &gtfs_structures::Calendar) -> Self {
        Service {
            id: c.id.clone(),
            weekdays: [
                c.monday,
                c.tuesday,
                c.wednesday,
                c.thursday,
                c.friday,
                c.saturday,
                c.sunday,
            ],
            start_date: c.start_date,
            end_date: c.end_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Service;
    use crate::schedule::ServiceWindow;
    use chrono::{NaiveDate, Weekday};

    fn weekday_service() -> Service {
        Service {
            id: String::from("weekday"),
            weekdays: [true, true, true, true, true, false, false],
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        }
    }

    #[test]
    fn test_serviced_requires_weekday_and_intersection() {
        let service = weekday_service();
        let inside = ServiceWindow::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        );
        let after = ServiceWindow::new(
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
        );
        assert!(service.is_serviced_on(Weekday::Mon, &inside));
        assert!(!service.is_serviced_on(Weekday::Sat, &inside));
        assert!(!service.is_serviced_on(Weekday::Mon, &after));
    }

    #[test]
    fn test_window_touching_last_day_intersects() {
        let service = weekday_service();
        let touching = ServiceWindow::new(
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 7).unwrap(),
        );
        assert!(service.intersects(&touching));
    }
}
