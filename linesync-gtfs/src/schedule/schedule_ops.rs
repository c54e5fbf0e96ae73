use chrono::Weekday;
use itertools::Itertools;

use super::{format_hm, format_hms, ServiceWindow, TripSchedule};

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const HOLIDAY_RULE: &str = "May 1 off";

fn weekday_abbreviation(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

/// blended travel time: the midpoint between the mean and the maximum trip
/// duration, formatted `HH:MM:SS`. None without any trip.
pub fn duration(trips: &[TripSchedule]) -> Option<String> {
    let max = trips.iter().map(|t| t.duration()).max()?;
    let total: u64 = trips.iter().map(|t| t.duration() as u64).sum();
    let mean = total as f64 / trips.len() as f64;
    let blended = ((mean + max as f64) / 2.0) as u32;
    Some(format_hms(blended))
}

/// average spacing between consecutive departures, pooled over the days
/// of the week. a day with at least two distinct departure times
/// contributes its span and one gap per serviced trip after the first.
/// None when no day does.
pub fn headway(trips: &[TripSchedule], window: &ServiceWindow) -> Option<String> {
    let mut total_span: u64 = 0;
    let mut total_gaps: u64 = 0;
    for weekday in WEEKDAYS {
        let departures = trips
            .iter()
            .filter(|t| t.is_serviced_on(weekday, window))
            .map(|t| t.first_departure)
            .sorted()
            .collect_vec();
        if let (Some(first), Some(last)) = (departures.first(), departures.last()) {
            if first < last {
                total_span += (last - first) as u64;
                total_gaps += departures.len() as u64 - 1;
            }
        }
    }
    if total_gaps == 0 {
        return None;
    }
    Some(format_hms((total_span / total_gaps) as u32))
}

/// OSM opening_hours value built from the first departure and last arrival
/// of each weekday. contiguous weekdays with identical hours are grouped.
/// returns `off` when nothing runs in the window.
pub fn opening_hours(trips: &[TripSchedule], window: &ServiceWindow) -> String {
    // (first weekday, last weekday, hours) per group
    let mut groups: Vec<(Weekday, Weekday, String)> = vec![];
    for weekday in WEEKDAYS {
        let serviced = trips
            .iter()
            .filter(|t| t.is_serviced_on(weekday, window))
            .collect_vec();
        let first = serviced.iter().map(|t| t.first_departure).min();
        let last = serviced.iter().map(|t| t.last_arrival).max();
        let (Some(first), Some(last)) = (first, last) else {
            continue;
        };
        let hours = format!("{}-{}", format_hm(first), format_hm(last));
        match groups.last_mut() {
            Some((_, group_end, group_hours))
                if *group_hours == hours && group_end.succ() == weekday =>
            {
                *group_end = weekday;
            }
            _ => groups.push((weekday, weekday, hours)),
        }
    }
    if groups.is_empty() {
        return String::from("off");
    }
    groups
        .iter()
        .map(|(start, end, hours)| {
            if start == end {
                format!("{} {}", weekday_abbreviation(*start), hours)
            } else {
                format!(
                    "{}-{} {}",
                    weekday_abbreviation(*start),
                    weekday_abbreviation(*end),
                    hours
                )
            }
        })
        .chain(std::iter::once(HOLIDAY_RULE.to_string()))
        .join(";")
}
