use chrono::Weekday;

use super::ServiceWindow;
use crate::feed::{Service, StopTime};

/// timing summary of a single trip, in seconds since the start of the
/// service day.
#[derive(Debug, Clone, Copy)]
pub struct TripSchedule<'a> {
    pub first_departure: u32,
    pub last_arrival: u32,
    /// None when the trip's service_id is not in calendar.txt
    pub service: Option<&'a Service>,
}

impl<'a> TripSchedule<'a> {
    /// builds the summary from stop times sorted by sequence. returns None
    /// when no stop time carries a time.
    pub fn new(stop_times: &[StopTime], service: Option<&'a Service>) -> Option<TripSchedule<'a>> {
        let first_departure = stop_times.iter().filter_map(|st| st.departure()).min()?;
        let last_arrival = stop_times.iter().filter_map(|st| st.arrival()).max()?;
        Some(TripSchedule {
            first_departure,
            last_arrival,
            service,
        })
    }

    /// travel time from first departure to last arrival.
    pub fn duration(&self) -> u32 {
        self.last_arrival.saturating_sub(self.first_departure)
    }

    /// a trip with an unknown service runs every day.
    pub fn is_serviced_on(&self, weekday: Weekday, window: &ServiceWindow) -> bool {
        match self.service {
            Some(service) => service.is_serviced_on(weekday, window),
            None => true,
        }
    }
}
