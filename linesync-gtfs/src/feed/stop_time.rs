use serde::{Deserialize, Serialize};

/// one row of stop_times.txt. times are seconds since midnight of the
/// service day and may exceed 24 hours for trips running past midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopTime {
    pub trip_id: String,
    pub stop_id: String,
    pub stop_sequence: u32,
    pub arrival_time: Option<u32>,
    pub departure_time: Option<u32>,
}

impl StopTime {
    /// time the vehicle leaves this stop, falling back to its arrival.
    pub fn departure(&self) -> Option<u32> {
        self.departure_time.or(self.arrival_time)
    }

    /// time the vehicle reaches this stop, falling back to its departure.
    pub fn arrival(&self) -> Option<u32> {
        self.arrival_time.or(self.departure_time)
    }
}

impl From<&gtfs_structures::RawStopTime> for StopTime {
    fn from(st: &gtfs_structures::RawStopTime) -> Self {
        StopTime {
            trip_id: st.trip_id.clone(),
            stop_id: st.stop_id.clone(),
            stop_sequence: st.stop_sequence,
            arrival_time: st.arrival_time,
            departure_time: st.departure_time,
        }
    }
}
