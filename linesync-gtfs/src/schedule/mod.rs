mod schedule_ops;
mod service_window;
mod time_format;
mod trip_schedule;

pub use schedule_ops::{duration, headway, opening_hours, WEEKDAYS};
pub use service_window::ServiceWindow;
pub use time_format::{format_hm, format_hms};
pub use trip_schedule::TripSchedule;
