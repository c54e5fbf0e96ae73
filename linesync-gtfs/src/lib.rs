//! route variant model for a GTFS feed and the schedule attributes
//! (duration, headway, opening hours) derived from its timetable.
pub mod app;
pub mod feed;
pub mod schedule;
