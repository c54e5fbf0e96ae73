use chrono::NaiveDate;
use std::cmp::Reverse;

use super::{Feed, FeedError, VariantId};
use crate::schedule::ServiceWindow;

impl Feed {
    /// variants of line `line_ref` running in the week starting at `date`,
    /// ranked by (stop count, trip count) descending. `today` bounds the
    /// service date range of variants without calendar.
    ///
    /// # Errors
    ///
    /// [`FeedError::LineNotFound`] when no variant matches.
    pub fn select_variants(
        &self,
        line_ref: &str,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Vec<VariantId>, FeedError> {
        let window = ServiceWindow::selection(date)?;
        let mut ranked = self.variants().iter().collect::<Vec<_>>();
        ranked.sort_by_key(|v| Reverse(v.comparison_key()));

        let mut selected = vec![];
        for variant in ranked {
            let (start, end) = self.get_service_date_range(variant.id, today)?;
            if !window.intersects(start, end) {
                continue;
            }
            if self.get_ref(variant.id)? == line_ref {
                selected.push(variant.id);
            }
        }
        if selected.is_empty() {
            return Err(FeedError::LineNotFound {
                line_ref: line_ref.to_string(),
                date,
            });
        }
        log::info!(
            "line {line_ref} at date {date}: {} route variant(s) selected",
            selected.len()
        );
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use crate::feed::{
        Agency, Feed, FeedError, FeedTables, Route, RouteType, Service, Stop, StopTime, Trip,
        WheelchairBoarding,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn stop(id: &str) -> Stop {
        Stop {
            id: id.to_string(),
            code: id.to_string(),
            name: id.to_string(),
            latitude: 43.6,
            longitude: 1.44,
            wheelchair_boarding: WheelchairBoarding::Unknown,
        }
    }

    fn trip(id: &str, route_id: &str, service_id: &str) -> Trip {
        Trip {
            id: id.to_string(),
            route_id: route_id.to_string(),
            service_id: service_id.to_string(),
            shape_id: None,
            headsign: String::new(),
        }
    }

    fn stop_times(trip_id: &str, stop_ids: &[&str]) -> Vec<StopTime> {
        stop_ids
            .iter()
            .enumerate()
            .map(|(idx, stop_id)| StopTime {
                trip_id: trip_id.to_string(),
                stop_id: stop_id.to_string(),
                stop_sequence: idx as u32,
                arrival_time: Some(21600 + 60 * idx as u32),
                departure_time: Some(21600 + 60 * idx as u32),
            })
            .collect()
    }

    /// line 12: outbound A-B-C-D with two trips, inbound D-C-B-A with one,
    /// a short turn A-B. line 12 also has an expired 2020 variant.
    /// line 3 runs in 2026.
    fn test_feed() -> Feed {
        let mut rows = vec![];
        rows.extend(stop_times("out1", &["A", "B", "C", "D"]));
        rows.extend(stop_times("out2", &["A", "B", "C", "D"]));
        rows.extend(stop_times("in1", &["D", "C", "B", "A"]));
        rows.extend(stop_times("short", &["A", "B"]));
        rows.extend(stop_times("old", &["A", "C"]));
        rows.extend(stop_times("other", &["B", "D"]));
        let service = |id: &str, year: i32| Service {
            id: id.to_string(),
            weekdays: [true; 7],
            start_date: date(year, 1, 1),
            end_date: date(year, 12, 31),
        };
        Feed::new(FeedTables {
            agencies: vec![Agency {
                id: None,
                name: String::from("Tisséo"),
            }],
            stops: ["A", "B", "C", "D"].into_iter().map(stop).collect(),
            routes: vec![
                Route {
                    id: String::from("r12"),
                    short_name: String::from("12"),
                    long_name: String::new(),
                    route_type: RouteType::Bus,
                    color: String::from("000000"),
                    agency_id: None,
                },
                Route {
                    id: String::from("r3"),
                    short_name: String::from("3"),
                    long_name: String::new(),
                    route_type: RouteType::Bus,
                    color: String::from("000000"),
                    agency_id: None,
                },
            ],
            trips: vec![
                trip("out1", "r12", "2026"),
                trip("out2", "r12", "2026"),
                trip("in1", "r12", "2026"),
                trip("short", "r12", "2026"),
                trip("old", "r12", "2020"),
                trip("other", "r3", "2026"),
            ],
            stop_times: rows,
            services: vec![service("2026", 2026), service("2020", 2020)],
            shape_points: vec![],
        })
    }

    #[test]
    fn test_select_all_variants_ranked() {
        let feed = test_feed();
        let today = date(2026, 10, 19);
        let selected = feed
            .select_variants("12", date(2025, 12, 28), today)
            .expect("line 12 runs");
        let expected = vec![
            feed.variant_of_trip("out1"),
            feed.variant_of_trip("in1"),
            feed.variant_of_trip("short"),
        ];
        assert_eq!(selected.into_iter().map(Some).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_date_range_spans_calendar_start_dates() {
        // both ends of a variant's date range are calendar start dates, so a
        // week after 2026-01-01 no longer selects the 2026 services
        let feed = test_feed();
        let today = date(2026, 10, 19);
        let selected = feed
            .select_variants("3", date(2026, 1, 1), today)
            .expect("line 3 runs");
        assert_eq!(selected.len(), 1);
        let result = feed.select_variants("3", date(2026, 1, 2), today);
        assert!(matches!(result, Err(FeedError::LineNotFound { .. })));
    }

    #[test]
    fn test_line_not_found() {
        let feed = test_feed();
        let result = feed.select_variants("99", date(2025, 12, 28), date(2026, 10, 19));
        assert!(matches!(result, Err(FeedError::LineNotFound { .. })));
    }
}
