//! aggregate queries over a [`RouteVariant`]. every query visits all trips
//! of the variant; string queries return the distinct values sorted and
//! joined with `;`.
use chrono::NaiveDate;
use itertools::Itertools;
use std::collections::BTreeSet;

use super::{Feed, FeedError, Route, RouteType, Stop, Trip, VariantId};
use crate::schedule::{self, ServiceWindow, TripSchedule};

/// separator between distinct values of an aggregate
pub const VALUE_SEPARATOR: &str = ";";

fn join_distinct<I>(values: I) -> String
where
    I: IntoIterator<Item = String>,
{
    values
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .join(VALUE_SEPARATOR)
}

impl Feed {
    /// trips of a variant in trip id order.
    pub fn trips_of_variant(&self, id: VariantId) -> Result<Vec<&Trip>, FeedError> {
        let variant = self.variant(id)?;
        variant
            .trip_ids
            .iter()
            .map(|trip_id| self.trip(trip_id))
            .collect()
    }

    pub fn routes_of_variant(&self, id: VariantId) -> Result<Vec<&Route>, FeedError> {
        let variant = self.variant(id)?;
        variant
            .trip_ids
            .iter()
            .map(|trip_id| self.route_of_trip(trip_id))
            .collect()
    }

    fn aggregate_routes<F>(&self, id: VariantId, op: F) -> Result<String, FeedError>
    where
        F: Fn(&Route) -> String,
    {
        let routes = self.routes_of_variant(id)?;
        Ok(join_distinct(routes.into_iter().map(op)))
    }

    /// line code(s) of the variant.
    pub fn get_ref(&self, id: VariantId) -> Result<String, FeedError> {
        self.aggregate_routes(id, |r| r.short_name.clone())
    }

    pub fn get_agency(&self, id: VariantId) -> Result<String, FeedError> {
        let names = self
            .routes_of_variant(id)?
            .into_iter()
            .map(|route| self.agency_of_route(route).map(|a| a.name.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(join_distinct(names))
    }

    pub fn get_headsign(&self, id: VariantId) -> Result<String, FeedError> {
        let trips = self.trips_of_variant(id)?;
        Ok(join_distinct(trips.into_iter().map(|t| t.headsign.clone())))
    }

    pub fn get_long_name(&self, id: VariantId) -> Result<String, FeedError> {
        self.aggregate_routes(id, |r| r.long_name.clone())
    }

    /// OSM route values of the variant, e.g. `bus` or `bus;tram`.
    pub fn get_route_type(&self, id: VariantId) -> Result<String, FeedError> {
        self.aggregate_routes(id, |r| r.route_type.route_tag().to_string())
    }

    /// the mode of the variant. mixed variants resolve to the mode of the
    /// route of their first trip.
    pub fn get_primary_route_type(&self, id: VariantId) -> Result<RouteType, FeedError> {
        let variant = self.variant(id)?;
        match variant.trip_ids.iter().next() {
            Some(trip_id) => Ok(self.route_of_trip(trip_id)?.route_type),
            None => Ok(RouteType::Bus),
        }
    }

    pub fn get_colour(&self, id: VariantId) -> Result<String, FeedError> {
        self.aggregate_routes(id, |r| r.colour_tag())
    }

    pub fn get_service_ids(&self, id: VariantId) -> Result<BTreeSet<String>, FeedError> {
        let trips = self.trips_of_variant(id)?;
        Ok(trips.into_iter().map(|t| t.service_id.clone()).collect())
    }

    pub fn get_shape_ids(&self, id: VariantId) -> Result<BTreeSet<String>, FeedError> {
        let trips = self.trips_of_variant(id)?;
        Ok(trips
            .into_iter()
            .filter_map(|t| t.shape_id.clone())
            .collect())
    }

    /// earliest and latest calendar start date among the services of the
    /// variant. both ends are `today` when no service resolves.
    pub fn get_service_date_range(
        &self,
        id: VariantId,
        today: NaiveDate,
    ) -> Result<(NaiveDate, NaiveDate), FeedError> {
        let starts = self
            .get_service_ids(id)?
            .iter()
            .filter_map(|service_id| self.service(service_id))
            .map(|service| service.start_date)
            .collect_vec();
        let start = starts.iter().min().copied().unwrap_or(today);
        let end = starts.iter().max().copied().unwrap_or(today);
        Ok((start, end))
    }

    /// timing summaries of the variant's trips. trips without any time are
    /// left out.
    pub fn get_trip_schedules(&self, id: VariantId) -> Result<Vec<TripSchedule<'_>>, FeedError> {
        let trips = self.trips_of_variant(id)?;
        let schedules = trips
            .into_iter()
            .filter_map(|trip| {
                TripSchedule::new(self.stop_times(&trip.id), self.service(&trip.service_id))
            })
            .collect_vec();
        Ok(schedules)
    }

    /// blended travel time `HH:MM:SS`, None when no trip carries times.
    pub fn get_duration(&self, id: VariantId) -> Result<Option<String>, FeedError> {
        let schedules = self.get_trip_schedules(id)?;
        Ok(schedule::duration(&schedules))
    }

    pub fn get_headway(
        &self,
        id: VariantId,
        window: &ServiceWindow,
    ) -> Result<Option<String>, FeedError> {
        let schedules = self.get_trip_schedules(id)?;
        Ok(schedule::headway(&schedules, window))
    }

    pub fn get_opening_hours(
        &self,
        id: VariantId,
        window: &ServiceWindow,
    ) -> Result<String, FeedError> {
        let schedules = self.get_trip_schedules(id)?;
        Ok(schedule::opening_hours(&schedules, window))
    }

    /// ordered stops of the variant, with consecutive stops sharing a code
    /// collapsed. stop ids absent from stops.txt are reported and left out.
    pub fn get_stops(&self, id: VariantId) -> Result<Vec<&Stop>, FeedError> {
        let stops = self.stops_of_variant(id)?;
        Ok(stops.into_iter().dedup_by(|a, b| a.code == b.code).collect())
    }

    /// `"<Type> <Ref>: <first stop> → <last stop>"`, with `?` for an end
    /// stop missing from stops.txt.
    pub fn get_osm_name(&self, id: VariantId) -> Result<String, FeedError> {
        let route_type = self.get_primary_route_type(id)?;
        let line_ref = self.get_ref(id)?;
        let variant = self.variant(id)?;
        let from = self.stop_name_or_unknown(variant.stop_ids.first());
        let to = self.stop_name_or_unknown(variant.stop_ids.last());
        Ok(format!(
            "{} {}: {} → {}",
            route_type.display_name(),
            line_ref,
            from,
            to
        ))
    }

    fn stop_name_or_unknown(&self, stop_id: Option<&String>) -> &str {
        stop_id
            .and_then(|s| self.stops.get(s))
            .map(|s| s.name.as_str())
            .unwrap_or("?")
    }
}

#[cfg(test)]
mod tests {
    use crate::feed::{
        Agency, Feed, FeedTables, Route, RouteType, Service, Stop, StopTime, Trip, VariantId,
        WheelchairBoarding,
    };
    use crate::schedule::ServiceWindow;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn stop(id: &str, code: &str, name: &str) -> Stop {
        Stop {
            id: id.to_string(),
            code: code.to_string(),
            name: name.to_string(),
            latitude: 43.6,
            longitude: 1.44,
            wheelchair_boarding: WheelchairBoarding::Unknown,
        }
    }

    fn route(id: &str, short_name: &str, route_type: RouteType) -> Route {
        Route {
            id: id.to_string(),
            short_name: short_name.to_string(),
            long_name: format!("Ligne {short_name}"),
            route_type,
            color: String::from("FF0000"),
            agency_id: None,
        }
    }

    fn trip(id: &str, route_id: &str, service_id: &str, headsign: &str) -> Trip {
        Trip {
            id: id.to_string(),
            route_id: route_id.to_string(),
            service_id: service_id.to_string(),
            shape_id: Some(format!("shape_{route_id}")),
            headsign: headsign.to_string(),
        }
    }

    fn stop_times(trip_id: &str, rows: &[(&str, u32, u32)]) -> Vec<StopTime> {
        rows.iter()
            .enumerate()
            .map(|(idx, (stop_id, arr, dep))| StopTime {
                trip_id: trip_id.to_string(),
                stop_id: stop_id.to_string(),
                stop_sequence: idx as u32 + 1,
                arrival_time: Some(*arr),
                departure_time: Some(*dep),
            })
            .collect()
    }

    /// two trips on line 12 sharing A, B, C; one trip on 12 with a repeated
    /// stop id; one on line 7 whose stop id X is missing from stops.
    fn test_feed() -> Feed {
        let mut rows = stop_times("t1", &[("A", 21600, 21600), ("B", 22200, 22200), ("C", 23400, 23400)]);
        rows.extend(stop_times("t2", &[("A", 25200, 25200), ("B", 26000, 26000), ("C", 28200, 28200)]));
        rows.extend(stop_times("t3", &[("A", 30000, 30000), ("A", 30060, 30060), ("B", 30600, 30600), ("C", 31800, 31800)]));
        rows.extend(stop_times("t4", &[("D", 21600, 21600), ("X", 22000, 22000), ("D2", 22600, 22600)]));
        // rows out of sequence order
        rows.reverse();
        Feed::new(FeedTables {
            agencies: vec![Agency {
                id: None,
                name: String::from("Tisséo"),
            }],
            stops: vec![
                stop("A", "100", "Arènes"),
                stop("B", "101", "Capitole"),
                stop("C", "102", "Jeanne d'Arc"),
                stop("D", "200", "Gare"),
                stop("D2", "200", "Gare"),
            ],
            routes: vec![
                route("r12", "12", RouteType::Bus),
                route("r7", "7", RouteType::Tram),
            ],
            trips: vec![
                trip("t1", "r12", "WK", "Jeanne d'Arc"),
                trip("t2", "r12", "WE", "Jeanne d'Arc"),
                trip("t3", "r12", "WK", "Jeanne d'Arc"),
                trip("t4", "r7", "UNKNOWN", "Gare"),
            ],
            stop_times: rows,
            services: vec![
                Service {
                    id: String::from("WK"),
                    weekdays: [true, true, true, true, true, false, false],
                    start_date: date(2026, 1, 1),
                    end_date: date(2026, 12, 31),
                },
                Service {
                    id: String::from("WE"),
                    weekdays: [false, false, false, false, false, true, true],
                    start_date: date(2026, 2, 1),
                    end_date: date(2026, 12, 31),
                },
            ],
            shape_points: vec![],
        })
    }

    fn variant_of(feed: &Feed, trip_id: &str) -> VariantId {
        feed.variant_of_trip(trip_id).expect("trip has a variant")
    }

    #[test]
    fn test_variants_keyed_by_deduplicated_stop_ids() {
        let feed = test_feed();
        assert_eq!(feed.variants().len(), 2);
        assert_eq!(variant_of(&feed, "t1"), variant_of(&feed, "t2"));
        assert_eq!(variant_of(&feed, "t1"), variant_of(&feed, "t3"));
        assert_ne!(variant_of(&feed, "t1"), variant_of(&feed, "t4"));
    }

    #[test]
    fn test_string_aggregates() {
        let feed = test_feed();
        let v = variant_of(&feed, "t1");
        assert_eq!(feed.get_ref(v).expect("ref"), "12");
        assert_eq!(feed.get_agency(v).expect("agency"), "Tisséo");
        assert_eq!(feed.get_headsign(v).expect("headsign"), "Jeanne d'Arc");
        assert_eq!(feed.get_long_name(v).expect("long name"), "Ligne 12");
        assert_eq!(feed.get_route_type(v).expect("route type"), "bus");
        assert_eq!(feed.get_colour(v).expect("colour"), "#FF0000");
        assert_eq!(feed.get_shape_ids(v).expect("shapes").len(), 1);
    }

    #[test]
    fn test_service_date_range() {
        let feed = test_feed();
        let today = date(2026, 10, 19);
        let v = variant_of(&feed, "t1");
        assert_eq!(
            feed.get_service_date_range(v, today).expect("range"),
            (date(2026, 1, 1), date(2026, 2, 1))
        );
        let unknown = variant_of(&feed, "t4");
        assert_eq!(
            feed.get_service_date_range(unknown, today).expect("range"),
            (today, today)
        );
    }

    #[test]
    fn test_duration_and_headway() {
        let feed = test_feed();
        let v = variant_of(&feed, "t1");
        // durations 30m, 50m, 30m: mean 36m40s, max 50m
        assert_eq!(
            feed.get_duration(v).expect("duration"),
            Some(String::from("00:43:20"))
        );
        let window = ServiceWindow::new(date(2026, 3, 2), date(2026, 3, 16));
        // weekdays: 06:00 and 08:20, weekends: a single departure
        assert_eq!(
            feed.get_headway(v, &window).expect("headway"),
            Some(String::from("02:20:00"))
        );
        assert_eq!(
            feed.get_opening_hours(v, &window).expect("opening hours"),
            "Mo-Fr 06:00-08:50;Sa-Su 07:00-07:50;May 1 off"
        );
    }

    #[test]
    fn test_unknown_service_always_serviced() {
        let feed = test_feed();
        let v = variant_of(&feed, "t4");
        let window = ServiceWindow::new(date(2030, 1, 1), date(2030, 1, 8));
        assert_eq!(
            feed.get_opening_hours(v, &window).expect("opening hours"),
            "Mo-Su 06:00-06:16;May 1 off"
        );
    }

    #[test]
    fn test_stops_skip_missing_and_collapse_codes() {
        let feed = test_feed();
        let v = variant_of(&feed, "t4");
        // X is unknown, D and D2 share code 200
        let stops = feed.get_stops(v).expect("stops");
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].code, "200");
        assert_eq!(
            feed.get_osm_name(v).expect("name"),
            "Tram 7: Gare → Gare"
        );
        let v = variant_of(&feed, "t1");
        assert_eq!(
            feed.get_osm_name(v).expect("name"),
            "Bus 12: Arènes → Jeanne d'Arc"
        );
    }

    #[test]
    fn test_osm_name_marks_missing_end_stops() {
        let mut rows = stop_times("t1", &[("X", 21600, 21600), ("A", 22200, 22200), ("B", 22800, 22800)]);
        rows.extend(stop_times("t2", &[("A", 25200, 25200), ("B", 25800, 25800), ("Y", 26400, 26400)]));
        let feed = Feed::new(FeedTables {
            agencies: vec![Agency {
                id: None,
                name: String::from("Tisséo"),
            }],
            stops: vec![stop("A", "100", "Arènes"), stop("B", "101", "Capitole")],
            routes: vec![route("r7", "7", RouteType::Tram)],
            trips: vec![
                trip("t1", "r7", "WK", "Capitole"),
                trip("t2", "r7", "WK", "Gare"),
            ],
            stop_times: rows,
            services: vec![],
            shape_points: vec![],
        });
        // X and Y are not in stops
        assert_eq!(
            feed.get_osm_name(variant_of(&feed, "t1")).expect("name"),
            "Tram 7: ? → Capitole"
        );
        assert_eq!(
            feed.get_osm_name(variant_of(&feed, "t2")).expect("name"),
            "Tram 7: Arènes → ?"
        );
    }
}
