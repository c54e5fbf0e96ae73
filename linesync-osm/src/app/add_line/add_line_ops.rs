use chrono::NaiveDate;
use linesync_gtfs::feed::{Feed, VariantId};
use linesync_gtfs::schedule::ServiceWindow;
use std::collections::HashSet;

use super::line_relation_ops::{self, LineAttributes};
use super::{stop_resolution_ops, ImportContext};
use crate::config::AgencyProfiles;
use crate::model::osm::{OsmDocument, OsmRelationId};
use crate::model::LinesyncCliError;

/// imports every variant of line `line_ref` running in the week starting
/// at `date` into `doc`, most significant variant first.
///
/// # Returns
///
/// the number of line relations created.
///
/// # Errors
///
/// fails with the feed's line-not-found error when no variant matches.
pub fn add_line(
    feed: &Feed,
    doc: &mut OsmDocument,
    line_ref: &str,
    date: NaiveDate,
    today: NaiveDate,
    profiles: &AgencyProfiles,
) -> Result<usize, LinesyncCliError> {
    let variants = feed.select_variants(line_ref, date, today)?;
    let window = ServiceWindow::selection(date)?;
    let all_stop_codes: HashSet<&str> = feed.stops.values().map(|s| s.code.as_str()).collect();
    let mut n_created = 0;
    for variant_id in variants {
        if add_variant(feed, doc, variant_id, &window, &all_stop_codes, profiles)?.is_some() {
            n_created += 1;
        }
    }
    Ok(n_created)
}

/// reconciles the stops of one variant and creates its line relation.
/// returns None for a variant without any known stop.
pub fn add_variant(
    feed: &Feed,
    doc: &mut OsmDocument,
    variant_id: VariantId,
    window: &ServiceWindow,
    all_stop_codes: &HashSet<&str>,
    profiles: &AgencyProfiles,
) -> Result<Option<OsmRelationId>, LinesyncCliError> {
    let stops = feed.get_stops(variant_id)?;
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        log::warn!("route variant {variant_id} has no known stop, skipping it");
        return Ok(None);
    };
    let variant = feed.variant(variant_id)?;
    let Some(trip_id) = variant.trip_ids.iter().next() else {
        return Ok(None);
    };
    let route = feed.route_of_trip(trip_id)?;
    let agency = feed.agency_of_route(route)?;
    let profile = profiles.get(&agency.name);
    let ctx = ImportContext {
        agency: &agency.name,
        profile: &profile,
        route_type: route.route_type,
    };

    let line_ref = feed.get_ref(variant_id)?;
    let name = line_relation_ops::line_name(
        route.route_type.display_name(),
        &line_ref,
        &profile.format_stop_name(&first.name),
        &profile.format_stop_name(&last.name),
    );
    log::info!("add trip {name}");
    let attributes = LineAttributes {
        name,
        line_ref,
        colour: route.colour_tag(),
        duration: feed.get_duration(variant_id)?,
        headway: feed.get_headway(variant_id, window)?,
        opening_hours: feed.get_opening_hours(variant_id, window)?,
    };

    let resolved = stop_resolution_ops::resolve_stops(doc, &stops, all_stop_codes, &ctx)?;
    let relation_id =
        line_relation_ops::create_line_relation(doc, &attributes, &stops, &resolved, &ctx)?;
    Ok(Some(relation_id))
}
