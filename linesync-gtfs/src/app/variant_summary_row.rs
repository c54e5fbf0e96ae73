use chrono::NaiveDate;
use kdam::tqdm;
use serde::{Deserialize, Serialize};

use crate::feed::{Feed, FeedError};
use crate::schedule::ServiceWindow;

/// CSV row describing one route variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSummaryRow {
    pub variant_id: usize,
    #[serde(rename = "ref")]
    pub line_ref: String,
    pub agency: String,
    pub route_type: String,
    pub name: String,
    pub headsign: String,
    pub n_stops: usize,
    pub n_trips: usize,
    pub duration: Option<String>,
    pub headway: Option<String>,
    pub opening_hours: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// summarizes every variant of the feed, with headway and opening hours
/// computed over `window`.
pub fn variant_summaries(
    feed: &Feed,
    window: &ServiceWindow,
    today: NaiveDate,
) -> Result<Vec<VariantSummaryRow>, FeedError> {
    let iter = tqdm!(
        feed.variants().iter(),
        total = feed.variants().len(),
        desc = "summarize route variants"
    );
    let mut rows = Vec::with_capacity(feed.variants().len());
    for variant in iter {
        let id = variant.id;
        let (start_date, end_date) = feed.get_service_date_range(id, today)?;
        rows.push(VariantSummaryRow {
            variant_id: id.0,
            line_ref: feed.get_ref(id)?,
            agency: feed.get_agency(id)?,
            route_type: feed.get_route_type(id)?,
            name: feed.get_osm_name(id)?,
            headsign: feed.get_headsign(id)?,
            n_stops: variant.n_stops(),
            n_trips: variant.n_trips(),
            duration: feed.get_duration(id)?,
            headway: feed.get_headway(id, window)?,
            opening_hours: feed.get_opening_hours(id, window)?,
            start_date,
            end_date,
        });
    }
    Ok(rows)
}
