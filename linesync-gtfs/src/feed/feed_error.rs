use chrono::NaiveDate;

use super::VariantId;

#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    #[error("failed to read gtfs feed: {0}")]
    BundleReadError(#[from] gtfs_structures::Error),
    #[error("trip '{0}' not found in trips.txt")]
    MissingTrip(String),
    #[error("route '{0}' referenced by a trip not found in routes.txt")]
    MissingRoute(String),
    #[error("no agency found for route '{0}'")]
    MissingAgency(String),
    #[error("route variant {0} does not exist in this feed")]
    MissingVariant(VariantId),
    #[error("no trip found with short_name = {line_ref} at date {date}")]
    LineNotFound { line_ref: String, date: NaiveDate },
    #[error("date overflow computing service window from {0} + {1} days")]
    DateOverflow(NaiveDate, u64),
    #[error("failure writing to file {0}: {1}")]
    CsvWriteError(String, csv::Error),
}
