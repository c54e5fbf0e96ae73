use super::osm::OsmError;
use linesync_gtfs::feed::FeedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinesyncCliError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("{source}")]
    FeedError {
        #[from]
        source: FeedError,
    },
    #[error("{source}")]
    OsmError {
        #[from]
        source: OsmError,
    },
    #[error("failure reading configuration: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
}
