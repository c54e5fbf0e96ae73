use super::GtfsOperation;
use clap::Parser;

/// command line tool for inspecting the route variants of a GTFS feed
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct GtfsApp {
    #[command(subcommand)]
    pub op: GtfsOperation,
}
