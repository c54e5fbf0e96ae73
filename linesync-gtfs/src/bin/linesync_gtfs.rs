//! prints or writes a CSV summary of the route variants of a GTFS feed.
use clap::Parser;
use linesync_gtfs::app::GtfsApp;

fn main() {
    env_logger::init();
    let args = GtfsApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("{e}");
        std::process::exit(-1);
    }
}
