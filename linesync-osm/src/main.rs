use chrono::{Local, NaiveDate};
use clap::{value_parser, Parser, Subcommand};
use linesync_gtfs::feed::Feed;
use linesync_osm::{
    app::{add_line::add_line_ops, export::pseudo_ways_ops},
    config::AgencyProfiles,
    model::{
        osm::{osm_xml_ops, OsmDocument},
        LinesyncCliError,
    },
};
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct LinesyncAppArguments {
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    /// match the stops of a GTFS line to an .osm file and add its route relations
    AddLine {
        #[arg(long, default_value_t = String::from("."), help = "GTFS directory or zip archive")]
        gtfs: String,
        #[arg(long, help = "output .osm file, defaults to the input map file")]
        output: Option<String>,
        #[arg(long, value_parser = value_parser!(NaiveDate), help = "first day of the imported week, defaults to today")]
        date: Option<NaiveDate>,
        #[arg(long, help = "TOML or JSON file with additional agency profiles")]
        agency_config: Option<String>,
        #[arg(help = "JOSM .osm file to update")]
        map_file: String,
        #[arg(help = "short name of the GTFS route to import")]
        line_ref: String,
    },
    /// write the whole GTFS feed as new stops, pseudo-ways and route relations
    Export {
        #[arg(long, default_value_t = String::from("."), help = "GTFS directory or zip archive")]
        gtfs: String,
        #[arg(long, help = "output .osm file, defaults to <agency names>.osm")]
        output: Option<String>,
        #[arg(long, help = "TOML or JSON file with additional agency profiles")]
        agency_config: Option<String>,
    },
}

pub fn run(app: &App) -> Result<(), LinesyncCliError> {
    let today = Local::now().date_naive();
    match app {
        App::AddLine {
            gtfs,
            output,
            date,
            agency_config,
            map_file,
            line_ref,
        } => {
            let profiles = AgencyProfiles::with_file(agency_config.as_ref())?;
            let feed = Feed::from_path(Path::new(gtfs))?;
            let mut doc = osm_xml_ops::read_osm_file(Path::new(map_file))?;
            let date = date.unwrap_or(today);
            let n_created =
                add_line_ops::add_line(&feed, &mut doc, line_ref, date, today, &profiles)?;
            log::info!("added {n_created} route relation(s) for line {line_ref}");
            let output_file = output.as_ref().unwrap_or(map_file);
            osm_xml_ops::write_osm_file(&doc, Path::new(output_file))?;
            Ok(())
        }
        App::Export {
            gtfs,
            output,
            agency_config,
        } => {
            let profiles = AgencyProfiles::with_file(agency_config.as_ref())?;
            let feed = Feed::from_path(Path::new(gtfs))?;
            let mut doc = OsmDocument::new();
            pseudo_ways_ops::export_pseudo_ways(&feed, &mut doc, &profiles, today)?;
            let output_file = match output {
                Some(f) => f.clone(),
                None => pseudo_ways_ops::default_output_filename(&feed),
            };
            osm_xml_ops::write_osm_file(&doc, Path::new(&output_file))?;
            Ok(())
        }
    }
}

fn main() {
    env_logger::init();
    let args = LinesyncAppArguments::parse();
    if let Err(e) = run(&args.app) {
        log::error!("linesync-osm failed: {e}");
        eprintln!("ERROR: {e}");
        std::process::exit(-1);
    }
}
