use chrono::{Local, NaiveDate};
use clap::{value_parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::{io::Write, path::Path};

use super::variant_summaries;
use crate::feed::{Feed, FeedError};
use crate::schedule::ServiceWindow;

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum GtfsOperation {
    /// write one CSV row per route variant with its schedule attributes
    Variants {
        /// a GTFS directory or zip archive
        #[arg(long, default_value_t = String::from("."))]
        gtfs: String,
        /// first day of the schedule window, defaults to today
        #[arg(long, value_parser = value_parser!(NaiveDate))]
        start_date: Option<NaiveDate>,
        /// last day of the schedule window, defaults to start date + 14 days
        #[arg(long, value_parser = value_parser!(NaiveDate))]
        end_date: Option<NaiveDate>,
        /// output CSV file, defaults to stdout
        #[arg(long)]
        output: Option<String>,
    },
}

impl GtfsOperation {
    pub fn run(&self) -> Result<(), FeedError> {
        match self {
            GtfsOperation::Variants {
                gtfs,
                start_date,
                end_date,
                output,
            } => {
                let today = Local::now().date_naive();
                let default_window = ServiceWindow::schedule_default(start_date.unwrap_or(today))?;
                let window = ServiceWindow::new(
                    default_window.start,
                    end_date.unwrap_or(default_window.end),
                );
                let feed = Feed::from_path(Path::new(gtfs))?;
                let rows = variant_summaries(&feed, &window, today)?;
                match output {
                    Some(filename) => {
                        let writer = csv::Writer::from_path(filename)
                            .map_err(|e| FeedError::CsvWriteError(filename.clone(), e))?;
                        write_rows(writer, &rows, filename)
                    }
                    None => {
                        let writer = csv::Writer::from_writer(std::io::stdout());
                        write_rows(writer, &rows, "stdout")
                    }
                }
            }
        }
    }
}

fn write_rows<W: Write, T: Serialize>(
    mut writer: csv::Writer<W>,
    rows: &[T],
    destination: &str,
) -> Result<(), FeedError> {
    for row in rows.iter() {
        writer
            .serialize(row)
            .map_err(|e| FeedError::CsvWriteError(destination.to_string(), e))?;
    }
    writer
        .flush()
        .map_err(|e| FeedError::CsvWriteError(destination.to_string(), csv::Error::from(e)))?;
    log::info!("wrote {} route variants to {destination}", rows.len());
    Ok(())
}
