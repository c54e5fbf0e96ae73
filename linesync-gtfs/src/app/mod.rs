mod gtfs_app;
mod operation;
mod variant_summary_row;

pub use gtfs_app::GtfsApp;
pub use operation::GtfsOperation;
pub use variant_summary_row::{variant_summaries, VariantSummaryRow};
