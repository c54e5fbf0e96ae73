mod linesync_cli_error;
pub mod osm;

pub use linesync_cli_error::LinesyncCliError;
