//! reconciliation of GTFS stops and lines against OpenStreetMap data,
//! producing JOSM-ready `.osm` files.
pub mod algorithm;
pub mod app;
pub mod config;
pub mod model;
