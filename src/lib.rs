//! A catalogue of bus stops and bus routes, with route statistics and
//! minimum-time itineraries between stops.
//!
//! The catalogue is filled once from a [`adapters::CatalogueAdapter`] and is
//! read-only afterwards. [`routing::TransportRouter`] derives a weighted graph
//! from it and answers point-to-point queries.

pub mod adapters;
pub mod catalogue;
pub mod graph;
pub mod json_builder;
pub mod pipeline;
pub mod request_handler;
pub mod requests;
pub mod routing;
