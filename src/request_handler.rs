//! Answers stat requests against a finished catalogue.

use anyhow::{Result, bail};
use itertools::Itertools;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    adapters::text::TextQuery,
    catalogue::TransportCatalogue,
    json_builder::Builder,
    requests::StatRequest,
    routing::{RouteItem, RoutingSettings, TransportRouter},
};

const NOT_FOUND: &str = "not found";

pub struct RequestHandler<'a> {
    catalogue: &'a TransportCatalogue,
    router: Option<TransportRouter<'a>>,
}

impl<'a> RequestHandler<'a> {
    /// Builds the routing graph up front when settings are given.
    pub fn new(catalogue: &'a TransportCatalogue, settings: Option<RoutingSettings>) -> Result<Self> {
        let router = match settings {
            Some(settings) => {
                settings.validate()?;
                Some(TransportRouter::new(catalogue, settings))
            }
            None => None,
        };
        Ok(Self { catalogue, router })
    }

    /// One JSON object per answerable request, in request order.
    pub fn answer_json(&self, requests: &[StatRequest]) -> Result<Value> {
        let mut builder = Builder::new();
        builder.start_array()?;
        for request in requests {
            self.write_response(&mut builder, request)?;
        }
        Ok(builder.end_array()?.build()?)
    }

    fn write_response(&self, builder: &mut Builder, request: &StatRequest) -> Result<()> {
        let id = match request {
            StatRequest::Bus { id, .. }
            | StatRequest::Stop { id, .. }
            | StatRequest::Route { id, .. } => *id,
            StatRequest::Unsupported => {
                warn!("Skipping unsupported stat request");
                return Ok(());
            }
        };

        builder.start_dict()?.key("request_id")?.value(id)?;

        let found = match request {
            StatRequest::Bus { name, .. } => self.write_bus(builder, name)?,
            StatRequest::Stop { name, .. } => self.write_stop(builder, name)?,
            StatRequest::Route { from, to, .. } => self.write_route(builder, from, to)?,
            StatRequest::Unsupported => unreachable!("skipped above"),
        };
        if !found {
            debug!(id, "Nothing found for request");
            builder.key("error_message")?.value(NOT_FOUND)?;
        }

        builder.end_dict()?;
        Ok(())
    }

    fn write_bus(&self, builder: &mut Builder, name: &str) -> Result<bool> {
        let Some(stats) = self.catalogue.bus_stats(name) else {
            return Ok(false);
        };

        builder
            .key("stop_count")?
            .value(stats.stop_count)?
            .key("unique_stop_count")?
            .value(stats.unique_stop_count)?
            .key("route_length")?
            .value(stats.route_length)?
            .key("curvature")?
            .value(stats.curvature)?;
        Ok(true)
    }

    fn write_stop(&self, builder: &mut Builder, name: &str) -> Result<bool> {
        let Some(buses) = self.catalogue.stop_buses(name) else {
            return Ok(false);
        };

        builder.key("buses")?.start_array()?;
        for bus in buses {
            builder.value(bus)?;
        }
        builder.end_array()?;
        Ok(true)
    }

    fn write_route(&self, builder: &mut Builder, from: &str, to: &str) -> Result<bool> {
        let Some(router) = &self.router else {
            bail!("route from {from:?} to {to:?} requested without routing_settings");
        };
        let Some(itinerary) = router.route(from, to) else {
            return Ok(false);
        };

        builder
            .key("total_time")?
            .value(itinerary.total_time)?
            .key("items")?
            .start_array()?;
        for item in &itinerary.items {
            builder.start_dict()?;
            match *item {
                RouteItem::Wait { stop_name, time } => {
                    builder
                        .key("type")?
                        .value("Wait")?
                        .key("stop_name")?
                        .value(stop_name)?
                        .key("time")?
                        .value(time)?;
                }
                RouteItem::Bus {
                    bus,
                    span_count,
                    time,
                } => {
                    builder
                        .key("type")?
                        .value("Bus")?
                        .key("bus")?
                        .value(bus)?
                        .key("span_count")?
                        .value(span_count)?
                        .key("time")?
                        .value(time)?;
                }
            }
            builder.end_dict()?;
        }
        builder.end_array()?;
        Ok(true)
    }

    /// One line of text per query.
    pub fn answer_text(&self, query: &TextQuery) -> String {
        match query {
            TextQuery::Bus(name) => match self.catalogue.bus_stats(name) {
                Some(stats) => {
                    let curvature = stats
                        .curvature
                        .map_or_else(|| "undefined".to_owned(), |c| format!("{c:.6}"));
                    format!(
                        "Bus {name}: {} stops on route, {} unique stops, {} route length, {curvature} curvature",
                        stats.stop_count, stats.unique_stop_count, stats.route_length
                    )
                }
                None => format!("Bus {name}: {NOT_FOUND}"),
            },
            TextQuery::Stop(name) => match self.catalogue.stop_buses(name) {
                Some(buses) if buses.is_empty() => format!("Stop {name}: no buses"),
                Some(buses) => format!("Stop {name}: buses {}", buses.iter().join(" ")),
                None => format!("Stop {name}: {NOT_FOUND}"),
            },
        }
    }
}
