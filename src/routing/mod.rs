//! Minimum-time itineraries between stops.
//!
//! Every stop `i` becomes two vertices: `2i`, where a rider arrives and waits,
//! and `2i + 1`, from which buses depart. A wait edge joins them, so each
//! boarding pays the wait time once. Travel edges run from a departure vertex
//! straight to the arrival vertex of any stop the same bus reaches without
//! the rider getting off.

use std::collections::BTreeMap;

use itertools::Itertools;
use tracing::{debug, info};

use crate::{
    catalogue::{Bus, BusId, StopId, TransportCatalogue},
    graph::{DirectedWeightedGraph, Edge, Router, VertexId},
};

mod settings;

pub use settings::RoutingSettings;

/// One step of an itinerary.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteItem<'a> {
    Wait {
        stop_name: &'a str,
        time: f64,
    },
    Bus {
        bus: &'a str,
        span_count: usize,
        time: f64,
    },
}

impl RouteItem<'_> {
    pub fn time(&self) -> f64 {
        match self {
            RouteItem::Wait { time, .. } | RouteItem::Bus { time, .. } => *time,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Itinerary<'a> {
    /// Minutes from arriving at the first stop to arriving at the last.
    pub total_time: f64,
    pub items: Vec<RouteItem<'a>>,
}

/// What a graph edge means to a rider, by id.
#[derive(Clone, Copy, Debug)]
enum EdgeStep {
    Wait {
        stop: StopId,
        time: f64,
    },
    Ride {
        bus: BusId,
        span_count: usize,
        time: f64,
    },
}

#[derive(Clone, Copy, Debug)]
struct Span {
    span_count: usize,
    time: f64,
}

fn arrival_vertex(stop: StopId) -> VertexId {
    stop.index() * 2
}

fn departure_vertex(stop: StopId) -> VertexId {
    stop.index() * 2 + 1
}

/// Graph under construction plus the step each edge stands for. Edge ids are
/// indices into `steps`.
struct GraphBuilder {
    graph: DirectedWeightedGraph<f64>,
    steps: Vec<EdgeStep>,
}

impl GraphBuilder {
    fn new(stop_count: usize) -> Self {
        Self {
            graph: DirectedWeightedGraph::new(stop_count * 2),
            steps: Vec::new(),
        }
    }

    fn add(&mut self, edge: Edge<f64>, step: EdgeStep) {
        let id = self.graph.add_edge(edge);
        debug_assert_eq!(id, self.steps.len());
        self.steps.push(step);
    }

    fn add_wait_edges(&mut self, catalogue: &TransportCatalogue, wait_time: f64) {
        for stop in catalogue.stops() {
            self.add(
                Edge {
                    from: arrival_vertex(stop.id),
                    to: departure_vertex(stop.id),
                    weight: wait_time,
                },
                EdgeStep::Wait {
                    stop: stop.id,
                    time: wait_time,
                },
            );
        }
    }

    /// Adds one edge per ordered stop pair the bus connects, keeping the
    /// fastest ride when the route passes the same pair more than once.
    fn add_bus_edges(&mut self, catalogue: &TransportCatalogue, bus: &Bus, velocity: f64) {
        let mut spans: BTreeMap<(StopId, StopId), Span> = BTreeMap::new();

        for (start, &from) in bus.route.iter().enumerate() {
            let mut time = 0.0;
            for (hop, (&prev, &next)) in bus.route[start..].iter().tuple_windows().enumerate() {
                time += f64::from(catalogue.distance_between(prev, next)) / velocity;
                if next == from {
                    continue;
                }

                let span = Span {
                    span_count: hop + 1,
                    time,
                };
                spans
                    .entry((from, next))
                    .and_modify(|best| {
                        if span.time < best.time {
                            *best = span;
                        }
                    })
                    .or_insert(span);
            }
        }

        debug!(bus = %bus.name, stops = bus.route.len(), edges = spans.len(), "Adding travel edges");

        for ((from, to), span) in spans {
            self.add(
                Edge {
                    from: departure_vertex(from),
                    to: arrival_vertex(to),
                    weight: span.time,
                },
                EdgeStep::Ride {
                    bus: bus.id,
                    span_count: span.span_count,
                    time: span.time,
                },
            );
        }
    }
}

/// Routing graph over a finished catalogue together with its query engine.
///
/// Built once; queries only read from it.
pub struct TransportRouter<'a> {
    catalogue: &'a TransportCatalogue,
    settings: RoutingSettings,
    router: Router<f64>,
    steps: Vec<EdgeStep>,
}

impl<'a> TransportRouter<'a> {
    pub fn new(catalogue: &'a TransportCatalogue, settings: RoutingSettings) -> Self {
        let mut builder = GraphBuilder::new(catalogue.stops().len());

        // wait edges first: travel edges refer to the per-stop vertex pairs
        builder.add_wait_edges(catalogue, f64::from(settings.wait_time));

        let velocity = settings.velocity_m_per_min();
        for bus in catalogue.buses() {
            builder.add_bus_edges(catalogue, bus, velocity);
        }

        let GraphBuilder { graph, steps } = builder;
        info!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "Routing graph built"
        );

        Self {
            catalogue,
            settings,
            router: Router::new(graph),
            steps,
        }
    }

    pub fn settings(&self) -> &RoutingSettings {
        &self.settings
    }

    pub fn router(&self) -> &Router<f64> {
        &self.router
    }

    /// Fastest itinerary between two named stops.
    ///
    /// `None` when either stop is unknown or no bus connects them. A stop
    /// routed to itself takes no time and no steps.
    pub fn route(&self, from: &str, to: &str) -> Option<Itinerary<'a>> {
        let from = self.catalogue.stop(from)?;
        let to = self.catalogue.stop(to)?;

        let info = self
            .router
            .build_route(arrival_vertex(from.id), arrival_vertex(to.id))?;

        let items = info
            .edges
            .iter()
            .map(|&edge| self.item(self.steps[edge]))
            .collect();

        Some(Itinerary {
            total_time: info.weight,
            items,
        })
    }

    fn item(&self, step: EdgeStep) -> RouteItem<'a> {
        let catalogue: &'a TransportCatalogue = self.catalogue;
        match step {
            EdgeStep::Wait { stop, time } => RouteItem::Wait {
                stop_name: &catalogue[stop].name,
                time,
            },
            EdgeStep::Ride {
                bus,
                span_count,
                time,
            } => RouteItem::Bus {
                bus: &catalogue[bus].name,
                span_count,
                time,
            },
        }
    }
}
