use std::{
    collections::{BTreeSet, HashMap},
    hash::Hash,
    ops::Index,
};

use geo_types::{Coord, Rect};
use itertools::Itertools;
use tracing::{debug, info};

use crate::adapters::CatalogueAdapter;

mod error;
pub mod geo;

pub use error::CatalogueError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct StopId(usize);

impl StopId {
    pub fn new(idx: usize) -> Self {
        Self(idx)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BusId(usize);

impl BusId {
    pub fn new(idx: usize) -> Self {
        Self(idx)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Stop {
    pub fn new(id: StopId, name: String, lat: f64, lon: f64) -> Self {
        Self { id, name, lat, lon }
    }

    pub fn location(&self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Stop {}

impl Hash for Stop {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteType {
    Ring,
    Pendulum,
}

/// A bus line and the full sequence of stops it visits.
///
/// For pendulum buses `route` already contains the way back, so a line
/// declared as `[A, B, C]` is stored as `[A, B, C, B, A]`.
#[derive(Clone, Debug)]
pub struct Bus {
    pub id: BusId,
    pub name: String,
    pub route: Vec<StopId>,
    pub route_type: RouteType,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BusStats {
    pub stop_count: usize,
    pub unique_stop_count: usize,
    pub route_length: u64,
    /// Road length divided by great-circle length; `None` when the route has
    /// no geographic extent.
    pub curvature: Option<f64>,
}

#[derive(Debug, Default)]
pub struct TransportCatalogue {
    stops: Vec<Stop>,
    stop_ids: HashMap<String, StopId>,
    buses: Vec<Bus>,
    bus_ids: HashMap<String, BusId>,
    stop_to_buses: Vec<BTreeSet<String>>,
    distances: HashMap<(StopId, StopId), u32>,
    bounds: Option<Rect<f64>>,
}

impl TransportCatalogue {
    pub fn new() -> Self {
        Default::default()
    }

    /// Loads every stop, then every distance, then every bus.
    ///
    /// Distances and buses resolve stop names eagerly, so this order is
    /// required regardless of how the source interleaves its records.
    pub fn from_adapter<A>(adapter: &A) -> Result<Self, A::Error>
    where
        A: CatalogueAdapter,
        A::Error: From<CatalogueError>,
    {
        let mut catalogue = Self::new();

        for stop in adapter.stops()? {
            catalogue.add_stop(stop.name, stop.lat, stop.lon)?;
        }
        for distance in adapter.distances()? {
            catalogue.add_distance(&distance.from, &distance.to, distance.meters)?;
        }
        for bus in adapter.buses()? {
            catalogue.add_bus(bus.name, &bus.stops, bus.is_roundtrip)?;
        }

        info!(
            stops = catalogue.stops.len(),
            buses = catalogue.buses.len(),
            distances = catalogue.distances.len(),
            "Catalogue loaded"
        );

        Ok(catalogue)
    }

    pub fn add_stop(
        &mut self,
        name: impl Into<String>,
        lat: f64,
        lon: f64,
    ) -> Result<StopId, CatalogueError> {
        let name = name.into();
        if self.stop_ids.contains_key(&name) {
            return Err(CatalogueError::DuplicateStop(name));
        }

        let id = StopId::new(self.stops.len());
        self.stop_ids.insert(name.clone(), id);
        self.stops.push(Stop::new(id, name, lat, lon));
        self.stop_to_buses.push(BTreeSet::new());

        Ok(id)
    }

    /// Records the road distance from `from` to `to`. The first declaration of
    /// an ordered pair wins.
    pub fn add_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<(), CatalogueError> {
        let from = self.resolve_stop(from)?;
        let to = self.resolve_stop(to)?;
        self.distances.entry((from, to)).or_insert(meters);
        Ok(())
    }

    pub fn add_bus<S: AsRef<str>>(
        &mut self,
        name: impl Into<String>,
        stops: &[S],
        is_roundtrip: bool,
    ) -> Result<BusId, CatalogueError> {
        let name = name.into();
        if self.bus_ids.contains_key(&name) {
            return Err(CatalogueError::DuplicateBus(name));
        }

        let declared = stops
            .iter()
            .map(|s| self.resolve_stop(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let (Some(first), Some(last)) = (declared.first(), declared.last()) else {
            return Err(CatalogueError::EmptyRoute(name));
        };

        let route_type = if is_roundtrip {
            if first != last {
                return Err(CatalogueError::RingNotClosed(name));
            }
            RouteType::Ring
        } else {
            RouteType::Pendulum
        };

        let route: Vec<StopId> = match route_type {
            RouteType::Ring => declared,
            RouteType::Pendulum => declared
                .iter()
                .chain(declared.iter().rev().skip(1))
                .copied()
                .collect(),
        };

        let id = BusId::new(self.buses.len());
        for &stop in route.iter().unique() {
            self.stop_to_buses[stop.0].insert(name.clone());
            self.extend_bounds(stop);
        }

        debug!(bus = %name, stops = route.len(), ?route_type, "Added bus");

        self.bus_ids.insert(name.clone(), id);
        self.buses.push(Bus {
            id,
            name,
            route,
            route_type,
        });

        Ok(id)
    }

    pub fn stop(&self, name: &str) -> Option<&Stop> {
        self.stop_ids.get(name).map(|&id| &self[id])
    }

    pub fn bus(&self, name: &str) -> Option<&Bus> {
        self.bus_ids.get(name).map(|&id| &self[id])
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    /// Bounding box of every stop served by at least one bus.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.bounds
    }

    /// Road distance in meters, falling back to the reverse direction and
    /// then to zero.
    pub fn distance_between(&self, from: StopId, to: StopId) -> u32 {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
            .unwrap_or(0)
    }

    pub fn count_unique_stops(&self, bus: &Bus) -> usize {
        bus.route.iter().unique().count()
    }

    pub fn route_length(&self, bus: &Bus) -> u64 {
        bus.route
            .iter()
            .tuple_windows()
            .map(|(&from, &to)| u64::from(self.distance_between(from, to)))
            .sum()
    }

    pub fn route_geo_length(&self, bus: &Bus) -> f64 {
        bus.route
            .iter()
            .tuple_windows()
            .map(|(&from, &to)| geo::haversine_distance(self[from].location(), self[to].location()))
            .sum()
    }

    /// Names of the buses serving `stop`, in lexicographic order.
    pub fn buses_for_stop(&self, stop: StopId) -> impl Iterator<Item = &str> {
        self.stop_to_buses[stop.0].iter().map(String::as_str)
    }

    pub fn bus_stats(&self, name: &str) -> Option<BusStats> {
        let bus = self.bus(name)?;
        let route_length = self.route_length(bus);
        let geo_length = self.route_geo_length(bus);

        Some(BusStats {
            stop_count: bus.route.len(),
            unique_stop_count: self.count_unique_stops(bus),
            route_length,
            curvature: (geo_length > 0.0).then(|| route_length as f64 / geo_length),
        })
    }

    /// Buses serving the named stop, or `None` if there is no such stop.
    pub fn stop_buses(&self, name: &str) -> Option<Vec<&str>> {
        self.stop(name)
            .map(|stop| self.buses_for_stop(stop.id).collect())
    }

    fn resolve_stop(&self, name: &str) -> Result<StopId, CatalogueError> {
        self.stop_ids
            .get(name)
            .copied()
            .ok_or_else(|| CatalogueError::UnknownStop(name.to_owned()))
    }

    fn extend_bounds(&mut self, stop: StopId) {
        let location = self.stops[stop.0].location();
        self.bounds = Some(match self.bounds {
            Some(rect) => Rect::new(
                Coord {
                    x: rect.min().x.min(location.x),
                    y: rect.min().y.min(location.y),
                },
                Coord {
                    x: rect.max().x.max(location.x),
                    y: rect.max().y.max(location.y),
                },
            ),
            None => Rect::new(location, location),
        });
    }
}

impl Index<StopId> for TransportCatalogue {
    type Output = Stop;

    fn index(&self, index: StopId) -> &Self::Output {
        &self.stops[index.0]
    }
}

impl Index<BusId> for TransportCatalogue {
    type Output = Bus;

    fn index(&self, index: BusId) -> &Self::Output {
        &self.buses[index.0]
    }
}
