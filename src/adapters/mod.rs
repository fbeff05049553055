pub mod json;
pub mod text;

#[derive(Clone, Debug, PartialEq)]
pub struct StopRecord {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl StopRecord {
    pub fn new(name: String, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceRecord {
    pub from: String,
    pub to: String,
    pub meters: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusRecord {
    pub name: String,
    /// Stops as declared; pendulum buses list only the outward direction.
    pub stops: Vec<String>,
    pub is_roundtrip: bool,
}

pub trait CatalogueAdapter {
    type Error;

    /// Returns every stop, in the order ids should be assigned.
    fn stops(&self) -> Result<Vec<StopRecord>, Self::Error>;

    /// Returns the declared road distances between stops.
    fn distances(&self) -> Result<Vec<DistanceRecord>, Self::Error>;

    fn buses(&self) -> Result<Vec<BusRecord>, Self::Error>;
}
