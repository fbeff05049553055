use anyhow::Result;

use crate::{
    adapters::{BusRecord, CatalogueAdapter, DistanceRecord, StopRecord},
    requests::BaseRequest,
};

pub struct JsonAdapter<'a> {
    requests: &'a [BaseRequest],
}

impl<'a> JsonAdapter<'a> {
    pub fn new(requests: &'a [BaseRequest]) -> Self {
        Self { requests }
    }
}

impl CatalogueAdapter for JsonAdapter<'_> {
    type Error = anyhow::Error;

    fn stops(&self) -> Result<Vec<StopRecord>> {
        Ok(self
            .requests
            .iter()
            .filter_map(|request| match request {
                BaseRequest::Stop {
                    name,
                    latitude,
                    longitude,
                    ..
                } => Some(StopRecord::new(name.clone(), *latitude, *longitude)),
                BaseRequest::Bus { .. } => None,
            })
            .collect())
    }

    fn distances(&self) -> Result<Vec<DistanceRecord>> {
        Ok(self
            .requests
            .iter()
            .filter_map(|request| match request {
                BaseRequest::Stop {
                    name,
                    road_distances,
                    ..
                } => Some((name, road_distances)),
                BaseRequest::Bus { .. } => None,
            })
            .flat_map(|(from, road_distances)| {
                road_distances.iter().map(|(to, &meters)| DistanceRecord {
                    from: from.clone(),
                    to: to.clone(),
                    meters,
                })
            })
            .collect())
    }

    fn buses(&self) -> Result<Vec<BusRecord>> {
        Ok(self
            .requests
            .iter()
            .filter_map(|request| match request {
                BaseRequest::Bus {
                    name,
                    stops,
                    is_roundtrip,
                } => Some(BusRecord {
                    name: name.clone(),
                    stops: stops.clone(),
                    is_roundtrip: *is_roundtrip,
                }),
                BaseRequest::Stop { .. } => None,
            })
            .collect())
    }
}
