use anyhow::{Result, ensure};
use serde::Deserialize;

/// Parameters weighting the routing graph.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct RoutingSettings {
    /// Minutes spent waiting at a stop before every boarding.
    #[serde(rename = "bus_wait_time")]
    pub wait_time: u32,

    /// Bus speed in km/h.
    #[serde(rename = "bus_velocity")]
    pub velocity_kmh: f64,
}

impl RoutingSettings {
    pub fn new(wait_time: u32, velocity_kmh: f64) -> Self {
        Self {
            wait_time,
            velocity_kmh,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.velocity_kmh.is_finite() && self.velocity_kmh > 0.0,
            "bus velocity must be a positive number of km/h, got {}",
            self.velocity_kmh
        );
        Ok(())
    }

    /// Bus speed in meters per minute, the unit edge weights are derived from.
    pub fn velocity_m_per_min(&self) -> f64 {
        self.velocity_kmh * 1000.0 / 60.0
    }
}
