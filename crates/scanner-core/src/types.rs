//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Stable identity of a placed object, assigned in insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

/// Identity of a blip, unique within its sensor's track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlipId(pub u64);

/// Position relative to the shared sensor origin.
/// Angle is measured from North, clockwise. Distance is normalized (1.0 = scope edge).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarPosition {
    pub angle_deg: f64,
    pub distance_norm: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl PolarPosition {
    pub fn new(angle_deg: f64, distance_norm: f64) -> Self {
        Self {
            angle_deg,
            distance_norm,
        }
    }

    /// Offset from the origin as (east, north), scaled so distance 1.0 has length 1.
    pub fn to_unit_vector(&self) -> DVec2 {
        let rad = self.angle_deg.to_radians();
        DVec2::new(rad.sin(), rad.cos()) * self.distance_norm
    }
}

/// Smallest signed difference `a - b` in degrees, in [-180, 180).
pub fn angular_difference(a: f64, b: f64) -> f64 {
    (a - b + 180.0).rem_euclid(360.0) - 180.0
}

/// Wrap an angle into [0, 360).
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
