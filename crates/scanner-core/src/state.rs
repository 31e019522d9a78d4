//! Scanner snapshot: everything a renderer needs, produced after each tick.

use serde::{Deserialize, Serialize};

use crate::components::WorldObject;
use crate::enums::{ObjectKind, SensorKind};
use crate::events::ScanEvent;
use crate::types::{BlipId, ObjectId, PolarPosition, SimTime};

/// Complete visible state after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanSnapshot {
    pub time: SimTime,
    /// One entry per sensor, in `SensorKind::ALL` order.
    pub sensors: Vec<SensorView>,
    pub objects: Vec<WorldObject>,
    /// Events raised since the previous snapshot.
    pub events: Vec<ScanEvent>,
}

/// One sensor's scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorView {
    pub sensor: SensorKind,
    /// Current beam bearing (degrees, 0 = North, clockwise).
    pub sweep_angle_deg: f64,
    pub max_range_norm: f64,
    pub blips: Vec<BlipView>,
}

/// A live blip resolved to its object's position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlipView {
    pub blip_id: BlipId,
    pub object_id: ObjectId,
    pub kind: ObjectKind,
    pub position: PolarPosition,
    pub age_ticks: u32,
    /// 1.0 when fresh, falling linearly to 0.0 at max age.
    pub intensity: f64,
}

impl ScanSnapshot {
    /// The view for `sensor`, if present.
    pub fn sensor(&self, sensor: SensorKind) -> Option<&SensorView> {
        self.sensors.iter().find(|v| v.sensor == sensor)
    }
}
