//! Plain data records for objects, sweeps and blips.
//!
//! Object entities in the engine's hecs world carry `ObjectId`, `PolarPosition`
//! and `ObjectKind` as components. Logic lives in systems, not here.

use serde::{Deserialize, Serialize};

use crate::enums::ObjectKind;
use crate::types::{BlipId, ObjectId, PolarPosition};

/// A placed object as read back from the world model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    pub id: ObjectId,
    pub position: PolarPosition,
    pub kind: ObjectKind,
}

/// Beam state for one sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepState {
    /// Current beam bearing in degrees, always in [0, 360).
    pub angle_deg: f64,
}

/// A fading detection marker. References its object by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blip {
    pub id: BlipId,
    pub object: ObjectId,
    /// Ticks since creation.
    pub age_ticks: u32,
    /// Age at which the blip is purged.
    pub max_age_ticks: u32,
}
